use super::style::Style;
use super::widget::{MountedSlider, SlotFrame, SlotPosition};
use crate::slider::geometry::{ArcGeometry, Point};
use crate::slider::{LABEL_OFFSET, THUMB_DOT_DIAMETER, THUMB_KNOB_DIAMETER};
use cairo::{Context, LineCap, LinearGradient};
use palette::Srgba;
use std::f64::consts::PI;

const CAPTION_FONT_SIZE: f64 = 14.0;
const VALUE_FONT_SIZE: f64 = 28.0;
const LABEL_FONT_SIZE: f64 = 14.0;
const READOUT_TOP_PADDING: f64 = 20.0;

pub fn format_value(value: f64) -> String {
    format!("{value:.0}")
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn linear_gradient(from: Point, to: Point, stops: &[(f64, Srgba<f64>)]) -> LinearGradient {
    let gradient = LinearGradient::new(from.x, from.y, to.x, to.y);
    for (offset, color) in stops {
        let (r, g, b, a) = color.into_components();
        gradient.add_color_stop_rgba(*offset, r, g, b, a);
    }
    gradient
}

fn evenly_spaced(colors: &[Srgba<f64>]) -> Vec<(f64, Srgba<f64>)> {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f64 / last, *c))
        .collect()
}

/// Draws `text` centered on `at`.
pub fn draw_text(
    cr: &Context,
    text: &str,
    at: Point,
    size: f64,
    color: Srgba<f64>,
    weight: cairo::FontWeight,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.width() / 2.0 - ext.x_bearing(),
        at.y + ext.height() / 2.0,
    );
    cr.show_text(text)
}

/// Center slot content: the style caption with the current value under it.
pub fn value_readout(cr: &Context, frame: &SlotFrame<'_>) -> Result<(), cairo::Error> {
    let top = frame.center.y - frame.extent / 2.0 + READOUT_TOP_PADDING;
    let caption_y = top + CAPTION_FONT_SIZE / 2.0;
    if !frame.style.text.is_empty() {
        draw_text(
            cr,
            &frame.style.text,
            Point::new(frame.center.x, caption_y),
            CAPTION_FONT_SIZE,
            frame.style.text_color,
            cairo::FontWeight::Normal,
        )?;
    }
    draw_text(
        cr,
        &format_value(frame.value),
        Point::new(frame.center.x, caption_y + CAPTION_FONT_SIZE + VALUE_FONT_SIZE / 2.0),
        VALUE_FONT_SIZE,
        frame.style.progress_text_color,
        cairo::FontWeight::Bold,
    )
}

/// End-cap slot content: the bound of the range at that end.
pub fn range_label(cr: &Context, frame: &SlotFrame<'_>) -> Result<(), cairo::Error> {
    let bound = match frame.position {
        SlotPosition::Right => frame.range.max(),
        SlotPosition::Left | SlotPosition::Center => frame.range.min(),
    };
    draw_text(
        cr,
        &format_value(bound),
        frame.center,
        LABEL_FONT_SIZE,
        frame.style.text_color,
        cairo::FontWeight::Normal,
    )
}

struct SliderRenderer<'a> {
    slider: &'a MountedSlider,
    geometry: &'a ArcGeometry,
}

impl<'a> SliderRenderer<'a> {
    fn new(slider: &'a MountedSlider, geometry: &'a ArcGeometry) -> Self {
        Self { slider, geometry }
    }

    fn style(&self) -> &Style {
        self.slider.style()
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_center(cr)?;
        self.draw_track(cr)?;
        self.draw_progress(cr)?;
        self.draw_slot(cr, SlotPosition::Left)?;
        self.draw_slot(cr, SlotPosition::Right)?;
        self.draw_thumb(cr)
    }

    fn frame(&self, position: SlotPosition) -> SlotFrame<'_> {
        let (center, extent) = match position {
            SlotPosition::Center => (self.geometry.center, self.geometry.center_frame_diameter()),
            SlotPosition::Left => (self.geometry.left_label_anchor(), 2.0 * LABEL_OFFSET),
            SlotPosition::Right => (self.geometry.right_label_anchor(), 2.0 * LABEL_OFFSET),
        };
        SlotFrame {
            position,
            center,
            extent,
            value: self.slider.value(),
            range: self.slider.range(),
            style: self.style(),
        }
    }

    fn draw_slot(&self, cr: &Context, position: SlotPosition) -> Result<(), cairo::Error> {
        let Some(render) = self.slider.slots().get(position) else {
            return Ok(());
        };
        cr.save()?;
        let result = render(cr, &self.frame(position));
        cr.restore()?;
        result
    }

    /// The open area inside the arc, filled with the background colors, then the center slot.
    fn draw_center(&self, cr: &Context) -> Result<(), cairo::Error> {
        let colors = &self.style().circle_background_colors;
        let radius = self.geometry.center_frame_diameter() / 2.0;
        let c = self.geometry.center;

        if !colors.is_empty() && radius > 0.0 {
            let gradient = linear_gradient(
                Point::new(c.x, c.y - radius),
                c,
                &evenly_spaced(colors),
            );
            cr.set_source(&gradient)?;
            cr.new_path();
            cr.arc(c.x, c.y, radius, PI, 2.0 * PI);
            cr.close_path();
            cr.fill()?;
        }

        self.draw_slot(cr, SlotPosition::Center)
    }

    fn stroke_arc(&self, cr: &Context, end: f64) -> Result<(), cairo::Error> {
        let geo = self.geometry;
        cr.set_line_width(geo.stroke_width);
        cr.set_line_cap(LineCap::Round);
        cr.new_path();
        cr.arc(geo.center.x, geo.center.y, geo.radius, geo.start_radians(), end);
        cr.stroke()
    }

    fn draw_track(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_color(cr, self.style().track_color);
        self.stroke_arc(cr, self.geometry.track_end_radians())
    }

    fn draw_progress(&self, cr: &Context) -> Result<(), cairo::Error> {
        let angle = self.slider.angle();
        if ArcGeometry::trim_fraction(angle) <= 0.0 {
            return Ok(());
        }

        let geo = self.geometry;
        let gradient = linear_gradient(
            Point::new(geo.center.x - geo.radius, geo.center.y),
            Point::new(geo.center.x + geo.radius, geo.center.y),
            &self.style().gradient_stops(),
        );
        cr.set_source(&gradient)?;
        self.stroke_arc(cr, geo.progress_end_radians(angle))
    }

    fn draw_thumb(&self, cr: &Context) -> Result<(), cairo::Error> {
        let thumb = self.geometry.thumb_center(self.slider.angle());

        set_color(cr, self.style().thumb_color);
        cr.new_path();
        cr.arc(thumb.x, thumb.y, THUMB_KNOB_DIAMETER / 2.0, 0.0, 2.0 * PI);
        cr.fill()?;

        set_color(cr, self.style().thumb_dot_color);
        cr.new_path();
        cr.arc(thumb.x, thumb.y, THUMB_DOT_DIAMETER / 2.0, 0.0, 2.0 * PI);
        cr.fill()
    }
}

pub fn draw(
    cr: &Context,
    slider: &MountedSlider,
    geometry: &ArcGeometry,
) -> Result<(), cairo::Error> {
    SliderRenderer::new(slider, geometry).draw(cr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::style::hex;
    use crate::gui::widget::ArcSlider;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SIZE: i32 = 400;

    fn render(slider: &MountedSlider) -> (cairo::ImageSurface, ArcGeometry) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, SIZE, SIZE).unwrap();
        let geo = slider.geometry(SIZE as f64, SIZE as f64);
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, slider, &geo).unwrap();
        }
        surface.flush();
        (surface, geo)
    }

    /// Alpha of the pixel under `p` (ARGB32 is stored as native-endian u32).
    fn alpha_at(surface: &mut cairo::ImageSurface, p: Point) -> u8 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = p.y as usize * stride + p.x as usize * 4;
        let pixel = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (pixel >> 24) as u8
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(20.0), "20");
        assert_eq!(format_value(49.6), "50");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn test_draws_track_and_thumb_above_baseline_only() {
        let slider = ArcSlider::new(20.0)
            .circle_background_colors(Vec::new())
            .mount();
        let (mut surface, geo) = render(&slider);

        let thumb = geo.thumb_center(slider.angle());
        let top = Point::new(geo.center.x, geo.center.y - geo.radius);
        let below = Point::new(geo.center.x, geo.center.y + geo.radius / 2.0);

        assert_eq!(alpha_at(&mut surface, thumb), 255);
        assert_eq!(alpha_at(&mut surface, top), 255);
        assert_eq!(alpha_at(&mut surface, below), 0);
        assert_eq!(alpha_at(&mut surface, geo.center), 0);
    }

    #[test]
    fn test_background_fills_open_area() {
        let slider = ArcSlider::new(0.0)
            .circle_background_colors(vec![hex("#E5EAFF")])
            .mount();
        let (mut surface, geo) = render(&slider);
        let inside = Point::new(geo.center.x, geo.center.y - 10.0);
        assert_eq!(alpha_at(&mut surface, inside), 255);
    }

    type Seen = Rc<RefCell<Vec<(SlotPosition, Point, f64)>>>;

    fn recorder(
        seen: &Seen,
    ) -> impl Fn(&Context, &SlotFrame<'_>) -> Result<(), cairo::Error> + 'static {
        let seen = seen.clone();
        move |_, frame| {
            seen.borrow_mut()
                .push((frame.position, frame.center, frame.value));
            Ok(())
        }
    }

    #[test]
    fn test_slots_receive_frames() {
        let seen: Seen = Rc::default();
        let slider = ArcSlider::new(40.0)
            .inside_circle_view(recorder(&seen))
            .left_view(recorder(&seen))
            .right_view(recorder(&seen))
            .mount();
        let (_, geo) = render(&slider);

        let seen = seen.borrow();
        let positions: Vec<_> = seen.iter().map(|(p, _, _)| *p).collect();
        assert_eq!(
            positions,
            vec![SlotPosition::Center, SlotPosition::Left, SlotPosition::Right]
        );
        assert_eq!(seen[0].1, geo.center);
        assert_eq!(seen[1].1, geo.left_label_anchor());
        assert_eq!(seen[2].1, geo.right_label_anchor());
        assert!(seen.iter().all(|(_, _, v)| *v == 40.0));
    }

    #[test]
    fn test_slot_error_propagates() {
        let slider = ArcSlider::new(0.0)
            .left_view(|_, _| Err(cairo::Error::InvalidRestore))
            .mount();
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, SIZE, SIZE).unwrap();
        let cr = Context::new(&surface).unwrap();
        let geo = slider.geometry(SIZE as f64, SIZE as f64);
        assert!(matches!(
            draw(&cr, &slider, &geo),
            Err(cairo::Error::InvalidRestore)
        ));
    }

    #[test]
    fn test_builtin_slots_render() {
        let slider = ArcSlider::new(20.0)
            .text("Value")
            .inside_circle_view(value_readout)
            .left_view(range_label)
            .right_view(range_label)
            .mount();
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, SIZE, SIZE).unwrap();
        let cr = Context::new(&surface).unwrap();
        let geo = slider.geometry(SIZE as f64, SIZE as f64);
        assert!(draw(&cr, &slider, &geo).is_ok());
    }
}
