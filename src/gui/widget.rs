use crate::gui::style::Style;
use crate::slider::geometry::{ArcGeometry, Dimensions, Point};
use crate::slider::model::{Degrees, DragOutcome, SliderState, ValueRange};
use crate::slider::{DEFAULT_MAX, DEFAULT_MIN, MIN_STEP};
use cairo::Context;
use palette::Srgba;
use std::rc::Rc;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SlotPosition {
    Center,
    Left,
    Right,
}

/// Where and with what a slot renderer is asked to draw.
pub struct SlotFrame<'a> {
    pub position: SlotPosition,
    pub center: Point,
    /// Diameter of the area the content should stay within.
    pub extent: f64,
    pub value: f64,
    pub range: ValueRange,
    pub style: &'a Style,
}

pub type SlotRenderer = Rc<dyn Fn(&Context, &SlotFrame<'_>) -> Result<(), cairo::Error>>;
pub type ChangeCallback = Rc<dyn Fn(f64)>;

#[derive(Clone, Default)]
pub struct Slots {
    pub center: Option<SlotRenderer>,
    pub left: Option<SlotRenderer>,
    pub right: Option<SlotRenderer>,
}

impl Slots {
    pub fn get(&self, position: SlotPosition) -> Option<&SlotRenderer> {
        match position {
            SlotPosition::Center => self.center.as_ref(),
            SlotPosition::Left => self.left.as_ref(),
            SlotPosition::Right => self.right.as_ref(),
        }
    }

    pub fn filled(&self) -> Vec<SlotPosition> {
        SlotPosition::iter()
            .filter(|p| self.get(*p).is_some())
            .collect()
    }
}

/// Unmounted slider configuration. Every setter consumes the receiver and hands back a new
/// configuration with one field replaced; clones share slot renderers and the callback.
#[derive(Clone)]
pub struct ArcSlider {
    initial_value: f64,
    min: f64,
    max: f64,
    step: f64,
    style: Style,
    slots: Slots,
    on_change: Option<ChangeCallback>,
}

impl ArcSlider {
    pub fn new(initial_value: f64) -> Self {
        Self {
            initial_value,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: MIN_STEP,
            style: Style::default(),
            slots: Slots::default(),
            on_change: None,
        }
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.min, self.max, self.step)
    }

    pub fn style_ref(&self) -> &Style {
        &self.style
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.style.dimensions.width = width;
        self
    }

    pub fn thumb_size(mut self, size: f64) -> Self {
        self.style.dimensions.thumb_size = size;
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.style.dimensions.stroke_width = width;
        self
    }

    pub fn slider_colors(mut self, colors: Vec<Srgba<f64>>) -> Self {
        self.style.slider_colors = colors;
        self
    }

    pub fn track_color(mut self, color: Srgba<f64>) -> Self {
        self.style.track_color = color;
        self
    }

    pub fn thumb_color(mut self, color: Srgba<f64>) -> Self {
        self.style.thumb_color = color;
        self
    }

    pub fn progress_text_color(mut self, color: Srgba<f64>) -> Self {
        self.style.progress_text_color = color;
        self
    }

    pub fn circle_background_colors(mut self, colors: Vec<Srgba<f64>>) -> Self {
        self.style.circle_background_colors = colors;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.style.text = text.into();
        self
    }

    pub fn text_color(mut self, color: Srgba<f64>) -> Self {
        self.style.text_color = color;
        self
    }

    pub fn min_value(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max_value(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = ValueRange::coerce_step(step);
        self
    }

    pub fn on_changed_value<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) + 'static,
    {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn inside_circle_view<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context, &SlotFrame<'_>) -> Result<(), cairo::Error> + 'static,
    {
        self.slots.center = Some(Rc::new(f));
        self
    }

    pub fn left_view<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context, &SlotFrame<'_>) -> Result<(), cairo::Error> + 'static,
    {
        self.slots.left = Some(Rc::new(f));
        self
    }

    pub fn right_view<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context, &SlotFrame<'_>) -> Result<(), cairo::Error> + 'static,
    {
        self.slots.right = Some(Rc::new(f));
        self
    }

    /// Snaps the initial value into range. This is the only place that happens.
    pub fn mount(self) -> MountedSlider {
        let range = self.range();
        let state = SliderState::mount(self.initial_value, &range);
        log::debug!(
            "Mounted slider at {} in {}..{} step {}, slots {:?}",
            state.value(),
            range.min(),
            range.max(),
            range.step(),
            self.slots.filled()
        );

        MountedSlider {
            config: self,
            range,
            state,
            dragging: false,
        }
    }
}

/// A slider that has appeared: owns the current value and reports changes through the
/// configured callback.
pub struct MountedSlider {
    config: ArcSlider,
    range: ValueRange,
    state: SliderState,
    dragging: bool,
}

impl MountedSlider {
    pub fn value(&self) -> f64 {
        self.state.value()
    }

    pub fn angle(&self) -> Degrees {
        self.state.angle()
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn style(&self) -> &Style {
        &self.config.style
    }

    pub fn slots(&self) -> &Slots {
        &self.config.slots
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.config.style.dimensions
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn geometry(&self, canvas_width: f64, canvas_height: f64) -> ArcGeometry {
        ArcGeometry::fit(canvas_width, canvas_height, self.dimensions())
    }

    /// Starts a drag if `point` (canvas coordinates) is on the thumb.
    pub fn begin_drag(&mut self, point: Point, geometry: &ArcGeometry) -> bool {
        self.dragging = geometry.hits_thumb(point, self.angle());
        self.dragging
    }

    /// Moves the thumb towards `point` (canvas coordinates). Returns `Rejected` when no drag is
    /// in progress or the pointer is below the baseline; otherwise the callback runs once.
    pub fn drag_to(&mut self, point: Point, geometry: &ArcGeometry) -> DragOutcome {
        if !self.dragging {
            return DragOutcome::Rejected;
        }

        let outcome = self.state.apply_pointer(
            geometry.to_local(point),
            geometry.local_origin(),
            &self.range,
        );

        if let Some(value) = outcome.accepted_value()
            && let Some(on_change) = &self.config.on_change
        {
            on_change(value);
        }
        outcome
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Host-side write of the value; snapped like any other input, no callback.
    pub fn set_value(&mut self, value: f64) {
        self.state.set_value(value, &self.range);
    }

    /// Swaps in a new configuration without re-mounting: the current value is kept and
    /// snapped into the new range, the new initial value is ignored.
    pub fn reconfigure(&mut self, config: ArcSlider) {
        self.range = config.range();
        self.config = config;
        let value = self.state.value();
        self.state.set_value(value, &self.range);
    }
}
