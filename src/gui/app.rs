use crate::config::{self, Config, RangeOverrides};
use crate::events::AppEvent;
use crate::gui::view;
use crate::gui::widget::{ArcSlider, MountedSlider};
use crate::slider::geometry::Point;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const WINDOW_PADDING: i32 = 120;

pub struct AppModel {
    pub slider: Rc<RefCell<MountedSlider>>,
    /// Host-side mirror of the slider value, updated from the change callback.
    pub value: f64,
    pub overrides: RangeOverrides,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    DragBegin(Point),
    DragUpdate(Point),
    DragEnd,
    ValueChanged(f64),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    /// The demo's slider: caption and value in the middle, range bounds at the ends.
    fn build_slider(config: &Config, sender: &ComponentSender<Self>) -> ArcSlider {
        let sender = sender.clone();
        config
            .slider()
            .inside_circle_view(view::value_readout)
            .left_view(view::range_label)
            .right_view(view::range_label)
            .on_changed_value(move |value| sender.input(AppMsg::ValueChanged(value)))
    }

    fn canvas_geometry(&self) -> crate::slider::ArcGeometry {
        self.slider.borrow().geometry(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        RangeOverrides,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Arc Slider"),
            set_default_size: (default_size, default_size),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::DragUpdate(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragEnd);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, overrides, rx) = init;

        let slider = Self::build_slider(&config, &sender).mount();
        let default_size = slider.dimensions().width as i32 + WINDOW_PADDING;
        let value = slider.value();
        let slider = Rc::new(RefCell::new(slider));

        let model = AppModel {
            slider: slider.clone(),
            value,
            overrides,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let slider_draw = model.slider.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let slider = slider_draw.borrow();
                let geometry = slider.geometry(width as f64, height as f64);
                if let Err(e) = view::draw(cr, &slider, &geometry) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::DragBegin(point) => {
                let geometry = self.canvas_geometry();
                if !self.slider.borrow_mut().begin_drag(point, &geometry) {
                    log::debug!("Drag started off the thumb at {:?}", point);
                }
            }
            AppMsg::DragUpdate(point) => {
                let geometry = self.canvas_geometry();
                let outcome = self.slider.borrow_mut().drag_to(point, &geometry);
                if outcome.should_redraw() {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::DragEnd => self.slider.borrow_mut().end_drag(),
            AppMsg::ValueChanged(value) => {
                if value != self.value {
                    log::info!("Value changed to {}", view::format_value(value));
                }
                self.value = value;
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(mut new_config) => {
                    self.overrides.apply(&mut new_config);
                    let slider = Self::build_slider(&new_config, &sender);
                    self.slider.borrow_mut().reconfigure(slider);
                    self.value = self.slider.borrow().value();
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
