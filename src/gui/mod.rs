pub mod app;
pub mod style;
pub mod view;
pub mod widget;

pub use style::{HexColor, Style};
pub use widget::{ArcSlider, MountedSlider, SlotFrame, SlotPosition};
