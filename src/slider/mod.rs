pub mod geometry;
pub mod model;

pub use geometry::{ArcGeometry, Dimensions, Point};
pub use model::{Degrees, DragOutcome, SliderState, ValueRange, pointer_angle};

pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 100.0;
pub const MIN_STEP: f64 = 1.0;
pub const HALF_TURN: f64 = 180.0;
pub const FULL_TURN: f64 = 360.0;

pub const DEFAULT_WIDTH: f64 = 300.0; // arc diameter
pub const DEFAULT_THUMB_SIZE: f64 = 30.0; // thumb hit box
pub const DEFAULT_STROKE_WIDTH: f64 = 20.0;
pub const THUMB_KNOB_DIAMETER: f64 = 40.0;
pub const THUMB_DOT_DIAMETER: f64 = 10.0;
pub const CENTER_FRAME_RATIO: f64 = 0.65; // inner overlay size relative to width
pub const LABEL_OFFSET: f64 = 24.0; // end-cap labels sit below the arc ends
