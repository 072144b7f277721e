use crate::slider::model::Degrees;
use crate::slider::{
    CENTER_FRAME_RATIO, DEFAULT_STROKE_WIDTH, DEFAULT_THUMB_SIZE, DEFAULT_WIDTH, FULL_TURN,
    LABEL_OFFSET, THUMB_KNOB_DIAMETER,
};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Sizes the arc is laid out with. Negative inputs are treated as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Diameter of the arc.
    pub width: f64,
    /// Side of the square the thumb accepts drags in.
    pub thumb_size: f64,
    pub stroke_width: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            thumb_size: DEFAULT_THUMB_SIZE,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Placement of the arc inside a canvas. The arc bulges upward: the minimum end is on the
/// left, the maximum end on the right, and the open side faces down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
    pub thumb_size: f64,
}

impl ArcGeometry {
    /// Shrinks the arc when the canvas is too small for the requested width, then centers the
    /// half-disc in the canvas.
    pub fn fit(canvas_width: f64, canvas_height: f64, dims: &Dimensions) -> Self {
        let stroke_width = dims.stroke_width.max(0.0);
        let thumb_size = dims.thumb_size.max(0.0);
        let margin = THUMB_KNOB_DIAMETER.max(stroke_width).max(thumb_size) / 2.0;

        let radius = (dims.width.max(0.0) / 2.0)
            .min(canvas_width / 2.0 - margin)
            .min(canvas_height - 2.0 * margin - LABEL_OFFSET)
            .max(0.0);

        Self {
            center: Point::new(canvas_width / 2.0, canvas_height / 2.0 + radius / 2.0),
            radius,
            stroke_width,
            thumb_size,
        }
    }

    /// Rotates a canvas point half a turn around the arc center. In this frame the arc runs
    /// counter-clockwise from 0° to 180° around [`Self::local_origin`].
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(
            2.0 * self.center.x - point.x,
            2.0 * self.center.y - point.y,
        )
    }

    pub fn local_origin(&self) -> Point {
        self.center
    }

    pub fn thumb_center(&self, angle: Degrees) -> Point {
        let rad = angle.to_radians();
        Point::new(
            self.center.x - self.radius * rad.cos(),
            self.center.y - self.radius * rad.sin(),
        )
    }

    pub fn thumb_hit_radius(&self) -> f64 {
        self.thumb_size.max(THUMB_KNOB_DIAMETER) / 2.0
    }

    pub fn hits_thumb(&self, point: Point, angle: Degrees) -> bool {
        point.distance(self.thumb_center(angle)) <= self.thumb_hit_radius()
    }

    pub fn left_label_anchor(&self) -> Point {
        Point::new(self.center.x - self.radius, self.center.y + LABEL_OFFSET)
    }

    pub fn right_label_anchor(&self) -> Point {
        Point::new(self.center.x + self.radius, self.center.y + LABEL_OFFSET)
    }

    pub fn center_frame_diameter(&self) -> f64 {
        2.0 * self.radius * CENTER_FRAME_RATIO
    }

    /// Fraction of a full circle the progress stroke covers.
    pub fn trim_fraction(angle: Degrees) -> f64 {
        *angle.clamp_to_arc() / FULL_TURN
    }

    /// Cairo angle where both strokes start (the left end).
    pub fn start_radians(&self) -> f64 {
        PI
    }

    pub fn progress_end_radians(&self, angle: Degrees) -> f64 {
        PI + Self::trim_fraction(angle) * 2.0 * PI
    }

    pub fn track_end_radians(&self) -> f64 {
        2.0 * PI
    }
}
