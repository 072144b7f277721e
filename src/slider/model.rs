use crate::slider::geometry::Point;
use crate::slider::{DEFAULT_MAX, DEFAULT_MIN, FULL_TURN, HALF_TURN, MIN_STEP};
use derive_more::Deref;

/// An angle in degrees along the arc. `0` is the minimum end, `180` the maximum end.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deref)]
pub struct Degrees(f64);

impl Degrees {
    pub const ZERO: Self = Self(0.0);
    pub const HALF_TURN: Self = Self(HALF_TURN);

    pub fn new(deg: f64) -> Self {
        Self(deg)
    }

    /// Maps the result of `atan2` into `[0, 360)`.
    pub fn from_radians_normalized(rad: f64) -> Self {
        let deg = rad.to_degrees();
        Self(if deg < 0.0 { deg + FULL_TURN } else { deg })
    }

    pub fn clamp_to_arc(self) -> Self {
        Self(self.0.clamp(0.0, HALF_TURN))
    }
}

/// Bounds and granularity of the slider value. Always satisfies `min <= max` and `step >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
    step: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: MIN_STEP,
        }
    }
}

impl ValueRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let min = if min.is_finite() { min } else { DEFAULT_MIN };
        let max = if max.is_finite() { max } else { DEFAULT_MAX };
        let (min, max) = if min > max {
            log::warn!("Slider range {min}..{max} is inverted, swapping bounds");
            (max, min)
        } else {
            (min, max)
        };

        Self {
            min,
            max,
            step: Self::coerce_step(step),
        }
    }

    /// `f64::max` drops NaN, so a NaN step also ends up at the minimum.
    pub fn coerce_step(step: f64) -> f64 {
        step.max(MIN_STEP)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Rounds to the nearest multiple of `step`, clamping before and after so the result
    /// never leaves the range.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let snapped = (clamped / self.step).round() * self.step;
        self.clamp(snapped)
    }

    pub fn angle_from_value(&self, value: f64) -> Degrees {
        if self.is_degenerate() {
            return Degrees::ZERO;
        }
        let percent = (self.clamp(value) - self.min) / self.span();
        Degrees(percent * HALF_TURN)
    }

    /// Inverse of [`Self::angle_from_value`], without snapping.
    pub fn value_from_angle(&self, angle: Degrees) -> f64 {
        let angle = angle.clamp_to_arc();
        (*angle / HALF_TURN) * self.span() + self.min
    }
}

/// Angle of the vector from `origin` to `location`, normalized to `[0, 360)`.
pub fn pointer_angle(location: Point, origin: Point) -> Degrees {
    let (dx, dy) = (location.x - origin.x, location.y - origin.y);
    Degrees::from_radians_normalized(dy.atan2(dx))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The pointer is in the excluded lower half; nothing changed.
    Rejected,
    Accepted { value: f64, changed: bool },
}

impl DragOutcome {
    pub fn accepted_value(&self) -> Option<f64> {
        match self {
            Self::Rejected => None,
            Self::Accepted { value, .. } => Some(*value),
        }
    }

    pub fn should_redraw(&self) -> bool {
        matches!(self, Self::Accepted { changed: true, .. })
    }
}

/// Current value and the thumb angle derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    value: f64,
    angle: Degrees,
}

impl SliderState {
    pub fn mount(initial: f64, range: &ValueRange) -> Self {
        let mut state = Self {
            value: 0.0,
            angle: Degrees::ZERO,
        };
        state.set_value(initial, range);
        state
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn angle(&self) -> Degrees {
        self.angle
    }

    pub fn set_value(&mut self, value: f64, range: &ValueRange) {
        self.value = range.snap(value);
        self.angle = range.angle_from_value(self.value);
    }

    pub fn apply_pointer(
        &mut self,
        location: Point,
        origin: Point,
        range: &ValueRange,
    ) -> DragOutcome {
        let angle = pointer_angle(location, origin);

        if angle > Degrees::HALF_TURN {
            log::debug!("Ignoring drag at {:.1}°, below the baseline", *angle);
            return DragOutcome::Rejected;
        }

        let raw = range.value_from_angle(angle);
        let snapped = range.snap(raw);
        let changed = snapped != self.value;

        // angle comes from the snapped value, not the pointer
        self.set_value(snapped, range);

        log::debug!("Drag at {:.1}° -> raw {raw:.3}, snapped {snapped}", *angle);
        DragOutcome::Accepted {
            value: self.value,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Point at `deg` on a circle around the origin, in the local frame.
    fn at_angle(deg: f64) -> Point {
        let rad = deg.to_radians();
        Point::new(100.0 * rad.cos(), 100.0 * rad.sin())
    }

    #[test]
    fn test_initial_mount_snaps_and_derives_angle() {
        let range = ValueRange::new(0.0, 100.0, 1.0);
        let state = SliderState::mount(20.0, &range);
        assert_eq!(state.value(), 20.0);
        assert!(close(*state.angle(), 36.0));
    }

    #[test]
    fn test_mount_out_of_range_value() {
        let range = ValueRange::new(0.0, 100.0, 1.0);
        assert_eq!(SliderState::mount(250.0, &range).value(), 100.0);
        assert_eq!(SliderState::mount(-3.0, &range).value(), 0.0);
        assert_eq!(*SliderState::mount(250.0, &range).angle(), 180.0);
    }

    #[test]
    fn test_snap_to_step() {
        let range = ValueRange::new(0.0, 100.0, 25.0);
        assert_eq!(range.snap(37.0), 25.0);
        assert_eq!(range.snap(37.5), 50.0);
        assert_eq!(range.snap(88.0), 100.0);
        assert_eq!(range.snap(1e9), 100.0);
        assert_eq!(range.snap(-1e9), 0.0);
    }

    #[test]
    fn test_snap_never_leaves_range_after_rounding() {
        // 90 / 25 rounds up to 100, which must be pulled back to max
        let range = ValueRange::new(0.0, 90.0, 25.0);
        assert_eq!(range.snap(89.0), 90.0);
        assert_eq!(range.snap(range.snap(89.0)), 90.0);
    }

    #[test]
    fn test_snap_nan_goes_to_min() {
        let range = ValueRange::new(10.0, 20.0, 1.0);
        assert_eq!(range.snap(f64::NAN), 10.0);
    }

    #[test]
    fn test_step_is_coerced() {
        assert_eq!(ValueRange::new(0.0, 10.0, 0.25).step(), 1.0);
        assert_eq!(ValueRange::new(0.0, 10.0, -4.0).step(), 1.0);
        assert_eq!(ValueRange::new(0.0, 10.0, f64::NAN).step(), 1.0);
        assert_eq!(ValueRange::new(0.0, 10.0, 5.0).step(), 5.0);
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let range = ValueRange::new(100.0, 0.0, 1.0);
        assert_eq!((range.min(), range.max()), (0.0, 100.0));
    }

    #[test]
    fn test_non_finite_bounds_fall_back() {
        let range = ValueRange::new(f64::NEG_INFINITY, f64::NAN, 1.0);
        assert_eq!((range.min(), range.max()), (DEFAULT_MIN, DEFAULT_MAX));
    }

    #[test]
    fn test_degenerate_range() {
        let range = ValueRange::new(42.0, 42.0, 1.0);
        for v in [-1e6, 0.0, 42.0, 1e6, f64::NAN] {
            assert_eq!(range.angle_from_value(v), Degrees::ZERO);
        }
        assert_eq!(range.value_from_angle(Degrees::new(90.0)), 42.0);
        assert_eq!(SliderState::mount(7.0, &range).value(), 42.0);
    }

    #[test]
    fn test_pointer_angle_normalization() {
        let origin = Point::default();
        assert!(close(*pointer_angle(at_angle(0.0), origin), 0.0));
        assert!(close(*pointer_angle(at_angle(90.0), origin), 90.0));
        assert!(close(*pointer_angle(at_angle(-90.0), origin), 270.0));
        assert!(close(*pointer_angle(Point::new(-1.0, -1.0), origin), 225.0));
    }

    #[test]
    fn test_pointer_angle_uses_origin() {
        let origin = Point::new(15.0, 15.0);
        let angle = pointer_angle(Point::new(15.0, 40.0), origin);
        assert!(close(*angle, 90.0));
    }

    #[test]
    fn test_drag_to_quarter_turn() {
        let range = ValueRange::new(0.0, 100.0, 1.0);
        let mut state = SliderState::mount(20.0, &range);
        let outcome = state.apply_pointer(at_angle(90.0), Point::default(), &range);
        assert_eq!(
            outcome,
            DragOutcome::Accepted {
                value: 50.0,
                changed: true
            }
        );
        assert_eq!(state.value(), 50.0);
        assert!(close(*state.angle(), 90.0));
    }

    #[test]
    fn test_drag_angle_follows_snapped_value() {
        let range = ValueRange::new(0.0, 100.0, 25.0);
        let mut state = SliderState::mount(0.0, &range);
        // 66.6° is a raw value of 37, which snaps to 25
        state.apply_pointer(at_angle(66.6), Point::default(), &range);
        assert_eq!(state.value(), 25.0);
        assert!(close(*state.angle(), 45.0));
    }

    #[test]
    fn test_drag_below_baseline_is_rejected() {
        let range = ValueRange::new(0.0, 100.0, 1.0);
        let mut state = SliderState::mount(20.0, &range);
        let before = state;
        for deg in [190.0, 225.0, 270.0, 359.0] {
            let outcome = state.apply_pointer(at_angle(deg), Point::default(), &range);
            assert_eq!(outcome, DragOutcome::Rejected);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_drag_to_same_value_is_accepted_but_unchanged() {
        let range = ValueRange::new(0.0, 100.0, 1.0);
        let mut state = SliderState::mount(50.0, &range);
        let outcome = state.apply_pointer(at_angle(90.0), Point::default(), &range);
        assert_eq!(outcome.accepted_value(), Some(50.0));
        assert!(!outcome.should_redraw());
    }

    #[test]
    fn test_drag_ends_of_arc() {
        let range = ValueRange::new(-50.0, 50.0, 1.0);
        let mut state = SliderState::mount(0.0, &range);
        state.apply_pointer(at_angle(0.0), Point::default(), &range);
        assert_eq!(state.value(), -50.0);
        state.apply_pointer(Point::new(-10.0, 0.0), Point::default(), &range);
        assert_eq!(state.value(), 50.0);
    }

    #[test]
    fn test_set_value_resnaps() {
        let range = ValueRange::new(0.0, 100.0, 10.0);
        let mut state = SliderState::mount(0.0, &range);
        state.set_value(44.0, &range);
        assert_eq!(state.value(), 40.0);
        assert!(close(*state.angle(), 72.0));
    }
}
