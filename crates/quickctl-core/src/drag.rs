//! Vertical drag state for the handle.
//!
//! The rendered offset is `baseline + live`, where `baseline` is committed when a
//! gesture begins and `live` is the gesture's cumulative delta held in
//! [`Channel::OffsetY`]. Only the vertical axis is tracked; x stays at 0.

use crate::bounds::ClampRange;
use crate::driver::{AnimationDriver, Channel};
use crate::geometry::Point;

/// Pointer travel, in device-independent pixels, before a move counts as a drag.
pub const DRAG_DEAD_ZONE: f64 = 2.0;

#[derive(Debug, Default)]
pub struct DragController {
    baseline: f64,
    dragging: bool,
    /// A reset arrived mid-gesture and runs once the pointer lets go.
    reset_pending: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_capture(dx: f64, dy: f64) -> bool {
        dx.abs() > DRAG_DEAD_ZONE || dy.abs() > DRAG_DEAD_ZONE
    }

    /// Continues from wherever the handle sits rather than from the pointer.
    pub fn begin_drag(&mut self, driver: &mut dyn AnimationDriver) {
        self.baseline = self.raw_offset(driver);
        driver.set(Channel::OffsetY, 0.0);
        self.dragging = true;
    }

    /// `dy` is cumulative since [`Self::begin_drag`].
    pub fn update_drag(&mut self, dy: f64, driver: &mut dyn AnimationDriver) {
        if !self.dragging {
            log::trace!("Ignoring drag update without an active gesture");
            return;
        }
        driver.set(Channel::OffsetY, dy);
    }

    pub fn end_drag(&mut self, driver: &mut dyn AnimationDriver) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if std::mem::take(&mut self.reset_pending) {
            self.spring_home(driver);
        } else {
            self.baseline = self.raw_offset(driver);
            driver.set(Channel::OffsetY, 0.0);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Unclamped offset.
    pub fn raw_offset(&self, driver: &dyn AnimationDriver) -> f64 {
        self.baseline + driver.value(Channel::OffsetY)
    }

    pub fn offset(&self, driver: &dyn AnimationDriver) -> Point {
        Point::new(0.0, self.raw_offset(driver))
    }

    pub fn render_position(&self, range: &ClampRange, driver: &dyn AnimationDriver) -> f64 {
        range.interpolate(self.raw_offset(driver))
    }

    /// Springs the handle back to origin. During a gesture the handle stays
    /// under the pointer and the spring starts from wherever it is released.
    pub fn reset_to_origin(&mut self, driver: &mut dyn AnimationDriver) {
        if self.dragging {
            self.reset_pending = true;
            return;
        }
        self.spring_home(driver);
    }

    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    fn spring_home(&mut self, driver: &mut dyn AnimationDriver) {
        let visible = self.raw_offset(driver);
        self.baseline = 0.0;
        if visible == 0.0 {
            return;
        }
        driver.set(Channel::OffsetY, visible);
        driver.spring_to(Channel::OffsetY, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Timeline;
    use std::time::Duration;

    #[test]
    fn dead_zone_rejects_small_moves() {
        assert!(!DragController::should_capture(1.0, 1.0));
        assert!(!DragController::should_capture(2.0, -2.0));
        assert!(DragController::should_capture(3.0, 0.0));
        assert!(DragController::should_capture(0.0, -3.0));
    }

    #[test]
    fn new_gesture_continues_from_previous_offset() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();

        drag.begin_drag(&mut driver);
        drag.update_drag(200.0, &mut driver);
        drag.end_drag(&mut driver);
        assert_eq!(drag.raw_offset(&driver), 200.0);

        drag.begin_drag(&mut driver);
        assert_eq!(drag.raw_offset(&driver), 200.0);
        drag.update_drag(-50.0, &mut driver);
        assert_eq!(drag.raw_offset(&driver), 150.0);
    }

    #[test]
    fn regrab_without_release_still_composes() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();

        drag.begin_drag(&mut driver);
        drag.update_drag(120.0, &mut driver);
        drag.begin_drag(&mut driver);
        drag.update_drag(30.0, &mut driver);

        assert_eq!(drag.raw_offset(&driver), 150.0);
    }

    #[test]
    fn horizontal_component_is_pinned() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        drag.begin_drag(&mut driver);
        drag.update_drag(40.0, &mut driver);
        assert_eq!(drag.offset(&driver), Point::new(0.0, 40.0));
    }

    #[test]
    fn updates_without_gesture_are_ignored() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        drag.update_drag(300.0, &mut driver);
        assert_eq!(drag.raw_offset(&driver), 0.0);
    }

    #[test]
    fn render_position_clamps_raw_offset() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        let range = ClampRange::identity(116.0, 600.0);

        assert_eq!(drag.render_position(&range, &driver), 116.0);

        drag.begin_drag(&mut driver);
        drag.update_drag(900.0, &mut driver);
        assert_eq!(drag.render_position(&range, &driver), 600.0);
        assert_eq!(drag.render_position(&range, &driver), 600.0);
    }

    #[test]
    fn reset_springs_back_to_origin() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        drag.begin_drag(&mut driver);
        drag.update_drag(400.0, &mut driver);
        drag.end_drag(&mut driver);

        drag.reset_to_origin(&mut driver);
        assert_eq!(drag.raw_offset(&driver), 400.0);
        assert!(driver.is_animating());

        driver.advance(Duration::from_millis(16));
        let moving = drag.raw_offset(&driver);
        assert!(moving < 400.0 && moving > 0.0);

        for _ in 0..400 {
            driver.advance(Duration::from_millis(16));
        }
        assert_eq!(drag.raw_offset(&driver), 0.0);
    }

    #[test]
    fn reset_at_origin_is_a_no_op() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        drag.reset_to_origin(&mut driver);
        assert!(!driver.is_animating());
        assert_eq!(drag.raw_offset(&driver), 0.0);
    }

    #[test]
    fn reset_during_gesture_waits_for_release() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        drag.begin_drag(&mut driver);
        drag.update_drag(300.0, &mut driver);
        drag.end_drag(&mut driver);

        drag.begin_drag(&mut driver);
        drag.update_drag(20.0, &mut driver);
        drag.reset_to_origin(&mut driver);

        assert!(drag.is_reset_pending());
        assert!(!driver.is_animating());
        assert_eq!(drag.raw_offset(&driver), 320.0);
        drag.update_drag(80.0, &mut driver);
        assert_eq!(drag.raw_offset(&driver), 380.0);

        drag.end_drag(&mut driver);
        assert!(!drag.is_reset_pending());
        assert!(driver.is_animating());
        assert_eq!(drag.raw_offset(&driver), 380.0);

        driver.advance(Duration::from_millis(16));
        let moving = drag.raw_offset(&driver);
        assert!(moving < 380.0 && moving > 0.0);

        for _ in 0..400 {
            driver.advance(Duration::from_millis(16));
        }
        assert_eq!(drag.raw_offset(&driver), 0.0);
    }

    #[test]
    fn release_without_pending_reset_stays_put() {
        let mut driver = Timeline::default();
        let mut drag = DragController::new();
        drag.begin_drag(&mut driver);
        drag.update_drag(120.0, &mut driver);
        drag.end_drag(&mut driver);

        assert!(!driver.is_animating());
        assert_eq!(drag.raw_offset(&driver), 120.0);
    }
}
