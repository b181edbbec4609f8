use crate::driver::{AnimationDriver, Channel, Easing};
use crate::geometry::Point;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoEnumIterator};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);
pub const FULL_TURN_DEGREES: f64 = 360.0;
/// Collapsed scale. Zero would be a degenerate transform for some backends.
pub const MIN_SCALE: f64 = 0.01;

const PROGRESS_CHANNELS: [Channel; 3] = [Channel::Translate, Channel::Rotate, Channel::Scale];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    EnumCount,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SlotPosition {
    #[strum(to_string = "upper", serialize = "top", serialize = "0")]
    Upper,
    #[strum(to_string = "side", serialize = "middle", serialize = "1")]
    Side,
    #[strum(to_string = "lower", serialize = "bottom", serialize = "2")]
    Lower,
}

impl SlotPosition {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }

    /// Fully expanded translation, relative to the collapsed position.
    pub fn expanded_offset(&self) -> Point {
        match self {
            Self::Upper => Point::new(-21.0, -43.0),
            Self::Side => Point::new(-43.0, 0.0),
            Self::Lower => Point::new(-21.0, 43.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTransform {
    pub translate: Point,
    pub rotation_degrees: f64,
    pub scale: f64,
}

impl SlotTransform {
    pub fn along_path(position: SlotPosition, progress: Progress) -> Self {
        let target = position.expanded_offset();
        Self {
            translate: Point::new(target.x * progress.translate, target.y * progress.translate),
            rotation_degrees: FULL_TURN_DEGREES * progress.rotate,
            scale: MIN_SCALE + (1.0 - MIN_SCALE) * progress.scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub translate: f64,
    pub rotate: f64,
    pub scale: f64,
}

impl Progress {
    pub fn read(driver: &dyn AnimationDriver) -> Self {
        Self {
            translate: driver.value(Channel::Translate),
            rotate: driver.value(Channel::Rotate),
            scale: driver.value(Channel::Scale),
        }
    }
}

/// Collapsed/Expanded state machine for the action cluster.
#[derive(Debug)]
pub struct ExpandCollapseAnimator {
    expanded: bool,
    duration: Duration,
    easing: Easing,
}

impl ExpandCollapseAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            expanded: false,
            duration,
            easing: Easing::EaseIn,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Flips the state and sends all three progress channels toward the new end.
    pub fn toggle(&mut self, driver: &mut dyn AnimationDriver) -> bool {
        self.expanded = !self.expanded;
        let target = if self.expanded { 1.0 } else { 0.0 };

        log::debug!(
            "{} action cluster over {:?}",
            if self.expanded { "Expanding" } else { "Collapsing" },
            self.duration
        );

        for channel in PROGRESS_CHANNELS {
            driver.animate_to(channel, target, self.easing, self.duration);
        }
        self.expanded
    }

    /// Collapsed with every channel at rest on 0.
    pub fn reset(&mut self, driver: &mut dyn AnimationDriver) {
        self.expanded = false;
        for channel in PROGRESS_CHANNELS {
            driver.set(channel, 0.0);
        }
    }

    pub fn transform(&self, position: SlotPosition, driver: &dyn AnimationDriver) -> SlotTransform {
        SlotTransform::along_path(position, Progress::read(driver))
    }
}

impl Default for ExpandCollapseAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Timeline;

    fn settle(driver: &mut Timeline) {
        while driver.advance(Duration::from_millis(16)) {}
    }

    #[test]
    fn collapsed_slots_sit_at_origin_nearly_invisible() {
        let driver = Timeline::default();
        let animator = ExpandCollapseAnimator::default();
        for position in SlotPosition::iter() {
            let transform = animator.transform(position, &driver);
            assert_eq!(transform.translate, Point::default());
            assert_eq!(transform.rotation_degrees, 0.0);
            assert_eq!(transform.scale, MIN_SCALE);
        }
    }

    #[test]
    fn expanded_slots_reach_their_paths() {
        let mut driver = Timeline::default();
        let mut animator = ExpandCollapseAnimator::default();
        assert!(animator.toggle(&mut driver));
        settle(&mut driver);

        let upper = animator.transform(SlotPosition::Upper, &driver);
        assert_eq!(upper.translate, Point::new(-21.0, -43.0));
        assert_eq!(upper.rotation_degrees, 360.0);
        assert_eq!(upper.scale, 1.0);

        let side = animator.transform(SlotPosition::Side, &driver);
        assert_eq!(side.translate, Point::new(-43.0, 0.0));

        let lower = animator.transform(SlotPosition::Lower, &driver);
        assert_eq!(lower.translate, Point::new(-21.0, 43.0));
    }

    #[test]
    fn channels_share_direction_and_duration() {
        let mut driver = Timeline::default();
        let mut animator = ExpandCollapseAnimator::new(Duration::from_millis(200));
        animator.toggle(&mut driver);

        driver.advance(Duration::from_millis(100));
        let progress = Progress::read(&driver);
        assert_eq!(progress.translate, progress.rotate);
        assert_eq!(progress.rotate, progress.scale);
        assert!(progress.scale > 0.0 && progress.scale < 1.0);

        assert!(!driver.advance(Duration::from_millis(100)));
        assert_eq!(Progress::read(&driver).scale, 1.0);
    }

    #[test]
    fn double_toggle_round_trips() {
        let mut driver = Timeline::default();
        let mut animator = ExpandCollapseAnimator::default();
        let start = Progress::read(&driver);

        animator.toggle(&mut driver);
        settle(&mut driver);
        assert!(!animator.toggle(&mut driver));
        settle(&mut driver);

        assert_eq!(Progress::read(&driver), start);
        assert!(!animator.is_expanded());
    }

    #[test]
    fn toggle_mid_flight_reverses_without_jump() {
        let mut driver = Timeline::default();
        let mut animator = ExpandCollapseAnimator::default();
        animator.toggle(&mut driver);
        driver.advance(Duration::from_millis(300));
        let before = Progress::read(&driver).scale;

        animator.toggle(&mut driver);
        driver.advance(Duration::from_millis(1));
        let after = Progress::read(&driver).scale;

        assert!(after <= before);
        assert!(before - after < 1e-3);

        settle(&mut driver);
        assert_eq!(Progress::read(&driver), Progress::default());
    }

    #[test]
    fn new_duration_applies_to_next_toggle() {
        let mut driver = Timeline::default();
        let mut animator = ExpandCollapseAnimator::default();
        assert_eq!(animator.duration(), DEFAULT_DURATION);

        animator.set_duration(Duration::from_millis(100));
        assert_eq!(animator.duration(), Duration::from_millis(100));

        animator.toggle(&mut driver);
        assert!(!driver.advance(Duration::from_millis(100)));
        assert_eq!(Progress::read(&driver).translate, 1.0);
    }

    #[test]
    fn slot_position_parses_aliases() {
        let cases = vec![
            ("\"upper\"", SlotPosition::Upper),
            ("\"TOP\"", SlotPosition::Upper),
            ("\"0\"", SlotPosition::Upper),
            ("\"Side\"", SlotPosition::Side),
            ("\"1\"", SlotPosition::Side),
            ("\"bottom\"", SlotPosition::Lower),
            ("\"2\"", SlotPosition::Lower),
        ];

        for (json, expected) in cases {
            let deserialized: SlotPosition = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<SlotPosition>("\"3\"").is_err());
        assert_eq!(SlotPosition::from_index(2), Some(SlotPosition::Lower));
        assert_eq!(SlotPosition::from_index(3), None);
        assert_eq!(SlotPosition::Side.to_string(), "side");
    }
}
