use crate::animator::DEFAULT_DURATION;
use crate::bounds::EndPoints;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Caller-facing tuning of the control.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Upper clamp fraction in portrait. Falls back to 0.7 when unset or above 1.
    #[serde(default)]
    pub portrait_end_point: Option<f64>,
    /// Upper clamp fraction in landscape. Falls back to 0.5 when unset or above 1.
    #[serde(default)]
    pub landscape_end_point: Option<f64>,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_duration")]
    pub duration: Duration,
    /// Safe-area inset added below the top margin.
    #[serde(default)]
    pub top_inset: f64,
}

fn default_duration() -> Duration {
    DEFAULT_DURATION
}

impl Settings {
    pub fn end_points(&self) -> EndPoints {
        EndPoints::new(self.portrait_end_point, self.landscape_end_point)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            portrait_end_point: None,
            landscape_end_point: None,
            duration: DEFAULT_DURATION,
            top_inset: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.duration, Duration::from_millis(500));
    }

    #[test]
    fn duration_is_read_in_milliseconds() {
        let settings: Settings =
            serde_json::from_str(r#"{"duration": 250, "portrait_end_point": 0.6}"#).unwrap();
        assert_eq!(settings.duration, Duration::from_millis(250));
        assert_eq!(settings.end_points(), EndPoints::new(Some(0.6), None));
    }
}
