//! Tunables for the window query and the size scale.

use crate::index::window::DEFAULT_HALF_WIDTH;
use crate::models::types::{Result, TimeFilter, TrafficError, MINUTES_PER_DAY};
use crate::scales::RadiusRange;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FlowConfig {
    /// Minutes on each side of the selected center
    pub window_half_width: u16,
    /// Radius range when no time is selected
    pub unfiltered_radius: RadiusRange,
    /// Radius range when a time is selected; counts are smaller, so the
    /// range is wider
    pub filtered_radius: RadiusRange,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            window_half_width: DEFAULT_HALF_WIDTH,
            unfiltered_radius: RadiusRange::new(0.0, 25.0),
            filtered_radius: RadiusRange::new(3.0, 50.0),
        }
    }
}

impl FlowConfig {
    pub fn validate(&self) -> Result<()> {
        // 720 or more would make both window ends meet and select nothing
        let max_half_width = MINUTES_PER_DAY / 2 - 1;
        if self.window_half_width == 0 || self.window_half_width > max_half_width {
            return Err(TrafficError::InvalidConfig(format!(
                "window_half_width must be in 1..={max_half_width}, got {}",
                self.window_half_width
            )));
        }

        for (name, range) in [
            ("unfiltered_radius", self.unfiltered_radius),
            ("filtered_radius", self.filtered_radius),
        ] {
            let finite = range.min.is_finite() && range.max.is_finite();
            if !finite || range.min < 0.0 || range.min > range.max {
                return Err(TrafficError::InvalidConfig(format!(
                    "{name} must satisfy 0 <= min <= max, got [{}, {}]",
                    range.min, range.max
                )));
            }
        }

        Ok(())
    }

    /// Radius range for the size scale under `filter`
    pub fn radius_range(&self, filter: TimeFilter) -> RadiusRange {
        match filter {
            TimeFilter::AnyTime => self.unfiltered_radius,
            TimeFilter::Around(_) => self.filtered_radius,
        }
    }

    #[cfg(feature = "loader")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| TrafficError::Parse {
            row: e.line(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::MinuteOfDay;

    #[test]
    fn test_default_config_is_valid() {
        let config = FlowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_half_width, 60);
        assert_eq!(config.radius_range(TimeFilter::AnyTime), RadiusRange::new(0.0, 25.0));
        assert_eq!(
            config.radius_range(TimeFilter::Around(MinuteOfDay::NOON)),
            RadiusRange::new(3.0, 50.0)
        );
    }

    #[test]
    fn test_half_width_bounds() {
        let mut config = FlowConfig::default();

        config.window_half_width = 0;
        assert!(config.validate().is_err());

        config.window_half_width = 719;
        assert!(config.validate().is_ok());

        config.window_half_width = 720;
        assert!(matches!(config.validate(), Err(TrafficError::InvalidConfig(_))));
    }

    #[test]
    fn test_radius_bounds() {
        let config = FlowConfig {
            filtered_radius: RadiusRange::new(10.0, 5.0),
            ..FlowConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FlowConfig {
            unfiltered_radius: RadiusRange::new(-1.0, 5.0),
            ..FlowConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "loader")]
    #[test]
    fn test_config_from_json() {
        let config = FlowConfig::from_json_str(r#"{ "window_half_width": 30 }"#).unwrap();
        assert_eq!(config.window_half_width, 30);
        assert_eq!(config.filtered_radius, RadiusRange::new(3.0, 50.0));

        let config = FlowConfig::from_json_str(
            r#"{ "unfiltered_radius": { "min": 1.0, "max": 10.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.unfiltered_radius, RadiusRange::new(1.0, 10.0));

        assert!(FlowConfig::from_json_str(r#"{ "window_half_width": 900 }"#).is_err());
        assert!(FlowConfig::from_json_str(r#"{ "half_width": 30 }"#).is_err());
    }
}
