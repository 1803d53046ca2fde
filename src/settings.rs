//! Refresh settings model and duration conversion.
//!
//! A plugin's refresh setting is persisted in one of two shapes:
//!
//! ```json
//! {"interval": 3600}
//! {"scheduled": "08:00"}
//! ```
//!
//! The settings modal edits it as a [`FormData`] payload instead, where an
//! interval is a whole number of minutes, hours or days:
//!
//! ```json
//! {"refreshType": "interval", "interval": 1, "unit": "hour"}
//! {"refreshType": "scheduled", "refreshTime": "08:00"}
//! ```
//!
//! Everything in this module is pure and independent of any document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Display unit for an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Minutes
    Minute,
    /// Hours
    Hour,
    /// Days
    Day,
}

impl TimeUnit {
    /// Number of seconds in one unit.
    pub fn seconds(self) -> u64 {
        match self {
            TimeUnit::Minute => SECONDS_PER_MINUTE,
            TimeUnit::Hour => SECONDS_PER_HOUR,
            TimeUnit::Day => SECONDS_PER_DAY,
        }
    }

    /// Value used by the unit `<select>` options.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "minute" => Ok(TimeUnit::Minute),
            "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            _ => Err(ValidationError::MissingUnit),
        }
    }
}

/// Which of the two exclusive input groups is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshType {
    /// Refresh every N seconds
    Interval,
    /// Refresh once a day at a wall-clock time
    Scheduled,
}

/// A normalized refresh setting, as persisted by the backend.
///
/// # Example
///
/// ```
/// use inkframe_refresh::RefreshSettings;
///
/// let settings = RefreshSettings::Interval(7200);
/// let json = serde_json::to_string(&settings).unwrap();
/// assert_eq!(json, r#"{"interval":7200}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshSettings {
    /// Refresh interval in seconds
    Interval(u64),
    /// Daily refresh time (HH:MM, 24-hour format)
    Scheduled(String),
}

impl RefreshSettings {
    /// The group this setting belongs to.
    pub fn refresh_type(&self) -> RefreshType {
        match self {
            RefreshSettings::Interval(_) => RefreshType::Interval,
            RefreshSettings::Scheduled(_) => RefreshType::Scheduled,
        }
    }
}

/// Refresh settings in the loose shape they arrive in from the outside.
///
/// Either field may be missing. When both are present the interval wins,
/// matching the order the modal checks them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRefresh {
    /// Interval in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// Daily refresh time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
}

impl StoredRefresh {
    /// Stored interval setting.
    pub fn interval(seconds: u64) -> Self {
        Self {
            interval: Some(seconds),
            scheduled: None,
        }
    }

    /// Stored scheduled setting.
    pub fn scheduled(time: impl Into<String>) -> Self {
        Self {
            interval: None,
            scheduled: Some(time.into()),
        }
    }

    /// The typed setting, if either field is present.
    pub fn settings(&self) -> Option<RefreshSettings> {
        match (self.interval, &self.scheduled) {
            (Some(seconds), _) => Some(RefreshSettings::Interval(seconds)),
            (None, Some(time)) => Some(RefreshSettings::Scheduled(time.clone())),
            (None, None) => None,
        }
    }
}

impl From<RefreshSettings> for StoredRefresh {
    fn from(settings: RefreshSettings) -> Self {
        match settings {
            RefreshSettings::Interval(seconds) => StoredRefresh::interval(seconds),
            RefreshSettings::Scheduled(time) => StoredRefresh::scheduled(time),
        }
    }
}

/// Reason a form payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Neither radio is checked
    #[error("Please select a refresh type")]
    MissingType,

    /// Interval value missing, not a number, or below 1
    #[error("Please enter a valid refresh interval (at least 1)")]
    InvalidInterval,

    /// No interval unit selected
    #[error("Please select a refresh interval unit")]
    MissingUnit,

    /// Scheduled type without a time
    #[error("Please select a refresh time")]
    MissingTime,
}

/// Payload read from the modal.
///
/// Only the fields of the selected group are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    /// Selected group, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_type: Option<RefreshType>,

    /// Interval value in `unit`s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,

    /// Interval unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<TimeUnit>,

    /// Daily refresh time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_time: Option<String>,
}

impl FormData {
    /// Interval payload.
    pub fn interval(value: i64, unit: TimeUnit) -> Self {
        Self {
            refresh_type: Some(RefreshType::Interval),
            interval: Some(value),
            unit: Some(unit),
            refresh_time: None,
        }
    }

    /// Scheduled payload.
    pub fn scheduled(time: impl Into<String>) -> Self {
        Self {
            refresh_type: Some(RefreshType::Scheduled),
            interval: None,
            unit: None,
            refresh_time: Some(time.into()),
        }
    }

    /// Check the payload against the form rules.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe_refresh::{FormData, TimeUnit, ValidationError};
    ///
    /// assert!(FormData::interval(5, TimeUnit::Minute).validate().is_ok());
    /// assert_eq!(
    ///     FormData::interval(0, TimeUnit::Minute).validate(),
    ///     Err(ValidationError::InvalidInterval)
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.refresh_type {
            None => Err(ValidationError::MissingType),
            Some(RefreshType::Interval) => {
                match self.interval {
                    Some(value) if value >= 1 => {}
                    _ => return Err(ValidationError::InvalidInterval),
                }
                if self.unit.is_none() {
                    return Err(ValidationError::MissingUnit);
                }
                Ok(())
            }
            Some(RefreshType::Scheduled) => match self.refresh_time.as_deref() {
                Some(time) if !time.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::MissingTime),
            },
        }
    }

    /// Validate and normalize into the persisted setting.
    pub fn into_settings(self) -> Result<RefreshSettings, ValidationError> {
        self.validate()?;
        match (self.refresh_type, self.interval, self.unit, self.refresh_time) {
            (Some(RefreshType::Interval), Some(value), Some(unit), _) => Ok(
                RefreshSettings::Interval(calculate_seconds(value.unsigned_abs(), unit)),
            ),
            (Some(RefreshType::Scheduled), _, _, Some(time)) => {
                Ok(RefreshSettings::Scheduled(time))
            }
            // validate() rules out every other combination
            _ => Err(ValidationError::MissingType),
        }
    }
}

/// Pick the coarsest unit that divides `seconds` evenly.
///
/// Falls back to minutes, rounded to the nearest whole minute, when nothing
/// divides evenly. Zero divides by everything and comes back as days.
///
/// # Example
///
/// ```
/// use inkframe_refresh::{seconds_to_unit, TimeUnit};
///
/// assert_eq!(seconds_to_unit(7200), (2, TimeUnit::Hour));
/// assert_eq!(seconds_to_unit(172800), (2, TimeUnit::Day));
/// assert_eq!(seconds_to_unit(90), (2, TimeUnit::Minute));
/// ```
pub fn seconds_to_unit(seconds: u64) -> (u64, TimeUnit) {
    if seconds % SECONDS_PER_DAY == 0 {
        (seconds / SECONDS_PER_DAY, TimeUnit::Day)
    } else if seconds % SECONDS_PER_HOUR == 0 {
        (seconds / SECONDS_PER_HOUR, TimeUnit::Hour)
    } else if seconds % SECONDS_PER_MINUTE == 0 {
        (seconds / SECONDS_PER_MINUTE, TimeUnit::Minute)
    } else {
        // Half a minute rounds up
        let whole = seconds / SECONDS_PER_MINUTE;
        let rest = seconds % SECONDS_PER_MINUTE;
        let rounded = if rest * 2 >= SECONDS_PER_MINUTE {
            whole + 1
        } else {
            whole
        };
        (rounded, TimeUnit::Minute)
    }
}

/// Convert a value in `unit`s to seconds (saturating).
pub fn calculate_seconds(value: u64, unit: TimeUnit) -> u64 {
    value.saturating_mul(unit.seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seconds_to_unit() {
        assert_eq!(seconds_to_unit(86400), (1, TimeUnit::Day));
        assert_eq!(seconds_to_unit(3600), (1, TimeUnit::Hour));
        assert_eq!(seconds_to_unit(90000), (25, TimeUnit::Hour));
        assert_eq!(seconds_to_unit(300), (5, TimeUnit::Minute));
        assert_eq!(seconds_to_unit(29), (0, TimeUnit::Minute));
        assert_eq!(seconds_to_unit(30), (1, TimeUnit::Minute));
        assert_eq!(seconds_to_unit(150), (3, TimeUnit::Minute));
    }

    #[test]
    fn test_zero_seconds_is_days() {
        assert_eq!(seconds_to_unit(0), (0, TimeUnit::Day));
    }

    #[test]
    fn test_calculate_seconds() {
        assert_eq!(calculate_seconds(5, TimeUnit::Minute), 300);
        assert_eq!(calculate_seconds(2, TimeUnit::Hour), 7200);
        assert_eq!(calculate_seconds(1, TimeUnit::Day), 86400);
        assert_eq!(calculate_seconds(u64::MAX, TimeUnit::Day), u64::MAX);
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("hour".parse::<TimeUnit>(), Ok(TimeUnit::Hour));
        assert_eq!(" day ".parse::<TimeUnit>(), Ok(TimeUnit::Day));
        assert_eq!("".parse::<TimeUnit>(), Err(ValidationError::MissingUnit));
        assert_eq!("week".parse::<TimeUnit>(), Err(ValidationError::MissingUnit));
    }

    #[test]
    fn test_validate_interval() {
        assert!(FormData::interval(5, TimeUnit::Minute).validate().is_ok());
        assert_eq!(
            FormData::interval(0, TimeUnit::Minute).validate(),
            Err(ValidationError::InvalidInterval)
        );
        assert_eq!(
            FormData::interval(-3, TimeUnit::Hour).validate(),
            Err(ValidationError::InvalidInterval)
        );

        let missing_value = FormData {
            interval: None,
            ..FormData::interval(1, TimeUnit::Day)
        };
        assert_eq!(
            missing_value.validate(),
            Err(ValidationError::InvalidInterval)
        );

        let missing_unit = FormData {
            unit: None,
            ..FormData::interval(1, TimeUnit::Day)
        };
        assert_eq!(missing_unit.validate(), Err(ValidationError::MissingUnit));
    }

    #[test]
    fn test_validate_scheduled() {
        assert!(FormData::scheduled("14:30").validate().is_ok());
        assert_eq!(
            FormData::scheduled("").validate(),
            Err(ValidationError::MissingTime)
        );

        let no_time = FormData {
            refresh_time: None,
            ..FormData::scheduled("x")
        };
        assert_eq!(no_time.validate(), Err(ValidationError::MissingTime));
    }

    #[test]
    fn test_validate_missing_type() {
        assert_eq!(
            FormData::default().validate(),
            Err(ValidationError::MissingType)
        );
    }

    #[test]
    fn test_form_data_json_keys() {
        let json = r#"{"refreshType": "interval", "interval": 0, "unit": "minute"}"#;
        let form: FormData = serde_json::from_str(json).unwrap();
        assert_eq!(form, FormData::interval(0, TimeUnit::Minute));
        assert_eq!(form.validate(), Err(ValidationError::InvalidInterval));

        let json = r#"{"refreshType": "scheduled", "refreshTime": "14:30"}"#;
        let form: FormData = serde_json::from_str(json).unwrap();
        assert!(form.validate().is_ok());

        let out = serde_json::to_string(&FormData::scheduled("08:00")).unwrap();
        assert_eq!(out, r#"{"refreshType":"scheduled","refreshTime":"08:00"}"#);
    }

    #[test]
    fn test_into_settings() {
        assert_eq!(
            FormData::interval(2, TimeUnit::Hour).into_settings(),
            Ok(RefreshSettings::Interval(7200))
        );
        assert_eq!(
            FormData::scheduled("06:15").into_settings(),
            Ok(RefreshSettings::Scheduled("06:15".to_string()))
        );
        assert_eq!(
            FormData::scheduled("").into_settings(),
            Err(ValidationError::MissingTime)
        );
    }

    #[test]
    fn test_stored_refresh() {
        let stored: StoredRefresh = serde_json::from_str(r#"{"interval": 3600}"#).unwrap();
        assert_eq!(stored.settings(), Some(RefreshSettings::Interval(3600)));

        let stored: StoredRefresh = serde_json::from_str(r#"{"scheduled": "07:45"}"#).unwrap();
        assert_eq!(
            stored.settings(),
            Some(RefreshSettings::Scheduled("07:45".to_string()))
        );

        let stored: StoredRefresh = serde_json::from_str("{}").unwrap();
        assert_eq!(stored.settings(), None);

        let both = StoredRefresh {
            interval: Some(60),
            scheduled: Some("07:45".to_string()),
        };
        assert_eq!(both.settings(), Some(RefreshSettings::Interval(60)));
    }

    #[test]
    fn test_refresh_settings_serialization() {
        let json = serde_json::to_string(&RefreshSettings::Scheduled("08:00".into())).unwrap();
        assert_eq!(json, r#"{"scheduled":"08:00"}"#);

        let settings: RefreshSettings = serde_json::from_str(r#"{"interval":300}"#).unwrap();
        assert_eq!(settings, RefreshSettings::Interval(300));
        assert_eq!(settings.refresh_type(), RefreshType::Interval);
    }

    proptest! {
        #[test]
        fn prop_whole_days(days in 1u64..10_000) {
            prop_assert_eq!(seconds_to_unit(days * SECONDS_PER_DAY), (days, TimeUnit::Day));
        }

        #[test]
        fn prop_whole_hours(hours in 1u64..100_000) {
            prop_assume!(hours % 24 != 0);
            prop_assert_eq!(seconds_to_unit(hours * SECONDS_PER_HOUR), (hours, TimeUnit::Hour));
        }

        #[test]
        fn prop_whole_minutes(minutes in 1u64..1_000_000) {
            prop_assume!(minutes % 60 != 0);
            prop_assert_eq!(
                seconds_to_unit(minutes * SECONDS_PER_MINUTE),
                (minutes, TimeUnit::Minute)
            );
        }

        #[test]
        fn prop_uneven_rounds_to_minutes(seconds in 0u64..100_000_000) {
            prop_assume!(seconds % 60 != 0);
            let expected = (seconds as f64 / 60.0).round() as u64;
            prop_assert_eq!(seconds_to_unit(seconds), (expected, TimeUnit::Minute));
        }

        #[test]
        fn prop_unit_round_trip(value in 1u64..10_000, unit_idx in 0usize..3) {
            let unit = [TimeUnit::Minute, TimeUnit::Hour, TimeUnit::Day][unit_idx];
            let seconds = calculate_seconds(value, unit);
            let (back, back_unit) = seconds_to_unit(seconds);
            prop_assert_eq!(calculate_seconds(back, back_unit), seconds);
        }
    }
}
