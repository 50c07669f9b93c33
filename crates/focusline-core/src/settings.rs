//! User settings consumed by the engine.
//!
//! This is the whole configuration surface: the start-poke gate and
//! buffer policy plus the quiet-hour window. The host application owns
//! where these live on disk; the CLI loads them from TOML.

use serde::{Deserialize, Serialize};

use crate::anchor::parse_time;
use crate::error::Result;

/// Which kinds of tasks get start pokes by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StartPokeDefault {
    /// Routines and one-off tasks alike
    All,
    /// Only recurring tasks
    RoutinesOnly,
    /// Only one-off tasks
    TasksOnly,
    /// Nobody, regardless of per-task overrides being absent
    None,
}

impl Default for StartPokeDefault {
    fn default() -> Self {
        StartPokeDefault::All
    }
}

/// A daily quiet window during which non-critical notifications are
/// downgraded to silent delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuietHours {
    /// Window start (HH:MM)
    pub start: String,
    /// Window end (HH:MM), may be earlier than start for overnight
    /// windows
    pub end: String,
}

impl QuietHours {
    /// Check both window bounds parse as HH:MM, failing fast so a
    /// typo'd window rejects at load instead of silently shifting.
    pub fn validate(&self) -> Result<()> {
        parse_time("quiet_hours.start", &self.start)?;
        parse_time("quiet_hours.end", &self.end)?;
        Ok(())
    }

    /// Whether a time-of-day (minutes since midnight) falls inside the
    /// window. The window is half-open `[start, end)`; start == end is
    /// treated as disabled.
    pub fn contains_minutes(&self, minutes: i64) -> bool {
        let start = time_to_minutes(&self.start);
        let end = time_to_minutes(&self.end);
        if start == end {
            return false;
        }
        if start < end {
            minutes >= start && minutes < end
        } else {
            // Overnight window, e.g. 22:00 to 07:00
            minutes >= start || minutes < end
        }
    }
}

/// Engine-facing user settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// Master switch for start pokes
    #[serde(default = "default_true")]
    pub start_poke_enabled: bool,
    /// Which task kinds get pokes when no per-task override is set
    #[serde(default)]
    pub start_poke_default: StartPokeDefault,
    /// Flat buffer in minutes added on top of the duration estimate
    #[serde(default = "default_buffer_minutes")]
    pub start_poke_buffer_minutes: u32,
    /// When true the buffer is 15% of the duration with a 5-minute
    /// floor instead of the flat value
    #[serde(default)]
    pub start_poke_buffer_percentage: bool,
    /// Optional quiet-hour window
    #[serde(default)]
    pub quiet_hours: Option<QuietHours>,
}

impl UserSettings {
    /// Validate loaded settings. Call this at the load boundary;
    /// serde itself accepts any strings for the quiet-hour bounds.
    pub fn validate(&self) -> Result<()> {
        if let Some(quiet) = &self.quiet_hours {
            quiet.validate()?;
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_buffer_minutes() -> u32 {
    15
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            start_poke_enabled: true,
            start_poke_default: StartPokeDefault::All,
            start_poke_buffer_minutes: 15,
            start_poke_buffer_percentage: false,
            quiet_hours: None,
        }
    }
}

/// Parse an HH:MM string to minutes since midnight. Lenient by design:
/// windows reach here already checked by `QuietHours::validate` at the
/// load boundary.
pub(crate) fn time_to_minutes(time_str: &str) -> i64 {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() == 2 {
        let hours: i64 = parts[0].parse().unwrap_or(0);
        let minutes: i64 = parts[1].parse().unwrap_or(0);
        hours * 60 + minutes
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("00:00"), 0);
        assert_eq!(time_to_minutes("08:00"), 480);
        assert_eq!(time_to_minutes("12:30"), 750);
        assert_eq!(time_to_minutes("23:59"), 1439);
    }

    #[test]
    fn test_quiet_hours_same_day_window() {
        let q = QuietHours {
            start: "13:00".to_string(),
            end: "14:00".to_string(),
        };
        assert!(!q.contains_minutes(time_to_minutes("12:59")));
        assert!(q.contains_minutes(time_to_minutes("13:00")));
        assert!(q.contains_minutes(time_to_minutes("13:59")));
        assert!(!q.contains_minutes(time_to_minutes("14:00")));
    }

    #[test]
    fn test_quiet_hours_overnight_window() {
        let q = QuietHours {
            start: "22:00".to_string(),
            end: "07:00".to_string(),
        };
        assert!(q.contains_minutes(time_to_minutes("23:30")));
        assert!(q.contains_minutes(time_to_minutes("03:00")));
        assert!(!q.contains_minutes(time_to_minutes("07:00")));
        assert!(!q.contains_minutes(time_to_minutes("12:00")));
    }

    #[test]
    fn test_quiet_hours_zero_width_disabled() {
        let q = QuietHours {
            start: "08:00".to_string(),
            end: "08:00".to_string(),
        };
        assert!(!q.contains_minutes(time_to_minutes("08:00")));
        assert!(!q.contains_minutes(time_to_minutes("20:00")));
    }

    #[test]
    fn test_validate_rejects_malformed_window() {
        let q = QuietHours {
            start: "22:0x".to_string(),
            end: "07:00".to_string(),
        };
        assert!(q.validate().is_err());

        let settings = UserSettings {
            quiet_hours: Some(q),
            ..UserSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_or_absent_window() {
        let settings = UserSettings {
            quiet_hours: Some(QuietHours {
                start: "22:00".to_string(),
                end: "07:00".to_string(),
            }),
            ..UserSettings::default()
        };
        assert!(settings.validate().is_ok());
        assert!(UserSettings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_defaults_from_empty_object() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.start_poke_enabled);
        assert_eq!(settings.start_poke_default, StartPokeDefault::All);
        assert_eq!(settings.start_poke_buffer_minutes, 15);
        assert!(!settings.start_poke_buffer_percentage);
    }
}
