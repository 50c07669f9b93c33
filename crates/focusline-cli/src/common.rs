//! Shared helpers for CLI commands: file I/O and argument parsing.

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use focusline_core::{EnergyType, FocusQueue, Task, UserSettings};

pub fn load_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn load_queue(path: &Path) -> Result<FocusQueue, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_queue(path: &Path, queue: &FocusQueue) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(queue)?)?;
    Ok(())
}

/// Load settings from TOML, falling back to defaults when no path is
/// given or the file does not exist. Rejects malformed quiet-hour
/// windows outright rather than letting them drift to midnight.
pub fn load_settings(path: Option<&Path>) -> Result<UserSettings, Box<dyn Error>> {
    match path {
        Some(path) if path.exists() => {
            let data = fs::read_to_string(path)?;
            let settings: UserSettings = toml::from_str(&data)?;
            settings.validate()?;
            Ok(settings)
        }
        _ => Ok(UserSettings::default()),
    }
}

/// Parse `--now` (RFC 3339) or default to the current time.
pub fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>, Box<dyn Error>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Parse `--today` (ISO date) or default to the current date.
pub fn parse_today(today: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
    match today {
        Some(s) => Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn parse_energy(value: &str) -> Result<EnergyType, String> {
    match value {
        "creative" => Ok(EnergyType::Creative),
        "focused" => Ok(EnergyType::Focused),
        "admin" => Ok(EnergyType::Admin),
        "social" => Ok(EnergyType::Social),
        other => Err(format!(
            "unknown energy '{}' (expected creative, focused, admin, or social)",
            other
        )),
    }
}
