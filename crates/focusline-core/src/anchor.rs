//! Anchor time resolution.
//!
//! The anchor is the single timestamp a task must be done by. Deadline
//! outranks target outranks recurrence, and a candidate only qualifies
//! when it carries an explicit time-of-day: a date without a time says
//! too little to derive a meaningful "start by" moment, so it is
//! skipped rather than defaulted.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Result, ValidationError};
use crate::task::{next_occurrence_on_or_after, Task};

/// Parse an ISO `YYYY-MM-DD` date, failing fast on malformed input.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

/// Parse an `HH:MM` time, failing fast on malformed input.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        ValidationError::InvalidTime {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

fn combine(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Resolve the anchor timestamp for a task, if any candidate qualifies.
///
/// `today` is the calendar date used to find the next occurrence of a
/// recurring task; deadline and target anchors are absolute and ignore
/// it.
pub fn resolve_anchor(task: &Task, today: NaiveDate) -> Result<Option<DateTime<Utc>>> {
    if let (Some(date), Some(time)) = (&task.deadline_date, &task.deadline_time) {
        let date = parse_date("deadline_date", date)?;
        let time = parse_time("deadline_time", time)?;
        return Ok(Some(combine(date, time)));
    }

    if let (Some(date), Some(time)) = (&task.target_date, &task.target_time) {
        let date = parse_date("target_date", date)?;
        let time = parse_time("target_time", time)?;
        return Ok(Some(combine(date, time)));
    }

    if task.is_recurring {
        if let Some(rule) = &task.recurrence {
            if let Some(time_of_day) = &rule.time_of_day {
                let time = parse_time("recurrence.time_of_day", time_of_day)?;
                if let Some(date) = next_occurrence_on_or_after(rule, today) {
                    return Ok(Some(combine(date, time)));
                }
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{RecurrenceFrequency, RecurrenceRule};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_deadline_with_time_wins() {
        let mut task = Task::new("t1", "x");
        task.deadline_date = Some("2025-03-10".to_string());
        task.deadline_time = Some("17:00".to_string());
        task.target_date = Some("2025-03-08".to_string());
        task.target_time = Some("09:00".to_string());

        let anchor = resolve_anchor(&task, today()).unwrap();
        assert_eq!(anchor, Some(utc(2025, 3, 10, 17, 0)));
    }

    #[test]
    fn test_deadline_without_time_disqualified() {
        let mut task = Task::new("t1", "x");
        task.deadline_date = Some("2025-03-10".to_string());
        task.target_date = Some("2025-03-08".to_string());
        task.target_time = Some("09:00".to_string());

        // Date-only deadline falls through to the target
        let anchor = resolve_anchor(&task, today()).unwrap();
        assert_eq!(anchor, Some(utc(2025, 3, 8, 9, 0)));
    }

    #[test]
    fn test_no_candidate_resolves_none() {
        let mut task = Task::new("t1", "x");
        task.deadline_date = Some("2025-03-10".to_string());
        task.target_date = Some("2025-03-08".to_string());

        let anchor = resolve_anchor(&task, today()).unwrap();
        assert_eq!(anchor, None);
    }

    #[test]
    fn test_recurring_anchor_uses_next_occurrence() {
        let mut task = Task::new("t1", "Stand-up");
        task.is_recurring = true;
        task.recurrence = Some(RecurrenceRule {
            frequency: RecurrenceFrequency::Weekdays,
            time_of_day: Some("09:30".to_string()),
            rollover: false,
        });

        // 2025-03-08 is a Saturday; next weekday is Monday the 10th
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let anchor = resolve_anchor(&task, saturday).unwrap();
        assert_eq!(anchor, Some(utc(2025, 3, 10, 9, 30)));
    }

    #[test]
    fn test_recurring_without_time_of_day_resolves_none() {
        let mut task = Task::new("t1", "Stand-up");
        task.is_recurring = true;
        task.recurrence = Some(RecurrenceRule {
            frequency: RecurrenceFrequency::Daily,
            time_of_day: None,
            rollover: false,
        });

        assert_eq!(resolve_anchor(&task, today()).unwrap(), None);
    }

    #[test]
    fn test_malformed_date_fails_fast() {
        let mut task = Task::new("t1", "x");
        task.deadline_date = Some("03/10/2025".to_string());
        task.deadline_time = Some("17:00".to_string());

        let err = resolve_anchor(&task, today()).unwrap_err();
        assert!(err.to_string().contains("deadline_date"));
    }

    #[test]
    fn test_malformed_time_fails_fast() {
        let mut task = Task::new("t1", "x");
        task.deadline_date = Some("2025-03-10".to_string());
        task.deadline_time = Some("5pm".to_string());

        assert!(resolve_anchor(&task, today()).is_err());
    }
}
