//! Recurrence pattern matching for repeating tasks.
//!
//! Finds the next calendar date on or after a given day that satisfies
//! a task's recurrence rule. The anchor resolver combines the matched
//! date with the rule's time-of-day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How often a recurring task repeats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "frequency")]
pub enum RecurrenceFrequency {
    /// Every day
    Daily,
    /// Monday through Friday
    Weekdays,
    /// Specific days of the week (0 = Sunday .. 6 = Saturday)
    Weekly { weekdays: Vec<u8> },
    /// A specific day of the month (1..=31); months without that day
    /// are skipped
    Monthly { day_of_month: u8 },
}

/// Recurrence rule attached to a recurring task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    #[serde(flatten)]
    pub frequency: RecurrenceFrequency,
    /// Time-of-day the occurrence is due (HH:MM)
    #[serde(default)]
    pub time_of_day: Option<String>,
    /// Whether a missed occurrence rolls over to the next day instead
    /// of being skipped
    #[serde(default)]
    pub rollover: bool,
}

fn matches_on(frequency: &RecurrenceFrequency, date: NaiveDate) -> bool {
    match frequency {
        RecurrenceFrequency::Daily => true,
        RecurrenceFrequency::Weekdays => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        RecurrenceFrequency::Weekly { weekdays } => {
            let day_num = date.weekday().num_days_from_sunday() as u8;
            weekdays.contains(&day_num)
        }
        RecurrenceFrequency::Monthly { day_of_month } => date.day() == *day_of_month as u32,
    }
}

/// Find the first date on or after `from` that matches the rule.
///
/// Returns `None` when the rule can never match (empty weekday list or
/// an impossible day-of-month). The scan is bounded to a year plus a
/// day, which covers every satisfiable pattern.
pub fn next_occurrence_on_or_after(rule: &RecurrenceRule, from: NaiveDate) -> Option<NaiveDate> {
    match &rule.frequency {
        RecurrenceFrequency::Weekly { weekdays } if weekdays.is_empty() => return None,
        RecurrenceFrequency::Weekly { weekdays } if weekdays.iter().any(|&d| d > 6) => {
            return None
        }
        RecurrenceFrequency::Monthly { day_of_month }
            if *day_of_month == 0 || *day_of_month > 31 =>
        {
            return None
        }
        _ => {}
    }

    let mut date = from;
    for _ in 0..=366 {
        if matches_on(&rule.frequency, date) {
            return Some(date);
        }
        date += Duration::days(1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(frequency: RecurrenceFrequency) -> RecurrenceRule {
        RecurrenceRule {
            frequency,
            time_of_day: None,
            rollover: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_matches_today() {
        let r = rule(RecurrenceFrequency::Daily);
        assert_eq!(
            next_occurrence_on_or_after(&r, date(2025, 3, 10)),
            Some(date(2025, 3, 10))
        );
    }

    #[test]
    fn test_weekdays_skip_weekend() {
        let r = rule(RecurrenceFrequency::Weekdays);
        // 2025-03-08 is a Saturday
        assert_eq!(
            next_occurrence_on_or_after(&r, date(2025, 3, 8)),
            Some(date(2025, 3, 10))
        );
    }

    #[test]
    fn test_weekly_specific_days() {
        // Wednesday only (3)
        let r = rule(RecurrenceFrequency::Weekly { weekdays: vec![3] });
        // 2025-03-10 is a Monday; next Wednesday is the 12th
        assert_eq!(
            next_occurrence_on_or_after(&r, date(2025, 3, 10)),
            Some(date(2025, 3, 12))
        );
    }

    #[test]
    fn test_weekly_empty_never_matches() {
        let r = rule(RecurrenceFrequency::Weekly { weekdays: vec![] });
        assert_eq!(next_occurrence_on_or_after(&r, date(2025, 3, 10)), None);
    }

    #[test]
    fn test_monthly_day_passed_rolls_to_next_month() {
        let r = rule(RecurrenceFrequency::Monthly { day_of_month: 5 });
        assert_eq!(
            next_occurrence_on_or_after(&r, date(2025, 3, 10)),
            Some(date(2025, 4, 5))
        );
    }

    #[test]
    fn test_monthly_31_skips_short_months() {
        let r = rule(RecurrenceFrequency::Monthly { day_of_month: 31 });
        // From April 1st the next 31st is in May
        assert_eq!(
            next_occurrence_on_or_after(&r, date(2025, 4, 1)),
            Some(date(2025, 5, 31))
        );
    }

    #[test]
    fn test_monthly_impossible_day() {
        let r = rule(RecurrenceFrequency::Monthly { day_of_month: 32 });
        assert_eq!(next_occurrence_on_or_after(&r, date(2025, 3, 10)), None);
    }

    #[test]
    fn test_rule_serde_round_trip() {
        let r = RecurrenceRule {
            frequency: RecurrenceFrequency::Weekly {
                weekdays: vec![1, 3, 5],
            },
            time_of_day: Some("07:30".to_string()),
            rollover: true,
        };
        let json = serde_json::to_string(&r).unwrap();
        let parsed: RecurrenceRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }
}
