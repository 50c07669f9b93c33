//! Start-poke calculation.
//!
//! A start poke is a "you should start now" nudge computed by working
//! backward from the anchor time: anchor minus expected duration minus
//! a buffer, with the final fire time snapped to a 5-minute boundary so
//! surfaced times read naturally.
//!
//! Availability (does the task have enough data to compute a poke) and
//! enablement (does the user want pokes for this task) are separate
//! questions; `calculate` answers the first, `is_enabled` the second.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::anchor::resolve_anchor;
use crate::duration::{estimate, EstimateSource};
use crate::error::Result;
use crate::settings::{StartPokeDefault, UserSettings};
use crate::task::{StartPokeOverride, Task};

/// A computed start poke, with its inputs exposed for display and
/// debugging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartPokePlan {
    pub task_id: String,
    /// When the poke should surface (ms-precision, always on a
    /// 5-minute boundary)
    pub fire_at: DateTime<Utc>,
    /// The anchor the poke counts back from
    pub anchor_at: DateTime<Utc>,
    /// Expected duration in minutes
    pub duration_minutes: u32,
    /// Where the duration came from
    pub estimate_source: EstimateSource,
    /// Buffer actually subtracted. Fractional in percentage mode: the
    /// raw buffer is kept as-is and only the final fire time is
    /// rounded, so the displayed value is the one used.
    pub buffer_minutes: f64,
}

/// Why a start poke could not be computed. These are expected states,
/// not errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// No qualifying anchor (no dated deadline/target with an explicit
    /// time, no recurrence time)
    NoAnchor,
    /// No duration signal on the task
    NoDuration,
}

/// Result of a start-poke calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StartPokeOutcome {
    Scheduled(StartPokePlan),
    Unavailable { reason: UnavailableReason },
}

/// Start-poke calculator.
pub struct StartPokeCalculator;

impl StartPokeCalculator {
    /// Minimum buffer in percentage mode.
    pub const BUFFER_FLOOR_MINUTES: f64 = 5.0;
    /// Fraction of the duration used as buffer in percentage mode.
    pub const BUFFER_FRACTION: f64 = 0.15;

    /// Compute the start poke for a task.
    ///
    /// `today` anchors recurring tasks. Fails only on malformed
    /// date/time strings.
    pub fn calculate(
        task: &Task,
        settings: &UserSettings,
        today: NaiveDate,
    ) -> Result<StartPokeOutcome> {
        let Some(anchor_at) = resolve_anchor(task, today)? else {
            return Ok(StartPokeOutcome::Unavailable {
                reason: UnavailableReason::NoAnchor,
            });
        };

        let Some(est) = estimate(task) else {
            return Ok(StartPokeOutcome::Unavailable {
                reason: UnavailableReason::NoDuration,
            });
        };

        let buffer_minutes = Self::buffer_minutes(settings, est.minutes);
        let raw_minutes =
            anchor_at.timestamp() as f64 / 60.0 - (est.minutes as f64 + buffer_minutes);
        let fire_at = Self::round_to_nearest_five(raw_minutes);

        Ok(StartPokeOutcome::Scheduled(StartPokePlan {
            task_id: task.id.clone(),
            fire_at,
            anchor_at,
            duration_minutes: est.minutes,
            estimate_source: est.source,
            buffer_minutes,
        }))
    }

    /// Whether pokes are wanted for this task. The per-task override
    /// wins outright; otherwise the global switch and the kind filter
    /// both have to agree.
    pub fn is_enabled(task: &Task, settings: &UserSettings) -> bool {
        match task.start_poke_override {
            Some(StartPokeOverride::On) => true,
            Some(StartPokeOverride::Off) => false,
            None => {
                settings.start_poke_enabled
                    && match settings.start_poke_default {
                        StartPokeDefault::All => true,
                        StartPokeDefault::RoutinesOnly => task.is_recurring,
                        StartPokeDefault::TasksOnly => !task.is_recurring,
                        StartPokeDefault::None => false,
                    }
            }
        }
    }

    /// Buffer policy: 15% of the duration floored at 5 minutes in
    /// percentage mode, otherwise the flat configured value. The
    /// percentage buffer stays fractional; only the final fire time is
    /// rounded.
    fn buffer_minutes(settings: &UserSettings, duration_minutes: u32) -> f64 {
        if settings.start_poke_buffer_percentage {
            (Self::BUFFER_FRACTION * duration_minutes as f64).max(Self::BUFFER_FLOOR_MINUTES)
        } else {
            settings.start_poke_buffer_minutes as f64
        }
    }

    /// Snap minutes-since-epoch to the nearest 5-minute boundary,
    /// rounding half up.
    fn round_to_nearest_five(raw_minutes: f64) -> DateTime<Utc> {
        let snapped = ((raw_minutes / 5.0) + 0.5).floor() as i64 * 5;
        DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(snapped)
    }
}
