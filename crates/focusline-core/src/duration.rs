//! Expected task duration with provenance.
//!
//! Fallback chain: explicit estimate, then the legacy single-field
//! estimate older records still carry, then the sum of step estimates.
//! Callers get a source tag alongside the minutes so the UI can render
//! where the number came from.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Where a duration estimate came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// The task's explicit duration field
    Explicit,
    /// The legacy estimated_minutes field
    Legacy,
    /// Sum of the steps' estimates
    Steps,
}

/// A duration estimate in minutes plus its provenance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationEstimate {
    pub minutes: u32,
    pub source: EstimateSource,
}

/// Derive the expected duration for a task, if any signal exists.
///
/// Zero-valued estimates never contribute: an explicit 0 falls through
/// to the legacy field, and only non-zero step estimates are summed.
pub fn estimate(task: &Task) -> Option<DurationEstimate> {
    if let Some(minutes) = task.estimated_duration_minutes {
        if minutes > 0 {
            return Some(DurationEstimate {
                minutes,
                source: EstimateSource::Explicit,
            });
        }
    }

    if let Some(minutes) = task.estimated_minutes {
        if minutes > 0 {
            return Some(DurationEstimate {
                minutes,
                source: EstimateSource::Legacy,
            });
        }
    }

    let step_total: u32 = task
        .steps
        .iter()
        .map(|s| s.estimated_minutes)
        .filter(|&m| m > 0)
        .sum();
    if step_total > 0 {
        return Some(DurationEstimate {
            minutes: step_total,
            source: EstimateSource::Steps,
        });
    }

    None
}
