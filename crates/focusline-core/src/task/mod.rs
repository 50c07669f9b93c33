//! Task records consumed by the prioritization and notification engine.
//!
//! These are plain data types: the engine never mutates a task, it only
//! reads the fields listed here. Anything else the host application
//! stores on a task (colors, UI state, assistant metadata) is opaque to
//! this crate.

pub mod recurrence;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use recurrence::{next_occurrence_on_or_after, RecurrenceFrequency, RecurrenceRule};

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Captured but not yet triaged
    Inbox,
    /// Triaged and available for scheduling
    Pool,
    /// Completed (terminal)
    Complete,
    /// Archived (terminal, hidden)
    Archived,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Inbox
    }
}

/// User-assigned importance level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    None,
    Low,
    Medium,
    High,
}

impl Default for Importance {
    fn default() -> Self {
        Importance::None
    }
}

/// How the importance value was assigned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceSource {
    /// Set explicitly by the user during structured capture
    #[serde(rename = "self")]
    SelfSet,
    /// Inferred from freeform text
    Inferred,
}

/// Kind of energy a task demands, matched against the user's current
/// energy when scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    /// Open-ended, generative work
    Creative,
    /// Deep, concentration-heavy work
    Focused,
    /// Shallow administrative work
    Admin,
    /// Calls, messages, collaboration
    Social,
}

/// Provenance of the explicit duration estimate on a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DurationSource {
    Manual,
    Steps,
    Ai,
    None,
}

impl Default for DurationSource {
    fn default() -> Self {
        DurationSource::None
    }
}

/// Per-task start-poke override. When set, it wins over the global
/// settings gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartPokeOverride {
    On,
    Off,
}

/// An ordered sub-step of a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStep {
    pub id: String,
    #[serde(default)]
    pub completed: bool,
    /// Estimated minutes for this step; zero means "no estimate"
    #[serde(default)]
    pub estimated_minutes: u32,
}

/// A task as the engine sees it.
///
/// Date fields are ISO `YYYY-MM-DD` strings and time fields are
/// `HH:MM` strings, exactly as the host stores them; parsing happens at
/// the point of use (anchor resolution) and a malformed value is a
/// caller contract violation, not a recoverable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: TaskStatus,
    /// User-assigned importance
    #[serde(default)]
    pub importance: Importance,
    /// How importance was assigned, when known
    #[serde(default)]
    pub importance_source: Option<ImportanceSource>,
    /// Kind of energy the task demands
    #[serde(default)]
    pub energy_type: Option<EnergyType>,
    /// Soft target date (ISO date)
    #[serde(default)]
    pub target_date: Option<String>,
    /// Time-of-day for the target (HH:MM)
    #[serde(default)]
    pub target_time: Option<String>,
    /// Hard deadline date (ISO date)
    #[serde(default)]
    pub deadline_date: Option<String>,
    /// Time-of-day for the deadline (HH:MM)
    #[serde(default)]
    pub deadline_time: Option<String>,
    /// Days of lead time the user wants before the anchor
    #[serde(default)]
    pub lead_time_days: Option<i32>,
    /// Explicit duration estimate in minutes
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    /// Provenance of the explicit estimate
    #[serde(default)]
    pub duration_source: DurationSource,
    /// Legacy single-field estimate kept for older records
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    /// Ordered sub-steps
    #[serde(default)]
    pub steps: Vec<TaskStep>,
    /// How many times the task has been deferred
    #[serde(default)]
    pub deferred_count: u32,
    /// Date the latest deferral pushed the task to (ISO date)
    #[serde(default)]
    pub deferred_until: Option<String>,
    /// Whether the task repeats
    #[serde(default)]
    pub is_recurring: bool,
    /// Recurrence pattern for repeating tasks
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
    /// Per-task start-poke override
    #[serde(default)]
    pub start_poke_override: Option<StartPokeOverride>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp; the host touches this on every edit,
    /// including deferrals
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with the given id and title and neutral defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::default(),
            importance: Importance::default(),
            importance_source: None,
            energy_type: None,
            target_date: None,
            target_time: None,
            deadline_date: None,
            deadline_time: None,
            lead_time_days: None,
            estimated_duration_minutes: None,
            duration_source: DurationSource::default(),
            estimated_minutes: None,
            steps: Vec::new(),
            deferred_count: 0,
            deferred_until: None,
            is_recurring: false,
            recurrence: None,
            start_poke_override: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the task is still actionable (not complete or archived).
    pub fn is_open(&self) -> bool {
        matches!(self.status, TaskStatus::Inbox | TaskStatus::Pool)
    }
}
