//! # Focusline Core Library
//!
//! Core business logic for Focusline's task prioritization and
//! notification scheduling. All operations are plain data in, plain
//! data out: the UI, persistence, and timer layers are external
//! collaborators that feed `Task` / `UserSettings` / `FocusQueue`
//! records in and consume scores, timestamps, and decisions back.
//!
//! ## Key Components
//!
//! - [`PriorityScorer`]: deterministic factor-by-factor task scoring
//! - [`StartPokeCalculator`]: "start now" times worked backward from
//!   the anchor
//! - [`NudgeOrchestrator`]: dedup, ordering, and quiet-hour decisions
//!   over candidate alerts
//! - [`focus_queue`]: the today-line queue and its drag reordering
//!
//! Everything is synchronous and recomputed on state change; the only
//! state the crate owns is the orchestrator's last-delivery map.

pub mod anchor;
pub mod duration;
pub mod error;
pub mod focus_queue;
pub mod nudge;
pub mod priority;
pub mod scheduler;
pub mod settings;
pub mod start_poke;
pub mod task;

pub use anchor::resolve_anchor;
pub use duration::{estimate, DurationEstimate, EstimateSource};
pub use error::{CoreError, Result, ValidationError};
pub use focus_queue::{
    build_elements, derive_state, reorder, FocusQueue, FocusQueueItem, QueueElement, SelectionType,
};
pub use nudge::{
    Alert, AlertType, NudgeCandidate, NudgeConfig, NudgeDecision, NudgeOrchestrator, SuppressReason,
};
pub use priority::{PriorityScore, PriorityScorer, PriorityTier, ScoreBreakdown, ScoringContext};
pub use scheduler::{InMemoryScheduler, Scheduler};
pub use settings::{QuietHours, StartPokeDefault, UserSettings};
pub use start_poke::{StartPokeCalculator, StartPokeOutcome, StartPokePlan, UnavailableReason};
pub use task::{
    EnergyType, Importance, ImportanceSource, RecurrenceFrequency, RecurrenceRule,
    StartPokeOverride, Task, TaskStatus, TaskStep,
};
