//! Nudge orchestration.
//!
//! Candidate alerts come from the start-poke calculator and the other
//! alert sources; this module decides which of them actually surface.
//! The pipeline is dedup (per-key cooldown), priority ordering with a
//! visible-count cap, then quiet-hour downgrade. Suppression reasons
//! are successful decisions, not errors.
//!
//! The per-key last-fired map is the only state the engine owns.
//! Decisions are computed for a whole pass before the map is touched,
//! and only deliveries (full or badge) are recorded; suppressed alerts
//! leave no trace and must be re-offered by the host scheduler on its
//! next tick.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::PriorityTier;
use crate::settings::UserSettings;
use crate::start_poke::StartPokePlan;

/// Kind of notification, in descending delivery weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// "Start now" poke
    StartPoke,
    /// Plain reminder
    Reminder,
    /// "Your day is filling up" runway nudge
    RunwayNudge,
}

impl AlertType {
    /// Relative weight used when ordering same-tier candidates.
    pub fn weight(&self) -> u8 {
        match self {
            AlertType::StartPoke => 3,
            AlertType::Reminder => 2,
            AlertType::RunwayNudge => 1,
        }
    }
}

/// A candidate notification. Immutable once built; the orchestrator
/// only decides about it, it never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub task_id: String,
    pub alert_type: AlertType,
    /// Computed moment the alert wants to surface
    pub fire_at: DateTime<Utc>,
    /// Start-poke detail for display, when this is a start poke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poke: Option<StartPokePlan>,
}

impl Alert {
    /// Dedup key: one live alert per (task, type).
    pub fn dedup_key(&self) -> (String, AlertType) {
        (self.task_id.clone(), self.alert_type)
    }
}

/// An alert plus its task's priority tier, as offered to the
/// orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NudgeCandidate {
    pub alert: Alert,
    pub tier: PriorityTier,
}

/// Why an alert was held back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// Same (task, type) delivered within the cooldown window
    Duplicate,
    /// More eligible alerts than visible slots this pass; offer it
    /// again next tick
    QueueOverflow,
}

/// Outcome for one candidate in one evaluation pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum NudgeDecision {
    /// Surface at full visibility
    Fire,
    /// Hold back
    Suppress { reason: SuppressReason },
    /// Deliver silently (quiet hours, non-critical)
    DowngradeToBadge,
}

/// Orchestrator tuning knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NudgeConfig {
    /// Per-key cooldown window in minutes
    pub cooldown_minutes: i64,
    /// How many alerts may surface in one pass
    pub max_visible: usize,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            cooldown_minutes: 30,
            max_visible: 3,
        }
    }
}

/// Decides which candidate alerts surface, tracking one last-delivery
/// timestamp per (task, type).
pub struct NudgeOrchestrator {
    config: NudgeConfig,
    last_fired: HashMap<(String, AlertType), DateTime<Utc>>,
}

impl NudgeOrchestrator {
    /// Create an orchestrator with default config.
    pub fn new() -> Self {
        Self::with_config(NudgeConfig::default())
    }

    /// Create with custom config.
    pub fn with_config(config: NudgeConfig) -> Self {
        Self {
            config,
            last_fired: HashMap::new(),
        }
    }

    /// Current config.
    pub fn config(&self) -> &NudgeConfig {
        &self.config
    }

    /// Decide a single candidate. Equivalent to a one-element
    /// evaluation pass: dedup, then quiet-hour downgrade; the overflow
    /// cap cannot trigger with a single candidate.
    pub fn admit(
        &mut self,
        candidate: &NudgeCandidate,
        now: DateTime<Utc>,
        settings: &UserSettings,
    ) -> NudgeDecision {
        if self.in_cooldown(&candidate.alert, now) {
            return NudgeDecision::Suppress {
                reason: SuppressReason::Duplicate,
            };
        }

        let decision = if Self::in_quiet_hours(settings, now)
            && candidate.tier != PriorityTier::Critical
        {
            NudgeDecision::DowngradeToBadge
        } else {
            NudgeDecision::Fire
        };

        self.last_fired.insert(candidate.alert.dedup_key(), now);
        decision
    }

    /// Decide a whole pass of candidates. Returns one decision per
    /// candidate, index-aligned with the input.
    ///
    /// Eligible candidates are ordered by tier (critical first), then
    /// alert-type weight, then earliest fire time; only the first
    /// `max_visible` surface, the rest are suppressed as overflow and
    /// stay pending for the next pass. Dedup applies within the pass
    /// too: once a (task, type) key is delivered, later candidates with
    /// the same key are suppressed as duplicates without consuming a
    /// visible slot. The state map is only mutated after every decision
    /// is made.
    pub fn evaluate(
        &mut self,
        candidates: &[NudgeCandidate],
        now: DateTime<Utc>,
        settings: &UserSettings,
    ) -> Vec<NudgeDecision> {
        let mut decisions = vec![
            NudgeDecision::Suppress {
                reason: SuppressReason::QueueOverflow,
            };
            candidates.len()
        ];

        let mut eligible: Vec<usize> = Vec::new();
        for (idx, candidate) in candidates.iter().enumerate() {
            if self.in_cooldown(&candidate.alert, now) {
                decisions[idx] = NudgeDecision::Suppress {
                    reason: SuppressReason::Duplicate,
                };
            } else {
                eligible.push(idx);
            }
        }

        eligible.sort_by(|&a, &b| {
            let ca = &candidates[a];
            let cb = &candidates[b];
            cb.tier
                .cmp(&ca.tier)
                .then(cb.alert.alert_type.weight().cmp(&ca.alert.alert_type.weight()))
                .then(ca.alert.fire_at.cmp(&cb.alert.fire_at))
        });

        let quiet = Self::in_quiet_hours(settings, now);
        let mut seen: HashSet<(String, AlertType)> = HashSet::new();
        let mut delivered: Vec<usize> = Vec::new();
        for &idx in &eligible {
            let candidate = &candidates[idx];
            let key = candidate.alert.dedup_key();
            if seen.contains(&key) {
                decisions[idx] = NudgeDecision::Suppress {
                    reason: SuppressReason::Duplicate,
                };
                continue;
            }
            if delivered.len() == self.config.max_visible {
                // Stays an overflow suppression for the next tick.
                continue;
            }
            decisions[idx] = if quiet && candidate.tier != PriorityTier::Critical {
                NudgeDecision::DowngradeToBadge
            } else {
                NudgeDecision::Fire
            };
            seen.insert(key);
            delivered.push(idx);
        }

        // Record deliveries only after the whole pass is decided.
        for idx in delivered {
            self.last_fired.insert(candidates[idx].alert.dedup_key(), now);
        }

        decisions
    }

    /// Forget delivery history, e.g. when the underlying data was
    /// recomputed from scratch.
    pub fn reset(&mut self) {
        self.last_fired.clear();
    }

    /// Last delivery timestamp for a (task, type) key, if any.
    pub fn last_fired(&self, task_id: &str, alert_type: AlertType) -> Option<DateTime<Utc>> {
        self.last_fired
            .get(&(task_id.to_string(), alert_type))
            .copied()
    }

    fn in_cooldown(&self, alert: &Alert, now: DateTime<Utc>) -> bool {
        match self.last_fired.get(&alert.dedup_key()) {
            Some(&fired_at) => (now - fired_at).num_minutes() < self.config.cooldown_minutes,
            None => false,
        }
    }

    fn in_quiet_hours(settings: &UserSettings, now: DateTime<Utc>) -> bool {
        let Some(quiet) = &settings.quiet_hours else {
            return false;
        };
        let minutes = now.naive_utc().hour() as i64 * 60 + now.naive_utc().minute() as i64;
        quiet.contains_minutes(minutes)
    }
}

impl Default for NudgeOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
