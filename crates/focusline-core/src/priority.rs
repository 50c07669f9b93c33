//! Task priority scoring engine.
//!
//! Combines importance, time pressure, target pressure, capture
//! source, staleness, defer history, streak risk, and energy match
//! into one integer score and a coarse tier. Every factor is an
//! independent integer contribution recorded in the breakdown for
//! explainability.
//!
//! Scoring is deterministic: the same task, the same `now`, and the
//! same context always produce the same breakdown. Nothing is cached;
//! callers recompute on every relevant state change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::anchor::parse_date;
use crate::error::Result;
use crate::task::{EnergyType, Importance, ImportanceSource, Task};

/// Coarse priority bucket derived from the numeric score.
///
/// The score itself is open-ended above Critical; tiers only bucket it
/// for display and for the nudge orchestrator's ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityTier {
    /// Bucket a total score into a tier.
    pub fn from_score(total: i64) -> Self {
        if total >= 60 {
            PriorityTier::Critical
        } else if total >= 40 {
            PriorityTier::High
        } else if total >= 20 {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }
}

/// Named integer contributions making up a task's score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// User-assigned importance
    pub importance: i64,
    /// Deadline proximity
    pub time_pressure: i64,
    /// Target-date proximity (softer than a deadline)
    pub target_pressure: i64,
    /// Structured-capture confidence bonus
    pub source: i64,
    /// Days since last touch, capped
    pub staleness: i64,
    /// Repeated postponement, capped
    pub defer: i64,
    /// Risk of breaking a logged streak (recurring tasks only)
    pub streak_risk: i64,
    /// Match between task energy and the user's current energy
    pub energy_match: i64,
}

impl ScoreBreakdown {
    /// Sum of all contributions.
    pub fn total(&self) -> i64 {
        self.importance
            + self.time_pressure
            + self.target_pressure
            + self.source
            + self.staleness
            + self.defer
            + self.streak_risk
            + self.energy_match
    }
}

/// A scored task: breakdown, total, and tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityScore {
    pub breakdown: ScoreBreakdown,
    pub total: i64,
    pub tier: PriorityTier,
}

/// Context for scoring a task at a specific moment.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    /// Current time; all day arithmetic derives from its date
    pub now: DateTime<Utc>,
    /// The user's current energy, when known
    pub current_energy: Option<EnergyType>,
    /// Length of the logged streak for recurring tasks
    pub streak_length: u32,
}

impl ScoringContext {
    /// Create a context with no energy signal and no streak.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            current_energy: None,
            streak_length: 0,
        }
    }

    /// Set the user's current energy.
    pub fn with_energy(mut self, energy: EnergyType) -> Self {
        self.current_energy = Some(energy);
        self
    }

    /// Set the logged streak length.
    pub fn with_streak(mut self, streak_length: u32) -> Self {
        self.streak_length = streak_length;
        self
    }
}

/// Priority scoring engine.
pub struct PriorityScorer;

impl PriorityScorer {
    /// Horizon in days beyond which date pressure decays to zero.
    pub const PRESSURE_HORIZON_DAYS: i64 = 14;

    /// Score a single task.
    ///
    /// Fails only on malformed date strings, which are a caller
    /// contract violation.
    pub fn score(task: &Task, ctx: &ScoringContext) -> Result<PriorityScore> {
        let today = ctx.now.date_naive();

        let breakdown = ScoreBreakdown {
            importance: Self::importance_points(task.importance),
            time_pressure: Self::date_pressure(task.deadline_date.as_deref(), "deadline_date", today)?,
            target_pressure: Self::date_pressure(task.target_date.as_deref(), "target_date", today)?
                / 2,
            source: Self::source_points(task.importance_source),
            staleness: Self::staleness_points(task.updated_at, ctx.now),
            defer: Self::defer_points(task.deferred_count),
            streak_risk: Self::streak_risk_points(task.is_recurring, ctx.streak_length),
            energy_match: Self::energy_match_points(task.energy_type, ctx.current_energy),
        };

        let total = breakdown.total();
        Ok(PriorityScore {
            breakdown,
            total,
            tier: PriorityTier::from_score(total),
        })
    }

    /// Score a slice of tasks and return (task id, score) pairs sorted
    /// by total score, highest first. Ties keep input order.
    pub fn rank(tasks: &[Task], ctx: &ScoringContext) -> Result<Vec<(String, PriorityScore)>> {
        let mut scored = Vec::with_capacity(tasks.len());
        for task in tasks {
            scored.push((task.id.clone(), Self::score(task, ctx)?));
        }
        scored.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        Ok(scored)
    }

    fn importance_points(importance: Importance) -> i64 {
        match importance {
            Importance::None => 0,
            Importance::Low => 5,
            Importance::Medium => 15,
            Importance::High => 30,
        }
    }

    /// Step function over days until the given date.
    ///
    /// Overdue always outranks upcoming, grows with how overdue the
    /// task is (capped at the horizon), and upcoming pressure decays to
    /// zero beyond the horizon.
    fn date_pressure(date: Option<&str>, field: &str, today: NaiveDate) -> Result<i64> {
        let Some(date) = date else {
            return Ok(0);
        };
        let date = parse_date(field, date)?;
        let days_until = (date - today).num_days();

        let points = if days_until < 0 {
            40 + (-days_until).min(Self::PRESSURE_HORIZON_DAYS)
        } else {
            match days_until {
                0 => 40,
                1 => 32,
                2..=3 => 24,
                4..=7 => 14,
                8..=14 => 6,
                _ => 0,
            }
        };
        Ok(points)
    }

    fn source_points(source: Option<ImportanceSource>) -> i64 {
        match source {
            Some(ImportanceSource::SelfSet) => 5,
            _ => 0,
        }
    }

    /// Days since last touch, one point per three days, capped at 10.
    /// Deferring a task touches `updated_at`, so recently deferred
    /// tasks collect defer points without staleness points.
    fn staleness_points(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let days = (now - updated_at).num_days().max(0);
        (days / 3).min(10)
    }

    fn defer_points(deferred_count: u32) -> i64 {
        (deferred_count as i64 * 3).min(12)
    }

    fn streak_risk_points(is_recurring: bool, streak_length: u32) -> i64 {
        if !is_recurring {
            return 0;
        }
        match streak_length {
            0 => 0,
            1..=2 => 5,
            3..=6 => 10,
            _ => 15,
        }
    }

    fn energy_match_points(
        task_energy: Option<EnergyType>,
        current_energy: Option<EnergyType>,
    ) -> i64 {
        match (task_energy, current_energy) {
            (Some(task), Some(user)) if task == user => 8,
            (Some(_), Some(_)) => -4,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn task_at(now: DateTime<Utc>) -> Task {
        let mut task = Task::new("t1", "x");
        task.created_at = now;
        task.updated_at = now;
        task
    }

    #[test]
    fn test_score_is_deterministic() {
        let now = fixed_now();
        let mut task = task_at(now);
        task.importance = Importance::High;
        task.deadline_date = Some("2025-03-12".to_string());
        let ctx = ScoringContext::new(now).with_energy(EnergyType::Focused);

        let a = PriorityScorer::score(&task, &ctx).unwrap();
        let b = PriorityScorer::score(&task, &ctx).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_importance_ladder() {
        assert_eq!(PriorityScorer::importance_points(Importance::None), 0);
        assert_eq!(PriorityScorer::importance_points(Importance::Low), 5);
        assert_eq!(PriorityScorer::importance_points(Importance::Medium), 15);
        assert_eq!(PriorityScorer::importance_points(Importance::High), 30);
    }

    #[test]
    fn test_overdue_outranks_upcoming() {
        let today = fixed_now().date_naive();
        let overdue =
            PriorityScorer::date_pressure(Some("2025-03-08"), "deadline_date", today).unwrap();
        let due_today =
            PriorityScorer::date_pressure(Some("2025-03-10"), "deadline_date", today).unwrap();
        let next_week =
            PriorityScorer::date_pressure(Some("2025-03-17"), "deadline_date", today).unwrap();

        assert!(overdue > due_today);
        assert!(due_today > next_week);
    }

    #[test]
    fn test_more_overdue_never_scores_less() {
        let today = fixed_now().date_naive();
        let mut last = 0;
        for days_overdue in 1..=30 {
            let date = (today - Duration::days(days_overdue))
                .format("%Y-%m-%d")
                .to_string();
            let p =
                PriorityScorer::date_pressure(Some(date.as_str()), "deadline_date", today).unwrap();
            assert!(p >= last, "pressure dropped at {} days overdue", days_overdue);
            last = p;
        }
    }

    #[test]
    fn test_pressure_decays_to_zero_beyond_horizon() {
        let today = fixed_now().date_naive();
        let p = PriorityScorer::date_pressure(Some("2025-04-10"), "deadline_date", today).unwrap();
        assert_eq!(p, 0);
    }

    #[test]
    fn test_target_pressure_is_scaled_down() {
        let now = fixed_now();
        let mut with_deadline = task_at(now);
        with_deadline.deadline_date = Some("2025-03-11".to_string());
        let mut with_target = task_at(now);
        with_target.target_date = Some("2025-03-11".to_string());
        let ctx = ScoringContext::new(now);

        let d = PriorityScorer::score(&with_deadline, &ctx).unwrap();
        let t = PriorityScorer::score(&with_target, &ctx).unwrap();
        assert!(t.breakdown.target_pressure > 0);
        assert!(t.breakdown.target_pressure < d.breakdown.time_pressure);
    }

    #[test]
    fn test_defer_points_monotone_and_capped() {
        let mut last = 0;
        for count in 0..20 {
            let p = PriorityScorer::defer_points(count);
            assert!(p >= last);
            last = p;
        }
        assert_eq!(PriorityScorer::defer_points(100), 12);
    }

    #[test]
    fn test_recently_deferred_task_is_not_stale() {
        let now = fixed_now();
        let mut task = task_at(now);
        task.deferred_count = 5;
        // Deferral just touched updated_at
        task.updated_at = now - Duration::hours(2);
        let ctx = ScoringContext::new(now);

        let score = PriorityScorer::score(&task, &ctx).unwrap();
        assert_eq!(score.breakdown.staleness, 0);
        assert_eq!(score.breakdown.defer, 12);
    }

    #[test]
    fn test_staleness_capped() {
        let now = fixed_now();
        assert_eq!(
            PriorityScorer::staleness_points(now - Duration::days(365), now),
            10
        );
    }

    #[test]
    fn test_streak_risk_only_for_recurring() {
        assert_eq!(PriorityScorer::streak_risk_points(false, 10), 0);
        assert_eq!(PriorityScorer::streak_risk_points(true, 0), 0);
        assert_eq!(PriorityScorer::streak_risk_points(true, 2), 5);
        assert_eq!(PriorityScorer::streak_risk_points(true, 5), 10);
        assert_eq!(PriorityScorer::streak_risk_points(true, 12), 15);
    }

    #[test]
    fn test_energy_match_bonus_and_penalty() {
        assert_eq!(
            PriorityScorer::energy_match_points(
                Some(EnergyType::Creative),
                Some(EnergyType::Creative)
            ),
            8
        );
        assert_eq!(
            PriorityScorer::energy_match_points(
                Some(EnergyType::Creative),
                Some(EnergyType::Admin)
            ),
            -4
        );
        assert_eq!(
            PriorityScorer::energy_match_points(None, Some(EnergyType::Admin)),
            0
        );
        assert_eq!(
            PriorityScorer::energy_match_points(Some(EnergyType::Social), None),
            0
        );
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PriorityTier::from_score(-5), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(19), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(20), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(39), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(40), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(59), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(60), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score(140), PriorityTier::Critical);
    }

    #[test]
    fn test_breakdown_total_matches_sum() {
        let now = fixed_now();
        let mut task = task_at(now);
        task.importance = Importance::High;
        task.importance_source = Some(ImportanceSource::SelfSet);
        task.deadline_date = Some("2025-03-10".to_string());
        task.deferred_count = 2;
        let ctx = ScoringContext::new(now);

        let score = PriorityScorer::score(&task, &ctx).unwrap();
        assert_eq!(score.total, score.breakdown.total());
        // 30 importance + 40 due today + 5 source + 6 defer
        assert_eq!(score.total, 81);
        assert_eq!(score.tier, PriorityTier::Critical);
    }

    #[test]
    fn test_rank_sorts_descending() {
        let now = fixed_now();
        let mut low = task_at(now);
        low.id = "low".to_string();
        let mut high = task_at(now);
        high.id = "high".to_string();
        high.importance = Importance::High;
        high.deadline_date = Some("2025-03-10".to_string());

        let ctx = ScoringContext::new(now);
        let ranked = PriorityScorer::rank(&[low, high], &ctx).unwrap();
        assert_eq!(ranked[0].0, "high");
        assert_eq!(ranked[1].0, "low");
    }

    #[test]
    fn test_malformed_deadline_fails_fast() {
        let now = fixed_now();
        let mut task = task_at(now);
        task.deadline_date = Some("next tuesday".to_string());
        let ctx = ScoringContext::new(now);
        assert!(PriorityScorer::score(&task, &ctx).is_err());
    }
}
