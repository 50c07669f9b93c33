//! Nudge orchestration command: one evaluation pass over candidates.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use focusline_core::{NudgeCandidate, NudgeConfig, NudgeDecision, NudgeOrchestrator};

use crate::common;

#[derive(Args)]
pub struct NudgeArgs {
    /// Path to a JSON file with an array of nudge candidates
    #[arg(long)]
    pub candidates: PathBuf,
    /// Path to a TOML settings file; defaults apply when omitted
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Evaluation time (RFC 3339); defaults to now
    #[arg(long)]
    pub now: Option<String>,
    /// Cooldown window in minutes
    #[arg(long, default_value = "30")]
    pub cooldown: i64,
    /// Maximum alerts surfaced in one pass
    #[arg(long, default_value = "3")]
    pub max_visible: usize,
}

pub fn run(args: NudgeArgs) -> Result<(), Box<dyn Error>> {
    let data = fs::read_to_string(&args.candidates)?;
    let candidates: Vec<NudgeCandidate> = serde_json::from_str(&data)?;
    let settings = common::load_settings(args.settings.as_deref())?;
    let now = common::parse_now(args.now.as_deref())?;

    let mut orch = NudgeOrchestrator::with_config(NudgeConfig {
        cooldown_minutes: args.cooldown,
        max_visible: args.max_visible,
    });
    let decisions = orch.evaluate(&candidates, now, &settings);

    for (candidate, decision) in candidates.iter().zip(&decisions) {
        let verdict = match decision {
            NudgeDecision::Fire => "FIRE".to_string(),
            NudgeDecision::Suppress { reason } => format!("SUPPRESS ({:?})", reason),
            NudgeDecision::DowngradeToBadge => "BADGE".to_string(),
        };
        println!(
            "{:?} for task {} ({:?}): {}",
            candidate.alert.alert_type, candidate.alert.task_id, candidate.tier, verdict
        );
    }
    Ok(())
}
