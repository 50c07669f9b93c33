//! Task scoring command.

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use focusline_core::{EnergyType, PriorityScorer, ScoringContext};

use crate::common;

#[derive(Args)]
pub struct ScoreArgs {
    /// Path to a JSON file with an array of tasks
    #[arg(long)]
    pub tasks: PathBuf,
    /// Current user energy (creative, focused, admin, social)
    #[arg(long, value_parser = common::parse_energy)]
    pub energy: Option<EnergyType>,
    /// Streak length for recurring tasks
    #[arg(long, default_value = "0")]
    pub streak: u32,
    /// Evaluation time (RFC 3339); defaults to now
    #[arg(long)]
    pub now: Option<String>,
    /// Print full breakdowns as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn Error>> {
    let tasks = common::load_tasks(&args.tasks)?;
    let now = common::parse_now(args.now.as_deref())?;

    let mut ctx = ScoringContext::new(now).with_streak(args.streak);
    if let Some(energy) = args.energy {
        ctx = ctx.with_energy(energy);
    }

    let ranked = PriorityScorer::rank(&tasks, &ctx)?;

    if args.json {
        let detailed: Vec<serde_json::Value> = ranked
            .iter()
            .map(|(task_id, score)| {
                serde_json::json!({
                    "task_id": task_id,
                    "total": score.total,
                    "tier": score.tier,
                    "breakdown": score.breakdown,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&detailed)?);
        return Ok(());
    }

    for (task_id, score) in &ranked {
        let title = tasks
            .iter()
            .find(|t| t.id == *task_id)
            .map(|t| t.title.as_str())
            .unwrap_or("?");
        println!("{:>4}  {:?}  {} ({})", score.total, score.tier, title, task_id);
    }
    Ok(())
}
