//! Start-poke computation command.

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use focusline_core::{StartPokeCalculator, StartPokeOutcome};

use crate::common;

#[derive(Args)]
pub struct PokeArgs {
    /// Path to a JSON file with an array of tasks
    #[arg(long)]
    pub tasks: PathBuf,
    /// Path to a TOML settings file; defaults apply when omitted
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Calendar date anchoring recurring tasks (ISO); defaults to today
    #[arg(long)]
    pub today: Option<String>,
    /// Also show pokes for tasks the enablement gate would skip
    #[arg(long)]
    pub ignore_gate: bool,
}

pub fn run(args: PokeArgs) -> Result<(), Box<dyn Error>> {
    let tasks = common::load_tasks(&args.tasks)?;
    let settings = common::load_settings(args.settings.as_deref())?;
    let today = common::parse_today(args.today.as_deref())?;

    for task in &tasks {
        if !args.ignore_gate && !StartPokeCalculator::is_enabled(task, &settings) {
            println!("{} ({}): disabled by gate", task.title, task.id);
            continue;
        }

        match StartPokeCalculator::calculate(task, &settings, today)? {
            StartPokeOutcome::Scheduled(plan) => {
                println!(
                    "{} ({}): start {} (anchor {}, {} min + {:.1} min buffer)",
                    task.title,
                    task.id,
                    plan.fire_at.format("%Y-%m-%d %H:%M"),
                    plan.anchor_at.format("%Y-%m-%d %H:%M"),
                    plan.duration_minutes,
                    plan.buffer_minutes,
                );
            }
            StartPokeOutcome::Unavailable { reason } => {
                println!("{} ({}): unavailable ({:?})", task.title, task.id, reason);
            }
        }
    }
    Ok(())
}
