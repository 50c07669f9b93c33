//! Focus queue commands.

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use focusline_core::{
    FocusQueueItem, PriorityScorer, ScoringContext, SelectionType,
};
use uuid::Uuid;

use crate::common;

#[derive(Subcommand)]
pub enum QueueAction {
    /// Print the queue with its today line
    Show {
        /// Path to the queue JSON file
        #[arg(long)]
        queue: PathBuf,
    },
    /// Add a task to the end of the queue
    Add {
        /// Path to the queue JSON file
        #[arg(long)]
        queue: PathBuf,
        /// Task to enqueue
        #[arg(long)]
        task_id: String,
        /// Restrict to specific step ids (comma-separated)
        #[arg(long)]
        steps: Option<String>,
    },
    /// Move a visual element (item or the line) to a new position
    Move {
        /// Path to the queue JSON file
        #[arg(long)]
        queue: PathBuf,
        /// Visual index to move from (the line counts as an element)
        #[arg(long)]
        from: usize,
        /// Visual index to move to
        #[arg(long)]
        to: usize,
    },
    /// Place the today line at an item boundary
    Line {
        /// Path to the queue JSON file
        #[arg(long)]
        queue: PathBuf,
        /// How many items sit above the line afterwards
        #[arg(long)]
        to: usize,
    },
    /// Seed the queue order from priority scores
    Seed {
        /// Path to the queue JSON file
        #[arg(long)]
        queue: PathBuf,
        /// Path to a JSON file with the tasks backing the queue
        #[arg(long)]
        tasks: PathBuf,
    },
}

pub fn run(action: QueueAction) -> Result<(), Box<dyn Error>> {
    match action {
        QueueAction::Show { queue } => {
            let q = common::load_queue(&queue)?;
            for (idx, item) in q.items.iter().enumerate() {
                if idx == q.today_line_index {
                    println!("----- today line -----");
                }
                let marker = if item.completed { "x" } else { " " };
                println!("[{}] {} (task {})", marker, item.id, item.task_id);
            }
            if q.today_line_index == q.items.len() {
                println!("----- today line -----");
            }
        }
        QueueAction::Add {
            queue,
            task_id,
            steps,
        } => {
            let mut q = common::load_queue(&queue)?;
            let selection = match steps {
                Some(steps) => SelectionType::Subset {
                    selected_step_ids: steps.split(',').map(|s| s.trim().to_string()).collect(),
                },
                None => SelectionType::EntireTask,
            };
            q.items.push(FocusQueueItem {
                id: Uuid::new_v4().to_string(),
                task_id,
                selection,
                order: q.items.len() as u32,
                completed: false,
                completed_at: None,
                added_at: Utc::now(),
                rollover_count: 0,
            });
            common::save_queue(&queue, &q)?;
            println!("added; queue has {} items", q.items.len());
        }
        QueueAction::Move { queue, from, to } => {
            let mut q = common::load_queue(&queue)?;
            q.apply_move(from, to)?;
            common::save_queue(&queue, &q)?;
            println!(
                "moved; today line at {}, {} items",
                q.today_line_index,
                q.items.len()
            );
        }
        QueueAction::Line { queue, to } => {
            let mut q = common::load_queue(&queue)?;
            q.set_today_line(to)?;
            common::save_queue(&queue, &q)?;
            println!(
                "today line at {}; {} items today, {} later",
                q.today_line_index,
                q.today().len(),
                q.later().len()
            );
        }
        QueueAction::Seed { queue, tasks } => {
            let mut q = common::load_queue(&queue)?;
            let tasks = common::load_tasks(&tasks)?;
            let scores = PriorityScorer::rank(&tasks, &ScoringContext::new(Utc::now()))?;
            q.seed_order(&scores);
            common::save_queue(&queue, &q)?;
            println!("seeded order from {} scored tasks", scores.len());
        }
    }
    Ok(())
}
