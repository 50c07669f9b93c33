use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focusline-cli", version, about = "Focusline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank tasks
    Score(commands::score::ScoreArgs),
    /// Compute start pokes for tasks
    Poke(commands::poke::PokeArgs),
    /// Focus queue management
    Queue {
        #[command(subcommand)]
        action: commands::queue::QueueAction,
    },
    /// Run one nudge orchestration pass
    Nudge(commands::nudge::NudgeArgs),
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Score(args) => commands::score::run(args),
        Commands::Poke(args) => commands::poke::run(args),
        Commands::Queue { action } => commands::queue::run(action),
        Commands::Nudge(args) => commands::nudge::run(args),
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
