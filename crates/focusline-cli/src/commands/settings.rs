//! Settings file commands.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use focusline_core::UserSettings;

use crate::common;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the effective settings
    Show {
        /// Path to a TOML settings file; defaults apply when omitted
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Write a default settings file
    Init {
        /// Where to write the TOML file
        #[arg(long)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn Error>> {
    match action {
        SettingsAction::Show { path } => {
            let settings = common::load_settings(path.as_deref())?;
            println!("{}", toml::to_string_pretty(&settings)?);
        }
        SettingsAction::Init { path, force } => {
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            fs::write(&path, toml::to_string_pretty(&UserSettings::default())?)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
