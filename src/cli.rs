use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal task tracker with projects, tasks and subtasks.
/// Storage defaults to ~/.taskdeck/projects.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "taskdeck", version, about = "Hierarchical task tracker with a dashboard TUI")]
pub struct Cli {
    /// Path to the JSON data file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard (the default).
    Ui,
    /// Print the project tree to stdout and exit.
    Tree,
}
