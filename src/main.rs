//! # taskdeck
//!
//! A terminal task tracker with three nesting levels: projects contain
//! tasks, tasks contain subtasks. Each item carries a title, description,
//! assignee and completion state, and the dashboard TUI shows the lists
//! next to completion gauges and charts.
//!
//! ## Quick start
//!
//! ```bash
//! # Launch the dashboard
//! taskdeck
//!
//! # Print the tree without entering the TUI
//! taskdeck tree
//!
//! # Use a specific data file
//! taskdeck --db ./projects.json
//! ```
//!
//! Data is a single JSON file, `~/.taskdeck/projects.json` by default,
//! loaded at startup and saved on quit (and on demand with `s`). A missing
//! or unreadable file never prevents startup; the session just begins
//! empty.

use std::path::{Path, PathBuf};

use clap::Parser;

pub mod cli;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod selection;
    pub mod utils;
    pub mod views;
}

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let dir = PathBuf::from(home).join(".taskdeck");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("failed to create data directory {}: {e}", dir.display());
            std::process::exit(1);
        }
        dir.join("projects.json")
    });

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => {
            if let Err(e) = tui::run::run_tui(&db_path) {
                eprintln!("UI error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Tree => cmd_tree(&db_path),
    }
}

/// Print the project tree without entering the TUI.
fn cmd_tree(db_path: &Path) {
    let mut store = store::TaskStore::new();
    if db_path.exists() {
        match storage::load_projects(db_path) {
            Ok(projects) => store.set_projects(projects),
            Err(e) => eprintln!("failed to load {}: {e}", db_path.display()),
        }
    }
    println!("{}", tui::views::tree_text(&store));
}
