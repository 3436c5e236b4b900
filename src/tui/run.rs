//! Terminal setup and teardown for the dashboard.

use std::io;
use std::path::Path;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::storage;
use crate::tui::app::App;

/// Initialise the terminal, run the dashboard until the quit command, then
/// restore the terminal and write the final save.
///
/// A failing save is reported on stderr but does not fail the run; the
/// tool exits cleanly either way.
pub fn run_tui(db_path: &Path) -> io::Result<()> {
    let mut app = App::new(db_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = storage::save_projects(db_path, app.store().projects()) {
        eprintln!("failed to save {}: {e}", db_path.display());
    }

    result
}
