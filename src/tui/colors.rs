//! Colour palette for the TUI.

use ratatui::style::Color;

pub const PROJECT_GREEN: Color = Color::Rgb(80, 200, 120);
pub const TASK_GOLD: Color = Color::Rgb(255, 215, 0);
pub const SUBTASK_CYAN: Color = Color::Rgb(0, 200, 200);
pub const DARK_RED: Color = Color::Rgb(220, 20, 60);
pub const DARK_PURPLE: Color = Color::Rgb(186, 85, 211);
