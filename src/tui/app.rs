//! Main application logic for the terminal user interface.
//!
//! `App` owns the entity store and the input state machine, consumes one
//! key event at a time and renders the dashboard: project/task/subtask
//! lists on the left and middle, description, gauge and completion chart
//! on the right, a one-line status bar at the bottom.
//!
//! All mutation happens synchronously inside `handle_key`; there are no
//! timers and no background work, so the store needs no locking.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::storage;
use crate::store::TaskStore;
use crate::task::{Project, Subtask, Task};
use crate::tui::{
    colors,
    enums::{Focus, InputPurpose, Mode, Overlay},
    input::InputField,
    selection::Selection,
    utils::centered_rect,
    views,
};

/// Terminal dashboard over a [`TaskStore`].
pub struct App {
    store: TaskStore,
    db_path: PathBuf,
    focus: Focus,
    mode: Mode,
    overlay: Option<Overlay>,
    selection: Selection,
    project_list_state: ListState,
    task_list_state: ListState,
    subtask_list_state: ListState,
    status_message: String,
}

impl App {
    /// Create an App, loading the tree from `db_path` if the file exists.
    ///
    /// A missing file simply starts empty; a present-but-unreadable file is
    /// reported and the session still starts with an empty store.
    pub fn new(db_path: &Path) -> Self {
        let mut store = TaskStore::new();
        let mut status_message = String::new();
        if db_path.exists() {
            match storage::load_projects(db_path) {
                Ok(projects) => store.set_projects(projects),
                Err(e) => {
                    eprintln!("failed to load {}: {e}", db_path.display());
                    status_message = format!("Load failed, starting empty: {e}");
                }
            }
        }

        let mut selection = Selection::new();
        selection.reseat(&store);

        App {
            store,
            db_path: db_path.to_path_buf(),
            focus: Focus::Projects,
            mode: Mode::Navigating,
            overlay: None,
            selection,
            project_list_state: ListState::default(),
            task_list_state: ListState::default(),
            subtask_list_state: ListState::default(),
            status_message,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Process one key event. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.status_message.clear();

        // Modals swallow the next key, whatever it is.
        if self.overlay.is_some() {
            self.overlay = None;
            return false;
        }

        if self.mode.is_typing() {
            self.handle_typing_key(key.code);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('s') => self.save_now(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('a') => self.begin_add(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('i') => self.begin_edit_description(),
            KeyCode::Char('m') => self.begin_assign(),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('v') => self.overlay = Some(Overlay::Tree),
            KeyCode::Char('?') | KeyCode::Char('h') => self.overlay = Some(Overlay::Help),
            _ => {}
        }
        false
    }

    /// Keys while a text-input workflow is active. Navigation commands are
    /// deliberately not handled here, so they are no-ops while typing.
    fn handle_typing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.commit_input(),
            KeyCode::Esc => {
                self.mode = Mode::Navigating;
                self.status_message = "Input cancelled".to_string();
            }
            _ => {
                if let Mode::Typing { field, .. } = &mut self.mode {
                    match code {
                        KeyCode::Backspace => field.handle_backspace(),
                        KeyCode::Left => field.move_cursor_left(),
                        KeyCode::Right => field.move_cursor_right(),
                        KeyCode::Char(c) => field.handle_char(c),
                        _ => {}
                    }
                }
            }
        }
    }

    fn move_selection(&mut self, delta: i64) {
        match self.focus {
            Focus::Projects => {
                let len = self.store.projects().len();
                if let Some(next) = stepped(self.selection.project_index, delta, len) {
                    self.selection.select_project(&self.store, next);
                }
            }
            Focus::Tasks => {
                let Some(pid) = self.selection.project_id else {
                    return;
                };
                let len = self.store.tasks(pid).len();
                if let Some(next) = stepped(self.selection.task_index, delta, len) {
                    self.selection.select_task(&self.store, next);
                }
            }
            Focus::Subtasks => {
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    return;
                };
                let len = self.store.subtasks(pid, tid).len();
                if let Some(next) = stepped(self.selection.subtask_index, delta, len) {
                    self.selection.select_subtask(&self.store, next);
                }
            }
        }
    }

    fn begin_add(&mut self) {
        let purpose = match self.focus {
            Focus::Projects => InputPurpose::AddProjectName,
            Focus::Tasks => {
                if self.selection.project_id.is_none() {
                    self.status_message = "No project selected".to_string();
                    return;
                }
                InputPurpose::AddTaskTitle
            }
            Focus::Subtasks => {
                if self.selection.task_id.is_none() {
                    self.status_message = "No task selected".to_string();
                    return;
                }
                InputPurpose::AddSubtaskTitle
            }
        };
        self.mode = Mode::typing(purpose, InputField::new());
    }

    fn begin_edit(&mut self) {
        match self.focus {
            Focus::Projects => {
                let Some(name) = self.selected_project().map(|p| p.name.clone()) else {
                    self.status_message = "No project selected".to_string();
                    return;
                };
                self.mode =
                    Mode::typing(InputPurpose::EditProjectName, InputField::with_value(&name));
            }
            Focus::Tasks => {
                let Some(title) = self.selected_task().map(|t| t.title.clone()) else {
                    self.status_message = "No task selected".to_string();
                    return;
                };
                self.mode =
                    Mode::typing(InputPurpose::EditTaskTitle, InputField::with_value(&title));
            }
            Focus::Subtasks => {
                let Some(title) = self.selected_subtask().map(|s| s.title.clone()) else {
                    self.status_message = "No subtask selected".to_string();
                    return;
                };
                self.mode =
                    Mode::typing(InputPurpose::EditSubtaskTitle, InputField::with_value(&title));
            }
        }
    }

    fn begin_edit_description(&mut self) {
        match self.focus {
            Focus::Projects => {
                // The project description is the second step of 'e'.
                self.status_message = "Edit project with 'e' (name, then description)".to_string();
            }
            Focus::Tasks => {
                let Some(desc) = self.selected_task().map(|t| t.description.clone()) else {
                    self.status_message = "No task selected".to_string();
                    return;
                };
                self.mode = Mode::typing(
                    InputPurpose::EditTaskDescription,
                    InputField::with_value(&desc),
                );
            }
            Focus::Subtasks => {
                let Some(desc) = self.selected_subtask().map(|s| s.description.clone()) else {
                    self.status_message = "No subtask selected".to_string();
                    return;
                };
                self.mode = Mode::typing(
                    InputPurpose::EditSubtaskDescription,
                    InputField::with_value(&desc),
                );
            }
        }
    }

    fn begin_assign(&mut self) {
        match self.focus {
            Focus::Projects => {
                self.status_message = "Projects have no assignee".to_string();
            }
            Focus::Tasks => {
                let Some(who) = self.selected_task().map(|t| t.assigned_to.clone()) else {
                    self.status_message = "No task selected".to_string();
                    return;
                };
                self.mode = Mode::typing(InputPurpose::AssignTask, InputField::with_value(&who));
            }
            Focus::Subtasks => {
                let Some(who) = self.selected_subtask().map(|s| s.assigned_to.clone()) else {
                    self.status_message = "No subtask selected".to_string();
                    return;
                };
                self.mode = Mode::typing(InputPurpose::AssignSubtask, InputField::with_value(&who));
            }
        }
    }

    fn toggle_selected(&mut self) {
        let result = match self.focus {
            Focus::Projects => {
                self.status_message = "Projects have no completion state".to_string();
                return;
            }
            Focus::Tasks => {
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    self.status_message = "No task selected".to_string();
                    return;
                };
                self.store.toggle_task(pid, tid)
            }
            Focus::Subtasks => {
                let (Some(pid), Some(tid), Some(sid)) = (
                    self.selection.project_id,
                    self.selection.task_id,
                    self.selection.subtask_id,
                ) else {
                    self.status_message = "No subtask selected".to_string();
                    return;
                };
                self.store.toggle_subtask(pid, tid, sid)
            }
        };
        if let Err(e) = result {
            self.status_message = e.to_string();
        }
    }

    fn delete_selected(&mut self) {
        let result = match self.focus {
            Focus::Projects => {
                let Some(pid) = self.selection.project_id else {
                    self.status_message = "No project selected".to_string();
                    return;
                };
                self.store
                    .remove_project(pid)
                    .map(|_| format!("Deleted project #{pid}"))
            }
            Focus::Tasks => {
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    self.status_message = "No task selected".to_string();
                    return;
                };
                self.store
                    .remove_task(pid, tid)
                    .map(|_| format!("Deleted task #{tid}"))
            }
            Focus::Subtasks => {
                let (Some(pid), Some(tid), Some(sid)) = (
                    self.selection.project_id,
                    self.selection.task_id,
                    self.selection.subtask_id,
                ) else {
                    self.status_message = "No subtask selected".to_string();
                    return;
                };
                self.store
                    .remove_subtask(pid, tid, sid)
                    .map(|_| format!("Deleted subtask #{sid}"))
            }
        };
        match result {
            Ok(msg) => {
                self.selection.reseat(&self.store);
                self.status_message = msg;
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    /// Commit the current input buffer according to its purpose.
    ///
    /// Add purposes create-and-select; edit purposes overwrite in place;
    /// confirming a project name re-enters typing for the description, so
    /// one 'e' gesture always walks both project fields. A commit that hits
    /// a store error aborts the workflow and reports in the status bar.
    fn commit_input(&mut self) {
        let Mode::Typing { purpose, field } = std::mem::replace(&mut self.mode, Mode::Navigating)
        else {
            return;
        };
        let text = field.trimmed().to_string();

        match purpose {
            InputPurpose::AddProjectName => {
                if text.is_empty() {
                    return;
                }
                let id = self.store.add_project(&text, "");
                self.focus = Focus::Projects;
                self.selection
                    .select_project(&self.store, self.store.projects().len() - 1);
                self.status_message = format!("Added project #{id}");
            }
            InputPurpose::AddTaskTitle => {
                if text.is_empty() {
                    return;
                }
                let Some(pid) = self.selection.project_id else {
                    return;
                };
                match self.store.add_task(pid, &text, "") {
                    Ok(id) => {
                        self.selection
                            .select_task(&self.store, self.store.tasks(pid).len() - 1);
                        self.status_message = format!("Added task #{id}");
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
            }
            InputPurpose::AddSubtaskTitle => {
                if text.is_empty() {
                    return;
                }
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    return;
                };
                match self.store.add_subtask(pid, tid, &text, "") {
                    Ok(id) => {
                        self.selection
                            .select_subtask(&self.store, self.store.subtasks(pid, tid).len() - 1);
                        self.status_message = format!("Added subtask #{id}");
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
            }
            InputPurpose::EditProjectName => {
                let Some(pid) = self.selection.project_id else {
                    return;
                };
                let desc = self
                    .selected_project()
                    .map(|p| p.description.clone())
                    .unwrap_or_default();
                if let Err(e) = self.store.edit_project(pid, &text, &desc) {
                    self.status_message = e.to_string();
                    return;
                }
                // Second step of the project edit chain.
                self.mode = Mode::typing(
                    InputPurpose::EditProjectDescription,
                    InputField::with_value(&desc),
                );
            }
            InputPurpose::EditProjectDescription => {
                let Some(pid) = self.selection.project_id else {
                    return;
                };
                let name = self
                    .selected_project()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                if let Err(e) = self.store.edit_project(pid, &name, &text) {
                    self.status_message = e.to_string();
                }
            }
            InputPurpose::EditTaskTitle => {
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    return;
                };
                let desc = self
                    .selected_task()
                    .map(|t| t.description.clone())
                    .unwrap_or_default();
                if let Err(e) = self.store.edit_task(pid, tid, &text, &desc) {
                    self.status_message = e.to_string();
                }
            }
            InputPurpose::EditTaskDescription => {
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    return;
                };
                let title = self
                    .selected_task()
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                if let Err(e) = self.store.edit_task(pid, tid, &title, &text) {
                    self.status_message = e.to_string();
                }
            }
            InputPurpose::EditSubtaskTitle => {
                let (Some(pid), Some(tid), Some(sid)) = (
                    self.selection.project_id,
                    self.selection.task_id,
                    self.selection.subtask_id,
                ) else {
                    return;
                };
                let desc = self
                    .selected_subtask()
                    .map(|s| s.description.clone())
                    .unwrap_or_default();
                if let Err(e) = self.store.edit_subtask(pid, tid, sid, &text, &desc) {
                    self.status_message = e.to_string();
                }
            }
            InputPurpose::EditSubtaskDescription => {
                let (Some(pid), Some(tid), Some(sid)) = (
                    self.selection.project_id,
                    self.selection.task_id,
                    self.selection.subtask_id,
                ) else {
                    return;
                };
                let title = self
                    .selected_subtask()
                    .map(|s| s.title.clone())
                    .unwrap_or_default();
                if let Err(e) = self.store.edit_subtask(pid, tid, sid, &title, &text) {
                    self.status_message = e.to_string();
                }
            }
            InputPurpose::AssignTask => {
                let (Some(pid), Some(tid)) = (self.selection.project_id, self.selection.task_id)
                else {
                    return;
                };
                if let Err(e) = self.store.assign_task(pid, tid, &text) {
                    self.status_message = e.to_string();
                }
            }
            InputPurpose::AssignSubtask => {
                let (Some(pid), Some(tid), Some(sid)) = (
                    self.selection.project_id,
                    self.selection.task_id,
                    self.selection.subtask_id,
                ) else {
                    return;
                };
                if let Err(e) = self.store.assign_subtask(pid, tid, sid, &text) {
                    self.status_message = e.to_string();
                }
            }
        }

        self.selection.reseat(&self.store);
    }

    fn save_now(&mut self) {
        match storage::save_projects(&self.db_path, self.store.projects()) {
            Ok(()) => {
                self.status_message = format!("Saved to {}", self.db_path.display());
            }
            Err(e) => {
                self.status_message = format!("Save failed: {e}");
            }
        }
    }

    fn selected_project(&self) -> Option<&Project> {
        let pid = self.selection.project_id?;
        self.store.projects().iter().find(|p| p.id == pid)
    }

    fn selected_task(&self) -> Option<&Task> {
        let pid = self.selection.project_id?;
        let tid = self.selection.task_id?;
        self.store.tasks(pid).iter().find(|t| t.id == tid)
    }

    fn selected_subtask(&self) -> Option<&Subtask> {
        let pid = self.selection.project_id?;
        let tid = self.selection.task_id?;
        let sid = self.selection.subtask_id?;
        self.store.subtasks(pid, tid).iter().find(|s| s.id == sid)
    }

    /// Render the full dashboard and any active overlay.
    fn render(&mut self, f: &mut Frame) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(35),
                Constraint::Percentage(40),
            ])
            .split(outer[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(columns[0]);
        self.render_projects(f, left[0]);
        self.render_input(f, left[1]);

        let middle = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);
        self.render_tasks(f, middle[0]);
        self.render_subtasks(f, middle[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
            ])
            .split(columns[2]);
        self.render_description(f, right[0]);
        self.render_gauge(f, right[1]);
        self.render_chart(f, right[2]);

        self.render_status_bar(f, outer[1]);

        match self.overlay {
            Some(Overlay::Help) => self.render_help(f),
            Some(Overlay::Tree) => self.render_tree(f),
            None => {}
        }
    }

    fn render_projects(&mut self, f: &mut Frame, area: Rect) {
        let rows = views::project_rows(&self.store);
        self.project_list_state.select(self.selection.project_index);

        let items: Vec<ListItem> = if rows.is_empty() {
            vec![ListItem::new("No projects available")]
        } else {
            rows.into_iter().map(ListItem::new).collect()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Projects")
                    .border_style(self.focus_style(Focus::Projects, colors::PROJECT_GREEN)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(colors::PROJECT_GREEN)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");
        f.render_stateful_widget(list, area, &mut self.project_list_state);
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        let rows = views::task_rows(&self.store, self.selection.project_id);
        self.task_list_state.select(self.selection.task_index);

        let items: Vec<ListItem> = if rows.is_empty() {
            vec![ListItem::new("No tasks available")]
        } else {
            rows.into_iter().map(ListItem::new).collect()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Tasks")
                    .border_style(self.focus_style(Focus::Tasks, colors::TASK_GOLD)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(colors::TASK_GOLD)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");
        f.render_stateful_widget(list, area, &mut self.task_list_state);
    }

    fn render_subtasks(&mut self, f: &mut Frame, area: Rect) {
        let rows = views::subtask_rows(&self.store, self.selection.project_id, self.selection.task_id);
        self.subtask_list_state.select(self.selection.subtask_index);

        let items: Vec<ListItem> = if rows.is_empty() {
            vec![ListItem::new("No subtasks available")]
        } else {
            rows.into_iter().map(ListItem::new).collect()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Subtasks")
                    .border_style(self.focus_style(Focus::Subtasks, colors::SUBTASK_CYAN)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(colors::SUBTASK_CYAN)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");
        f.render_stateful_widget(list, area, &mut self.subtask_list_state);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let (title, text, cursor) = match &self.mode {
            Mode::Typing { purpose, field } => {
                (purpose.prompt(), field.value.as_str(), Some(field.cursor))
            }
            Mode::Navigating => ("Input", "", None),
        };
        let border = if cursor.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border),
        );
        f.render_widget(input, area);

        if let Some(cursor) = cursor {
            f.set_cursor_position((area.x + cursor as u16 + 1, area.y + 1));
        }
    }

    fn render_description(&self, f: &mut Frame, area: Rect) {
        let text = views::description_text(
            &self.store,
            self.selection.project_id,
            self.selection.task_id,
            self.selection.subtask_id,
            self.focus == Focus::Subtasks,
        );
        let description = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Description"))
            .wrap(Wrap { trim: true });
        f.render_widget(description, area);
    }

    fn render_gauge(&self, f: &mut Frame, area: Rect) {
        let view = views::subtask_gauge(&self.store, self.selection.project_id, self.selection.task_id);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Subtask Completion"),
            )
            .gauge_style(Style::default().fg(view.color))
            .percent(view.percent)
            .label(view.label);
        f.render_widget(gauge, area);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let (done, pending) = views::task_chart(&self.store, self.selection.project_id);
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Task Completion"),
            )
            .data(&[("Done", done), ("Open", pending)])
            .bar_width(9)
            .bar_style(Style::default().fg(colors::PROJECT_GREEN))
            .value_style(Style::default().fg(Color::Black).bg(colors::PROJECT_GREEN));
        f.render_widget(chart, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            format!(
                "[{}] a:add e:edit i:desc m:assign space:toggle d:delete Tab:level v:tree ?:help s:save q:quit",
                self.focus.label()
            )
        } else {
            self.status_message.clone()
        };
        let status = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_help(&self, f: &mut Frame) {
        let area = centered_rect(60, 60, f.area());
        f.render_widget(Clear, area);

        let help = Paragraph::new(
            "\n\
             q: Save and quit\n\
             a: Add project / task / subtask (at focused level)\n\
             e: Edit name or title (project edit continues to description)\n\
             i: Edit task/subtask description\n\
             m: Assign task/subtask to someone (empty = unassigned)\n\
             Space: Toggle completion\n\
             d: Delete selection (children go with it)\n\
             Tab: Switch level (Projects > Tasks > Subtasks)\n\
             Up/Down or k/j: Move selection\n\
             v: Show project tree\n\
             s: Save now\n\
             Esc: Cancel input\n\n\
             Press any key to close",
        )
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    fn render_tree(&self, f: &mut Frame) {
        let area = centered_rect(60, 70, f.area());
        f.render_widget(Clear, area);

        let tree = Paragraph::new(views::tree_text(&self.store))
            .block(Block::default().borders(Borders::ALL).title("Project Tree"))
            .wrap(Wrap { trim: false });
        f.render_widget(tree, area);
    }

    fn focus_style(&self, level: Focus, color: Color) -> Style {
        if self.focus == level {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Poll for and handle the next key event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    /// Main event loop: draw, then fully process one event at a time.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Move an index by `delta` within `[0, len)`, defaulting to 0.
fn stepped(index: Option<usize>, delta: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let cur = index.unwrap_or(0);
    let next = if delta < 0 {
        cur.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (cur + delta as usize).min(len - 1)
    };
    Some(next)
}
