//! Tagged states for the input state machine.
//!
//! The event loop dispatches on exactly two pieces of state: which list has
//! focus (`Focus`) and whether a text-input workflow is in progress
//! (`Mode`). A `Typing` mode carries the purpose of the input and its
//! buffer, so there is no way to be "typing" without knowing what the text
//! is for, and no stray buffer survives outside a workflow.

use crate::tui::input::InputField;

/// Which level of the hierarchy the list navigation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Projects,
    Tasks,
    Subtasks,
}

impl Focus {
    /// Cycle Projects → Tasks → Subtasks → Projects.
    pub fn next(self) -> Self {
        match self {
            Focus::Projects => Focus::Tasks,
            Focus::Tasks => Focus::Subtasks,
            Focus::Subtasks => Focus::Projects,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Projects => "Projects",
            Focus::Tasks => "Tasks",
            Focus::Subtasks => "Subtasks",
        }
    }
}

/// What a confirmed input buffer will be committed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    AddProjectName,
    AddTaskTitle,
    AddSubtaskTitle,
    EditProjectName,
    EditProjectDescription,
    EditTaskTitle,
    EditTaskDescription,
    EditSubtaskTitle,
    EditSubtaskDescription,
    AssignTask,
    AssignSubtask,
}

impl InputPurpose {
    /// Title shown on the input box while this purpose is active.
    pub fn prompt(self) -> &'static str {
        match self {
            InputPurpose::AddProjectName => "Enter new project name",
            InputPurpose::AddTaskTitle => "Enter new task title",
            InputPurpose::AddSubtaskTitle => "Enter new subtask title",
            InputPurpose::EditProjectName => "Edit project name",
            InputPurpose::EditProjectDescription => "Edit project description",
            InputPurpose::EditTaskTitle => "Edit task title",
            InputPurpose::EditTaskDescription => "Edit task description",
            InputPurpose::EditSubtaskTitle => "Edit subtask title",
            InputPurpose::EditSubtaskDescription => "Edit subtask description",
            InputPurpose::AssignTask => "Assign task to",
            InputPurpose::AssignSubtask => "Assign subtask to",
        }
    }
}

/// Whether the operator is navigating lists or typing into the input box.
///
/// Navigation commands are only accepted in `Navigating`; while `Typing`,
/// character keys go to the buffer and Enter/Esc commit or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigating,
    Typing {
        purpose: InputPurpose,
        field: InputField,
    },
}

impl Mode {
    pub fn typing(purpose: InputPurpose, field: InputField) -> Self {
        Mode::Typing { purpose, field }
    }

    pub fn is_typing(&self) -> bool {
        matches!(self, Mode::Typing { .. })
    }
}

/// A full-screen modal drawn over the dashboard. Any key closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Tree,
}
