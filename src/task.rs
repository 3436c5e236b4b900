//! Entity types for the project/task/subtask tree.
//!
//! These structs are the persisted shape of the tracker: a project owns its
//! tasks, a task owns its subtasks, and nothing is shared between parents.
//! Serde field names follow the on-disk JSON format (`ID`, `Name`,
//! `CreatedAt`, ...) so existing data files stay readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project grouping a list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
}

/// A work item owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: u64,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub complete: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub created_at: DateTime<Utc>,
    // Serialized as an explicit `null` while the task is open.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A step under a task. Same lifecycle as a task, without children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subtask {
    #[serde(rename = "ID")]
    pub id: u64,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Create an empty project stamped with the current time.
    pub fn new(id: u64, name: &str, description: &str) -> Self {
        Project {
            id,
            name: name.to_string(),
            description: description.to_string(),
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl Task {
    /// Create an open, unassigned task stamped with the current time.
    pub fn new(id: u64, title: &str, description: &str) -> Self {
        Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            assigned_to: String::new(),
            complete: false,
            subtasks: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

impl Subtask {
    /// Create an open, unassigned subtask stamped with the current time.
    pub fn new(id: u64, title: &str, description: &str) -> Self {
        Subtask {
            id,
            title: title.to_string(),
            description: description.to_string(),
            assigned_to: String::new(),
            complete: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}
