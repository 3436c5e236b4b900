//! In-memory store for the project tree.
//!
//! `TaskStore` owns every project (and through it every task and subtask)
//! and hands out IDs from three independent counters, one per entity kind.
//! Write operations use a strict contract and fail with `StoreError` when
//! the target ID path does not resolve; the `projects`/`tasks`/`subtasks`
//! read accessors are deliberately lenient and return empty slices for
//! missing parents so the view layer never has to special-case "not found".

use chrono::Utc;
use thiserror::Error;

use crate::task::{Project, Subtask, Task};

/// Errors surfaced by write operations and index accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("project {0} not found")]
    ProjectNotFound(u64),
    #[error("task {0} not found")]
    TaskNotFound(u64),
    #[error("subtask {0} not found")]
    SubtaskNotFound(u64),
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Owns the project tree and allocates entity IDs.
///
/// IDs are unique within their own kind only: project, task and subtask
/// counters advance independently, and task IDs are global across projects
/// (likewise subtask IDs across tasks). Insertion order is preserved and is
/// the canonical iteration order everywhere.
#[derive(Debug)]
pub struct TaskStore {
    projects: Vec<Project>,
    next_project_id: u64,
    next_task_id: u64,
    next_subtask_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            projects: Vec::new(),
            next_project_id: 1,
            next_task_id: 1,
            next_subtask_id: 1,
        }
    }

    /// Replace the whole tree, typically with freshly loaded data.
    ///
    /// Recomputes all three ID counters as `max(existing) + 1` so entities
    /// created after a load never collide with restored ones.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        let max_project = self.projects.iter().map(|p| p.id).max().unwrap_or(0);
        let max_task = self
            .projects
            .iter()
            .flat_map(|p| p.tasks.iter())
            .map(|t| t.id)
            .max()
            .unwrap_or(0);
        let max_subtask = self
            .projects
            .iter()
            .flat_map(|p| p.tasks.iter())
            .flat_map(|t| t.subtasks.iter())
            .map(|s| s.id)
            .max()
            .unwrap_or(0);
        self.next_project_id = max_project + 1;
        self.next_task_id = max_task + 1;
        self.next_subtask_id = max_subtask + 1;
    }

    /// Add an empty project and return its new ID.
    pub fn add_project(&mut self, name: &str, description: &str) -> u64 {
        let id = self.next_project_id;
        self.projects.push(Project::new(id, name, description));
        self.next_project_id += 1;
        id
    }

    /// Append a task to a project and return its new ID.
    pub fn add_task(
        &mut self,
        project_id: u64,
        title: &str,
        description: &str,
    ) -> Result<u64, StoreError> {
        let id = self.next_task_id;
        let project = self.project_mut(project_id)?;
        project.tasks.push(Task::new(id, title, description));
        self.next_task_id += 1;
        Ok(id)
    }

    /// Append a subtask to a task and return its new ID.
    pub fn add_subtask(
        &mut self,
        project_id: u64,
        task_id: u64,
        title: &str,
        description: &str,
    ) -> Result<u64, StoreError> {
        let id = self.next_subtask_id;
        let task = self.task_mut(project_id, task_id)?;
        task.subtasks.push(Subtask::new(id, title, description));
        self.next_subtask_id += 1;
        Ok(id)
    }

    /// Overwrite a project's name and description, leaving tasks untouched.
    pub fn edit_project(
        &mut self,
        project_id: u64,
        name: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        project.name = name.to_string();
        project.description = description.to_string();
        Ok(())
    }

    /// Overwrite a task's title and description.
    ///
    /// Assignee, completion state and timestamps are untouched.
    pub fn edit_task(
        &mut self,
        project_id: u64,
        task_id: u64,
        title: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let task = self.task_mut(project_id, task_id)?;
        task.title = title.to_string();
        task.description = description.to_string();
        Ok(())
    }

    /// Overwrite a subtask's title and description.
    pub fn edit_subtask(
        &mut self,
        project_id: u64,
        task_id: u64,
        subtask_id: u64,
        title: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let subtask = self.subtask_mut(project_id, task_id, subtask_id)?;
        subtask.title = title.to_string();
        subtask.description = description.to_string();
        Ok(())
    }

    /// Set a task's assignee. An empty string means unassigned.
    pub fn assign_task(
        &mut self,
        project_id: u64,
        task_id: u64,
        assignee: &str,
    ) -> Result<(), StoreError> {
        let task = self.task_mut(project_id, task_id)?;
        task.assigned_to = assignee.to_string();
        Ok(())
    }

    /// Set a subtask's assignee. An empty string means unassigned.
    pub fn assign_subtask(
        &mut self,
        project_id: u64,
        task_id: u64,
        subtask_id: u64,
        assignee: &str,
    ) -> Result<(), StoreError> {
        let subtask = self.subtask_mut(project_id, task_id, subtask_id)?;
        subtask.assigned_to = assignee.to_string();
        Ok(())
    }

    /// Flip a task's completion state.
    ///
    /// `completed_at` is stamped on the flip to complete and cleared on the
    /// flip back, so it is only ever set while `complete` is true.
    pub fn toggle_task(&mut self, project_id: u64, task_id: u64) -> Result<(), StoreError> {
        let task = self.task_mut(project_id, task_id)?;
        task.complete = !task.complete;
        task.completed_at = if task.complete { Some(Utc::now()) } else { None };
        Ok(())
    }

    /// Flip a subtask's completion state, stamping `completed_at` like
    /// [`toggle_task`](Self::toggle_task).
    pub fn toggle_subtask(
        &mut self,
        project_id: u64,
        task_id: u64,
        subtask_id: u64,
    ) -> Result<(), StoreError> {
        let subtask = self.subtask_mut(project_id, task_id, subtask_id)?;
        subtask.complete = !subtask.complete;
        subtask.completed_at = if subtask.complete { Some(Utc::now()) } else { None };
        Ok(())
    }

    /// Remove a project and everything it owns.
    pub fn remove_project(&mut self, project_id: u64) -> Result<(), StoreError> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;
        self.projects.remove(idx);
        Ok(())
    }

    /// Remove a task and its subtasks from a project.
    pub fn remove_task(&mut self, project_id: u64, task_id: u64) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let idx = project
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(StoreError::TaskNotFound(task_id))?;
        project.tasks.remove(idx);
        Ok(())
    }

    /// Remove a single subtask from a task.
    pub fn remove_subtask(
        &mut self,
        project_id: u64,
        task_id: u64,
        subtask_id: u64,
    ) -> Result<(), StoreError> {
        let task = self.task_mut(project_id, task_id)?;
        let idx = task
            .subtasks
            .iter()
            .position(|s| s.id == subtask_id)
            .ok_or(StoreError::SubtaskNotFound(subtask_id))?;
        task.subtasks.remove(idx);
        Ok(())
    }

    /// All projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Tasks of a project in insertion order; empty if the project is
    /// missing or has no tasks.
    pub fn tasks(&self, project_id: u64) -> &[Task] {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Subtasks of a task in insertion order; empty if either ancestor is
    /// missing or the task has no subtasks.
    pub fn subtasks(&self, project_id: u64, task_id: u64) -> &[Subtask] {
        self.tasks(project_id)
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.subtasks.as_slice())
            .unwrap_or(&[])
    }

    /// Project at a display position.
    pub fn project_at(&self, index: usize) -> Result<&Project, StoreError> {
        self.projects.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: self.projects.len(),
        })
    }

    /// Task at a display position within a project.
    pub fn task_at(&self, project_id: u64, index: usize) -> Result<&Task, StoreError> {
        let tasks = self.tasks(project_id);
        tasks.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: tasks.len(),
        })
    }

    /// Subtask at a display position within a task.
    pub fn subtask_at(
        &self,
        project_id: u64,
        task_id: u64,
        index: usize,
    ) -> Result<&Subtask, StoreError> {
        let subtasks = self.subtasks(project_id, task_id);
        subtasks.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: subtasks.len(),
        })
    }

    /// `(completed, total)` task counts for a project.
    pub fn task_completion(&self, project_id: u64) -> (usize, usize) {
        let tasks = self.tasks(project_id);
        let done = tasks.iter().filter(|t| t.complete).count();
        (done, tasks.len())
    }

    /// `(completed, total)` subtask counts for a task.
    pub fn subtask_completion(&self, project_id: u64, task_id: u64) -> (usize, usize) {
        let subtasks = self.subtasks(project_id, task_id);
        let done = subtasks.iter().filter(|s| s.complete).count();
        (done, subtasks.len())
    }

    fn project_mut(&mut self, project_id: u64) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))
    }

    fn task_mut(&mut self, project_id: u64, task_id: u64) -> Result<&mut Task, StoreError> {
        self.project_mut(project_id)?
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StoreError::TaskNotFound(task_id))
    }

    fn subtask_mut(
        &mut self,
        project_id: u64,
        task_id: u64,
        subtask_id: u64,
    ) -> Result<&mut Subtask, StoreError> {
        self.task_mut(project_id, task_id)?
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or(StoreError::SubtaskNotFound(subtask_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_tree() -> (TaskStore, u64, u64, u64) {
        let mut store = TaskStore::new();
        let pid = store.add_project("Launch", "Ship the thing");
        let tid = store.add_task(pid, "Design", "").unwrap();
        let sid = store.add_subtask(pid, tid, "Wireframe", "").unwrap();
        (store, pid, tid, sid)
    }

    #[test]
    fn ids_increment_per_scope() {
        let mut store = TaskStore::new();
        let p1 = store.add_project("A", "");
        let p2 = store.add_project("B", "");
        assert_eq!((p1, p2), (1, 2));

        // Task IDs are global across projects, not per-project.
        let t1 = store.add_task(p1, "t1", "").unwrap();
        let t2 = store.add_task(p2, "t2", "").unwrap();
        assert_eq!((t1, t2), (1, 2));

        // Subtask counter is independent of the task counter.
        let s1 = store.add_subtask(p1, t1, "s1", "").unwrap();
        assert_eq!(s1, 1);
    }

    #[test]
    fn set_projects_recomputes_counters() {
        let mut store = TaskStore::new();
        let projects = vec![
            Project::new(1, "one", ""),
            Project::new(3, "three", ""),
            Project::new(7, "seven", ""),
        ];
        store.set_projects(projects);
        assert_eq!(store.add_project("eight", ""), 8);
    }

    #[test]
    fn set_projects_counts_nested_ids() {
        let mut store = TaskStore::new();
        let mut project = Project::new(2, "p", "");
        let mut task = Task::new(9, "t", "");
        task.subtasks.push(Subtask::new(5, "s", ""));
        project.tasks.push(task);
        store.set_projects(vec![project]);

        assert_eq!(store.add_task(2, "next", "").unwrap(), 10);
        assert_eq!(store.add_subtask(2, 9, "next", "").unwrap(), 6);
    }

    #[test]
    fn set_projects_empty_resets_to_one() {
        let (mut store, ..) = store_with_tree();
        store.set_projects(Vec::new());
        assert_eq!(store.add_project("fresh", ""), 1);
    }

    #[test]
    fn add_task_requires_project() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.add_task(42, "t", ""),
            Err(StoreError::ProjectNotFound(42))
        );
    }

    #[test]
    fn add_subtask_requires_both_ancestors() {
        let (mut store, pid, ..) = store_with_tree();
        assert_eq!(
            store.add_subtask(99, 1, "s", ""),
            Err(StoreError::ProjectNotFound(99))
        );
        assert_eq!(
            store.add_subtask(pid, 99, "s", ""),
            Err(StoreError::TaskNotFound(99))
        );
    }

    #[test]
    fn toggle_twice_round_trips() {
        let (mut store, pid, tid, _) = store_with_tree();

        store.toggle_task(pid, tid).unwrap();
        let task = &store.tasks(pid)[0];
        assert!(task.complete);
        assert!(task.completed_at.is_some());

        store.toggle_task(pid, tid).unwrap();
        let task = &store.tasks(pid)[0];
        assert!(!task.complete);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn subtask_toggle_scenario() {
        let (mut store, pid, tid, sid) = store_with_tree();

        store.toggle_subtask(pid, tid, sid).unwrap();
        let subtask = &store.subtasks(pid, tid)[0];
        assert_eq!(subtask.title, "Wireframe");
        assert!(subtask.complete);
        assert!(subtask.completed_at.is_some());

        store.toggle_subtask(pid, tid, sid).unwrap();
        let subtask = &store.subtasks(pid, tid)[0];
        assert!(!subtask.complete);
        assert_eq!(subtask.completed_at, None);
    }

    #[test]
    fn edit_task_missing_leaves_store_unchanged() {
        let (mut store, pid, ..) = store_with_tree();
        let before = store.tasks(pid).to_vec();

        assert_eq!(
            store.edit_task(pid, 999, "new", "new"),
            Err(StoreError::TaskNotFound(999))
        );
        assert_eq!(store.tasks(pid), before.as_slice());
    }

    #[test]
    fn edit_preserves_other_fields() {
        let (mut store, pid, tid, _) = store_with_tree();
        store.assign_task(pid, tid, "ada").unwrap();
        store.toggle_task(pid, tid).unwrap();
        let stamped = store.tasks(pid)[0].completed_at;

        store.edit_task(pid, tid, "Design v2", "rework").unwrap();
        let task = &store.tasks(pid)[0];
        assert_eq!(task.title, "Design v2");
        assert_eq!(task.description, "rework");
        assert_eq!(task.assigned_to, "ada");
        assert!(task.complete);
        assert_eq!(task.completed_at, stamped);
    }

    #[test]
    fn assign_allows_empty_meaning_unassigned() {
        let (mut store, pid, tid, _) = store_with_tree();
        store.assign_task(pid, tid, "grace").unwrap();
        store.assign_task(pid, tid, "").unwrap();
        assert_eq!(store.tasks(pid)[0].assigned_to, "");
    }

    #[test]
    fn remove_project_cascades() {
        let (mut store, pid, tid, _) = store_with_tree();
        store.remove_project(pid).unwrap();
        assert!(store.projects().is_empty());
        assert!(store.tasks(pid).is_empty());
        assert!(store.subtasks(pid, tid).is_empty());
    }

    #[test]
    fn remove_missing_is_an_error() {
        let (mut store, pid, tid, _) = store_with_tree();
        assert_eq!(store.remove_project(99), Err(StoreError::ProjectNotFound(99)));
        assert_eq!(store.remove_task(pid, 99), Err(StoreError::TaskNotFound(99)));
        assert_eq!(
            store.remove_subtask(pid, tid, 99),
            Err(StoreError::SubtaskNotFound(99))
        );
    }

    #[test]
    fn reads_are_lenient_for_missing_parents() {
        let store = TaskStore::new();
        assert!(store.tasks(1).is_empty());
        assert!(store.subtasks(1, 1).is_empty());
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let mut store = TaskStore::new();
        let pid = store.add_project("p", "");
        for title in ["c", "a", "b"] {
            store.add_task(pid, title, "").unwrap();
        }
        let titles: Vec<&str> = store.tasks(pid).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn index_accessors_flag_out_of_range() {
        let (store, pid, tid, _) = store_with_tree();
        assert!(store.project_at(0).is_ok());
        assert_eq!(
            store.project_at(1),
            Err(StoreError::OutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            store.task_at(pid, 5),
            Err(StoreError::OutOfRange { index: 5, len: 1 })
        );
        assert_eq!(
            store.subtask_at(pid, tid, 1),
            Err(StoreError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn completion_ratios() {
        let (mut store, pid, tid, sid) = store_with_tree();
        store.add_task(pid, "Build", "").unwrap();
        assert_eq!(store.task_completion(pid), (0, 2));

        store.toggle_task(pid, tid).unwrap();
        assert_eq!(store.task_completion(pid), (1, 2));

        store.toggle_subtask(pid, tid, sid).unwrap();
        assert_eq!(store.subtask_completion(pid, tid), (1, 1));

        // Missing parents count as empty, not as errors.
        assert_eq!(store.task_completion(999), (0, 0));
    }
}
