//! Selection bookkeeping across the three hierarchy levels.
//!
//! Each level tracks both a display index and the entity ID at that index.
//! The index is what the operator moves; the ID is what store operations
//! take. After any mutation the IDs are re-derived from the indices via
//! [`Selection::reseat`], since indices shift when entities are removed.

use crate::store::TaskStore;

/// Current selection at each nesting level.
///
/// `None` means nothing is selected at that level (the empty-list case, or
/// a level whose parent is unselected).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub project_index: Option<usize>,
    pub project_id: Option<u64>,
    pub task_index: Option<usize>,
    pub task_id: Option<u64>,
    pub subtask_index: Option<usize>,
    pub subtask_id: Option<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Move the project selection, resetting task and subtask selection to
    /// the top of their (new) lists.
    pub fn select_project(&mut self, store: &TaskStore, index: usize) {
        self.project_index = Some(index);
        self.task_index = None;
        self.subtask_index = None;
        self.reseat(store);
    }

    /// Move the task selection within the current project, resetting the
    /// subtask selection.
    pub fn select_task(&mut self, store: &TaskStore, index: usize) {
        self.task_index = Some(index);
        self.subtask_index = None;
        self.reseat(store);
    }

    /// Move the subtask selection within the current task.
    pub fn select_subtask(&mut self, store: &TaskStore, index: usize) {
        self.subtask_index = Some(index);
        self.reseat(store);
    }

    /// Clamp every index to its list and re-derive the IDs.
    ///
    /// Unset indices default to 0 when the list is non-empty, so the first
    /// entry of each list is selected as soon as one exists. After a
    /// deletion the index lands on `min(old, len - 1)`, or `None` when the
    /// list emptied out.
    pub fn reseat(&mut self, store: &TaskStore) {
        self.project_index = clamp(self.project_index, store.projects().len());
        self.project_id = self
            .project_index
            .and_then(|i| store.project_at(i).ok())
            .map(|p| p.id);

        match self.project_id {
            Some(pid) => {
                self.task_index = clamp(self.task_index, store.tasks(pid).len());
                self.task_id = self
                    .task_index
                    .and_then(|i| store.task_at(pid, i).ok())
                    .map(|t| t.id);
            }
            None => {
                self.task_index = None;
                self.task_id = None;
            }
        }

        match (self.project_id, self.task_id) {
            (Some(pid), Some(tid)) => {
                self.subtask_index = clamp(self.subtask_index, store.subtasks(pid, tid).len());
                self.subtask_id = self
                    .subtask_index
                    .and_then(|i| store.subtask_at(pid, tid, i).ok())
                    .map(|s| s.id);
            }
            _ => {
                self.subtask_index = None;
                self.subtask_id = None;
            }
        }
    }
}

/// `min(index, len - 1)`, defaulting to 0, or `None` for an empty list.
fn clamp(index: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index.unwrap_or(0).min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_three_tasks() -> (TaskStore, u64) {
        let mut store = TaskStore::new();
        let pid = store.add_project("p", "");
        for title in ["first", "second", "third"] {
            store.add_task(pid, title, "").unwrap();
        }
        (store, pid)
    }

    #[test]
    fn reseat_defaults_to_first_entries() {
        let (store, pid) = store_with_three_tasks();
        let mut sel = Selection::new();
        sel.reseat(&store);
        assert_eq!(sel.project_index, Some(0));
        assert_eq!(sel.project_id, Some(pid));
        assert_eq!(sel.task_index, Some(0));
        assert_eq!(sel.task_id, Some(1));
        assert_eq!(sel.subtask_index, None);
    }

    #[test]
    fn empty_store_selects_nothing() {
        let store = TaskStore::new();
        let mut sel = Selection::new();
        sel.reseat(&store);
        assert_eq!(sel, Selection::new());
    }

    #[test]
    fn project_change_resets_lower_levels() {
        let (mut store, pid) = store_with_three_tasks();
        let tid = store.tasks(pid)[0].id;
        store.add_subtask(pid, tid, "s", "").unwrap();
        let other = store.add_project("q", "");

        let mut sel = Selection::new();
        sel.reseat(&store);
        sel.select_task(&store, 2);
        assert_eq!(sel.task_index, Some(2));

        sel.select_project(&store, 1);
        assert_eq!(sel.project_id, Some(other));
        // "q" has no tasks, so the lower levels clear entirely.
        assert_eq!(sel.task_index, None);
        assert_eq!(sel.task_id, None);
        assert_eq!(sel.subtask_id, None);
    }

    #[test]
    fn task_change_resets_subtask_selection() {
        let (mut store, pid) = store_with_three_tasks();
        let tid = store.tasks(pid)[0].id;
        store.add_subtask(pid, tid, "a", "").unwrap();
        store.add_subtask(pid, tid, "b", "").unwrap();

        let mut sel = Selection::new();
        sel.reseat(&store);
        sel.select_subtask(&store, 1);
        assert_eq!(sel.subtask_index, Some(1));

        sel.select_task(&store, 1);
        // Second task has no subtasks.
        assert_eq!(sel.subtask_index, None);
    }

    #[test]
    fn deleting_middle_entry_keeps_index_on_successor() {
        let (mut store, pid) = store_with_three_tasks();
        let mut sel = Selection::new();
        sel.reseat(&store);
        sel.select_task(&store, 1);

        let second = sel.task_id.unwrap();
        store.remove_task(pid, second).unwrap();
        sel.reseat(&store);

        // Index 1 is still valid and now points at the former third task.
        assert_eq!(sel.task_index, Some(1));
        assert_eq!(sel.task_id, Some(store.tasks(pid)[1].id));
        assert_eq!(store.tasks(pid)[1].title, "third");
    }

    #[test]
    fn deleting_last_entry_clamps_down() {
        let (mut store, pid) = store_with_three_tasks();
        let mut sel = Selection::new();
        sel.reseat(&store);
        sel.select_task(&store, 2);

        store.remove_task(pid, sel.task_id.unwrap()).unwrap();
        sel.reseat(&store);
        assert_eq!(sel.task_index, Some(1));
    }

    #[test]
    fn deleting_only_entry_clears_selection() {
        let mut store = TaskStore::new();
        let pid = store.add_project("p", "");
        let tid = store.add_task(pid, "only", "").unwrap();

        let mut sel = Selection::new();
        sel.reseat(&store);
        assert_eq!(sel.task_id, Some(tid));

        store.remove_task(pid, tid).unwrap();
        sel.reseat(&store);
        assert_eq!(sel.task_index, None);
        assert_eq!(sel.task_id, None);
    }
}
