//! View projection: turns the store into display strings and chart data.
//!
//! Everything here is a pure read over [`TaskStore`]; the renderer in
//! `app.rs` only pushes these values into widgets. Missing parents project
//! to empty lists and zeroed charts, never to errors.

use ratatui::style::Color;

use crate::store::TaskStore;
use crate::tui::colors;

/// Checkbox marker used in the task, subtask and tree rows.
fn status_mark(complete: bool) -> &'static str {
    if complete {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Project rows: `"{id}. {name}"`.
pub fn project_rows(store: &TaskStore) -> Vec<String> {
    store
        .projects()
        .iter()
        .map(|p| format!("{}. {}", p.id, p.name))
        .collect()
}

/// Task rows for the selected project.
pub fn task_rows(store: &TaskStore, project_id: Option<u64>) -> Vec<String> {
    let Some(pid) = project_id else {
        return Vec::new();
    };
    store
        .tasks(pid)
        .iter()
        .map(|t| {
            format!(
                "{}. {} {} (Assigned to: {})",
                t.id,
                status_mark(t.complete),
                t.title,
                t.assigned_to
            )
        })
        .collect()
}

/// Subtask rows for the selected task.
pub fn subtask_rows(store: &TaskStore, project_id: Option<u64>, task_id: Option<u64>) -> Vec<String> {
    let (Some(pid), Some(tid)) = (project_id, task_id) else {
        return Vec::new();
    };
    store
        .subtasks(pid, tid)
        .iter()
        .map(|s| {
            format!(
                "{}. {} {} (Assigned to: {})",
                s.id,
                status_mark(s.complete),
                s.title,
                s.assigned_to
            )
        })
        .collect()
}

/// Data for the subtask completion gauge of the selected task.
#[derive(Debug, PartialEq, Eq)]
pub struct GaugeView {
    pub percent: u16,
    pub label: String,
    pub color: Color,
}

/// Project the selected task's subtask completion onto the gauge.
///
/// The colour bands step from red through magenta, yellow and blue to
/// green as the percentage climbs.
pub fn subtask_gauge(
    store: &TaskStore,
    project_id: Option<u64>,
    task_id: Option<u64>,
) -> GaugeView {
    let (Some(pid), Some(tid)) = (project_id, task_id) else {
        return GaugeView {
            percent: 0,
            label: "No Task Selected".to_string(),
            color: Color::Yellow,
        };
    };

    let (done, total) = store.subtask_completion(pid, tid);
    if total == 0 {
        return GaugeView {
            percent: 0,
            label: "No Subtasks".to_string(),
            color: Color::Yellow,
        };
    }

    let percent = ((done * 100) / total) as u16;
    let color = match percent {
        0..=19 => colors::DARK_RED,
        20..=39 => colors::DARK_PURPLE,
        40..=59 => colors::TASK_GOLD,
        60..=79 => Color::Blue,
        _ => colors::PROJECT_GREEN,
    };
    GaugeView {
        percent,
        label: format!("{percent}% Complete"),
        color,
    }
}

/// `(completed, pending)` task counts for the bar chart.
pub fn task_chart(store: &TaskStore, project_id: Option<u64>) -> (u64, u64) {
    let Some(pid) = project_id else {
        return (0, 0);
    };
    let (done, total) = store.task_completion(pid);
    (done as u64, (total - done) as u64)
}

/// Description text for the entity the operator is focused on.
pub fn description_text(
    store: &TaskStore,
    project_id: Option<u64>,
    task_id: Option<u64>,
    subtask_id: Option<u64>,
    subtask_focus: bool,
) -> String {
    if subtask_focus {
        if let (Some(pid), Some(tid), Some(sid)) = (project_id, task_id, subtask_id) {
            if let Some(s) = store.subtasks(pid, tid).iter().find(|s| s.id == sid) {
                return s.description.clone();
            }
        }
        return "No Subtask Selected".to_string();
    }
    if let (Some(pid), Some(tid)) = (project_id, task_id) {
        if let Some(t) = store.tasks(pid).iter().find(|t| t.id == tid) {
            return t.description.clone();
        }
    }
    "No Task Selected".to_string()
}

/// Plain-text rendering of the whole tree, used by the tree modal and the
/// `tree` subcommand. Tasks indent four spaces, subtasks eight.
pub fn tree_text(store: &TaskStore) -> String {
    let mut out = String::new();
    for project in store.projects() {
        out.push_str(&format!("{}. {}\n", project.id, project.name));
        for task in &project.tasks {
            out.push_str(&format!(
                "    {} {}. {}\n",
                status_mark(task.complete),
                task.id,
                task.title
            ));
            for subtask in &task.subtasks {
                out.push_str(&format!(
                    "        {} {}. {}\n",
                    status_mark(subtask.complete),
                    subtask.id,
                    subtask.title
                ));
            }
        }
    }
    if out.is_empty() {
        out.push_str("No projects available");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_store() -> (TaskStore, u64, u64) {
        let mut store = TaskStore::new();
        let pid = store.add_project("Launch", "");
        let tid = store.add_task(pid, "Design", "mockups").unwrap();
        store.assign_task(pid, tid, "ada").unwrap();
        store.add_subtask(pid, tid, "Wireframe", "").unwrap();
        store.add_subtask(pid, tid, "Palette", "").unwrap();
        (store, pid, tid)
    }

    #[test]
    fn row_formats() {
        let (mut store, pid, tid) = populated_store();
        store.toggle_task(pid, tid).unwrap();

        assert_eq!(project_rows(&store), vec!["1. Launch"]);
        assert_eq!(
            task_rows(&store, Some(pid)),
            vec!["1. [x] Design (Assigned to: ada)"]
        );
        assert_eq!(
            subtask_rows(&store, Some(pid), Some(tid))[0],
            "1. [ ] Wireframe (Assigned to: )"
        );
    }

    #[test]
    fn rows_empty_without_selection() {
        let (store, ..) = populated_store();
        assert!(task_rows(&store, None).is_empty());
        assert!(subtask_rows(&store, Some(1), None).is_empty());
    }

    #[test]
    fn gauge_without_task_selection() {
        let (store, pid, _) = populated_store();
        let gauge = subtask_gauge(&store, Some(pid), None);
        assert_eq!(gauge.percent, 0);
        assert_eq!(gauge.label, "No Task Selected");
    }

    #[test]
    fn gauge_percentage_and_banding() {
        let (mut store, pid, tid) = populated_store();
        let gauge = subtask_gauge(&store, Some(pid), Some(tid));
        assert_eq!(gauge.percent, 0);
        assert_eq!(gauge.color, colors::DARK_RED);

        let sid = store.subtasks(pid, tid)[0].id;
        store.toggle_subtask(pid, tid, sid).unwrap();
        let gauge = subtask_gauge(&store, Some(pid), Some(tid));
        assert_eq!(gauge.percent, 50);
        assert_eq!(gauge.color, colors::TASK_GOLD);
        assert_eq!(gauge.label, "50% Complete");

        let sid = store.subtasks(pid, tid)[1].id;
        store.toggle_subtask(pid, tid, sid).unwrap();
        let gauge = subtask_gauge(&store, Some(pid), Some(tid));
        assert_eq!(gauge.percent, 100);
        assert_eq!(gauge.color, colors::PROJECT_GREEN);
    }

    #[test]
    fn gauge_handles_task_without_subtasks() {
        let mut store = TaskStore::new();
        let pid = store.add_project("p", "");
        let tid = store.add_task(pid, "t", "").unwrap();
        let gauge = subtask_gauge(&store, Some(pid), Some(tid));
        assert_eq!(gauge.label, "No Subtasks");
    }

    #[test]
    fn chart_counts_completed_and_pending() {
        let (mut store, pid, tid) = populated_store();
        store.add_task(pid, "Build", "").unwrap();
        store.toggle_task(pid, tid).unwrap();
        assert_eq!(task_chart(&store, Some(pid)), (1, 1));
        assert_eq!(task_chart(&store, None), (0, 0));
    }

    #[test]
    fn description_follows_focus() {
        let (store, pid, tid) = populated_store();
        assert_eq!(
            description_text(&store, Some(pid), Some(tid), None, false),
            "mockups"
        );
        assert_eq!(
            description_text(&store, Some(pid), Some(tid), None, true),
            "No Subtask Selected"
        );
        assert_eq!(description_text(&store, Some(pid), None, None, false), "No Task Selected");
    }

    #[test]
    fn tree_text_indents_levels() {
        let (mut store, pid, tid) = populated_store();
        let sid = store.subtasks(pid, tid)[0].id;
        store.toggle_subtask(pid, tid, sid).unwrap();

        let text = tree_text(&store);
        assert!(text.contains("1. Launch\n"));
        assert!(text.contains("    [ ] 1. Design\n"));
        assert!(text.contains("        [x] 1. Wireframe\n"));
    }

    #[test]
    fn tree_text_placeholder_when_empty() {
        assert_eq!(tree_text(&TaskStore::new()), "No projects available");
    }
}
