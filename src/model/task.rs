use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::diff_days;
use super::id::{RowId, TaskId};

/// Workflow state shown as the glyph colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[serde(alias = "not-started")]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Blocked,
            TaskStatus::Done,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Not started",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::Done => "Done",
        }
    }
}

/// A dated work item living in exactly one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub row_id: RowId,
    pub name: String,
    /// First day of the task, inclusive.
    pub start: NaiveDate,
    /// Last day of the task, inclusive. Doubles as the due date.
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Percent complete, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
}

impl Task {
    /// A single-day task on `date`.
    pub fn new(row_id: RowId, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: TaskId::generate(),
            row_id,
            name: name.into(),
            start: date,
            end: date,
            owner: None,
            status: None,
            link: None,
            progress: None,
        }
    }

    /// Inclusive length in days; a single-day task lasts 1.
    pub fn duration_days(&self) -> i64 {
        diff_days(self.end, self.start) + 1
    }

    pub fn has_owner(&self) -> bool {
        self.owner.as_deref().is_some_and(|o| !o.trim().is_empty())
    }

    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// Partial update merged into a task by [`super::Document::update_task`].
///
/// Optional fields use a nested `Option` so a patch can clear them:
/// `Some(None)` removes the value, `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub owner: Option<Option<String>>,
    pub status: Option<Option<TaskStatus>>,
    pub link: Option<Option<String>>,
    pub progress: Option<Option<f32>>,
}

impl TaskPatch {
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    pub fn start(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    pub fn end(end: NaiveDate) -> Self {
        Self {
            end: Some(end),
            ..Default::default()
        }
    }

    /// The task as it would look after merging, or `None` if the merge would
    /// break `start <= end`.
    pub fn merged_into(&self, task: &Task) -> Option<Task> {
        let mut next = task.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(start) = self.start {
            next.start = start;
        }
        if let Some(end) = self.end {
            next.end = end;
        }
        if let Some(owner) = &self.owner {
            next.owner = owner.clone();
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(link) = &self.link {
            next.link = link.clone();
        }
        if let Some(progress) = self.progress {
            next.progress = progress.map(|p| p.clamp(0.0, 100.0));
        }
        (next.start <= next.end).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::parse_date;

    fn task() -> Task {
        let day = parse_date("2024-01-01").unwrap();
        let mut t = Task::new(RowId::from("a"), "T", day);
        t.end = parse_date("2024-01-03").unwrap();
        t
    }

    #[test]
    fn duration_is_inclusive() {
        assert_eq!(task().duration_days(), 3);
    }

    #[test]
    fn patch_refuses_inverted_range() {
        let t = task();
        let patch = TaskPatch::start(parse_date("2024-01-04").unwrap());
        assert!(patch.merged_into(&t).is_none());
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut t = task();
        t.owner = Some("ana".into());
        let patch = TaskPatch {
            owner: Some(None),
            progress: Some(Some(140.0)),
            ..Default::default()
        };
        let merged = patch.merged_into(&t).unwrap();
        assert_eq!(merged.owner, None);
        assert_eq!(merged.progress, Some(100.0));
    }

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: TaskStatus = serde_json::from_str("\"not-started\"").unwrap();
        assert_eq!(parsed, TaskStatus::Todo);
    }
}
