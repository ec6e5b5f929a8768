use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{RowId, TaskId, TimeboxId};
use super::mutation::TaskMutations;
use super::row::{Row, RowPatch};
use super::task::{Task, TaskPatch};
use super::timebox::{Timebox, TimeboxKind, TimeboxPatch};

pub const DOCUMENT_VERSION: u32 = 1;

/// Timeline granularity. Only `Day` has its own geometry so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zoom {
    #[default]
    Day,
    Week,
    Month,
}

impl Zoom {
    pub fn all() -> &'static [Zoom] {
        &[Zoom::Day, Zoom::Week, Zoom::Month]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zoom::Day => "Day",
            Zoom::Week => "Week",
            Zoom::Month => "Month",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSettings {
    pub zoom: Zoom,
    pub show_timeboxes: bool,
    pub collapsed_row_ids: Vec<RowId>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom: Zoom::Day,
            show_timeboxes: true,
            collapsed_row_ids: Vec::new(),
        }
    }
}

/// The planning board: the single mutable aggregate everything else reads.
///
/// Task order inside a row is the order tasks appear in `tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub title: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub rows: Vec<Row>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub timeboxes: Vec<Timebox>,
    #[serde(default)]
    pub view: ViewSettings,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            title: "New Project Plan".to_string(),
            timezone: default_timezone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            rows: Vec::new(),
            tasks: Vec::new(),
            timeboxes: Vec::new(),
            view: ViewSettings::default(),
        }
    }
}

impl Document {
    /// First-run content: two rows with one single-day task each.
    pub fn seed(today: NaiveDate) -> Self {
        let engineering = Row::new("Engineering", 0);
        let design = Row::new("Design", 1);

        let mut setup = Task::new(engineering.id.clone(), "Setup Repo", today);
        setup.progress = Some(0.0);
        let mut mockups = Task::new(design.id.clone(), "Mockups", today);
        mockups.progress = Some(0.0);

        Self {
            rows: vec![engineering, design],
            tasks: vec![setup, mockups],
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    // --- Lookups ---

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn timebox(&self, id: &TimeboxId) -> Option<&Timebox> {
        self.timeboxes.iter().find(|t| &t.id == id)
    }

    /// Tasks of one row in slot order.
    pub fn tasks_in_row<'a>(&'a self, row: &'a RowId) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| &t.row_id == row)
    }

    /// All per-row task lists in one pass over `tasks`.
    pub fn group_by_row(&self) -> HashMap<&RowId, Vec<&Task>> {
        let mut groups: HashMap<&RowId, Vec<&Task>> = HashMap::with_capacity(self.rows.len());
        for task in &self.tasks {
            groups.entry(&task.row_id).or_default().push(task);
        }
        groups
    }

    pub fn is_collapsed(&self, row: &RowId) -> bool {
        self.view.collapsed_row_ids.contains(row)
    }

    /// Latest inclusive end date across every task.
    pub fn latest_end(&self) -> Option<NaiveDate> {
        self.tasks.iter().map(|t| t.end).max()
    }

    // --- Row CRUD ---

    pub fn add_row(&mut self, name: impl Into<String>) -> RowId {
        let row = Row::new(name, self.rows.len() as u32);
        let id = row.id.clone();
        self.rows.push(row);
        self.touch();
        id
    }

    pub fn update_row(&mut self, id: &RowId, patch: RowPatch) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| &r.id == id) else {
            return false;
        };
        match patch.name {
            Some(name) if name != row.name => row.name = name,
            _ => return false,
        }
        self.touch();
        true
    }

    /// Remove a row together with every task assigned to it.
    pub fn delete_row(&mut self, id: &RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| &r.id != id);
        if self.rows.len() == before {
            return false;
        }
        self.tasks.retain(|t| &t.row_id != id);
        self.view.collapsed_row_ids.retain(|r| r != id);
        self.renumber_rows();
        self.touch();
        true
    }

    pub fn toggle_row_collapsed(&mut self, id: &RowId) -> bool {
        if self.row(id).is_none() {
            return false;
        }
        if let Some(pos) = self.view.collapsed_row_ids.iter().position(|r| r == id) {
            self.view.collapsed_row_ids.remove(pos);
        } else {
            self.view.collapsed_row_ids.push(id.clone());
        }
        self.touch();
        true
    }

    fn renumber_rows(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.order = i as u32;
        }
    }

    // --- Task CRUD ---

    /// Append a single-day task dated `today` to the end of `row`.
    pub fn add_task(&mut self, row: &RowId, name: impl Into<String>, today: NaiveDate) -> Option<TaskId> {
        self.row(row)?;
        let task = Task::new(row.clone(), name, today);
        let id = task.id.clone();
        self.tasks.push(task);
        self.touch();
        Some(id)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    // --- Timeboxes ---

    pub fn add_timebox(
        &mut self,
        kind: TimeboxKind,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<TimeboxId> {
        if start > end {
            return None;
        }
        let timebox = Timebox::new(kind, name, start, end);
        let id = timebox.id.clone();
        self.timeboxes.push(timebox);
        self.touch();
        Some(id)
    }

    pub fn update_timebox(&mut self, id: &TimeboxId, patch: TimeboxPatch) -> bool {
        let Some(timebox) = self.timeboxes.iter_mut().find(|t| &t.id == id) else {
            return false;
        };
        let mut next = timebox.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(start) = patch.start {
            next.start = start;
        }
        if let Some(end) = patch.end {
            next.end = end;
        }
        if next.start > next.end || next == *timebox {
            return false;
        }
        *timebox = next;
        self.touch();
        true
    }

    pub fn delete_timebox(&mut self, id: &TimeboxId) -> bool {
        let before = self.timeboxes.len();
        self.timeboxes.retain(|t| &t.id != id);
        let removed = self.timeboxes.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    // --- View ---

    pub fn set_show_timeboxes(&mut self, show: bool) {
        if self.view.show_timeboxes != show {
            self.view.show_timeboxes = show;
            self.touch();
        }
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        if self.view.zoom != zoom {
            self.view.zoom = zoom;
            self.touch();
        }
    }
}

impl TaskMutations for Document {
    fn task(&self, id: &TaskId) -> Option<&Task> {
        Document::task(self, id)
    }

    fn slot_of(&self, id: &TaskId) -> Option<(RowId, usize)> {
        let task = Document::task(self, id)?;
        let index = self.tasks_in_row(&task.row_id).position(|t| &t.id == id)?;
        Some((task.row_id.clone(), index))
    }

    fn row_task_count(&self, row: &RowId) -> usize {
        self.tasks_in_row(row).count()
    }

    fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| &t.id == id) else {
            return false;
        };
        match patch.merged_into(&self.tasks[pos]) {
            Some(next) if next != self.tasks[pos] => {
                self.tasks[pos] = next;
                self.touch();
                true
            }
            _ => false,
        }
    }

    fn reorder_task(&mut self, id: &TaskId, row: &RowId, index: usize) -> bool {
        if self.row(row).is_none() {
            return false;
        }
        let Some(current) = self.slot_of(id) else {
            return false;
        };
        let others = self.row_task_count(row) - usize::from(&current.0 == row);
        let index = index.min(others);
        if current.0 == *row && current.1 == index {
            return false;
        }

        let Some(from) = self.tasks.iter().position(|t| &t.id == id) else {
            return false;
        };
        let mut task = self.tasks.remove(from);
        task.row_id = row.clone();

        let positions: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| &t.row_id == row)
            .map(|(i, _)| i)
            .collect();
        let at = match positions.get(index) {
            Some(&pos) => pos,
            None => positions.last().map_or(self.tasks.len(), |&last| last + 1),
        };
        self.tasks.insert(at, task);
        self.touch();
        true
    }
}
