use super::id::{RowId, TaskId};
use super::task::{Task, TaskPatch};

/// The slice of the document a drag gesture reads and writes.
///
/// [`super::Document`] implements it directly; the drag interpreter only ever
/// sees the document through this trait.
pub trait TaskMutations {
    fn task(&self, id: &TaskId) -> Option<&Task>;

    /// The task's row and its index within that row's task list.
    fn slot_of(&self, id: &TaskId) -> Option<(RowId, usize)>;

    fn row_task_count(&self, row: &RowId) -> usize;

    /// Merge `patch` into the task. Returns `true` only when something changed;
    /// a patch that would put `start` after `end` changes nothing.
    fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> bool;

    /// Move the task into `row` at `index`, clamped to the row's length once
    /// the task itself is taken out. Returns `true` only when the slot changed.
    fn reorder_task(&mut self, id: &TaskId, row: &RowId, index: usize) -> bool;
}
