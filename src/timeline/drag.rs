//! Pointer gesture interpreter.
//!
//! Turns a pointer-down / move… / up sequence on a task glyph into document
//! mutations. Only gesture state lives here; the document is handed in on
//! every call through [`TaskMutations`], and every accepted frame is written
//! straight into it (there is no preview copy and nothing to roll back).

use chrono::NaiveDate;
use egui::Pos2;

use crate::model::date::{add_days, diff_days};
use crate::model::{RowId, TaskId, TaskMutations, TaskPatch};

use super::layout::BoardLayout;

/// What a gesture does to its task, decided once at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

impl DragMode {
    /// Pick the mode from where the glyph was grabbed: within one edge handle
    /// of the left edge resizes the start, within one of the right edge resizes
    /// the end, anything else moves. The left edge wins on very narrow glyphs.
    pub fn classify(offset_x: f32, glyph_width: f32, handle_width: f32) -> Self {
        if offset_x < handle_width {
            DragMode::ResizeStart
        } else if offset_x > glyph_width - handle_width {
            DragMode::ResizeEnd
        } else {
            DragMode::Move
        }
    }
}

/// Everything captured at pointer-down. Later frames compute their deltas
/// against this snapshot, never against the previous frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub task_id: TaskId,
    pub mode: DragMode,
    pub origin: Pos2,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    pub original_row: RowId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Mutations issued by one pointer-move frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragOutcome {
    pub dates_changed: bool,
    pub reordered: bool,
}

impl DragOutcome {
    pub fn changed(&self) -> bool {
        self.dates_changed || self.reordered
    }
}

#[derive(Debug, Default)]
pub struct DragInterpreter {
    state: DragState,
}

impl DragInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_task(&self) -> Option<&TaskId> {
        self.active().map(|d| &d.task_id)
    }

    /// Start a gesture on `task_id`. Refused (returns `false`) while another
    /// gesture is active, or when the task has no glyph on the canvas.
    pub fn pointer_down(
        &mut self,
        store: &impl TaskMutations,
        layout: &BoardLayout,
        task_id: &TaskId,
        pointer: Pos2,
    ) -> bool {
        if self.is_dragging() {
            log::trace!("pointer-down on {task_id} ignored: gesture already active");
            return false;
        }
        let Some(task) = store.task(task_id) else {
            return false;
        };
        let Some(glyph) = layout.glyph_rect(task) else {
            return false;
        };

        let mode = DragMode::classify(
            pointer.x - glyph.left(),
            glyph.width(),
            layout.metrics.edge_handle_width,
        );
        log::debug!(
            "drag start task={} mode={:?} range={}..{}",
            task.id,
            mode,
            task.start,
            task.end
        );
        self.state = DragState::Dragging(ActiveDrag {
            task_id: task.id.clone(),
            mode,
            origin: pointer,
            original_start: task.start,
            original_end: task.end,
            original_row: task.row_id.clone(),
        });
        true
    }

    /// Apply the gesture for the pointer's current position. `layout` must be
    /// the geometry of the document as it is now.
    pub fn pointer_move(
        &mut self,
        store: &mut impl TaskMutations,
        layout: &BoardLayout,
        pointer: Pos2,
    ) -> DragOutcome {
        let DragState::Dragging(drag) = &self.state else {
            return DragOutcome::default();
        };
        let Some(task) = store.task(&drag.task_id) else {
            return DragOutcome::default();
        };
        let (current_start, current_end) = (task.start, task.end);
        let days = layout.metrics.day_delta(pointer.x - drag.origin.x);
        let mut outcome = DragOutcome::default();

        match drag.mode {
            DragMode::ResizeStart => {
                let start = add_days(drag.original_start, days);
                if diff_days(drag.original_end, start) >= 0 && start != current_start {
                    outcome.dates_changed = store.update_task(&drag.task_id, TaskPatch::start(start));
                }
            }
            DragMode::ResizeEnd => {
                let end = add_days(drag.original_end, days);
                if diff_days(end, drag.original_start) >= 0 && end != current_end {
                    outcome.dates_changed = store.update_task(&drag.task_id, TaskPatch::end(end));
                }
            }
            DragMode::Move => {
                let start = add_days(drag.original_start, days);
                let end = add_days(drag.original_end, days);
                if (start, end) != (current_start, current_end) {
                    outcome.dates_changed =
                        store.update_task(&drag.task_id, TaskPatch::dates(start, end));
                }
                outcome.reordered = Self::follow_pointer_vertically(store, layout, &drag.task_id, pointer);
            }
        }

        if outcome.changed() {
            log::trace!(
                "drag frame task={} days={} dates_changed={} reordered={}",
                drag.task_id,
                days,
                outcome.dates_changed,
                outcome.reordered
            );
        }
        outcome
    }

    /// Re-slot the task under the pointer. Collapsed rows and gaps between
    /// rows accept no drop.
    fn follow_pointer_vertically(
        store: &mut impl TaskMutations,
        layout: &BoardLayout,
        task_id: &TaskId,
        pointer: Pos2,
    ) -> bool {
        let Some(band) = layout.row_at(pointer.y) else {
            return false;
        };
        if band.collapsed {
            return false;
        }
        let Some((row, index)) = store.slot_of(task_id) else {
            return false;
        };

        // The dragged task does not count against its own row's length.
        let count = store.row_task_count(&band.row_id);
        let max_index = if row == band.row_id {
            count.saturating_sub(1)
        } else {
            count
        };
        let target = layout.slot_index_at(band, pointer.y).min(max_index);

        if row == band.row_id && index == target {
            return false;
        }
        store.reorder_task(task_id, &band.row_id, target)
    }

    /// End the gesture. Everything already applied stays applied.
    pub fn pointer_up(&mut self) -> Option<ActiveDrag> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => {
                log::debug!("drag commit task={} mode={:?}", drag.task_id, drag.mode);
                Some(drag)
            }
            DragState::Idle => None,
        }
    }

    /// Pointer capture went away mid-gesture; treated exactly like a release.
    pub fn capture_lost(&mut self) -> Option<ActiveDrag> {
        if self.is_dragging() {
            log::debug!("pointer capture lost, committing drag");
        }
        self.pointer_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::parse_date;
    use crate::model::{Document, Task};
    use crate::timeline::LayoutMetrics;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn reference() -> NaiveDate {
        day("2024-01-01")
    }

    fn layout(doc: &Document) -> BoardLayout {
        BoardLayout::compute(doc, reference(), LayoutMetrics::default())
    }

    fn single_task_doc() -> (Document, TaskId) {
        let mut doc = Document::default();
        doc.view.show_timeboxes = false;
        let row = doc.add_row("A");
        let id = doc.add_task(&row, "T", day("2024-01-01")).unwrap();
        doc.update_task(&id, TaskPatch::end(day("2024-01-03")));
        (doc, id)
    }

    fn glyph_centre(doc: &Document, id: &TaskId) -> Pos2 {
        layout(doc).glyph_rect(doc.task(id).unwrap()).unwrap().center()
    }

    /// Store wrapper counting the mutations that actually get issued.
    struct Counting {
        doc: Document,
        updates: usize,
        reorders: usize,
    }

    impl TaskMutations for Counting {
        fn task(&self, id: &TaskId) -> Option<&Task> {
            self.doc.task(id)
        }
        fn slot_of(&self, id: &TaskId) -> Option<(RowId, usize)> {
            self.doc.slot_of(id)
        }
        fn row_task_count(&self, row: &RowId) -> usize {
            self.doc.row_task_count(row)
        }
        fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
            self.updates += 1;
            self.doc.update_task(id, patch)
        }
        fn reorder_task(&mut self, id: &TaskId, row: &RowId, index: usize) -> bool {
            self.reorders += 1;
            self.doc.reorder_task(id, row, index)
        }
    }

    #[test]
    fn classify_by_edge_distance() {
        assert_eq!(DragMode::classify(3.0, 120.0, 10.0), DragMode::ResizeStart);
        assert_eq!(DragMode::classify(-4.0, 120.0, 10.0), DragMode::ResizeStart);
        assert_eq!(DragMode::classify(115.0, 120.0, 10.0), DragMode::ResizeEnd);
        assert_eq!(DragMode::classify(60.0, 120.0, 10.0), DragMode::Move);
        assert_eq!(DragMode::classify(5.0, 10.0, 10.0), DragMode::ResizeStart);
    }

    #[test]
    fn second_pointer_down_is_ignored_while_dragging() {
        let (doc, id) = single_task_doc();
        let l = layout(&doc);
        let mut drag = DragInterpreter::new();
        let p = glyph_centre(&doc, &id);
        assert!(drag.pointer_down(&doc, &l, &id, p));
        assert!(!drag.pointer_down(&doc, &l, &id, p + egui::vec2(3.0, 0.0)));
        assert_eq!(drag.active().unwrap().origin, p);
    }

    #[test]
    fn sub_day_jitter_issues_no_mutations() {
        let (doc, id) = single_task_doc();
        let mut store = Counting { doc, updates: 0, reorders: 0 };
        let l = layout(&store.doc);
        let p = glyph_centre(&store.doc, &id);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(&store, &l, &id, p);
        for dx in [-19.0, -5.0, 0.0, 7.0, 19.0] {
            let outcome = drag.pointer_move(&mut store, &l, p + egui::vec2(dx, 4.0));
            assert!(!outcome.changed());
        }
        assert_eq!((store.updates, store.reorders), (0, 0));
    }

    #[test]
    fn repeated_frames_do_not_repeat_mutations() {
        let (mut doc, id) = single_task_doc();
        let row = doc.rows[0].id.clone();
        doc.add_task(&row, "U", day("2024-01-01")).unwrap();
        let mut store = Counting { doc, updates: 0, reorders: 0 };
        let mut drag = DragInterpreter::new();
        let l = layout(&store.doc);
        let p = glyph_centre(&store.doc, &id);
        drag.pointer_down(&store, &l, &id, p);

        // two days right and one slot down, sampled three times
        let target = p + egui::vec2(80.0, 110.0);
        for _ in 0..3 {
            let l = layout(&store.doc);
            drag.pointer_move(&mut store, &l, target);
        }
        assert_eq!(store.updates, 1);
        assert_eq!(store.reorders, 1);
        assert_eq!(store.doc.slot_of(&id), Some((row, 1)));
    }

    #[test]
    fn move_returns_to_origin_when_pointer_comes_back() {
        let (mut doc, id) = single_task_doc();
        let mut drag = DragInterpreter::new();
        let l = layout(&doc);
        let p = glyph_centre(&doc, &id);
        drag.pointer_down(&doc, &l, &id, p);
        drag.pointer_move(&mut doc, &l, p + egui::vec2(120.0, 0.0));
        assert_eq!(doc.task(&id).unwrap().start, day("2024-01-04"));
        drag.pointer_move(&mut doc, &l, p);
        let task = doc.task(&id).unwrap();
        assert_eq!((task.start, task.end), (day("2024-01-01"), day("2024-01-03")));
    }

    #[test]
    fn start_edge_stops_at_end() {
        let (mut doc, id) = single_task_doc();
        let l = layout(&doc);
        let rect = l.glyph_rect(doc.task(&id).unwrap()).unwrap();
        let p = Pos2::new(rect.left() + 2.0, rect.center().y);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(&doc, &l, &id, p);
        assert_eq!(drag.active().unwrap().mode, DragMode::ResizeStart);

        drag.pointer_move(&mut doc, &l, p + egui::vec2(80.0, 0.0));
        assert_eq!(doc.task(&id).unwrap().start, day("2024-01-03"));

        // past the end: frame rejected, last accepted start stays
        let outcome = drag.pointer_move(&mut doc, &l, p + egui::vec2(160.0, 0.0));
        assert!(!outcome.changed());
        let task = doc.task(&id).unwrap();
        assert_eq!(task.start, day("2024-01-03"));
        assert!(task.start <= task.end);
    }

    #[test]
    fn end_edge_cannot_pass_start() {
        let (mut doc, id) = single_task_doc();
        let l = layout(&doc);
        let rect = l.glyph_rect(doc.task(&id).unwrap()).unwrap();
        let p = Pos2::new(rect.right() - 2.0, rect.center().y);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(&doc, &l, &id, p);
        assert_eq!(drag.active().unwrap().mode, DragMode::ResizeEnd);

        drag.pointer_move(&mut doc, &l, p - egui::vec2(200.0, 0.0));
        assert_eq!(doc.task(&id).unwrap().end, day("2024-01-03"));
        drag.pointer_move(&mut doc, &l, p - egui::vec2(80.0, 0.0));
        assert_eq!(doc.task(&id).unwrap().end, day("2024-01-01"));
    }

    #[test]
    fn dropping_outside_rows_only_shifts_dates() {
        let (mut doc, id) = single_task_doc();
        let l = layout(&doc);
        let p = glyph_centre(&doc, &id);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(&doc, &l, &id, p);
        let outcome = drag.pointer_move(&mut doc, &l, Pos2::new(p.x + 40.0, 5000.0));
        assert!(outcome.dates_changed);
        assert!(!outcome.reordered);
        assert_eq!(doc.slot_of(&id).unwrap().1, 0);
    }

    #[test]
    fn collapsed_rows_accept_no_drop() {
        let (mut doc, id) = single_task_doc();
        let other = doc.add_row("B");
        doc.add_task(&other, "x", day("2024-01-01")).unwrap();
        doc.toggle_row_collapsed(&other);
        let l = layout(&doc);
        let p = glyph_centre(&doc, &id);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(&doc, &l, &id, p);

        let band = l.band(&other).unwrap();
        let over_b = Pos2::new(p.x, l.rows_origin() + band.y + 5.0);
        let outcome = drag.pointer_move(&mut doc, &l, over_b);
        assert!(!outcome.reordered);
        assert_ne!(doc.task(&id).unwrap().row_id, other);
    }

    #[test]
    fn release_and_capture_loss_both_return_to_idle() {
        let (mut doc, id) = single_task_doc();
        let l = layout(&doc);
        let p = glyph_centre(&doc, &id);
        let mut drag = DragInterpreter::new();
        assert!(drag.pointer_up().is_none());

        drag.pointer_down(&doc, &l, &id, p);
        drag.pointer_move(&mut doc, &l, p + egui::vec2(40.0, 0.0));
        let ended = drag.capture_lost().unwrap();
        assert_eq!(ended.task_id, id);
        assert_eq!(drag.state(), &DragState::Idle);
        // the frame already applied is kept
        assert_eq!(doc.task(&id).unwrap().start, day("2024-01-02"));
        assert!(!drag.pointer_move(&mut doc, &l, p + egui::vec2(400.0, 0.0)).changed());
    }
}
