//! End-to-end gestures against a real document and layout.
//!
//! Geometry with the default metrics and timeboxes shown: rows start at canvas
//! y = 40, a row header is 40 px, a task slot 110 px, a day 40 px. A task
//! without an owner is a 65 px glyph centred in its slot.

use chrono::NaiveDate;
use egui::Pos2;

use swimlane_board::model::date::{diff_days, parse_date};
use swimlane_board::model::{Document, RowId, TaskId, TaskMutations, TaskPatch};
use swimlane_board::timeline::{BoardLayout, DragInterpreter, DragMode, LayoutMetrics};

fn day(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn reference() -> NaiveDate {
    day("2024-01-01")
}

fn layout(doc: &Document) -> BoardLayout {
    BoardLayout::compute(doc, reference(), LayoutMetrics::default())
}

fn task_ids(doc: &Document, row: &RowId) -> Vec<TaskId> {
    doc.tasks_in_row(row).map(|t| t.id.clone()).collect()
}

/// Rows `[A, B]`, task `T` in `A` spanning 2024-01-01..=2024-01-03.
fn scenario() -> (Document, RowId, RowId, TaskId) {
    let mut doc = Document::default();
    let a = doc.add_row("A");
    let b = doc.add_row("B");
    let t = doc.add_task(&a, "T", day("2024-01-01")).unwrap();
    assert!(doc.update_task(&t, TaskPatch::end(day("2024-01-03"))));
    (doc, a, b, t)
}

/// Press at `from`, move through `path`, release. The layout is recomputed
/// before every move, the way the app does once per frame.
fn gesture(doc: &mut Document, task: &TaskId, from: Pos2, path: &[Pos2]) -> Option<DragMode> {
    let mut drag = DragInterpreter::new();
    let l = layout(doc);
    assert!(drag.pointer_down(&*doc, &l, task, from));
    let mode = drag.active().map(|d| d.mode);
    for &p in path {
        let l = layout(doc);
        drag.pointer_move(doc, &l, p);
    }
    assert!(drag.pointer_up().is_some());
    assert!(!drag.is_dragging());
    mode
}

#[test]
fn resizing_the_right_edge_by_two_days_moves_the_end() {
    let (mut doc, _, _, t) = scenario();
    // glyph spans x 0..120; x = 115 is inside the right handle
    let mode = gesture(&mut doc, &t, Pos2::new(115.0, 130.0), &[Pos2::new(195.0, 130.0)]);
    assert_eq!(mode, Some(DragMode::ResizeEnd));
    let task = doc.task(&t).unwrap();
    assert_eq!(task.start, day("2024-01-01"));
    assert_eq!(task.end, day("2024-01-05"));
}

#[test]
fn moving_the_body_by_five_days_shifts_both_dates() {
    let (mut doc, a, _, t) = scenario();
    let mode = gesture(
        &mut doc,
        &t,
        Pos2::new(60.0, 130.0),
        &[Pos2::new(140.0, 130.0), Pos2::new(260.0, 130.0)],
    );
    assert_eq!(mode, Some(DragMode::Move));
    let task = doc.task(&t).unwrap();
    assert_eq!(task.start, day("2024-01-06"));
    assert_eq!(task.end, day("2024-01-08"));
    assert_eq!(task.row_id, a);
}

#[test]
fn dragging_into_another_row_drops_at_its_first_slot() {
    let (mut doc, a, b, t) = scenario();
    // row B's band starts at 40 + 200; its first slot begins 40 px lower
    gesture(&mut doc, &t, Pos2::new(60.0, 130.0), &[Pos2::new(60.0, 285.0)]);
    let task = doc.task(&t).unwrap();
    assert_eq!(task.row_id, b);
    assert_eq!(task_ids(&doc, &b).first(), Some(&t));
    assert!(task_ids(&doc, &a).is_empty());
    // horizontal position did not change
    assert_eq!(task.start, day("2024-01-01"));
}

#[test]
fn reordering_within_a_row_swaps_the_pair() {
    let mut doc = Document::default();
    let a = doc.add_row("A");
    let t1 = doc.add_task(&a, "T1", day("2024-01-01")).unwrap();
    let t2 = doc.add_task(&a, "T2", day("2024-01-01")).unwrap();

    // T2 sits in slot 1 (band y 150..260); drag it up into slot 0
    gesture(&mut doc, &t2, Pos2::new(20.0, 230.0), &[Pos2::new(20.0, 130.0)]);

    assert_eq!(task_ids(&doc, &a), vec![t2.clone(), t1.clone()]);
    assert_eq!(doc.task(&t1).unwrap().row_id, a);
}

#[test]
fn start_edge_never_passes_the_end() {
    let (mut doc, _, _, t) = scenario();
    // grab the left handle and sweep far to the right, then back a little
    gesture(
        &mut doc,
        &t,
        Pos2::new(4.0, 130.0),
        &[
            Pos2::new(84.0, 130.0),
            Pos2::new(400.0, 130.0),
            Pos2::new(2000.0, 130.0),
        ],
    );
    let task = doc.task(&t).unwrap();
    assert!(diff_days(task.end, task.start) >= 0);
    // the furthest accepted frame was +2 days, which lands on the end date
    assert_eq!(task.start, task.end);
    assert_eq!(task.end, day("2024-01-03"));
}

#[test]
fn body_drag_preserves_duration_for_any_whole_day_offset() {
    for k in [-10_i64, -1, 0, 1, 3, 17, 60] {
        let (mut doc, _, _, t) = scenario();
        let from = Pos2::new(60.0, 130.0);
        let to = Pos2::new(60.0 + k as f32 * 40.0, 130.0);
        gesture(&mut doc, &t, from, &[to]);
        let task = doc.task(&t).unwrap();
        assert_eq!(diff_days(task.start, day("2024-01-01")), k, "offset {k}");
        assert_eq!(diff_days(task.end, task.start), 2, "offset {k}");
    }
}

#[test]
fn reorder_places_the_task_once_at_the_clamped_index() {
    let mut doc = Document::default();
    let a = doc.add_row("A");
    let b = doc.add_row("B");
    let moving = doc.add_task(&a, "moving", day("2024-01-01")).unwrap();
    let b_tasks: Vec<TaskId> = (0..3)
        .map(|i| doc.add_task(&b, format!("b{i}"), day("2024-01-01")).unwrap())
        .collect();

    assert!(doc.reorder_task(&moving, &b, 1));
    let ids = task_ids(&doc, &b);
    assert_eq!(ids[1], moving);
    assert_eq!(ids.iter().filter(|id| **id == moving).count(), 1);
    assert!(task_ids(&doc, &a).is_empty());

    // an index past the end lands last
    assert!(doc.reorder_task(&moving, &a, 99));
    assert_eq!(task_ids(&doc, &a), vec![moving.clone()]);
    assert_eq!(task_ids(&doc, &b), b_tasks);
}

#[test]
fn deleting_a_row_removes_exactly_its_tasks() {
    let (mut doc, a, b, t) = scenario();
    let other = doc.add_task(&b, "kept", day("2024-02-01")).unwrap();
    assert!(doc.delete_row(&a));
    assert!(doc.task(&t).is_none());
    assert!(doc.task(&other).is_some());
    assert_eq!(doc.tasks.len(), 1);
    assert!(doc.row(&a).is_none());
}

#[test]
fn layout_is_a_pure_function_of_the_document() {
    let (doc, _, _, _) = scenario();
    let first = layout(&doc);
    let second = layout(&doc);
    assert_eq!(first, second);
}

#[test]
fn gesture_on_collapsed_row_target_does_not_reorder() {
    let (mut doc, a, b, t) = scenario();
    let _filler = doc.add_task(&b, "filler", day("2024-01-01")).unwrap();
    assert!(doc.toggle_row_collapsed(&b));
    // B is header-only now: band y 200..240, canvas 240..280
    gesture(&mut doc, &t, Pos2::new(60.0, 130.0), &[Pos2::new(60.0, 260.0)]);
    assert_eq!(doc.task(&t).unwrap().row_id, a);
}
