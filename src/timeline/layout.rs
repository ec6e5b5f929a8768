//! Board geometry.
//!
//! [`BoardLayout::compute`] is a pure function of the document, the reference
//! date (the day at canvas x = 0) and the metrics. It is recomputed after
//! every change and never cached across mutations.
//!
//! Coordinates come in two flavours:
//! - band-relative: `RowBand::y` and `TaskSlot::y` start at the first row,
//! - canvas-relative: everything taking or returning a `Pos2`/`Rect`, which
//!   includes the timebox band and the axis header above the rows.

use std::ops::Range;

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};

use crate::model::date::diff_days;
use crate::model::{Document, RowId, Task, TaskId, Timebox};

use super::metrics::LayoutMetrics;

/// Vertical position of one task inside its row.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSlot {
    pub task_id: TaskId,
    /// Position in the row's task list.
    pub index: usize,
    /// Band-relative top of the slot.
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowBand {
    pub row_id: RowId,
    /// Band-relative top of the row.
    pub y: f32,
    pub height: f32,
    pub collapsed: bool,
    /// Empty for collapsed rows.
    pub slots: Vec<TaskSlot>,
}

impl RowBand {
    pub fn contains_y(&self, band_y: f32) -> bool {
        band_y >= self.y && band_y < self.y + self.height
    }
}

/// Horizontal extent of a dated item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub reference: NaiveDate,
    pub metrics: LayoutMetrics,
    pub rows: Vec<RowBand>,
    /// Number of day columns on the canvas.
    pub days: i64,
    pub width: f32,
    pub height: f32,
    /// Height reserved above the axis header for timeboxes (0 when hidden).
    pub top_offset: f32,
}

impl BoardLayout {
    pub fn compute(doc: &Document, reference: NaiveDate, metrics: LayoutMetrics) -> Self {
        let groups = doc.group_by_row();
        let mut rows = Vec::with_capacity(doc.rows.len());
        let mut y = 0.0;

        for row in &doc.rows {
            let top = y;
            let collapsed = doc.is_collapsed(&row.id);
            y += metrics.row_header_height;

            let mut slots = Vec::new();
            if !collapsed {
                let tasks = groups.get(&row.id).map(Vec::as_slice).unwrap_or_default();
                for (index, task) in tasks.iter().enumerate() {
                    slots.push(TaskSlot {
                        task_id: task.id.clone(),
                        index,
                        y,
                    });
                    y += metrics.task_slot_height;
                }
                y += metrics.row_footer_height;
            }

            rows.push(RowBand {
                row_id: row.id.clone(),
                y: top,
                height: y - top,
                collapsed,
                slots,
            });
            y += metrics.row_margin;
        }

        let latest = doc.latest_end().map_or(reference, |end| end.max(reference));
        let days = (diff_days(latest, reference) + metrics.future_padding_days).max(metrics.min_days);
        let top_offset = if doc.view.show_timeboxes {
            metrics.timebox_band_height
        } else {
            0.0
        };

        Self {
            reference,
            metrics,
            rows,
            days,
            width: days as f32 * metrics.pixels_per_day,
            height: (y + metrics.axis_header_height + top_offset).max(metrics.min_canvas_height),
            top_offset,
        }
    }

    /// Canvas y where band-relative y = 0.
    pub fn rows_origin(&self) -> f32 {
        self.top_offset + self.metrics.axis_header_height
    }

    pub fn band(&self, row: &RowId) -> Option<&RowBand> {
        self.rows.iter().find(|b| &b.row_id == row)
    }

    pub fn slot(&self, task: &TaskId) -> Option<(&RowBand, &TaskSlot)> {
        self.rows.iter().find_map(|band| {
            band.slots
                .iter()
                .find(|s| &s.task_id == task)
                .map(|slot| (band, slot))
        })
    }

    /// The row band under a canvas y, if any.
    pub fn row_at(&self, canvas_y: f32) -> Option<&RowBand> {
        let band_y = canvas_y - self.rows_origin();
        self.rows.iter().find(|b| b.contains_y(band_y))
    }

    /// Floor of the slot index under a canvas y within `band`, never negative.
    /// Not clamped to the row length; the caller knows what it will insert.
    pub fn slot_index_at(&self, band: &RowBand, canvas_y: f32) -> usize {
        let internal = canvas_y - self.rows_origin() - band.y - self.metrics.row_header_height;
        (internal / self.metrics.task_slot_height).floor().max(0.0) as usize
    }

    /// Horizontal extent of a date range, or `None` when it ends left of the
    /// canvas origin.
    pub fn span(&self, start: NaiveDate, end: NaiveDate) -> Option<Span> {
        let offset = diff_days(start, self.reference);
        let duration = diff_days(end, start) + 1;
        if offset + duration < 0 {
            return None;
        }
        Some(Span {
            x: offset as f32 * self.metrics.pixels_per_day,
            width: (duration as f32 * self.metrics.pixels_per_day).max(self.metrics.min_glyph_width),
        })
    }

    pub fn task_span(&self, task: &Task) -> Option<Span> {
        self.span(task.start, task.end)
    }

    pub fn timebox_span(&self, timebox: &Timebox) -> Option<Span> {
        self.span(timebox.start, timebox.end)
    }

    pub fn glyph_height(&self, task: &Task) -> f32 {
        if task.has_owner() {
            self.metrics.glyph_height_with_owner
        } else {
            self.metrics.glyph_height
        }
    }

    /// Canvas rectangle of a task glyph. `None` for culled tasks and tasks in
    /// collapsed rows.
    pub fn glyph_rect(&self, task: &Task) -> Option<Rect> {
        let span = self.task_span(task)?;
        let (_, slot) = self.slot(&task.id)?;
        let height = self.glyph_height(task);
        let top = self.rows_origin() + slot.y + (self.metrics.task_slot_height - height) / 2.0;
        Some(Rect::from_min_size(
            Pos2::new(span.x, top),
            Vec2::new(span.width, height),
        ))
    }

    /// Pointer-sensitive area of a glyph: the glyph widened by half an edge
    /// handle on both sides so the edges are easy to grab.
    pub fn hit_rect(&self, task: &Task) -> Option<Rect> {
        let rect = self.glyph_rect(task)?;
        Some(rect.expand2(Vec2::new(self.metrics.edge_handle_width / 2.0, 0.0)))
    }

    /// Day indices whose column overlaps the canvas x range `left..right`,
    /// clamped to `0..days`.
    pub fn visible_days(&self, left: f32, right: f32) -> Range<i64> {
        let ppd = self.metrics.pixels_per_day;
        let first = ((left / ppd).floor() as i64).clamp(0, self.days);
        let last = ((right / ppd).ceil() as i64).clamp(first, self.days);
        first..last
    }
}
