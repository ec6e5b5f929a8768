//! The drawing surface. Paints the board from the document and the current
//! layout, and feeds pointer events on task glyphs into the drag interpreter.
//! Apart from the hovered task it keeps nothing between frames.

use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, CursorIcon, Painter, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::date::{add_days, format_short};
use crate::model::{Document, RowId, Task, TaskId};
use crate::timeline::{BoardLayout, DragInterpreter, DragMode, DragOutcome};
use crate::ui::theme;

const COLLAPSE_TOGGLE_SIZE: f32 = 20.0;

/// Rendering-only state that survives between frames.
#[derive(Debug, Default)]
pub struct BoardViewState {
    pub hovered: Option<TaskId>,
}

/// What the host has to act on after a frame.
#[derive(Debug, Default)]
pub struct BoardResponse {
    /// A drag frame mutated the document.
    pub outcome: DragOutcome,
    /// A gesture ended this frame.
    pub drag_ended: bool,
    pub clicked_task: Option<TaskId>,
    pub toggle_collapse: Option<RowId>,
    pub clicked_background: bool,
}

pub fn show_board(
    doc: &mut Document,
    layout: &BoardLayout,
    drag: &mut DragInterpreter,
    view: &mut BoardViewState,
    selected: Option<&TaskId>,
    today: NaiveDate,
    ui: &mut Ui,
) -> BoardResponse {
    let mut result = BoardResponse::default();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(layout.width, layout.height), Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_CANVAS);
            draw_row_bands(&painter, origin, layout);
            draw_day_grid(&painter, origin, layout);
            if doc.view.show_timeboxes {
                draw_timeboxes(&painter, origin, layout, doc);
            }
            draw_today_line(&painter, origin, layout, today);

            for band in &layout.rows {
                let Some(row) = doc.row(&band.row_id) else {
                    continue;
                };
                let toggle_rect = Rect::from_min_size(
                    origin + Vec2::new(6.0, layout.rows_origin() + band.y + 10.0),
                    Vec2::splat(COLLAPSE_TOGGLE_SIZE),
                );
                let toggle = ui.interact(
                    toggle_rect,
                    ui.make_persistent_id(("row-collapse", &band.row_id)),
                    Sense::click(),
                );
                if toggle.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                }
                if toggle.clicked() {
                    result.toggle_collapse = Some(band.row_id.clone());
                }
                let count = doc.tasks_in_row(&band.row_id).count();
                draw_row_header(&painter, origin, layout, band.y, &row.name, count, band.collapsed);
            }

            let mut hovered = None;
            for task in &doc.tasks {
                let (Some(glyph), Some(hit)) = (layout.glyph_rect(task), layout.hit_rect(task)) else {
                    continue;
                };
                let offset = origin.to_vec2();
                let is_dragged = drag.dragged_task() == Some(&task.id);
                let is_hovered = view.hovered.as_ref() == Some(&task.id);
                let is_selected = selected == Some(&task.id);
                draw_glyph(
                    &painter,
                    glyph.translate(offset),
                    task,
                    is_dragged,
                    is_hovered,
                    is_selected,
                );

                let response = ui.interact(
                    hit.translate(offset),
                    ui.make_persistent_id(("task-glyph", &task.id)),
                    Sense::click_and_drag(),
                );

                if response.hovered() {
                    hovered = Some(task.id.clone());
                    if !drag.is_dragging() {
                        let mode = response.hover_pos().map(|p| {
                            DragMode::classify(
                                p.x - origin.x - glyph.left(),
                                glyph.width(),
                                layout.metrics.edge_handle_width,
                            )
                        });
                        ui.ctx().set_cursor_icon(match mode {
                            Some(DragMode::Move) | None => CursorIcon::Grab,
                            Some(_) => CursorIcon::ResizeHorizontal,
                        });
                    }
                }

                if response.drag_started() {
                    let pressed_at = ui
                        .input(|i| i.pointer.press_origin())
                        .or_else(|| response.interact_pointer_pos());
                    if let Some(p) = pressed_at {
                        drag.pointer_down(&*doc, layout, &task.id, (p - origin).to_pos2());
                    }
                    result.clicked_task = Some(task.id.clone());
                }
                if response.clicked() {
                    result.clicked_task = Some(task.id.clone());
                }
                if response.double_clicked() {
                    if let Some(link) = task.link.as_deref().filter(|l| !l.trim().is_empty()) {
                        if let Err(err) = open::that(link) {
                            log::error!("could not open link `{link}`: {err}");
                        }
                    }
                }
                if response.drag_stopped() && drag.dragged_task() == Some(&task.id) {
                    result.drag_ended = drag.pointer_up().is_some();
                }
            }
            view.hovered = hovered;

            if let Some(active) = drag.active() {
                ui.ctx().set_cursor_icon(match active.mode {
                    DragMode::Move => CursorIcon::Grabbing,
                    DragMode::ResizeStart | DragMode::ResizeEnd => CursorIcon::ResizeHorizontal,
                });
                let held = ui.ctx().dragged_id().is_some() && ui.input(|i| i.pointer.primary_down());
                if held {
                    if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
                        result.outcome = drag.pointer_move(doc, layout, (pos - origin).to_pos2());
                    }
                } else {
                    result.drag_ended = drag.capture_lost().is_some();
                }
            }

            if response.clicked() && result.clicked_task.is_none() && result.toggle_collapse.is_none() {
                result.clicked_background = true;
            }
        });

    if result.outcome.changed() || result.drag_ended {
        ui.ctx().request_repaint();
    }
    result
}

fn draw_row_bands(painter: &Painter, origin: Pos2, layout: &BoardLayout) {
    for (i, band) in layout.rows.iter().enumerate() {
        let top = origin.y + layout.rows_origin() + band.y;
        let rect = Rect::from_min_size(
            Pos2::new(origin.x, top),
            Vec2::new(layout.width, band.height),
        );
        if i % 2 == 1 {
            painter.rect_filled(rect, 0.0, theme::BG_ROW_ODD);
        }
        let header = Rect::from_min_size(
            rect.min,
            Vec2::new(layout.width, layout.metrics.row_header_height),
        );
        painter.rect_filled(header, 0.0, theme::BG_ROW_HEADER);
        painter.line_segment(
            [Pos2::new(rect.left(), rect.bottom()), Pos2::new(rect.right(), rect.bottom())],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_row_header(
    painter: &Painter,
    origin: Pos2,
    layout: &BoardLayout,
    band_y: f32,
    name: &str,
    task_count: usize,
    collapsed: bool,
) {
    let centre_y = origin.y + layout.rows_origin() + band_y + layout.metrics.row_header_height / 2.0;
    let caret = if collapsed {
        egui_phosphor::regular::CARET_RIGHT
    } else {
        egui_phosphor::regular::CARET_DOWN
    };
    painter.text(
        Pos2::new(origin.x + 16.0, centre_y),
        Align2::CENTER_CENTER,
        caret,
        theme::font_title(),
        theme::TEXT_SECONDARY,
    );
    let name_rect = painter.text(
        Pos2::new(origin.x + 32.0, centre_y),
        Align2::LEFT_CENTER,
        name,
        theme::font_title(),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        Pos2::new(name_rect.right() + 8.0, centre_y),
        Align2::LEFT_CENTER,
        format!("({task_count})"),
        theme::font_small(),
        theme::TEXT_DIM,
    );
}

fn draw_day_grid(painter: &Painter, origin: Pos2, layout: &BoardLayout) {
    let top = origin.y + layout.top_offset;
    let bottom = origin.y + layout.height;
    let ppd = layout.metrics.pixels_per_day;
    let clip = painter.clip_rect();
    let visible = layout.visible_days(clip.left() - origin.x, clip.right() - origin.x);
    let first = visible.start;

    for day in visible {
        let date = add_days(layout.reference, day);
        let x = origin.x + day as f32 * ppd;
        let month_start = date.day() == 1;
        painter.line_segment(
            [Pos2::new(x, top), Pos2::new(x, bottom)],
            Stroke::new(
                if month_start { 1.0 } else { 0.5 },
                if month_start { theme::MONTH_LINE } else { theme::GRID_LINE },
            ),
        );
        // the leftmost visible column always carries a month label
        if month_start || day == first {
            painter.text(
                Pos2::new(x + 3.0, top + layout.metrics.axis_header_height / 2.0),
                Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_small(),
                theme::TEXT_SECONDARY,
            );
        }
        // day numbers sit at the bottom of each row header
        let weekday = date.weekday().num_days_from_monday();
        let color = if weekday >= 5 { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
        for band in &layout.rows {
            painter.text(
                Pos2::new(
                    x + ppd / 2.0,
                    origin.y + layout.rows_origin() + band.y + layout.metrics.row_header_height - 6.0,
                ),
                Align2::CENTER_BOTTOM,
                date.format("%d").to_string(),
                theme::font_axis(),
                color,
            );
        }
    }
}

fn draw_timeboxes(painter: &Painter, origin: Pos2, layout: &BoardLayout, doc: &Document) {
    let height = layout.metrics.timebox_band_height;
    for timebox in &doc.timeboxes {
        let Some(span) = layout.timebox_span(timebox) else {
            continue;
        };
        let (fill, stroke, text) = theme::timebox_colors(timebox.kind);
        let rect = Rect::from_min_size(origin + Vec2::new(span.x, 0.0), Vec2::new(span.width, height));
        painter.rect_filled(rect, 0.0, fill);
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, stroke));
        painter.with_clip_rect(rect).text(
            Pos2::new(rect.left() + 5.0, rect.center().y),
            Align2::LEFT_CENTER,
            &timebox.name,
            theme::font_dates(),
            text,
        );
    }
}

fn draw_today_line(painter: &Painter, origin: Pos2, layout: &BoardLayout, today: NaiveDate) {
    let x = origin.x + layout.metrics.date_to_x(today, layout.reference) + layout.metrics.pixels_per_day / 2.0;
    if x < origin.x {
        return;
    }
    painter.line_segment(
        [
            Pos2::new(x, origin.y + layout.top_offset),
            Pos2::new(x, origin.y + layout.height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_glyph(
    painter: &Painter,
    rect: Rect,
    task: &Task,
    is_dragged: bool,
    is_hovered: bool,
    is_selected: bool,
) {
    let rounding = Rounding::same(theme::GLYPH_ROUNDING);

    // Soft shadow
    painter.rect_filled(rect.translate(Vec2::new(0.0, 2.0)), rounding, Color32::from_black_alpha(25));

    let mut fill = theme::glyph_fill(task.status, is_dragged);
    if is_dragged {
        fill = fill.gamma_multiply(0.9);
    }
    painter.rect_filled(rect, rounding, fill);

    // Progress strip along the bottom edge
    if let Some(progress) = task.progress.filter(|p| *p > 0.0) {
        let strip = Rect::from_min_size(
            Pos2::new(rect.left(), rect.bottom() - 4.0),
            Vec2::new(rect.width() * (progress / 100.0).clamp(0.0, 1.0), 4.0),
        );
        painter.rect_filled(strip, Rounding::same(2.0), Color32::from_white_alpha(120));
    }

    if is_selected {
        painter.rect_stroke(rect.expand(1.5), Rounding::same(theme::GLYPH_ROUNDING + 1.5), Stroke::new(2.0, theme::BORDER_ACCENT));
    } else if is_hovered {
        painter.rect_stroke(rect, rounding, Stroke::new(1.0, Color32::from_black_alpha(60)));
    }

    let clipped = painter.with_clip_rect(rect);
    let left = rect.left() + 10.0;
    clipped.text(
        Pos2::new(left, rect.top() + 18.0),
        Align2::LEFT_CENTER,
        &task.name,
        theme::font_title(),
        theme::TEXT_ON_GLYPH,
    );
    let dates_y = if task.has_owner() {
        if let Some(owner) = &task.owner {
            clipped.text(
                Pos2::new(left, rect.top() + 40.0),
                Align2::LEFT_CENTER,
                owner,
                theme::font_owner(),
                Color32::from_white_alpha(230),
            );
        }
        rect.top() + 64.0
    } else {
        rect.top() + 42.0
    };
    clipped.text(
        Pos2::new(left, dates_y),
        Align2::LEFT_CENTER,
        format!("{} → {}", format_short(task.start), format_short(task.end)),
        theme::font_dates(),
        Color32::from_white_alpha(205),
    );
    if task.has_link() && rect.width() > 40.0 {
        clipped.text(
            Pos2::new(rect.right() - 14.0, rect.top() + 16.0),
            Align2::CENTER_CENTER,
            egui_phosphor::regular::LINK,
            theme::font_title(),
            Color32::from_white_alpha(205),
        );
    }

    // Edge handle affordance
    if is_hovered || is_dragged {
        let handle_h = rect.height() * 0.4;
        let handle_y = rect.center().y - handle_h / 2.0;
        for x in [rect.left() + 2.0, rect.right() - 5.0] {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(3.0, handle_h)),
                Rounding::same(1.5),
                Color32::from_white_alpha(160),
            );
        }
    }
}
