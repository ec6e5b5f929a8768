use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{TaskStatus, TimeboxKind};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_CANVAS: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(249, 249, 250);
pub const BG_APP: Color32 = Color32::from_rgb(244, 245, 247);
pub const BG_ROW_ODD: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 5);
pub const BG_ROW_HEADER: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 8);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(223, 225, 230);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(0, 82, 204);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(23, 43, 77);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 119, 140);
pub const TEXT_DIM: Color32 = Color32::from_rgb(151, 160, 175);
pub const TEXT_ON_GLYPH: Color32 = Color32::WHITE;
pub const TEXT_DANGER: Color32 = Color32::from_rgb(222, 53, 11);

pub const ACCENT: Color32 = Color32::from_rgb(0, 82, 204);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(235, 236, 240);
pub const MONTH_LINE: Color32 = Color32::from_rgb(200, 204, 212);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const GLYPH_ROUNDING: f32 = 6.0;
pub const SIDE_PANEL_WIDTH: f32 = 400.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_title() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_owner() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_dates() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_axis() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Status and timebox colours ───────────────────────────────────────────────

pub fn glyph_fill(status: Option<TaskStatus>, dragging: bool) -> Color32 {
    match status {
        Some(TaskStatus::Done) => Color32::from_rgb(54, 179, 126),
        Some(TaskStatus::Blocked) => Color32::from_rgb(255, 86, 48),
        Some(TaskStatus::InProgress) => Color32::from_rgb(255, 171, 0),
        Some(TaskStatus::Todo) | None if dragging => Color32::from_rgb(0, 82, 204),
        Some(TaskStatus::Todo) | None => Color32::from_rgb(59, 130, 246),
    }
}

/// (fill, stroke, text)
pub fn timebox_colors(kind: TimeboxKind) -> (Color32, Color32, Color32) {
    match kind {
        TimeboxKind::Sprint => (
            Color32::from_rgb(227, 242, 253),
            Color32::from_rgb(33, 150, 243),
            Color32::from_rgb(21, 101, 192),
        ),
        TimeboxKind::Pi => (
            Color32::from_rgb(243, 229, 245),
            Color32::from_rgb(156, 39, 176),
            Color32::from_rgb(106, 27, 154),
        ),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CANVAS;
    visuals.extreme_bg_color = BG_CANVAS;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.rounding = Rounding::same(3.0);
    visuals.widgets.inactive.rounding = Rounding::same(3.0);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.rounding = Rounding::same(3.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.rounding = Rounding::same(3.0);

    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(6.0);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
