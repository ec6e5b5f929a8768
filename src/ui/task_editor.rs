use egui::{RichText, Ui};

use crate::model::date::format_date;
use crate::model::{Task, TaskPatch, TaskStatus};
use crate::ui::theme;

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Empty or whitespace-only input clears the field.
fn optional_text(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Render an inline editor for the selected task.
///
/// The task is edited as a scratch copy; the returned patch holds only the
/// fields the user touched this frame. Whether it is accepted is up to
/// [`crate::model::Document::update_task`].
pub fn show_task_editor(task: &Task, ui: &mut Ui) -> Option<TaskPatch> {
    let mut patch = TaskPatch::default();

    ui.add_space(6.0);
    ui.label(
        RichText::new("Edit Task")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_CANVAS,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        let id = task.id.as_str();

        // ── Name ────────────────────────────────────────────────────
        field_label(ui, "Name");
        let mut name = task.name.clone();
        if ui
            .add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut name).font(egui::FontId::proportional(12.0)),
            )
            .changed()
        {
            patch.name = Some(name);
        }

        // ── Owner ───────────────────────────────────────────────────
        field_label(ui, "Owner");
        let mut owner = task.owner.clone().unwrap_or_default();
        if ui
            .add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut owner).hint_text("Unassigned"),
            )
            .changed()
        {
            patch.owner = Some(optional_text(&owner));
        }

        // ── Status ──────────────────────────────────────────────────
        field_label(ui, "Status");
        let mut status = task.status;
        let current = status.map(|s| s.label()).unwrap_or("No status");
        egui::ComboBox::from_id_salt(("status_combo", id))
            .selected_text(RichText::new(current).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut status, None, "No status");
                for s in TaskStatus::all() {
                    ui.selectable_value(&mut status, Some(*s), s.label());
                }
            });
        if status != task.status {
            patch.status = Some(status);
        }

        // ── Link ────────────────────────────────────────────────────
        field_label(ui, "Link");
        let mut link = task.link.clone().unwrap_or_default();
        ui.horizontal(|ui| {
            let open_width = if task.has_link() { 28.0 } else { 0.0 };
            if ui
                .add_sized(
                    [ui.available_width() - open_width, 24.0],
                    egui::TextEdit::singleline(&mut link).hint_text("https://"),
                )
                .changed()
            {
                patch.link = Some(optional_text(&link));
            }
            if let Some(url) = task.link.as_deref().filter(|_| task.has_link()) {
                if ui
                    .button(egui_phosphor::regular::ARROW_SQUARE_OUT)
                    .on_hover_text("Open link")
                    .clicked()
                {
                    if let Err(err) = open::that(url) {
                        log::error!("could not open link `{url}`: {err}");
                    }
                }
            }
        });

        // ── Progress ────────────────────────────────────────────────
        field_label(ui, "Progress");
        let mut progress = task.progress.unwrap_or(0.0);
        if ui
            .add(egui::Slider::new(&mut progress, 0.0..=100.0).suffix("%").integer())
            .changed()
        {
            patch.progress = Some(Some(progress));
        }

        // ── Dates ───────────────────────────────────────────────────
        let mut start = task.start;
        let mut end = task.end;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                field_label(ui, "Start");
                ui.add(egui_extras::DatePickerButton::new(&mut start).id_salt(&format!("dp_start_{id}")));
            });
            ui.add_space(12.0);
            ui.vertical(|ui| {
                field_label(ui, "End");
                ui.add(egui_extras::DatePickerButton::new(&mut end).id_salt(&format!("dp_end_{id}")));
            });
        });
        if start != task.start {
            patch.start = Some(start);
        }
        if end != task.end {
            patch.end = Some(end);
        }
        ui.label(
            RichText::new(format!(
                "{} → {}  ({} days)",
                format_date(task.start),
                format_date(task.end),
                task.duration_days()
            ))
            .size(10.0)
            .color(theme::TEXT_SECONDARY),
        );
    });

    (patch != TaskPatch::default()).then_some(patch)
}
