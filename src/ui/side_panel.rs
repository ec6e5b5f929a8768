use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};

use crate::model::date::{add_days, format_date};
use crate::model::{Document, RowId, RowPatch, TaskId, TimeboxId, TimeboxKind, TimeboxPatch};
use crate::ui::theme;

/// Actions the work breakdown panel can request.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    None,
    Select(TaskId),
    AddTask(RowId),
    DeleteTask(TaskId),
    RenameRow(RowId, RowPatch),
    ToggleCollapse(RowId),
    DeleteRow(RowId),
    AddTimebox(TimeboxKind),
    UpdateTimebox(TimeboxId, TimeboxPatch),
    DeleteTimebox(TimeboxId),
}

/// Default span of a freshly added timebox: two-week sprints, ten-week PIs.
pub fn default_timebox_range(kind: TimeboxKind, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days = match kind {
        TimeboxKind::Sprint => 13,
        TimeboxKind::Pi => 69,
    };
    (today, add_days(today, days))
}

fn danger_button(ui: &mut Ui, text: &str) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(text).color(theme::TEXT_DANGER).size(11.0))
            .frame(false),
    )
}

/// Render the "Work Breakdown" list: every row with its tasks, then the
/// timebox list.
pub fn show_work_breakdown(doc: &Document, selected: Option<&TaskId>, ui: &mut Ui) -> PanelAction {
    let mut action = PanelAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Work Breakdown")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({} rows)", doc.rows.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(6.0);

    let grouped = doc.group_by_row();
    for row in &doc.rows {
        let collapsed = doc.is_collapsed(&row.id);
        let frame = egui::Frame::default()
            .fill(theme::BG_PANEL)
            .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
            .rounding(egui::Rounding::same(4.0))
            .inner_margin(egui::Margin::same(6.0));

        frame.show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let caret = if collapsed {
                    egui_phosphor::regular::CARET_RIGHT
                } else {
                    egui_phosphor::regular::CARET_DOWN
                };
                if ui.add(egui::Button::new(caret).frame(false)).clicked() {
                    action = PanelAction::ToggleCollapse(row.id.clone());
                }
                let mut name = row.name.clone();
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut name)
                        .font(egui::FontId::proportional(12.5))
                        .desired_width(ui.available_width() - 60.0),
                );
                if edit.changed() {
                    action = PanelAction::RenameRow(row.id.clone(), RowPatch { name: Some(name) });
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if danger_button(ui, "Delete").clicked() {
                        action = PanelAction::DeleteRow(row.id.clone());
                    }
                });
            });

            if collapsed {
                return;
            }
            ui.add_space(2.0);

            for task in grouped.get(&row.id).into_iter().flatten() {
                let is_selected = selected == Some(&task.id);
                ui.horizontal(|ui| {
                    ui.add_space(18.0);
                    let label = ui.selectable_label(
                        is_selected,
                        RichText::new(&task.name).size(12.0),
                    );
                    if label.clicked() {
                        action = PanelAction::Select(task.id.clone());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if danger_button(ui, egui_phosphor::regular::X).clicked() {
                            action = PanelAction::DeleteTask(task.id.clone());
                        }
                        ui.label(
                            RichText::new(format!(
                                "{} -> {}",
                                format_date(task.start),
                                format_date(task.end)
                            ))
                            .size(10.5)
                            .color(theme::TEXT_SECONDARY),
                        );
                    });
                });
            }

            ui.add_space(2.0);
            if ui
                .add_sized(
                    [ui.available_width(), 22.0],
                    egui::Button::new(RichText::new("+ Add Task").size(11.0)),
                )
                .clicked()
            {
                action = PanelAction::AddTask(row.id.clone());
            }
        });
        ui.add_space(6.0);
    }

    ui.add_space(4.0);
    ui.separator();
    if let Some(timebox_action) = show_timeboxes(doc, ui) {
        action = timebox_action;
    }

    action
}

fn show_timeboxes(doc: &Document, ui: &mut Ui) -> Option<PanelAction> {
    let mut action = None;

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Timeboxes")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for kind in [TimeboxKind::Pi, TimeboxKind::Sprint] {
                let btn = egui::Button::new(
                    RichText::new(format!("+ {}", kind.label()))
                        .color(Color32::WHITE)
                        .size(11.0),
                )
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
                if ui.add(btn).clicked() {
                    action = Some(PanelAction::AddTimebox(kind));
                }
            }
        });
    });
    ui.add_space(4.0);

    if doc.timeboxes.is_empty() {
        ui.label(
            RichText::new("No sprints or PIs yet")
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        return action;
    }

    for timebox in &doc.timeboxes {
        let (_, stroke, _) = theme::timebox_colors(timebox.kind);
        ui.horizontal(|ui| {
            ui.label(RichText::new(timebox.kind.label()).size(10.0).color(stroke).strong());
            let mut name = timebox.name.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(90.0))
                .changed()
            {
                action = Some(PanelAction::UpdateTimebox(
                    timebox.id.clone(),
                    TimeboxPatch {
                        name: Some(name),
                        ..Default::default()
                    },
                ));
            }

            let mut start = timebox.start;
            let mut end = timebox.end;
            ui.add(
                egui_extras::DatePickerButton::new(&mut start)
                    .id_salt(&format!("tb_start_{}", timebox.id)),
            );
            ui.add(
                egui_extras::DatePickerButton::new(&mut end)
                    .id_salt(&format!("tb_end_{}", timebox.id)),
            );
            if start != timebox.start || end != timebox.end {
                action = Some(PanelAction::UpdateTimebox(
                    timebox.id.clone(),
                    TimeboxPatch {
                        start: (start != timebox.start).then_some(start),
                        end: (end != timebox.end).then_some(end),
                        ..Default::default()
                    },
                ));
            }

            if danger_button(ui, egui_phosphor::regular::TRASH).clicked() {
                action = Some(PanelAction::DeleteTimebox(timebox.id.clone()));
            }
        });
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::parse_date;

    #[test]
    fn new_timeboxes_span_whole_sprints() {
        let today = parse_date("2024-01-01").unwrap();
        let (start, end) = default_timebox_range(TimeboxKind::Sprint, today);
        assert_eq!((start, end), (today, parse_date("2024-01-14").unwrap()));
        let (_, pi_end) = default_timebox_range(TimeboxKind::Pi, today);
        assert_eq!(pi_end, parse_date("2024-03-10").unwrap());
    }
}
