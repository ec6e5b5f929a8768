use egui::{menu, RichText, Ui};

use crate::app::BoardApp;
use crate::model::Zoom;
use crate::ui::theme;

/// Render the top toolbar: file menu, board title and view controls.
pub fn show_toolbar(app: &mut BoardApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").size(13.0), |ui| {
            if ui.button("  New Board").clicked() {
                app.new_board();
                ui.close_menu();
            }
            if ui.button("  Open JSON...").clicked() {
                app.open_board();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save JSON      Ctrl+S").clicked() {
                app.save_board();
                ui.close_menu();
            }
            if ui.button("  Save JSON As...").clicked() {
                app.save_board_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.separator();

        let mut title = app.document.title.clone();
        let edit = ui.add(
            egui::TextEdit::singleline(&mut title)
                .font(egui::FontId::proportional(15.0))
                .hint_text("Project Title")
                .frame(false)
                .desired_width(260.0),
        );
        if edit.changed() {
            app.document.set_title(title);
            app.mark_changed("Title updated");
        }

        ui.separator();

        if ui
            .button(format!("{}  Add Row", egui_phosphor::regular::PLUS))
            .clicked()
        {
            app.add_row();
        }

        let mut show = app.document.view.show_timeboxes;
        if ui.checkbox(&mut show, "Timeboxes").changed() {
            app.document.set_show_timeboxes(show);
            app.mark_changed(if show { "Timeboxes shown" } else { "Timeboxes hidden" });
        }

        let mut zoom = app.document.view.zoom;
        egui::ComboBox::from_id_salt("zoom_combo")
            .selected_text(zoom.label())
            .width(80.0)
            .show_ui(ui, |ui| {
                for z in Zoom::all() {
                    ui.selectable_value(&mut zoom, *z, z.label());
                }
            });
        if zoom != app.document.view.zoom {
            app.document.set_zoom(zoom);
            app.mark_changed(format!("Zoom set to {}", zoom.label()));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let file = match &app.file_path {
                Some(path) => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                None => "(unsaved)".to_string(),
            };
            ui.label(RichText::new(file).size(11.0).color(theme::TEXT_DIM));
        });
    });
}
