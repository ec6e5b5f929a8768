use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::io::{self, Autosave};
use crate::model::date::add_days;
use crate::model::{Document, TaskId, TaskMutations, TaskPatch};
use crate::timeline::{BoardLayout, DragInterpreter, LayoutMetrics};
use crate::ui;
use crate::ui::board::BoardViewState;
use crate::ui::side_panel::PanelAction;

/// Main application state.
pub struct BoardApp {
    pub document: Document,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<TaskId>,
    pub status_message: String,

    drag: DragInterpreter,
    board_view: BoardViewState,
    metrics: LayoutMetrics,
    autosave: Autosave,
    lead_days: i64,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl BoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let autosave = Autosave::new(&config.data_dir(), config.autosave_delay());
        let restored = if config.restore_last_session {
            autosave.load_current()
        } else {
            None
        };
        let status_message = match &restored {
            Some(doc) => {
                log::info!(
                    "restored board \"{}\" from {}",
                    doc.title,
                    autosave.path().display()
                );
                "Restored last session".to_string()
            }
            None => "Ready".to_string(),
        };

        Self {
            document: restored.unwrap_or_else(|| Document::seed(today())),
            file_path: None,
            selected_task: None,
            status_message,
            drag: DragInterpreter::new(),
            board_view: BoardViewState::default(),
            metrics: LayoutMetrics::default(),
            autosave,
            lead_days: config.lead_days,
        }
    }

    /// Left edge of the canvas.
    fn reference_date(&self) -> NaiveDate {
        add_days(today(), -self.lead_days)
    }

    /// Record a document change: schedule the autosave and report it.
    pub fn mark_changed(&mut self, message: impl Into<String>) {
        self.autosave.mark_dirty(Instant::now());
        self.status_message = message.into();
    }

    fn replace_document(&mut self, document: Document, file_path: Option<PathBuf>) {
        self.document = document;
        self.file_path = file_path;
        self.selected_task = None;
        self.drag = DragInterpreter::new();
        self.board_view = BoardViewState::default();
    }

    // --- File operations ---

    pub fn new_board(&mut self) {
        if !self.document.tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("New Board")
                .set_description("This will replace the current board. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }
        self.replace_document(Document::seed(today()), None);
        self.mark_changed("New board created");
    }

    pub fn open_board(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Board", &["json"])
            .pick_file()
        else {
            return;
        };
        match io::load_document(&path) {
            Ok(document) => {
                log::info!("opened {}", path.display());
                self.replace_document(document, Some(path));
                self.mark_changed("Board loaded");
            }
            Err(err) => {
                log::error!("failed to load {}: {err}", path.display());
                self.status_message = format!("Error loading: {err}");
            }
        }
    }

    pub fn save_board(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.write_board(path),
            None => self.save_board_as(),
        }
    }

    pub fn save_board_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Board", &["json"])
            .set_file_name(io::export_file_name(&self.document))
            .save_file()
        {
            self.write_board(path);
        }
    }

    fn write_board(&mut self, path: PathBuf) {
        match io::save_document(&self.document, &path) {
            Ok(()) => {
                self.status_message = format!("Saved to {}", path.display());
                self.file_path = Some(path);
            }
            Err(err) => {
                log::error!("failed to save {}: {err}", path.display());
                self.status_message = format!("Error saving: {err}");
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.document.tasks.is_empty() {
            self.status_message = "Nothing to export, the board has no tasks".to_string();
            return;
        }

        let file_name = io::export_file_name(&self.document);
        let default_name = format!("{}.csv", file_name.trim_end_matches(".gantt.json"));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        {
            match io::csv_export::export_csv(&self.document, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {count} tasks to CSV");
                }
                Err(err) => {
                    log::error!("CSV export to {} failed: {err}", path.display());
                    self.status_message = format!("CSV export failed: {err}");
                }
            }
        }
    }

    // --- Board operations ---

    pub fn add_row(&mut self) {
        self.document.add_row("New Stream");
        self.mark_changed("Row added");
    }

    fn apply_task_patch(&mut self, id: &TaskId, patch: TaskPatch) {
        let touches_dates = patch.start.is_some() || patch.end.is_some();
        if self.document.update_task(id, patch) {
            self.mark_changed("Task updated");
        } else if touches_dates {
            self.status_message = "Start date must be on or before the end date".to_string();
        }
    }

    fn apply_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::None => {}
            PanelAction::Select(id) => self.selected_task = Some(id),
            PanelAction::AddTask(row) => {
                if let Some(id) = self.document.add_task(&row, "New Task", today()) {
                    self.selected_task = Some(id);
                    self.mark_changed("Task added");
                }
            }
            PanelAction::DeleteTask(id) => {
                if self.document.delete_task(&id) {
                    self.mark_changed("Task deleted");
                }
            }
            PanelAction::RenameRow(id, patch) => {
                if self.document.update_row(&id, patch) {
                    self.mark_changed("Row renamed");
                }
            }
            PanelAction::ToggleCollapse(id) => {
                if self.document.toggle_row_collapsed(&id) {
                    self.mark_changed("Row toggled");
                }
            }
            PanelAction::DeleteRow(id) => {
                if self.document.delete_row(&id) {
                    self.mark_changed("Row deleted");
                }
            }
            PanelAction::AddTimebox(kind) => {
                let (start, end) = ui::side_panel::default_timebox_range(kind, today());
                let n = self.document.timeboxes.iter().filter(|t| t.kind == kind).count() + 1;
                let name = format!("{} {n}", kind.label());
                if self.document.add_timebox(kind, name, start, end).is_some() {
                    self.mark_changed(format!("{} added", kind.label()));
                }
            }
            PanelAction::UpdateTimebox(id, patch) => {
                let touches_dates = patch.start.is_some() || patch.end.is_some();
                if self.document.update_timebox(&id, patch) {
                    self.mark_changed("Timebox updated");
                } else if touches_dates {
                    self.status_message = "Start date must be on or before the end date".to_string();
                }
            }
            PanelAction::DeleteTimebox(id) => {
                if self.document.delete_timebox(&id) {
                    self.mark_changed("Timebox deleted");
                }
            }
        }

        // Deleting a row or a task may have taken the selection with it
        if let Some(id) = &self.selected_task {
            if self.document.task(id).is_none() {
                self.selected_task = None;
            }
        }
    }

    fn autosave_tick(&mut self, ctx: &egui::Context) {
        match self.autosave.flush_due(&self.document, Instant::now()) {
            Ok(true) => log::trace!("autosave flushed"),
            Ok(false) => {}
            Err(err) => {
                log::error!("autosave to {} failed: {err}", self.autosave.path().display());
                self.status_message = format!("Autosave failed: {err}");
            }
        }
        if self.autosave.is_dirty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_APP)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Rows: {} · Tasks: {}",
                                self.document.rows.len(),
                                self.document.tasks.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        if self.autosave.is_dirty() {
                            ui.label(
                                egui::RichText::new("unsaved changes ·")
                                    .size(10.5)
                                    .color(ui::theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S)) {
            self.save_board();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        self.show_status_bar(ctx);

        // Left panel: selected task editor + work breakdown
        let mut panel_action = PanelAction::None;
        let mut editor_patch: Option<(TaskId, TaskPatch)> = None;
        egui::SidePanel::left("work_breakdown")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(280.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_CANVAS)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(task) = self.selected_task.as_ref().and_then(|id| self.document.task(id)) {
                        if let Some(patch) = ui::task_editor::show_task_editor(task, ui) {
                            editor_patch = Some((task.id.clone(), patch));
                        }
                        ui.add_space(4.0);
                        ui.separator();
                        ui.add_space(2.0);
                    }
                    panel_action = ui::side_panel::show_work_breakdown(
                        &self.document,
                        self.selected_task.as_ref(),
                        ui,
                    );
                });
            });

        if let Some((id, patch)) = editor_patch {
            self.apply_task_patch(&id, patch);
        }
        self.apply_panel_action(panel_action);

        // Central panel: the board. Layout is derived fresh from the document every frame.
        let layout = BoardLayout::compute(&self.document, self.reference_date(), self.metrics);
        let board_frame = egui::Frame::default()
            .fill(ui::theme::BG_APP)
            .inner_margin(egui::Margin::ZERO);
        let response = egui::CentralPanel::default()
            .frame(board_frame)
            .show(ctx, |ui| {
                ui::board::show_board(
                    &mut self.document,
                    &layout,
                    &mut self.drag,
                    &mut self.board_view,
                    self.selected_task.as_ref(),
                    today(),
                    ui,
                )
            })
            .inner;

        if let Some(id) = response.clicked_task {
            self.selected_task = Some(id);
        } else if response.clicked_background {
            self.selected_task = None;
        }
        if let Some(row) = response.toggle_collapse {
            if self.document.toggle_row_collapsed(&row) {
                self.mark_changed("Row toggled");
            }
        }
        if response.outcome.changed() {
            let message = self
                .drag
                .dragged_task()
                .and_then(|id| self.document.task(id))
                .map(|task| format!("Updated '{}' ({} → {})", task.name, task.start, task.end))
                .unwrap_or_else(|| "Board updated".to_string());
            self.mark_changed(message);
        }

        self.autosave_tick(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.autosave.flush(&self.document) {
            log::error!("final autosave failed: {err}");
        }
    }
}
