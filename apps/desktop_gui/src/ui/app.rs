use std::time::{Duration, Instant};

use client_core::{ConversionController, Notice, Settings, WorkflowStatus};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::{apply_ui_event, start_export, start_generation},
};
use crate::ui::host::{ArboardClipboard, DialogFileSaver, ToastNotifier, Toasts};

const URL_HINT: &str = "https://www.youtube.com/watch?v=...";

pub struct LectureNotesApp {
    controller: ConversionController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    toasts: Toasts,
    backend_status: Option<String>,
}

impl LectureNotesApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let toasts = Toasts::default();
        let controller = ConversionController::new(
            Box::new(ToastNotifier(toasts.clone())),
            Box::new(ArboardClipboard::default()),
            Box::new(DialogFileSaver::new(settings.output_dir.clone())),
        )
        .with_export_filename(settings.export_filename.clone());

        Self {
            controller,
            cmd_tx,
            ui_rx,
            toasts,
            backend_status: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(reason) = apply_ui_event(&mut self.controller, event) {
                self.backend_status = Some(reason);
            }
        }
    }

    fn convert(&mut self) {
        if let Some(request) = self.controller.submit() {
            start_generation(&mut self.controller, &self.cmd_tx, request);
        }
    }

    fn export(&mut self) {
        if let Some(request) = self.controller.request_export() {
            start_export(&mut self.controller, &self.cmd_tx, request);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("LectureLM");
                ui.label("YouTube Lectures to Notes");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("New session").clicked() {
                        self.controller.reset();
                    }
                });
            });
            if let Some(status) = &self.backend_status {
                ui.colored_label(ui.visuals().error_fg_color, status);
            }
            ui.add_space(6.0);
        });
    }

    fn show_convert_card(&mut self, ui: &mut egui::Ui) {
        let can_submit = self.controller.can_submit();

        ui.group(|ui| {
            ui.label(egui::RichText::new("Convert Video").strong().size(18.0));
            ui.label("Paste a YouTube URL to generate revision notes");
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let mut url = self.controller.video_url().to_string();
                let input = ui.add_enabled(
                    can_submit,
                    egui::TextEdit::singleline(&mut url)
                        .hint_text(URL_HINT)
                        .desired_width(ui.available_width() - 140.0),
                );
                if input.changed() {
                    self.controller.set_video_url(url);
                }
                let submitted_with_enter =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let label = if can_submit { "Convert" } else { "Converting..." };
                let clicked = ui
                    .add_enabled(can_submit, egui::Button::new(label))
                    .clicked();
                if !can_submit {
                    ui.spinner();
                }
                if clicked || (submitted_with_enter && can_submit) {
                    self.convert();
                }
            });
        });
    }

    fn show_notes_card(&mut self, ui: &mut egui::Ui) {
        if !self.controller.has_notes() {
            return;
        }

        ui.add_space(16.0);
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Your Notes").strong().size(18.0));
                    ui.label("Edit your notes below or download as PDF");
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let pdf_label = if self.controller.is_exporting() {
                        "Exporting..."
                    } else {
                        "PDF"
                    };
                    if ui
                        .add_enabled(self.controller.can_export(), egui::Button::new(pdf_label))
                        .clicked()
                    {
                        self.export();
                    }
                    if ui.button("Copy").clicked() {
                        self.controller.copy_notes();
                    }
                });
            });
            ui.add_space(6.0);

            let mut notes = self.controller.notes().to_string();
            egui::ScrollArea::vertical()
                .max_height(ui.available_height())
                .show(ui, |ui| {
                    let editor = ui.add(
                        egui::TextEdit::multiline(&mut notes)
                            .code_editor()
                            .desired_rows(24)
                            .desired_width(f32::INFINITY)
                            .hint_text("Your AI-generated notes will appear here..."),
                    );
                    if editor.changed() {
                        self.controller.edit_notes(notes);
                    }
                });
        });
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        self.toasts.prune(Instant::now());
        let visible = self.toasts.visible();
        if visible.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                for notice in &visible {
                    show_toast(ui, notice);
                    ui.add_space(6.0);
                }
            });
    }
}

fn show_toast(ui: &mut egui::Ui, notice: &Notice) {
    egui::Frame::popup(ui.style()).show(ui, |ui| {
        ui.set_max_width(320.0);
        let title = egui::RichText::new(&notice.title).strong();
        if notice.is_destructive() {
            ui.colored_label(ui.visuals().error_fg_color, title);
        } else {
            ui.label(title);
        }
        ui.label(&notice.description);
    });
}

impl eframe::App for LectureNotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading("Transform YouTube Lectures into Revision Notes");
                ui.add_space(12.0);
            });
            self.show_convert_card(ui);
            self.show_notes_card(ui);
        });
        self.show_toasts(ctx);

        let busy = self.controller.status() == WorkflowStatus::Generating
            || self.controller.is_exporting()
            || !self.toasts.is_empty();
        let repaint_after = if busy {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        ctx.request_repaint_after(repaint_after);
    }
}
