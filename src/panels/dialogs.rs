use crate::FormulaApp;
use crate::app::Dialog;
use crate::config::BACKOFF_CEILING_MS;

enum SettingsAction {
    Apply,
    Close,
}

/// Save report and settings windows, drawn on top of the central panel
pub fn dialogs(app: &mut FormulaApp, ctx: &egui::Context) {
    if let Some(dialog) = app.dialog() {
        let mut close = false;
        let title = match dialog {
            Dialog::Saved(_) => "Saved",
            Dialog::SaveFailed(_) => "Save failed",
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                match dialog {
                    Dialog::Saved(saved) => {
                        ui.label("Image and formula saved:");
                        ui.monospace(saved.image_path.display().to_string());
                        ui.monospace(saved.formula_path.display().to_string());
                    }
                    Dialog::SaveFailed(message) => {
                        ui.colored_label(ui.visuals().error_fg_color, message);
                    }
                }
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            app.dismiss_dialog();
        }
    }

    let busy = app.is_recognizing();
    let mut action = None;
    if let Some(draft) = app.settings_draft_mut() {
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("recognition_settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Endpoint:");
                        ui.text_edit_singleline(&mut draft.endpoint);
                        ui.end_row();

                        ui.label("API name:");
                        ui.text_edit_singleline(&mut draft.api_name);
                        ui.end_row();

                        ui.label("Timeout (s):");
                        ui.add(egui::DragValue::new(&mut draft.timeout_secs).range(1..=600));
                        ui.end_row();

                        ui.label("Attempts:");
                        ui.add(egui::DragValue::new(&mut draft.max_attempts).range(1..=10));
                        ui.end_row();

                        ui.label("Initial backoff (ms):");
                        ui.add(egui::DragValue::new(&mut draft.initial_backoff_ms).range(0..=60_000));
                        ui.end_row();

                        ui.label("Max backoff (ms):");
                        ui.add(egui::DragValue::new(&mut draft.max_backoff_ms).range(0..=BACKOFF_CEILING_MS));
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let apply = ui
                        .add_enabled(!busy, egui::Button::new("Apply"))
                        .on_disabled_hover_text("Wait for the current recognition to finish");
                    if apply.clicked() {
                        action = Some(SettingsAction::Apply);
                    }
                    if ui.button("Close").clicked() {
                        action = Some(SettingsAction::Close);
                    }
                });
            });
    }

    match action {
        Some(SettingsAction::Apply) => {
            if let Err(err) = app.apply_settings() {
                log::error!("Could not apply settings: {}", err);
            }
        }
        Some(SettingsAction::Close) => app.close_settings(),
        None => {}
    }
}
