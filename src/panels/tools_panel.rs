use crate::FormulaApp;

/// Row of action buttons under the canvas
pub fn tools_panel(app: &mut FormulaApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if app.is_recognizing() {
            if ui.button("Cancel").clicked() {
                log::info!("Recognition cancelled from UI");
                app.cancel_recognition();
            }
            ui.spinner();
        } else if ui.button("Recognize").clicked() {
            app.recognize();
        }

        if ui.button("Clear").clicked() {
            app.clear();
        }
        if ui.button("Save").clicked() {
            app.save_all();
        }

        let caption = app.canvas().mode().toggle_caption();
        if ui.button(caption).clicked() {
            let mode = app.toggle_eraser();
            log::info!("Tool selected from UI: {}", mode);
        }

        ui.separator();
        if ui.button("Settings").clicked() {
            app.open_settings();
        }
    });
}
