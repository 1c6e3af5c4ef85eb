use crate::FormulaApp;
use crate::input::PointerSample;

pub fn central_panel(app: &mut FormulaApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            let size = egui::vec2(app.canvas().width() as f32, app.canvas().height() as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            // Handle input before rendering so this frame shows the new segment
            app.handle_pointer(PointerSample::from_response(ctx, &response));
            app.renderer().render(&painter, response.rect, app.canvas());

            ui.add_space(5.0);
            super::tools_panel(app, ui);
            ui.add_space(10.0);

            ui.label(egui::RichText::new(app.result().display_line()).size(16.0));
        });
    });
}
