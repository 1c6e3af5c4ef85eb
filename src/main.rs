#![warn(clippy::all, rust_2018_idioms)]

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Formula recognition")
            .with_inner_size([460.0, 340.0])
            .with_min_inner_size([440.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "formula_sketch",
        native_options,
        Box::new(|cc| Ok(Box::new(formula_sketch::FormulaApp::new(cc)?))),
    )
}
