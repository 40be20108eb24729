use std::path::PathBuf;
use xml_diff_studio::app::DiffStudioApp;
use xml_diff_studio::constant;
use xml_diff_studio::ui;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // xml-diff-studio [FILE_A] [FILE_B]
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let initial_files = [args.next(), args.next()];
    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| {
            let fonts = ui::font::setup_fonts();
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(DiffStudioApp::new(cc, initial_files)))
        }),
    )
}
