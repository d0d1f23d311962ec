use examiai::QuizApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ExamiAI")
            .with_inner_size([960.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ExamiAI",
        options,
        Box::new(|cc| Ok(Box::new(QuizApp::from_creation_context(cc)))),
    )
}
