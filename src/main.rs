mod app;
mod layout;
mod store;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "sample/knowledge.json")]
    store_path: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "mindstack",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::MindstackApp::new(
                cc,
                args.store_path.clone(),
            )))
        }),
    )
}
