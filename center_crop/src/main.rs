use clap::Parser;

use examples_common::config::ExampleConfig;
use examples_common::logging::init_tracing;

mod app;
mod args;
mod image;

use app::{App, AppError};
use args::Args;

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing("center_crop", args.verbose) {
        eprintln!("Invalid log filter: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = ExampleConfig::load_or_default(args.config.as_ref())?;

    let app = App::new(&config, args.display_aspect)?;

    let image = image::load_png(&args.image).map_err(|source| AppError::Image {
        path: args.image.clone(),
        source,
    })?;
    tracing::info!(
        "image: {}x{}, {} channels",
        image.width,
        image.height,
        image.channels
    );

    app.run(&image)
}
