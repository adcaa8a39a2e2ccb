use clap::Parser;

use examples_common::config::ExampleConfig;
use examples_common::logging::init_tracing;

mod app;
mod args;

use app::{App, AppError};
use args::Args;

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing("fbo_triangle", args.verbose) {
        eprintln!("Invalid log filter: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let color = args.color().ok_or(AppError::InvalidColor)?;
    let config = ExampleConfig::load_or_default(args.config.as_ref())?;

    let app = App::new(&config)?;

    app.run(color)
}
