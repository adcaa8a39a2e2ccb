use tracing::Level;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, EnvFilter};

/// Maps `-v` counts to a level for `target`, quiets windowing crates.
pub fn init_tracing(target: &str, verbosity: u8) -> Result<(), ParseError> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{target}={level}").parse()?)
        .add_directive(format!("gl_wrapper={level}").parse()?)
        .add_directive(format!("examples_common={level}").parse()?)
        .add_directive("winit=warn".parse()?)
        .add_directive("glutin=warn".parse()?);

    fmt().with_env_filter(filter).with_target(true).init();

    Ok(())
}
