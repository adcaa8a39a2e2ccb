use clap::{ArgAction, Parser};

use aspect_crop::AspectRatio;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "center-crop", about = "Fills the window with the centered crop of an image")]
pub struct Args {
    /// Path to the PNG image to display
    #[arg(default_value_os_t = PathBuf::from("mesh.png"))]
    pub image: PathBuf,
    /// Fixed display aspect ratio like 16:9, follows the window size when omitted
    #[arg(long, value_name = "RATIO")]
    pub display_aspect: Option<AspectRatio>,
    /// Path to json5 config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
