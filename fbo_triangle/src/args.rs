use clap::{ArgAction, Parser};

use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fbo-triangle", about = "Draws a triangle offscreen and blits it to the window")]
pub struct Args {
    /// Triangle color as r,g,b in [0, 1]
    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 0.5, 0.2])]
    pub color: Vec<f32>,
    /// Path to json5 config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn color(&self) -> Option<[f32; 3]> {
        match self.color.as_slice() {
            [r, g, b] if [r, g, b].iter().all(|c| (0.0..=1.0).contains(*c)) => Some([*r, *g, *b]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color() {
        let args = Args::try_parse_from(["fbo-triangle"]).unwrap();

        assert_eq!(args.color(), Some([1.0, 0.5, 0.2]));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn custom_color() {
        let args = Args::try_parse_from(["fbo-triangle", "--color", "0,1,0.25", "-vv"]).unwrap();

        assert_eq!(args.color(), Some([0.0, 1.0, 0.25]));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn color_out_of_range() {
        let args = Args::try_parse_from(["fbo-triangle", "--color", "0,2,0"]).unwrap();

        assert_eq!(args.color(), None);
    }

    #[test]
    fn color_needs_three_components() {
        let args = Args::try_parse_from(["fbo-triangle", "--color", "0.5,0.5"]).unwrap();

        assert_eq!(args.color(), None);
    }
}
