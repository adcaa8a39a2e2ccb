use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Window and frame settings shared by both examples. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExampleConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub clear_color: [f32; 3],
    pub vsync: bool,
    pub gl_version: [u8; 2],
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: None,
            clear_color: [0.2, 0.3, 0.3],
            vsync: true,
            gl_version: [3, 3],
        }
    }
}

impl ExampleConfig {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path).map_err(ConfigError::InputError)?;

        Self::from_json5(&config_str)
    }

    pub fn from_json5(src: &str) -> Result<Self, ConfigError> {
        let config: ExampleConfig = json5::from_str(src).map_err(ConfigError::FormatError)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must not be zero",
                self.width, self.height
            )));
        }

        if self.gl_version[0] < 3 || (self.gl_version[0] == 3 && self.gl_version[1] < 3) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} is too old, 3.3 is required",
                self.gl_version[0], self.gl_version[1]
            )));
        }

        if self.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::Invalid(
                "clear_color components must be in [0, 1]".to_owned(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    InputError(std::io::Error),
    #[error("cannot parse config: {0}")]
    FormatError(json5::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = ExampleConfig::from_json5("{}").unwrap();

        assert_eq!(config, ExampleConfig::default());
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3]);
    }

    #[test]
    fn partial_override() {
        let config = ExampleConfig::from_json5(
            r#"{
                // comments are fine in json5
                width: 1280,
                title: "Crop",
                vsync: false,
            }"#,
        )
        .unwrap();

        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 600);
        assert_eq!(config.title.as_deref(), Some("Crop"));
        assert!(!config.vsync);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ExampleConfig::from_json5("{ height: 0 }"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ExampleConfig::from_json5("{ gl_version: [2, 1] }"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ExampleConfig::from_json5("{ clear_color: [2.0, 0.0, 0.0] }"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ExampleConfig::from_json5("{ colour: 1 }"),
            Err(ConfigError::FormatError(_))
        ));
    }

    #[test]
    fn missing_file() {
        let res = ExampleConfig::load_from_path("/nonexistent/config.json5");

        assert!(matches!(res, Err(ConfigError::InputError(_))));
    }

    #[test]
    fn no_path_gives_default() {
        let config = ExampleConfig::load_or_default(None::<&str>).unwrap();

        assert_eq!(config, ExampleConfig::default());
    }
}
