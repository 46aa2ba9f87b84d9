//! Configuration loading from showcase.toml

use serde::Deserialize;
use showcase_ui::{ShowcaseOptions, WindowConfig};
use std::path::Path;

/// Default configuration file, looked up in the current directory
pub const DEFAULT_CONFIG_PATH: &str = "showcase.toml";

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowSection,
    #[serde(default)]
    pub showcase: ShowcaseSection,
    #[serde(default)]
    pub tiles: Vec<TileConfig>,
    /// Extra tiles found by a glob pattern
    pub gallery: Option<GalleryConfig>,
}

/// Window configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WindowSection {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

fn default_window_title() -> String {
    "Showcase Demo".to_string()
}
fn default_window_width() -> u32 {
    1024
}
fn default_window_height() -> u32 {
    640
}

/// Initial state of the page controls, shared by every tile
#[derive(Debug, Clone, Deserialize)]
pub struct ShowcaseSection {
    /// Image size in percent
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_enabled")]
    pub shadow: bool,
    #[serde(default = "default_enabled")]
    pub reflection: bool,
    #[serde(default = "default_enabled")]
    pub radial_reflection: bool,
}

impl Default for ShowcaseSection {
    fn default() -> Self {
        Self {
            size: default_size(),
            debug: false,
            shadow: default_enabled(),
            reflection: default_enabled(),
            radial_reflection: default_enabled(),
        }
    }
}

fn default_size() -> i64 {
    200
}
fn default_enabled() -> bool {
    true
}

impl ShowcaseSection {
    /// Widget options for these settings
    pub fn options(&self) -> ShowcaseOptions {
        ShowcaseOptions {
            size: self.size as f64,
            debug: self.debug,
            shadow: self.shadow,
            reflection: self.reflection,
            radial_reflection: self.radial_reflection,
        }
    }
}

/// One tile on the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TileConfig {
    /// Path to the picture
    pub src: String,
    /// Placeholder color [r, g, b] used when the picture cannot be loaded
    #[serde(default = "default_tint")]
    pub tint: [u8; 3],
}

/// Glob-based tile discovery
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    /// Glob pattern, e.g. "assets/covers/*.png"
    pub pattern: String,
    /// Placeholder color for every matched tile
    #[serde(default = "default_tint")]
    pub tint: [u8; 3],
}

fn default_tint() -> [u8; 3] {
    [90, 90, 120]
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from default path (showcase.toml in current directory).
    ///
    /// A missing file yields the built-in defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            log::info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            return Ok(Self::default());
        }
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Window settings for the host window
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.window.title.clone(),
            width: self.window.width,
            height: self.window.height,
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.window.title, "Showcase Demo");
        assert_eq!((config.window.width, config.window.height), (1024, 640));
        assert_eq!(
            config.showcase.options(),
            ShowcaseOptions {
                size: 200.0,
                debug: false,
                shadow: true,
                reflection: true,
                radial_reflection: true,
            }
        );
        assert!(config.tiles.is_empty());
        assert!(config.gallery.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            [window]
            title = "Covers"
            width = 800

            [showcase]
            size = 150
            debug = true
            radial_reflection = false

            [[tiles]]
            src = "assets/covers/one.jpg"
            tint = [180, 60, 40]

            [[tiles]]
            src = "assets/covers/two.jpg"

            [gallery]
            pattern = "assets/covers/*.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Covers");
        assert_eq!(config.window.height, 640);
        let options = config.showcase.options();
        assert_eq!(options.size, 150.0);
        assert!(options.debug && options.shadow && options.reflection);
        assert!(!options.radial_reflection);
        assert_eq!(
            config.tiles,
            vec![
                TileConfig { src: "assets/covers/one.jpg".into(), tint: [180, 60, 40] },
                TileConfig { src: "assets/covers/two.jpg".into(), tint: [90, 90, 120] },
            ]
        );
        assert_eq!(config.gallery.map(|g| g.pattern).as_deref(), Some("assets/covers/*.png"));
    }

    #[test]
    fn test_window_config() {
        let config = Config::default().window_config();
        assert_eq!(config.title, "Showcase Demo");
        assert_eq!((config.width, config.height), (1024, 640));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(Config::parse("[window"), Err(ConfigError::Parse(_))));
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error: does/not/exist.toml"));
    }
}
