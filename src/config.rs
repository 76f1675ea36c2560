//! Game configuration.

use std::path::Path;

use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;

use crate::{clock::DEFAULT_TICK_INTERVAL, grid::Grid};

/// Initial game configuration, read once at startup.
///
/// The grid size has no default and must always be provided.
///
/// # Example
///
/// ```rust
/// # use gridsnake::Config;
/// let config = Config::from_toml_str("grid_width = 30\ngrid_height = 30").unwrap();
///
/// assert_eq!(config.grid_width, 30);
/// ```
///
/// # Example
///
/// ```rust
/// # use gridsnake::Config;
/// Config::new(20, 15).with_initial_length(3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Amount of columns on the playing field.
    pub grid_width: i32,
    /// Amount of rows on the playing field.
    pub grid_height: i32,
    /// Amount of body segments the snake starts growing to.
    ///
    /// Defaults to `0`.
    #[serde(default)]
    pub initial_length: usize,
    /// Seconds between two movement steps.
    ///
    /// Defaults to `0.1`.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f32,
    /// Window and rendering options.
    #[serde(default)]
    pub window: WindowConfig,
}

impl Config {
    /// Create a configuration for a grid size with defaults for everything else.
    #[inline]
    #[must_use]
    pub fn new(grid_width: i32, grid_height: i32) -> Self {
        Self {
            grid_width,
            grid_height,
            initial_length: 0,
            tick_interval: DEFAULT_TICK_INTERVAL,
            window: WindowConfig::default(),
        }
    }

    /// Load the configuration from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// - When the file can't be read.
    /// - When the file is not valid TOML or a field is missing or malformed.
    /// - When the values are out of range.
    #[inline]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        log::debug!("Reading configuration from '{}'", path.display());

        let source = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading configuration file '{}'", path.display()))?;

        Self::from_toml_str(&source)
            .wrap_err_with(|| format!("Error in configuration file '{}'", path.display()))
    }

    /// Parse the configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// - When the string is not valid TOML or a field is missing or malformed.
    /// - When the values are out of range.
    #[inline]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(source)
            .into_diagnostic()
            .wrap_err("Error parsing configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Playing field described by the configuration.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Set the amount of body segments the snake starts growing to.
    #[inline]
    #[must_use]
    pub const fn with_initial_length(mut self, initial_length: usize) -> Self {
        self.initial_length = initial_length;

        self
    }

    /// Set the seconds between two movement steps.
    #[inline]
    #[must_use]
    pub const fn with_tick_interval(mut self, tick_interval: f32) -> Self {
        self.tick_interval = tick_interval;

        self
    }

    /// Set the window options.
    #[inline]
    #[must_use]
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;

        self
    }

    /// Ensure all values can be used.
    fn validate(&self) -> Result<()> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            miette::bail!(
                "Grid size must be positive, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }

        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            miette::bail!(
                "Tick interval must be a positive amount of seconds, got {}",
                self.tick_interval
            );
        }

        if self.window.width == 0 || self.window.height == 0 {
            miette::bail!(
                "Window size must be positive, got {}x{}",
                self.window.width,
                self.window.height
            );
        }

        Ok(())
    }
}

/// Window and rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Name in the title bar, FPS information is appended.
    ///
    /// Defaults to `"Snake2D"`.
    pub title: String,
    /// Requested width of the window in logical pixels.
    ///
    /// Defaults to `1000`.
    pub width: u32,
    /// Requested height of the window in logical pixels.
    ///
    /// Defaults to `1000`.
    pub height: u32,
    /// Wait for the display refresh before presenting a frame.
    ///
    /// Defaults to `false`, the game loop runs as fast as possible.
    pub vsync: bool,
    /// Color of the background of the playing field in ARGB.
    ///
    /// Defaults to `0xFF0B0B0B` (almost black).
    pub background_color: u32,
}

impl WindowConfig {
    /// Set the name in the title bar.
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set the requested size of the window.
    #[inline]
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;

        self
    }

    /// Enable or disable waiting for the display refresh.
    #[inline]
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;

        self
    }

    /// Set the color of the background.
    #[inline]
    #[must_use]
    pub fn with_background_color(mut self, background_color: u32) -> Self {
        self.background_color = background_color;

        self
    }
}

impl Default for WindowConfig {
    #[inline]
    fn default() -> Self {
        Self {
            title: "Snake2D".to_owned(),
            width: 1000,
            height: 1000,
            vsync: false,
            background_color: 0xFF0B_0B0B,
        }
    }
}

/// Serde needs a function for non-trivial defaults.
const fn default_tick_interval() -> f32 {
    DEFAULT_TICK_INTERVAL
}

#[cfg(test)]
mod tests {
    use super::{Config, WindowConfig};

    #[test]
    fn minimal() {
        let config = Config::from_toml_str("grid_width = 10\ngrid_height = 12").unwrap();

        assert_eq!(config, Config::new(10, 12));
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn full() {
        let config = Config::from_toml_str(
            r#"
            grid_width = 30
            grid_height = 20
            initial_length = 4
            tick_interval = 0.25

            [window]
            title = "Snake"
            width = 600
            height = 400
            vsync = true
            background_color = 0xFF112233
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config::new(30, 20)
                .with_initial_length(4)
                .with_tick_interval(0.25)
                .with_window(
                    WindowConfig::default()
                        .with_title("Snake")
                        .with_size(600, 400)
                        .with_vsync(true)
                        .with_background_color(0xFF11_2233)
                )
        );
    }

    #[test]
    fn missing_grid_size_is_an_error() {
        assert!(Config::from_toml_str("grid_width = 10").is_err());
        assert!(Config::from_toml_str("").is_err());
    }

    #[test]
    fn malformed_grid_size_is_an_error() {
        assert!(Config::from_toml_str("grid_width = \"ten\"\ngrid_height = 10").is_err());
        assert!(Config::from_toml_str("grid_width = 10.5\ngrid_height = 10").is_err());
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert!(Config::from_toml_str("grid_width = 0\ngrid_height = 10").is_err());
        assert!(Config::from_toml_str("grid_width = 10\ngrid_height = -3").is_err());
        assert!(
            Config::from_toml_str("grid_width = 10\ngrid_height = 10\ntick_interval = 0.0")
                .is_err()
        );
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(Config::from_toml_str("grid_width = 10\ngrid_height = 10\ngrid_depth = 3").is_err());
    }

    #[test]
    fn bundled_options_file() {
        let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/options.toml")).unwrap();

        assert_eq!(config.grid(), crate::grid::Grid::new(30, 30));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load("does/not/exist.toml").is_err());
    }
}
