//! Server configuration.
//!
//! Settings resolve in three layers: command-line flags override the INI
//! config file, which overrides the built-in defaults.
//!
//! ```ini
//! [server]
//! port = 8888
//! root = /srv/slo3d
//! tiles_dir = /srv/slo3d/data/tiles
//!
//! [render]
//! timeout_secs = 30
//! max_canvas_pixels = 268435456
//! png_compression = fast
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::codec::PngCompression;
use crate::compositor::DEFAULT_MAX_CANVAS_PIXELS;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8888;

/// Default per-request deadline, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tile pyramid location relative to the static root.
pub const DEFAULT_TILES_SUBDIR: &str = "data/tiles";

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or parsed.
    #[error("Failed to load config file {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A value has the wrong type.
    #[error("Invalid value for [{section}] {key}: {value:?}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Settings read from an INI config file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub tiles_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_canvas_pixels: Option<u64>,
    pub png_compression: Option<PngCompression>,
}

impl ConfigFile {
    /// Load and parse an INI file.
    ///
    /// Unknown sections and keys are ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Load {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let get = |section: &str, key: &str| -> Option<String> {
            ini.section(Some(section))
                .and_then(|props| props.get(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            port: parse_value(get("server", "port"), "server", "port")?,
            root: get("server", "root").map(PathBuf::from),
            tiles_dir: get("server", "tiles_dir").map(PathBuf::from),
            timeout_secs: parse_value(get("render", "timeout_secs"), "render", "timeout_secs")?,
            max_canvas_pixels: parse_value(
                get("render", "max_canvas_pixels"),
                "render",
                "max_canvas_pixels",
            )?,
            png_compression: parse_value(
                get("render", "png_compression"),
                "render",
                "png_compression",
            )?,
        })
    }
}

fn parse_value<T: FromStr>(
    raw: Option<String>,
    section: &'static str,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value.parse().map_err(|_| ConfigError::InvalidValue {
            section,
            key,
            value,
        })
    })
    .transpose()
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Directory served as static files.
    pub root: PathBuf,
    /// Tile pyramid root; defaults to `<root>/data/tiles`.
    pub tiles_dir: Option<PathBuf>,
    /// Per-request deadline; `None` disables it.
    pub request_timeout: Option<Duration>,
    /// Canvas allocation limit in pixels.
    pub max_canvas_pixels: u64,
    /// Compression effort for response PNGs.
    pub png_compression: PngCompression,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            tiles_dir: None,
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
            png_compression: PngCompression::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overlaid with values from a config file.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        Self::default().merge(file)
    }

    /// Overlay every value present in `file`.
    pub fn merge(mut self, file: &ConfigFile) -> Self {
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(ref root) = file.root {
            self.root = root.clone();
        }
        if let Some(ref tiles) = file.tiles_dir {
            self.tiles_dir = Some(tiles.clone());
        }
        if let Some(secs) = file.timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(max) = file.max_canvas_pixels {
            self.max_canvas_pixels = max;
        }
        if let Some(compression) = file.png_compression {
            self.png_compression = compression;
        }
        self
    }

    /// Set the listen port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the static root directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the tile pyramid directory.
    pub fn with_tiles_dir(mut self, tiles_dir: impl Into<PathBuf>) -> Self {
        self.tiles_dir = Some(tiles_dir.into());
        self
    }

    /// Set the request deadline in seconds; zero disables it.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = timeout_from_secs(secs);
        self
    }

    /// Set the canvas allocation limit.
    pub fn with_max_canvas_pixels(mut self, max: u64) -> Self {
        self.max_canvas_pixels = max;
        self
    }

    /// Set the response PNG compression.
    pub fn with_png_compression(mut self, compression: PngCompression) -> Self {
        self.png_compression = compression;
        self
    }

    /// Effective tile pyramid directory.
    pub fn tiles_dir(&self) -> PathBuf {
        self.tiles_dir
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_TILES_SUBDIR))
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
