//! Style file loading errors.
//!
//! The widget itself never fails; only reading a style file can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a [`WidgetConfig`](crate::config::WidgetConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The style file could not be read.
    #[error("failed to read style file '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The style file is not valid TOML, has an unknown option, or a malformed value.
    #[error("invalid style file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A dimension is larger than any panel the widget can be drawn on.
    #[error("option '{option}' is {value}, the maximum is {max}")]
    OutOfRange {
        option: &'static str,
        value: u32,
        max: u32,
    },
}
