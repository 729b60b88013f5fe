//! TOML configuration file support.
//!
//! Output preferences and writer tuning can live in a config file instead of
//! on the command line:
//!
//! ```toml
//! # fdsn-features.toml
//! [output]
//! depth_unit = "kilometers"
//! convert_negative_depths = true
//! short_field_names = true
//!
//! [output.field_selection]
//! "eventParameters>event>origin>depth>value" = true
//!
//! [writer]
//! compression = "zstd"
//! compression_level = 3
//! row_group_size = 10000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use fdsn_features::projector::OutputConfig;
use fdsn_features::writer::{CompressionType, WriterConfig};

/// Root configuration structure for fdsn-features.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Projection settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Feature writer settings.
    #[serde(default)]
    pub writer: WriterSection,
}

/// Configuration of the output sinks.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// Parquet codec: `zstd`, `snappy` or `none`.
    pub compression: Option<String>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Number of features per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Write Parquet column statistics.
    pub write_statistics: Option<bool>,

    /// Name of the geometry column.
    pub geometry_column: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl WriterSection {
    /// Writer configuration with every unset value at its default.
    pub fn to_writer_config(&self) -> Result<WriterConfig> {
        let mut config = WriterConfig::default();
        match &self.compression {
            Some(name) => {
                config.compression = CompressionType::from_name(name, self.compression_level)
                    .with_context(|| format!("Unknown compression codec: {}", name))?;
            }
            None => {
                if let Some(level) = self.compression_level {
                    config.compression = CompressionType::Zstd(level);
                }
            }
        }
        if let Some(size) = self.row_group_size {
            config.row_group_size = size;
        }
        if let Some(statistics) = self.write_statistics {
            config.write_statistics = statistics;
        }
        if let Some(column) = &self.geometry_column {
            config.geometry_column = column.clone();
        }
        Ok(config)
    }
}
