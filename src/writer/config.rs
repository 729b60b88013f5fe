use std::collections::HashMap;
use std::path::Path;

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;

/// Compression options for Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression at the given level
    Zstd(i32),
    /// Snappy compression (faster, larger files)
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// Parse a codec name (`zstd`, `snappy`, `none`); `level` applies to ZSTD
    pub fn from_name(name: &str, level: Option<i32>) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "zstd" => Some(Self::Zstd(level.unwrap_or(3))),
            "snappy" => Some(Self::Snappy),
            "none" | "uncompressed" => Some(Self::Uncompressed),
            _ => None,
        }
    }
}

/// File format of a feature table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// GeoJSON `FeatureCollection`
    GeoJson,
    /// Parquet with WKB geometry and GeoParquet metadata
    Parquet,
    /// CSV with a WKT geometry column
    Csv,
}

impl OutputFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "geojson" | "json" => Some(Self::GeoJson),
            "parquet" | "geoparquet" => Some(Self::Parquet),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

/// Configuration of the feature writers
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Parquet compression
    pub compression: CompressionType,

    /// Rows per Parquet row group
    pub row_group_size: usize,

    /// Whether to write Parquet column statistics
    pub write_statistics: bool,

    /// Name of the geometry column (Parquet and CSV)
    pub geometry_column: String,

    /// Pretty-print GeoJSON properties one feature per line
    pub geojson_feature_per_line: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: 10_000,
            write_statistics: true,
            geometry_column: "geometry".to_string(),
            geojson_feature_per_line: true,
        }
    }
}

impl WriterConfig {
    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        WriterProperties::builder()
            .set_compression(compression)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1))
            .set_key_value_metadata(Some(kv_metadata))
            .build()
    }
}
