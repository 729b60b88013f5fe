//! # Feature Writers
//!
//! Sinks that serialize a projected [`Layer`] to disk.
//!
//! ## Formats
//!
//! - **GeoJSON**: a `FeatureCollection`, streamed one feature at a time
//! - **Parquet**: `id`, a WKB geometry column and one typed column per field,
//!   buffered into row groups, with GeoParquet `geo` metadata in the footer
//! - **CSV**: `id`, a WKT geometry column and one text column per field
//!
//! ## Atomic output
//!
//! [`write_layer_to_path`] writes into a temporary file next to the
//! destination and renames it into place once the sink has finished, so a
//! failed write never leaves a truncated file behind.

mod config;
mod csv_writer;
mod error;
mod geojson_writer;
mod parquet_writer;
mod stats;

#[cfg(test)]
mod tests;

use std::io::BufWriter;
use std::path::Path;

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::projector::{FeatureRow, Layer, ProjectionError};

pub use config::{CompressionType, OutputFormat, WriterConfig};
pub use csv_writer::CsvFeatureWriter;
pub use error::WriterError;
pub use geojson_writer::{feature_json, geometry_json, GeoJsonWriter};
pub use parquet_writer::{
    arrow_schema, arrow_type, ParquetFeatureWriter, GEO_METADATA_KEY, LAYER_METADATA_KEY,
};
pub use stats::WriterStats;

/// A sink for feature rows of one layer
pub trait FeatureWriter {
    /// Append one row
    fn write_feature(&mut self, row: &FeatureRow) -> Result<(), WriterError>;

    /// Flush remaining data and close the output
    fn finish(self) -> Result<WriterStats, WriterError>
    where
        Self: Sized;
}

/// Feed every row into `writer`, skipping rows that failed to project
pub fn drain<I, F>(rows: I, mut writer: F) -> Result<WriterStats, WriterError>
where
    I: IntoIterator<Item = Result<FeatureRow, ProjectionError>>,
    F: FeatureWriter,
{
    let mut skipped = 0;
    for row in rows {
        match row {
            Ok(row) => writer.write_feature(&row)?,
            Err(e) => {
                warn!("Skipping row: {}", e);
                skipped += 1;
            }
        }
    }
    let mut stats = writer.finish()?;
    stats.rows_skipped = skipped;
    Ok(stats)
}

/// Write a layer to `path`.
///
/// The format is `format` when given, otherwise inferred from the extension.
pub fn write_layer_to_path(
    layer: Layer<'_>,
    path: &Path,
    format: Option<OutputFormat>,
    config: &WriterConfig,
) -> Result<WriterStats, WriterError> {
    let format = format
        .or_else(|| OutputFormat::from_path(path))
        .ok_or_else(|| WriterError::UnknownFormat(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    debug!("Writing {:?} layer '{}' via {}", format, layer.schema.name, tmp.path().display());
    let schema = layer.schema.clone();
    let mut stats = match format {
        OutputFormat::GeoJson => {
            let sink = BufWriter::new(tmp.as_file_mut());
            drain(layer, GeoJsonWriter::new(sink, schema, config)?)?
        }
        OutputFormat::Csv => drain(layer, CsvFeatureWriter::new(tmp.as_file_mut(), &schema, config)?)?,
        OutputFormat::Parquet => {
            drain(layer, ParquetFeatureWriter::new(tmp.as_file_mut(), schema, config)?)?
        }
    };
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    stats.file_size_bytes = std::fs::metadata(path)?.len();
    Ok(stats)
}
