use std::io::Write;

use crate::projector::{FeatureRow, LayerSchema};

use super::{FeatureWriter, WriterConfig, WriterError, WriterStats};

/// Writes rows as CSV: `id`, WKT geometry, then one column per field
pub struct CsvFeatureWriter<W: Write> {
    writer: csv::Writer<W>,
    features_written: usize,
}

impl<W: Write> CsvFeatureWriter<W> {
    /// Write the header record
    pub fn new(writer: W, schema: &LayerSchema, config: &WriterConfig) -> Result<Self, WriterError> {
        let mut writer = csv::WriterBuilder::new().from_writer(writer);
        let mut header = vec!["id", config.geometry_column.as_str()];
        header.extend(schema.column_names());
        writer.write_record(&header)?;
        Ok(Self {
            writer,
            features_written: 0,
        })
    }

    /// Flush and hand back the sink
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        self.writer
            .into_inner()
            .map_err(|e| WriterError::IoError(e.into_error()))
    }
}

impl<W: Write> FeatureWriter for CsvFeatureWriter<W> {
    fn write_feature(&mut self, row: &FeatureRow) -> Result<(), WriterError> {
        let geometry = if row.geometry.is_empty() {
            String::new()
        } else {
            row.geometry.to_wkt()
        };
        let record = [row.id.clone(), geometry]
            .into_iter()
            .chain(row.values.iter().map(|v| v.to_text()));
        self.writer.write_record(record)?;
        self.features_written += 1;
        Ok(())
    }

    fn finish(self) -> Result<WriterStats, WriterError> {
        let features_written = self.features_written;
        self.finish_into_inner()?;
        Ok(WriterStats {
            features_written,
            ..Default::default()
        })
    }
}
