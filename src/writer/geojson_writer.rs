use std::io::Write;

use serde_json::{json, Map, Value};

use crate::projector::{FeatureRow, Geometry, LayerSchema};

use super::{FeatureWriter, WriterConfig, WriterError, WriterStats};

/// GeoJSON geometry object, `null` for empty geometry
pub fn geometry_json(geometry: &Geometry) -> Value {
    if geometry.is_empty() {
        Value::Null
    } else {
        json!({ "type": "Point", "coordinates": geometry.coordinates() })
    }
}

/// A GeoJSON `Feature` for one row
pub fn feature_json(schema: &LayerSchema, row: &FeatureRow) -> Value {
    let properties: Map<String, Value> = schema
        .fields
        .iter()
        .zip(&row.values)
        .map(|(field, value)| (field.name.clone(), value.to_json()))
        .collect();
    json!({
        "type": "Feature",
        "id": row.id,
        "geometry": geometry_json(&row.geometry),
        "properties": properties,
    })
}

/// Streams a `FeatureCollection`, one feature at a time
pub struct GeoJsonWriter<W: Write> {
    writer: W,
    schema: LayerSchema,
    newline: bool,
    features_written: usize,
    bytes_written: u64,
}

impl<W: Write> GeoJsonWriter<W> {
    /// Write the collection header
    pub fn new(mut writer: W, schema: LayerSchema, config: &WriterConfig) -> Result<Self, WriterError> {
        let header = format!(
            "{{\"type\":\"FeatureCollection\",\"name\":{},\"features\":[",
            Value::String(schema.name.clone())
        );
        writer.write_all(header.as_bytes())?;
        Ok(Self {
            writer,
            schema,
            newline: config.geojson_feature_per_line,
            features_written: 0,
            bytes_written: header.len() as u64,
        })
    }

    /// Close the collection and hand back the sink
    pub fn finish_into_inner(mut self) -> Result<W, WriterError> {
        let footer = if self.newline { "\n]}\n" } else { "]}" };
        self.writer.write_all(footer.as_bytes())?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> FeatureWriter for GeoJsonWriter<W> {
    fn write_feature(&mut self, row: &FeatureRow) -> Result<(), WriterError> {
        let mut buf = Vec::new();
        if self.features_written > 0 {
            buf.push(b',');
        }
        if self.newline {
            buf.push(b'\n');
        }
        serde_json::to_writer(&mut buf, &feature_json(&self.schema, row))?;
        self.writer.write_all(&buf)?;
        self.bytes_written += buf.len() as u64;
        self.features_written += 1;
        Ok(())
    }

    fn finish(self) -> Result<WriterStats, WriterError> {
        let features_written = self.features_written;
        let file_size_bytes = self.bytes_written;
        self.finish_into_inner()?;
        Ok(WriterStats {
            features_written,
            file_size_bytes,
            ..Default::default()
        })
    }
}
