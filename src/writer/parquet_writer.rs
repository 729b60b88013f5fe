use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BinaryBuilder, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder,
    TimestampMicrosecondBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::format::KeyValue;
use serde_json::json;

use crate::projector::{FeatureRow, FieldValue, Geometry, LayerSchema};
use crate::schema::FieldType;

use super::{FeatureWriter, WriterConfig, WriterError, WriterStats};

/// Key of the GeoParquet file metadata
pub const GEO_METADATA_KEY: &str = "geo";

/// Key holding the layer name
pub const LAYER_METADATA_KEY: &str = "fdsn_features:layer";

const ID_COLUMN: &str = "id";

/// Arrow type of a field type
pub fn arrow_type(ty: FieldType) -> DataType {
    match ty {
        FieldType::String => DataType::Utf8,
        FieldType::Integer => DataType::Int64,
        FieldType::Float => DataType::Float64,
        FieldType::Boolean => DataType::Boolean,
        FieldType::DateTime => DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
    }
}

/// Arrow schema: `id`, WKB geometry, then the layer columns (all nullable)
pub fn arrow_schema(schema: &LayerSchema, geometry_column: &str) -> Schema {
    let mut fields = vec![
        Field::new(ID_COLUMN, DataType::Utf8, false),
        Field::new(geometry_column, DataType::Binary, true),
    ];
    fields.extend(
        schema
            .fields
            .iter()
            .map(|f| Field::new(&f.name, arrow_type(f.field_type), true)),
    );
    Schema::new(fields)
}

fn geometry_type(geometry: &Geometry) -> Option<&'static str> {
    match geometry {
        Geometry::Empty => None,
        Geometry::Point2 { .. } => Some("Point"),
        Geometry::Point3 { .. } => Some("Point Z"),
    }
}

/// Buffers rows into row groups and writes them as Parquet.
///
/// Geometry is stored as ISO WKB; GeoParquet `geo` metadata is added to the
/// footer on [`finish`](FeatureWriter::finish).
pub struct ParquetFeatureWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: LayerSchema,
    arrow_schema: SchemaRef,
    geometry_column: String,
    buffer: Vec<FeatureRow>,
    row_group_size: usize,
    features_written: usize,
    geometry_types: BTreeSet<&'static str>,
}

impl<W: Write + Send> ParquetFeatureWriter<W> {
    /// Create a writer for rows of `schema`
    pub fn new(writer: W, schema: LayerSchema, config: &WriterConfig) -> Result<Self, WriterError> {
        let arrow_schema = Arc::new(arrow_schema(&schema, &config.geometry_column));
        let mut metadata = HashMap::new();
        metadata.insert(LAYER_METADATA_KEY.to_string(), schema.name.clone());
        let props = config.to_writer_properties(&metadata);
        let writer = ArrowWriter::try_new(writer, arrow_schema.clone(), Some(props))?;
        let row_group_size = config.row_group_size.max(1);

        Ok(Self {
            writer,
            schema,
            arrow_schema,
            geometry_column: config.geometry_column.clone(),
            buffer: Vec::with_capacity(row_group_size),
            row_group_size,
            features_written: 0,
            geometry_types: BTreeSet::new(),
        })
    }

    fn flush_buffer(&mut self) -> Result<(), WriterError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch = self.record_batch()?;
        self.writer.write(&batch)?;
        self.buffer.clear();
        Ok(())
    }

    fn record_batch(&self) -> Result<RecordBatch, WriterError> {
        let rows = &self.buffer;
        let mut ids = StringBuilder::with_capacity(rows.len(), rows.len() * 16);
        let mut geometries = BinaryBuilder::with_capacity(rows.len(), rows.len() * 29);
        for row in rows {
            ids.append_value(&row.id);
            match row.geometry {
                Geometry::Empty => geometries.append_null(),
                ref g => geometries.append_value(g.to_wkb()),
            }
        }

        let mut columns: Vec<ArrayRef> = vec![Arc::new(ids.finish()), Arc::new(geometries.finish())];
        for (i, field) in self.schema.fields.iter().enumerate() {
            columns.push(build_column(field.field_type, rows, i));
        }
        Ok(RecordBatch::try_new(self.arrow_schema.clone(), columns)?)
    }

    fn geo_metadata(&self) -> KeyValue {
        let geo = json!({
            "version": "1.1.0",
            "primary_column": self.geometry_column,
            "columns": {
                &self.geometry_column: {
                    "encoding": "WKB",
                    "geometry_types": self.geometry_types.iter().collect::<Vec<_>>(),
                }
            }
        });
        KeyValue {
            key: GEO_METADATA_KEY.to_string(),
            value: Some(geo.to_string()),
        }
    }

    /// Flush, write the footer and hand back the sink
    pub fn finish_into_inner(mut self) -> Result<W, WriterError> {
        self.flush_buffer()?;
        let geo = self.geo_metadata();
        self.writer.append_key_value_metadata(geo);
        Ok(self.writer.into_inner()?)
    }
}

impl<W: Write + Send> FeatureWriter for ParquetFeatureWriter<W> {
    fn write_feature(&mut self, row: &FeatureRow) -> Result<(), WriterError> {
        if let Some(kind) = geometry_type(&row.geometry) {
            self.geometry_types.insert(kind);
        }
        self.buffer.push(row.clone());
        self.features_written += 1;
        if self.buffer.len() >= self.row_group_size {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<WriterStats, WriterError> {
        self.flush_buffer()?;
        let geo = self.geo_metadata();
        self.writer.append_key_value_metadata(geo);
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            features_written: self.features_written,
            rows_skipped: 0,
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }
}

fn build_column(ty: FieldType, rows: &[FeatureRow], i: usize) -> ArrayRef {
    let cell = |row: &FeatureRow| row.values.get(i).unwrap_or(&FieldValue::Null).clone();
    match ty {
        FieldType::String => {
            let mut builder = StringBuilder::new();
            for row in rows {
                match cell(row) {
                    FieldValue::Null => builder.append_null(),
                    value => builder.append_value(value.to_text()),
                }
            }
            Arc::new(builder.finish())
        }
        FieldType::Integer => {
            let mut builder = Int64Builder::with_capacity(rows.len());
            for row in rows {
                match cell(row) {
                    FieldValue::Integer(v) => builder.append_value(v),
                    _ => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
        FieldType::Float => {
            let mut builder = Float64Builder::with_capacity(rows.len());
            for row in rows {
                builder.append_option(cell(row).as_f64());
            }
            Arc::new(builder.finish())
        }
        FieldType::Boolean => {
            let mut builder = BooleanBuilder::with_capacity(rows.len());
            for row in rows {
                match cell(row) {
                    FieldValue::Boolean(b) => builder.append_value(b),
                    _ => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
        FieldType::DateTime => {
            let mut builder = TimestampMicrosecondBuilder::with_capacity(rows.len()).with_timezone("UTC");
            for row in rows {
                builder.append_option(cell(row).as_datetime().map(|t| t.timestamp_micros()));
            }
            Arc::new(builder.finish())
        }
    }
}
