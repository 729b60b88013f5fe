use super::*;
use crate::document::{QuakeMlDocument, TextTable};
use crate::projector::{Geometry, Projector};

use arrow::array::{Array, BinaryArray, Float64Array, StringArray, TimestampMicrosecondArray};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use tempfile::tempdir;

const TEXT: &str = "#EventID|Time|Latitude|Longitude|Depth/km|Magnitude\n\
                    1|2013-05-01T10:00:00|42.1|13.5|10.0|3.2\n\
                    2|2013-06-01T10:00:00|n/a|13.5|8.0|2.1\n\
                    3|2013-07-01T10:00:00|41.0|12.0|5.0|2.7\n";

const QUAKEML: &str = r#"<q:quakeml xmlns:q="http://quakeml.org/xmlns/quakeml/1.2">
  <eventParameters>
    <event publicID="smi:ev/1">
      <preferredOriginID>smi:or/1</preferredOriginID>
      <origin publicID="smi:or/1">
        <time><value>2016-10-30T06:40:17Z</value></time>
        <latitude><value>42.83</value></latitude>
        <longitude><value>13.11</value></longitude>
        <depth><value>9000</value></depth>
      </origin>
      <magnitude publicID="smi:mag/1">
        <mag><value>6.5</value></mag><type>Mw</type><originID>smi:or/1</originID>
      </magnitude>
    </event>
    <event publicID="smi:ev/2">
      <preferredOriginID>smi:missing/1</preferredOriginID>
    </event>
  </eventParameters>
</q:quakeml>"#;

fn table() -> TextTable {
    TextTable::from_bytes(TEXT.as_bytes()).unwrap()
}

#[test]
fn test_output_format_from_path() {
    use std::path::Path;
    assert_eq!(OutputFormat::from_path(Path::new("a.geojson")), Some(OutputFormat::GeoJson));
    assert_eq!(OutputFormat::from_path(Path::new("a.JSON")), Some(OutputFormat::GeoJson));
    assert_eq!(OutputFormat::from_path(Path::new("dir/a.parquet")), Some(OutputFormat::Parquet));
    assert_eq!(OutputFormat::from_path(Path::new("a.csv")), Some(OutputFormat::Csv));
    assert_eq!(OutputFormat::from_path(Path::new("a.shp")), None);
    assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
}

#[test]
fn test_compression_from_name() {
    assert_eq!(CompressionType::from_name("ZSTD", Some(9)), Some(CompressionType::Zstd(9)));
    assert_eq!(CompressionType::from_name("zstd", None), Some(CompressionType::Zstd(3)));
    assert_eq!(CompressionType::from_name("snappy", None), Some(CompressionType::Snappy));
    assert_eq!(CompressionType::from_name("none", None), Some(CompressionType::Uncompressed));
    assert_eq!(CompressionType::from_name("lz4", None), None);
}

#[test]
fn test_geometry_json() {
    assert_eq!(geometry_json(&Geometry::Empty), serde_json::Value::Null);
    let point = geometry_json(&Geometry::Point3 { x: 1.0, y: 2.0, z: -3.0 });
    assert_eq!(point["type"], "Point");
    assert_eq!(point["coordinates"], serde_json::json!([1.0, 2.0, -3.0]));
}

#[test]
fn test_geojson_in_memory() {
    let table = table();
    let projector = Projector::default();
    let layer = projector.text(&table);
    let mut writer =
        GeoJsonWriter::new(Vec::new(), layer.schema.clone(), &WriterConfig::default()).unwrap();
    for row in layer {
        writer.write_feature(&row.unwrap()).unwrap();
    }
    let bytes = writer.finish_into_inner().unwrap();

    let collection: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(collection["type"], "FeatureCollection");
    assert_eq!(collection["name"], "text");
    let features = collection["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(features[0]["id"], "1");
    assert_eq!(features[0]["properties"]["Magnitude"], 3.2);
    assert_eq!(features[0]["properties"]["Time"], "2013-05-01T10:00:00Z");
    assert!(features[1]["geometry"].is_null());
    assert!(features[1]["properties"]["Latitude"].is_null());
}

#[test]
fn test_geojson_empty_layer() {
    let table = TextTable::from_bytes(b"#EventID|Latitude|Longitude\n").unwrap();
    let projector = Projector::default();
    let layer = projector.text(&table);
    let writer = GeoJsonWriter::new(Vec::new(), layer.schema.clone(), &WriterConfig::default()).unwrap();
    let bytes = writer.finish_into_inner().unwrap();
    let collection: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(collection["features"].as_array().unwrap().len(), 0);
}

#[test]
fn test_csv_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let table = table();
    let projector = Projector::default();

    let stats = write_layer_to_path(projector.text(&table), &path, None, &WriterConfig::default()).unwrap();
    assert_eq!(stats.features_written, 3);
    assert!(stats.file_size_bytes > 0);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        header,
        vec!["id", "geometry", "EventID", "Time", "Latitude", "Longitude", "Depth/km", "Magnitude"]
    );
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][1], "POINT (13.5 42.1)");
    assert_eq!(&records[1][1], "");
    assert_eq!(&records[1][4], "");
}

#[test]
fn test_parquet_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.parquet");
    let table = table();
    let projector = Projector::default();
    let config = WriterConfig {
        row_group_size: 2,
        ..Default::default()
    };

    let stats = write_layer_to_path(projector.text(&table), &path, None, &config).unwrap();
    assert_eq!(stats.features_written, 3);
    assert_eq!(stats.row_groups_written, 2);

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    let schema = builder.schema().clone();
    assert_eq!(schema.field(0).name(), "id");
    assert_eq!(schema.field(1).name(), "geometry");
    assert_eq!(schema.field(2).name(), "EventID");

    let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total, 3);

    let first = &batches[0];
    let ids = first.column(0).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(ids.value(0), "1");
    let geometry = first.column(1).as_any().downcast_ref::<BinaryArray>().unwrap();
    assert_eq!(geometry.value(0), Geometry::Point2 { x: 13.5, y: 42.1 }.to_wkb().as_slice());
    assert!(geometry.is_null(1));
    let latitude = first.column(4).as_any().downcast_ref::<Float64Array>().unwrap();
    assert!(latitude.is_null(1));
    let time = first
        .column(3)
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .unwrap();
    assert_eq!(time.value(0), 1_367_402_400_000_000);
}

#[test]
fn test_parquet_geo_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.parquet");
    let table = table();
    let projector = Projector::default();
    write_layer_to_path(projector.text(&table), &path, None, &WriterConfig::default()).unwrap();

    let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
    let kv = reader
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .cloned()
        .unwrap_or_default();
    let lookup = |key: &str| {
        kv.iter()
            .find(|e| e.key == key)
            .and_then(|e| e.value.clone())
    };

    assert_eq!(lookup(LAYER_METADATA_KEY).as_deref(), Some("text"));
    let geo: serde_json::Value = serde_json::from_str(&lookup(GEO_METADATA_KEY).unwrap()).unwrap();
    assert_eq!(geo["primary_column"], "geometry");
    assert_eq!(geo["columns"]["geometry"]["encoding"], "WKB");
    assert_eq!(geo["columns"]["geometry"]["geometry_types"], serde_json::json!(["Point"]));
}

#[test]
fn test_skipped_rows_are_counted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.geojson");
    let doc = QuakeMlDocument::from_bytes(QUAKEML.as_bytes()).unwrap();
    let projector = Projector::default();

    let stats = write_layer_to_path(projector.events(&doc), &path, None, &WriterConfig::default()).unwrap();
    assert_eq!(stats.features_written, 1);
    assert_eq!(stats.rows_skipped, 1);

    let collection: serde_json::Value =
        serde_json::from_reader(File::open(&path).unwrap()).unwrap();
    let features = collection["features"].as_array().unwrap();
    assert_eq!(features[0]["geometry"]["coordinates"], serde_json::json!([13.11, 42.83, -9000.0]));
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.out");
    let table = table();
    let projector = Projector::default();

    assert!(matches!(
        write_layer_to_path(projector.text(&table), &path, None, &WriterConfig::default()),
        Err(WriterError::UnknownFormat(_))
    ));
    assert!(!path.exists());

    write_layer_to_path(projector.text(&table), &path, Some(OutputFormat::Csv), &WriterConfig::default())
        .unwrap();
    assert!(path.exists());
}

#[test]
fn test_failed_write_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("events.csv");
    let table = table();
    let projector = Projector::default();
    let result = write_layer_to_path(projector.text(&table), &path, None, &WriterConfig::default());
    assert!(matches!(result, Err(WriterError::IoError(_))));
    assert!(!path.exists());
}
