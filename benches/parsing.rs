use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fdsn_features::document::{QuakeMlDocument, TextTable};
use fdsn_features::projector::{DepthUnit, OutputConfig, Projector};
use fdsn_features::writer::{FeatureWriter, GeoJsonWriter, WriterConfig};

/// QuakeML reply with `num_events` events, two origins and two magnitudes each
fn create_quakeml(num_events: usize) -> String {
    let mut xml = String::from(
        r#"<q:quakeml xmlns:q="http://quakeml.org/xmlns/quakeml/1.2"><eventParameters>"#,
    );
    for i in 0..num_events {
        xml.push_str(&format!(
            r#"<event publicID="smi:ev/{i}">
  <preferredOriginID>smi:or/{i}a</preferredOriginID>
  <preferredMagnitudeID>smi:mag/{i}a</preferredMagnitudeID>
  <type>earthquake</type>
  <description><text>REGION {i}</text><type>region name</type></description>
  <origin publicID="smi:or/{i}a">
    <time><value>2016-10-30T06:40:17.{ms:03}Z</value></time>
    <latitude><value>{lat}</value><uncertainty>0.5</uncertainty></latitude>
    <longitude><value>{lon}</value></longitude>
    <depth><value>{depth}</value></depth>
    <quality><usedPhaseCount>42</usedPhaseCount><standardError>0.3</standardError></quality>
  </origin>
  <origin publicID="smi:or/{i}b">
    <time><value>2016-10-30T06:40:18Z</value></time>
    <latitude><value>{lat}</value></latitude>
    <longitude><value>{lon}</value></longitude>
  </origin>
  <magnitude publicID="smi:mag/{i}a"><mag><value>5.1</value></mag><type>Mw</type><originID>smi:or/{i}a</originID></magnitude>
  <magnitude publicID="smi:mag/{i}b"><mag><value>4.9</value></mag><type>ML</type><originID>smi:or/{i}b</originID></magnitude>
</event>"#,
            ms = i % 1000,
            lat = 35.0 + (i % 100) as f64 * 0.1,
            lon = 10.0 + (i % 50) as f64 * 0.2,
            depth = 1000 + i * 10,
        ));
    }
    xml.push_str("</eventParameters></q:quakeml>");
    xml
}

fn create_text(num_events: usize) -> String {
    let mut text = String::from("#EventID|Time|Latitude|Longitude|Depth/km|MagType|Magnitude|EventLocationName\n");
    for i in 0..num_events {
        text.push_str(&format!(
            "{}|2013-05-01T10:00:00|{:.2}|{:.2}|10.0|ML|3.{}|REGION {}\n",
            i,
            35.0 + (i % 100) as f64 * 0.1,
            10.0 + (i % 50) as f64 * 0.2,
            i % 10,
            i
        ));
    }
    text
}

/// Benchmark QuakeML parsing into entity tables
fn bench_quakeml_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("quakeml_parse");

    for num_events in [10, 100, 1000] {
        let xml = create_quakeml(num_events);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}events", num_events)),
            &xml,
            |b, xml| {
                b.iter(|| {
                    let doc = QuakeMlDocument::from_bytes(black_box(xml.as_bytes())).unwrap();
                    black_box(doc.event_count())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark projection of a parsed document to event rows
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let doc = QuakeMlDocument::from_bytes(create_quakeml(1000).as_bytes()).unwrap();

    let configs = [
        ("default", OutputConfig::default()),
        (
            "preferred_km",
            OutputConfig {
                preferred_origins_only: true,
                preferred_magnitudes_only: true,
                depth_unit: DepthUnit::Kilometers,
                convert_negative_depths: true,
                ..Default::default()
            },
        ),
    ];

    for (name, config) in configs {
        let projector = Projector::new(config);
        group.bench_function(name, |b| {
            b.iter(|| {
                let rows = projector.events(black_box(&doc)).filter(|r| r.is_ok()).count();
                black_box(rows)
            });
        });
    }

    group.finish();
}

/// Benchmark text parsing, projection and GeoJSON serialization end to end
fn bench_text_to_geojson(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_to_geojson");
    let text = create_text(5000);
    group.throughput(Throughput::Elements(5000));

    group.bench_function("5000rows", |b| {
        b.iter(|| {
            let table = TextTable::from_bytes(black_box(text.as_bytes())).unwrap();
            let projector = Projector::default();
            let layer = projector.text(&table);
            let mut writer =
                GeoJsonWriter::new(Vec::new(), layer.schema.clone(), &WriterConfig::default()).unwrap();
            for row in layer {
                writer.write_feature(&row.unwrap()).unwrap();
            }
            black_box(writer.finish_into_inner().unwrap().len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_quakeml_parse, bench_projection, bench_text_to_geojson);
criterion_main!(benches);
