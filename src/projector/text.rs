use super::{FeatureRow, FieldValue, Geometry, Layer, LayerSchema, OutputField, ProjectionError, Projector};
use crate::document::TextTable;
use crate::schema::text_column_type;

impl Projector {
    /// Text layer: every column of the reply, typed by header name.
    ///
    /// Geometry is a 2D point when both latitude and longitude parse.
    pub fn text<'a>(&'a self, table: &'a TextTable) -> Layer<'a> {
        let schema = text_schema(table);
        let lat = table.column("Latitude");
        let lon = table.column("Longitude");
        let types: Vec<_> = schema.fields.iter().map(|f| f.field_type).collect();

        let rows = table.rows.iter().map(move |row| {
            let values: Vec<FieldValue> = types
                .iter()
                .enumerate()
                .map(|(i, ty)| {
                    row.get(i)
                        .map_or(FieldValue::Null, |cell| FieldValue::parse(cell, *ty))
                })
                .collect();
            let coordinate = |col: Option<usize>| {
                col.and_then(|c| row.get(c))
                    .and_then(|v| v.trim().parse::<f64>().ok())
            };
            let geometry = match (coordinate(lon), coordinate(lat)) {
                (Some(x), Some(y)) => Geometry::Point2 { x, y },
                _ => Geometry::Empty,
            };
            Ok::<_, ProjectionError>(FeatureRow {
                id: row.first().cloned().unwrap_or_default(),
                geometry,
                values,
            })
        });
        Layer::new(schema, Box::new(rows))
    }
}

fn text_schema(table: &TextTable) -> LayerSchema {
    LayerSchema {
        name: "text".to_string(),
        fields: table
            .header
            .iter()
            .map(|name| OutputField {
                source: name.clone(),
                name: name.clone(),
                field_type: text_column_type(name),
                def: None,
            })
            .collect(),
    }
}
