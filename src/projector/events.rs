use std::collections::HashSet;

use log::debug;

use super::walker::Scope;
use super::{FeatureRow, Geometry, Layer, LayerSchema, ProjectionError, Projector};
use crate::document::QuakeMlDocument;
use crate::model::{Event, Magnitude, Origin, ToDict};
use crate::schema::{LayerKind, Synthetic};

const EVENT: &str = "eventParameters>event";
const ORIGIN: &str = "eventParameters>event>origin";
const MAGNITUDE: &str = "eventParameters>event>magnitude";

type RowResult = Result<FeatureRow, ProjectionError>;

impl Projector {
    /// Event layer: magnitude rows, bare event rows and unlinked origin rows
    pub fn events<'a>(&'a self, doc: &'a QuakeMlDocument) -> Layer<'a> {
        let schema = self.schema(LayerKind::Events);
        let row_schema = schema.clone();
        let rows = doc
            .events
            .values()
            .flat_map(move |event| self.event_rows(doc, &row_schema, event));
        Layer::new(schema, Box::new(rows))
    }

    fn event_rows(
        &self,
        doc: &QuakeMlDocument,
        schema: &LayerSchema,
        event: &Event,
    ) -> Vec<RowResult> {
        let config = &self.config;
        let mut rows = Vec::new();
        let mut emitted: HashSet<&str> = HashSet::new();

        let magnitudes: Vec<&Magnitude> = event
            .magnitude_ids
            .iter()
            .filter(|id| !config.preferred_magnitudes_only || event.is_preferred_magnitude(id))
            .filter_map(|id| doc.magnitudes.get(id))
            .collect();

        for magnitude in &magnitudes {
            let Some(origin_id) = magnitude
                .origin_id
                .as_deref()
                .or(event.preferred_origin_id.as_deref())
            else {
                rows.push(Err(ProjectionError::missing(
                    "origin",
                    "",
                    &magnitude.public_id,
                )));
                continue;
            };
            let Some(origin) = doc.origins.get(origin_id) else {
                rows.push(Err(ProjectionError::missing(
                    "origin",
                    origin_id,
                    &magnitude.public_id,
                )));
                continue;
            };
            if config.preferred_origins_only && !event.is_preferred_origin(origin_id) {
                debug!("Skipping magnitude {} of non-preferred origin", magnitude.public_id);
                continue;
            }
            emitted.insert(origin.public_id.as_str());
            rows.push(Ok(self.event_row(schema, event, Some(origin), Some(magnitude))));
        }

        // every event yields at least one row, even when filters drop its magnitudes
        if rows.is_empty() {
            match event.preferred_origin_id.as_deref() {
                Some(id) => match doc.origins.get(id) {
                    Some(origin) => {
                        emitted.insert(origin.public_id.as_str());
                        rows.push(Ok(self.event_row(schema, event, Some(origin), None)));
                    }
                    None => rows.push(Err(ProjectionError::missing(
                        "origin",
                        id,
                        &event.public_id,
                    ))),
                },
                None => {
                    let first = event
                        .origin_ids
                        .iter()
                        .filter(|id| !config.preferred_origins_only || event.is_preferred_origin(id))
                        .find_map(|id| doc.origins.get(id));
                    if let Some(origin) = first {
                        emitted.insert(origin.public_id.as_str());
                    }
                    rows.push(Ok(self.event_row(schema, event, first, None)));
                }
            }
        }

        for origin_id in &event.origin_ids {
            if emitted.contains(origin_id.as_str()) {
                continue;
            }
            if config.preferred_origins_only && !event.is_preferred_origin(origin_id) {
                continue;
            }
            if let Some(origin) = doc.origins.get(origin_id) {
                emitted.insert(origin.public_id.as_str());
                rows.push(Ok(self.event_row(schema, event, Some(origin), None)));
            }
        }
        rows
    }

    fn event_row(
        &self,
        schema: &LayerSchema,
        event: &Event,
        origin: Option<&Origin>,
        magnitude: Option<&Magnitude>,
    ) -> FeatureRow {
        let mut scope = Scope::new();
        scope.bind(EVENT, event.to_dict());
        if let Some(origin) = origin {
            scope.bind(ORIGIN, origin.to_dict());
        }
        if let Some(magnitude) = magnitude {
            scope.bind(MAGNITUDE, magnitude.to_dict());
        }

        let values = self.fill(schema, &scope, |kind| match kind {
            Synthetic::IsPreferredOrigin => {
                origin.map(|o| event.is_preferred_origin(&o.public_id))
            }
            Synthetic::IsPreferredMagnitude => {
                magnitude.map(|m| event.is_preferred_magnitude(&m.public_id))
            }
        });

        FeatureRow {
            id: event.public_id.clone(),
            geometry: origin.map_or(Geometry::Empty, origin_geometry),
            values,
        }
    }
}

/// `(lon, lat, -depth_m)` with depth, `(lon, lat)` without
pub(crate) fn origin_geometry(origin: &Origin) -> Geometry {
    match origin.coordinates() {
        Some((x, y)) => Geometry::point(x, y, origin.depth_meters().map(|d| -d)),
        None => Geometry::Empty,
    }
}
