//! # Projector
//!
//! Turns the entity tables of a document into flat feature rows with point
//! geometries, driven by the field catalog and an [`OutputConfig`].
//!
//! ## Layers
//!
//! - **events**: one row per magnitude of each event (or only the preferred
//!   one), one row for events without magnitudes, and one row for every origin
//!   not already covered by a magnitude row
//! - **mdp**: one row per macroseismic data point, located at its place
//! - **stations**: one row per network station
//! - **text**: one row per record of an FDSN text reply
//!
//! ## Geometry and depth
//!
//! Event rows carry `(longitude, latitude, -depth_meters)` when the origin
//! depth is known and `(longitude, latitude)` otherwise; the Z coordinate
//! ignores the configured depth unit and sign. The depth *column* is
//! converted: divided by 1000 for kilometers, negated when
//! `convert_negative_depths` is set. Station rows use the elevation as Z,
//! unchanged.
//!
//! ## Laziness
//!
//! Rows are generated while the caller iterates a [`Layer`]. A row that
//! references an entity missing from the tables yields a
//! [`ProjectionError::MissingReference`] in its place and iteration goes on.

mod config;
mod error;
mod events;
mod layer;
mod mdp;
mod stations;
mod text;
mod value;
mod walker;


pub use config::{DepthUnit, OutputConfig};
pub use error::ProjectionError;
pub use layer::{Layer, LayerSchema, OutputField, RowIter};
pub use value::{format_datetime, FeatureRow, FieldValue, Geometry};

use chrono::{Datelike, Timelike};

use crate::document::{Document, QuakeMlDocument};
use crate::schema::{LayerKind, Synthetic, TimeComponent};
use walker::Scope;

/// Produces layers from documents under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: OutputConfig,
}

impl Projector {
    /// Create a projector
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Columns a catalog layer will have
    pub fn schema(&self, layer: LayerKind) -> LayerSchema {
        LayerSchema::for_layer(layer, &self.config)
    }

    /// The natural layer of a document: MDPs when a QuakeML document
    /// carries macroseismic points, otherwise its only layer
    pub fn project<'a>(&'a self, document: &'a Document) -> Layer<'a> {
        match document {
            Document::QuakeMl(doc) => self.project_quakeml(doc, default_quakeml_layer(doc)),
            Document::StationXml(doc) => self.stations(doc),
            Document::Text(table) => self.text(table),
        }
    }

    /// Project a QuakeML document to the events or MDP layer
    pub fn project_quakeml<'a>(&'a self, doc: &'a QuakeMlDocument, layer: LayerKind) -> Layer<'a> {
        match layer {
            LayerKind::Mdp => self.mdps(doc),
            _ => self.events(doc),
        }
    }

    /// Fill the cells of one row from the entities in scope
    fn fill(
        &self,
        schema: &LayerSchema,
        scope: &Scope,
        synthetic: impl Fn(Synthetic) -> Option<bool>,
    ) -> Vec<FieldValue> {
        let mut values: Vec<FieldValue> = schema
            .fields
            .iter()
            .map(|field| {
                let Some(def) = field.def else {
                    return FieldValue::Null;
                };
                if let Some(kind) = def.synthetic {
                    return synthetic(kind).map_or(FieldValue::Null, FieldValue::Boolean);
                }
                let value = scope
                    .resolve(def.source)
                    .map_or(FieldValue::Null, |v| FieldValue::coerce(v, field.field_type));
                match value {
                    FieldValue::Float(meters) if def.is_depth() => {
                        FieldValue::Float(self.config.convert_depth(meters))
                    }
                    FieldValue::Integer(meters) if def.is_depth() => {
                        FieldValue::Float(self.config.convert_depth(meters as f64))
                    }
                    other => other,
                }
            })
            .collect();
        backfill_components(schema, &mut values);
        values
    }
}

/// Events layer unless the document only holds macroseismic points
pub fn default_quakeml_layer(doc: &QuakeMlDocument) -> LayerKind {
    if doc.mdps.is_empty() {
        LayerKind::Events
    } else {
        LayerKind::Mdp
    }
}

/// Copy calendar components of timestamp cells into their companion columns
/// when those are still empty
fn backfill_components(schema: &LayerSchema, values: &mut [FieldValue]) {
    for (i, field) in schema.fields.iter().enumerate() {
        let Some(components) = field.def.and_then(|d| d.associated_components) else {
            continue;
        };
        let Some(time) = values[i].as_datetime() else {
            continue;
        };
        for (component, source) in components.entries() {
            let Some(j) = schema.index_of(source) else {
                continue;
            };
            if !values[j].is_null() {
                continue;
            }
            values[j] = match component {
                TimeComponent::Year => FieldValue::Integer(time.year() as i64),
                TimeComponent::Month => FieldValue::Integer(time.month() as i64),
                TimeComponent::Day => FieldValue::Integer(time.day() as i64),
                TimeComponent::Hour => FieldValue::Integer(time.hour() as i64),
                TimeComponent::Minute => FieldValue::Integer(time.minute() as i64),
                TimeComponent::Second => FieldValue::Float(
                    time.second() as f64 + time.nanosecond() as f64 / 1e9,
                ),
            };
        }
    }
}
