use log::debug;

use super::walker::Scope;
use super::{FeatureRow, Geometry, Layer, LayerSchema, ProjectionError, Projector};
use crate::document::QuakeMlDocument;
use crate::model::{Mdp, ToDict};
use crate::schema::{LayerKind, Synthetic};

const EVENT: &str = "eventParameters>event";
const ORIGIN: &str = "eventParameters>event>origin";
const MAGNITUDE: &str = "eventParameters>event>magnitude";
const MACRO_EVENT: &str = "eventParameters>ms:macroseismicEvent";
const MDP_SET: &str = "eventParameters>ms:mdpSet";
const MDP: &str = "eventParameters>ms:mdp";
const PLACE: &str = "eventParameters>ms:place";

impl Projector {
    /// MDP layer: one row per data point located at its place
    pub fn mdps<'a>(&'a self, doc: &'a QuakeMlDocument) -> Layer<'a> {
        let schema = self.schema(LayerKind::Mdp);
        let row_schema = schema.clone();
        let rows = doc
            .mdps
            .values()
            .filter_map(move |mdp| self.mdp_row(doc, &row_schema, mdp));
        Layer::new(schema, Box::new(rows))
    }

    fn mdp_row(
        &self,
        doc: &QuakeMlDocument,
        schema: &LayerSchema,
        mdp: &Mdp,
    ) -> Option<Result<FeatureRow, ProjectionError>> {
        let set = doc.set_of_mdp(&mdp.public_id);
        let macro_event = set
            .and_then(|s| doc.macro_event_of_set(&s.public_id))
            .or_else(|| {
                mdp.event_reference
                    .as_deref()
                    .and_then(|e| doc.macro_event_of_event(e))
            });

        if self.config.preferred_mdp_set_only {
            if let (Some(set), Some(preferred)) = (
                set,
                macro_event.and_then(|m| m.preferred_mdp_set_id.as_deref()),
            ) {
                if set.public_id != preferred {
                    debug!("Skipping MDP {} of non-preferred set", mdp.public_id);
                    return None;
                }
            }
        }

        let place = match mdp.place_reference.as_deref() {
            Some(id) => match doc.places.get(id) {
                Some(place) => Some(place),
                None => {
                    return Some(Err(ProjectionError::missing(
                        "place",
                        id,
                        &mdp.public_id,
                    )))
                }
            },
            None => None,
        };

        let mut scope = Scope::new();
        scope.bind(MDP, mdp.to_dict());
        if let Some(place) = place {
            scope.bind(PLACE, place.to_dict());
        }
        if let Some(set) = set {
            scope.bind(MDP_SET, set.to_dict());
        }
        if let Some(macro_event) = macro_event {
            scope.bind(MACRO_EVENT, macro_event.to_dict());
        }

        let mut origin = None;
        let mut magnitude = None;
        let mut event = None;
        if self.config.include_quake_details_in_mdp {
            let event_id = mdp
                .event_reference
                .as_deref()
                .or_else(|| macro_event.and_then(|m| m.event_reference.as_deref()));
            if let Some(event_id) = event_id {
                let Some(found) = doc.events.get(event_id) else {
                    return Some(Err(ProjectionError::missing(
                        "event",
                        event_id,
                        &mdp.public_id,
                    )));
                };
                event = Some(found);
                origin = macro_event
                    .and_then(|m| m.preferred_macroseismic_origin_id.as_deref())
                    .or(found.preferred_origin_id.as_deref())
                    .and_then(|id| doc.origins.get(id));
                magnitude = found
                    .preferred_magnitude_id
                    .as_deref()
                    .and_then(|id| doc.magnitudes.get(id));
                scope.bind(EVENT, found.to_dict());
                if let Some(origin) = origin {
                    scope.bind(ORIGIN, origin.to_dict());
                }
                if let Some(magnitude) = magnitude {
                    scope.bind(MAGNITUDE, magnitude.to_dict());
                }
            }
        }

        let values = self.fill(schema, &scope, |kind| {
            let event = event?;
            match kind {
                Synthetic::IsPreferredOrigin => {
                    origin.map(|o| event.is_preferred_origin(&o.public_id))
                }
                Synthetic::IsPreferredMagnitude => {
                    magnitude.map(|m| event.is_preferred_magnitude(&m.public_id))
                }
            }
        });

        let geometry = place
            .and_then(|p| p.coordinates())
            .map_or(Geometry::Empty, |(x, y)| Geometry::Point2 { x, y });

        Some(Ok(FeatureRow {
            id: mdp.public_id.clone(),
            geometry,
            values,
        }))
    }
}
