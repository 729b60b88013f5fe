use indexmap::IndexMap;
use log::{debug, info};
use serde_json::{Map, Value};

use super::DocumentError;
use crate::model::{Event, MacroEvent, Magnitude, Mdp, MdpSet, Origin, Place, ToDict};
use crate::xml::{FromElement, XmlElement};

/// Root element names accepted as an event document
const QUAKEML_ROOTS: [&str; 3] = ["quakeml", "eventParameters", "macroseismicParameters"];

/// Entity tables of one fetch session, keyed by public ID.
///
/// Tables keep insertion order so projection follows document order.
/// Follow-up replies are merged in place; nothing is removed until the next
/// [`parse_initial`](Self::parse_initial).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuakeMlDocument {
    /// Events
    pub events: IndexMap<String, Event>,
    /// Origins of every event
    pub origins: IndexMap<String, Origin>,
    /// Magnitudes of every event
    pub magnitudes: IndexMap<String, Magnitude>,
    /// Macroseismic events
    pub macro_events: IndexMap<String, MacroEvent>,
    /// MDP sets
    pub mdp_sets: IndexMap<String, MdpSet>,
    /// Macroseismic data points
    pub mdps: IndexMap<String, Mdp>,
    /// Places referenced by MDPs
    pub places: IndexMap<String, Place>,
}

impl QuakeMlDocument {
    /// Parse a complete reply into a fresh document
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let mut document = Self::default();
        document.parse_initial(bytes)?;
        Ok(document)
    }

    /// Clear every table and load `bytes`
    pub fn parse_initial(&mut self, bytes: &[u8]) -> Result<(), DocumentError> {
        self.clear();
        self.add_events(bytes)
    }

    /// Load further events and macroseismic entities without clearing.
    ///
    /// An event already present is updated in place; its origin and
    /// magnitude memberships are unioned.
    pub fn add_events(&mut self, bytes: &[u8]) -> Result<(), DocumentError> {
        let root = XmlElement::parse(bytes)?;
        let container = event_container(&root)?;
        let before = self.events.len();

        for element in container.children_named("event") {
            self.load_event(element)?;
        }
        // places first so later entities can refer to them
        for element in container.children_named("place") {
            let place = Place::from_element(element)?;
            self.places.insert(place.public_id.clone(), place);
        }
        for element in container.children_named("mdp") {
            let mdp = Mdp::from_element(element)?;
            self.mdps.insert(mdp.public_id.clone(), mdp);
        }
        for element in container.children_named("macroseismicEvent") {
            let macro_event = MacroEvent::from_element(element)?;
            self.macro_events
                .insert(macro_event.public_id.clone(), macro_event);
        }
        for element in container.children_named("mdpSet") {
            let set = MdpSet::from_element(element)?;
            self.mdp_sets.insert(set.public_id.clone(), set);
        }

        debug!(
            "Loaded {} new events ({} origins, {} magnitudes, {} MDPs in session)",
            self.events.len() - before,
            self.origins.len(),
            self.magnitudes.len(),
            self.mdps.len()
        );
        Ok(())
    }

    /// Merge a reply carrying the detail of a previously referenced origin.
    ///
    /// Every `origin` and `magnitude` anywhere in the reply is added, and
    /// attached to the events that reference it.
    pub fn parse_missing_origin(&mut self, bytes: &[u8]) -> Result<(), DocumentError> {
        let root = XmlElement::parse(bytes)?;
        let origins = if root.is("origin") {
            vec![&root]
        } else {
            root.descendants_named("origin")
        };
        let magnitudes = if root.is("magnitude") {
            vec![&root]
        } else {
            root.descendants_named("magnitude")
        };

        for element in origins {
            let origin = Origin::from_element(element)?;
            let id = origin.public_id.clone();
            self.origins.insert(id.clone(), origin);
            for event in self.events.values_mut() {
                let referenced = event.is_preferred_origin(&id)
                    || event.magnitude_ids.iter().any(|m| {
                        self.magnitudes
                            .get(m)
                            .and_then(|m| m.origin_id.as_deref())
                            == Some(id.as_str())
                    });
                if referenced {
                    event.add_origin_id(&id);
                }
            }
            info!("Resolved missing origin {}", id);
        }
        for element in magnitudes {
            let magnitude = Magnitude::from_element(element)?;
            let id = magnitude.public_id.clone();
            for event in self.events.values_mut() {
                if event.is_preferred_magnitude(&id) {
                    event.add_magnitude_id(&id);
                }
            }
            self.magnitudes.insert(id, magnitude);
        }
        Ok(())
    }

    /// Origin IDs referenced by an event or its magnitudes but not loaded.
    ///
    /// Reported once each, in order of first reference.
    pub fn scan_for_missing_origins(&self) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        let mut note = |id: &str| {
            if !self.origins.contains_key(id) && !missing.iter().any(|m| m == id) {
                missing.push(id.to_string());
            }
        };
        for event in self.events.values() {
            if let Some(id) = &event.preferred_origin_id {
                note(id);
            }
            for magnitude_id in &event.magnitude_ids {
                if let Some(id) = self
                    .magnitudes
                    .get(magnitude_id)
                    .and_then(|m| m.origin_id.as_deref())
                {
                    note(id);
                }
            }
        }
        missing
    }

    /// Concatenate another document, keeping the first copy of every entity
    pub fn merge(&mut self, other: QuakeMlDocument) -> usize {
        let mut duplicates = 0;
        for (id, event) in other.events {
            if self.events.contains_key(&id) {
                duplicates += 1;
            } else {
                self.events.insert(id, event);
            }
        }
        fn absorb<T>(into: &mut IndexMap<String, T>, from: IndexMap<String, T>) {
            for (id, entity) in from {
                into.entry(id).or_insert(entity);
            }
        }
        absorb(&mut self.origins, other.origins);
        absorb(&mut self.magnitudes, other.magnitudes);
        absorb(&mut self.macro_events, other.macro_events);
        absorb(&mut self.mdp_sets, other.mdp_sets);
        absorb(&mut self.mdps, other.mdps);
        absorb(&mut self.places, other.places);
        duplicates
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Whether no event or MDP was loaded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.mdps.is_empty()
    }

    /// Public IDs of the loaded events, in document order
    pub fn event_ids(&self) -> Vec<String> {
        self.events.keys().cloned().collect()
    }

    /// The MDP set listing `mdp_id` as a member
    pub fn set_of_mdp(&self, mdp_id: &str) -> Option<&MdpSet> {
        self.mdp_sets.values().find(|s| s.contains(mdp_id))
    }

    /// The macroseismic event an MDP set belongs to
    pub fn macro_event_of_set(&self, set_id: &str) -> Option<&MacroEvent> {
        self.macro_events.values().find(|m| {
            m.preferred_mdp_set_id.as_deref() == Some(set_id)
                || m.mdp_set_references.iter().any(|r| r == set_id)
        })
    }

    /// The macroseismic event describing a QuakeML event
    pub fn macro_event_of_event(&self, event_id: &str) -> Option<&MacroEvent> {
        self.macro_events
            .values()
            .find(|m| m.event_reference.as_deref() == Some(event_id))
    }

    /// Dictionary view of every table
    pub fn to_dict(&self) -> Map<String, Value> {
        fn table<T: ToDict>(entities: &IndexMap<String, T>) -> Value {
            Value::Array(
                entities
                    .values()
                    .map(|e| Value::Object(e.to_dict()))
                    .collect(),
            )
        }
        let mut dict = Map::new();
        let events = self
            .events
            .values()
            .map(|event| {
                let mut d = event.to_dict();
                let members = |ids: &[String]| {
                    Value::Array(ids.iter().map(|i| Value::String(i.clone())).collect())
                };
                d.insert("originIDs".to_string(), members(&event.origin_ids));
                d.insert("magnitudeIDs".to_string(), members(&event.magnitude_ids));
                Value::Object(d)
            })
            .collect();
        dict.insert("event".to_string(), Value::Array(events));
        dict.insert("origin".to_string(), table(&self.origins));
        dict.insert("magnitude".to_string(), table(&self.magnitudes));
        dict.insert("macroseismicEvent".to_string(), table(&self.macro_events));
        dict.insert("mdpSet".to_string(), table(&self.mdp_sets));
        dict.insert("mdp".to_string(), table(&self.mdps));
        dict.insert("place".to_string(), table(&self.places));
        dict
    }

    fn load_event(&mut self, element: &XmlElement) -> Result<(), DocumentError> {
        let mut event = Event::from_element(element)?;
        for child in element.children_named("origin") {
            let origin = Origin::from_element(child)?;
            event.add_origin_id(&origin.public_id);
            self.origins.insert(origin.public_id.clone(), origin);
        }
        for child in element.children_named("magnitude") {
            let magnitude = Magnitude::from_element(child)?;
            event.add_magnitude_id(&magnitude.public_id);
            self.magnitudes
                .insert(magnitude.public_id.clone(), magnitude);
        }

        match self.events.get_mut(&event.public_id) {
            Some(existing) => {
                let origin_ids = std::mem::take(&mut event.origin_ids);
                let magnitude_ids = std::mem::take(&mut event.magnitude_ids);
                event.origin_ids = std::mem::take(&mut existing.origin_ids);
                event.magnitude_ids = std::mem::take(&mut existing.magnitude_ids);
                for id in &origin_ids {
                    event.add_origin_id(id);
                }
                for id in &magnitude_ids {
                    event.add_magnitude_id(id);
                }
                *existing = event;
            }
            None => {
                self.events.insert(event.public_id.clone(), event);
            }
        }
        Ok(())
    }
}

/// Element whose children are the events and macroseismic entities
fn event_container(root: &XmlElement) -> Result<&XmlElement, DocumentError> {
    if !QUAKEML_ROOTS.iter().any(|r| root.is(r)) {
        return Err(DocumentError::UnexpectedRoot {
            expected: "QuakeML",
            found: root.local_name().to_string(),
        });
    }
    if root.is("quakeml") {
        if let Some(params) = root
            .child("eventParameters")
            .or_else(|| root.child("macroseismicParameters"))
        {
            return Ok(params);
        }
    }
    Ok(root)
}
