//! # Entity Model
//!
//! In-memory representation of the QuakeML, macroseismic and FDSN-StationXML
//! entities. Every entity is built from an [`XmlElement`](crate::xml::XmlElement)
//! through [`FromElement`](crate::xml::FromElement) and reflected into a
//! JSON-like dictionary through [`ToDict`].
//!
//! Dictionary keys are the XML element and attribute names (`publicID`,
//! `depthType`, `Latitude`), so a `>`-separated catalog path can be walked
//! over the dictionary exactly as it would be walked over the document.
//! Absent optional values are omitted from the dictionary.
//!
//! Cross references (an origin's magnitudes, an MDP's place) are plain
//! public-ID strings and are resolved against the document tables.

mod common;
mod event;
mod macroseismic;
mod quantity;
mod station;


use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

pub use common::{Comment, CreationInfo, EventDescription, OriginQuality, OriginUncertainty};
pub use event::{Event, Magnitude, Origin};
pub use macroseismic::{MacroEvent, Mdp, MdpSet, MsIntensity, MsIntensityValue, Place};
pub use quantity::{CompositeTime, IntegerQuantity, Quantity, RealQuantity, TimeQuantity};
pub use station::{Equipment, ExternalReference, Inventory, Network, Operator, Site, Station};

/// Uniform reflection of an entity into a dictionary keyed by XML names
pub trait ToDict {
    /// Dictionary view of `self`
    fn to_dict(&self) -> Map<String, Value>;
}

impl<T: Serialize> ToDict for T {
    fn to_dict(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                warn!("Entity reflected to a non-object value: {}", other);
                Map::new()
            }
            Err(e) => {
                warn!("Entity reflection failed: {}", e);
                Map::new()
            }
        }
    }
}
