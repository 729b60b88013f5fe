use serde::{Deserialize, Serialize};

use super::{
    Comment, CompositeTime, CreationInfo, EventDescription, OriginQuality, OriginUncertainty,
    RealQuantity, TimeQuantity,
};
use crate::xml::{attr, child, ElementError, ElementParser, FromElement, XmlElement};

/// A seismic event.
///
/// Origins and magnitudes are owned by the document tables; the event only
/// records which of them were declared inside it.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// Event type, e.g. `earthquake`
    #[serde(rename = "type")]
    pub event_type: Option<String>,

    /// `known` or `suspected`
    #[serde(rename = "typeCertainty")]
    pub type_certainty: Option<String>,

    /// Region names and other descriptions
    #[serde(rename = "description", default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<EventDescription>,

    /// Preferred origin reference
    #[serde(rename = "preferredOriginID")]
    pub preferred_origin_id: Option<String>,

    /// Preferred magnitude reference
    #[serde(rename = "preferredMagnitudeID")]
    pub preferred_magnitude_id: Option<String>,

    /// Preferred focal mechanism reference
    #[serde(rename = "preferredFocalMechanismID")]
    pub preferred_focal_mechanism_id: Option<String>,

    /// Attached comments
    #[serde(rename = "comment", default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    /// Provenance
    #[serde(rename = "creationInfo")]
    pub creation_info: Option<CreationInfo>,

    /// Public IDs of origins belonging to this event, in document order
    #[serde(skip)]
    pub origin_ids: Vec<String>,

    /// Public IDs of magnitudes belonging to this event, in document order
    #[serde(skip)]
    pub magnitude_ids: Vec<String>,
}

impl Event {
    /// Whether `origin_id` is the preferred origin
    pub fn is_preferred_origin(&self, origin_id: &str) -> bool {
        self.preferred_origin_id.as_deref() == Some(origin_id)
    }

    /// Whether `magnitude_id` is the preferred magnitude
    pub fn is_preferred_magnitude(&self, magnitude_id: &str) -> bool {
        self.preferred_magnitude_id.as_deref() == Some(magnitude_id)
    }

    /// Record an origin as belonging to this event
    pub fn add_origin_id(&mut self, id: &str) {
        if !self.origin_ids.iter().any(|o| o == id) {
            self.origin_ids.push(id.to_string());
        }
    }

    /// Record a magnitude as belonging to this event
    pub fn add_magnitude_id(&mut self, id: &str) {
        if !self.magnitude_ids.iter().any(|m| m == id) {
            self.magnitude_ids.push(id.to_string());
        }
    }
}

impl FromElement for Event {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            event_type: p.string(child("type"))?,
            type_certainty: p.string(child("typeCertainty"))?,
            descriptions: p.all("description"),
            preferred_origin_id: p.string(child("preferredOriginID"))?,
            preferred_magnitude_id: p.string(child("preferredMagnitudeID"))?,
            preferred_focal_mechanism_id: p.string(child("preferredFocalMechanismID"))?,
            comments: p.all("comment"),
            creation_info: p.creation_info()?,
            origin_ids: Vec::new(),
            magnitude_ids: Vec::new(),
        })
    }
}

/// A hypocentre hypothesis
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// Origin time. Falls back to the promoted composite time.
    pub time: Option<TimeQuantity>,

    /// Longitude in decimal degrees
    pub longitude: Option<RealQuantity>,

    /// Latitude in decimal degrees
    pub latitude: Option<RealQuantity>,

    /// Depth below the reference surface in meters
    pub depth: Option<RealQuantity>,

    /// How the depth was determined
    pub depth_type: Option<String>,

    /// Whether the time was fixed by the locator
    pub time_fixed: Option<bool>,

    /// Whether the epicentre was fixed by the locator
    pub epicenter_fixed: Option<bool>,

    /// Location method reference
    #[serde(rename = "methodID")]
    pub method_id: Option<String>,

    /// Earth model reference
    #[serde(rename = "earthModelID")]
    pub earth_model_id: Option<String>,

    /// Partially known origin time
    pub composite_time: Option<CompositeTime>,

    /// Location quality
    pub quality: Option<OriginQuality>,

    /// Origin type, e.g. `hypocenter`
    #[serde(rename = "type")]
    pub origin_type: Option<String>,

    /// Flinn-Engdahl or free-text region
    pub region: Option<String>,

    /// `manual` or `automatic`
    pub evaluation_mode: Option<String>,

    /// `preliminary`, `confirmed`, `reviewed`, `final` or `rejected`
    pub evaluation_status: Option<String>,

    /// Horizontal uncertainty description
    pub origin_uncertainty: Option<OriginUncertainty>,

    /// Provenance
    pub creation_info: Option<CreationInfo>,

    /// Attached comments
    #[serde(rename = "comment", default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl Origin {
    /// Depth in meters, when known
    pub fn depth_meters(&self) -> Option<f64> {
        self.depth.as_ref().map(|d| d.value)
    }

    /// `(longitude, latitude)` when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (&self.longitude, &self.latitude) {
            (Some(lon), Some(lat)) => Some((lon.value, lat.value)),
            _ => None,
        }
    }
}

impl FromElement for Origin {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        let composite_time = p.composite_time("compositeTime");
        let time = p
            .time_quantity("time")
            .or_else(|| composite_time.as_ref().and_then(|c| c.to_time_quantity()));

        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            time,
            longitude: p.real_quantity("longitude"),
            latitude: p.real_quantity("latitude"),
            depth: p.real_quantity("depth"),
            depth_type: p.string(child("depthType"))?,
            time_fixed: p.boolean(child("timeFixed"))?,
            epicenter_fixed: p.boolean(child("epicenterFixed"))?,
            method_id: p.string(child("methodID"))?,
            earth_model_id: p.string(child("earthModelID"))?,
            composite_time,
            quality: p.optional("quality")?,
            origin_type: p.string(child("type"))?,
            region: p.string(child("region"))?,
            evaluation_mode: p.string(child("evaluationMode"))?,
            evaluation_status: p.string(child("evaluationStatus"))?,
            origin_uncertainty: p.optional("originUncertainty")?,
            creation_info: p.creation_info()?,
            comments: p.all("comment"),
        })
    }
}

/// A magnitude estimate bound to an origin
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Magnitude {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// Magnitude value
    pub mag: Option<RealQuantity>,

    /// Magnitude type, e.g. `Mw`
    #[serde(rename = "type")]
    pub magnitude_type: Option<String>,

    /// Origin the magnitude was computed for
    #[serde(rename = "originID")]
    pub origin_id: Option<String>,

    /// Method reference
    #[serde(rename = "methodID")]
    pub method_id: Option<String>,

    /// Number of contributing stations
    pub station_count: Option<i64>,

    /// Largest azimuthal gap of contributing stations
    pub azimuthal_gap: Option<f64>,

    /// `manual` or `automatic`
    pub evaluation_mode: Option<String>,

    /// Review status
    pub evaluation_status: Option<String>,

    /// Provenance
    pub creation_info: Option<CreationInfo>,

    /// Attached comments
    #[serde(rename = "comment", default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl FromElement for Magnitude {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            mag: p.real_quantity("mag"),
            magnitude_type: p.string(child("type"))?,
            origin_id: p.string(child("originID"))?,
            method_id: p.string(child("methodID"))?,
            station_count: p.int(child("stationCount"))?,
            azimuthal_gap: p.float(child("azimuthalGap"))?,
            evaluation_mode: p.string(child("evaluationMode"))?,
            evaluation_status: p.string(child("evaluationStatus"))?,
            creation_info: p.creation_info()?,
            comments: p.all("comment"),
        })
    }
}
