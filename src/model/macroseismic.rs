//! Entities of the macroseismic QuakeML extension (`ms:` namespace)

use serde::{Deserialize, Serialize};

use super::{CreationInfo, RealQuantity, TimeQuantity};
use crate::xml::{attr, child, ElementError, ElementParser, FromElement, XmlElement};

/// Intensity value on a macroseismic scale
pub type MsIntensityValue = RealQuantity;

/// Intensity assessment with its credible range
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsIntensity {
    /// Scale name, e.g. `EMS-98` or `MCS`
    pub macroseismic_scale: Option<String>,

    /// Most likely intensity
    pub expected_intensity: Option<MsIntensityValue>,

    /// Upper end of the credible range
    pub maximal_credible_intensity: Option<MsIntensityValue>,

    /// Lower end of the credible range
    pub minimal_credible_intensity: Option<MsIntensityValue>,
}

impl FromElement for MsIntensity {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            macroseismic_scale: p.string(child("macroseismicScale"))?,
            expected_intensity: p.real_quantity("expectedIntensity"),
            maximal_credible_intensity: p.real_quantity("maximalCredibleIntensity"),
            minimal_credible_intensity: p.real_quantity("minimalCredibleIntensity"),
        })
    }
}

/// Links a QuakeML event to its macroseismic data point sets
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroEvent {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// The QuakeML event this macroseismic event describes
    #[serde(rename = "eventReference")]
    pub event_reference: Option<String>,

    /// Every MDP set attached to the event
    #[serde(rename = "mdpSetReference", default, skip_serializing_if = "Vec::is_empty")]
    pub mdp_set_references: Vec<String>,

    /// Preferred MDP set
    #[serde(rename = "preferredMDPSetID")]
    pub preferred_mdp_set_id: Option<String>,

    /// Origin preferred for macroseismic purposes
    #[serde(rename = "preferredMacroseismicOriginID")]
    pub preferred_macroseismic_origin_id: Option<String>,

    /// Provenance
    #[serde(rename = "creationInfo")]
    pub creation_info: Option<CreationInfo>,
}

impl FromElement for MacroEvent {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            event_reference: p.string(child("eventReference"))?,
            mdp_set_references: p.strings("mdpSetReference"),
            preferred_mdp_set_id: p.string(child("preferredMDPSetID"))?,
            preferred_macroseismic_origin_id: p.string(child("preferredMacroseismicOriginID"))?,
            creation_info: p.creation_info()?,
        })
    }
}

/// A curated collection of MDPs
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MdpSet {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// Set this one was derived from
    #[serde(rename = "relatedMDPSet")]
    pub related_mdp_set: Option<String>,

    /// Number of MDPs in the set
    #[serde(rename = "mdpCount")]
    pub mdp_count: Option<i64>,

    /// Highest intensity observed in the set
    #[serde(rename = "maximumIntensity")]
    pub maximum_intensity: Option<MsIntensity>,

    /// Method reference
    #[serde(rename = "methodID")]
    pub method_id: Option<String>,

    /// Member MDPs
    #[serde(rename = "mdpReference", default, skip_serializing_if = "Vec::is_empty")]
    pub mdp_references: Vec<String>,

    /// Provenance
    #[serde(rename = "creationInfo")]
    pub creation_info: Option<CreationInfo>,
}

impl MdpSet {
    /// Whether the set lists `mdp_id` among its members
    pub fn contains(&self, mdp_id: &str) -> bool {
        self.mdp_references.iter().any(|r| r == mdp_id)
    }
}

impl FromElement for MdpSet {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            related_mdp_set: p.string(child("relatedMDPSet"))?,
            mdp_count: p.int(child("mdpCount"))?,
            maximum_intensity: p.optional("maximumIntensity")?,
            method_id: p.string(child("methodID"))?,
            mdp_references: p.strings("mdpReference"),
            creation_info: p.creation_info()?,
        })
    }
}

/// A macroseismic data point: felt intensity observed at one place
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mdp {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// Event the observation belongs to
    pub event_reference: Option<String>,

    /// Place the observation was made at
    pub place_reference: Option<String>,

    /// Assessed intensity
    pub intensity: Option<MsIntensity>,

    /// Number of questionnaires behind the assessment
    pub report_count: Option<i64>,

    /// Time of the observation
    pub reported_time: Option<TimeQuantity>,

    /// Quality class
    pub quality: Option<String>,

    /// `manual` or `automatic`
    pub evaluation_mode: Option<String>,

    /// Review status
    pub evaluation_status: Option<String>,

    /// Provenance
    pub creation_info: Option<CreationInfo>,
}

impl FromElement for Mdp {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            event_reference: p.string(child("eventReference"))?,
            place_reference: p.string(child("placeReference"))?,
            intensity: p.optional("intensity")?,
            report_count: p.int(child("reportCount"))?,
            reported_time: p.time_quantity("reportedTime"),
            quality: p.string(child("quality"))?,
            evaluation_mode: p.string(child("evaluationMode"))?,
            evaluation_status: p.string(child("evaluationStatus"))?,
            creation_info: p.creation_info()?,
        })
    }
}

/// A named location where observations were made
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Resource identifier
    #[serde(rename = "publicID")]
    pub public_id: String,

    /// Display name
    pub preferred_name: Option<String>,

    /// Latitude of the reference point
    pub reference_latitude: Option<RealQuantity>,

    /// Longitude of the reference point
    pub reference_longitude: Option<RealQuantity>,

    /// Radius of the area the place stands for, in meters
    pub horizontal_uncertainty: Option<f64>,

    /// Place category, e.g. `locality`
    #[serde(rename = "type")]
    pub place_type: Option<String>,

    /// Postal code
    pub zip_code: Option<String>,

    /// Altitude in meters
    pub altitude: Option<RealQuantity>,

    /// ISO 3166 country code
    pub iso_country_code: Option<String>,

    /// Epoch the place definition is valid for
    pub epoch: Option<String>,

    /// Local site morphology class
    pub site_morphology: Option<String>,
}

impl Place {
    /// `(longitude, latitude)` of the reference point
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (&self.reference_longitude, &self.reference_latitude) {
            (Some(lon), Some(lat)) => Some((lon.value, lat.value)),
            _ => None,
        }
    }
}

impl FromElement for Place {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            public_id: p.required_string(attr("publicID"))?,
            preferred_name: p.string(child("preferredName"))?,
            reference_latitude: p.real_quantity("referenceLatitude"),
            reference_longitude: p.real_quantity("referenceLongitude"),
            horizontal_uncertainty: p.float(child("horizontalUncertainty"))?,
            place_type: p.string(child("type"))?,
            zip_code: p.string(child("zipCode"))?,
            altitude: p.real_quantity("altitude"),
            iso_country_code: p.string(child("isoCountryCode"))?,
            epoch: p.string(child("epoch"))?,
            site_morphology: p.string(child("siteMorphology"))?,
        })
    }
}
