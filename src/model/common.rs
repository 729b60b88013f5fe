use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::xml::{attr, child, ElementError, ElementParser, FromElement, XmlElement};

/// Provenance of a QuakeML resource
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreationInfo {
    /// Agency code
    #[serde(rename = "agencyID")]
    pub agency_id: Option<String>,

    /// Agency URI
    #[serde(rename = "agencyURI")]
    pub agency_uri: Option<String>,

    /// Author name
    pub author: Option<String>,

    /// Author URI
    #[serde(rename = "authorURI")]
    pub author_uri: Option<String>,

    /// Time the resource was created
    #[serde(rename = "creationTime")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Version string
    pub version: Option<String>,
}

impl FromElement for CreationInfo {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            agency_id: p.string(child("agencyID"))?,
            agency_uri: p.string(child("agencyURI"))?,
            author: p.string(child("author"))?,
            author_uri: p.string(child("authorURI"))?,
            creation_time: p.datetime(child("creationTime"))?,
            version: p.string(child("version"))?,
        })
    }
}

impl<'a> ElementParser<'a> {
    /// Child read as [`CreationInfo`]
    pub fn creation_info(&self) -> Result<Option<CreationInfo>, ElementError> {
        self.optional("creationInfo")
    }
}

/// Free-text comment attached to a resource
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier
    pub id: Option<String>,

    /// Comment body
    pub text: String,

    /// Provenance
    #[serde(rename = "creationInfo")]
    pub creation_info: Option<CreationInfo>,
}

impl FromElement for Comment {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            id: p.string(attr("id"))?,
            text: p.required_string(child("text"))?,
            creation_info: p.creation_info()?,
        })
    }
}

/// Free-form event description (region name, felt report, ...)
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescription {
    /// Description text
    pub text: String,

    /// Description category, e.g. `region name`
    #[serde(rename = "type")]
    pub description_type: Option<String>,
}

impl FromElement for EventDescription {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            text: p.required_string(child("text"))?,
            description_type: p.string(child("type"))?,
        })
    }
}

/// Location quality figures of an origin
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginQuality {
    /// Phases associated with the origin
    pub associated_phase_count: Option<i64>,
    /// Phases used in the solution
    pub used_phase_count: Option<i64>,
    /// Stations associated with the origin
    pub associated_station_count: Option<i64>,
    /// Stations used in the solution
    pub used_station_count: Option<i64>,
    /// Depth phases used
    pub depth_phase_count: Option<i64>,
    /// RMS of the travel time residuals, in seconds
    pub standard_error: Option<f64>,
    /// Largest azimuthal gap, in degrees
    pub azimuthal_gap: Option<f64>,
    /// Gap when the station closing the largest gap is left out
    pub secondary_azimuthal_gap: Option<f64>,
    /// Ground truth level, e.g. `GT5`
    pub ground_truth_level: Option<String>,
    /// Farthest station, in degrees
    pub maximum_distance: Option<f64>,
    /// Closest station, in degrees
    pub minimum_distance: Option<f64>,
    /// Median station distance, in degrees
    pub median_distance: Option<f64>,
}

impl FromElement for OriginQuality {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            associated_phase_count: p.int(child("associatedPhaseCount"))?,
            used_phase_count: p.int(child("usedPhaseCount"))?,
            associated_station_count: p.int(child("associatedStationCount"))?,
            used_station_count: p.int(child("usedStationCount"))?,
            depth_phase_count: p.int(child("depthPhaseCount"))?,
            standard_error: p.float(child("standardError"))?,
            azimuthal_gap: p.float(child("azimuthalGap"))?,
            secondary_azimuthal_gap: p.float(child("secondaryAzimuthalGap"))?,
            ground_truth_level: p.string(child("groundTruthLevel"))?,
            maximum_distance: p.float(child("maximumDistance"))?,
            minimum_distance: p.float(child("minimumDistance"))?,
            median_distance: p.float(child("medianDistance"))?,
        })
    }
}

/// Horizontal location uncertainty of an origin
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginUncertainty {
    /// Circular uncertainty, in meters
    pub horizontal_uncertainty: Option<f64>,
    /// Semi-minor axis of the error ellipse
    pub min_horizontal_uncertainty: Option<f64>,
    /// Semi-major axis of the error ellipse
    pub max_horizontal_uncertainty: Option<f64>,
    /// Azimuth of the semi-major axis
    pub azimuth_max_horizontal_uncertainty: Option<f64>,
    /// Which of the descriptions above is preferred
    pub preferred_description: Option<String>,
    /// Confidence level in percent
    pub confidence_level: Option<f64>,
}

impl FromElement for OriginUncertainty {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            horizontal_uncertainty: p.float(child("horizontalUncertainty"))?,
            min_horizontal_uncertainty: p.float(child("minHorizontalUncertainty"))?,
            max_horizontal_uncertainty: p.float(child("maxHorizontalUncertainty"))?,
            azimuth_max_horizontal_uncertainty: p
                .float(child("azimuthMaxHorizontalUncertainty"))?,
            preferred_description: p.string(child("preferredDescription"))?,
            confidence_level: p.float(child("confidenceLevel"))?,
        })
    }
}
