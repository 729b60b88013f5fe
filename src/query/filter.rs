use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Kilometers per degree of great-circle arc
pub const KM_PER_DEGREE: f64 = 111.195;

/// Spatial restriction of a query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Extent {
    /// Latitude / longitude box in decimal degrees
    Rectangle {
        /// Southern edge
        min_latitude: f64,
        /// Northern edge
        max_latitude: f64,
        /// Western edge
        min_longitude: f64,
        /// Eastern edge
        max_longitude: f64,
    },
    /// Ring around a point; radii in kilometers
    Circle {
        /// Center latitude
        latitude: f64,
        /// Center longitude
        longitude: f64,
        /// Inner radius
        min_radius_km: Option<f64>,
        /// Outer radius
        max_radius_km: Option<f64>,
    },
}

/// Reply format requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// `format=text`: one pipe-delimited line per record
    Basic,
    /// `format=xml`: full QuakeML or StationXML
    #[default]
    Extended,
}

impl OutputKind {
    /// Value of the `format` parameter
    pub fn format(&self) -> &'static str {
        match self {
            OutputKind::Basic => "text",
            OutputKind::Extended => "xml",
        }
    }
}

/// Filter values of one query. Unset values are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// Earliest origin time
    pub start_time: Option<DateTime<Utc>>,
    /// Latest origin time
    pub end_time: Option<DateTime<Utc>>,
    /// Smallest magnitude
    pub min_magnitude: Option<f64>,
    /// Largest magnitude
    pub max_magnitude: Option<f64>,
    /// Spatial restriction
    pub extent: Option<Extent>,
    /// Minimum number of MDPs per event
    pub min_mdps: Option<u32>,
    /// Minimum intensity
    pub min_intensity: Option<f64>,
    /// Single event to fetch
    pub event_id: Option<String>,
    /// Contributing agency
    pub contributor: Option<String>,
    /// Event type, e.g. `earthquake`
    pub event_type: Option<String>,
    /// Only events updated after this time
    pub updated_after: Option<DateTime<Utc>>,
    /// Ask for every origin of each event
    pub include_all_origins: bool,
    /// Ask for every magnitude of each event
    pub include_all_magnitudes: bool,
    /// Ask for macroseismic data points
    pub include_mdps: bool,
    /// Reply format
    pub output: OutputKind,
    /// Station services: network code
    pub network: Option<String>,
    /// Station services: station code
    pub station: Option<String>,
    /// Station services: location code
    pub location: Option<String>,
    /// Station services: channel code
    pub channel: Option<String>,
    /// Station services: detail level, `station` when unset
    pub level: Option<String>,
}

impl Filter {
    /// A filter for one event, keeping the include flags and output kind
    pub fn for_event(&self, event_id: impl Into<String>) -> Self {
        Self {
            event_id: Some(event_id.into()),
            include_all_origins: self.include_all_origins,
            include_all_magnitudes: self.include_all_magnitudes,
            include_mdps: self.include_mdps,
            output: self.output,
            ..Default::default()
        }
    }

    /// Split the time window in half. Needs both ends.
    pub fn bisect_time(&self) -> Option<(Filter, Filter)> {
        let (start, end) = (self.start_time?, self.end_time?);
        if end <= start {
            return None;
        }
        let middle = start + (end - start) / 2;
        let first = Filter {
            end_time: Some(middle),
            ..self.clone()
        };
        let second = Filter {
            start_time: Some(middle),
            ..self.clone()
        };
        Some((first, second))
    }

    /// Split the magnitude window in half. Needs both ends.
    pub fn bisect_magnitude(&self) -> Option<(Filter, Filter)> {
        let (min, max) = (self.min_magnitude?, self.max_magnitude?);
        if max <= min {
            return None;
        }
        let middle = (min + max) / 2.0;
        let first = Filter {
            max_magnitude: Some(middle),
            ..self.clone()
        };
        let second = Filter {
            min_magnitude: Some(middle),
            ..self.clone()
        };
        Some((first, second))
    }
}

/// ISO-8601 query value; midnight collapses to the bare date
pub fn format_query_time(t: &DateTime<Utc>) -> String {
    if t.num_seconds_from_midnight() == 0 && t.nanosecond() == 0 {
        t.format("%Y-%m-%d").to_string()
    } else if t.nanosecond() == 0 {
        t.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        t.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    }
}
