use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Filter, ServiceError};
use crate::xml::parse_datetime;

/// HTTP status that always means "no data"
pub const NO_CONTENT: u16 = 204;

/// Family of an FDSN-style service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// FDSN-Event catalog
    #[default]
    Event,
    /// Macroseismic data point catalog
    Macroseismic,
    /// FDSN-Station inventory
    Station,
}

/// Capability flags of a service.
///
/// Keys mirror the service catalog JSON. Absent flags are `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Accepts `eventid`
    pub queryeventid: bool,
    /// Accepts circular extents
    pub querycircular: bool,
    /// Circular radii are given in kilometers rather than degrees
    pub querycircularradiuskm: bool,
    /// Accepts `eventtype`
    pub queryeventtype: bool,
    /// Accepts `updatedafter`
    pub queryupdatedafter: bool,
    /// Accepts `contributor`
    pub querycontributor: bool,
    /// Accepts `includeallorigins`
    pub queryincludeallorigins: bool,
    /// Accepts `includeallmagnitudes`
    pub queryincludeallmagnitudes: bool,
    /// Accepts `limit`
    pub querylimit: bool,
    /// Largest result the service returns for one query
    pub querylimitmaxentries: Option<u64>,
    /// Serves `format=text`
    pub outputtext: bool,
    /// Serves `format=xml`
    pub outputxml: bool,
    /// Status code the service answers with when nothing matches
    pub httpcodenodata: Option<u16>,
}

/// Filter presets of a service, applied to unset filter values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePresets {
    /// Start of the time window
    pub starttime: Option<String>,
    /// End of the time window
    pub endtime: Option<String>,
    /// Lower magnitude bound
    pub minmag: Option<f64>,
    /// Upper magnitude bound
    pub maxmag: Option<f64>,
}

/// One entry of the service catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Base URL the query string is appended to
    pub endpointurl: String,

    /// Service family
    #[serde(default, rename = "servicetype")]
    pub kind: ServiceKind,

    /// `[minLon, minLat, maxLon, maxLat]` covered by the service
    #[serde(default)]
    pub boundingbox: Option<[f64; 4]>,

    /// First date covered
    #[serde(default)]
    pub datestart: Option<String>,

    /// Last date covered
    #[serde(default)]
    pub dateend: Option<String>,

    /// Capability flags
    #[serde(default)]
    pub settings: ServiceSettings,

    /// Filter presets
    #[serde(default)]
    pub default: ServicePresets,
}

impl ServiceDescriptor {
    /// A descriptor with no capabilities beyond the endpoint
    pub fn new(endpointurl: impl Into<String>, kind: ServiceKind) -> Self {
        Self {
            endpointurl: endpointurl.into(),
            kind,
            boundingbox: None,
            datestart: None,
            dateend: None,
            settings: ServiceSettings::default(),
            default: ServicePresets::default(),
        }
    }

    /// Result limit in effect, when the service advertises one
    pub fn limit(&self) -> Option<u64> {
        self.settings
            .querylimitmaxentries
            .filter(|_| self.settings.querylimit)
    }

    /// Whether `status` is a "no data" reply for this service
    pub fn is_no_data(&self, status: u16) -> bool {
        status == NO_CONTENT || self.settings.httpcodenodata == Some(status)
    }

    /// Covered date range parsed from `datestart` / `dateend`
    pub fn date_range(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (
            self.datestart.as_deref().and_then(parse_datetime),
            self.dateend.as_deref().and_then(parse_datetime),
        )
    }

    /// Fill unset filter values from the service presets
    pub fn apply_defaults(&self, filter: &mut Filter) {
        if filter.start_time.is_none() {
            filter.start_time = self.default.starttime.as_deref().and_then(parse_datetime);
        }
        if filter.end_time.is_none() {
            filter.end_time = self.default.endtime.as_deref().and_then(parse_datetime);
        }
        if filter.min_magnitude.is_none() {
            filter.min_magnitude = self.default.minmag;
        }
        if filter.max_magnitude.is_none() {
            filter.max_magnitude = self.default.maxmag;
        }
    }
}

/// Named service descriptors in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceCatalog {
    services: IndexMap<String, ServiceDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Single(ServiceDescriptor),
    Named(IndexMap<String, ServiceDescriptor>),
}

impl ServiceCatalog {
    /// Parse a catalog: either an object of named entries or one bare entry,
    /// which is registered under `"default"`
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let services = match serde_json::from_str(json)? {
            CatalogFile::Single(service) => {
                let mut services = IndexMap::new();
                services.insert("default".to_string(), service);
                services
            }
            CatalogFile::Named(services) => services,
        };
        Ok(Self { services })
    }

    /// Read and parse a catalog file
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up a service by name
    pub fn get(&self, name: &str) -> Result<&ServiceDescriptor, ServiceError> {
        self.services
            .get(name)
            .ok_or_else(|| ServiceError::UnknownService(name.to_string()))
    }

    /// Add or replace a service
    pub fn insert(&mut self, name: impl Into<String>, service: ServiceDescriptor) {
        self.services.insert(name.into(), service);
    }

    /// Service names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Number of services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the catalog lists no service
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
