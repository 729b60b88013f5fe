//! FDSN-StationXML inventory entities.
//!
//! StationXML capitalizes element names (`Latitude`, `Site`) while codes and
//! epochs are attributes (`code`, `startDate`). Reflection keeps both
//! spellings so catalog paths read like the document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::xml::{attr, child, ElementError, ElementParser, FromElement, XmlElement};

/// Document header of an inventory
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inventory {
    /// Schema version attribute
    #[serde(rename = "schemaVersion")]
    pub schema_version: Option<String>,

    /// Network or data center that generated the document
    pub source: Option<String>,

    /// Sender of the document
    pub sender: Option<String>,

    /// Software module that produced the document
    pub module: Option<String>,

    /// URI of the producing module
    #[serde(rename = "ModuleURI")]
    pub module_uri: Option<String>,

    /// Creation time of the document
    pub created: Option<DateTime<Utc>>,

    /// Networks in document order
    #[serde(skip)]
    pub networks: Vec<Network>,
}

impl FromElement for Inventory {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            schema_version: p.string(attr("schemaVersion"))?,
            source: p.string(child("Source"))?,
            sender: p.string(child("Sender"))?,
            module: p.string(child("Module"))?,
            module_uri: p.string(child("ModuleURI"))?,
            created: p.datetime(child("Created"))?,
            networks: p.all("Network"),
        })
    }
}

/// A seismic network and its stations
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Network {
    /// Network code
    #[serde(rename = "code")]
    pub code: String,

    /// Start of the network epoch
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    /// End of the network epoch
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,

    /// `open`, `closed` or `partial`
    #[serde(rename = "restrictedStatus")]
    pub restricted_status: Option<String>,

    /// Network name
    pub description: Option<String>,

    /// Operating agency
    pub operator: Option<Operator>,

    /// Stations in the network
    pub total_number_stations: Option<i64>,

    /// Stations matching the query
    pub selected_number_stations: Option<i64>,

    /// Stations in document order
    #[serde(skip)]
    pub stations: Vec<Station>,
}

impl FromElement for Network {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            code: p.required_string(attr("code"))?,
            start_date: p.datetime(attr("startDate"))?,
            end_date: p.datetime(attr("endDate"))?,
            restricted_status: p.string(attr("restrictedStatus"))?,
            description: p.string(child("Description"))?,
            operator: p.optional("Operator")?,
            total_number_stations: p.int(child("TotalNumberStations"))?,
            selected_number_stations: p.int(child("SelectedNumberStations"))?,
            stations: p.all("Station"),
        })
    }
}

/// A station epoch
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Station {
    /// Station code
    #[serde(rename = "code")]
    pub code: String,

    /// Start of the station epoch
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    /// End of the station epoch
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,

    /// `open`, `closed` or `partial`
    #[serde(rename = "restrictedStatus")]
    pub restricted_status: Option<String>,

    /// Latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    pub longitude: Option<f64>,

    /// Elevation in meters
    pub elevation: Option<f64>,

    /// Site description
    pub site: Option<Site>,

    /// First listed equipment
    pub equipment: Option<Equipment>,

    /// First listed operator
    pub operator: Option<Operator>,

    /// Date the station was first installed
    pub creation_date: Option<DateTime<Utc>>,

    /// Date the station was removed
    pub termination_date: Option<DateTime<Utc>>,

    /// Channels at the station
    pub total_number_channels: Option<i64>,

    /// Channels matching the query
    pub selected_number_channels: Option<i64>,

    /// First listed external reference
    pub external_reference: Option<ExternalReference>,
}

impl Station {
    /// `(longitude, latitude)` when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

impl FromElement for Station {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            code: p.required_string(attr("code"))?,
            start_date: p.datetime(attr("startDate"))?,
            end_date: p.datetime(attr("endDate"))?,
            restricted_status: p.string(attr("restrictedStatus"))?,
            latitude: p.float(child("Latitude"))?,
            longitude: p.float(child("Longitude"))?,
            elevation: p.float(child("Elevation"))?,
            site: p.optional("Site")?,
            equipment: p.optional("Equipment")?,
            operator: p.optional("Operator")?,
            creation_date: p.datetime(child("CreationDate"))?,
            termination_date: p.datetime(child("TerminationDate"))?,
            total_number_channels: p.int(child("TotalNumberChannels"))?,
            selected_number_channels: p.int(child("SelectedNumberChannels"))?,
            external_reference: p.optional("ExternalReference")?,
        })
    }
}

/// Where a station is located
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    /// Site name
    pub name: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Town
    pub town: Option<String>,
    /// County
    pub county: Option<String>,
    /// Region
    pub region: Option<String>,
    /// Country
    pub country: Option<String>,
}

impl FromElement for Site {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            name: p.string(child("Name"))?,
            description: p.string(child("Description"))?,
            town: p.string(child("Town"))?,
            county: p.string(child("County"))?,
            region: p.string(child("Region"))?,
            country: p.string(child("Country"))?,
        })
    }
}

/// Installed equipment
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Equipment {
    /// Equipment type
    #[serde(rename = "Type")]
    pub equipment_type: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Manufacturer
    pub manufacturer: Option<String>,
    /// Vendor
    pub vendor: Option<String>,
    /// Model
    pub model: Option<String>,
    /// Serial number
    pub serial_number: Option<String>,
    /// When the equipment was installed
    pub installation_date: Option<DateTime<Utc>>,
    /// When the equipment was removed
    pub removal_date: Option<DateTime<Utc>>,
}

impl FromElement for Equipment {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            equipment_type: p.string(child("Type"))?,
            description: p.string(child("Description"))?,
            manufacturer: p.string(child("Manufacturer"))?,
            vendor: p.string(child("Vendor"))?,
            model: p.string(child("Model"))?,
            serial_number: p.string(child("SerialNumber"))?,
            installation_date: p.datetime(child("InstallationDate"))?,
            removal_date: p.datetime(child("RemovalDate"))?,
        })
    }
}

/// Operating agency
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Operator {
    /// Agency name (first one when several are listed)
    pub agency: Option<String>,

    /// Agency web site
    pub web_site: Option<String>,
}

impl FromElement for Operator {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            agency: p.string(child("Agency"))?,
            web_site: p.string(child("WebSite"))?,
        })
    }
}

/// Link to further information about a station
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Target URI
    #[serde(rename = "URI")]
    pub uri: Option<String>,

    /// What the link points to
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

impl FromElement for ExternalReference {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            uri: p.string(child("URI"))?,
            description: p.string(child("Description"))?,
        })
    }
}
