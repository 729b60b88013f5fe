use log::debug;
use serde_json::{Map, Value};

use super::DocumentError;
use crate::model::{Inventory, Network, Station, ToDict};
use crate::xml::{FromElement, XmlElement};

/// A parsed FDSN-StationXML inventory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationXmlDocument {
    /// Document header and networks
    pub inventory: Inventory,
}

impl StationXmlDocument {
    /// Parse an `FDSNStationXML` document
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let root = XmlElement::parse(bytes)?;
        if !root.is("FDSNStationXML") {
            return Err(DocumentError::UnexpectedRoot {
                expected: "FDSNStationXML",
                found: root.local_name().to_string(),
            });
        }
        let inventory = Inventory::from_element(&root)?;
        debug!(
            "Loaded {} networks with {} stations",
            inventory.networks.len(),
            inventory.networks.iter().map(|n| n.stations.len()).sum::<usize>()
        );
        Ok(Self { inventory })
    }

    /// Networks in document order
    pub fn networks(&self) -> &[Network] {
        &self.inventory.networks
    }

    /// Every `(network, station)` pair
    pub fn stations(&self) -> impl Iterator<Item = (&Network, &Station)> {
        self.inventory
            .networks
            .iter()
            .flat_map(|n| n.stations.iter().map(move |s| (n, s)))
    }

    /// Number of stations over all networks
    pub fn station_count(&self) -> usize {
        self.inventory.networks.iter().map(|n| n.stations.len()).sum()
    }

    /// Concatenate another inventory. Stations already present under the
    /// same `NET.STA` code are dropped; returns how many were dropped.
    pub fn merge(&mut self, other: StationXmlDocument) -> usize {
        let mut duplicates = 0;
        for network in other.inventory.networks {
            match self
                .inventory
                .networks
                .iter_mut()
                .find(|n| n.code == network.code)
            {
                Some(existing) => {
                    for station in network.stations {
                        if existing.stations.iter().any(|s| s.code == station.code) {
                            duplicates += 1;
                        } else {
                            existing.stations.push(station);
                        }
                    }
                }
                None => self.inventory.networks.push(network),
            }
        }
        duplicates
    }

    /// Dictionary view: header fields plus nested networks and stations
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut dict = self.inventory.to_dict();
        let networks = self
            .inventory
            .networks
            .iter()
            .map(|network| {
                let mut d = network.to_dict();
                let stations = network
                    .stations
                    .iter()
                    .map(|s| Value::Object(s.to_dict()))
                    .collect();
                d.insert("Station".to_string(), Value::Array(stations));
                Value::Object(d)
            })
            .collect();
        dict.insert("Network".to_string(), Value::Array(networks));
        dict
    }
}
