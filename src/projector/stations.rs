use super::walker::Scope;
use super::{FeatureRow, Geometry, Layer, ProjectionError, Projector};
use crate::document::StationXmlDocument;
use crate::model::ToDict;
use crate::schema::LayerKind;

const INVENTORY: &str = "FDSNStationXML";
const NETWORK: &str = "FDSNStationXML>Network";
const STATION: &str = "FDSNStationXML>Network>Station";

impl Projector {
    /// Station layer: one row per network station, Z is the elevation
    pub fn stations<'a>(&'a self, doc: &'a StationXmlDocument) -> Layer<'a> {
        let schema = self.schema(LayerKind::Stations);
        let row_schema = schema.clone();
        let header = doc.inventory.to_dict();

        let rows = doc.stations().map(move |(network, station)| {
            let mut scope = Scope::new();
            scope
                .bind(INVENTORY, header.clone())
                .bind(NETWORK, network.to_dict())
                .bind(STATION, station.to_dict());

            let values = self.fill(&row_schema, &scope, |_| None);
            let geometry = station.coordinates().map_or(Geometry::Empty, |(x, y)| {
                Geometry::point(x, y, station.elevation)
            });
            Ok::<_, ProjectionError>(FeatureRow {
                id: format!("{}.{}", network.code, station.code),
                geometry,
                values,
            })
        });
        Layer::new(schema, Box::new(rows))
    }
}
