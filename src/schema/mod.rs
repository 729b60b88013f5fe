//! # Field Catalog
//!
//! Declarative mapping from document paths to output columns. The catalog
//! is the single source of truth for both the output schema of a layer and
//! the path the projector walks to fill each column.
//!
//! ## Layers and groups
//!
//! | Layer | Groups |
//! |-------|--------|
//! | events | `basic_event_info`, `origin`, `magnitude` |
//! | mdp | `macro_basic_event_info`, `mdpSet`, `mdp`, `place` (+ event groups on request) |
//! | stations | `general`, `network`, `station` |
//!
//! ## Paths
//!
//! Source paths are `>`-separated element names starting at the document
//! container (`eventParameters` or `FDSNStationXML`). Namespace prefixes such
//! as `ms:` are allowed and ignored when walking. List-valued elements
//! (`description`, `comment`) resolve to their first entry.
//!
//! Short names never exceed 10 characters and are unique within a layer.

mod catalog;
mod field;

#[cfg(test)]
mod tests;

pub use catalog::{CATALOG, ORIGIN_TIME_COMPONENTS};
pub use field::{
    AssociatedComponents, FieldDef, FieldGroup, FieldType, LayerKind, Synthetic, TimeComponent,
};

/// Maximum length of a short column name
pub const SHORT_NAME_MAX: usize = 10;

/// The complete catalog
pub fn catalog() -> &'static [FieldDef] {
    CATALOG
}

/// Catalog entry for a source path
pub fn lookup(source: &str) -> Option<&'static FieldDef> {
    CATALOG.iter().find(|f| f.source == source)
}

/// Fields of the given groups, in catalog order
pub fn fields_in(groups: &[FieldGroup]) -> impl Iterator<Item = &'static FieldDef> + '_ {
    CATALOG.iter().filter(move |f| groups.contains(&f.group))
}

/// Groups contributing to a layer
pub fn layer_groups(layer: LayerKind, include_quake_details: bool) -> Vec<FieldGroup> {
    match layer {
        LayerKind::Events => FieldGroup::QUAKE.to_vec(),
        LayerKind::Mdp if include_quake_details => {
            let mut groups = FieldGroup::QUAKE.to_vec();
            groups.extend(FieldGroup::MACRO);
            groups
        }
        LayerKind::Mdp => FieldGroup::MACRO.to_vec(),
        LayerKind::Stations => FieldGroup::STATION.to_vec(),
    }
}

/// Column type of a known FDSN text header; unknown columns are text
pub fn text_column_type(header: &str) -> FieldType {
    match header.to_ascii_lowercase().as_str() {
        "latitude" | "longitude" | "depth/km" | "depth" | "magnitude" | "elevation"
        | "samplerate" | "azimuth" | "dip" | "scale" | "scalefreq" => FieldType::Float,
        "time" | "starttime" | "endtime" => FieldType::DateTime,
        _ => FieldType::String,
    }
}
