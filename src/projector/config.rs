use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::FieldDef;

/// Unit of emitted depth values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthUnit {
    /// As stored in QuakeML
    #[default]
    Meters,
    /// Meters divided by 1000
    Kilometers,
}

/// Output preferences handed to the projector.
///
/// This is configuration, not state: the projector never changes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Negate depths so they grow negative downward
    pub convert_negative_depths: bool,

    /// Unit of emitted depth values
    pub depth_unit: DepthUnit,

    /// Label columns with the short (at most 10 character) names
    pub short_field_names: bool,

    /// Only emit rows for the preferred origin of each event
    pub preferred_origins_only: bool,

    /// Only emit rows for the preferred magnitude of each event
    pub preferred_magnitudes_only: bool,

    /// Only emit MDPs of the preferred set of their macroseismic event
    pub preferred_mdp_set_only: bool,

    /// Add event, origin and magnitude columns to MDP rows
    pub include_quake_details_in_mdp: bool,

    /// Explicit list of selected source paths. Overrides `field_selection`.
    pub output_fields: Option<Vec<String>>,

    /// Persisted per-field selection keyed on source path. Fields without an
    /// entry use their catalog default.
    pub field_selection: BTreeMap<String, bool>,
}

impl OutputConfig {
    /// Whether a catalog field is part of the output
    pub fn is_selected(&self, field: &FieldDef) -> bool {
        match &self.output_fields {
            Some(fields) => fields.iter().any(|f| f == field.source),
            None => self
                .field_selection
                .get(field.source)
                .copied()
                .unwrap_or(field.default_selected),
        }
    }

    /// Convert a depth in meters to the configured unit and sign
    pub fn convert_depth(&self, meters: f64) -> f64 {
        let value = match self.depth_unit {
            DepthUnit::Meters => meters,
            DepthUnit::Kilometers => meters / 1000.0,
        };
        if self.convert_negative_depths {
            -value
        } else {
            value
        }
    }

    /// Select exactly the given source paths
    pub fn with_output_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}
