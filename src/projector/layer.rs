use log::warn;

use super::{FeatureRow, OutputConfig, ProjectionError};
use crate::schema::{self, FieldDef, FieldType, LayerKind};

/// An output column
#[derive(Debug, Clone, PartialEq)]
pub struct OutputField {
    /// Canonical source path (or text header) identifying the column
    pub source: String,
    /// Column label for the active naming scheme
    pub name: String,
    /// Scalar type
    pub field_type: FieldType,
    /// Catalog entry, absent for text columns
    pub def: Option<&'static FieldDef>,
}

impl OutputField {
    fn from_def(def: &'static FieldDef, short: bool) -> Self {
        Self {
            source: def.source.to_string(),
            name: def.column_name(short).to_string(),
            field_type: def.field_type,
            def: Some(def),
        }
    }
}

/// Ordered columns of a layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSchema {
    /// Layer name (`events`, `mdp`, `stations` or `text`)
    pub name: String,
    /// Columns in output order
    pub fields: Vec<OutputField>,
}

impl LayerSchema {
    /// Selected catalog fields of a layer, in catalog order
    pub fn for_layer(layer: LayerKind, config: &OutputConfig) -> Self {
        let groups = schema::layer_groups(layer, config.include_quake_details_in_mdp);
        let fields = schema::fields_in(&groups)
            .filter(|def| config.is_selected(def))
            .map(|def| OutputField::from_def(def, config.short_field_names))
            .collect();
        Self {
            name: layer_name(layer).to_string(),
            fields,
        }
    }

    /// Position of the column with the given source path
    pub fn index_of(&self, source: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.source == source)
    }

    /// Column labels in order
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether only the identifier and geometry are emitted
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn layer_name(layer: LayerKind) -> &'static str {
    match layer {
        LayerKind::Events => "events",
        LayerKind::Mdp => "mdp",
        LayerKind::Stations => "stations",
    }
}

/// Row stream of a layer
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<FeatureRow, ProjectionError>> + 'a>;

/// A layer: its schema and a lazy sequence of rows.
///
/// Rows are produced on demand from the document the layer borrows.
pub struct Layer<'a> {
    /// Column layout shared by every row
    pub schema: LayerSchema,
    rows: RowIter<'a>,
}

impl<'a> Layer<'a> {
    pub(crate) fn new(schema: LayerSchema, rows: RowIter<'a>) -> Self {
        Self { schema, rows }
    }

    /// Drain the layer, logging and dropping rows that failed
    pub fn collect_rows(self) -> (LayerSchema, Vec<FeatureRow>, Vec<ProjectionError>) {
        let mut rows = Vec::new();
        let mut errors = Vec::new();
        for row in self.rows {
            match row {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!("Skipping row: {}", e);
                    errors.push(e);
                }
            }
        }
        (self.schema, rows, errors)
    }
}

impl<'a> Iterator for Layer<'a> {
    type Item = Result<FeatureRow, ProjectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl std::fmt::Debug for Layer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
