/// Row-level projection failures. The affected row is skipped; the rest of
/// the layer is still produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// A referenced entity is not in the document tables
    #[error("{kind} '{public_id}' referenced by '{referenced_by}' could not be resolved")]
    MissingReference {
        /// Entity kind, e.g. `origin` or `place`
        kind: &'static str,
        /// Public ID that failed to resolve
        public_id: String,
        /// Public ID of the referencing entity
        referenced_by: String,
    },
}

impl ProjectionError {
    pub(crate) fn missing(kind: &'static str, public_id: &str, referenced_by: &str) -> Self {
        ProjectionError::MissingReference {
            kind,
            public_id: public_id.to_string(),
            referenced_by: referenced_by.to_string(),
        }
    }
}
