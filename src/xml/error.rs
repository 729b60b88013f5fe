/// Errors raised while building the element tree
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// Malformed XML reported by the pull parser
    #[error("XML parsing error: {0}")]
    Malformed(#[from] quick_xml::Error),

    /// Attribute could not be decoded
    #[error("Invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// UTF-8 encoding error in an element or attribute name
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Document contained no root element
    #[error("Document has no root element")]
    Empty,

    /// Input ended while elements were still open
    #[error("Unexpected end of document inside <{0}>")]
    Truncated(String),
}

/// Errors raised by the typed element accessors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElementError {
    /// A required child element or attribute is absent
    #[error("<{element}> is missing required field '{field}'")]
    MissingField {
        /// Element being read
        element: String,
        /// Name of the missing child or attribute
        field: String,
    },

    /// A required value is present but cannot be coerced
    #[error("<{element}> field '{field}' has invalid {expected} value '{value}'")]
    InvalidValue {
        /// Element being read
        element: String,
        /// Name of the child or attribute
        field: String,
        /// Raw text that failed to parse
        value: String,
        /// Expected scalar type
        expected: &'static str,
    },
}
