use crate::xml::{ElementError, XmlError};

/// Errors raised while turning a service reply into a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The bytes are not well-formed XML
    #[error("Malformed XML: {0}")]
    Xml(#[from] XmlError),

    /// An entity lacks a required field or carries an invalid one
    #[error("Invalid entity: {0}")]
    Element(#[from] ElementError),

    /// The root element does not belong to the expected document type
    #[error("Unexpected root element <{found}>, expected {expected}")]
    UnexpectedRoot {
        /// Document type being parsed
        expected: &'static str,
        /// Local name of the root that was found
        found: String,
    },

    /// A pipe-delimited text reply could not be read
    #[error("Text format error: {0}")]
    Text(#[from] csv::Error),

    /// A text reply without a `#` header line
    #[error("Text reply has no '#' header line")]
    MissingHeader,

    /// Content is neither QuakeML, StationXML nor FDSN text
    #[error("Unrecognized document format")]
    Unrecognized,
}
