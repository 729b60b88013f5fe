//! # Document Parser
//!
//! Turns service replies into populated entity tables:
//!
//! - [`QuakeMlDocument`] for FDSN-Event and macroseismic QuakeML, with the
//!   incremental merge operations the fetcher drives
//! - [`StationXmlDocument`] for FDSN-StationXML inventories
//! - [`TextTable`] for pipe-delimited `format=text` replies
//!
//! [`DocumentKind::detect`] sniffs which of the three a byte buffer holds.

mod error;
mod quakeml;
mod stationxml;
mod text;


use log::warn;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;

pub use error::DocumentError;
pub use quakeml::QuakeMlDocument;
pub use stationxml::StationXmlDocument;
pub use text::TextTable;

/// Format of a service reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// QuakeML event or macroseismic document
    QuakeMl,
    /// FDSN-StationXML inventory
    StationXml,
    /// Pipe-delimited text with a `#` header
    Text,
}

impl DocumentKind {
    /// Sniff the format from the first non-blank content
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
        match bytes[start] {
            b'#' => return Some(DocumentKind::Text),
            b'<' => {}
            _ => return None,
        }

        let mut reader = Reader::from_reader(&bytes[start..]);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(XmlEvent::Start(e)) | Ok(XmlEvent::Empty(e)) => {
                    let name = e.local_name();
                    return match name.as_ref() {
                        b"FDSNStationXML" => Some(DocumentKind::StationXml),
                        b"quakeml" | b"eventParameters" | b"macroseismicParameters" => {
                            Some(DocumentKind::QuakeMl)
                        }
                        _ => None,
                    };
                }
                Ok(XmlEvent::Eof) | Err(_) => return None,
                Ok(_) => {}
            }
            buf.clear();
        }
    }
}

/// A parsed reply of any supported format
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Events and macroseismic data
    QuakeMl(QuakeMlDocument),
    /// Station inventory
    StationXml(StationXmlDocument),
    /// Text records
    Text(TextTable),
}

impl Document {
    /// Detect the format and parse accordingly
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        match DocumentKind::detect(bytes) {
            Some(DocumentKind::QuakeMl) => Ok(Document::QuakeMl(QuakeMlDocument::from_bytes(bytes)?)),
            Some(DocumentKind::StationXml) => {
                Ok(Document::StationXml(StationXmlDocument::from_bytes(bytes)?))
            }
            Some(DocumentKind::Text) => Ok(Document::Text(TextTable::from_bytes(bytes)?)),
            None => Err(DocumentError::Unrecognized),
        }
    }

    /// A document of `kind` without records
    pub fn empty(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::QuakeMl => Document::QuakeMl(QuakeMlDocument::default()),
            DocumentKind::StationXml => Document::StationXml(StationXmlDocument::default()),
            DocumentKind::Text => Document::Text(TextTable::default()),
        }
    }

    /// Whether the document holds no records
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Concatenate another document of the same kind, dropping records
    /// already present. Returns how many were dropped.
    ///
    /// An empty document takes over `other` whatever its kind; a non-empty
    /// one ignores documents of another kind.
    pub fn merge(&mut self, other: Document) -> usize {
        match (self, other) {
            (Document::QuakeMl(a), Document::QuakeMl(b)) => a.merge(b),
            (Document::StationXml(a), Document::StationXml(b)) => a.merge(b),
            (Document::Text(a), Document::Text(b)) => a.merge(b),
            (this, other) if this.is_empty() => {
                *this = other;
                0
            }
            (this, other) => {
                warn!(
                    "Ignoring {:?} reply while merging into {:?} document",
                    other.kind(),
                    this.kind()
                );
                0
            }
        }
    }

    /// Format of this document
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::QuakeMl(_) => DocumentKind::QuakeMl,
            Document::StationXml(_) => DocumentKind::StationXml,
            Document::Text(_) => DocumentKind::Text,
        }
    }

    /// Number of top-level records (events, MDPs, stations or text rows)
    pub fn record_count(&self) -> usize {
        match self {
            Document::QuakeMl(doc) if doc.events.is_empty() => doc.mdps.len(),
            Document::QuakeMl(doc) => doc.event_count(),
            Document::StationXml(doc) => doc.station_count(),
            Document::Text(table) => table.len(),
        }
    }
}
