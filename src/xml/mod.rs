//! # XML access layer
//!
//! QuakeML and FDSN-StationXML documents returned by web services are small
//! enough (a few MB at most, bounded by the service's `limit`) to be held
//! as a tree. This module builds that tree from a quick-xml pull parser and
//! exposes typed accessors over it.
//!
//! ## Namespace handling
//!
//! Element and attribute names are kept as written (`ms:mdp`, `q:quakeml`),
//! but every lookup compares *local* names. The macroseismic `ms:` prefix,
//! the QuakeML default namespace and unprefixed documents are therefore all
//! read the same way.

mod dom;
mod element;
mod error;

#[cfg(test)]
mod tests;

pub use dom::{local_name, XmlElement};
pub use element::{attr, child, parse_bool, parse_datetime, ElementParser, FromElement, Key};
pub use error::{ElementError, XmlError};
