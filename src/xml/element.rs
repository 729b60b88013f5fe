use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;

use super::{ElementError, XmlElement};

/// Types that can be constructed from an element of the document tree
pub trait FromElement: Sized {
    /// Build `Self` from `element`, failing when a required field is absent
    fn from_element(element: &XmlElement) -> Result<Self, ElementError>;
}

/// Describes where a value lives relative to the element being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<'n> {
    /// Local name of the child element or attribute
    pub name: &'n str,
    /// Absent values are `None` instead of an error
    pub optional: bool,
    /// Read an attribute instead of a child element
    pub is_attribute: bool,
}

/// An optional child element
pub fn child(name: &str) -> Key<'_> {
    Key {
        name,
        optional: true,
        is_attribute: false,
    }
}

/// An optional attribute
pub fn attr(name: &str) -> Key<'_> {
    Key {
        name,
        optional: true,
        is_attribute: true,
    }
}

impl<'n> Key<'n> {
    /// Mark the key as required
    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }
}

/// Typed accessors over a single element.
///
/// Every accessor returns `Ok(None)` when an optional value is absent and
/// `Err(MissingField)` when a required one is. Malformed optional values are
/// logged and read as `None`; malformed required values are an error.
#[derive(Debug, Clone, Copy)]
pub struct ElementParser<'a> {
    element: &'a XmlElement,
}

impl<'a> ElementParser<'a> {
    /// Wrap an element
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// The wrapped element
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    fn missing(&self, key: Key) -> ElementError {
        ElementError::MissingField {
            element: self.element.local_name().to_string(),
            field: key.name.to_string(),
        }
    }

    fn invalid(&self, key: Key, value: &str, expected: &'static str) -> ElementError {
        ElementError::InvalidValue {
            element: self.element.local_name().to_string(),
            field: key.name.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// Raw text of the attribute or child, `None` when absent
    fn raw(&self, key: Key) -> Option<&'a str> {
        if key.is_attribute {
            self.element.attribute(key.name)
        } else {
            self.element.child(key.name).map(|c| c.text())
        }
    }

    /// Read raw text and apply a conversion, honouring the optional flag
    fn convert<T>(
        &self,
        key: Key,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, ElementError> {
        let raw = match self.raw(key) {
            Some(raw) if !raw.is_empty() => raw,
            _ if key.optional => return Ok(None),
            _ => return Err(self.missing(key)),
        };
        match parse(raw) {
            Some(value) => Ok(Some(value)),
            None if key.optional => {
                debug!(
                    "Ignoring malformed {} '{}' in <{}>/{}",
                    expected,
                    raw,
                    self.element.local_name(),
                    key.name
                );
                Ok(None)
            }
            None => Err(self.invalid(key, raw, expected)),
        }
    }

    /// Text of an attribute or child element
    pub fn string(&self, key: Key) -> Result<Option<String>, ElementError> {
        self.convert(key, "string", |s| Some(s.to_string()))
    }

    /// Text of a required attribute or child element
    pub fn required_string(&self, key: Key) -> Result<String, ElementError> {
        let key = key.required();
        self.string(key)?.ok_or_else(|| self.missing(key))
    }

    /// Integer value
    pub fn int(&self, key: Key) -> Result<Option<i64>, ElementError> {
        self.convert(key, "integer", |s| s.parse().ok())
    }

    /// Floating point value
    pub fn float(&self, key: Key) -> Result<Option<f64>, ElementError> {
        self.convert(key, "float", |s| s.parse().ok())
    }

    /// Boolean value (`true`/`false`/`1`/`0`)
    pub fn boolean(&self, key: Key) -> Result<Option<bool>, ElementError> {
        self.convert(key, "boolean", parse_bool)
    }

    /// ISO-8601 timestamp interpreted as UTC
    pub fn datetime(&self, key: Key) -> Result<Option<DateTime<Utc>>, ElementError> {
        self.convert(key, "date-time", parse_datetime)
    }

    /// Nested entity built through its [`FromElement`] implementation.
    ///
    /// Errors inside an optional nested element degrade to `None`.
    pub fn element_of<T: FromElement>(&self, name: &str, optional: bool) -> Result<Option<T>, ElementError> {
        match self.element.child(name) {
            Some(child) => match T::from_element(child) {
                Ok(value) => Ok(Some(value)),
                Err(e) if optional => {
                    debug!("Ignoring optional <{}>: {}", name, e);
                    Ok(None)
                }
                Err(e) => Err(e),
            },
            None if optional => Ok(None),
            None => Err(ElementError::MissingField {
                element: self.element.local_name().to_string(),
                field: name.to_string(),
            }),
        }
    }

    /// Optional nested entity
    pub fn optional<T: FromElement>(&self, name: &str) -> Result<Option<T>, ElementError> {
        self.element_of(name, true)
    }

    /// Every child with the given name, converted; malformed entries are skipped
    pub fn all<T: FromElement>(&self, name: &str) -> Vec<T> {
        self.element
            .children_named(name)
            .filter_map(|c| match T::from_element(c) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping <{}>: {}", name, e);
                    None
                }
            })
            .collect()
    }

    /// Text of every child with the given name
    pub fn strings(&self, name: &str) -> Vec<String> {
        self.element
            .children_named(name)
            .map(|c| c.text().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Parse a boolean the way XML Schema spells it
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "1" | "True" | "TRUE" => Some(true),
        "false" | "0" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Parse `YYYY-MM-DDThh:mm:ss[.fff][Z]` or `YYYY-MM-DD` as a UTC timestamp.
///
/// Explicit offsets are honoured and converted to UTC; a missing offset is
/// read as UTC. Fractional seconds may have any number of digits.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
