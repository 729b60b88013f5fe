use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::schema::FieldType;
use crate::xml::{parse_bool, parse_datetime};

/// A typed cell of a feature row
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value
    Null,
    /// Text
    String(String),
    /// Integer
    Integer(i64),
    /// Float
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Coerce a reflected value to the column type. Values that do not fit
    /// the type become [`FieldValue::Null`].
    pub fn coerce(value: &Value, ty: FieldType) -> Self {
        match (ty, value) {
            (_, Value::Null) => FieldValue::Null,
            (FieldType::String, Value::String(s)) => FieldValue::String(s.clone()),
            (FieldType::String, Value::Array(_) | Value::Object(_)) => FieldValue::Null,
            (FieldType::String, other) => FieldValue::String(other.to_string()),
            (FieldType::Integer, Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map_or(FieldValue::Null, FieldValue::Integer),
            (FieldType::Float, Value::Number(n)) => {
                n.as_f64().map_or(FieldValue::Null, FieldValue::Float)
            }
            (FieldType::Boolean, Value::Bool(b)) => FieldValue::Boolean(*b),
            (_, Value::String(s)) => Self::parse(s, ty),
            _ => FieldValue::Null,
        }
    }

    /// Parse text into the column type; empty or malformed text is `Null`
    pub fn parse(text: &str, ty: FieldType) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return FieldValue::Null;
        }
        let parsed = match ty {
            FieldType::String => Some(FieldValue::String(text.to_string())),
            FieldType::Integer => text.parse().ok().map(FieldValue::Integer),
            FieldType::Float => text.parse().ok().map(FieldValue::Float),
            FieldType::Boolean => parse_bool(text).map(FieldValue::Boolean),
            FieldType::DateTime => parse_datetime(text).map(FieldValue::DateTime),
        };
        parsed.unwrap_or(FieldValue::Null)
    }

    /// Whether the cell is empty
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric view of the cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Timestamp view of the cell
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    /// JSON representation; timestamps become ISO-8601 strings
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Integer(v) => Value::from(*v),
            FieldValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::DateTime(t) => Value::String(format_datetime(t)),
        }
    }

    /// Text representation; `Null` is the empty string
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::DateTime(t) => format_datetime(t),
        }
    }
}

/// ISO-8601 with the shortest exact sub-second precision
pub fn format_datetime(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Point geometry of a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// No location
    Empty,
    /// `(x, y)`: longitude and latitude
    Point2 {
        /// Longitude
        x: f64,
        /// Latitude
        y: f64,
    },
    /// `(x, y, z)`: longitude, latitude and height
    Point3 {
        /// Longitude
        x: f64,
        /// Latitude
        y: f64,
        /// Height, positive upward
        z: f64,
    },
}

impl Geometry {
    /// A 2D point, or a 3D point when `z` is known
    pub fn point(x: f64, y: f64, z: Option<f64>) -> Self {
        match z {
            Some(z) => Geometry::Point3 { x, y, z },
            None => Geometry::Point2 { x, y },
        }
    }

    /// Coordinates as a vector (`[]`, `[x, y]` or `[x, y, z]`)
    pub fn coordinates(&self) -> Vec<f64> {
        match *self {
            Geometry::Empty => Vec::new(),
            Geometry::Point2 { x, y } => vec![x, y],
            Geometry::Point3 { x, y, z } => vec![x, y, z],
        }
    }

    /// Whether there is no location
    pub fn is_empty(&self) -> bool {
        matches!(self, Geometry::Empty)
    }

    /// Well-known text, e.g. `POINT Z (13.1 42.8 -9200)`
    pub fn to_wkt(&self) -> String {
        match *self {
            Geometry::Empty => "POINT EMPTY".to_string(),
            Geometry::Point2 { x, y } => format!("POINT ({} {})", x, y),
            Geometry::Point3 { x, y, z } => format!("POINT Z ({} {} {})", x, y, z),
        }
    }

    /// ISO well-known binary (little endian). Empty points use NaN coordinates.
    pub fn to_wkb(&self) -> Vec<u8> {
        let (kind, coords): (u32, Vec<f64>) = match *self {
            Geometry::Empty => (1, vec![f64::NAN, f64::NAN]),
            Geometry::Point2 { x, y } => (1, vec![x, y]),
            Geometry::Point3 { x, y, z } => (1001, vec![x, y, z]),
        };
        let mut wkb = Vec::with_capacity(5 + coords.len() * 8);
        wkb.push(1u8);
        wkb.extend_from_slice(&kind.to_le_bytes());
        for c in coords {
            wkb.extend_from_slice(&c.to_le_bytes());
        }
        wkb
    }
}

/// One output feature: identifier, geometry and one value per schema column
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Public identifier of the entity the row describes
    pub id: String,
    /// Point geometry
    pub geometry: Geometry,
    /// Cells aligned with the layer schema's fields
    pub values: Vec<FieldValue>,
}
