use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::xml::{child, ElementError, ElementParser, FromElement, XmlElement};

/// Capabilities shared by every QuakeML value container
pub trait Quantity {
    /// Type of the central value
    type Value;

    /// The central value
    fn value(&self) -> &Self::Value;

    /// Symmetric uncertainty
    fn uncertainty(&self) -> Option<f64>;

    /// Lower uncertainty bound
    fn lower_uncertainty(&self) -> Option<f64>;

    /// Upper uncertainty bound
    fn upper_uncertainty(&self) -> Option<f64>;

    /// Confidence level of the uncertainty, in percent
    fn confidence_level(&self) -> Option<f64>;
}

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, $value:ty, $accessor:ident) => {
        $(#[$meta])*
        #[serde_with::skip_serializing_none]
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            /// Central value
            pub value: $value,
            /// Symmetric uncertainty
            pub uncertainty: Option<f64>,
            /// Lower uncertainty bound
            pub lower_uncertainty: Option<f64>,
            /// Upper uncertainty bound
            pub upper_uncertainty: Option<f64>,
            /// Confidence level in percent
            pub confidence_level: Option<f64>,
        }

        impl $name {
            /// A bare value without uncertainties
            pub fn new(value: $value) -> Self {
                Self {
                    value,
                    uncertainty: None,
                    lower_uncertainty: None,
                    upper_uncertainty: None,
                    confidence_level: None,
                }
            }
        }

        impl Quantity for $name {
            type Value = $value;

            fn value(&self) -> &$value {
                &self.value
            }

            fn uncertainty(&self) -> Option<f64> {
                self.uncertainty
            }

            fn lower_uncertainty(&self) -> Option<f64> {
                self.lower_uncertainty
            }

            fn upper_uncertainty(&self) -> Option<f64> {
                self.upper_uncertainty
            }

            fn confidence_level(&self) -> Option<f64> {
                self.confidence_level
            }
        }

        impl FromElement for $name {
            fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
                let p = ElementParser::new(element);
                let value = p.$accessor(child("value").required())?.ok_or_else(|| {
                    ElementError::MissingField {
                        element: element.local_name().to_string(),
                        field: "value".to_string(),
                    }
                })?;
                Ok(Self {
                    value,
                    uncertainty: p.float(child("uncertainty"))?,
                    lower_uncertainty: p.float(child("lowerUncertainty"))?,
                    upper_uncertainty: p.float(child("upperUncertainty"))?,
                    confidence_level: p.float(child("confidenceLevel"))?,
                })
            }
        }
    };
}

quantity!(
    /// A floating point measurement (`RealQuantity`)
    RealQuantity,
    f64,
    float
);

quantity!(
    /// An integer measurement (`IntegerQuantity`)
    IntegerQuantity,
    i64,
    int
);

quantity!(
    /// A point in time with uncertainty in seconds (`TimeQuantity`)
    TimeQuantity,
    DateTime<Utc>,
    datetime
);

/// A point in time given as separate calendar components.
///
/// Used by historical catalogues where only part of the date is known.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeTime {
    /// Calendar year
    pub year: Option<IntegerQuantity>,
    /// Month (1-12)
    pub month: Option<IntegerQuantity>,
    /// Day of month (1-31)
    pub day: Option<IntegerQuantity>,
    /// Hour (0-23)
    pub hour: Option<IntegerQuantity>,
    /// Minute (0-59)
    pub minute: Option<IntegerQuantity>,
    /// Second including fraction
    pub second: Option<RealQuantity>,
}

impl CompositeTime {
    /// Promote to a [`TimeQuantity`].
    ///
    /// Requires a year. Missing month and day default to 1, missing hour,
    /// minute and second to 0. Returns `None` for impossible dates.
    pub fn to_time_quantity(&self) -> Option<TimeQuantity> {
        let year = self.year.as_ref()?.value;
        let component = |q: &Option<IntegerQuantity>, default: i64| {
            q.as_ref().map(|q| q.value).unwrap_or(default)
        };
        let month = component(&self.month, 1);
        let day = component(&self.day, 1);
        let hour = component(&self.hour, 0);
        let minute = component(&self.minute, 0);
        let second = self.second.as_ref().map(|s| s.value).unwrap_or(0.0);
        if !(0.0..61.0).contains(&second) {
            return None;
        }
        let whole = second.trunc() as u32;
        let nanos = ((second - second.trunc()) * 1e9).round() as u32;

        let date = NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )?;
        let time = date.and_hms_nano_opt(
            u32::try_from(hour).ok()?,
            u32::try_from(minute).ok()?,
            whole,
            nanos.min(999_999_999),
        )?;
        let mut quantity = TimeQuantity::new(time.and_utc());
        quantity.uncertainty = self.second.as_ref().and_then(|s| s.uncertainty);
        Some(quantity)
    }
}

impl FromElement for CompositeTime {
    fn from_element(element: &XmlElement) -> Result<Self, ElementError> {
        let p = ElementParser::new(element);
        Ok(Self {
            year: p.int_quantity("year"),
            month: p.int_quantity("month"),
            day: p.int_quantity("day"),
            hour: p.int_quantity("hour"),
            minute: p.int_quantity("minute"),
            second: p.real_quantity("second"),
        })
    }
}

/// Quantity accessors. A quantity whose `value` child is missing or empty is
/// read as absent, because services emit empty placeholder elements.
impl<'a> ElementParser<'a> {
    fn quantity<T: FromElement>(&self, name: &str) -> Option<T> {
        let element = self.element().child(name)?;
        match T::from_element(element) {
            Ok(q) => Some(q),
            Err(e) => {
                debug!("Treating <{}> as absent: {}", name, e);
                None
            }
        }
    }

    /// Child read as a [`RealQuantity`]
    pub fn real_quantity(&self, name: &str) -> Option<RealQuantity> {
        self.quantity(name)
    }

    /// Child read as an [`IntegerQuantity`]
    pub fn int_quantity(&self, name: &str) -> Option<IntegerQuantity> {
        self.quantity(name)
    }

    /// Child read as a [`TimeQuantity`]
    pub fn time_quantity(&self, name: &str) -> Option<TimeQuantity> {
        self.quantity(name)
    }

    /// Child read as a [`CompositeTime`]; absent when no component is set
    pub fn composite_time(&self, name: &str) -> Option<CompositeTime> {
        self.quantity::<CompositeTime>(name)
            .filter(|c| c != &CompositeTime::default())
    }
}
