use serde::{Deserialize, Serialize};

/// Scalar type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 text
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
    /// Boolean flag
    Boolean,
    /// UTC timestamp
    DateTime,
}

impl FieldType {
    /// Lowercase type name
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::DateTime => "datetime",
        }
    }
}

/// Output layer produced by the projector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// One row per event magnitude/origin
    Events,
    /// One row per macroseismic data point
    Mdp,
    /// One row per network station
    Stations,
}

/// Catalog group a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    /// Event-level attributes
    #[serde(rename = "basic_event_info")]
    BasicEventInfo,
    /// Origin attributes
    #[serde(rename = "origin")]
    Origin,
    /// Magnitude attributes
    #[serde(rename = "magnitude")]
    Magnitude,
    /// Macroseismic event attributes
    #[serde(rename = "macro_basic_event_info")]
    MacroBasicEventInfo,
    /// MDP set attributes
    #[serde(rename = "mdpSet")]
    MdpSet,
    /// MDP attributes
    #[serde(rename = "mdp")]
    Mdp,
    /// Place attributes
    #[serde(rename = "place")]
    Place,
    /// StationXML document header
    #[serde(rename = "general")]
    General,
    /// Network attributes
    #[serde(rename = "network")]
    Network,
    /// Station attributes
    #[serde(rename = "station")]
    Station,
}

impl FieldGroup {
    /// Group name as used in settings files
    pub fn name(&self) -> &'static str {
        match self {
            FieldGroup::BasicEventInfo => "basic_event_info",
            FieldGroup::Origin => "origin",
            FieldGroup::Magnitude => "magnitude",
            FieldGroup::MacroBasicEventInfo => "macro_basic_event_info",
            FieldGroup::MdpSet => "mdpSet",
            FieldGroup::Mdp => "mdp",
            FieldGroup::Place => "place",
            FieldGroup::General => "general",
            FieldGroup::Network => "network",
            FieldGroup::Station => "station",
        }
    }

    /// Groups whose fields describe a QuakeML event
    pub const QUAKE: [FieldGroup; 3] = [
        FieldGroup::BasicEventInfo,
        FieldGroup::Origin,
        FieldGroup::Magnitude,
    ];

    /// Groups whose fields describe macroseismic entities
    pub const MACRO: [FieldGroup; 4] = [
        FieldGroup::MacroBasicEventInfo,
        FieldGroup::MdpSet,
        FieldGroup::Mdp,
        FieldGroup::Place,
    ];

    /// Groups whose fields describe a station inventory
    pub const STATION: [FieldGroup; 3] = [
        FieldGroup::General,
        FieldGroup::Network,
        FieldGroup::Station,
    ];
}

/// Values computed by the projector instead of read from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Synthetic {
    /// The row's origin is the event's preferred origin
    IsPreferredOrigin,
    /// The row's magnitude is the event's preferred magnitude
    IsPreferredMagnitude,
}

/// Sibling fields filled from the components of a timestamp field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociatedComponents {
    /// Source path receiving the year
    pub year: &'static str,
    /// Source path receiving the month
    pub month: &'static str,
    /// Source path receiving the day
    pub day: &'static str,
    /// Source path receiving the hour
    pub hour: &'static str,
    /// Source path receiving the minute
    pub minute: &'static str,
    /// Source path receiving the second
    pub second: &'static str,
}

impl AssociatedComponents {
    /// `(component, source path)` pairs in calendar order
    pub fn entries(&self) -> [(TimeComponent, &'static str); 6] {
        [
            (TimeComponent::Year, self.year),
            (TimeComponent::Month, self.month),
            (TimeComponent::Day, self.day),
            (TimeComponent::Hour, self.hour),
            (TimeComponent::Minute, self.minute),
            (TimeComponent::Second, self.second),
        ]
    }
}

/// A calendar component of a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeComponent {
    /// Year
    Year,
    /// Month
    Month,
    /// Day of month
    Day,
    /// Hour
    Hour,
    /// Minute
    Minute,
    /// Second with fraction
    Second,
}

/// One entry of the field catalog.
///
/// `source` is the canonical `>`-separated path and identifies the field in
/// selections; the short and long names are only column labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Canonical source path, e.g. `eventParameters>event>origin>depth>value`
    pub source: &'static str,
    /// Column name of at most 10 characters (shapefile-safe)
    pub short_name: &'static str,
    /// Descriptive column name
    pub long_name: &'static str,
    /// Scalar type
    pub field_type: FieldType,
    /// Catalog group
    pub group: FieldGroup,
    /// Selected when no explicit selection exists
    pub default_selected: bool,
    /// Computed value, if any
    pub synthetic: Option<Synthetic>,
    /// Companion component fields of a timestamp
    pub associated_components: Option<&'static AssociatedComponents>,
}

impl FieldDef {
    pub(crate) const fn new(
        source: &'static str,
        short_name: &'static str,
        long_name: &'static str,
        field_type: FieldType,
        group: FieldGroup,
    ) -> Self {
        Self {
            source,
            short_name,
            long_name,
            field_type,
            group,
            default_selected: false,
            synthetic: None,
            associated_components: None,
        }
    }

    pub(crate) const fn selected(mut self) -> Self {
        self.default_selected = true;
        self
    }

    pub(crate) const fn computed(mut self, synthetic: Synthetic) -> Self {
        self.synthetic = Some(synthetic);
        self
    }

    pub(crate) const fn with_components(mut self, components: &'static AssociatedComponents) -> Self {
        self.associated_components = Some(components);
        self
    }

    /// Column label for the chosen naming scheme
    pub fn column_name(&self, short: bool) -> &'static str {
        if short {
            self.short_name
        } else {
            self.long_name
        }
    }

    /// Whether the field is the origin depth, which gets unit and sign
    /// conversion on output
    pub fn is_depth(&self) -> bool {
        self.source.ends_with(">depth>value")
    }
}
