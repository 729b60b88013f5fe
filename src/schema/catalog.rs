use super::field::{AssociatedComponents, FieldDef, FieldGroup, FieldType, Synthetic};

use FieldGroup::*;
use FieldType::{Boolean, DateTime, Float, Integer};

const STRING: FieldType = FieldType::String;

/// Composite time fields that mirror the origin time
pub static ORIGIN_TIME_COMPONENTS: AssociatedComponents = AssociatedComponents {
    year: "eventParameters>event>origin>compositeTime>year>value",
    month: "eventParameters>event>origin>compositeTime>month>value",
    day: "eventParameters>event>origin>compositeTime>day>value",
    hour: "eventParameters>event>origin>compositeTime>hour>value",
    minute: "eventParameters>event>origin>compositeTime>minute>value",
    second: "eventParameters>event>origin>compositeTime>second>value",
};

/// Every field known to the projector, grouped and in output order
pub static CATALOG: &[FieldDef] = &[
    // basic_event_info
    FieldDef::new("eventParameters>event>publicID", "EventID", "Event public ID", STRING, BasicEventInfo).selected(),
    FieldDef::new("eventParameters>event>type", "EvType", "Event type", STRING, BasicEventInfo).selected(),
    FieldDef::new("eventParameters>event>typeCertainty", "EvTypeCert", "Event type certainty", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>description>text", "EvDescr", "Event description", STRING, BasicEventInfo).selected(),
    FieldDef::new("eventParameters>event>description>type", "EvDescrTyp", "Event description type", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>preferredOriginID", "PrefOrigID", "Preferred origin ID", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>preferredMagnitudeID", "PrefMagID", "Preferred magnitude ID", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>preferredFocalMechanismID", "PrefFMID", "Preferred focal mechanism ID", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>comment>text", "EvComment", "Event comment", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>creationInfo>agencyID", "EvAgency", "Event agency ID", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>creationInfo>author", "EvAuthor", "Event author", STRING, BasicEventInfo),
    FieldDef::new("eventParameters>event>creationInfo>creationTime", "EvCreated", "Event creation time", DateTime, BasicEventInfo),
    // origin
    FieldDef::new("eventParameters>event>origin>publicID", "OrigID", "Origin public ID", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>time>value", "Time", "Origin time", DateTime, Origin)
        .selected()
        .with_components(&ORIGIN_TIME_COMPONENTS),
    FieldDef::new("eventParameters>event>origin>time>uncertainty", "TimeUnc", "Origin time uncertainty", Float, Origin),
    FieldDef::new("eventParameters>event>origin>latitude>value", "Lat", "Latitude", Float, Origin).selected(),
    FieldDef::new("eventParameters>event>origin>latitude>uncertainty", "LatUnc", "Latitude uncertainty", Float, Origin),
    FieldDef::new("eventParameters>event>origin>longitude>value", "Lon", "Longitude", Float, Origin).selected(),
    FieldDef::new("eventParameters>event>origin>longitude>uncertainty", "LonUnc", "Longitude uncertainty", Float, Origin),
    FieldDef::new("eventParameters>event>origin>depth>value", "Depth", "Depth", Float, Origin).selected(),
    FieldDef::new("eventParameters>event>origin>depth>uncertainty", "DepthUnc", "Depth uncertainty", Float, Origin),
    FieldDef::new("eventParameters>event>origin>depthType", "DepthType", "Depth type", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>timeFixed", "TimeFixed", "Time fixed", Boolean, Origin),
    FieldDef::new("eventParameters>event>origin>epicenterFixed", "EpiFixed", "Epicenter fixed", Boolean, Origin),
    FieldDef::new("eventParameters>event>origin>methodID", "OrigMethod", "Origin method ID", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>earthModelID", "EarthModel", "Earth model ID", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>compositeTime>year>value", "CYear", "Composite time year", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>compositeTime>month>value", "CMonth", "Composite time month", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>compositeTime>day>value", "CDay", "Composite time day", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>compositeTime>hour>value", "CHour", "Composite time hour", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>compositeTime>minute>value", "CMinute", "Composite time minute", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>compositeTime>second>value", "CSecond", "Composite time second", Float, Origin),
    FieldDef::new("eventParameters>event>origin>type", "OrigType", "Origin type", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>region", "Region", "Region", STRING, Origin).selected(),
    FieldDef::new("eventParameters>event>origin>evaluationMode", "OrigEvMode", "Origin evaluation mode", STRING, Origin).selected(),
    FieldDef::new("eventParameters>event>origin>evaluationStatus", "OrigEvStat", "Origin evaluation status", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>quality>associatedPhaseCount", "AssocPhase", "Associated phase count", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>quality>usedPhaseCount", "UsedPhase", "Used phase count", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>quality>associatedStationCount", "AssocStat", "Associated station count", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>quality>usedStationCount", "UsedStat", "Used station count", Integer, Origin),
    FieldDef::new("eventParameters>event>origin>quality>standardError", "StdError", "Standard error", Float, Origin),
    FieldDef::new("eventParameters>event>origin>quality>azimuthalGap", "AzGap", "Azimuthal gap", Float, Origin),
    FieldDef::new("eventParameters>event>origin>quality>minimumDistance", "MinDist", "Minimum distance", Float, Origin),
    FieldDef::new("eventParameters>event>origin>quality>maximumDistance", "MaxDist", "Maximum distance", Float, Origin),
    FieldDef::new("eventParameters>event>origin>originUncertainty>horizontalUncertainty", "HorUnc", "Horizontal uncertainty", Float, Origin),
    FieldDef::new("eventParameters>event>origin>originUncertainty>preferredDescription", "HorUncDesc", "Horizontal uncertainty description", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>creationInfo>agencyID", "OrigAgency", "Origin agency ID", STRING, Origin),
    FieldDef::new("eventParameters>event>origin>IsPrefOrigin", "IsPrefOrg", "IsPrefOrigin", Boolean, Origin)
        .selected()
        .computed(Synthetic::IsPreferredOrigin),
    // magnitude
    FieldDef::new("eventParameters>event>magnitude>publicID", "MagID", "Magnitude public ID", STRING, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>mag>value", "Mag", "Magnitude", Float, Magnitude).selected(),
    FieldDef::new("eventParameters>event>magnitude>mag>uncertainty", "MagUnc", "Magnitude uncertainty", Float, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>type", "MagType", "Magnitude type", STRING, Magnitude).selected(),
    FieldDef::new("eventParameters>event>magnitude>originID", "MagOrigID", "Magnitude origin ID", STRING, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>methodID", "MagMethod", "Magnitude method ID", STRING, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>stationCount", "MagStaCnt", "Magnitude station count", Integer, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>azimuthalGap", "MagAzGap", "Magnitude azimuthal gap", Float, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>evaluationMode", "MagEvMode", "Magnitude evaluation mode", STRING, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>evaluationStatus", "MagEvStat", "Magnitude evaluation status", STRING, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>creationInfo>agencyID", "MagAgency", "Magnitude agency ID", STRING, Magnitude),
    FieldDef::new("eventParameters>event>magnitude>IsPrefMag", "IsPrefMag", "IsPrefMag", Boolean, Magnitude)
        .selected()
        .computed(Synthetic::IsPreferredMagnitude),
    // macro_basic_event_info
    FieldDef::new("eventParameters>ms:macroseismicEvent>publicID", "MacroID", "Macroseismic event ID", STRING, MacroBasicEventInfo).selected(),
    FieldDef::new("eventParameters>ms:macroseismicEvent>eventReference", "MacroEvRef", "Macroseismic event reference", STRING, MacroBasicEventInfo).selected(),
    FieldDef::new("eventParameters>ms:macroseismicEvent>preferredMDPSetID", "PrefSetID", "Preferred MDP set ID", STRING, MacroBasicEventInfo),
    FieldDef::new("eventParameters>ms:macroseismicEvent>preferredMacroseismicOriginID", "PrefMOrig", "Preferred macroseismic origin ID", STRING, MacroBasicEventInfo),
    FieldDef::new("eventParameters>ms:macroseismicEvent>creationInfo>agencyID", "MacroAgncy", "Macroseismic agency ID", STRING, MacroBasicEventInfo),
    // mdpSet
    FieldDef::new("eventParameters>ms:mdpSet>publicID", "SetID", "MDP set ID", STRING, MdpSet).selected(),
    FieldDef::new("eventParameters>ms:mdpSet>mdpCount", "SetMdpCnt", "MDP count", Integer, MdpSet),
    FieldDef::new("eventParameters>ms:mdpSet>maximumIntensity>expectedIntensity>value", "SetMaxInt", "Maximum intensity", Float, MdpSet),
    FieldDef::new("eventParameters>ms:mdpSet>maximumIntensity>macroseismicScale", "SetScale", "Maximum intensity scale", STRING, MdpSet),
    FieldDef::new("eventParameters>ms:mdpSet>methodID", "SetMethod", "MDP set method ID", STRING, MdpSet),
    FieldDef::new("eventParameters>ms:mdpSet>relatedMDPSet", "SetRelated", "Related MDP set", STRING, MdpSet),
    FieldDef::new("eventParameters>ms:mdpSet>creationInfo>agencyID", "SetAgency", "MDP set agency ID", STRING, MdpSet),
    // mdp
    FieldDef::new("eventParameters>ms:mdp>publicID", "MdpID", "MDP ID", STRING, Mdp).selected(),
    FieldDef::new("eventParameters>ms:mdp>eventReference", "MdpEvRef", "MDP event reference", STRING, Mdp),
    FieldDef::new("eventParameters>ms:mdp>placeReference", "MdpPlcRef", "MDP place reference", STRING, Mdp),
    FieldDef::new("eventParameters>ms:mdp>intensity>macroseismicScale", "Scale", "Macroseismic scale", STRING, Mdp).selected(),
    FieldDef::new("eventParameters>ms:mdp>intensity>expectedIntensity>value", "Intensity", "Expected intensity", Float, Mdp).selected(),
    FieldDef::new("eventParameters>ms:mdp>intensity>expectedIntensity>uncertainty", "IntUnc", "Intensity uncertainty", Float, Mdp),
    FieldDef::new("eventParameters>ms:mdp>intensity>maximalCredibleIntensity>value", "MaxCredInt", "Maximal credible intensity", Float, Mdp),
    FieldDef::new("eventParameters>ms:mdp>intensity>minimalCredibleIntensity>value", "MinCredInt", "Minimal credible intensity", Float, Mdp),
    FieldDef::new("eventParameters>ms:mdp>reportCount", "ReportCnt", "Report count", Integer, Mdp),
    FieldDef::new("eventParameters>ms:mdp>reportedTime>value", "RepTime", "Reported time", DateTime, Mdp),
    FieldDef::new("eventParameters>ms:mdp>quality", "MdpQuality", "MDP quality", STRING, Mdp),
    FieldDef::new("eventParameters>ms:mdp>evaluationMode", "MdpEvMode", "MDP evaluation mode", STRING, Mdp),
    FieldDef::new("eventParameters>ms:mdp>evaluationStatus", "MdpEvStat", "MDP evaluation status", STRING, Mdp),
    // place
    FieldDef::new("eventParameters>ms:place>publicID", "PlaceID", "Place ID", STRING, Place),
    FieldDef::new("eventParameters>ms:place>preferredName", "PlaceName", "Place name", STRING, Place).selected(),
    FieldDef::new("eventParameters>ms:place>referenceLatitude>value", "PlaceLat", "Place latitude", Float, Place).selected(),
    FieldDef::new("eventParameters>ms:place>referenceLongitude>value", "PlaceLon", "Place longitude", Float, Place).selected(),
    FieldDef::new("eventParameters>ms:place>horizontalUncertainty", "PlaceHUnc", "Place horizontal uncertainty", Float, Place),
    FieldDef::new("eventParameters>ms:place>type", "PlaceType", "Place type", STRING, Place),
    FieldDef::new("eventParameters>ms:place>zipCode", "ZipCode", "ZIP code", STRING, Place),
    FieldDef::new("eventParameters>ms:place>altitude>value", "Altitude", "Altitude", Float, Place),
    FieldDef::new("eventParameters>ms:place>isoCountryCode", "Country", "ISO country code", STRING, Place),
    FieldDef::new("eventParameters>ms:place>epoch", "Epoch", "Place epoch", STRING, Place),
    FieldDef::new("eventParameters>ms:place>siteMorphology", "SiteMorph", "Site morphology", STRING, Place),
    // general
    FieldDef::new("FDSNStationXML>Source", "Source", "Source", STRING, General),
    FieldDef::new("FDSNStationXML>Sender", "Sender", "Sender", STRING, General),
    FieldDef::new("FDSNStationXML>Module", "Module", "Module", STRING, General),
    FieldDef::new("FDSNStationXML>Created", "Created", "Document creation time", DateTime, General),
    // network
    FieldDef::new("FDSNStationXML>Network>code", "NetCode", "Network code", STRING, Network).selected(),
    FieldDef::new("FDSNStationXML>Network>startDate", "NetStart", "Network start date", DateTime, Network),
    FieldDef::new("FDSNStationXML>Network>endDate", "NetEnd", "Network end date", DateTime, Network),
    FieldDef::new("FDSNStationXML>Network>restrictedStatus", "NetRestr", "Network restricted status", STRING, Network),
    FieldDef::new("FDSNStationXML>Network>Description", "NetDescr", "Network description", STRING, Network).selected(),
    FieldDef::new("FDSNStationXML>Network>Operator>Agency", "NetOper", "Network operator", STRING, Network),
    FieldDef::new("FDSNStationXML>Network>TotalNumberStations", "NetTotSta", "Total number of stations", Integer, Network),
    FieldDef::new("FDSNStationXML>Network>SelectedNumberStations", "NetSelSta", "Selected number of stations", Integer, Network),
    // station
    FieldDef::new("FDSNStationXML>Network>Station>code", "StaCode", "Station code", STRING, Station).selected(),
    FieldDef::new("FDSNStationXML>Network>Station>startDate", "StaStart", "Station start date", DateTime, Station),
    FieldDef::new("FDSNStationXML>Network>Station>endDate", "StaEnd", "Station end date", DateTime, Station),
    FieldDef::new("FDSNStationXML>Network>Station>restrictedStatus", "StaRestr", "Station restricted status", STRING, Station),
    FieldDef::new("FDSNStationXML>Network>Station>Latitude", "Lat", "Latitude", Float, Station).selected(),
    FieldDef::new("FDSNStationXML>Network>Station>Longitude", "Lon", "Longitude", Float, Station).selected(),
    FieldDef::new("FDSNStationXML>Network>Station>Elevation", "Elevation", "Elevation", Float, Station).selected(),
    FieldDef::new("FDSNStationXML>Network>Station>Site>Name", "SiteName", "Site name", STRING, Station).selected(),
    FieldDef::new("FDSNStationXML>Network>Station>Site>Country", "SiteCntry", "Site country", STRING, Station),
    FieldDef::new("FDSNStationXML>Network>Station>Site>Region", "SiteRegion", "Site region", STRING, Station),
    FieldDef::new("FDSNStationXML>Network>Station>Equipment>Type", "EquipType", "Equipment type", STRING, Station),
    FieldDef::new("FDSNStationXML>Network>Station>Operator>Agency", "StaOper", "Station operator", STRING, Station),
    FieldDef::new("FDSNStationXML>Network>Station>CreationDate", "StaCreated", "Station creation date", DateTime, Station),
    FieldDef::new("FDSNStationXML>Network>Station>TerminationDate", "StaTerm", "Station termination date", DateTime, Station),
    FieldDef::new("FDSNStationXML>Network>Station>TotalNumberChannels", "NumChan", "Total number of channels", Integer, Station),
    FieldDef::new("FDSNStationXML>Network>Station>ExternalReference>URI", "ExtRefURI", "External reference URI", STRING, Station),
];
