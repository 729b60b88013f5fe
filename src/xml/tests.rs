use super::*;
use chrono::{Datelike, TimeZone, Timelike, Utc};

use super::element::{parse_bool, parse_datetime};

const SMALL_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<q:quakeml xmlns:q="http://quakeml.org/xmlns/quakeml/1.2" xmlns:ms="http://example.org/macro">
  <eventParameters publicID="smi:test/params">
    <event publicID="smi:test/event/1">
      <type>earthquake</type>
      <description><text>Northern &amp; Central Italy</text></description>
      <ms:note><![CDATA[raw <text>]]></ms:note>
    </event>
    <ms:place publicID="smi:test/place/1"/>
  </eventParameters>
</q:quakeml>"#;

#[test]
fn test_parse_tree() {
    let root = XmlElement::parse(SMALL_DOC.as_bytes()).unwrap();
    assert_eq!(root.name, "q:quakeml");
    assert_eq!(root.local_name(), "quakeml");

    let params = root.child("eventParameters").unwrap();
    assert_eq!(params.attribute("publicID"), Some("smi:test/params"));

    let event = params.child("event").unwrap();
    assert_eq!(event.child("type").unwrap().text(), "earthquake");
    assert_eq!(
        event.child("description").unwrap().child("text").unwrap().text(),
        "Northern & Central Italy"
    );
    assert_eq!(event.child("note").unwrap().text(), "raw <text>");

    // prefixed lookups resolve against local names
    assert!(params.child("ms:place").is_some());
    assert!(params.child("place").is_some());
}

#[test]
fn test_descendants_named() {
    let root = XmlElement::parse(SMALL_DOC.as_bytes()).unwrap();
    let places = root.descendants_named("ms:place");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].attribute("publicID"), Some("smi:test/place/1"));
    assert_eq!(root.descendants_named("event").len(), 1);
}

#[test]
fn test_attribute_values_unescaped() {
    let xml = r#"<Network code="GE" description="A &amp; B &lt;net&gt;"><Station code="APE"/></Network>"#;
    let root = XmlElement::parse(xml.as_bytes()).unwrap();
    assert_eq!(root.attribute("description"), Some("A & B <net>"));
    assert_eq!(root.child("Station").unwrap().attribute("code"), Some("APE"));
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(
        XmlElement::parse(b"<a><b></a>"),
        Err(XmlError::Malformed(_))
    ));
    assert!(matches!(XmlElement::parse(b""), Err(XmlError::Empty)));
    assert!(matches!(
        XmlElement::parse(b"<a><b>"),
        Err(XmlError::Truncated(_)) | Err(XmlError::Malformed(_))
    ));
}

fn origin_element() -> XmlElement {
    XmlElement::new("origin")
        .with_attribute("publicID", "smi:test/origin/1")
        .with_child(XmlElement::new("depthType").with_text("from location"))
        .with_child(XmlElement::new("timeFixed").with_text("false"))
        .with_child(XmlElement::new("methodID").with_text(""))
        .with_child(XmlElement::new("stationCount").with_text("12"))
        .with_child(XmlElement::new("azimuthalGap").with_text("n/a"))
        .with_child(XmlElement::new("creationTime").with_text("2013-05-02T10:11:12.5Z"))
}

#[test]
fn test_string_accessors() {
    let element = origin_element();
    let p = ElementParser::new(&element);

    assert_eq!(
        p.string(attr("publicID")).unwrap().as_deref(),
        Some("smi:test/origin/1")
    );
    assert_eq!(
        p.required_string(attr("publicID")).unwrap(),
        "smi:test/origin/1"
    );
    assert_eq!(
        p.string(child("depthType")).unwrap().as_deref(),
        Some("from location")
    );
    // present but empty reads as absent
    assert_eq!(p.string(child("methodID")).unwrap(), None);
    assert_eq!(p.string(child("region")).unwrap(), None);

    let err = p.string(child("region").required()).unwrap_err();
    assert_eq!(
        err,
        ElementError::MissingField {
            element: "origin".to_string(),
            field: "region".to_string()
        }
    );
}

#[test]
fn test_scalar_coercion() {
    let element = origin_element();
    let p = ElementParser::new(&element);

    assert_eq!(p.int(child("stationCount")).unwrap(), Some(12));
    assert_eq!(p.float(child("stationCount")).unwrap(), Some(12.0));
    assert_eq!(p.boolean(child("timeFixed")).unwrap(), Some(false));

    // malformed optional values degrade to None
    assert_eq!(p.float(child("azimuthalGap")).unwrap(), None);
    // malformed required values are errors
    assert!(matches!(
        p.float(child("azimuthalGap").required()),
        Err(ElementError::InvalidValue { expected: "float", .. })
    ));
}

#[test]
fn test_datetime_accessor() {
    let element = origin_element();
    let p = ElementParser::new(&element);
    let dt = p.datetime(child("creationTime")).unwrap().unwrap();
    assert_eq!(dt.year(), 2013);
    assert_eq!(dt.second(), 12);
    assert_eq!(dt.nanosecond(), 500_000_000);
}

#[test]
fn test_parse_datetime_variants() {
    let expected = Utc.with_ymd_and_hms(2014, 3, 1, 6, 30, 0).unwrap();
    assert_eq!(parse_datetime("2014-03-01T06:30:00"), Some(expected));
    assert_eq!(parse_datetime("2014-03-01T06:30:00Z"), Some(expected));
    assert_eq!(parse_datetime("2014-03-01T06:30:00.000Z"), Some(expected));
    assert_eq!(parse_datetime("2014-03-01T08:30:00+02:00"), Some(expected));
    assert_eq!(
        parse_datetime("2014-03-01"),
        Some(Utc.with_ymd_and_hms(2014, 3, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_datetime("yesterday"), None);
}

#[test]
fn test_parse_bool() {
    assert_eq!(parse_bool("true"), Some(true));
    assert_eq!(parse_bool("0"), Some(false));
    assert_eq!(parse_bool("maybe"), None);
}
