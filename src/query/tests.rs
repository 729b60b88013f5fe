use super::*;
use chrono::{TimeZone, Utc};

const CATALOG: &str = r#"{
  "INGV": {
    "endpointurl": "http://webservices.ingv.it/fdsnws/event/1/query?",
    "boundingbox": [6.0, 35.0, 19.0, 48.0],
    "datestart": "1985-01-01",
    "settings": {
      "queryeventid": true,
      "querycircular": true,
      "querycontributor": true,
      "querylimit": true,
      "querylimitmaxentries": 10000,
      "outputtext": true,
      "outputxml": true,
      "httpcodenodata": 404
    },
    "default": { "minmag": 4.0 }
  },
  "AHEAD": {
    "endpointurl": "https://www.emidius.eu/fdsnws/macroseismic/1/query",
    "servicetype": "macroseismic",
    "settings": { "queryeventid": true, "outputxml": true }
  }
}"#;

fn event_service() -> ServiceDescriptor {
    let mut service = ServiceDescriptor::new("http://example.org/fdsnws/event/1/query?", ServiceKind::Event);
    service.settings = ServiceSettings {
        querylimit: true,
        querylimitmaxentries: Some(1000),
        outputtext: true,
        outputxml: true,
        ..Default::default()
    };
    service
}

fn date(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn test_basic_text_query() {
    let filter = Filter {
        start_time: Some(date(2013, 1, 1)),
        end_time: Some(date(2014, 1, 1)),
        output: OutputKind::Basic,
        ..Default::default()
    };
    assert_eq!(
        to_query_string(&build_query(&filter, &event_service())),
        "starttime=2013-01-01&endtime=2014-01-01&limit=1000&format=text"
    );
    assert_eq!(
        build_url(&filter, &event_service()),
        "http://example.org/fdsnws/event/1/query?starttime=2013-01-01&endtime=2014-01-01&limit=1000&format=text"
    );
}

#[test]
fn test_unsupported_keys_dropped() {
    let filter = Filter {
        contributor: Some("ISC".to_string()),
        event_type: Some("earthquake".to_string()),
        include_all_origins: true,
        extent: Some(Extent::Circle {
            latitude: 42.0,
            longitude: 13.0,
            min_radius_km: None,
            max_radius_km: Some(100.0),
        }),
        ..Default::default()
    };
    let params = build_query(&filter, &event_service());
    let keys: Vec<_> = params.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["limit", "format"]);
}

#[test]
fn test_rectangle_and_magnitudes() {
    let filter = Filter {
        min_magnitude: Some(4.5),
        max_magnitude: Some(7.0),
        extent: Some(Extent::Rectangle {
            min_latitude: 35.0,
            max_latitude: 48.0,
            min_longitude: 6.0,
            max_longitude: 19.0,
        }),
        ..Default::default()
    };
    let query = to_query_string(&build_query(&filter, &event_service()));
    assert_eq!(
        query,
        "minmag=4.5&maxmag=7&minlatitude=35&maxlatitude=48&minlongitude=6&maxlongitude=19&limit=1000&format=xml"
    );
}

#[test]
fn test_circle_radius_units() {
    let mut service = event_service();
    service.settings.querycircular = true;
    let filter = Filter {
        extent: Some(Extent::Circle {
            latitude: 42.0,
            longitude: 13.0,
            min_radius_km: None,
            max_radius_km: Some(KM_PER_DEGREE * 2.0),
        }),
        ..Default::default()
    };
    let params = build_query(&filter, &service);
    let (_, degrees) = params.iter().find(|(k, _)| *k == "maxradius").unwrap();
    assert!((degrees.parse::<f64>().unwrap() - 2.0).abs() < 1e-9);

    service.settings.querycircularradiuskm = true;
    let params = build_query(&filter, &service);
    assert!(params.iter().any(|(k, _)| *k == "maxradiuskm"));
    assert!(!params.iter().any(|(k, _)| *k == "maxradius"));
}

#[test]
fn test_single_event_query() {
    let mut service = event_service();
    service.settings.queryeventid = true;
    service.settings.queryincludeallorigins = true;
    let filter = Filter {
        start_time: Some(date(2013, 1, 1)),
        include_all_origins: true,
        ..Default::default()
    }
    .for_event("smi:ev/1");
    assert_eq!(
        to_query_string(&build_query(&filter, &service)),
        "eventid=smi:ev/1&includeallorigins=true&format=xml"
    );
}

#[test]
fn test_macroseismic_keys() {
    let service = ServiceDescriptor::new("https://example.org/macro/query", ServiceKind::Macroseismic);
    let filter = Filter {
        min_mdps: Some(10),
        min_intensity: Some(5.5),
        include_mdps: true,
        ..Default::default()
    };
    assert_eq!(
        build_url(&filter, &service),
        "https://example.org/macro/query?minmdps=10&minintensity=5.5&includemdps=true"
    );
}

#[test]
fn test_station_query() {
    let mut service = ServiceDescriptor::new("https://example.org/station/query?a=b", ServiceKind::Station);
    service.settings.outputxml = true;
    let filter = Filter {
        start_time: Some(Utc.with_ymd_and_hms(2020, 5, 1, 12, 30, 0).unwrap()),
        min_magnitude: Some(3.0),
        network: Some("GE".to_string()),
        ..Default::default()
    };
    assert_eq!(
        build_url(&filter, &service),
        "https://example.org/station/query?a=b&starttime=2020-05-01T12:30:00&network=GE&level=station&format=xml"
    );
}

#[test]
fn test_catalog_loading() {
    let catalog = ServiceCatalog::from_json(CATALOG).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["INGV", "AHEAD"]);

    let ingv = catalog.get("INGV").unwrap();
    assert_eq!(ingv.kind, ServiceKind::Event);
    assert_eq!(ingv.limit(), Some(10000));
    assert!(ingv.is_no_data(204));
    assert!(ingv.is_no_data(404));
    assert!(!ingv.is_no_data(500));
    assert_eq!(ingv.date_range().0, Some(date(1985, 1, 1)));

    let ahead = catalog.get("AHEAD").unwrap();
    assert_eq!(ahead.kind, ServiceKind::Macroseismic);
    assert_eq!(ahead.limit(), None);

    assert!(matches!(
        catalog.get("nope"),
        Err(ServiceError::UnknownService(name)) if name == "nope"
    ));
}

#[test]
fn test_single_entry_catalog() {
    let json = r#"{"endpointurl": "http://x/query?", "settings": {"outputxml": true}}"#;
    let catalog = ServiceCatalog::from_json(json).unwrap();
    assert_eq!(catalog.get("default").unwrap().endpointurl, "http://x/query?");
    assert!(ServiceCatalog::from_json("[1, 2]").is_err());
}

#[test]
fn test_apply_defaults() {
    let catalog = ServiceCatalog::from_json(CATALOG).unwrap();
    let mut filter = Filter {
        max_magnitude: Some(6.0),
        ..Default::default()
    };
    catalog.get("INGV").unwrap().apply_defaults(&mut filter);
    assert_eq!(filter.min_magnitude, Some(4.0));
    assert_eq!(filter.max_magnitude, Some(6.0));
    assert_eq!(filter.start_time, None);
}

#[test]
fn test_bisect() {
    let filter = Filter {
        start_time: Some(date(2013, 1, 1)),
        end_time: Some(date(2013, 1, 3)),
        min_magnitude: Some(2.0),
        max_magnitude: Some(6.0),
        ..Default::default()
    };
    let (a, b) = filter.bisect_time().unwrap();
    assert_eq!(a.end_time, Some(date(2013, 1, 2)));
    assert_eq!(b.start_time, Some(date(2013, 1, 2)));
    assert_eq!(a.start_time, filter.start_time);

    let (a, b) = filter.bisect_magnitude().unwrap();
    assert_eq!(a.max_magnitude, Some(4.0));
    assert_eq!(b.min_magnitude, Some(4.0));

    assert!(Filter::default().bisect_time().is_none());
    assert!(Filter::default().bisect_magnitude().is_none());
}

#[test]
fn test_format_query_time() {
    assert_eq!(format_query_time(&date(2013, 1, 1)), "2013-01-01");
    let t = Utc.with_ymd_and_hms(2013, 1, 1, 6, 5, 4).unwrap();
    assert_eq!(format_query_time(&t), "2013-01-01T06:05:04");
}
