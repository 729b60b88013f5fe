use super::*;
use crate::query::ServiceSettings;
use crate::transport::CannedTransport;
use chrono::{TimeZone, Utc};
use crossbeam_channel::{unbounded, Receiver};

const EVENT_URL: &str = "http://svc/query?format=xml";

const MISSING_ORIGIN: &str = r#"<q:quakeml xmlns:q="http://quakeml.org/xmlns/quakeml/1.2">
  <eventParameters>
    <event publicID="smi:ev/1">
      <preferredOriginID>smi:foo/1</preferredOriginID>
    </event>
  </eventParameters>
</q:quakeml>"#;

const ORIGIN_DETAIL: &str = r#"<q:quakeml xmlns:q="http://quakeml.org/xmlns/quakeml/1.2">
  <eventParameters>
    <event publicID="smi:ev/1">
      <origin publicID="smi:foo/1">
        <latitude><value>42.5</value></latitude>
        <longitude><value>13.5</value></longitude>
        <depth><value>10000</value></depth>
      </origin>
    </event>
  </eventParameters>
</q:quakeml>"#;

fn service(kind: ServiceKind) -> ServiceDescriptor {
    let mut service = ServiceDescriptor::new("http://svc/query?", kind);
    service.settings = ServiceSettings {
        queryeventid: true,
        outputtext: true,
        outputxml: true,
        ..Default::default()
    };
    service
}

fn fetcher(transport: CannedTransport, service: ServiceDescriptor, filter: Filter) -> (Fetcher, Receiver<FetcherEvent>) {
    let (tx, rx) = unbounded();
    (Fetcher::new(Arc::new(transport), service, filter).with_events(tx), rx)
}

fn states(events: &[FetcherEvent]) -> Vec<FetchState> {
    events
        .iter()
        .filter_map(|e| match e {
            FetcherEvent::State(s) => Some(*s),
            _ => None,
        })
        .collect()
}

fn messages(events: &[FetcherEvent]) -> Vec<(Severity, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            FetcherEvent::Message { severity, text } => Some((*severity, text.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_origin_url() {
    assert_eq!(origin_url("smi:foo/1"), "http://foo/1");
    assert_eq!(origin_url("https://x/y"), "https://x/y");
}

#[test]
fn test_overall_progress() {
    assert_eq!(overall_progress(0, 0, Some(0.5)), 0.5);
    assert_eq!(overall_progress(1, 2, None), 0.25);
    assert_eq!(overall_progress(1, 0, Some(2.0)), 1.0);
}

#[test]
fn test_cancel_handle_shared() {
    let handle = CancelHandle::new();
    let other = handle.clone();
    assert!(!other.is_cancelled());
    handle.cancel();
    assert!(other.is_cancelled());
}

#[tokio::test]
async fn test_missing_origin_followup() {
    let transport = CannedTransport::new()
        .with_body(EVENT_URL, MISSING_ORIGIN)
        .with_body("http://foo/1", ORIGIN_DETAIL);
    let (mut fetcher, rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());

    let outcome = fetcher.fetch_data().await.unwrap();
    assert_eq!(outcome.requests, 2);
    assert!(outcome.limit_exceeded.is_none());
    assert_eq!(fetcher.state(), FetchState::Finished);

    let Document::QuakeMl(doc) = &outcome.document else {
        panic!("expected QuakeML");
    };
    assert!(doc.scan_for_missing_origins().is_empty());
    assert_eq!(doc.events["smi:ev/1"].origin_ids, vec!["smi:foo/1".to_string()]);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        states(&events),
        vec![
            FetchState::Requesting,
            FetchState::Parsing,
            FetchState::FetchMissing,
            FetchState::Parsing,
            FetchState::Finished,
        ]
    );
    let messages = messages(&events);
    assert_eq!(messages[0], (Severity::Info, "1 missing origins left to fetch".to_string()));
    assert_eq!(
        messages.last().unwrap(),
        &(Severity::Info, "Query returned 1 records".to_string())
    );
    assert_eq!(events.last(), Some(&FetcherEvent::Finished { records: 1 }));
    assert!(events
        .iter()
        .any(|e| matches!(e, FetcherEvent::Progress { overall, .. } if *overall > 0.0)));
}

#[tokio::test]
async fn test_unresolvable_origin_requested_once() {
    let transport = CannedTransport::new()
        .with_body(EVENT_URL, MISSING_ORIGIN)
        .with_reply("http://foo/1", 204, Vec::new());
    let (mut fetcher, rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());

    let outcome = fetcher.fetch_data().await.unwrap();
    assert_eq!(outcome.requests, 2);
    let Document::QuakeMl(doc) = &outcome.document else {
        panic!("expected QuakeML");
    };
    assert_eq!(doc.scan_for_missing_origins(), vec!["smi:foo/1".to_string()]);
    let events: Vec<_> = rx.try_iter().collect();
    assert!(messages(&events).contains(&(Severity::Warning, "No data for origin smi:foo/1".to_string())));
}

#[tokio::test]
async fn test_unreachable_origin_keeps_other_events() {
    let reply = r#"<q:quakeml xmlns:q="http://quakeml.org/xmlns/quakeml/1.2">
  <eventParameters>
    <event publicID="smi:ev/1">
      <preferredOriginID>smi:local/or/1</preferredOriginID>
    </event>
    <event publicID="smi:ev/2">
      <preferredOriginID>smi:ev/or/2</preferredOriginID>
      <origin publicID="smi:ev/or/2">
        <latitude><value>42.5</value></latitude>
        <longitude><value>13.5</value></longitude>
      </origin>
    </event>
  </eventParameters>
</q:quakeml>"#;
    // no reply is canned for http://local/or/1
    let transport = CannedTransport::new().with_body(EVENT_URL, reply);
    let (mut fetcher, rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());

    let outcome = fetcher.fetch_data().await.unwrap();
    assert_eq!(fetcher.state(), FetchState::Finished);
    assert_eq!(outcome.document.record_count(), 2);
    let Document::QuakeMl(doc) = &outcome.document else {
        panic!("expected QuakeML");
    };
    assert_eq!(doc.scan_for_missing_origins(), vec!["smi:local/or/1".to_string()]);

    let events: Vec<_> = rx.try_iter().collect();
    assert!(messages(&events)
        .iter()
        .any(|(severity, text)| *severity == Severity::Warning
            && text.starts_with("Could not fetch origin smi:local/or/1")));
    assert_eq!(events.last(), Some(&FetcherEvent::Finished { records: 2 }));

    let (_, rows, errors) = crate::projector::Projector::default()
        .events(doc)
        .collect_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "smi:ev/2");
    assert!(matches!(
        &errors[..],
        [crate::projector::ProjectionError::MissingReference { public_id, .. }] if public_id == "smi:local/or/1"
    ));
}

#[tokio::test]
async fn test_followup_http_error_is_not_terminal() {
    let transport = CannedTransport::new()
        .with_body(EVENT_URL, MISSING_ORIGIN)
        .with_reply("http://foo/1", 500, "oops");
    let (mut fetcher, _rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());

    let outcome = fetcher.fetch_data().await.unwrap();
    assert_eq!(outcome.requests, 2);
    assert_eq!(outcome.document.record_count(), 1);
    assert_eq!(fetcher.state(), FetchState::Finished);
}

#[tokio::test]
async fn test_no_data_reply() {
    let mut svc = service(ServiceKind::Event);
    svc.settings.httpcodenodata = Some(404);
    let transport = CannedTransport::new().with_reply(EVENT_URL, 404, "Not found");
    let (mut fetcher, rx) = fetcher(transport, svc, Filter::default());

    let outcome = fetcher.fetch_data().await.unwrap();
    assert!(outcome.document.is_empty());
    assert_eq!(outcome.document.kind(), DocumentKind::QuakeMl);
    let events: Vec<_> = rx.try_iter().collect();
    assert!(messages(&events).contains(&(Severity::Warning, "Query returned no records".to_string())));
    assert_eq!(events.last(), Some(&FetcherEvent::Finished { records: 0 }));
}

#[tokio::test]
async fn test_http_error_is_terminal() {
    let transport = CannedTransport::new().with_reply(EVENT_URL, 500, "oops");
    let (mut fetcher, rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());

    let err = fetcher.fetch_data().await.unwrap_err();
    assert!(matches!(err, FetchError::Network { status: 500, .. }));
    assert_eq!(fetcher.state(), FetchState::Failed);
    let events: Vec<_> = rx.try_iter().collect();
    assert!(matches!(events.last(), Some(FetcherEvent::Failed(_))));
}

#[tokio::test]
async fn test_transport_failure_is_terminal() {
    let (mut fetcher, _rx) = fetcher(CannedTransport::new(), service(ServiceKind::Event), Filter::default());
    let err = fetcher.fetch_data().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(fetcher.state(), FetchState::Failed);
}

#[tokio::test]
async fn test_malformed_reply_is_parse_error() {
    let transport = CannedTransport::new().with_body(EVENT_URL, "<q:quakeml><eventParameters>");
    let (mut fetcher, _rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());
    let err = fetcher.fetch_data().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
    assert_eq!(fetcher.state(), FetchState::Failed);
}

#[tokio::test]
async fn test_cancel_emits_only_cancelled() {
    let transport = CannedTransport::new().with_body(EVENT_URL, MISSING_ORIGIN);
    let (mut fetcher, rx) = fetcher(transport, service(ServiceKind::Event), Filter::default());
    fetcher.cancel_handle().cancel();

    let err = fetcher.fetch_data().await.unwrap_err();
    assert!(matches!(err, FetchError::Cancelled));
    assert_eq!(fetcher.state(), FetchState::Cancelled);
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, vec![FetcherEvent::Cancelled]);
}

#[tokio::test]
async fn test_text_reply_skips_followups() {
    let text = "#EventID|Time|Latitude|Longitude\nsmi:ev/1|2013-05-01T10:00:00|42.1|13.5\n";
    let transport = CannedTransport::new().with_body("http://svc/query?format=text", text);
    let filter = Filter {
        output: OutputKind::Basic,
        ..Default::default()
    };
    let (mut fetcher, _rx) = fetcher(transport, service(ServiceKind::Event), filter);
    let outcome = fetcher.fetch_data().await.unwrap();
    assert_eq!(outcome.requests, 1);
    assert_eq!(outcome.document.kind(), DocumentKind::Text);
    assert_eq!(outcome.document.record_count(), 1);
}

#[tokio::test]
async fn test_limit_exceeded_and_split() {
    let mut svc = service(ServiceKind::Event);
    svc.settings.querylimit = true;
    svc.settings.querylimitmaxentries = Some(3);
    let filter = Filter {
        start_time: Some(Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap()),
        end_time: Some(Utc.with_ymd_and_hms(2013, 1, 3, 0, 0, 0).unwrap()),
        ..Default::default()
    };
    let all = r#"<eventParameters><event publicID="a"/><event publicID="b"/><event publicID="c"/></eventParameters>"#;
    let first = r#"<eventParameters><event publicID="a"/><event publicID="b"/></eventParameters>"#;
    let second = r#"<eventParameters><event publicID="b"/><event publicID="c"/></eventParameters>"#;
    let transport = CannedTransport::new()
        .with_body("http://svc/query?starttime=2013-01-01&endtime=2013-01-03&limit=3&format=xml", all)
        .with_body("http://svc/query?starttime=2013-01-01&endtime=2013-01-02&limit=3&format=xml", first)
        .with_body("http://svc/query?starttime=2013-01-02&endtime=2013-01-03&limit=3&format=xml", second);
    let (mut fetcher, rx) = fetcher(transport, svc, filter);

    let outcome = fetcher.fetch_data().await.unwrap();
    let exceeded = outcome.limit_exceeded.unwrap();
    assert_eq!(exceeded.count, 3);
    assert_eq!(exceeded.limit, 3);
    assert_eq!(exceeded.strategies, vec![SplitStrategy::BisectTime]);
    let events: Vec<_> = rx.try_iter().collect();
    assert!(events.iter().any(|e| matches!(e, FetcherEvent::LimitExceeded(_))));

    let outcome = fetcher.fetch_split(SplitStrategy::BisectTime, 2).await.unwrap();
    let events: Vec<_> = rx.try_iter().collect();
    let finished: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, FetcherEvent::Finished { .. }))
        .collect();
    assert_eq!(finished, vec![&FetcherEvent::Finished { records: 3 }]);
    assert_eq!(events.last(), Some(&FetcherEvent::Finished { records: 3 }));
    assert_eq!(outcome.requests, 2);
    assert_eq!(outcome.document.record_count(), 3);
    assert!(outcome.limit_exceeded.is_none());
    let Document::QuakeMl(doc) = &outcome.document else {
        panic!("expected QuakeML");
    };
    assert_eq!(doc.event_ids(), vec!["a", "b", "c"]);

    assert!(matches!(
        fetcher.fetch_split(SplitStrategy::BisectMagnitude, 1).await,
        Err(FetchError::Unsplittable(SplitStrategy::BisectMagnitude))
    ));
}

#[tokio::test]
async fn test_split_stops_at_max_depth() {
    let mut svc = service(ServiceKind::Event);
    svc.settings.querylimit = true;
    svc.settings.querylimitmaxentries = Some(1);
    let filter = Filter {
        min_magnitude: Some(2.0),
        max_magnitude: Some(6.0),
        ..Default::default()
    };
    let one = |id: &str| format!(r#"<eventParameters><event publicID="{}"/></eventParameters>"#, id);
    let transport = CannedTransport::new()
        .with_body("http://svc/query?minmag=2&maxmag=4&limit=1&format=xml", one("low"))
        .with_body("http://svc/query?minmag=4&maxmag=6&limit=1&format=xml", one("high"));
    let (mut fetcher, _rx) = fetcher(transport, svc, filter);

    let outcome = fetcher.fetch_split(SplitStrategy::BisectMagnitude, 1).await.unwrap();
    assert_eq!(outcome.document.record_count(), 2);
    assert_eq!(outcome.limit_exceeded.map(|l| l.count), Some(1));
}

#[test]
fn test_applicable_strategies() {
    let filter = Filter {
        start_time: Some(Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap()),
        end_time: Some(Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap()),
        min_magnitude: Some(2.0),
        max_magnitude: Some(5.0),
        ..Default::default()
    };
    assert_eq!(
        SplitStrategy::applicable(&filter, ServiceKind::Event),
        vec![SplitStrategy::BisectTime, SplitStrategy::BisectMagnitude]
    );
    assert_eq!(
        SplitStrategy::applicable(&filter, ServiceKind::Station),
        vec![SplitStrategy::BisectTime]
    );
    assert!(SplitStrategy::applicable(&Filter::default(), ServiceKind::Event).is_empty());
}
