//! # Query Builder
//!
//! Composes service URLs from a [`Filter`] and a [`ServiceDescriptor`].
//!
//! Parameters are emitted in a fixed order and only when set. Parameters the
//! service does not advertise in its [`ServiceSettings`] are dropped without
//! notice:
//!
//! | Filter value | Parameter | Capability |
//! |--------------|-----------|------------|
//! | start / end time | `starttime`, `endtime` | |
//! | magnitude range | `minmag`, `maxmag` | |
//! | rectangle | `minlatitude` … `maxlongitude` | |
//! | circle | `latitude`, `longitude`, `minradius`, `maxradius` | `querycircular` |
//! | minimum MDPs / intensity | `minmdps`, `minintensity` | |
//! | event id | `eventid` | `queryeventid` |
//! | contributor | `contributor` | `querycontributor` |
//! | event type | `eventtype` | `queryeventtype` |
//! | updated after | `updatedafter` | `queryupdatedafter` |
//! | include flags | `includeallorigins`, `includeallmagnitudes` | `queryincludeall…` |
//! | MDPs | `includemdps` | |
//! | result limit | `limit` | `querylimit` |
//! | output kind | `format` | `outputtext` / `outputxml` |
//!
//! Circle radii are kilometers in the filter. Services flagged
//! `querycircularradiuskm` receive `minradiuskm` / `maxradiuskm`; the others
//! receive degrees.

mod error;
mod filter;
mod service;

#[cfg(test)]
mod tests;

pub use error::ServiceError;
pub use filter::{format_query_time, Extent, Filter, OutputKind, KM_PER_DEGREE};
pub use service::{
    ServiceCatalog, ServiceDescriptor, ServiceKind, ServicePresets, ServiceSettings, NO_CONTENT,
};

/// Ordered `key=value` pairs of a query
pub type QueryParams = Vec<(&'static str, String)>;

/// Parameters for `filter` against `service`
pub fn build_query(filter: &Filter, service: &ServiceDescriptor) -> QueryParams {
    let settings = &service.settings;
    let mut params = QueryParams::new();
    let mut push = |key: &'static str, value: String| params.push((key, value));

    // a single-event query only carries the event and its detail flags
    let single_event = filter.event_id.is_some() && settings.queryeventid;

    if !single_event {
        if let Some(t) = &filter.start_time {
            push("starttime", format_query_time(t));
        }
        if let Some(t) = &filter.end_time {
            push("endtime", format_query_time(t));
        }
        if service.kind != ServiceKind::Station {
            if let Some(m) = filter.min_magnitude {
                push("minmag", m.to_string());
            }
            if let Some(m) = filter.max_magnitude {
                push("maxmag", m.to_string());
            }
        }
        match filter.extent {
            Some(Extent::Rectangle {
                min_latitude,
                max_latitude,
                min_longitude,
                max_longitude,
            }) => {
                push("minlatitude", min_latitude.to_string());
                push("maxlatitude", max_latitude.to_string());
                push("minlongitude", min_longitude.to_string());
                push("maxlongitude", max_longitude.to_string());
            }
            Some(Extent::Circle {
                latitude,
                longitude,
                min_radius_km,
                max_radius_km,
            }) if settings.querycircular => {
                push("latitude", latitude.to_string());
                push("longitude", longitude.to_string());
                let (min_key, max_key, scale) = if settings.querycircularradiuskm {
                    ("minradiuskm", "maxradiuskm", 1.0)
                } else {
                    ("minradius", "maxradius", 1.0 / KM_PER_DEGREE)
                };
                if let Some(r) = min_radius_km {
                    push(min_key, (r * scale).to_string());
                }
                if let Some(r) = max_radius_km {
                    push(max_key, (r * scale).to_string());
                }
            }
            _ => {}
        }
        if service.kind == ServiceKind::Macroseismic {
            if let Some(n) = filter.min_mdps {
                push("minmdps", n.to_string());
            }
            if let Some(i) = filter.min_intensity {
                push("minintensity", i.to_string());
            }
        }
    }

    if service.kind == ServiceKind::Station {
        for (key, value) in [
            ("network", &filter.network),
            ("station", &filter.station),
            ("location", &filter.location),
            ("channel", &filter.channel),
        ] {
            if let Some(v) = value {
                push(key, v.clone());
            }
        }
        push(
            "level",
            filter.level.clone().unwrap_or_else(|| "station".to_string()),
        );
    } else {
        if single_event {
            if let Some(id) = &filter.event_id {
                push("eventid", id.clone());
            }
        }
        if !single_event {
            if let (Some(c), true) = (&filter.contributor, settings.querycontributor) {
                push("contributor", c.clone());
            }
            if let (Some(t), true) = (&filter.event_type, settings.queryeventtype) {
                push("eventtype", t.clone());
            }
            if let (Some(t), true) = (&filter.updated_after, settings.queryupdatedafter) {
                push("updatedafter", format_query_time(t));
            }
        }
        if filter.include_all_origins && settings.queryincludeallorigins {
            push("includeallorigins", "true".to_string());
        }
        if filter.include_all_magnitudes && settings.queryincludeallmagnitudes {
            push("includeallmagnitudes", "true".to_string());
        }
        if filter.include_mdps {
            push("includemdps", "true".to_string());
        }
    }

    if !single_event {
        if let Some(limit) = service.limit() {
            push("limit", limit.to_string());
        }
    }

    let format_supported = match filter.output {
        OutputKind::Basic => settings.outputtext,
        OutputKind::Extended => settings.outputxml,
    };
    if format_supported {
        push("format", filter.output.format().to_string());
    }
    params
}

/// Join parameters into an `a=1&b=2` query string
pub fn to_query_string(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Full request URL: the endpoint followed by the query string
pub fn build_url(filter: &Filter, service: &ServiceDescriptor) -> String {
    let query = to_query_string(&build_query(filter, service));
    let endpoint = service.endpointurl.as_str();
    let separator = if endpoint.ends_with('?') || endpoint.ends_with('&') {
        ""
    } else if endpoint.contains('?') {
        "&"
    } else {
        "?"
    };
    format!("{}{}{}", endpoint, separator, query)
}
