use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use fdsn_features::fetcher::{Fetcher, SplitStrategy};
use fdsn_features::projector::Projector;
use fdsn_features::query::{Extent, Filter, OutputKind, ServiceCatalog};
use fdsn_features::transport::HttpTransport;
use fdsn_features::writer::write_layer_to_path;
use fdsn_features::xml::parse_datetime;

use super::config::Config;
use super::report::Reporter;
use super::LayerArg;

/// How to react when a reply reaches the service's result limit
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SplitArg {
    /// Halve the time window
    Time,
    /// Halve the magnitude window
    Magnitude,
}

impl From<SplitArg> for SplitStrategy {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Time => SplitStrategy::BisectTime,
            SplitArg::Magnitude => SplitStrategy::BisectMagnitude,
        }
    }
}

/// Arguments of the `fetch` command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Output file (.geojson, .parquet or .csv)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Service catalog JSON file
    #[arg(long, value_name = "FILE")]
    pub services: PathBuf,

    /// Service name in the catalog (the only entry when omitted)
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Earliest origin time (YYYY-MM-DD or ISO-8601)
    #[arg(long, value_parser = parse_time)]
    pub starttime: Option<DateTime<Utc>>,

    /// Latest origin time (YYYY-MM-DD or ISO-8601)
    #[arg(long, value_parser = parse_time)]
    pub endtime: Option<DateTime<Utc>>,

    /// Smallest magnitude
    #[arg(long)]
    pub minmag: Option<f64>,

    /// Largest magnitude
    #[arg(long)]
    pub maxmag: Option<f64>,

    /// Bounding box: MINLAT,MAXLAT,MINLON,MAXLON
    #[arg(long, value_delimiter = ',', num_args = 4, allow_negative_numbers = true)]
    pub bbox: Option<Vec<f64>>,

    /// Circle: LAT,LON,MAXRADIUS_KM
    #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
    pub circle: Option<Vec<f64>>,

    /// Fetch a single event
    #[arg(long)]
    pub eventid: Option<String>,

    /// Minimum number of macroseismic data points
    #[arg(long)]
    pub minmdps: Option<u32>,

    /// Minimum intensity
    #[arg(long)]
    pub minintensity: Option<f64>,

    /// Event type, e.g. earthquake
    #[arg(long)]
    pub eventtype: Option<String>,

    /// Station services: network code
    #[arg(long)]
    pub network: Option<String>,

    /// Station services: station code
    #[arg(long)]
    pub station: Option<String>,

    /// Station services: channel code
    #[arg(long)]
    pub channel: Option<String>,

    /// Station services: level of detail
    #[arg(long)]
    pub level: Option<String>,

    /// Request every origin of each event
    #[arg(long)]
    pub all_origins: bool,

    /// Request every magnitude of each event
    #[arg(long)]
    pub all_magnitudes: bool,

    /// Request macroseismic data points
    #[arg(long)]
    pub mdps: bool,

    /// Request the pipe-delimited text format
    #[arg(long)]
    pub text: bool,

    /// Split the query when the result limit is reached
    #[arg(long, value_enum)]
    pub split: Option<SplitArg>,

    /// Maximum split depth
    #[arg(long, default_value_t = 4)]
    pub max_split_depth: usize,

    /// Layer to write for QuakeML replies (picked from the reply when omitted)
    #[arg(short = 'l', long, value_enum)]
    pub layer: Option<LayerArg>,
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    parse_datetime(s).ok_or_else(|| format!("invalid time: {}", s))
}

impl FetchArgs {
    fn filter(&self) -> Filter {
        let extent = match (&self.bbox, &self.circle) {
            (Some(b), _) => Some(Extent::Rectangle {
                min_latitude: b[0],
                max_latitude: b[1],
                min_longitude: b[2],
                max_longitude: b[3],
            }),
            (None, Some(c)) => Some(Extent::Circle {
                latitude: c[0],
                longitude: c[1],
                min_radius_km: None,
                max_radius_km: Some(c[2]),
            }),
            (None, None) => None,
        };

        Filter {
            start_time: self.starttime,
            end_time: self.endtime,
            min_magnitude: self.minmag,
            max_magnitude: self.maxmag,
            extent,
            min_mdps: self.minmdps,
            min_intensity: self.minintensity,
            event_id: self.eventid.clone(),
            event_type: self.eventtype.clone(),
            include_all_origins: self.all_origins,
            include_all_magnitudes: self.all_magnitudes,
            include_mdps: self.mdps,
            output: if self.text { OutputKind::Basic } else { OutputKind::Extended },
            network: self.network.clone(),
            station: self.station.clone(),
            channel: self.channel.clone(),
            level: self.level.clone(),
            ..Default::default()
        }
    }
}

/// Query a service and write the result
pub async fn run(args: FetchArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let writer_config = config.writer.to_writer_config()?;

    let catalog = ServiceCatalog::from_file(&args.services)
        .with_context(|| format!("Failed to load service catalog: {}", args.services.display()))?;
    let name = match &args.service {
        Some(name) => name.clone(),
        None if catalog.len() == 1 => catalog.names().next().unwrap_or_default().to_string(),
        None => bail!(
            "Catalog holds {} services; pick one with --service ({})",
            catalog.len(),
            catalog.names().collect::<Vec<_>>().join(", ")
        ),
    };
    let service = catalog.get(&name)?.clone();

    let mut filter = args.filter();
    service.apply_defaults(&mut filter);

    info!("fdsn-features - fetch");
    info!("Service: {} ({})", name, service.endpointurl);
    info!("Output:  {}", args.output.display());

    let transport = Arc::new(HttpTransport::new().context("Failed to create HTTP client")?);
    let reporter = Reporter::spawn();
    let mut fetcher = Fetcher::new(transport, service, filter).with_events(reporter.sender());
    info!("Query: {}", fetcher.url());

    let mut outcome = fetcher.fetch_data().await.context("Fetch failed")?;
    if let Some(limit) = outcome.limit_exceeded.clone() {
        match args.split.map(SplitStrategy::from) {
            Some(strategy) if limit.strategies.contains(&strategy) => {
                info!("Splitting query by {:?}", strategy);
                outcome = fetcher
                    .fetch_split(strategy, args.max_split_depth)
                    .await
                    .context("Split fetch failed")?;
            }
            Some(strategy) => {
                warn!("{:?} is not applicable to this query; keeping the truncated result", strategy)
            }
            None => {}
        }
    }
    drop(fetcher);
    reporter.join();

    let projector = Projector::new(config.output);
    let layer = super::layer_of(&projector, &outcome.document, args.layer);
    let stats = write_layer_to_path(layer, &args.output, None, &writer_config)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Fetch complete!");
    info!("  Requests: {}", outcome.requests);
    info!("  {}", stats);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        stats.file_size_bytes,
        stats.file_size_bytes as f64 / 1024.0 / 1024.0
    );
    Ok(())
}
