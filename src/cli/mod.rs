use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use std::path::PathBuf;

use fdsn_features::document::Document;
use fdsn_features::projector::{Layer, Projector};
use fdsn_features::schema::LayerKind;

mod config;
mod convert;
mod fetch;
mod fields;
mod report;

/// fdsn-features - FDSN web services to GIS feature tables
#[derive(Parser)]
#[command(name = "fdsn-features")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output layer of a document
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayerArg {
    /// One row per event magnitude or origin
    Events,
    /// One row per macroseismic data point
    Mdp,
    /// One row per station
    Stations,
}

impl From<LayerArg> for LayerKind {
    fn from(arg: LayerArg) -> Self {
        match arg {
            LayerArg::Events => LayerKind::Events,
            LayerArg::Mdp => LayerKind::Mdp,
            LayerArg::Stations => LayerKind::Stations,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Query an FDSN service and write the reply as a feature table
    Fetch(fetch::FetchArgs),

    /// Convert a local QuakeML, StationXML or FDSN text file
    Convert {
        /// Input file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file path (.geojson, .parquet or .csv; defaults to .geojson)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Layer to write for QuakeML input
        #[arg(short = 'l', long, value_enum)]
        layer: Option<LayerArg>,
    },

    /// List the Field Catalog
    Fields {
        /// Only this layer
        #[arg(short = 'l', long, value_enum)]
        layer: Option<LayerArg>,

        /// Only fields selected by default
        #[arg(long)]
        selected: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch(args) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(fetch::run(args))
        }
        Commands::Convert {
            input,
            output,
            config,
            layer,
        } => convert::run(input, output, config, layer),
        Commands::Fields { layer, selected } => fields::run(layer.map(LayerKind::from), selected),
    }
}

/// The requested layer of a document, or its natural one
fn layer_of<'a>(projector: &'a Projector, document: &'a Document, layer: Option<LayerArg>) -> Layer<'a> {
    match (document, layer.map(LayerKind::from)) {
        (Document::QuakeMl(doc), Some(kind @ (LayerKind::Events | LayerKind::Mdp))) => {
            projector.project_quakeml(doc, kind)
        }
        (_, Some(kind)) => {
            warn!("{:?} layer does not apply to a {:?} document", kind, document.kind());
            projector.project(document)
        }
        (_, None) => projector.project(document),
    }
}
