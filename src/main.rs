//! # fdsn-features
//!
//! A command-line tool that turns FDSN event, macroseismic and station web
//! service replies into GIS feature tables.
//!
//! ## Usage
//!
//! ```bash
//! # Query a service from a catalog and write GeoJSON
//! fdsn-features fetch --services services.json -s emsc \
//!     --starttime 2016-10-01 --endtime 2016-11-01 --minmag 5 events.geojson
//!
//! # Split the query in time when the service limit is reached
//! fdsn-features fetch --services services.json --split time events.parquet
//!
//! # Convert a saved QuakeML file to the MDP layer
//! fdsn-features convert -l mdp reply.xml mdps.csv
//!
//! # List the Field Catalog
//! fdsn-features fields -l events
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
