use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use fdsn_features::document::Document;
use fdsn_features::projector::Projector;
use fdsn_features::writer::{write_layer_to_path, OutputFormat};

use super::config::Config;
use super::LayerArg;

/// Convert a local QuakeML, StationXML or FDSN text file to a feature table
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    layer: Option<LayerArg>,
) -> Result<()> {
    // Validate input file exists
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let output = output.unwrap_or_else(|| input.with_extension(OutputFormat::GeoJson.extension()));
    let config = Config::load(config.as_deref())?;
    let writer_config = config.writer.to_writer_config()?;

    info!("fdsn-features - convert");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());

    let bytes = std::fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let document = Document::from_bytes(&bytes)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    info!("Document: {:?} with {} records", document.kind(), document.record_count());

    let projector = Projector::new(config.output);
    let layer = super::layer_of(&projector, &document, layer);
    info!("Layer: {}", layer.schema.name);

    let stats = write_layer_to_path(layer, &output, None, &writer_config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Conversion complete!");
    info!("  {}", stats);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        stats.file_size_bytes,
        stats.file_size_bytes as f64 / 1024.0 / 1024.0
    );
    Ok(())
}
