use anyhow::Result;

use fdsn_features::schema::{self, LayerKind};

/// List the exportable fields of one layer, or of every layer
pub fn run(layer: Option<LayerKind>, selected_only: bool) -> Result<()> {
    let layers = match layer {
        Some(layer) => vec![layer],
        None => vec![LayerKind::Events, LayerKind::Mdp, LayerKind::Stations],
    };

    for layer in layers {
        println!("{:?} layer", layer);
        println!("{}", "=".repeat(format!("{:?} layer", layer).len()));
        println!("{:<10}  {:<8}  {:<3}  {:<40}  SOURCE", "SHORT", "TYPE", "DEF", "LONG");
        for field in schema::fields_in(&schema::layer_groups(layer, false)) {
            if selected_only && !field.default_selected {
                continue;
            }
            println!(
                "{:<10}  {:<8}  {:<3}  {:<40}  {}",
                field.short_name,
                field.field_type.name(),
                if field.default_selected { "yes" } else { "no" },
                field.long_name,
                field.source
            );
        }
        println!();
    }
    Ok(())
}
