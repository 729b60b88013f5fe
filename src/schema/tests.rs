use super::*;
use std::collections::HashSet;

#[test]
fn test_short_names_fit() {
    for field in catalog() {
        assert!(
            field.short_name.len() <= SHORT_NAME_MAX,
            "{} is longer than {} characters",
            field.short_name,
            SHORT_NAME_MAX
        );
    }
}

#[test]
fn test_sources_unique() {
    let mut seen = HashSet::new();
    for field in catalog() {
        assert!(seen.insert(field.source), "duplicate source {}", field.source);
    }
}

#[test]
fn test_names_unique_per_layer() {
    for (layer, details) in [
        (LayerKind::Events, false),
        (LayerKind::Mdp, true),
        (LayerKind::Stations, false),
    ] {
        let groups = layer_groups(layer, details);
        let mut short = HashSet::new();
        let mut long = HashSet::new();
        for field in fields_in(&groups) {
            assert!(short.insert(field.short_name), "{:?}: {}", layer, field.short_name);
            assert!(long.insert(field.long_name), "{:?}: {}", layer, field.long_name);
        }
    }
}

#[test]
fn test_every_group_populated() {
    for group in FieldGroup::QUAKE
        .iter()
        .chain(FieldGroup::MACRO.iter())
        .chain(FieldGroup::STATION.iter())
    {
        assert!(
            fields_in(std::slice::from_ref(group)).count() > 0,
            "{} has no fields",
            group.name()
        );
    }
}

#[test]
fn test_lookup_depth() {
    let depth = lookup("eventParameters>event>origin>depth>value").unwrap();
    assert!(depth.is_depth());
    assert_eq!(depth.field_type, FieldType::Float);
    assert_eq!(depth.group, FieldGroup::Origin);
    assert!(!lookup("eventParameters>event>origin>depth>uncertainty")
        .unwrap()
        .is_depth());
    assert!(lookup("eventParameters>event>nothing").is_none());
}

#[test]
fn test_origin_time_components() {
    let time = lookup("eventParameters>event>origin>time>value").unwrap();
    let components = time.associated_components.unwrap();
    for (_, source) in components.entries() {
        assert!(lookup(source).is_some(), "{} not in catalog", source);
    }
}

#[test]
fn test_synthetic_fields() {
    let synthetic: Vec<_> = catalog().iter().filter_map(|f| f.synthetic).collect();
    assert_eq!(
        synthetic,
        vec![Synthetic::IsPreferredOrigin, Synthetic::IsPreferredMagnitude]
    );
    assert_eq!(
        lookup("eventParameters>event>origin>IsPrefOrigin")
            .unwrap()
            .column_name(false),
        "IsPrefOrigin"
    );
}

#[test]
fn test_mdp_layer_groups() {
    assert_eq!(layer_groups(LayerKind::Mdp, false).len(), 4);
    assert_eq!(layer_groups(LayerKind::Mdp, true).len(), 7);
}

#[test]
fn test_text_column_types() {
    assert_eq!(text_column_type("Latitude"), FieldType::Float);
    assert_eq!(text_column_type("Depth/km"), FieldType::Float);
    assert_eq!(text_column_type("Time"), FieldType::DateTime);
    assert_eq!(text_column_type("EventLocationName"), FieldType::String);
}
