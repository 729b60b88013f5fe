use serde_json::{Map, Value};

use crate::xml::local_name;

/// Reserved-word tokens and the reflected key they stand for
const ALIASES: &[(&str, &str)] = &[("class", "type")];

static NULL: Value = Value::Null;

/// Normalised tokens of a `>`-separated path
pub(crate) fn tokens(path: &str) -> Vec<&str> {
    path.split('>')
        .map(|t| local_name(t.trim()))
        .map(|t| {
            ALIASES
                .iter()
                .find(|(from, _)| *from == t)
                .map(|(_, to)| *to)
                .unwrap_or(t)
        })
        .collect()
}

/// Reflected entities in scope for one row, each anchored at a path prefix
#[derive(Debug, Default)]
pub(crate) struct Scope {
    entries: Vec<(Vec<&'static str>, Map<String, Value>)>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Bind an entity dictionary to the path prefix it lives under
    pub(crate) fn bind(&mut self, prefix: &'static str, dict: Map<String, Value>) -> &mut Self {
        self.entries.push((tokens(prefix), dict));
        self
    }

    /// Resolve a source path.
    ///
    /// The entity with the longest matching prefix is chosen and the
    /// remaining tokens are walked through its dictionary. Lists resolve to
    /// their first element.
    pub(crate) fn resolve(&self, source: &str) -> Option<&Value> {
        let path = tokens(source);
        let (prefix, dict) = self
            .entries
            .iter()
            .filter(|(prefix, _)| path.len() > prefix.len() && path.starts_with(prefix.as_slice()))
            .max_by_key(|(prefix, _)| prefix.len())?;
        walk(dict, &path[prefix.len()..])
    }
}

/// Follow `path` through nested dictionaries
pub(crate) fn walk<'v>(dict: &'v Map<String, Value>, path: &[&str]) -> Option<&'v Value> {
    let (first, rest) = path.split_first()?;
    let mut current = first_of(dict.get(*first)?);
    for token in rest {
        current = match current {
            Value::Object(map) => first_of(map.get(*token)?),
            _ => return None,
        };
    }
    Some(current)
}

fn first_of(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(&NULL),
        other => other,
    }
}
