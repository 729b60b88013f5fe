use std::collections::HashSet;

use super::DocumentError;

/// A pipe-delimited FDSN text reply (`format=text`).
///
/// The first line is the header and starts with `#`, e.g.
/// `#EventID|Time|Latitude|Longitude|Depth/km|...`. Values are kept as text;
/// typing happens at projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    /// Column names with the `#` marker removed
    pub header: Vec<String>,
    /// Data records
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Parse a text reply
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'|')
            .flexible(true)
            .quoting(false)
            .has_headers(true)
            .from_reader(bytes);

        let header: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        match header.first() {
            Some(first) if first.starts_with('#') => {}
            _ => return Err(DocumentError::MissingHeader),
        }
        let header = header
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                if i == 0 {
                    name.trim_start_matches('#').trim().to_string()
                } else {
                    name
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }
        Ok(Self { header, rows })
    }

    /// Index of a column by case-insensitive name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Value of `column` in `row`, `None` when empty or missing
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity of a record: the event ID, or `NET.STA` for station lists
    pub fn row_key(&self, row: &[String]) -> String {
        let first = row.first().map(String::as_str).unwrap_or_default();
        match self.header.first() {
            Some(h) if h.eq_ignore_ascii_case("Network") => {
                format!("{}.{}", first, row.get(1).map(String::as_str).unwrap_or_default())
            }
            _ => first.to_string(),
        }
    }

    /// Append the records of another reply that are not present yet
    pub fn merge(&mut self, other: TextTable) -> usize {
        if self.header.is_empty() {
            self.header = other.header.clone();
        }
        let mut seen: HashSet<String> = self.rows.iter().map(|r| self.row_key(r)).collect();
        let mut duplicates = 0;
        for row in other.rows {
            if seen.insert(self.row_key(&row)) {
                self.rows.push(row);
            } else {
                duplicates += 1;
            }
        }
        duplicates
    }
}
