use std::collections::HashSet;

use crate::core::PeekError::{self, ConfigError};

/// One parsed line of the registry file: `label = path;delim:<char>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub label: String,
    pub path: String,
    pub delimiter: char,
}

/// Parse a registry file body into table entries.
///
/// Blank lines and lines starting with `#` are skipped. Labels must be
/// unique and the delimiter must be exactly one character.
pub fn parse_registry(body: &str) -> Result<Vec<TableEntry>, PeekError> {
    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, raw) in body.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = parse_line(line).map_err(|msg| {
            ConfigError(format!("registry line {}: {}", idx + 1, msg))
        })?;
        if !seen.insert(entry.label.clone()) {
            return Err(ConfigError(format!(
                "registry line {}: duplicate label '{}'",
                idx + 1,
                entry.label
            )));
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Result<TableEntry, String> {
    let (label, rest) = line
        .split_once('=')
        .ok_or_else(|| String::from("expected 'label = path;delim:<char>'"))?;
    let (path, delim) = rest
        .split_once(";delim:")
        .ok_or_else(|| String::from("missing ';delim:<char>' suffix"))?;

    let label = label.trim();
    let path = path.trim();
    if label.is_empty() {
        return Err(String::from("empty label"));
    }
    if path.is_empty() {
        return Err(String::from("empty path"));
    }

    let mut chars = delim.chars();
    let delimiter = chars
        .next()
        .ok_or_else(|| String::from("empty delimiter"))?;
    if chars.next().is_some() {
        return Err(format!("delimiter '{delim}' is not a single character"));
    }

    Ok(TableEntry {
        label: label.to_string(),
        path: path.to_string(),
        delimiter,
    })
}
