//! Test utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::path::Path;

use tempfile::TempDir;

use crate::conf::TableEntry;

/// Write `lines` to `dir/name`, newline-terminated, and return the path.
pub fn write_table(dir: &Path, name: &str, lines: &[&str]) -> String {
    let path = dir.join(name);
    let mut body = lines.join("\n");
    body.push('\n');
    std::fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

pub fn entry(label: &str, path: &str, delimiter: char) -> TableEntry {
    TableEntry {
        label: label.to_string(),
        path: path.to_string(),
        delimiter,
    }
}

/// A temp directory holding the canonical people fixture:
/// header `id,name,age`, rows `1,Al,30` / `2,Bo,40` / `3,Al,50`.
pub fn people_fixture() -> (TempDir, TableEntry) {
    let dir = TempDir::new().unwrap();
    let path = write_table(
        dir.path(),
        "people.csv",
        &["id,name,age", "1,Al,30", "2,Bo,40", "3,Al,50"],
    );
    let entry = entry("people", &path, ',');
    (dir, entry)
}
