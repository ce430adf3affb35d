use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::conf::TableEntry;
use crate::core::PeekError;

const COUNT_BUF_SIZE: usize = 32 * 1024;

/// One registered delimited file.
///
/// The cached metadata (`modified_at`, `size_bytes`, `row_count`,
/// `columns`) reflects the last `load_metadata` / `read_header` call, not
/// the file's live state. The registry hands every request its own clone,
/// so refreshing here never races with another request.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    path: PathBuf,
    delimiter: char,
    modified_at: DateTime<Utc>,
    size_bytes: u64,
    row_count: u64,
    columns: Vec<String>,
}

/// Point-in-time metadata snapshot, serialized on the metadata endpoint.
#[derive(Debug, Serialize, PartialEq)]
pub struct TableMetadata {
    pub path: String,
    pub delimiter: char,
    pub modified_at: DateTime<Utc>,
    pub size_bytes: u64,
    pub size_human: String,
    pub row_count: u64,
    pub columns: Vec<String>,
}

impl Table {
    /// Open a table eagerly: metadata and header are loaded up front so a
    /// bad registry entry fails at startup, not on the first request.
    pub fn new(entry: &TableEntry) -> Result<Table, PeekError> {
        let mut table = Table {
            path: PathBuf::from(&entry.path),
            delimiter: entry.delimiter,
            modified_at: DateTime::UNIX_EPOCH,
            size_bytes: 0,
            row_count: 0,
            columns: Vec::new(),
        };
        table.load_metadata()?;
        table.read_header()?;
        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Number of data lines, header excluded. Stale until the next
    /// `load_metadata` call.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Refresh `modified_at`, `size_bytes` and `row_count` from the file.
    pub fn load_metadata(&mut self) -> Result<(), PeekError> {
        let stats = std::fs::metadata(&self.path)?;
        self.check_size(stats.len())?;
        self.modified_at = stats.modified()?.into();
        self.size_bytes = stats.len();
        self.row_count = self.count_rows()?;
        Ok(())
    }

    /// Read the first line only and split it into `columns`.
    pub fn read_header(&mut self) -> Result<(), PeekError> {
        self.check_file()?;
        let file = File::open(&self.path)?;
        let mut reader = BufReader::new(file);
        let mut head = String::new();
        reader.read_line(&mut head)?;
        let head = head.trim_end_matches(['\n', '\r']);
        self.columns = head.split(self.delimiter).map(str::to_string).collect();
        Ok(())
    }

    pub fn metadata(&self) -> TableMetadata {
        TableMetadata {
            path: self.path.display().to_string(),
            delimiter: self.delimiter,
            modified_at: self.modified_at,
            size_bytes: self.size_bytes,
            size_human: format!("{:.2} MB", self.size_bytes as f32 / 1_000_000.0),
            row_count: self.row_count,
            columns: self.columns.clone(),
        }
    }

    fn check_file(&self) -> Result<(), PeekError> {
        let stats = std::fs::metadata(&self.path)?;
        self.check_size(stats.len())
    }

    fn check_size(&self, size: u64) -> Result<(), PeekError> {
        if size == 0 {
            return Err(PeekError::EmptyFile(self.path.display().to_string()));
        }
        Ok(())
    }

    /// Count line terminators in fixed-size chunks. A final unterminated
    /// line still counts as a line; the header is then excluded.
    fn count_rows(&self) -> Result<u64, PeekError> {
        let mut file = File::open(&self.path)?;
        let mut buf = [0u8; COUNT_BUF_SIZE];
        let mut lines: u64 = 0;
        let mut last = b'\n';

        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            lines += buf[..n].iter().filter(|b| **b == b'\n').count() as u64;
            last = buf[n - 1];
        }
        if last != b'\n' {
            lines += 1;
        }
        Ok(lines.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{entry, write_table};
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn new_loads_metadata_and_header() {
        let dir = TempDir::new().unwrap();
        let path = write_table(dir.path(), "cars.csv", &["id,name,age", "1,Al,30"]);
        let table = Table::new(&entry("cars", &path, ',')).unwrap();
        assert_eq!(table.columns(), ["id", "name", "age"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.size_bytes, 20);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Table::new(&entry("gone", "/no/such/file.csv", ',')).unwrap_err();
        assert!(matches!(err, PeekError::NotFound(_)));
    }

    #[test]
    fn zero_byte_file_is_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();
        let err = Table::new(&entry("empty", path.to_str().unwrap(), ',')).unwrap_err();
        assert!(matches!(err, PeekError::EmptyFile(_)));
    }

    #[rstest]
    #[case("id,v\n1,a\n2,b\n", 2)]
    #[case("id,v\n1,a\n2,b", 2)] // no trailing newline
    #[case("id,v\n", 0)]
    #[case("id,v", 0)]
    fn row_count_excludes_header(#[case] body: &str, #[case] expected: u64) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, body).unwrap();
        let table = Table::new(&entry("t", path.to_str().unwrap(), ',')).unwrap();
        assert_eq!(table.row_count(), expected);
    }

    #[test]
    fn stale_clone_does_not_see_appends() {
        let dir = TempDir::new().unwrap();
        let path = write_table(dir.path(), "t.csv", &["id,v", "1,a"]);
        let mut table = Table::new(&entry("t", &path, ',')).unwrap();
        let stale = table.clone();

        let mut body = std::fs::read_to_string(&path).unwrap();
        body.push_str("2,b\n");
        std::fs::write(&path, body).unwrap();

        assert_eq!(stale.row_count(), 1);
        table.load_metadata().unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(stale.row_count(), 1);
    }

    #[test]
    fn read_header_uses_configured_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_table(dir.path(), "t.txt", &["id;full,name", "1;Al"]);
        let table = Table::new(&entry("t", &path, ';')).unwrap();
        assert_eq!(table.columns(), ["id", "full,name"]);
    }

    #[test]
    fn metadata_snapshot_has_human_readable_size() {
        let dir = TempDir::new().unwrap();
        let path = write_table(dir.path(), "t.csv", &["id,v", "1,a"]);
        let table = Table::new(&entry("t", &path, ',')).unwrap();
        let meta = table.metadata();
        assert_eq!(meta.row_count, 1);
        assert_eq!(meta.size_human, "0.00 MB");
        assert_eq!(meta.columns, ["id", "v"]);
    }
}
