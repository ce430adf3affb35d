use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::core::PeekError;

use super::RowFilter;
use super::table::Table;

/// Hard cap on the number of rows any single query may return.
pub const ROW_CEILING: usize = 1_000;

impl Table {
    /// First-`count` matching rows in file order, rendered with a leading
    /// header line.
    ///
    /// The header is re-read on every call. Streaming stops once `count`
    /// matches are collected or [`ROW_CEILING`] is hit, whichever comes
    /// first. A non-positive `count` returns the header and zero rows.
    pub fn query_head(&mut self, count: i64, filter: &RowFilter) -> Result<String, PeekError> {
        self.read_header()?;

        let limit = if count <= 0 {
            0
        } else {
            (count as usize).min(ROW_CEILING)
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        if limit > 0 {
            let file = File::open(self.path())?;
            for line in BufReader::new(file).lines().skip(1) {
                let line = line?;
                let row: Vec<String> =
                    line.split(self.delimiter()).map(str::to_string).collect();
                if filter.matches(&row) {
                    rows.push(row);
                    if rows.len() == limit {
                        break;
                    }
                }
            }
        }
        Ok(self.render(&rows))
    }

    /// Last-`count` data rows in file order, rendered with a leading
    /// header line.
    ///
    /// Refreshes metadata first, then makes one forward pass: discard the
    /// header, discard `row_count - count` lines, emit the rest. There is
    /// no seek-from-end; the format is line-oriented and not indexable, so
    /// tail costs a scan proportional to file length. A concurrent writer
    /// appending mid-scan shifts the window by the lines it adds.
    pub fn query_tail(&mut self, count: i64) -> Result<String, PeekError> {
        self.load_metadata()?;
        self.read_header()?;

        let mut to_skip = self.row_count() as i64 - count.max(0);

        let mut out = self.render(&[]);
        let file = File::open(self.path())?;
        for line in BufReader::new(file).lines().skip(1) {
            let line = line?;
            to_skip -= 1;
            if to_skip < 0 {
                out.push_str(&line);
                out.push('\n');
            }
        }
        Ok(out)
    }

    /// Delimiter-join the columns and each row, one newline-terminated
    /// line per row, header first. No quoting or escaping.
    fn render(&self, rows: &[Vec<String>]) -> String {
        let delim = self.delimiter().to_string();
        let mut out = String::new();
        out.push_str(&self.columns().join(&delim));
        out.push('\n');
        for row in rows {
            out.push_str(&row.join(&delim));
            out.push('\n');
        }
        out
    }
}
