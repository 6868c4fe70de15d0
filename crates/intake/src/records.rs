//! In-memory table of ingested records.
//!
//! Headers are matched after normalization (trim, lowercase, spaces to
//! underscores) so operator exports with `First Name`-style headings still
//! line up with the required columns. The stored data is never rewritten.

use std::fs;
use std::path::Path;

use outdial_core::DialerResult;
use tracing::debug;

/// An ingested table: ordered column headers plus string rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Parse delimiter-separated text: first line is the header row.
    /// Minimal by intent; no quote handling.
    pub fn from_delimited(text: &str, delimiter: char) -> Self {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let columns = match lines.next() {
            Some(header) => header
                .split(delimiter)
                .map(|c| c.trim().to_string())
                .collect(),
            None => Vec::new(),
        };
        let rows = lines
            .map(|line| {
                line.split(delimiter)
                    .map(|field| field.trim().to_string())
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Read a comma-delimited file from disk.
    pub fn from_csv_file(path: impl AsRef<Path>) -> DialerResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let records = Self::from_delimited(&text, ',');
        debug!(
            path = %path.as_ref().display(),
            rows = records.len(),
            "loaded record set"
        );
        Ok(records)
    }

    /// Single-column set from newline-separated values (the paste-a-list
    /// input format). Blank lines are skipped.
    pub fn from_lines(column: &str, text: &str) -> Self {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| vec![l.to_string()])
            .collect();
        Self {
            columns: vec![column.to_string()],
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column whose normalized header matches `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.columns
            .iter()
            .position(|c| normalize_header(c) == wanted)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All values of the named column in row order. Rows shorter than the
    /// header yield an empty string for the missing cell.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

/// Normalize a header for matching: trim, lowercase, spaces to underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  First Name "), "first_name");
        assert_eq!(normalize_header("PHONE"), "phone");
        assert_eq!(normalize_header("zip"), "zip");
    }

    #[test]
    fn test_from_delimited_parses_header_and_rows() {
        let records = RecordSet::from_delimited("a,b\n1,2\n3,4\n", ',');
        assert_eq!(records.columns(), ["a", "b"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records.rows()[1], vec!["3", "4"]);
    }

    #[test]
    fn test_column_lookup_uses_normalized_headers() {
        let records = RecordSet::from_delimited("First Name, Phone \nAva,15551230001\n", ',');
        assert!(records.has_column("first_name"));
        assert_eq!(records.column_values("phone").unwrap(), vec!["15551230001"]);
        assert!(!records.has_column("zip"));
    }

    #[test]
    fn test_short_rows_read_as_empty_cells() {
        let records = RecordSet::from_delimited("a,b\nonly_a\n", ',');
        assert_eq!(records.column_values("b").unwrap(), vec![""]);
    }

    #[test]
    fn test_from_lines_skips_blanks() {
        let records = RecordSet::from_lines("did", "15551230001\n\n  \n15551230002\n");
        assert_eq!(records.len(), 2);
        assert_eq!(
            records.column_values("did").unwrap(),
            vec!["15551230001", "15551230002"]
        );
    }

    #[test]
    fn test_empty_input() {
        let records = RecordSet::from_delimited("", ',');
        assert!(records.columns().is_empty());
        assert!(records.is_empty());
    }
}
