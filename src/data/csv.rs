//! Minimal reader for the comma-separated files the HR system exports.
//!
//! Fields may be wrapped in double quotes to carry commas (e.g. `"1,500.00"`);
//! a doubled quote inside a quoted field is a literal quote.

use crate::error::{EngineError, EngineResult};

/// A parsed CSV file: a header row plus data rows tagged with line numbers.
#[derive(Debug, Clone)]
pub(crate) struct CsvTable {
    headers: Vec<String>,
    rows: Vec<CsvRow>,
}

/// One data row and the 1-based line it came from.
#[derive(Debug, Clone)]
pub(crate) struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvTable {
    /// Parses `content`, treating the first non-blank line as the header.
    pub fn parse(path: &str, content: &str) -> EngineResult<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .filter(|(_, l)| !l.trim().is_empty());

        let (_, header_line) = lines.next().ok_or_else(|| EngineError::DataParseError {
            path: path.to_string(),
            line: 1,
            message: "file is empty".to_string(),
        })?;

        let headers = split_line(header_line)
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let rows = lines
            .map(|(line, l)| CsvRow {
                line,
                fields: split_line(l),
            })
            .collect();

        Ok(Self { headers, rows })
    }

    /// Returns the index of the column named `name` (case-insensitive).
    pub fn column(&self, path: &str, name: &str) -> EngineResult<usize> {
        self.optional_column(name)
            .ok_or_else(|| EngineError::DataParseError {
                path: path.to_string(),
                line: 1,
                message: format!("missing column '{}'", name),
            })
    }

    /// Returns the index of the column named `name`, if present.
    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }
}

impl CsvRow {
    /// Returns the trimmed, non-empty field at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields
            .get(index)
            .map(|f| f.as_str())
            .filter(|f| !f.is_empty())
    }
}

/// Splits one CSV line into trimmed fields.
pub(crate) fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
