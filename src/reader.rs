//! Source resolution and raw tabular reading.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use tracing::debug;

use crate::errors::{TableError, TableResult};

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    Path(PathBuf),
}

impl Source {
    /// Resolve a path spec: `-` means standard input, anything else is
    /// a file path with `~` and `$VAR` expanded.
    pub fn from_spec(spec: &str) -> Self {
        if spec == "-" {
            Self::Stdin
        } else {
            let expanded = shellexpand::full(spec)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| spec.to_string());
            Self::Path(PathBuf::from(expanded))
        }
    }

    /// Open the source for buffered reading.
    pub fn open(&self) -> TableResult<Box<dyn BufRead>> {
        match self {
            Self::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            Self::Path(path) => {
                let file = File::open(path).map_err(|e| TableError::SourceNotFound {
                    path: path.clone(),
                    source: e,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// The untyped split of one input stream: header fields plus data rows,
/// every row already adjusted to header width.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Split a text stream on a literal delimiter.
///
/// The first line is the header. Splitting is strictly literal: regex
/// metacharacters in the delimiter carry no meaning, adjacent
/// delimiters produce empty fields, trailing empty fields are kept.
/// Short rows are padded with empty strings to header width and rows
/// with surplus fields are cut back to it; neither aborts the run.
/// CRLF line endings are tolerated. An empty stream yields an empty
/// table.
pub fn read_table<R: BufRead>(reader: R, delimiter: &str) -> TableResult<RawTable> {
    let mut lines = reader.lines();

    let headers = match lines.next() {
        Some(line) => split_line(&line?, delimiter),
        None => return Ok(RawTable::default()),
    };

    let mut rows = Vec::new();
    for (offset, line) in lines.enumerate() {
        let mut fields = split_line(&line?, delimiter);
        if fields.len() != headers.len() {
            debug!(
                "read_table: row {} adjusted from {} to {} fields",
                offset + 2,
                fields.len(),
                headers.len()
            );
        }
        fields.resize(headers.len(), String::new());
        rows.push(fields);
    }

    debug!(
        "read_table: {} columns, {} data rows",
        headers.len(),
        rows.len()
    );
    Ok(RawTable { headers, rows })
}

fn split_line(line: &str, delimiter: &str) -> Vec<String> {
    line.trim_end_matches('\r')
        .split(delimiter)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_adjacent_delimiters_when_splitting_then_keeps_empty_fields() {
        let fields = split_line("a\t\tb\t", "\t");
        assert_eq!(fields, vec!["a", "", "b", ""]);
    }

    #[test]
    fn given_metacharacter_delimiter_when_splitting_then_splits_literally() {
        assert_eq!(split_line("a|b|c", "|"), vec!["a", "b", "c"]);
        assert_eq!(split_line("a.b.c", "."), vec!["a", "b", "c"]);
        assert_eq!(split_line("abc", "."), vec!["abc"]);
    }

    #[test]
    fn given_crlf_line_when_splitting_then_strips_carriage_return() {
        let fields = split_line("a\tb\r", "\t");
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn given_dash_spec_when_resolving_then_yields_stdin() {
        assert_eq!(Source::from_spec("-"), Source::Stdin);
    }

    #[test]
    fn given_path_spec_when_resolving_then_expands_home() {
        let source = Source::from_spec("~/data.tsv");
        match source {
            Source::Path(path) => assert!(!path.to_string_lossy().contains('~')),
            Source::Stdin => panic!("expected a path source"),
        }
    }
}
