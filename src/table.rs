use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// A failure to load a [`Table`].
#[derive(Debug, Error)]
pub enum TableError {
    /// The file does not exist.
    #[error("CSV file '{path}' could not be found: {source}")]
    NotFound {
        /// The path which was opened.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// The file exists, but could not be read.
    #[error("CSV file '{path}' could not be read: {source}")]
    Io {
        /// The path which was read.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// There are no lines at all.
    #[error("CSV data has no header line.")]
    MissingHeader,

    /// The header names the same column twice.
    #[error("CSV header repeats the column '{0}'.")]
    DuplicateColumn(String),

    /// A data row does not have one field per column.
    #[error("CSV line {line} has {found} fields, expected {expected}.")]
    RaggedRow {
        /// The 1-based line number.
        line: usize,
        /// The number of columns in the header.
        expected: usize,
        /// The number of fields on the line.
        found: usize,
    },
}

/// Column oriented CSV data.
///
/// Columns keep the order of the header line, and every column holds exactly [`Table::row_count`] values.
///
/// ### Example
/// ```
/// use populate::Table;
///
/// let table = Table::from_lines([
///     r#""name","diet""#,
///     r#""river otter","fish, snakes, and snails""#,
/// ])
/// .unwrap();
///
/// assert_eq!(table.row_count(), 1);
/// assert_eq!(table.value("diet", 0), Some("fish, snakes, and snails"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: IndexMap<String, Vec<String>>,
    rows: usize,
}

impl Table {
    /// Load a CSV file.
    /// The first line is the header; blank lines are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TableError::NotFound {
                path: path.to_path_buf(),
                source,
            },
            _ => TableError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<String>, io::Error>>()
            .map_err(|source| TableError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::from_lines(lines.iter().map(String::as_str))?;
        debug!(
            path = %path.display(),
            columns = table.columns.len(),
            rows = table.rows,
            "loaded table"
        );
        Ok(table)
    }

    /// Build a table from CSV lines.
    /// Fields may be bare or quoted; a quoted field may contain the delimiter, and `""` for a literal quote.
    pub fn from_lines<'l>(lines: impl IntoIterator<Item = &'l str>) -> Result<Self, TableError> {
        let mut lines = lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());
        let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
        let mut columns = IndexMap::default();

        for name in split_fields(header) {
            if columns.contains_key(&name) {
                return Err(TableError::DuplicateColumn(name));
            }

            columns.insert(name, Vec::default());
        }

        let mut rows = 0;

        for (offset, line) in lines {
            let fields = split_fields(line);

            if fields.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    line: offset + 1,
                    expected: columns.len(),
                    found: fields.len(),
                });
            }

            for (values, field) in columns.values_mut().zip(fields) {
                values.push(field);
            }

            rows += 1;
        }

        Ok(Self { columns, rows })
    }

    /// The column names, in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Whether `name` is a column.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Every value of the column `name`, in row order.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// The value of column `name` on `row`.
    pub fn value(&self, name: &str, row: usize) -> Option<&str> {
        self.columns
            .get(name)
            .and_then(|values| values.get(row))
            .map(String::as_str)
    }

    /// The number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::default();
    let mut current = String::default();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if quoted && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => quoted = !quoted,
            DELIMITER if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}
