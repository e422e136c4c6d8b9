use regex::{Captures, Regex};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::table::Table;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([a-zA-Z0-9_-]+)\]\]").expect("static regex must compile")
});

const OUTPUT_EXTENSION: &str = "txt";

/// A failure to load, populate, or write a [`Template`].
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file does not exist.
    #[error("Template file '{path}' could not be found: {source}")]
    NotFound {
        /// The path which was opened.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// The template file exists, but could not be read.
    #[error("Template file '{path}' could not be read: {source}")]
    Io {
        /// The path which was read.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("Output file '{path}' could not be written: {source}")]
    Write {
        /// The path which was written.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// The template path does not name a file.
    #[error("Template path '{0}' has no file name.")]
    InvalidPath(PathBuf),

    /// The template references a column which is not in the table.
    #[error("Template '{template}' references the unknown key '{key}'.")]
    UnknownKey {
        /// The file name of the template.
        template: String,
        /// The marker's key.
        key: String,
    },
}

/// The lines of a template file.
/// Every `[[key]]` marker (`key` made of ascii letters, digits, `_` or `-`) is substituted on [`Template::populate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    file_name: String,
    lines: Vec<String>,
}

impl Template {
    /// Load a template file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| TemplateError::InvalidPath(path.to_path_buf()))?;
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TemplateError::NotFound {
                path: path.to_path_buf(),
                source,
            },
            _ => TemplateError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(path = %path.display(), "loaded template");

        Ok(Self::new(file_name, content.lines()))
    }

    /// Create a template from its file name and lines.
    pub fn new<I, S>(file_name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file_name: file_name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The template's file name, without its directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The unpopulated lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The file name up to its first `.`.
    pub fn output_stem(&self) -> &str {
        self.file_name
            .split('.')
            .next()
            .unwrap_or(self.file_name.as_str())
    }

    /// Substitute every marker with its value on `row` of `table`.
    ///
    /// ### Example
    /// ```
    /// use populate::{Table, Template};
    ///
    /// let table = Table::from_lines(["name,colour", "Mo,teal"]).unwrap();
    /// let template = Template::new("card.txt", ["Dear [[name]],", "[[colour]] suits you."]);
    ///
    /// assert_eq!(
    ///     template.populate(&table, 0).unwrap(),
    ///     vec!["Dear Mo,", "teal suits you."]
    /// );
    /// ```
    pub fn populate(&self, table: &Table, row: usize) -> Result<Vec<String>, TemplateError> {
        self.lines
            .iter()
            .map(|line| self.populate_line(line, table, row))
            .collect()
    }

    fn populate_line(&self, line: &str, table: &Table, row: usize) -> Result<String, TemplateError> {
        let mut unknown = None;
        let populated = MARKER.replace_all(line, |captures: &Captures| {
            let key = &captures[1];

            match table.value(key, row) {
                Some(value) => value.to_string(),
                None => {
                    unknown.get_or_insert_with(|| key.to_string());
                    String::default()
                }
            }
        });

        match unknown {
            Some(key) => Err(TemplateError::UnknownKey {
                template: self.file_name.clone(),
                key,
            }),
            None => Ok(populated.into_owned()),
        }
    }
}

/// Writes one populated copy of a template per table row.
#[derive(Debug)]
pub struct TemplateWriter<'a> {
    table: &'a Table,
    output_dir: PathBuf,
}

impl<'a> TemplateWriter<'a> {
    /// Create a writer over `table`, targeting `output_dir`.
    pub fn new(table: &'a Table, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            table,
            output_dir: output_dir.into(),
        }
    }

    /// Write `{stem}{row}.txt` for every row of the table, returning the written paths in row order.
    ///
    /// The first failure stops the remaining rows.
    /// Files written for earlier rows are kept.
    pub fn write(&self, template: &Template) -> Result<Vec<PathBuf>, TemplateError> {
        let mut written = Vec::with_capacity(self.table.row_count());

        for row in 0..self.table.row_count() {
            let lines = template.populate(self.table, row)?;
            let path = self.output_dir.join(format!(
                "{}{row}.{OUTPUT_EXTENSION}",
                template.output_stem()
            ));
            write_lines(&path, &lines)?;
            written.push(path);
        }

        info!(
            template = template.file_name(),
            files = written.len(),
            output_dir = %self.output_dir.display(),
            "populated template"
        );
        Ok(written)
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), TemplateError> {
    let to_error = |source: io::Error| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(to_error)?);

    for line in lines {
        writeln!(writer, "{line}").map_err(to_error)?;
    }

    writer.flush().map_err(to_error)
}
