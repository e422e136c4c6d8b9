use populate_options::ConfigError;
use thiserror::Error;

use crate::table::TableError;
use crate::template::TemplateError;

/// Any failure after the Cli options have been parsed.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// The option configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The CSV file could not be loaded.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A template could not be loaded, populated, or written.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A required option has no value in the parsed options.
    #[error("Option '{0}' was not supplied.")]
    MissingTarget(&'static str),
}
