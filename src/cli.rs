use populate_options::{ConfigError, OptionSpec, ParsedOptions, ParserConfig};
use std::path::PathBuf;
use tracing::info;

use crate::error::PopulateError;
use crate::table::Table;
use crate::template::{Template, TemplateWriter};

/// Toggles email template generation.
pub const EMAIL: &str = "email";
/// Path to the email template.
pub const EMAIL_TEMPLATE: &str = "email-template";
/// Toggles letter template generation.
pub const LETTER: &str = "letter";
/// Path to the letter template.
pub const LETTER_TEMPLATE: &str = "letter-template";
/// Directory the populated templates are written into.
pub const OUTPUT_DIR: &str = "output-dir";
/// Path to the CSV data.
pub const CSV_FILE: &str = "csv-file";

/// Each toggle, paired with the option naming its template.
const TEMPLATES: [(&str, &str); 2] = [(EMAIL, EMAIL_TEMPLATE), (LETTER, LETTER_TEMPLATE)];

/// The `populate` options, in declaration order.
pub fn default_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::switch('e', EMAIL, "Toggle to enable email template generation.").dependent(
            OptionSpec::value('E', EMAIL_TEMPLATE, "Directory path to email template file."),
        ),
        OptionSpec::switch('l', LETTER, "Toggle to enable letter template generation.").dependent(
            OptionSpec::value('L', LETTER_TEMPLATE, "Directory path to letter template file."),
        ),
        OptionSpec::value(
            'o',
            OUTPUT_DIR,
            "Directory path where templates should be written.",
        )
        .required(),
        OptionSpec::value('f', CSV_FILE, "Directory path to the input CSV data file.").required(),
    ]
}

/// The example invocations shown in the usage message.
pub fn default_examples() -> Vec<String> {
    vec![
        "--email --email-template /path/to/template.txt --output-dir /path/to/output --csv-file /path/to/data.csv".to_string(),
        "-l -L /path/to/letter-template.txt -o /path/to/output -f /path/to/data.csv".to_string(),
    ]
}

/// The `populate` parser configuration.
pub fn default_config() -> Result<ParserConfig, ConfigError> {
    ParserConfig::new(default_options(), default_examples())
}

/// Populate every enabled template from the CSV file, returning the written paths.
///
/// Templates are processed email first, then letter.
/// A failure stops everything after it; files already written are kept.
pub fn run(parsed: &ParsedOptions) -> Result<Vec<PathBuf>, PopulateError> {
    let csv_file = parsed
        .target(CSV_FILE)
        .ok_or(PopulateError::MissingTarget(CSV_FILE))?;
    let output_dir = parsed
        .target(OUTPUT_DIR)
        .ok_or(PopulateError::MissingTarget(OUTPUT_DIR))?;
    let table = Table::load(csv_file)?;
    let writer = TemplateWriter::new(&table, output_dir);
    let mut written = Vec::default();

    for (toggle, template_option) in TEMPLATES {
        if !parsed.switch(toggle) {
            continue;
        }

        let path = parsed
            .target(template_option)
            .ok_or(PopulateError::MissingTarget(template_option))?;
        let template = Template::load(path)?;
        written.extend(writer.write(&template)?);
    }

    info!(files = written.len(), "done");
    Ok(written)
}
