//! `populate` fills email and letter templates from the rows of a CSV file.
//!
//! Each data row of the CSV produces one output file per template.
//! Within a template, every `[[column]]` marker is replaced by that row's value for `column`.
//!
//! # Usage
//! ```console
//! $ populate --email --email-template /path/to/email.txt --output-dir /path/to/output --csv-file /path/to/data.csv
//!
//! $ populate -l -L /path/to/letter.txt -o /path/to/output -f /path/to/data.csv
//!
//! $ populate --email --output-dir /path/to/output --csv-file /path/to/data.csv
//! Parse error: Option 'email' is missing its dependent option 'email-template'.
//!
//! USAGE:
//!  --email, -e                               Toggle to enable email template generation.
//!     --email-template, -E EMAIL-TEMPLATE    Directory path to email template file.
//!                                            Required if '--email' is included.
//! <truncated>
//! ```
//!
//! # Cli Semantics
//! The options are validated by [`populate_options`], according to the following rules.
//!
//! * Each option has a long form `--NAME` and a short form `-K`.
//! Any other token starting with `-` is rejected, before anything else is checked.
//! * When both forms of an option are given, the long form is used.
//! * A value option consumes the token immediately after it.
//! That token must exist, and must not itself start with `-`.
//! * The required options (`--output-dir`, `--csv-file`) must always be given.
//! * `--email` and `--letter` are toggles.
//! Once given, their template option (`--email-template`, `--letter-template`) becomes mandatory.
//! A template option without its toggle is ignored.
//!
//! # Output
//! For a template named `welcome.txt` and a CSV with `n` data rows, the files `welcome0.txt` through `welcome{n-1}.txt` are written into the output directory.
//! A failure part way through a template (ex: a `[[marker]]` naming an unknown column) stops that template.
//! Files already written for earlier rows are left in place.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events from the option parser.
mod cli;
mod error;
mod table;
mod template;

pub use cli::*;
pub use error::*;
pub use table::*;
pub use template::*;
