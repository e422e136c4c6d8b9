//! Declarative option parser for `populate`.
//!
//! Options are described up front as a tree of [`OptionSpec`]s (top-level options and the options
//! that depend on them), validated into a [`ParserConfig`], and then matched against raw Cli tokens
//! by a [`GeneralParser`].
//!
//! ### Example
//! ```
//! use populate_options::{GeneralParser, OptionSpec, ParserConfig};
//!
//! let config = ParserConfig::new(
//!     vec![
//!         OptionSpec::switch('v', "verbose", "Print more."),
//!         OptionSpec::value('o', "output", "Where to write.").required(),
//!     ],
//!     vec!["--verbose --output /tmp"],
//! )
//! .unwrap();
//! let parser = GeneralParser::new("program", config);
//! let parsed = parser.parse_tokens(&["-v", "--output", "/tmp"]).unwrap();
//!
//! assert!(parsed.switch("verbose"));
//! assert_eq!(parsed.target("output"), Some("/tmp"));
//! ```
#![deny(missing_docs)]
mod config;
mod constant;
mod model;
mod parser;
mod registry;

pub use config::*;
pub use model::*;
pub use parser::{GeneralParser, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
