use thiserror::Error;

use crate::model::{Arity, OptionSpec, ParsedOptions};
use crate::registry::{is_option_shaped, TokenIndex};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A terminal validation failure.
///
/// Each variant names the offending option(s); the usage message is attached at the reporting boundary (see [`crate::GeneralParser::report`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An option-shaped token does not correspond to any configured option.
    #[error("Unrecognized option '{0}'.")]
    UnrecognizedOption(String),

    /// A required top-level option is absent.
    #[error("Required option '{0}' was not found.")]
    MissingRequiredOption(String),

    /// A value option is present, but its value token is missing or looks like an option.
    #[error("Required argument is missing for option '{0}'.")]
    MissingArgument(String),

    /// An option is present, but one of its dependents is not.
    #[error("Option '{parent}' is missing its dependent option '{dependent}'.")]
    MissingDependentOption {
        /// The present option.
        parent: String,
        /// The absent dependent.
        dependent: String,
    },
}

/// A single validation pass over one input.
///
/// Top-level specs are walked in declaration order, descending into the dependents of each present spec before moving on.
/// The first violation is returned.
pub(crate) struct Parser<'a> {
    options: &'a [OptionSpec],
    tokens: &'a [&'a str],
    index: TokenIndex,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn new(options: &'a [OptionSpec], tokens: &'a [&'a str], index: TokenIndex) -> Self {
        Self {
            options,
            tokens,
            index,
        }
    }

    pub(crate) fn consume(self) -> Result<ParsedOptions, ParseError> {
        let mut parsed = ParsedOptions::default();

        for spec in self.options {
            match self.index.position(spec) {
                Some(position) => self.process(spec, position, &mut parsed)?,
                None if spec.is_required() => {
                    return Err(ParseError::MissingRequiredOption(spec.name().to_string()));
                }
                None => {
                    // Absent optional spec: its dependents are never looked at.
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Skipping absent option '{}'.", spec.name());
                    }
                }
            }
        }

        Ok(parsed)
    }

    fn process(
        &self,
        spec: &OptionSpec,
        position: usize,
        parsed: &mut ParsedOptions,
    ) -> Result<(), ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Resolved option '{}' at position {position}.", spec.name());
        }

        match spec.arity() {
            Arity::Switch => parsed.record_switch(spec.name()),
            Arity::Value { required } => match self.tokens.get(position + 1) {
                Some(candidate) if required && is_option_shaped(candidate) => {
                    return Err(ParseError::MissingArgument(spec.name().to_string()));
                }
                Some(candidate) => parsed.record_target(spec.name(), candidate),
                None if required => {
                    return Err(ParseError::MissingArgument(spec.name().to_string()));
                }
                None => {}
            },
        };

        for dependent in spec.dependents() {
            let dependent_position = self.index.position(dependent).ok_or_else(|| {
                ParseError::MissingDependentOption {
                    parent: spec.name().to_string(),
                    dependent: dependent.name().to_string(),
                }
            })?;
            self.process(dependent, dependent_position, parsed)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SpecRegistry;
    use rstest::rstest;
    use std::collections::HashMap;

    fn parse(options: &[OptionSpec], tokens: &[&str]) -> Result<ParsedOptions, ParseError> {
        let index = SpecRegistry::new(options).index(tokens)?;
        Parser::new(options, tokens, index).consume()
    }

    fn switches(names: &[&str]) -> HashMap<String, bool> {
        names.iter().map(|name| (name.to_string(), true)).collect()
    }

    fn targets(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn parser_empty() {
        // Execute
        let parsed = parse(&[], &[]).unwrap();

        // Verify
        assert!(parsed.is_empty());
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["--flag"], vec!["flag"])]
    #[case(vec!["-f"], vec!["flag"])]
    #[case(vec!["-f", "--flag"], vec!["flag"])]
    fn parser_switch(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        // Setup
        let options = vec![OptionSpec::switch('f', "flag", "")];

        // Execute
        let parsed = parse(&options, tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(parsed.switches(), &switches(&expected));
        assert!(parsed.targets().is_empty());
    }

    #[rstest]
    #[case(vec!["--value", "1"], "1")]
    #[case(vec!["-v", "1"], "1")]
    #[case(vec!["x", "-v", "1", "y"], "1")]
    // The long form wins the tie-break, regardless of ordering.
    #[case(vec!["-v", "short", "--value", "long"], "long")]
    #[case(vec!["--value", "long", "-v", "short"], "long")]
    fn parser_value(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let options = vec![OptionSpec::value('v', "value", "")];

        // Execute
        let parsed = parse(&options, tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(parsed.targets(), &targets(&[("value", expected)]));
        assert!(parsed.switches().is_empty());
    }

    #[rstest]
    #[case(vec!["--value"])]
    #[case(vec!["-v"])]
    #[case(vec!["--value", "--flag"])]
    #[case(vec!["--value", "-f"])]
    #[case(vec!["-f", "-v"])]
    fn parser_value_missing_argument(#[case] tokens: Vec<&str>) {
        // Setup
        let options = vec![
            OptionSpec::switch('f', "flag", ""),
            OptionSpec::value('v', "value", ""),
        ];

        // Execute
        let result = parse(&options, tokens.as_slice());

        // Verify
        assert_eq!(
            result.unwrap_err(),
            ParseError::MissingArgument("value".to_string())
        );
    }

    #[rstest]
    #[case(vec!["--value"], None)]
    #[case(vec!["--value", "1"], Some("1"))]
    // An optional value still takes whatever follows.
    #[case(vec!["--value", "--flag"], Some("--flag"))]
    fn parser_optional_value(#[case] tokens: Vec<&str>, #[case] expected: Option<&str>) {
        // Setup
        let options = vec![
            OptionSpec::switch('f', "flag", ""),
            OptionSpec::optional_value('v', "value", ""),
        ];

        // Execute
        let parsed = parse(&options, tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(parsed.target("value"), expected);
    }

    #[test]
    fn parser_missing_required() {
        // Setup
        let options = vec![
            OptionSpec::switch('f', "flag", ""),
            OptionSpec::value('o', "output", "").required(),
        ];

        // Execute
        let result = parse(&options, &["--flag"]);

        // Verify
        assert_eq!(
            result.unwrap_err(),
            ParseError::MissingRequiredOption("output".to_string())
        );
    }

    #[rstest]
    #[case(vec!["--email"])]
    #[case(vec!["-e", "x"])]
    fn parser_missing_dependent(#[case] tokens: Vec<&str>) {
        // Setup
        let options = vec![OptionSpec::switch('e', "email", "")
            .dependent(OptionSpec::value('E', "email-template", ""))];

        // Execute
        let result = parse(&options, tokens.as_slice());

        // Verify
        assert_eq!(
            result.unwrap_err(),
            ParseError::MissingDependentOption {
                parent: "email".to_string(),
                dependent: "email-template".to_string(),
            }
        );
    }

    #[test]
    fn parser_dependent_not_marked_required() {
        // Setup
        let options = vec![OptionSpec::switch('a', "alpha", "")
            .dependent(OptionSpec::switch('b', "bravo", ""))];

        // Execute
        let result = parse(&options, &["-a"]);

        // Verify
        assert_matches!(result, Err(ParseError::MissingDependentOption { parent, dependent }) => {
            assert_eq!(parent, "alpha");
            assert_eq!(dependent, "bravo");
        });
    }

    #[test]
    fn parser_absent_parent_skips_dependents() {
        // Setup
        let options = vec![
            OptionSpec::switch('e', "email", "")
                .dependent(OptionSpec::value('E', "email-template", "")),
            OptionSpec::value('o', "output", "").required(),
        ];

        // Execute
        let parsed = parse(&options, &["--email-template", "/t", "-o", "/o"]).unwrap();

        // Verify
        assert!(parsed.switches().is_empty());
        assert_eq!(parsed.targets(), &targets(&[("output", "/o")]));
    }

    #[test]
    fn parser_nested_dependents() {
        // Setup
        let options = vec![OptionSpec::switch('a', "alpha", "").dependent(
            OptionSpec::value('b', "bravo", "").dependent(OptionSpec::switch('c', "charlie", "")),
        )];

        // Execute
        let parsed = parse(&options, &["-c", "-a", "--bravo", "1"]).unwrap();

        // Verify
        assert_eq!(parsed.switches(), &switches(&["alpha", "charlie"]));
        assert_eq!(parsed.targets(), &targets(&[("bravo", "1")]));
    }

    #[test]
    fn parser_nested_dependent_missing() {
        // Setup
        let options = vec![OptionSpec::switch('a', "alpha", "").dependent(
            OptionSpec::value('b', "bravo", "").dependent(OptionSpec::switch('c', "charlie", "")),
        )];

        // Execute
        let result = parse(&options, &["-a", "--bravo", "1"]);

        // Verify
        assert_eq!(
            result.unwrap_err(),
            ParseError::MissingDependentOption {
                parent: "bravo".to_string(),
                dependent: "charlie".to_string(),
            }
        );
    }

    #[rstest]
    // Declaration order decides which violation is reported.
    #[case(vec!["--alpha"], ParseError::MissingDependentOption { parent: "alpha".to_string(), dependent: "alpha-value".to_string() })]
    #[case(vec!["--alpha", "--alpha-value"], ParseError::MissingArgument("alpha-value".to_string()))]
    #[case(vec!["--alpha", "--alpha-value", "1"], ParseError::MissingRequiredOption("output".to_string()))]
    #[case(vec!["--output"], ParseError::MissingArgument("output".to_string()))]
    #[case(vec!["--output", "--bogus"], ParseError::UnrecognizedOption("--bogus".to_string()))]
    #[case(vec!["--bogus", "--output"], ParseError::UnrecognizedOption("--bogus".to_string()))]
    fn parser_first_violation(#[case] tokens: Vec<&str>, #[case] expected: ParseError) {
        // Setup
        let options = vec![
            OptionSpec::switch('a', "alpha", "")
                .dependent(OptionSpec::value('A', "alpha-value", "")),
            OptionSpec::value('o', "output", "").required(),
        ];

        // Execute
        let result = parse(&options, tokens.as_slice());

        // Verify
        assert_eq!(result.unwrap_err(), expected);
    }

    #[rstest]
    #[case(ParseError::UnrecognizedOption("--x".to_string()), "Unrecognized option '--x'.")]
    #[case(ParseError::MissingRequiredOption("x".to_string()), "Required option 'x' was not found.")]
    #[case(ParseError::MissingArgument("x".to_string()), "Required argument is missing for option 'x'.")]
    #[case(
        ParseError::MissingDependentOption { parent: "x".to_string(), dependent: "y".to_string() },
        "Option 'x' is missing its dependent option 'y'."
    )]
    fn parse_error_display(#[case] error: ParseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
