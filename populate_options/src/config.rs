use std::collections::HashSet;
use thiserror::Error;

use crate::constant::*;
use crate::model::OptionSpec;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An invalid set of option specs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The name is empty, contains whitespace, or starts with the option prefix.
    #[error("Config error: invalid option name '{0}'.")]
    InvalidName(String),

    /// The key is whitespace, a control character, or the option prefix.
    #[error("Config error: invalid short option '{0}'.")]
    InvalidKey(char),

    /// Two specs share a name.
    #[error("Config error: cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    /// Two specs share a key.
    #[error("Config error: cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),

    /// A spec is declared as a (transitive) dependent of itself.
    #[error("Config error: option '{name}' cannot depend on itself (declared beneath '{parent}').")]
    CyclicDependency {
        /// The repeated option.
        name: String,
        /// The option it was declared beneath.
        parent: String,
    },
}

/// A validated set of option specs, plus the example invocations shown in the usage message.
///
/// Every key and every name is unique across the whole tree, including dependents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    options: Vec<OptionSpec>,
    examples: Vec<String>,
}

impl ParserConfig {
    /// Validate and build a configuration.
    ///
    /// ### Example
    /// ```
    /// use populate_options::{ConfigError, OptionSpec, ParserConfig};
    ///
    /// let error = ParserConfig::new(
    ///     vec![
    ///         OptionSpec::switch('a', "alpha", ""),
    ///         OptionSpec::switch('a', "another", ""),
    ///     ],
    ///     Vec::<String>::default(),
    /// )
    /// .unwrap_err();
    ///
    /// assert_eq!(error, ConfigError::DuplicateShortOption('a'));
    /// ```
    pub fn new<I, S>(options: Vec<OptionSpec>, examples: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = HashSet::default();
        let mut keys = HashSet::default();
        let mut ancestors = HashSet::default();

        for spec in &options {
            validate(spec, None, &mut ancestors, &mut names, &mut keys)?;
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Validated {} option specs.", names.len());
        }

        Ok(Self {
            options,
            examples: examples.into_iter().map(Into::into).collect(),
        })
    }

    /// The top-level option specs, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The example invocations.
    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}

fn validate<'s>(
    spec: &'s OptionSpec,
    parent: Option<&'s str>,
    ancestors: &mut HashSet<&'s str>,
    names: &mut HashSet<&'s str>,
    keys: &mut HashSet<char>,
) -> Result<(), ConfigError> {
    let name = spec.name();

    if name.is_empty() || name.starts_with(SHORT_PREFIX) || name.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidName(name.to_string()));
    }

    let key = spec.key();

    if key.is_whitespace() || key.is_control() || SHORT_PREFIX.starts_with(key) {
        return Err(ConfigError::InvalidKey(key));
    }

    // Checked before uniqueness so a self-dependency is reported as such.
    if ancestors.contains(name) {
        return Err(ConfigError::CyclicDependency {
            name: name.to_string(),
            parent: parent.unwrap_or_default().to_string(),
        });
    }

    if !names.insert(name) {
        return Err(ConfigError::DuplicateOption(name.to_string()));
    }

    if !keys.insert(key) {
        return Err(ConfigError::DuplicateShortOption(key));
    }

    ancestors.insert(name);

    for dependent in spec.dependents() {
        validate(dependent, Some(name), ancestors, names, keys)?;
    }

    ancestors.remove(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn config_empty() {
        let config = ParserConfig::new(Vec::default(), Vec::<String>::default()).unwrap();
        assert!(config.options().is_empty());
        assert!(config.examples().is_empty());
    }

    #[test]
    fn config_preserves_order() {
        // Setup
        let options = vec![
            OptionSpec::switch('b', "bravo", ""),
            OptionSpec::switch('a', "alpha", "")
                .dependent(OptionSpec::value('A', "alpha-file", "")),
        ];

        // Execute
        let config = ParserConfig::new(options.clone(), vec!["one", "two"]).unwrap();

        // Verify
        assert_eq!(config.options(), options.as_slice());
        assert_eq!(config.examples(), &["one".to_string(), "two".to_string()]);
    }

    #[rstest]
    #[case(OptionSpec::switch('a', "", ""), ConfigError::InvalidName("".to_string()))]
    #[case(OptionSpec::switch('a', "-alpha", ""), ConfigError::InvalidName("-alpha".to_string()))]
    #[case(OptionSpec::switch('a', "al pha", ""), ConfigError::InvalidName("al pha".to_string()))]
    #[case(OptionSpec::switch('-', "alpha", ""), ConfigError::InvalidKey('-'))]
    #[case(OptionSpec::switch(' ', "alpha", ""), ConfigError::InvalidKey(' '))]
    #[case(OptionSpec::switch('\n', "alpha", ""), ConfigError::InvalidKey('\n'))]
    fn config_invalid_spec(#[case] spec: OptionSpec, #[case] expected: ConfigError) {
        // Execute
        let result = ParserConfig::new(vec![spec], Vec::<String>::default());

        // Verify
        assert_eq!(result.unwrap_err(), expected);
    }

    #[rstest]
    #[case(ConfigError::InvalidName("al pha".to_string()), "Config error: invalid option name 'al pha'.")]
    #[case(ConfigError::InvalidKey('-'), "Config error: invalid short option '-'.")]
    #[case(ConfigError::DuplicateShortOption('a'), "Config error: cannot duplicate the short option 'a'.")]
    fn config_error_message(#[case] error: ConfigError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case(vec![
        OptionSpec::switch('a', "alpha", ""),
        OptionSpec::switch('b', "alpha", ""),
    ], "alpha")]
    #[case(vec![
        OptionSpec::switch('a', "alpha", "").dependent(OptionSpec::value('b', "bravo", "")),
        OptionSpec::switch('c', "bravo", ""),
    ], "bravo")]
    #[case(vec![
        OptionSpec::switch('a', "alpha", "")
            .dependent(OptionSpec::value('b', "bravo", ""))
            .dependent(OptionSpec::value('c', "bravo", "")),
    ], "bravo")]
    fn config_duplicate_name(#[case] options: Vec<OptionSpec>, #[case] expected: &str) {
        // Execute
        let result = ParserConfig::new(options, Vec::<String>::default());

        // Verify
        assert_matches!(result, Err(ConfigError::DuplicateOption(name)) => {
            assert_eq!(name, expected);
        });
    }

    #[rstest]
    #[case(vec![
        OptionSpec::switch('a', "alpha", ""),
        OptionSpec::switch('a', "bravo", ""),
    ])]
    #[case(vec![
        OptionSpec::switch('a', "alpha", "")
            .dependent(OptionSpec::switch('b', "bravo", "")
                .dependent(OptionSpec::value('a', "charlie", ""))),
    ])]
    fn config_duplicate_key(#[case] options: Vec<OptionSpec>) {
        // Execute
        let result = ParserConfig::new(options, Vec::<String>::default());

        // Verify
        assert_eq!(result.unwrap_err(), ConfigError::DuplicateShortOption('a'));
    }

    #[test]
    fn config_self_dependency() {
        // Setup
        let alpha = OptionSpec::switch('a', "alpha", "");
        let options = vec![alpha.clone().dependent(alpha)];

        // Execute
        let result = ParserConfig::new(options, Vec::<String>::default());

        // Verify
        assert_eq!(
            result.unwrap_err(),
            ConfigError::CyclicDependency {
                name: "alpha".to_string(),
                parent: "alpha".to_string(),
            }
        );
    }

    #[test]
    fn config_transitive_self_dependency() {
        // Setup
        let alpha = OptionSpec::switch('a', "alpha", "");
        let options = vec![alpha
            .clone()
            .dependent(OptionSpec::switch('b', "bravo", "").dependent(alpha))];

        // Execute
        let result = ParserConfig::new(options, Vec::<String>::default());

        // Verify
        assert_eq!(
            result.unwrap_err(),
            ConfigError::CyclicDependency {
                name: "alpha".to_string(),
                parent: "bravo".to_string(),
            }
        );
    }

    #[test]
    fn config_siblings_are_not_cycles() {
        // Setup
        let options = vec![
            OptionSpec::switch('a', "alpha", "").dependent(OptionSpec::value('x', "x-ray", "")),
            OptionSpec::switch('b', "bravo", "").dependent(OptionSpec::value('y', "yankee", "")),
        ];

        // Execute
        let result = ParserConfig::new(options, Vec::<String>::default());

        // Verify
        assert!(result.is_ok());
    }
}
