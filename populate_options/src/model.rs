use std::collections::HashMap;

use crate::constant::*;

/// The number of value tokens an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// A toggle: only the presence of the option is recorded.
    Switch,
    /// The option consumes the token immediately following it.
    ///
    /// When `required`, that token must exist and must not itself look like an option.
    Value {
        /// Whether the value token must be present.
        required: bool,
    },
}

/// The description of one recognized option.
///
/// Each option has a long form (`--name`) and a short form (`-key`).
/// Construct with [`OptionSpec::switch`], [`OptionSpec::value`] or [`OptionSpec::optional_value`].
/// Once handed to a [`crate::ParserConfig`] the spec is immutable.
///
/// ### Example
/// ```
/// use populate_options::{Arity, OptionSpec};
///
/// let spec = OptionSpec::switch('e', "email", "Toggle email generation.")
///     .dependent(OptionSpec::value('E', "email-template", "Path to the email template."));
///
/// assert_eq!(spec.long_form(), "--email");
/// assert_eq!(spec.short_form(), "-e");
/// assert_eq!(spec.arity(), Arity::Switch);
/// assert_eq!(spec.dependents().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionSpec {
    key: char,
    name: String,
    required: bool,
    arity: Arity,
    dependents: Vec<OptionSpec>,
    description: String,
}

impl OptionSpec {
    fn new(key: char, name: String, arity: Arity, description: String) -> Self {
        Self {
            key,
            name,
            required: false,
            arity,
            dependents: Vec::default(),
            description,
        }
    }

    /// Create a toggle option, which carries no value.
    pub fn switch(key: char, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(key, name.into(), Arity::Switch, description.into())
    }

    /// Create an option which must be followed by a value token.
    pub fn value(key: char, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            key,
            name.into(),
            Arity::Value { required: true },
            description.into(),
        )
    }

    /// Create an option which accepts, but does not demand, a following value token.
    pub fn optional_value(
        key: char,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            key,
            name.into(),
            Arity::Value { required: false },
            description.into(),
        )
    }

    /// Mark this option as required.
    /// Only meaningful for top-level options; dependents are always required once their parent is present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare an option which becomes mandatory whenever this option is present.
    /// Dependents are checked in the order they are declared.
    pub fn dependent(mut self, spec: OptionSpec) -> Self {
        self.dependents.push(spec);
        self
    }

    /// The single character short identifier.
    pub fn key(&self) -> char {
        self.key
    }

    /// The multi-character long identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a top-level parse fails when this option is absent.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The arity of this option.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether this option consumes the following token.
    pub fn accepts_value(&self) -> bool {
        matches!(self.arity, Arity::Value { .. })
    }

    /// The options which depend on this option.
    pub fn dependents(&self) -> &[OptionSpec] {
        &self.dependents
    }

    /// The help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The `--name` token form.
    pub fn long_form(&self) -> String {
        format!("{LONG_PREFIX}{}", self.name)
    }

    /// The `-key` token form.
    pub fn short_form(&self) -> String {
        format!("{SHORT_PREFIX}{}", self.key)
    }
}

/// A single parsed value, as presented by [`ParsedOptions::all_parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// The presence of a toggle option.
    Switch(bool),
    /// The value consumed by a value option.
    Target(String),
}

/// The result of a successful parse.
///
/// Switches and targets are keyed by the option's long name (without prefix).
/// Options which were absent from the input do not appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    switches: HashMap<String, bool>,
    targets: HashMap<String, String>,
}

impl ParsedOptions {
    pub(crate) fn record_switch(&mut self, name: &str) {
        self.switches.insert(name.to_string(), true);
    }

    pub(crate) fn record_target(&mut self, name: &str, value: &str) {
        self.targets.insert(name.to_string(), value.to_string());
    }

    /// The toggle options found in the input.
    pub fn switches(&self) -> &HashMap<String, bool> {
        &self.switches
    }

    /// The value options found in the input, with their values.
    pub fn targets(&self) -> &HashMap<String, String> {
        &self.targets
    }

    /// Whether the toggle option `name` was present.
    pub fn switch(&self, name: &str) -> bool {
        self.switches.get(name).copied().unwrap_or(false)
    }

    /// The value recorded for the value option `name`, if present.
    pub fn target(&self, name: &str) -> Option<&str> {
        self.targets.get(name).map(String::as_str)
    }

    /// Both switches and targets in a single map.
    pub fn all_parameters(&self) -> HashMap<String, Parameter> {
        let switches = self
            .switches
            .iter()
            .map(|(name, on)| (name.clone(), Parameter::Switch(*on)));
        let targets = self
            .targets
            .iter()
            .map(|(name, value)| (name.clone(), Parameter::Target(value.clone())));
        switches.chain(targets).collect()
    }

    /// Whether nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.switches.is_empty() && self.targets.is_empty()
    }
}
