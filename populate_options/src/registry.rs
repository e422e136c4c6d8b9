use std::collections::{HashMap, HashSet};

use crate::constant::*;
use crate::model::OptionSpec;
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Whether the token has the shape of an option (`--..` or `-..`), known or not.
pub(crate) fn is_option_shaped(token: &str) -> bool {
    token.starts_with(LONG_PREFIX) || token.starts_with(SHORT_PREFIX)
}

/// The set of every valid option token form, across the whole spec tree.
#[derive(Debug)]
pub(crate) struct SpecRegistry {
    valid_tokens: HashSet<String>,
}

impl SpecRegistry {
    pub(crate) fn new(options: &[OptionSpec]) -> Self {
        let mut valid_tokens = HashSet::default();
        let mut pending: Vec<&OptionSpec> = options.iter().collect();

        while let Some(spec) = pending.pop() {
            valid_tokens.insert(spec.long_form());
            valid_tokens.insert(spec.short_form());
            pending.extend(spec.dependents());
        }

        Self { valid_tokens }
    }

    pub(crate) fn is_valid(&self, token: &str) -> bool {
        self.valid_tokens.contains(token)
    }

    /// Locate every option token in the input.
    ///
    /// Fails on the first option-shaped token which is not a valid form, before any spec is evaluated.
    /// When a token repeats, the last occurrence wins.
    pub(crate) fn index(&self, tokens: &[&str]) -> Result<TokenIndex, ParseError> {
        let mut positions = HashMap::default();

        for (position, token) in tokens.iter().enumerate() {
            if is_option_shaped(token) {
                if !self.is_valid(token) {
                    return Err(ParseError::UnrecognizedOption(token.to_string()));
                }

                positions.insert(token.to_string(), position);
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Indexed {} option tokens: {positions:?}.", positions.len());
        }

        Ok(TokenIndex { positions })
    }
}

/// The position of each option token in one input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TokenIndex {
    positions: HashMap<String, usize>,
}

impl TokenIndex {
    /// The position of `spec` in the input.
    /// The long form takes precedence over the short form when both are present.
    pub(crate) fn position(&self, spec: &OptionSpec) -> Option<usize> {
        self.positions
            .get(&spec.long_form())
            .or_else(|| self.positions.get(&spec.short_form()))
            .copied()
    }
}
