use std::env;

use crate::config::ParserConfig;
use crate::model::{OptionSpec, ParsedOptions};
use crate::parser::{ConsoleInterface, ParseError, Parser, Printer, UserInterface};
use crate::registry::SpecRegistry;

/// The configured command line parser.
///
/// Built from a validated [`ParserConfig`]; the usage message is rendered once, at construction.
pub struct GeneralParser {
    program: String,
    config: ParserConfig,
    registry: SpecRegistry,
    usage: String,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("program", &self.program)
            .field("config", &self.config)
            .finish()
    }
}

impl GeneralParser {
    /// Create a command line parser which reports to the console.
    pub fn new(program: impl Into<String>, config: ParserConfig) -> Self {
        Self::with_interface(program, config, Box::new(ConsoleInterface::default()))
    }

    pub(crate) fn with_interface(
        program: impl Into<String>,
        config: ParserConfig,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        let registry = SpecRegistry::new(config.options());
        let usage = Printer::new(config.options(), config.examples()).render();

        Self {
            program: program.into(),
            config,
            registry,
            usage,
            user_interface,
        }
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The top-level option specs, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        self.config.options()
    }

    /// The example invocations.
    pub fn examples(&self) -> &[String] {
        self.config.examples()
    }

    /// The rendered usage message.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Print the usage message to stdout.
    pub fn print_usage(&self) {
        self.user_interface.print(self.usage.clone());
    }

    /// Describe `error` together with the usage message, as shown on the Cli.
    ///
    /// ### Example
    /// ```
    /// use populate_options::{GeneralParser, OptionSpec, ParserConfig};
    ///
    /// let config = ParserConfig::new(
    ///     vec![OptionSpec::value('o', "output", "Where to write.").required()],
    ///     Vec::<String>::default(),
    /// )
    /// .unwrap();
    /// let parser = GeneralParser::new("program", config);
    /// let error = parser.parse_tokens(&[]).unwrap_err();
    ///
    /// assert_eq!(
    ///     parser.report(&error),
    ///     "Parse error: Required option 'output' was not found.\n\n\
    ///      USAGE:\n --output, -o OUTPUT  Where to write. This option is required."
    /// );
    /// ```
    pub fn report(&self, error: &ParseError) -> String {
        format!("Parse error: {error}\n\n{}", self.usage)
    }

    /// Run the parser against the input tokens.
    ///
    /// Parsing happens in two phases:
    /// 1. Every option-shaped token is checked against the configured options.
    /// An unknown option fails here, before any option is evaluated.
    /// 2. The top-level options are evaluated in declaration order, each followed by its dependents.
    /// The first violation encountered is returned.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<ParsedOptions, ParseError> {
        let index = self.registry.index(tokens)?;
        Parser::new(self.config.options(), tokens, index).consume()
    }

    fn invoke(&self, tokens: &[&str]) -> Result<ParsedOptions, i32> {
        self.parse_tokens(tokens).map_err(|error| {
            self.user_interface.print_error(error);
            self.user_interface.print_usage(self.usage.clone());
            1
        })
    }

    /// Run the parser against the Cli [`env::args`].
    ///
    /// If a violation is encountered, the error and the usage message are printed and the process exits with error code `1` (via [`std::process::exit`]).
    pub fn parse(&self) -> ParsedOptions {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.invoke(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(parsed) => parsed,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}
