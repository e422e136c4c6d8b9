use crate::model::{Arity, OptionSpec};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const PADDING: &str = "  ";
const MAIN_INDENT: usize = 1;
const DEPENDENT_INDENT: usize = 3;
const REQUIRED_NOTE: &str = "This option is required.";

struct Row<'a> {
    indent: usize,
    flags: String,
    spec: &'a OptionSpec,
    parent: Option<&'a OptionSpec>,
}

/// Renders the usage message: every option (dependents indented beneath their parent) followed by the examples.
///
/// The output depends only on the specs and examples, so it is rendered once per parser.
pub(crate) struct Printer<'a> {
    options: &'a [OptionSpec],
    examples: &'a [String],
}

impl<'a> Printer<'a> {
    pub(crate) fn new(options: &'a [OptionSpec], examples: &'a [String]) -> Self {
        Self { options, examples }
    }

    pub(crate) fn render(&self) -> String {
        let mut rows = Vec::default();

        for spec in self.options {
            collect(spec, MAIN_INDENT, None, &mut rows);
        }

        let column_width = rows
            .iter()
            .map(|row| row.indent + row.flags.len())
            .max()
            .unwrap_or_default();
        let mut lines = vec!["USAGE:".to_string()];

        for row in &rows {
            let indent = row.indent;
            let width = column_width - indent;
            let mut text = row.spec.description().to_string();

            if row.parent.is_none() && row.spec.is_required() {
                if !text.is_empty() {
                    text.push(' ');
                }

                text.push_str(REQUIRED_NOTE);
            }

            let line = format!("{:indent$}{:width$}{PADDING}{text}", "", row.flags);
            lines.push(line.trim_end().to_string());

            if let Some(parent) = row.parent {
                lines.push(format!(
                    "{:column_width$}{PADDING}Required if '{}' is included.",
                    "",
                    parent.long_form()
                ));
            }
        }

        if !self.examples.is_empty() {
            lines.push(String::default());
            lines.push("EXAMPLES:".to_string());

            for example in self.examples {
                lines.push(format!(" {example}"));
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Rendered usage for {} options with column width {column_width}.",
                rows.len()
            );
        }

        lines.join("\n")
    }
}

fn collect<'a>(
    spec: &'a OptionSpec,
    indent: usize,
    parent: Option<&'a OptionSpec>,
    rows: &mut Vec<Row<'a>>,
) {
    rows.push(Row {
        indent,
        flags: flags(spec),
        spec,
        parent,
    });

    for dependent in spec.dependents() {
        collect(dependent, indent + DEPENDENT_INDENT, Some(spec), rows);
    }
}

fn flags(spec: &OptionSpec) -> String {
    let grammar = match spec.arity() {
        Arity::Switch => "".to_string(),
        Arity::Value { required: true } => format!(" {}", spec.name().to_ascii_uppercase()),
        Arity::Value { required: false } => format!(" [{}]", spec.name().to_ascii_uppercase()),
    };

    format!("{}, {}{grammar}", spec.long_form(), spec.short_form())
}
