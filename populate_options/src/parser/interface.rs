use crate::parser::ParseError;

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
    fn print_usage(&self, usage: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("Parse error: {error}");
    }

    fn print_usage(&self, usage: String) {
        eprintln!();
        eprintln!("{usage}");
    }
}
