use populate::PopulateError;
use populate_options::GeneralParser;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "populate=info";

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = try_main() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), PopulateError> {
    let config = populate::default_config()?;
    let parsed = GeneralParser::new("populate", config).parse();
    populate::run(&parsed)?;
    Ok(())
}
