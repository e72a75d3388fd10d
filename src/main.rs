#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "imvertor",
    about = "Convert UML class models and tabular schema documents to JSON Schema"
)]
struct Cli {
    /// Path to the input file (.xml UML export or .json tabular document)
    #[arg(value_name = "FILE")]
    file: std::path::PathBuf,

    /// Only convert the UML class with this name
    #[arg(short = 'n', long = "name")]
    class_name: Option<String>,

    /// Encoding of the input file (default: latin-1 for XML, utf-8 for JSON)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Parser to use instead of detecting it from the file extension
    #[arg(short, long)]
    parser: Option<String>,

    /// README template rendered next to every schema
    #[arg(short, long)]
    template: Option<std::path::PathBuf>,

    /// Suffix appended to output file names
    #[arg(long)]
    postfix: Option<String>,

    /// Directory in which the schema directories are created
    #[arg(short, long, default_value = ".")]
    output_dir: std::path::PathBuf,

    /// Log debug output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn main() {
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = imvertor::options::ProcessOptions {
        class_name: cli.class_name,
        encoding: cli.encoding,
        template: cli.template,
        postfix: cli.postfix,
        output_dir: cli.output_dir,
    };

    match imvertor::dispatch::run(&cli.file, cli.parser.as_deref(), &options) {
        Ok(written) => tracing::info!(count = written.len(), "done"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
