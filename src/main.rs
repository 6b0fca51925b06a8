mod commands;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use lang_prefs::StoreError;

#[derive(Parser, Debug)]
#[command(name = "lang-prefs")]
#[command(about = "Persisted display-language preference", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    /// Errors from the preference store (settings.toml / settings.json)
    Store(String),
    /// Invalid user input (unknown language, etc.)
    Input(String),
    /// Generic fallback for other failures
    Other(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Store(msg) => write!(f, "Preference store error: {}", msg),
            CliError::Input(msg) => write!(f, "{}", msg),
            CliError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        CliError::Other(e.to_string())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active language (saved preference, or the default)
    Get {
        /// Output as JSON (machine-readable), without ANSI colors
        #[arg(long)]
        json: bool,
    },
    /// Save a new language preference (accepts codes and common names, e.g. `fr` or `French`)
    Set { language: String },
    /// List supported languages, marking the active one
    List,
    /// Render the demo profile card in the active language
    Show,
    /// Clear the saved preference (back to the default language)
    Reset,
    /// Print the settings file path
    Path,
}

#[tokio::main]
async fn main() {
    if let Err(err) = real_main().await {
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
    }
}

async fn real_main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Get { json: false }) {
        Command::Get { json } => commands::prefs::handle_get(json).await?,
        Command::Set { language } => commands::prefs::handle_set(&language).await?,
        Command::List => commands::prefs::handle_list().await?,
        Command::Show => commands::prefs::handle_show().await?,
        Command::Reset => commands::prefs::handle_reset().await?,
        Command::Path => commands::prefs::handle_path(),
    }

    Ok(())
}

fn init_tracing() {
    // Default to info logs unless the user sets RUST_LOG.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
