// finmap CLI - headless mapping template operations

mod edit;
mod exit_codes;
mod push;
mod remote;
mod saved;
mod settings_cmd;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use finmap_client::{ApiError, MappingClient};
use finmap_config::Settings;

use exit_codes::{api_exit_code, EXIT_SUCCESS, EXIT_USAGE};

/// A command failure: exit code, message for stderr, optional hint.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: message.into(), hint: None }
    }
}

/// Wrap an API failure, keeping the server's wording.
pub fn api_error(err: ApiError) -> CliError {
    CliError { code: api_exit_code(&err), message: err.to_string(), hint: None }
}

#[derive(Parser)]
#[command(name = "finmap")]
#[command(about = "Excel mapping templates for the financial mapping service")]
#[command(version)]
struct Cli {
    /// Mapping service base URL (overrides FINMAP_SERVER_URL and settings)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the source files available on the service
    #[command(after_help = "\
Examples:
  finmap files
  finmap files --json | jq '.[0]'")]
    Files {
        /// Emit a JSON array on stdout
        #[arg(long)]
        json: bool,
    },

    /// Show the predefined elements for a source file
    #[command(after_help = "\
Examples:
  finmap elements report.xlsx
  finmap elements 'q1 report.xlsx' --json")]
    Elements {
        /// Source file name as listed by `finmap files`
        file: String,

        /// Emit a JSON array on stdout
        #[arg(long)]
        json: bool,
    },

    /// Browse saved mapping sheets
    #[command(after_help = "\
Examples:
  finmap saved
  finmap saved --search revenue
  finmap saved --page 2 --page-size 10 --json")]
    Saved {
        /// Case-insensitive filter over line items and cell values
        #[arg(long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Sheets per page
        #[arg(long, default_value_t = 6)]
        page_size: usize,

        /// Emit a JSON object on stdout
        #[arg(long)]
        json: bool,
    },

    /// Edit and save mapping templates interactively
    #[command(after_help = "\
Session commands:
  add                       add a sheet
  source <n> <file>         choose a sheet's source file (prefills elements)
  el add <n>                add an element to sheet n
  el set <n> <m> item <v>   set element m's line item
  el set <n> <m> cell <v>   set element m's cell value
  rm <n> / el rm <n> <m>    delete (asks for confirmation)
  list / check / save / quit")]
    Edit,

    /// Validate a payload file and save it in one shot
    #[command(after_help = "\
Examples:
  finmap push template.json
  cat template.json | finmap push
  finmap push template.json --check")]
    Push {
        /// JSON array of sheets, save wire shape (omit to read stdin)
        input: Option<std::path::PathBuf>,

        /// Validate only; do not contact the service
        #[arg(long)]
        check: bool,
    },

    /// Show or change settings
    Config {
        /// Set the mapping service base URL
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Files { json } => remote::cmd_files(&make_client(cli.server.as_deref()), json),
        Commands::Elements { file, json } => {
            remote::cmd_elements(&make_client(cli.server.as_deref()), &file, json)
        }
        Commands::Saved { search, page, page_size, json } => saved::cmd_saved(
            &make_client(cli.server.as_deref()),
            search.as_deref(),
            page,
            page_size,
            json,
        ),
        Commands::Edit => edit::cmd_edit(&make_client(cli.server.as_deref())),
        Commands::Push { input, check } => {
            push::cmd_push(&make_client(cli.server.as_deref()), input, check)
        }
        Commands::Config { server_url } => settings_cmd::cmd_config(server_url),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.code)
        }
    }
}

/// Build the API client: --server flag > env > settings file.
fn make_client(server: Option<&str>) -> MappingClient {
    let settings = Settings::load();
    let base = server.unwrap_or(&settings.server_url);
    MappingClient::new(base, Duration::from_secs(settings.timeout_secs))
}
