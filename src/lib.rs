//! Hubsets: search, inspect and download Hugging Face Hub datasets.
//!
//! Each command is a plain function over a [`hub::Registry`] that returns a
//! structured report; the CLI prints the report's `Display` rendering. The
//! production registry is [`hub::HubClient`].
//!
//! # Modules
//!
//! - [`hub`]: Registry trait, Hub client, viewer and parquet export helpers
//! - [`search`]: Keyword search ranked by downloads
//! - [`info`]: Dataset metadata, configurations and file listing
//! - [`download`]: Structured and raw-file downloads
//! - [`interactive`]: Prompt-driven flow when no subcommand is given
//! - [`error`]: Error types for hubsets operations

pub mod download;
pub mod error;
pub mod files;
pub mod hub;
pub mod info;
pub mod interactive;
pub mod logging;
pub mod prompt;
pub mod search;

mod display;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

pub use error::HubsetsError;
use hub::client::{DEFAULT_ENDPOINT, DEFAULT_VIEWER_ENDPOINT};
use hub::resolve::parse_dataset_input;
use hub::{HubClient, HubConfig, Registry};
use prompt::{LinePrompter, Prompter};

/// The hubsets CLI application.
#[derive(Parser)]
#[command(name = "hubsets")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    hub: HubArgs,

    /// Result limit for interactive mode (0 shows all).
    #[arg(long, default_value_t = 30)]
    limit: usize,

    /// Configuration to download in interactive mode.
    #[arg(long)]
    config: Option<String>,

    /// Download raw files directly in interactive mode.
    #[arg(long)]
    force_direct: bool,

    /// Directory downloads are written to in interactive mode.
    #[arg(long, default_value = "datasets")]
    output_dir: PathBuf,

    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Connection options shared by every subcommand.
#[derive(clap::Args)]
struct HubArgs {
    /// Hugging Face access token for gated or private datasets.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Hub base URL.
    #[arg(long, env = "HF_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Dataset viewer API base URL.
    #[arg(long, env = "HF_DATASETS_SERVER", default_value = DEFAULT_VIEWER_ENDPOINT, global = true)]
    viewer_endpoint: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// hf-hub cache directory (defaults to HF_HOME or ~/.cache/huggingface).
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
}

impl HubArgs {
    fn to_config(&self) -> HubConfig {
        HubConfig {
            endpoint: self.endpoint.clone(),
            viewer_endpoint: self.viewer_endpoint.clone(),
            token: self.token.clone().filter(|token| !token.is_empty()),
            timeout: Duration::from_secs(self.timeout_secs),
            cache_dir: self.cache_dir.clone(),
            ..HubConfig::default()
        }
    }
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search datasets by keyword, most downloaded first.
    Search(SearchArgs),
    /// Show metadata, configurations and files of a dataset.
    Info(InfoArgs),
    /// Download a dataset.
    Download(DownloadArgs),
}

/// Arguments for the search subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Keyword to search for.
    keyword: String,

    /// Maximum number of results to show (0 shows all).
    #[arg(long, default_value_t = 30)]
    limit: usize,

    /// Also list each dataset's files and summarize them by type.
    #[arg(long)]
    show_files: bool,
}

/// Arguments for the info subcommand.
#[derive(clap::Args)]
struct InfoArgs {
    /// Dataset id ('namespace/name') or dataset URL.
    dataset: String,
}

/// Arguments for the download subcommand.
#[derive(clap::Args)]
struct DownloadArgs {
    /// Dataset id ('namespace/name') or dataset URL.
    dataset: String,

    /// Configuration to download (defaults to the first one).
    #[arg(long)]
    config: Option<String>,

    /// Skip structured loading and fetch the raw repository files.
    #[arg(long)]
    force_direct: bool,

    /// Directory downloads are written to.
    #[arg(long, default_value = "datasets")]
    output_dir: PathBuf,

    /// Ask for confirmation before fetching more raw files than this.
    #[arg(long, default_value_t = 100)]
    confirm_above: usize,
}

/// Run the hubsets CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`. Command
/// failures are printed as part of the report; only an unusable client
/// configuration or a broken stdout are returned as errors.
pub fn run() -> Result<(), HubsetsError> {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    let client = HubClient::new(cli.hub.to_config())?;
    let mut prompter = LinePrompter::stdio();

    match cli.command {
        Some(Commands::Search(args)) => run_search(&client, args),
        Some(Commands::Info(args)) => run_info(&client, &cli.hub.endpoint, args),
        Some(Commands::Download(args)) => run_download(&client, &mut prompter, args),
        None => {
            let opts = interactive::InteractiveOptions {
                limit: cli.limit,
                config: cli.config,
                force_direct: cli.force_direct,
                output_dir: cli.output_dir,
                endpoint: cli.hub.endpoint.clone(),
            };
            println!("hubsets {}: Hugging Face dataset search", env!("CARGO_PKG_VERSION"));
            println!();
            interactive::run_interactive(&client, &mut prompter, &mut std::io::stdout(), &opts)?;
            Ok(())
        }
    }
}

/// Execute the search subcommand.
fn run_search<R: Registry + ?Sized>(registry: &R, args: SearchArgs) -> Result<(), HubsetsError> {
    let opts = search::SearchOptions {
        keyword: args.keyword,
        limit: args.limit,
        show_files: args.show_files,
    };
    let report = search::search_datasets(registry, &opts);
    print!("{}", report);

    if let Some(first) = report.ids().first() {
        println!();
        println!("Show details of a dataset:");
        println!("  hubsets info <dataset-id>");
        println!("Download a dataset:");
        println!("  hubsets download <dataset-id> [--config <name>]");
        println!();
        println!("For example:");
        println!("  hubsets info {}", first);
        println!("  hubsets download {}", first);
    }
    Ok(())
}

/// Execute the info subcommand.
fn run_info<R: Registry + ?Sized>(
    registry: &R,
    endpoint: &str,
    args: InfoArgs,
) -> Result<(), HubsetsError> {
    let dataset_id = match parse_dataset_input(&args.dataset) {
        Ok(id) => id,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    let report = info::show_info(registry, &dataset_id).with_endpoint(endpoint);
    print!("{}", report);
    Ok(())
}

/// Execute the download subcommand.
fn run_download<R, P>(registry: &R, prompter: &mut P, args: DownloadArgs) -> Result<(), HubsetsError>
where
    R: Registry + ?Sized,
    P: Prompter + ?Sized,
{
    let dataset_id = match parse_dataset_input(&args.dataset) {
        Ok(id) => id,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    println!("Preparing download of '{}'", dataset_id);
    let opts = download::DownloadOptions {
        dataset_id,
        config: args.config,
        force_direct: args.force_direct,
        output_dir: args.output_dir,
        confirm_above: args.confirm_above,
        progress: true,
    };
    let report = download::download_dataset(registry, prompter, &opts);
    print!("{}", report);
    Ok(())
}
