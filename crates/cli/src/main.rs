mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "appshelf")]
#[command(version, about = "Static site generator for a catalog of macOS apps", long_about = None)]
struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new catalog directory
    Init {
        /// Path to create catalog directory
        path: PathBuf,

        /// Site name shown in the navigation and footer
        #[arg(long)]
        name: Option<String>,

        /// Absolute URL the site will be deployed at
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Validate catalog configuration and local files
    Validate {
        /// Path to catalog directory
        path: PathBuf,
    },

    /// Build static site
    Build {
        /// Path to catalog directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to catalog directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Check that every download link resolves to the expected installer
    CheckLinks {
        /// Path to catalog directory
        path: PathBuf,

        /// Requests in flight at once
        #[arg(short, long, default_value = "4")]
        concurrency: usize,
    },

    /// Print the feedback templates for one app
    Feedback {
        /// Path to catalog directory
        path: PathBuf,

        /// App name or route segment
        app: String,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Init {
            path,
            name,
            base_url,
        } => commands::init::run(path, name, base_url).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::CheckLinks { path, concurrency } => {
            commands::check_links::run(path, concurrency).await
        }
        Command::Feedback { path, app, json } => commands::feedback::run(path, app, json).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "appshelf", &mut io::stdout());
            Ok(())
        }
    }
}
