//! windcheck CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod form;

#[derive(Parser)]
#[command(name = "windcheck", version, about = "LLM-graded technical assessments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one assessment: gather answers, score, display, persist
    Run {
        /// Path to a .toml question catalog (default: built-in wind-energy catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Submitter name (prompted for interactively if omitted)
        #[arg(long)]
        name: Option<String>,

        /// TOML answers file instead of interactive prompts
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Scorer model override
        #[arg(long)]
        model: Option<String>,

        /// Write the scored result as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip the spreadsheet append step
        #[arg(long)]
        no_persist: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question catalog TOML files
    Validate {
        /// Path to a catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List the questions in a catalog
    Catalog {
        /// Path to a .toml catalog (default: built-in wind-energy catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create starter config and example catalog
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("windcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            catalog,
            name,
            answers,
            model,
            output,
            no_persist,
            config,
        } => commands::run::execute(catalog, name, answers, model, output, no_persist, config).await,
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Catalog { catalog } => commands::catalog::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
