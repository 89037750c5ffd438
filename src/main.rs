use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use sass_resolver::candidates::{possible_requests, RequestMode};
use sass_resolver::config::Config;
use sass_resolver::importer::{BundlerImporter, HookOutcome, ImporterChain};
use sass_resolver::infra::{FsResolver, SharedDependencySet};
use sass_resolver::logging;
use sass_resolver::resolver::{ImportOrigin, ImportResolver};

#[derive(Parser)]
#[command(name = "sass_resolver")]
#[command(about = "Bundler-aware import resolution for Sass stylesheets")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one import specifier through the importer chain
    Resolve {
        /// The specifier exactly as written in the stylesheet
        specifier: String,
        /// File containing the import; omit for the entry buffer
        #[arg(long)]
        from: Option<PathBuf>,
        /// Path to the resolver configuration
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print the candidate requests generated for a specifier
    Candidates {
        specifier: String,
        /// Candidate naming mode: bundler or preprocessor
        #[arg(long, default_value = "bundler")]
        mode: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            specifier,
            from,
            config,
        } => {
            let config = Config::load_from(&config)?;
            info!("Loaded resolver configuration");

            let sink = Arc::new(SharedDependencySet::new());
            let importer = BundlerImporter::new(
                ImportResolver::from_config(&config),
                Arc::new(FsResolver::from_config(&config)),
                sink.clone(),
            );
            let mut chain = ImporterChain::new();
            chain.register(Box::new(importer));

            let origin = match from {
                Some(path) => ImportOrigin::SourceFile(path),
                None => ImportOrigin::EntryBuffer,
            };

            match chain.import(&specifier, &origin).await {
                HookOutcome::Redirect(file) => {
                    println!("Resolved: {}", file.display());
                    for dependency in sink.snapshot() {
                        println!("  dependency: {}", dependency.display());
                    }
                }
                HookOutcome::PassThrough => {
                    println!("Unhandled: '{specifier}' falls back to the compiler");
                }
            }
        }
        Commands::Candidates { specifier, mode } => {
            let mode = match mode.as_str() {
                "bundler" => RequestMode::Bundler,
                "preprocessor" => RequestMode::Preprocessor,
                other => anyhow::bail!("unknown mode '{other}', expected bundler or preprocessor"),
            };
            for request in possible_requests(&specifier, mode) {
                println!("{request}");
            }
        }
    }

    Ok(())
}
