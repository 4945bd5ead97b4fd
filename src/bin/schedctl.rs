//! schedctl - resolve and check layered Scheduler documents
//!
//! Usage:
//! - `schedctl resolve org.yaml team.yaml repo.yaml` prints the effective policy
//! - `schedctl validate repo.yaml` checks documents without resolving them

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipeline_scheduler::{
    fingerprint, load_layer, load_layers, render_spec, DocumentFormat, QueryMergeMode, Resolver,
    ResolverConfig,
};

/// schedctl command line
#[derive(Parser)]
#[command(name = "schedctl")]
#[command(about = "Resolve layered pipeline Scheduler documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold layer files (least specific first) into one document
    Resolve {
        /// Layer files, least specific first
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,

        /// How presubmit queries combine across layers
        #[arg(long, value_enum)]
        queries: Option<QueriesArg>,

        /// Resolver configuration file
        #[arg(short, long, env = "SCHEDCTL_CONFIG")]
        config: Option<PathBuf>,

        /// Print the document fingerprint on stderr
        #[arg(long)]
        fingerprint: bool,
    },

    /// Load and validate layer files
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for DocumentFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => Self::Yaml,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum QueriesArg {
    /// Keep the most specific job's queries
    Child,
    /// Append parent queries after the child's
    Append,
}

impl From<QueriesArg> for QueryMergeMode {
    fn from(arg: QueriesArg) -> Self {
        match arg {
            QueriesArg::Child => Self::ChildAuthoritative,
            QueriesArg::Append => Self::Append,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean document
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Resolve {
            files,
            output,
            queries,
            config,
            fingerprint: show_fingerprint,
        } => {
            let mut resolver_config = match config {
                Some(path) => ResolverConfig::load(&path)
                    .with_context(|| format!("loading resolver config {}", path.display()))?,
                None => ResolverConfig::default(),
            };
            if let Some(mode) = queries {
                resolver_config = resolver_config.with_query_merge(mode.into());
            }

            let layers = load_layers(&files)?;
            info!(layers = layers.len(), query_merge = %resolver_config.query_merge, "resolving");

            let resolved = Resolver::new(resolver_config).resolve_layers(&layers)?;
            print!("{}", render_spec(&resolved, output.into())?);
            if matches!(output, OutputFormat::Json) {
                println!();
            }

            if show_fingerprint {
                let fp = fingerprint(&resolved)?;
                info!(fingerprint = %fp.short(), "resolved");
                eprintln!("fingerprint: {fp}");
            }
            Ok(())
        }
        Commands::Validate { files } => {
            for path in &files {
                let layer = load_layer(path)?;
                println!("✓ {} ({})", path.display(), layer.name);
            }
            Ok(())
        }
    }
}
