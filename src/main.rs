//! toprank: product scoring and top-K selection tool
//!
//! Ranks raw e-commerce product tables into a sourcing shortlist.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use toprank::{
    cli,
    config::{self, Validatable},
    pipeline::exit_codes,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "toprank")]
#[command(version)]
#[command(about = "Product scoring and top-K selection tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Ranked output produced
    1  Batch rejected (missing identity column or no usable volume data)
    2  Invalid configuration
    3  Error occurred

EXAMPLES:
    # Score a batch exported as a JSON row array
    toprank score batch.json --date 2025-09-20

    # Read from stdin, write the ranked table to a file
    cat batch.json | toprank score - -O ranked.json

    # Tighten the conversion gate for one run
    toprank score batch.json --conversion-floor 0.03")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "TOPRANK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `score` subcommand
#[derive(Parser, Debug)]
struct ScoreArgs {
    /// Batch input file: a JSON array of row objects (`-` for stdin)
    input: PathBuf,

    /// Batch date or date range, e.g. 2025-09-20 or 2025-09-01 to 2025-09-20
    /// (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Override the configured output size
    #[arg(long)]
    top_k: Option<usize>,

    /// Override the configured conversion-rate floor
    #[arg(long)]
    conversion_floor: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a product batch and emit the ranked top-K table
    Score(ScoreArgs),

    /// Show, initialize, or describe configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Generate an example .toprank.yaml in the current directory
    Init,
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Score(args) => {
            let (mut score_config, loaded_from) =
                match config::load_or_default(cli.config.as_deref()) {
                    Ok(loaded) => loaded,
                    Err(err) => {
                        tracing::error!(%err, "configuration error");
                        std::process::exit(exit_codes::CONFIG);
                    }
                };
            if let Some(path) = &loaded_from {
                tracing::debug!(path = %path.display(), "using config file");
            }
            if let Some(top_k) = args.top_k {
                score_config.top_k = top_k;
            }
            if let Some(floor) = args.conversion_floor {
                score_config.conversion_floor = floor;
            }
            let errors = score_config.validate();
            if !errors.is_empty() {
                for error in &errors {
                    tracing::error!(%error, "invalid configuration");
                }
                std::process::exit(exit_codes::CONFIG);
            }

            let result = cli::run_score(cli::ScoreCommandConfig {
                input: args.input,
                batch_date: args.date,
                output_file: args.output_file,
                config: score_config,
            });
            match result {
                Ok(code) => {
                    if code != 0 {
                        std::process::exit(code);
                    }
                    Ok(())
                }
                Err(err) => {
                    tracing::error!(%err, "scoring failed");
                    let code = if err.is_rejection() {
                        exit_codes::REJECTED
                    } else {
                        exit_codes::ERROR
                    };
                    std::process::exit(code);
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (effective, loaded_from) = config::load_or_default(cli.config.as_deref())
                    .context("failed to load configuration")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&effective).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(config::CONFIG_FILE_NAME);
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
            ConfigAction::Schema { output } => {
                let schema =
                    config::generate_json_schema().context("failed to generate schema")?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(())
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "toprank", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let err = Cli::try_parse_from(["toprank", "-v", "-q", "score", "batch.json"])
            .expect_err("conflicting flags must be rejected");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
