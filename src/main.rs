use clap::{Parser, Subcommand};
use openmic_baseline::{validate_input, BaselinePipeline, Config};
use std::path::PathBuf;

/// OpenMIC-Style Per-Instrument Baseline
#[derive(Parser)]
#[command(name = "openmic-baseline")]
#[command(about = "Train and evaluate per-instrument boosted-tree baselines on packaged audio features")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train per-class classifiers and report macro precision/recall/F1
    Evaluate {
        /// Data root containing the bundle, class map, keys, and split files
        data_root: PathBuf,

        /// Output directory for the run report
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Custom configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Quiet output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config: PathBuf,
    },
    /// Show default configuration
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            data_root,
            output,
            config,
            verbose,
            quiet,
        } => {
            if verbose && quiet {
                anyhow::bail!("Cannot specify both --verbose and --quiet");
            }

            // Load configuration
            let mut config = if let Some(config_path) = config {
                openmic_baseline::config::load_config(config_path)?
            } else {
                Config::default()
            };
            if verbose {
                config.report.per_class = true;
            }

            // Validate input
            validate_input(&data_root, &config)?;

            let per_class = config.report.per_class;
            let pipeline = BaselinePipeline::new(config);

            if !quiet {
                println!("Evaluating {}...", data_root.display());
            }

            let report = pipeline.run(&data_root, &output)?;

            if quiet {
                openmic_baseline::report::print_summary(&report, false);
            } else {
                openmic_baseline::report::print_summary(&report, per_class);
            }
        }
        Commands::ValidateConfig { config } => {
            let config = openmic_baseline::config::load_config(config)?;
            println!("Configuration is valid");
            if let Ok(json) = serde_json::to_string_pretty(&config) {
                println!("{}", json);
            }
        }
        Commands::ShowConfig => {
            let config = Config::default();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
    }

    Ok(())
}
