//! FFG simulator — entry point for running a checkpoint-voting session.

use anyhow::Context;
use clap::Parser;
use ffg_sim::tracing_spans::report_span;
use ffg_sim::{OutputFormat, ShutdownController, Simulation, SimulationConfig};
use ffg_utils::LogFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffg-sim", about = "Supermajority checkpoint-voting simulator")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FFG_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FFG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FFG_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the simulation and print the finalized chain.
    Run {
        /// Seed for the branch source (omit for OS entropy).
        #[arg(long, env = "FFG_SEED")]
        seed: Option<u64>,

        /// Number of checkpoint rounds to play.
        #[arg(long, env = "FFG_CHECKPOINTS")]
        checkpoints: Option<u64>,

        /// Apply each round's votes in parallel. `--parallel=false` turns off
        /// `parallel_voting` set in the config file.
        #[arg(
            long,
            env = "FFG_PARALLEL",
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true"
        )]
        parallel: Option<bool>,

        /// Report format: "text" or "json".
        #[arg(long, default_value = "text", env = "FFG_OUTPUT")]
        output: OutputFormat,
    },
    /// Print the default configuration as TOML.
    DefaultConfig,
}

/// Flag and env values that take precedence over the config file.
#[derive(Debug, Default)]
struct Overrides {
    log_level: Option<String>,
    log_format: Option<LogFormat>,
    seed: Option<u64>,
    checkpoints: Option<u64>,
    parallel: Option<bool>,
}

impl Overrides {
    /// Replace every config field whose override is set; the rest keep the
    /// file (or default) value.
    fn apply(self, config: &mut SimulationConfig) {
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(checkpoints) = self.checkpoints {
            config.total_checkpoints = checkpoints;
        }
        if let Some(parallel) = self.parallel {
            config.parallel_voting = parallel;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => SimulationConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let mut overrides = Overrides {
        log_level: cli.log_level,
        log_format: cli.log_format,
        ..Default::default()
    };

    match cli.command {
        Command::DefaultConfig => {
            print!("{}", SimulationConfig::default().to_toml_string()?);
        }
        Command::Run {
            seed,
            checkpoints,
            parallel,
            output,
        } => {
            overrides.seed = seed;
            overrides.checkpoints = checkpoints;
            overrides.parallel = parallel;
            overrides.apply(&mut config);

            ffg_utils::init_logging(config.log_format, &config.log_level);
            if let Some(ref path) = cli.config {
                tracing::info!("Loaded config from {}", path.display());
            }
            tracing::info!(
                "Starting simulation: {} validators, {} checkpoints, seed {}",
                config.validators.len(),
                config.total_checkpoints,
                config
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "entropy".into()),
            );

            let mut simulation = Simulation::from_config(config)?;

            let controller = ShutdownController::new();
            let token = controller.token();
            let signals = tokio::spawn(async move { controller.wait_for_signal().await });

            let report = tokio::task::spawn_blocking(move || simulation.run(&token))
                .await
                .context("simulation task panicked")??;
            signals.abort();

            let rendered = {
                let _span = report_span(output.as_str(), report.links.len()).entered();
                report.render(output)?
            };
            print!("{rendered}");
        }
    }

    Ok(())
}
