use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aircraft_shared::*;
use aircraft_sim::{policy_by_name, run_episode, Policy, POLICY_NAMES};

#[derive(Parser)]
#[command(name = "aircraft", about = "Checkpoint-racing aircraft agent CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fly a single episode
    Run {
        #[command(flatten)]
        episode: EpisodeArgs,

        /// Output path for the episode report JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Fly many seeds in parallel and summarize
    Batch {
        #[command(flatten)]
        episode: EpisodeArgs,

        /// Number of seeds, starting at --seed
        #[arg(long, default_value_t = 16)]
        seeds: u64,
    },

    /// Print the default episode configuration as JSON
    Config,
}

#[derive(clap::Args)]
struct EpisodeArgs {
    /// Episode config JSON; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Policy (seeker or do_nothing)
    #[arg(long)]
    policy: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Enable reward shaping, step timeouts and randomized spawns
    #[arg(long)]
    training: bool,

    #[arg(long)]
    max_ticks: Option<u32>,

    /// Proximity arrival radius (0 disables it)
    #[arg(long)]
    checkpoint_radius: Option<f32>,
}

impl EpisodeArgs {
    fn load(&self) -> Result<EpisodeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EpisodeConfig::default(),
        };
        if let Some(policy) = &self.policy {
            config.policy = policy.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.training {
            config.agent.training_mode = true;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        if let Some(radius) = self.checkpoint_radius {
            config.checkpoint_radius = radius;
        }
        config.validate().context("invalid episode config")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<EpisodeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn resolve_policy(name: &str) -> Result<Box<dyn Policy>> {
    match policy_by_name(name) {
        Some(policy) => Ok(policy),
        None => bail!(
            "unknown policy '{}'. Valid options: {}",
            name,
            POLICY_NAMES.join(", ")
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { episode, output } => cmd_run(&episode, output),
        Commands::Batch { episode, seeds } => cmd_batch(&episode, seeds),
        Commands::Config => cmd_config(),
    }
}

fn cmd_run(args: &EpisodeArgs, output: Option<PathBuf>) -> Result<()> {
    let config = args.load()?;
    let mut policy = resolve_policy(&config.policy)?;

    println!(
        "Running episode: {} (seed={}, training={})",
        policy.name(),
        config.seed,
        config.agent.training_mode
    );

    let report = run_episode(&config, policy.as_mut())?;
    let result = &report.result;

    println!();
    println!("=== Episode Result ===");
    println!("End:         {}", end_label(result.end));
    println!(
        "Final tick:  {} ({:.1}s)",
        result.final_tick,
        result.final_tick as f32 * config.agent.dt
    );
    println!("Reward:      {:.4}", result.total_reward);
    println!("Checkpoints: {}", result.checkpoints_reached);
    println!("Explosions:  {}", result.explosions);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), frames = report.frames.len(), "report written");
        println!("\nReport written to {}", path.display());
    }
    Ok(())
}

fn cmd_batch(args: &EpisodeArgs, seeds: u64) -> Result<()> {
    if seeds == 0 {
        bail!("batch needs at least one seed");
    }
    let base = args.load()?;
    // Fail on a bad policy name before fanning out
    resolve_policy(&base.policy)?;

    println!(
        "Batch: {} seeds from {} with policy {}",
        seeds, base.seed, base.policy
    );

    let results: Vec<EpisodeResult> = (base.seed..base.seed + seeds)
        .into_par_iter()
        .map(|seed| -> Result<EpisodeResult> {
            let config = EpisodeConfig {
                seed,
                ..base.clone()
            };
            let mut policy = resolve_policy(&config.policy)?;
            Ok(run_episode(&config, policy.as_mut())?.result)
        })
        .collect::<Result<_>>()?;

    let n = results.len() as f32;
    let mean_reward = results.iter().map(|r| r.total_reward).sum::<f32>() / n;
    let mean_checkpoints = results.iter().map(|r| r.checkpoints_reached as f32).sum::<f32>() / n;
    let mean_ticks = results.iter().map(|r| r.final_tick as f32).sum::<f32>() / n;
    info!(
        seeds,
        mean_reward, mean_checkpoints, mean_ticks, "batch finished"
    );

    println!();
    println!("{:<12} {:>10}", "End", "Count");
    println!("{:-<12} {:-<10}", "", "");
    for end in [
        Some(EpisodeEnd::Timeout),
        Some(EpisodeEnd::Collision),
        Some(EpisodeEnd::MaxSteps),
        None,
    ] {
        let count = results.iter().filter(|r| r.end == end).count();
        println!("{:<12} {:>10}", end_label(end), count);
    }
    println!();
    println!("Mean reward:      {:.4}", mean_reward);
    println!("Mean checkpoints: {:.2}", mean_checkpoints);
    println!("Mean ticks:       {:.1}", mean_ticks);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&EpisodeConfig::default())?;
    println!("{json}");
    Ok(())
}

fn end_label(end: Option<EpisodeEnd>) -> &'static str {
    match end {
        Some(EpisodeEnd::Timeout) => "Timeout",
        Some(EpisodeEnd::Collision) => "Collision",
        Some(EpisodeEnd::MaxSteps) => "MaxSteps",
        None => "Running",
    }
}
