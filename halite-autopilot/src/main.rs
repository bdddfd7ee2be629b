use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use halite_autopilot::config::BotConfig;
use halite_autopilot::logging;
use halite_autopilot::replay::{replay_session, write_records, ReplayConfig, Session};
use halite_autopilot::runner::play;
use halite_core::constants::TURN_ALLOWANCE_MS;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "halite-autopilot")]
#[command(about = "Halite II fleet bot: plays over stdin/stdout or replays recorded sessions")]
struct Cli {
    /// Write logs here instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one game against the engine on stdin/stdout (default)
    Play {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        turn_budget_ms: Option<u64>,
    },
    /// Decide every turn of a recorded session and emit one JSON record per turn
    Replay {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        turn_budget_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let Cli { log_file, command } = Cli::parse();
    logging::init(log_file.as_deref())?;

    match command.unwrap_or(Commands::Play {
        name: None,
        turn_budget_ms: None,
    }) {
        Commands::Play {
            name,
            turn_budget_ms,
        } => {
            let mut config = bot_config(turn_budget_ms)?;
            if let Some(name) = name {
                config.bot_name = name;
            }
            tracing::info!(
                "starting {}: turn_budget={:?} max_corrections={} angular_step={}",
                config.bot_name,
                config.turn_budget,
                config.navigation.max_corrections,
                config.navigation.angular_step
            );
            play(io::stdin().lock(), io::stdout().lock(), config)?;
        }
        Commands::Replay {
            input,
            output,
            jobs,
            turn_budget_ms,
        } => {
            let session = Session::read(&input)?;
            let config = ReplayConfig {
                bot: bot_config(turn_budget_ms)?,
                jobs,
            };
            let records = replay_session(&session, &config)?;
            if let Some(path) = output {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                write_records(&records, io::BufWriter::new(file))?;
                println!("turns={}", records.len());
                println!("output={}", path.display());
            } else {
                write_records(&records, io::stdout().lock())?;
            }
        }
    }

    Ok(())
}

fn bot_config(turn_budget_ms: Option<u64>) -> Result<BotConfig> {
    let mut config = BotConfig::from_env();
    if let Some(budget_ms) = turn_budget_ms {
        if budget_ms == 0 || budget_ms >= TURN_ALLOWANCE_MS {
            return Err(anyhow!(
                "--turn-budget-ms must be between 1 and {} (got {budget_ms})",
                TURN_ALLOWANCE_MS - 1
            ));
        }
        config.turn_budget = Duration::from_millis(budget_ms);
    }
    Ok(config)
}
