//! Offline replay of recorded engine sessions.
//!
//! A session file holds exactly what the engine sends: own id, map size, the
//! pre-game map and then one snapshot per line. Every turn is decided
//! independently, so turns run in parallel.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use halite_core::wire::{encode_batch, parse_dimensions, parse_player_id, parse_snapshot};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::BotConfig;
use crate::scheduler::TurnScheduler;

#[derive(Clone, Debug)]
pub struct ReplayConfig {
    pub bot: BotConfig,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub turn: usize,
    pub commands: Vec<String>,
    pub batch: String,
    pub ships_processed: usize,
    pub ships_eligible: usize,
    pub budget_exhausted: bool,
}

/// A recorded session split into its header and turn lines.
#[derive(Clone, Debug)]
pub struct Session {
    pub my_id: u32,
    pub width: u32,
    pub height: u32,
    pub turns: Vec<String>,
}

impl Session {
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let mut header = |what: &'static str| {
            lines
                .next()
                .ok_or_else(|| anyhow!("session ended before the {what} line"))
        };
        let my_id = parse_player_id(header("player id")?).context("invalid player id line")?;
        let (width, height) =
            parse_dimensions(header("map dimensions")?).context("invalid map dimensions line")?;
        // pre-game map is not a decision point
        header("initial map")?;

        let turns = lines
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            my_id,
            width,
            height,
            turns,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read session: {}", path.display()))?;
        Self::parse(&text)
    }
}

pub fn replay_session(session: &Session, config: &ReplayConfig) -> Result<Vec<ReplayRecord>> {
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("replay --jobs must be >= 1 when provided"));
        }
    }

    let scheduler = TurnScheduler::new(config.bot.clone());
    let run_one = |(index, line): (usize, &String)| -> Result<ReplayRecord> {
        let turn = index + 1;
        let world = parse_snapshot(session.my_id, session.width, session.height, line)
            .with_context(|| format!("invalid snapshot for turn {turn}"))?;
        let plan = scheduler.plan_turn(&world, &Instant::now());
        Ok(ReplayRecord {
            turn,
            commands: plan.commands.iter().map(ToString::to_string).collect(),
            batch: encode_batch(&plan.commands),
            ships_processed: plan.processed,
            ships_eligible: plan.eligible,
            budget_exhausted: plan.budget_exhausted,
        })
    };

    let results: Vec<Result<ReplayRecord>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| session.turns.par_iter().enumerate().map(run_one).collect())
    } else {
        session.turns.par_iter().enumerate().map(run_one).collect()
    };

    let records = results.into_iter().collect::<Result<Vec<_>>>()?;
    tracing::info!(
        "replayed {} turns for player {} ({} cut short by the budget)",
        records.len(),
        session.my_id,
        records.iter().filter(|record| record.budget_exhausted).count()
    );
    Ok(records)
}

/// One JSON object per line, in turn order.
pub fn write_records(records: &[ReplayRecord], mut out: impl Write) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
