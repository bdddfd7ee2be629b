use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::BotConfig;
use crate::scheduler::TurnScheduler;
use crate::transport::EngineLink;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub turns: u64,
    pub commands_sent: usize,
    pub budget_cuts: u64,
}

/// Plays a whole game over the given streams and returns once the engine
/// closes its side.
pub fn play<R: BufRead, W: Write>(reader: R, writer: W, config: BotConfig) -> Result<GameSummary> {
    let (mut link, _initial) = EngineLink::handshake(reader, writer, &config.bot_name)?;
    let scheduler = TurnScheduler::new(config);
    let mut summary = GameSummary::default();

    while let Some(turn) = link.next_turn()? {
        let plan = scheduler.plan_turn(&turn.world, &turn.received_at);
        link.send_commands(&plan.commands)?;

        summary.turns = turn.number;
        summary.commands_sent += plan.commands.len();
        if plan.budget_exhausted {
            summary.budget_cuts += 1;
        }
        tracing::debug!(
            "turn {} done: commands={} ships={}/{} elapsed={:?}",
            turn.number,
            plan.commands.len(),
            plan.processed,
            plan.eligible,
            turn.received_at.elapsed()
        );
    }

    tracing::info!(
        "game over for player {}: turns={} commands={} budget_cuts={}",
        link.my_id(),
        summary.turns,
        summary.commands_sent,
        summary.budget_cuts
    );
    Ok(summary)
}
