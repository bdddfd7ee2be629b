//! Line protocol with the game engine.
//!
//! Startup is three lines in (own id, map size, initial snapshot) and one line
//! out (bot name). Every turn after that is one snapshot line in and one
//! command batch line out.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use halite_core::wire::{encode_batch, parse_dimensions, parse_player_id, parse_snapshot};
use halite_core::world::PlayerId;
use halite_core::{Command, World};

/// One turn's snapshot and the moment its line arrived.
pub struct Turn {
    pub number: u64,
    pub world: World,
    pub received_at: Instant,
}

pub struct EngineLink<R, W> {
    reader: R,
    writer: W,
    my_id: PlayerId,
    width: u32,
    height: u32,
    turns_read: u64,
    line: String,
}

impl<R: BufRead, W: Write> EngineLink<R, W> {
    /// Runs the startup exchange and returns the link with the pre-game map.
    pub fn handshake(mut reader: R, mut writer: W, bot_name: &str) -> Result<(Self, World)> {
        let mut line = String::new();

        read_required_line(&mut reader, &mut line, "player id")?;
        let my_id = parse_player_id(&line).context("invalid player id line")?;

        read_required_line(&mut reader, &mut line, "map dimensions")?;
        let (width, height) = parse_dimensions(&line).context("invalid map dimensions line")?;

        read_required_line(&mut reader, &mut line, "initial map")?;
        let initial = parse_snapshot(my_id, width, height, &line).context("invalid initial map")?;

        writeln!(writer, "{bot_name}").context("failed to send bot name")?;
        writer.flush().context("failed to flush bot name")?;

        tracing::info!(
            "handshake complete: player={} map={}x{} planets={} players={}",
            my_id,
            width,
            height,
            initial.planets().len(),
            initial.players().len()
        );

        let link = Self {
            reader,
            writer,
            my_id,
            width,
            height,
            turns_read: 0,
            line,
        };
        Ok((link, initial))
    }

    pub fn my_id(&self) -> PlayerId {
        self.my_id
    }

    /// Next turn's snapshot, or `None` once the engine closes the stream.
    pub fn next_turn(&mut self) -> Result<Option<Turn>> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .context("failed to read turn snapshot")?;
        if read == 0 {
            return Ok(None);
        }
        let received_at = Instant::now();
        self.turns_read += 1;

        let world = parse_snapshot(self.my_id, self.width, self.height, &self.line)
            .with_context(|| format!("invalid snapshot for turn {}", self.turns_read))?;
        Ok(Some(Turn {
            number: self.turns_read,
            world,
            received_at,
        }))
    }

    /// Sends one batch line. An empty batch is still a line.
    pub fn send_commands(&mut self, commands: &[Command]) -> Result<()> {
        writeln!(self.writer, "{}", encode_batch(commands)).context("failed to send commands")?;
        self.writer.flush().context("failed to flush commands")
    }
}

fn read_required_line(reader: &mut impl BufRead, line: &mut String, what: &str) -> Result<()> {
    line.clear();
    let read = reader
        .read_line(line)
        .with_context(|| format!("failed to read {what}"))?;
    if read == 0 {
        return Err(anyhow!("engine closed the stream before sending the {what}"));
    }
    Ok(())
}
