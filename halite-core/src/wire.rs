//! Text codec for the engine protocol: snapshot lines in, command lines out.

use std::str::{FromStr, SplitWhitespace};

use crate::command::Command;
use crate::error::SnapshotError;
use crate::world::{
    link, DockingStatus, PlayerId, RawPlanet, RawPlayer, RawShip, RawSnapshot, World,
};

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            inner: line.split_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T, SnapshotError> {
        let token = self
            .inner
            .next()
            .ok_or(SnapshotError::MissingToken { field })?;
        token.parse::<T>().map_err(|_| SnapshotError::InvalidNumber {
            field,
            token: token.to_string(),
        })
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

/// Parses the own-player id line sent once at startup.
pub fn parse_player_id(line: &str) -> Result<PlayerId, SnapshotError> {
    let mut tokens = Tokens::new(line);
    let id = tokens.next("player id")?;
    expect_exhausted(tokens)?;
    Ok(id)
}

/// Parses the `width height` line sent once at startup.
pub fn parse_dimensions(line: &str) -> Result<(u32, u32), SnapshotError> {
    let mut tokens = Tokens::new(line);
    let width = tokens.next("map width")?;
    let height = tokens.next("map height")?;
    expect_exhausted(tokens)?;
    Ok((width, height))
}

pub fn parse_raw_snapshot(
    my_id: PlayerId,
    width: u32,
    height: u32,
    line: &str,
) -> Result<RawSnapshot, SnapshotError> {
    let mut tokens = Tokens::new(line);

    let player_count: usize = tokens.next("player count")?;
    let mut players = Vec::new();
    for _ in 0..player_count {
        players.push(parse_player(&mut tokens)?);
    }

    let planet_count: usize = tokens.next("planet count")?;
    let mut planets = Vec::new();
    for _ in 0..planet_count {
        planets.push(parse_planet(&mut tokens)?);
    }

    expect_exhausted(tokens)?;

    Ok(RawSnapshot {
        my_id,
        width,
        height,
        players,
        planets,
    })
}

/// Parses and links one turn's snapshot line.
pub fn parse_snapshot(
    my_id: PlayerId,
    width: u32,
    height: u32,
    line: &str,
) -> Result<World, SnapshotError> {
    link(parse_raw_snapshot(my_id, width, height, line)?)
}

/// Joins a turn's commands into the single line the engine expects.
pub fn encode_batch(commands: &[Command]) -> String {
    commands
        .iter()
        .map(Command::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_player(tokens: &mut Tokens<'_>) -> Result<RawPlayer, SnapshotError> {
    let id = tokens.next("player id")?;
    let ship_count: usize = tokens.next("ship count")?;
    let mut ships = Vec::new();
    for _ in 0..ship_count {
        ships.push(parse_ship(tokens)?);
    }
    Ok(RawPlayer { id, ships })
}

fn parse_ship(tokens: &mut Tokens<'_>) -> Result<RawShip, SnapshotError> {
    let id = tokens.next("ship id")?;
    let x = tokens.next("ship x")?;
    let y = tokens.next("ship y")?;
    let health = tokens.next("ship health")?;
    let vel_x = tokens.next("ship velocity x")?;
    let vel_y = tokens.next("ship velocity y")?;
    let code: u8 = tokens.next("docking status")?;
    let docking_status = DockingStatus::from_code(code)
        .ok_or(SnapshotError::UnknownDockingStatus { ship: id, code })?;
    let planet = tokens.next("docked planet")?;
    let docking_progress = tokens.next("docking progress")?;
    let weapon_cooldown = tokens.next("weapon cooldown")?;

    Ok(RawShip {
        id,
        x,
        y,
        health,
        vel_x,
        vel_y,
        docking_status,
        planet,
        docking_progress,
        weapon_cooldown,
    })
}

fn parse_planet(tokens: &mut Tokens<'_>) -> Result<RawPlanet, SnapshotError> {
    let id = tokens.next("planet id")?;
    let x = tokens.next("planet x")?;
    let y = tokens.next("planet y")?;
    let health = tokens.next("planet health")?;
    let radius = tokens.next("planet radius")?;
    let docking_spots = tokens.next("docking spots")?;
    let current_production = tokens.next("current production")?;
    let remaining_resources = tokens.next("remaining resources")?;
    let owned: u8 = tokens.next("owned flag")?;
    let owner: PlayerId = tokens.next("planet owner")?;
    let docked_count: usize = tokens.next("docked ship count")?;
    let mut docked_ships = Vec::new();
    for _ in 0..docked_count {
        docked_ships.push(tokens.next("docked ship id")?);
    }

    Ok(RawPlanet {
        id,
        x,
        y,
        health,
        radius,
        docking_spots,
        current_production,
        remaining_resources,
        owner: (owned != 0).then_some(owner),
        docked_ships,
    })
}

fn expect_exhausted(tokens: Tokens<'_>) -> Result<(), SnapshotError> {
    match tokens.remaining() {
        0 => Ok(()),
        count => Err(SnapshotError::TrailingTokens { count }),
    }
}
