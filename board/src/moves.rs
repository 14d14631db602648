use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;
use serde::de::{Deserializer, Error, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BoardState;
use crate::player::Player;

/// Where a checker moves from, in the moving player's own orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Point(u8),
    Bar,
}

/// Where a checker moves to, in the moving player's own orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDest {
    Point(u8),
    Off,
}

impl Display for MoveSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveSource::Point(p) => write!(f, "{}", p),
            MoveSource::Bar => write!(f, "bar"),
        }
    }
}

impl Display for MoveDest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveDest::Point(p) => write!(f, "{}", p),
            MoveDest::Off => write!(f, "off"),
        }
    }
}

fn parse_point(s: &str) -> Result<u8, anyhow::Error> {
    let point: u8 = s.parse()?;

    if !(1..=24).contains(&point) {
        return Err(anyhow!("Point number must be between 1 and 24, got {}", point));
    }

    Ok(point)
}

impl FromStr for MoveSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(MoveSource::Bar),
            _ => Ok(MoveSource::Point(parse_point(s)?)),
        }
    }
}

impl FromStr for MoveDest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(MoveDest::Off),
            _ => Ok(MoveDest::Point(parse_point(s)?)),
        }
    }
}

impl Serialize for MoveSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for MoveDest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct MoveSourceVisitor {}

impl<'de> Visitor<'de> for MoveSourceVisitor {
    type Value = MoveSource;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting a point number from 1-24 or 'bar'.")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MoveSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(MoveSourceVisitor {})
    }
}

struct MoveDestVisitor {}

impl<'de> Visitor<'de> for MoveDestVisitor {
    type Value = MoveDest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting a point number from 1-24 or 'off'.")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MoveDest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(MoveDestVisitor {})
    }
}

/// A single checker relocation in the moving player's own orientation
/// (point 1 is always that player's most-advanced point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerMove {
    pub from: MoveSource,
    pub to: MoveDest,
}

impl CheckerMove {
    pub fn new(from: MoveSource, to: MoveDest) -> Self {
        CheckerMove { from, to }
    }

    pub fn from_points(from: u8, to: u8) -> Self {
        CheckerMove {
            from: MoveSource::Point(from),
            to: MoveDest::Point(to),
        }
    }
}

impl Display for CheckerMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("player {player} has no checker to move from {from}")]
    IllegalSource { player: Player, from: MoveSource },

    #[error("player {player} cannot land on point {to}: blocked by {count} opposing checkers")]
    BlockedPoint { player: Player, to: u8, count: u8 },
}

/// The board after a best-effort turn, together with every move that could
/// not be applied.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub board: BoardState,
    pub errors: Vec<MoveError>,
}

impl BoardState {
    /// Applies a single move for `player` and returns the resulting board.
    /// The input board is never mutated.
    ///
    /// Hitting: landing on a point held by exactly one opposing checker
    /// sends it to the opponent's bar and leaves the mover in sole
    /// occupancy. Landing on a point held by two or more opposing checkers
    /// is rejected with `BlockedPoint`. Bearing off removes the checker
    /// without touching any slot and is accepted without a home-board
    /// precondition.
    pub fn apply_move(&self, player: Player, mv: &CheckerMove) -> Result<BoardState, MoveError> {
        let pers = player.perspective();
        let sign = pers.sign();
        let mut slots = self.slots_mut_copy();

        let source_slot = match mv.from {
            MoveSource::Bar => pers.bar_slot(),
            MoveSource::Point(p) => pers.canonical_point(p),
        };

        if slots[source_slot] * sign < 1 {
            return Err(MoveError::IllegalSource {
                player,
                from: mv.from,
            });
        }

        slots[source_slot] -= sign;

        if let MoveDest::Point(p) = mv.to {
            let dest_slot = pers.canonical_point(p);
            let occupancy = slots[dest_slot];

            if occupancy * sign < 0 {
                let opposing = occupancy.unsigned_abs();

                if opposing >= 2 {
                    return Err(MoveError::BlockedPoint {
                        player,
                        to: p,
                        count: opposing,
                    });
                }

                // Hit: the blot goes to the opponent's bar and the mover
                // takes the point.
                slots[dest_slot] = sign;
                slots[pers.opponent_bar_slot()] -= sign;
            } else {
                slots[dest_slot] += sign;
            }
        }

        Ok(BoardState::from_slots(slots))
    }

    /// Applies a turn's moves in order, best effort: a move that fails is
    /// recorded and skipped, and the rest of the turn continues from the
    /// board as it stands. Used when reconstructing historical matches
    /// whose transcripts may be inconsistent.
    pub fn apply_turn(&self, player: Player, moves: &[CheckerMove]) -> TurnOutcome {
        let mut board = self.clone();
        let mut errors = Vec::new();

        for mv in moves {
            match board.apply_move(player, mv) {
                Ok(next) => board = next,
                Err(err) => errors.push(err),
            }
        }

        TurnOutcome { board, errors }
    }
}
