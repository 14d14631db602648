use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use board::{BoardState, CheckerMove, DiceRoll, Player};

use crate::OracleError;

/// A board encoded the way the oracle expects it: one point -> count map
/// per side, point keys in that side's own orientation, `"bar"` for the
/// bar slot, no `"off"` key (borne-off checkers are implied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleBoard {
    pub x: BTreeMap<String, u8>,
    pub o: BTreeMap<String, u8>,
}

impl OracleBoard {
    pub fn from_board(board: &BoardState) -> Self {
        OracleBoard {
            x: side_map(board, Player::X),
            o: side_map(board, Player::O),
        }
    }
}

fn side_map(board: &BoardState, player: Player) -> BTreeMap<String, u8> {
    let pers = player.perspective();
    let mut map = BTreeMap::new();

    for canonical in 1..=24 {
        let count = board.point_count(canonical, player);
        if count > 0 {
            map.insert(pers.local_point(canonical).to_string(), count);
        }
    }

    let bar = board.bar_count(player);
    if bar > 0 {
        map.insert("bar".to_string(), bar);
    }

    map
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleRequest {
    pub board: OracleBoard,
    pub dice: DiceRoll,
    pub player: Player,
    pub max_plays: usize,
}

impl OracleRequest {
    pub fn new(board: &BoardState, dice: DiceRoll, player: Player, max_plays: usize) -> Self {
        OracleRequest {
            board: OracleBoard::from_board(board),
            dice,
            player,
            max_plays,
        }
    }
}

/// One step of a candidate play, using the oracle's string sentinels
/// (`"bar"`, `"off"`, or a point number in the mover's orientation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleStep {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinProbabilities {
    pub win: f64,
    pub win_gammon: f64,
    pub win_backgammon: f64,
    pub lose: f64,
    pub lose_gammon: f64,
    pub lose_backgammon: f64,
}

/// A candidate play as ranked by the oracle, best plays first in a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlay {
    pub steps: Vec<OracleStep>,
    pub equity: f64,
    pub probabilities: WinProbabilities,
}

impl RankedPlay {
    /// Parses the play's steps into applicable checker moves.
    pub fn checker_moves(&self) -> Result<Vec<CheckerMove>, OracleError> {
        self.steps
            .iter()
            .map(|step| {
                let from = step
                    .from
                    .parse()
                    .map_err(|e| OracleError::IllegalPlay(format!("{}: {}", step.from, e)))?;
                let to = step
                    .to
                    .parse()
                    .map_err(|e| OracleError::IllegalPlay(format!("{}: {}", step.to, e)))?;

                Ok(CheckerMove::new(from, to))
            })
            .collect()
    }
}
