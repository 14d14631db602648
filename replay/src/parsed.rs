use serde::{Deserialize, Serialize};

use board::{CheckerMove, DiceRoll};

/// One side's recorded activity on a turn: the dice it rolled and the moves
/// it played, in its own orientation. Produced by an external match parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnMoves {
    pub dice: DiceRoll,
    pub moves: Vec<CheckerMove>,
}

/// A recorded turn. Either side may be absent (no dice, no moves), for
/// example the first turn of a game or a dance on the bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTurn {
    pub turn_number: usize,
    #[serde(default)]
    pub x: Option<TurnMoves>,
    #[serde(default)]
    pub o: Option<TurnMoves>,
}

/// One recorded game out of a parsed match archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedGame {
    pub game_number: usize,
    pub turns: Vec<GameTurn>,
}
