use std::fmt;
use std::fmt::{Display, Formatter};
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::board::BoardState;
use crate::dice::DiceRoll;
use crate::player::Player;

/// Stable, collision-resistant identifier for a board + dice + player
/// decision point. Used to deduplicate generated positions within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(String);

impl PositionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PositionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hashes the canonical board slots, the dice in canonical order, and the
/// player tag. Dice order never changes the identity.
pub fn position_id(board: &BoardState, dice: DiceRoll, player: Player) -> PositionId {
    let mut hasher = Sha256::new();

    for &slot in board.slots() {
        hasher.update([slot as u8]);
    }

    let (high, low) = dice.canonical();
    hasher.update([low, high]);
    hasher.update([player.tag() as u8]);

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);

    for byte in digest {
        write!(hex, "{:02x}", byte).expect("writing to a String cannot fail");
    }

    PositionId(hex)
}
