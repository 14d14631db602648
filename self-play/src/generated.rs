use serde::{Deserialize, Serialize};

use board::{BoardState, DiceRoll, PhaseClassification, Player, PositionId};
use oracle::RankedPlay;

/// A decision point captured during self-play, immutable once produced.
/// The board is a full snapshot taken before the chosen play was applied;
/// `plays` holds the oracle's best alternatives with their equities and
/// probability breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPosition {
    pub id: PositionId,
    pub board: BoardState,
    #[serde(with = "dice_string")]
    pub dice: DiceRoll,
    pub player: Player,
    pub game_number: usize,
    pub turn_number: usize,
    pub phase: PhaseClassification,
    pub plays: Vec<RankedPlay>,
}

/// Dice travel as their canonical "6-4" string in batch output.
mod dice_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use board::DiceRoll;

    pub fn serialize<S: Serializer>(dice: &DiceRoll, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dice.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DiceRoll, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{position_id, classify_phase};

    fn generated() -> GeneratedPosition {
        let board = BoardState::initial();
        let dice = DiceRoll(4, 6);

        GeneratedPosition {
            id: position_id(&board, dice, Player::X),
            board: board.clone(),
            dice,
            player: Player::X,
            game_number: 1,
            turn_number: 1,
            phase: classify_phase(&board, 1),
            plays: Vec::new(),
        }
    }

    #[test]
    fn test_dice_serialize_as_canonical_string() {
        let json = serde_json::to_value(generated()).unwrap();

        assert_eq!(json["dice"], "6-4");
        assert_eq!(json["player"], "x");
        assert_eq!(json["phase"]["phase"], "OPENING");
    }

    #[test]
    fn test_round_trip() {
        let position = generated();
        let json = serde_json::to_string(&position).unwrap();
        let parsed: GeneratedPosition = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, position.id);
        assert_eq!(parsed.board, position.board);
        assert_eq!(parsed.dice.canonical(), position.dice.canonical());
    }
}
