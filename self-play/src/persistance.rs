use anyhow::Result;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use uuid_b64::UuidB64;

use crate::generated::GeneratedPosition;

/// Writes a batch's retained positions for the downstream persistence
/// layer: one gzip-compressed JSON file per batch, uniquely named.
pub struct PositionPersistance {
    positions_dir: PathBuf,
}

impl PositionPersistance {
    pub fn new(positions_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&positions_dir)?;

        Ok(Self { positions_dir })
    }

    pub fn write(&mut self, positions: &[GeneratedPosition]) -> Result<PathBuf> {
        let file_path = self
            .positions_dir
            .join(format!("positions_{}.json.gz", UuidB64::new()));
        let file = File::create(&file_path)?;
        let compressor = GzEncoder::new(file, Compression::default());
        serde_json::to_writer(compressor, positions)?;

        Ok(file_path)
    }

    pub fn read(path: &Path) -> Result<Vec<GeneratedPosition>> {
        let file = File::open(path)?;
        let content = GzDecoder::new(file);
        let positions = serde_json::from_reader(content)?;
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{classify_phase, position_id, BoardState, DiceRoll, Player};

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = std::env::temp_dir().join(format!("positions_test_{}", UuidB64::new()));
        let mut persistance = PositionPersistance::new(dir.clone()).unwrap();

        let board = BoardState::initial();
        let dice = DiceRoll(3, 1);
        let positions = vec![GeneratedPosition {
            id: position_id(&board, dice, Player::X),
            board: board.clone(),
            dice,
            player: Player::X,
            game_number: 1,
            turn_number: 1,
            phase: classify_phase(&board, 1),
            plays: Vec::new(),
        }];

        let path = persistance.write(&positions).unwrap();
        let read_back = PositionPersistance::read(&path).unwrap();

        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].id, positions[0].id);
        assert_eq!(read_back[0].board, board);

        fs::remove_dir_all(dir).unwrap();
    }
}
