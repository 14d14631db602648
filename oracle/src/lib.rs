pub mod http;
pub mod wire;

pub use crate::http::*;
pub use crate::wire::*;

use std::future::Future;

use board::{BoardState, DiceRoll, Player};

/// The external move-evaluation service, consumed as a black box that
/// ranks legal plays by equity for a given board, dice, and player.
pub trait MoveOracle {
    type Future: Future<Output = Result<Vec<RankedPlay>, OracleError>>;

    /// Asks for up to `max_plays` candidate plays, best first. An empty
    /// reply means the player has no legal move and must forfeit the turn.
    fn rank_moves(
        &self,
        board: &BoardState,
        dice: DiceRoll,
        player: Player,
        max_plays: usize,
    ) -> Self::Future;
}

#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    #[error("oracle is unreachable: {0}")]
    Unavailable(String),

    #[error("oracle request failed: {0}")]
    Http(String),

    #[error("oracle returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("oracle proposed an unparsable play: {0}")]
    IllegalPlay(String),
}
