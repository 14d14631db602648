use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use board::{BoardState, DiceRoll, MoveError, Player};

use crate::parsed::{GameTurn, ParsedGame, TurnMoves};

/// A decision point reconstructed from a recorded game: the board exactly
/// as the player saw it before moving. Always a full copy of the board,
/// never a view into the evolving one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayedPosition {
    pub board: BoardState,
    pub dice: DiceRoll,
    pub player: Player,
    pub turn_number: usize,
    pub game_number: usize,
}

/// A recoverable error met while reconstructing a historical match. Replay
/// never halts on these; they are collected and reported alongside the
/// positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("game {game_number} turn {turn_number} ({player}): {source}")]
pub struct ReplayError {
    pub game_number: usize,
    pub turn_number: usize,
    pub player: Player,
    pub source: MoveError,
}

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub positions: Vec<ReplayedPosition>,
    pub final_board: BoardState,
    pub errors: Vec<ReplayError>,
}

/// Drives the move applicator across one recorded game, snapshotting the
/// position immediately before each side's moves are applied. Errors from
/// the applicator are appended to the outcome and replay continues from the
/// possibly inconsistent post-move board.
pub fn replay_game(game: &ParsedGame) -> ReplayOutcome {
    let mut board = BoardState::initial();
    let mut positions = Vec::new();
    let mut errors = Vec::new();

    for turn in &game.turns {
        for (player, side) in [(Player::X, &turn.x), (Player::O, &turn.o)] {
            if let Some(turn_moves) = side {
                board = replay_side(
                    board,
                    game.game_number,
                    turn,
                    player,
                    turn_moves,
                    &mut positions,
                    &mut errors,
                );
            }
        }
    }

    debug!(
        "replayed game {}: {} positions, {} errors",
        game.game_number,
        positions.len(),
        errors.len()
    );

    ReplayOutcome {
        positions,
        final_board: board,
        errors,
    }
}

fn replay_side(
    board: BoardState,
    game_number: usize,
    turn: &GameTurn,
    player: Player,
    turn_moves: &TurnMoves,
    positions: &mut Vec<ReplayedPosition>,
    errors: &mut Vec<ReplayError>,
) -> BoardState {
    positions.push(ReplayedPosition {
        board: board.clone(),
        dice: turn_moves.dice,
        player,
        turn_number: turn.turn_number,
        game_number,
    });

    let outcome = board.apply_turn(player, &turn_moves.moves);

    errors.extend(outcome.errors.into_iter().map(|source| ReplayError {
        game_number,
        turn_number: turn.turn_number,
        player,
        source,
    }));

    outcome.board
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::CheckerMove;

    fn turn(turn_number: usize, x: Option<TurnMoves>, o: Option<TurnMoves>) -> GameTurn {
        GameTurn { turn_number, x, o }
    }

    fn moves(dice: DiceRoll, moves: &[(&str, &str)]) -> TurnMoves {
        TurnMoves {
            dice,
            moves: moves
                .iter()
                .map(|(from, to)| CheckerMove::new(from.parse().unwrap(), to.parse().unwrap()))
                .collect(),
        }
    }

    #[test]
    fn test_positions_are_snapshotted_before_moves() {
        let game = ParsedGame {
            game_number: 7,
            turns: vec![turn(
                1,
                Some(moves(DiceRoll(6, 5), &[("13", "7"), ("13", "8")])),
                None,
            )],
        };

        let outcome = replay_game(&game);

        assert_eq!(outcome.positions.len(), 1);
        let position = &outcome.positions[0];
        assert_eq!(position.board, BoardState::initial());
        assert_eq!(position.player, Player::X);
        assert_eq!(position.game_number, 7);
        assert_eq!(position.turn_number, 1);

        assert_eq!(outcome.final_board.point(13), 3);
        assert_eq!(outcome.final_board.point(7), 1);
        assert_eq!(outcome.final_board.point(8), 4);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_both_sides_of_a_turn_produce_positions() {
        let game = ParsedGame {
            game_number: 1,
            turns: vec![turn(
                1,
                Some(moves(DiceRoll(3, 1), &[("8", "5"), ("6", "5")])),
                Some(moves(DiceRoll(4, 2), &[("8", "4"), ("6", "4")])),
            )],
        };

        let outcome = replay_game(&game);

        assert_eq!(outcome.positions.len(), 2);
        assert_eq!(outcome.positions[0].player, Player::X);
        assert_eq!(outcome.positions[1].player, Player::O);

        // O's snapshot reflects X's completed turn.
        assert_eq!(outcome.positions[1].board.point(5), 2);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_sides_without_moves_are_skipped() {
        let game = ParsedGame {
            game_number: 1,
            turns: vec![
                turn(1, None, Some(moves(DiceRoll(6, 2), &[("24", "18")]))),
                turn(2, None, None),
            ],
        };

        let outcome = replay_game(&game);

        assert_eq!(outcome.positions.len(), 1);
        assert_eq!(outcome.positions[0].player, Player::O);
    }

    #[test]
    fn test_errors_are_collected_and_replay_continues() {
        let game = ParsedGame {
            game_number: 3,
            turns: vec![
                // X moves from an empty point, then plays a valid move.
                turn(
                    1,
                    Some(moves(DiceRoll(5, 4), &[("2", "1"), ("13", "9")])),
                    Some(moves(DiceRoll(6, 6), &[("13", "7")])),
                ),
            ],
        };

        let outcome = replay_game(&game);

        assert_eq!(outcome.errors.len(), 1);
        let error = &outcome.errors[0];
        assert_eq!(error.game_number, 3);
        assert_eq!(error.turn_number, 1);
        assert_eq!(error.player, Player::X);

        // The valid X move and the O turn still went through.
        assert_eq!(outcome.positions.len(), 2);
        assert_eq!(outcome.final_board.point(9), 1);
        assert_eq!(outcome.final_board.point(12), -4);
    }

    #[test]
    fn test_replayed_position_serializes() {
        let game = ParsedGame {
            game_number: 1,
            turns: vec![turn(1, Some(moves(DiceRoll(2, 1), &[("24", "23")])), None)],
        };

        let outcome = replay_game(&game);
        let json = serde_json::to_string(&outcome.positions[0]).unwrap();

        assert!(json.contains("\"dice\":[2,1]"));
        assert!(json.contains("\"player\":\"x\""));
    }
}
