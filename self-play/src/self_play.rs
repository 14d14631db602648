use std::collections::HashSet;

use log::{info, warn};
use rand::Rng;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

use board::{
    classify_phase, position_id, BoardState, DiceRoll, GamePhase, MoveError, Player, PositionId,
};
use oracle::{MoveOracle, OracleError};

use crate::generated::GeneratedPosition;
use crate::options::SelfPlayOptions;

/// Ranked alternatives retained on each generated position.
const PLAYS_PER_POSITION: usize = 3;

/// A non-fatal problem met while a batch was running. The batch always
/// completes with partial success; these are reported alongside it.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("game {game_number} turn {turn_number} ({player}): {source}")]
    Oracle {
        game_number: usize,
        turn_number: usize,
        player: Player,
        source: OracleError,
    },

    #[error("game {game_number} turn {turn_number} ({player}): {source}")]
    Apply {
        game_number: usize,
        turn_number: usize,
        player: Player,
        source: MoveError,
    },
}

/// Cumulative progress, reported after each simulated game completes.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub games_completed: usize,
    pub games_total: usize,
    pub positions_stored: usize,
    pub duplicates_skipped: usize,
    pub turn_number: usize,
}

/// What a batch produced. Partial success by construction: errors never
/// abort the batch, they accumulate here.
#[derive(Debug)]
pub struct BatchResult {
    pub games_played: usize,
    pub positions: Vec<GeneratedPosition>,
    pub duplicates_skipped: usize,
    pub errors: Vec<BatchError>,
}

/// Simulates `options.games` full games sequentially against the oracle,
/// deduplicating generated positions across the whole batch by their
/// identity. The optional progress channel receives one report per
/// completed game.
pub async fn run_batch<O: MoveOracle>(
    oracle: &O,
    options: &SelfPlayOptions,
    progress: Option<Sender<BatchProgress>>,
) -> BatchResult {
    run_batch_with_rng(oracle, options, &mut rand::thread_rng(), progress).await
}

async fn run_batch_with_rng<O: MoveOracle, R: Rng>(
    oracle: &O,
    options: &SelfPlayOptions,
    rng: &mut R,
    progress: Option<Sender<BatchProgress>>,
) -> BatchResult {
    let mut seen: HashSet<PositionId> = HashSet::new();
    let mut positions = Vec::new();
    let mut errors = Vec::new();
    let mut duplicates_skipped = 0;
    let mut games_played = 0;

    for game_number in 1..=options.games {
        let game = play_one_game(oracle, options, game_number, &mut seen, rng).await;

        games_played += 1;
        duplicates_skipped += game.duplicates;
        positions.extend(game.positions);
        errors.extend(game.errors);

        info!(
            "Game: {}/{}, Turns: {}, Winner: {}, Positions: {}, Duplicates: {}, Errors: {}",
            game_number,
            options.games,
            game.turns_played,
            game.winner.map_or("none".to_string(), |w| w.to_string()),
            positions.len(),
            duplicates_skipped,
            errors.len()
        );

        if let Some(progress) = &progress {
            let report = BatchProgress {
                games_completed: games_played,
                games_total: options.games,
                positions_stored: positions.len(),
                duplicates_skipped,
                turn_number: game.turns_played,
            };

            if progress.send(report).await.is_err() {
                warn!("Failed to send batch progress through the progress channel.");
            }
        }
    }

    BatchResult {
        games_played,
        positions,
        duplicates_skipped,
        errors,
    }
}

struct GameOutcome {
    positions: Vec<GeneratedPosition>,
    duplicates: usize,
    turns_played: usize,
    winner: Option<Player>,
    errors: Vec<BatchError>,
}

/// Plays one full game from the starting position: roll, ask the oracle,
/// snapshot the decision point, apply the best play, switch the mover.
/// Oracle failures skip the side's turn without advancing the board. The
/// game ends when the mover bears off their last checker or the turn cap
/// is reached.
async fn play_one_game<O: MoveOracle, R: Rng>(
    oracle: &O,
    options: &SelfPlayOptions,
    game_number: usize,
    seen: &mut HashSet<PositionId>,
    rng: &mut R,
) -> GameOutcome {
    let mut board = BoardState::initial();
    let mut player = Player::X;
    let mut positions = Vec::new();
    let mut errors = Vec::new();
    let mut duplicates = 0;
    let mut winner = None;
    let mut turn_number = 0;

    while turn_number < options.max_turns_per_game {
        turn_number += 1;

        let dice = DiceRoll::roll(rng);

        let plays = match oracle
            .rank_moves(&board, dice, player, options.top_plays)
            .await
        {
            Ok(plays) => plays,
            Err(source) => {
                errors.push(BatchError::Oracle {
                    game_number,
                    turn_number,
                    player,
                    source,
                });
                player = player.opponent();
                continue;
            }
        };

        // No legal moves: the player dances and forfeits the turn.
        if plays.is_empty() {
            player = player.opponent();
            continue;
        }

        let moves = match plays[0].checker_moves() {
            Ok(moves) => moves,
            Err(source) => {
                errors.push(BatchError::Oracle {
                    game_number,
                    turn_number,
                    player,
                    source,
                });
                player = player.opponent();
                continue;
            }
        };

        let phase = classify_phase(&board, turn_number);

        if !(options.skip_opening && phase.phase == GamePhase::Opening) {
            let id = position_id(&board, dice, player);

            if seen.insert(id.clone()) {
                let mut plays = plays.clone();
                plays.truncate(PLAYS_PER_POSITION);

                positions.push(GeneratedPosition {
                    id,
                    board: board.clone(),
                    dice,
                    player,
                    game_number,
                    turn_number,
                    phase,
                    plays,
                });
            } else {
                duplicates += 1;
            }
        }

        let outcome = board.apply_turn(player, &moves);

        errors.extend(outcome.errors.into_iter().map(|source| BatchError::Apply {
            game_number,
            turn_number,
            player,
            source,
        }));

        board = outcome.board;

        if board.checkers_on_board(player) == 0 {
            winner = Some(player);
            break;
        }

        player = player.opponent();
    }

    GameOutcome {
        positions,
        duplicates,
        turns_played: turn_number,
        winner,
        errors,
    }
}
