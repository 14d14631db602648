use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::player::Player;

/// Pip count each side starts the game with.
pub const STARTING_PIP_COUNT: u32 = 167;

/// Combined pip count below which a position still counts as close to the
/// initial setup.
const OPENING_PIP_SLACK: u32 = 20;

/// Minimum consecutive blocked points that count as a prime.
const PRIME_MIN_LENGTH: u8 = 4;

/// Pip deficit at which rear anchors stop being a holding game and become a
/// backgame.
const BACKGAME_PIP_DEFICIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GamePhase {
    Opening,
    Early,
    Middle,
    Bearoff,
}

/// A phase label with a confidence score and a human-readable
/// justification. Derived from a position, never stored on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseClassification {
    pub phase: GamePhase,
    pub confidence: f32,
    pub reason: String,
}

/// Maps a position to a coarse game-phase label. The rules are ordered and
/// the first match wins, so identical inputs always classify identically.
pub fn classify_phase(board: &BoardState, move_number: usize) -> PhaseClassification {
    let pip_x = board.pip_count(Player::X);
    let pip_o = board.pip_count(Player::O);
    let combined = pip_x + pip_o;

    for player in [Player::X, Player::O] {
        if board.all_in_home_board(player) {
            return PhaseClassification {
                phase: GamePhase::Bearoff,
                confidence: 1.0,
                reason: format!(
                    "player {} has all remaining checkers in the home board",
                    player
                ),
            };
        }
    }

    if move_number <= 2 && combined + OPENING_PIP_SLACK >= 2 * STARTING_PIP_COUNT {
        return PhaseClassification {
            phase: GamePhase::Opening,
            confidence: 0.95,
            reason: format!(
                "move {} with combined pip count {} near the starting {}",
                move_number,
                combined,
                2 * STARTING_PIP_COUNT
            ),
        };
    }

    if move_number <= 6 && combined >= 240 {
        return PhaseClassification {
            phase: GamePhase::Early,
            confidence: 0.8,
            reason: format!(
                "move {} with average pip count {} still above 120",
                move_number,
                combined / 2
            ),
        };
    }

    if combined < 120 {
        return PhaseClassification {
            phase: GamePhase::Middle,
            confidence: 0.85,
            reason: format!(
                "late race with average pip count {} and no bear-off yet",
                combined / 2
            ),
        };
    }

    PhaseClassification {
        phase: GamePhase::Middle,
        confidence: 0.7,
        reason: format!(
            "middle game at move {} with pip counts {}/{}",
            move_number, pip_x, pip_o
        ),
    }
}

/// A run of consecutive blocked points inside a side's blocking zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prime {
    pub player: Player,
    pub length: u8,
}

/// Tactical characteristics computed independently of the phase label and
/// attached as optional metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionTraits {
    pub prime: Option<Prime>,
    pub blitz: Option<Player>,
    pub backgame: Option<Player>,
    pub holding_game: Option<Player>,
    pub race: bool,
}

pub fn position_traits(board: &BoardState) -> PositionTraits {
    PositionTraits {
        prime: detect_prime(board),
        blitz: detect_blitz(board),
        backgame: detect_backgame(board),
        holding_game: detect_holding_game(board),
        race: is_race(board),
    }
}

/// Blocking zone: the stretch of points a side's prime traps opposing back
/// checkers behind. Canonical 1-12 for X, 13-24 for O.
fn blocking_zone(player: Player) -> std::ops::RangeInclusive<usize> {
    match player {
        Player::X => 1..=12,
        Player::O => 13..=24,
    }
}

fn longest_block_run(board: &BoardState, player: Player) -> u8 {
    let mut longest = 0u8;
    let mut run = 0u8;

    for p in blocking_zone(player) {
        if board.point_count(p, player) >= 2 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    longest
}

fn detect_prime(board: &BoardState) -> Option<Prime> {
    [Player::X, Player::O]
        .into_iter()
        .filter_map(|player| {
            let length = longest_block_run(board, player);
            (length >= PRIME_MIN_LENGTH).then_some(Prime { player, length })
        })
        .max_by_key(|prime| prime.length)
}

fn home_points_held(board: &BoardState, player: Player) -> u8 {
    player
        .perspective()
        .home_points()
        .filter(|&p| board.point_count(p, player) >= 2)
        .count() as u8
}

fn detect_blitz(board: &BoardState) -> Option<Player> {
    [Player::X, Player::O].into_iter().find(|&attacker| {
        board.bar_count(attacker.opponent()) >= 1 && home_points_held(board, attacker) >= 4
    })
}

/// Anchors the player holds inside the given canonical range.
fn anchors_in(
    board: &BoardState,
    player: Player,
    range: std::ops::RangeInclusive<usize>,
) -> u8 {
    range.filter(|&p| board.point_count(p, player) >= 2).count() as u8
}

fn pip_deficit(board: &BoardState, player: Player) -> u32 {
    board
        .pip_count(player)
        .saturating_sub(board.pip_count(player.opponent()))
}

fn detect_backgame(board: &BoardState) -> Option<Player> {
    [Player::X, Player::O].into_iter().find(|&player| {
        let opponent_home = player.opponent().perspective().home_points();

        anchors_in(board, player, opponent_home) >= 2
            && pip_deficit(board, player) >= BACKGAME_PIP_DEFICIT
    })
}

/// One or more anchors in the opponent's home or outer board while the race
/// is still close. A backgame takes precedence.
fn detect_holding_game(board: &BoardState) -> Option<Player> {
    let backgame = detect_backgame(board);

    [Player::X, Player::O].into_iter().find(|&player| {
        if backgame == Some(player) {
            return false;
        }

        // Opponent's half of the board: home plus outer.
        let opponent_half = match player {
            Player::X => 13..=24,
            Player::O => 1..=12,
        };

        anchors_in(board, player, opponent_half) >= 1
            && pip_deficit(board, player) < BACKGAME_PIP_DEFICIT
    })
}

/// True when neither side has checkers behind the other's front line and
/// nobody is on the bar: the sides can no longer make contact.
fn is_race(board: &BoardState) -> bool {
    if board.bar_count(Player::X) > 0 || board.bar_count(Player::O) > 0 {
        return false;
    }

    // X moves toward canonical 1, O toward canonical 24.
    let x_rearmost = (1..=24)
        .rev()
        .find(|&p| board.point_count(p, Player::X) > 0)
        .unwrap_or(0);
    let o_rearmost = (1..=24)
        .find(|&p| board.point_count(p, Player::O) > 0)
        .unwrap_or(25);

    x_rearmost < o_rearmost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BAR_O_SLOT, BAR_X_SLOT};
    use crate::moves::CheckerMove;

    fn board_with(points: &[(usize, i8)]) -> BoardState {
        let mut slots = [0i8; 26];
        for &(slot, count) in points {
            slots[slot] = count;
        }
        BoardState::from_slots(slots)
    }

    #[test]
    fn test_initial_position_at_move_1_is_opening() {
        let classification = classify_phase(&BoardState::initial(), 1);

        assert_eq!(classification.phase, GamePhase::Opening);
    }

    #[test]
    fn test_opening_requires_near_starting_pips() {
        // Two opening moves each worth a handful of pips keep it an opening.
        let board = BoardState::initial()
            .apply_move(Player::X, &CheckerMove::from_points(24, 18))
            .unwrap();

        assert_eq!(classify_phase(&board, 2).phase, GamePhase::Opening);
    }

    #[test]
    fn test_early_phase_after_opening_window() {
        let classification = classify_phase(&BoardState::initial(), 4);

        assert_eq!(classification.phase, GamePhase::Early);
    }

    #[test]
    fn test_middle_is_the_default() {
        let classification = classify_phase(&BoardState::initial(), 12);

        assert_eq!(classification.phase, GamePhase::Middle);
    }

    #[test]
    fn test_late_race_is_middle_with_reason() {
        // Both sides below 60 pips but not yet bear-off eligible.
        let board = board_with(&[(2, 5), (8, 5), (23, -5), (17, -5)]);
        assert!(board.pip_count(Player::X) < 60);
        assert!(board.pip_count(Player::O) < 60);
        assert!(!board.all_in_home_board(Player::X));
        assert!(!board.all_in_home_board(Player::O));

        let classification = classify_phase(&board, 30);

        assert_eq!(classification.phase, GamePhase::Middle);
        assert!(classification.reason.contains("late race"));
    }

    #[test]
    fn test_bearoff_wins_over_everything() {
        let board = board_with(&[(1, 5), (2, 5), (3, 5), (12, -5), (17, -5), (23, -5)]);

        let classification = classify_phase(&board, 1);

        assert_eq!(classification.phase, GamePhase::Bearoff);
        assert_eq!(classification.confidence, 1.0);
    }

    #[test]
    fn test_bearoff_blocked_by_bar_checker() {
        let mut slots = [0i8; 26];
        slots[1] = 14;
        slots[BAR_X_SLOT] = 1;
        slots[12] = -15;
        let board = BoardState::from_slots(slots);

        assert_ne!(classify_phase(&board, 30).phase, GamePhase::Bearoff);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let board = BoardState::initial();

        let a = classify_phase(&board, 5);
        let b = classify_phase(&board, 5);

        assert_eq!(a, b);
    }

    #[test]
    fn test_prime_detection() {
        // X blocks canonical 4-7.
        let board = board_with(&[(4, 2), (5, 2), (6, 3), (7, 2), (20, -2)]);

        let traits = position_traits(&board);

        assert_eq!(
            traits.prime,
            Some(Prime {
                player: Player::X,
                length: 4
            })
        );
    }

    #[test]
    fn test_three_blocked_points_are_not_a_prime() {
        let board = board_with(&[(4, 2), (5, 2), (6, 3)]);

        assert_eq!(position_traits(&board).prime, None);
    }

    #[test]
    fn test_blitz_detection() {
        let mut slots = [0i8; 26];
        slots[1] = 2;
        slots[2] = 2;
        slots[4] = 2;
        slots[5] = 2;
        slots[13] = 7;
        slots[BAR_O_SLOT] = -1;
        slots[19] = -14;
        let board = BoardState::from_slots(slots);

        assert_eq!(position_traits(&board).blitz, Some(Player::X));
    }

    #[test]
    fn test_no_blitz_without_bar_checker() {
        let board = board_with(&[(1, 2), (2, 2), (4, 2), (5, 2), (19, -15)]);

        assert_eq!(position_traits(&board).blitz, None);
    }

    #[test]
    fn test_backgame_needs_two_anchors_and_a_deficit() {
        // X holds two anchors in O's home board and trails the race badly.
        let board = board_with(&[(20, 2), (22, 2), (24, 5), (13, 6), (19, -5), (17, -5), (12, -5)]);
        assert!(board.pip_count(Player::X) >= board.pip_count(Player::O) + 50);

        assert_eq!(position_traits(&board).backgame, Some(Player::X));
    }

    #[test]
    fn test_holding_game_with_close_race() {
        // X keeps one anchor in O's outer board while the race stays close.
        let board = board_with(&[(13, 2), (6, 5), (8, 4), (5, 4), (12, -5), (17, -5), (19, -5)]);
        assert!(board.pip_count(Player::X) < board.pip_count(Player::O) + 50);

        let traits = position_traits(&board);

        assert_eq!(traits.holding_game, Some(Player::X));
        assert_eq!(traits.backgame, None);
    }

    #[test]
    fn test_race_when_no_contact() {
        let board = board_with(&[(3, 10), (5, 5), (20, -10), (18, -5)]);

        assert!(position_traits(&board).race);
    }

    #[test]
    fn test_no_race_with_contact() {
        assert!(!position_traits(&BoardState::initial()).race);
    }

    #[test]
    fn test_no_race_with_bar_checker() {
        let mut slots = [0i8; 26];
        slots[3] = 14;
        slots[BAR_X_SLOT] = 1;
        slots[20] = -15;
        let board = BoardState::from_slots(slots);

        assert!(!position_traits(&board).race);
    }

    #[test]
    fn test_phase_serde_labels() {
        assert_eq!(
            serde_json::to_string(&GamePhase::Bearoff).unwrap(),
            "\"BEAROFF\""
        );
        assert_eq!(
            serde_json::to_string(&GamePhase::Opening).unwrap(),
            "\"OPENING\""
        );
    }
}
