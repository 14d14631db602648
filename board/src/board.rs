use serde::{Deserialize, Serialize};

use crate::player::Player;

pub const BAR_X_SLOT: usize = 0;
pub const BAR_O_SLOT: usize = 25;
pub const CHECKERS_PER_SIDE: u8 = 15;

/// Maximum distance a checker can be from bearing off. Checkers on the bar
/// count this far in the pip count.
pub const BAR_PIP_DISTANCE: u32 = 25;

/// A backgammon position in canonical X orientation.
///
/// Slot 0 holds X's bar count (>= 0), slots 1-24 the points (positive
/// counts are X checkers, negative are O checkers), and slot 25 holds O's
/// bar count stored negative. A point is only ever occupied by one side;
/// the encoding cannot represent mixed occupancy.
///
/// `BoardState` is an immutable value: every mutation in `moves` returns a
/// fresh copy, so earlier snapshots stay valid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState([i8; 26]);

impl BoardState {
    /// The standard starting position. A fresh value every call; there is no
    /// shared constant to accidentally mutate.
    pub fn initial() -> Self {
        let mut slots = [0i8; 26];

        // X runs from point 24 down to 1.
        slots[24] = 2;
        slots[13] = 5;
        slots[8] = 3;
        slots[6] = 5;

        // O mirrors X.
        slots[1] = -2;
        slots[12] = -5;
        slots[17] = -3;
        slots[19] = -5;

        BoardState(slots)
    }

    pub fn from_slots(slots: [i8; 26]) -> Self {
        BoardState(slots)
    }

    pub fn slots(&self) -> &[i8; 26] {
        &self.0
    }

    pub(crate) fn slots_mut_copy(&self) -> [i8; 26] {
        self.0
    }

    /// Signed occupancy of a canonical point (1-24).
    pub fn point(&self, canonical: usize) -> i8 {
        debug_assert!((1..=24).contains(&canonical));
        self.0[canonical]
    }

    /// Checkers the player has on a canonical point, zero if the point is
    /// empty or held by the opponent.
    pub fn point_count(&self, canonical: usize, player: Player) -> u8 {
        let value = self.point(canonical);
        let sign = player.perspective().sign();

        if value * sign > 0 {
            value.unsigned_abs()
        } else {
            0
        }
    }

    pub fn bar_count(&self, player: Player) -> u8 {
        match player {
            Player::X => self.0[BAR_X_SLOT].max(0).unsigned_abs(),
            Player::O => self.0[BAR_O_SLOT].min(0).unsigned_abs(),
        }
    }

    /// Checkers still in play: points matching the player's sign plus that
    /// player's bar. Zero means the player has borne off everything and won.
    pub fn checkers_on_board(&self, player: Player) -> u8 {
        let on_points: u8 = (1..=24).map(|p| self.point_count(p, player)).sum();

        on_points + self.bar_count(player)
    }

    /// Borne-off checkers are not materialized in the array; they are
    /// implied by conservation.
    pub fn borne_off(&self, player: Player) -> u8 {
        CHECKERS_PER_SIDE.saturating_sub(self.checkers_on_board(player))
    }

    /// Total distance the player's checkers still have to travel to bear
    /// off. Bar checkers count the maximum distance of 25.
    pub fn pip_count(&self, player: Player) -> u32 {
        let pers = player.perspective();

        let point_pips: u32 = (1..=24)
            .map(|p| self.point_count(p, player) as u32 * pers.local_point(p) as u32)
            .sum();

        point_pips + self.bar_count(player) as u32 * BAR_PIP_DISTANCE
    }

    /// True when the player has no bar checkers and every remaining checker
    /// sits inside their own home board: the bear-off eligibility test.
    pub fn all_in_home_board(&self, player: Player) -> bool {
        if self.bar_count(player) > 0 {
            return false;
        }

        let home = player.perspective().home_points();

        (1..=24).all(|p| home.contains(&p) || self.point_count(p, player) == 0)
    }
}
