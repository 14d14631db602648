use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::anyhow;
use serde::de::{Deserialize, Deserializer, Error, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::board::{BAR_O_SLOT, BAR_X_SLOT};

/// The two sides of the game. Player X owns the positive counts in the
/// canonical board array, player O the negative counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The perspective converter that maps this player's own point numbering
    /// onto the canonical X-oriented board array.
    pub fn perspective(&self) -> &'static dyn Perspective {
        match self {
            Player::X => &XPerspective,
            Player::O => &OPerspective,
        }
    }

    pub fn tag(&self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Player {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            _ => Err(anyhow!("Player must be one of 'x' or 'o', got '{}'", s)),
        }
    }
}

impl Serialize for Player {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_char(self.tag())
    }
}

struct PlayerVisitor {}

impl<'de> Visitor<'de> for PlayerVisitor {
    type Value = Player;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting 'x' or 'o' identifying the player.")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse().map_err(E::custom)
    }

    fn visit_char<E>(self, v: char) -> Result<Self::Value, E>
    where
        E: Error,
    {
        self.visit_str(&v.to_string())
    }
}

impl<'de> Deserialize<'de> for Player {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(PlayerVisitor {})
    }
}

/// Converts between a player's own point numbering (point 1 is always that
/// player's most-advanced point) and the canonical X-oriented board array.
/// Board mutation logic is shared across players; only the conversion
/// differs between the two implementations.
pub trait Perspective {
    fn player(&self) -> Player;

    /// Sign of this player's checkers in the canonical array.
    fn sign(&self) -> i8;

    /// Maps a local point number (1-24) to its canonical array index.
    fn canonical_point(&self, local: u8) -> usize;

    /// Inverse of `canonical_point`.
    fn local_point(&self, canonical: usize) -> u8;

    /// Canonical array index of this player's bar slot.
    fn bar_slot(&self) -> usize;

    /// Canonical array index of the opponent's bar slot, where a hit
    /// checker lands.
    fn opponent_bar_slot(&self) -> usize;

    /// Canonical indexes of this player's home board points.
    fn home_points(&self) -> RangeInclusive<usize>;
}

pub struct XPerspective;

impl Perspective for XPerspective {
    fn player(&self) -> Player {
        Player::X
    }

    fn sign(&self) -> i8 {
        1
    }

    fn canonical_point(&self, local: u8) -> usize {
        debug_assert!((1..=24).contains(&local));
        local as usize
    }

    fn local_point(&self, canonical: usize) -> u8 {
        debug_assert!((1..=24).contains(&canonical));
        canonical as u8
    }

    fn bar_slot(&self) -> usize {
        BAR_X_SLOT
    }

    fn opponent_bar_slot(&self) -> usize {
        BAR_O_SLOT
    }

    fn home_points(&self) -> RangeInclusive<usize> {
        1..=6
    }
}

pub struct OPerspective;

impl Perspective for OPerspective {
    fn player(&self) -> Player {
        Player::O
    }

    fn sign(&self) -> i8 {
        -1
    }

    fn canonical_point(&self, local: u8) -> usize {
        debug_assert!((1..=24).contains(&local));
        25 - local as usize
    }

    fn local_point(&self, canonical: usize) -> u8 {
        debug_assert!((1..=24).contains(&canonical));
        25 - canonical as u8
    }

    fn bar_slot(&self) -> usize {
        BAR_O_SLOT
    }

    fn opponent_bar_slot(&self) -> usize {
        BAR_X_SLOT
    }

    fn home_points(&self) -> RangeInclusive<usize> {
        19..=24
    }
}
