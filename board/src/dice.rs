use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An unordered pair of dice, each 1-6. `(4, 6)` and `(6, 4)` describe the
/// same roll; the canonical form puts the high die first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll(pub u8, pub u8);

impl DiceRoll {
    pub fn new(die1: u8, die2: u8) -> Self {
        debug_assert!((1..=6).contains(&die1) && (1..=6).contains(&die2));
        DiceRoll(die1, die2)
    }

    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        DiceRoll(rng.gen_range(1..=6), rng.gen_range(1..=6))
    }

    pub fn is_double(&self) -> bool {
        self.0 == self.1
    }

    /// (high, low)
    pub fn canonical(&self) -> (u8, u8) {
        if self.0 >= self.1 {
            (self.0, self.1)
        } else {
            (self.1, self.0)
        }
    }
}

impl Display for DiceRoll {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (high, low) = self.canonical();
        write!(f, "{}-{}", high, low)
    }
}

impl FromStr for DiceRoll {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (die1, die2) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Dice must look like '6-4', got '{}'", s))?;

        let die1: u8 = die1.parse()?;
        let die2: u8 = die2.parse()?;

        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(anyhow!("Dice must be between 1 and 6, got '{}'", s));
        }

        Ok(DiceRoll(die1, die2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_canonicalizes_order() {
        assert_eq!(DiceRoll(4, 6).to_string(), "6-4");
        assert_eq!(DiceRoll(6, 4).to_string(), "6-4");
    }

    #[test]
    fn test_format_doubles() {
        assert_eq!(DiceRoll(3, 3).to_string(), "3-3");
    }

    #[test]
    fn test_is_double() {
        assert!(DiceRoll(5, 5).is_double());
        assert!(!DiceRoll(5, 2).is_double());
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let roll = DiceRoll::roll(&mut rng);
            assert!((1..=6).contains(&roll.0));
            assert!((1..=6).contains(&roll.1));
        }
    }

    #[test]
    fn test_parse_round_trip() {
        let roll: DiceRoll = "6-4".parse().unwrap();
        assert_eq!(roll, DiceRoll(6, 4));
        assert_eq!(roll.to_string(), "6-4");

        assert!("7-1".parse::<DiceRoll>().is_err());
        assert!("64".parse::<DiceRoll>().is_err());
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&DiceRoll(6, 2)).unwrap();
        assert_eq!(json, "[6,2]");
        let roll: DiceRoll = serde_json::from_str(&json).unwrap();
        assert_eq!(roll, DiceRoll(6, 2));
    }
}
