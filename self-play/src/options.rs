use anyhow::Result;
use common::Config;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelfPlayOptions {
    /// Games to simulate in one batch.
    pub games: usize,
    /// Hard safety cap on turns per game; prevents runaway loops on oracle
    /// anomalies.
    pub max_turns_per_game: usize,
    /// Discard positions classified as OPENING; those are assumed already
    /// cataloged elsewhere.
    pub skip_opening: bool,
    /// Ranked plays to request from the oracle per turn.
    pub top_plays: usize,
}

impl Config for SelfPlayOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        Ok(Self {
            games: config.get("games").and_then(|v| v.as_usize()).unwrap_or(10),
            max_turns_per_game: config
                .get("max_turns_per_game")
                .and_then(|v| v.as_usize())
                .unwrap_or(500),
            skip_opening: config
                .get("skip_opening")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            top_plays: config
                .get("top_plays")
                .and_then(|v| v.as_usize())
                .unwrap_or(3),
        })
    }
}
