use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use log::debug;

use board::{BoardState, DiceRoll, Player};

use crate::wire::{OracleRequest, RankedPlay};
use crate::{MoveOracle, OracleError};

/// A move oracle reached over HTTP: the request is POSTed as JSON and the
/// reply is the ranked play list. Every call carries the client timeout so
/// a silent oracle cannot stall a batch forever.
pub struct HttpOracle {
    client: reqwest::Client,
    url: String,
}

impl HttpOracle {
    pub fn new(url: String, timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Http(e.to_string()))?;

        Ok(Self { client, url })
    }

    /// Readiness check for batch start: a connection-level failure means
    /// the oracle is down and the whole batch should fail before burning
    /// any turns. Any HTTP response at all counts as reachable.
    pub async fn probe(&self) -> Result<(), OracleError> {
        self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

impl MoveOracle for HttpOracle {
    type Future = BoxFuture<'static, Result<Vec<RankedPlay>, OracleError>>;

    fn rank_moves(
        &self,
        board: &BoardState,
        dice: DiceRoll,
        player: Player,
        max_plays: usize,
    ) -> Self::Future {
        let request = OracleRequest::new(board, dice, player, max_plays);
        let client = self.client.clone();
        let url = self.url.clone();

        async move {
            debug!("oracle request: player {} dice {}", request.player, request.dice);

            let response = client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| OracleError::Http(e.to_string()))?;

            if !response.status().is_success() {
                return Err(OracleError::Http(format!(
                    "oracle answered with status {}",
                    response.status()
                )));
            }

            let plays: Vec<RankedPlay> = response
                .json()
                .await
                .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

            Ok(plays)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_fails_when_nothing_listens() {
        // Reserved TEST-NET-1 address; nothing should answer.
        let oracle =
            HttpOracle::new("http://192.0.2.1:9/rank".to_string(), Duration::from_millis(200))
                .unwrap();

        assert!(matches!(
            oracle.probe().await,
            Err(OracleError::Unavailable(_))
        ));
    }
}
