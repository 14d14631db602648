mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use common::{get_env_usize, ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use oracle::HttpOracle;
use replay::{replay_game, ParsedGame};
use self_play::{run_batch, PositionPersistance, SelfPlayOptions};
use std::fs::File;
use std::time::Duration;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut builder = tokio::runtime::Builder::new_multi_thread();

    builder.enable_all();

    if let Some(worker_threads) = get_env_usize("TOKIO_THREADS") {
        builder.worker_threads(worker_threads);
    }

    builder.build().unwrap().block_on(async_main())?;

    Ok(())
}

async fn async_main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::SelfPlay(self_play_args) => {
            let config_path = self_play_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "self_play".to_string())?;

            let self_play_options: SelfPlayOptions = config.load()?;

            let oracle_url = config
                .get("oracle_url")
                .and_then(|v| v.as_string())
                .ok_or_else(|| anyhow!("oracle_url must be set in the config"))?;
            let oracle_timeout_secs = config
                .get("oracle_timeout_secs")
                .and_then(|v| v.as_usize())
                .unwrap_or(30);
            let positions_dir = config.get_relative_path("positions_dir")?;

            let oracle = HttpOracle::new(
                oracle_url.clone(),
                Duration::from_secs(oracle_timeout_secs as u64),
            )?;

            // A batch against an unreachable oracle fails outright instead
            // of burning turns on per-call errors.
            oracle.probe().await?;
            info!("Oracle at {} is reachable", oracle_url);

            let mut persistance = PositionPersistance::new(positions_dir)?;

            let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<self_play::BatchProgress>(100);
            let progress_task = tokio::spawn(async move {
                while let Some(progress) = progress_rx.recv().await {
                    info!(
                        "Game {}/{} complete. Positions: {}, Duplicates: {}",
                        progress.games_completed,
                        progress.games_total,
                        progress.positions_stored,
                        progress.duplicates_skipped
                    );
                }
            });

            let result = run_batch(&oracle, &self_play_options, Some(progress_tx)).await;

            progress_task.await?;

            for error in &result.errors {
                warn!("{}", error);
            }

            let file_path = persistance.write(&result.positions)?;

            info!(
                "Batch complete: {} games, {} positions written to {:?}, {} duplicates skipped, {} recoverable errors",
                result.games_played,
                result.positions.len(),
                file_path,
                result.duplicates_skipped,
                result.errors.len()
            );
        }
        Commands::Replay(replay_args) => {
            let input_path = replay_args.input.relative_to_cwd()?;
            let file = File::open(&input_path)?;
            let games: Vec<ParsedGame> = serde_json::from_reader(file)?;

            let mut positions = Vec::new();
            let mut error_count = 0;

            for game in &games {
                let outcome = replay_game(game);

                for error in &outcome.errors {
                    warn!("{}", error);
                }

                error_count += outcome.errors.len();
                positions.extend(outcome.positions);
            }

            info!(
                "Replayed {} games into {} positions with {} recoverable errors",
                games.len(),
                positions.len(),
                error_count
            );

            match &replay_args.output {
                Some(output) => {
                    let output_path = output.relative_to_cwd()?;
                    serde_json::to_writer(&File::create(&output_path)?, &positions)?;
                    info!("Wrote positions to {:?}", output_path);
                }
                None => {
                    serde_json::to_writer_pretty(std::io::stdout(), &positions)?;
                }
            }
        }
    }

    Ok(())
}
