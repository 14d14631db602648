use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Backgammon Position Generation Client")]
#[clap(about = "Generates training positions from recorded matches and oracle-driven self-play", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    SelfPlay(SelfPlayCommand),
    Replay(ReplayCommand),
}

#[derive(Args)]
pub struct SelfPlayCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Reconstructs decision-point positions from a parsed match archive.", long_about = None)]
pub struct ReplayCommand {
    #[clap(short, long)]
    pub input: String,

    #[clap(short, long)]
    pub output: Option<String>,
}
