mod commands;
mod config;
mod feedback;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    fetch, init, inspect, move_collection, plan, publish, save, FetchArgs, InitArgs, InspectArgs,
    MoveArgs, PlanArgs, PublishArgs, SaveArgs,
};

/// Gallery CLI - edit, save and publish NFT galleries
#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a gallery.config.json
    Init(InitArgs),

    /// Summarize a gallery JSON file
    Inspect(InspectArgs),

    /// Replay an edit script offline and print the save payload
    Plan(PlanArgs),

    /// Fetch a gallery from the API
    Fetch(FetchArgs),

    /// Replay an edit script against the live gallery and save it
    Save(SaveArgs),

    /// Publish a gallery, saving pending edits first
    Publish(PublishArgs),

    /// Move a collection into another gallery
    Move(MoveArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match command {
        Command::Init(args) => init(args, &cwd),
        Command::Inspect(args) => inspect(args),
        Command::Plan(args) => plan(args),
        Command::Fetch(args) => fetch(args, &cwd).await,
        Command::Save(args) => save(args, &cwd).await,
        Command::Publish(args) => publish(args, &cwd).await,
        Command::Move(args) => move_collection(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
