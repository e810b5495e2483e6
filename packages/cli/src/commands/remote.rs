//! Commands that talk to the gallery API

use super::script::{load_script, run_script};
use crate::config::{process_env, Config};
use crate::feedback::CliNotifier;
use crate::output::print_gallery;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use gallery_common::GalleryApi;
use gallery_editor::{EditSession, TracingReporter};
use gallery_sync::GraphqlClient;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Gallery to operate on (defaults to `galleryId` from the config)
    #[arg(short, long)]
    pub gallery: Option<String>,

    /// GraphQL endpoint (overrides GALLERY_API_URL and the config)
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Write the raw gallery JSON here instead of printing a summary
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Edit script to replay before saving
    #[arg(short, long)]
    pub script: PathBuf,
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Caption for the feed event
    #[arg(short, long)]
    pub caption: Option<String>,

    /// Edit script to replay (and save) before publishing
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Collection to move
    pub collection: String,

    /// Destination gallery
    #[arg(long)]
    pub to: String,
}

struct Remote {
    client: GraphqlClient,
    gallery_id: String,
}

fn connect(connection: &ConnectionArgs, cwd: &str) -> Result<Remote> {
    let config = Config::load(cwd)?;
    let endpoint = config.endpoint(connection.endpoint.as_deref(), process_env);
    let gallery_id = config.gallery_id(connection.gallery.as_deref())?;

    let mut client = GraphqlClient::new(endpoint)?;
    match config.auth_token(process_env) {
        Some(token) => client = client.with_auth_token(token),
        None => tracing::warn!(env = %config.auth_token_env, "no auth token set"),
    }

    tracing::info!(endpoint = client.endpoint(), gallery_id = %gallery_id, "connecting");
    Ok(Remote { client, gallery_id })
}

async fn open_session(remote: &Remote) -> Result<EditSession> {
    let session = EditSession::load(&remote.client, &remote.gallery_id).await?;
    Ok(session.with_feedback(Arc::new(TracingReporter), Arc::new(CliNotifier)))
}

pub async fn fetch(args: FetchArgs, cwd: &str) -> Result<()> {
    let remote = connect(&args.connection, cwd)?;

    match args.out {
        Some(path) => {
            let record = remote.client.fetch_gallery(&remote.gallery_id).await?;
            std::fs::write(&path, serde_json::to_string_pretty(&record)?)?;
            println!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => {
            let session = open_session(&remote).await?;
            print_gallery(session.draft());
        }
    }

    Ok(())
}

pub async fn save(args: SaveArgs, cwd: &str) -> Result<()> {
    let remote = connect(&args.connection, cwd)?;
    let steps = load_script(&args.script)?;
    let mut session = open_session(&remote).await?;

    run_script(&mut session, steps);

    if !session.has_unsaved_changes() {
        println!("{} Nothing to save", "✓".green());
        return Ok(());
    }

    // Failures were already reported by the session
    if session.save(&remote.client).await.is_err() {
        bail!("Save failed");
    }

    println!("{} Saved {}", "✓".green(), remote.gallery_id.bright_white());
    print_gallery(session.draft());
    Ok(())
}

pub async fn publish(args: PublishArgs, cwd: &str) -> Result<()> {
    let remote = connect(&args.connection, cwd)?;
    let mut session = open_session(&remote).await?;

    if let Some(script) = &args.script {
        run_script(&mut session, load_script(script)?);
    }

    if session.publish(&remote.client, args.caption).await.is_err() {
        bail!("Publish failed");
    }

    println!("{} Published {}", "✓".green(), remote.gallery_id.bright_white());
    Ok(())
}

pub async fn move_collection(args: MoveArgs, cwd: &str) -> Result<()> {
    let remote = connect(&args.connection, cwd)?;
    let mut session = open_session(&remote).await?;

    let outcome = match session
        .move_collection_to_gallery(&remote.client, &args.collection, &args.to)
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => bail!("Move failed"),
    };

    if outcome.saved_first {
        println!("{} Saved pending changes", "✓".green());
    }
    println!(
        "{} Moved {} to {}",
        "✓".green(),
        outcome.collection_id.bright_white(),
        args.to.bright_white()
    );
    Ok(())
}
