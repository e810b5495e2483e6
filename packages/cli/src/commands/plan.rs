use super::inspect::read_record;
use super::script::{load_script, run_script};
use crate::output::print_gallery;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use gallery_editor::EditSession;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Gallery JSON as returned by `gallery fetch --out`
    pub file: PathBuf,

    /// Edit script to replay
    #[arg(short, long)]
    pub script: PathBuf,

    /// Print the resulting gallery as well as the payload
    #[arg(long)]
    pub show: bool,
}

/// Replay a script offline and print the save payload it would produce
pub fn plan(args: PlanArgs) -> Result<()> {
    let record = read_record(&args.file)?;
    let steps = load_script(&args.script)?;
    let mut session = EditSession::new(&record);

    println!("{}", "Replaying edits".bright_blue().bold());
    let applied = run_script(&mut session, steps);
    println!();

    if args.show {
        print_gallery(session.draft());
        println!();
    }

    if !session.has_unsaved_changes() {
        println!("{} No unsaved changes ({} edits applied)", "✓".green(), applied);
        return Ok(());
    }

    println!("{}", "updateGallery input".bright_blue().bold());
    println!("{}", serde_json::to_string_pretty(&session.update_input())?);

    Ok(())
}
