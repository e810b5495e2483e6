use crate::output::print_gallery;
use anyhow::{Context, Result};
use clap::Args;
use gallery_common::GalleryRecord;
use gallery_editor::EditSession;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Gallery JSON as returned by `gallery fetch --out`
    pub file: PathBuf,

    /// Print the decoded draft as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let record = read_record(&args.file)?;
    let session = EditSession::new(&record);

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.draft())?);
    } else {
        print_gallery(session.draft());
    }

    Ok(())
}

pub fn read_record(path: &Path) -> Result<GalleryRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not a gallery record", path.display()))
}
