//! Terminal rendering of galleries and payloads

use colored::Colorize;
use gallery_editor::{GalleryDraft, StagedItem};

pub fn print_gallery(draft: &GalleryDraft) {
    let name = if draft.name.is_empty() { "(untitled)" } else { draft.name.as_str() };
    println!("{} {} ({})", "Gallery".bright_blue().bold(), name.bright_white(), draft.id.dimmed());
    if !draft.description.is_empty() {
        println!("  {}", draft.description);
    }

    for (index, collection) in draft.collections.iter().enumerate() {
        let mut flags = Vec::new();
        if collection.hidden {
            flags.push("hidden".yellow().to_string());
        }
        if collection.local_only {
            flags.push("new".green().to_string());
        }

        println!();
        println!(
            "  {}. {} ({}) {}",
            index + 1,
            collection.name.bold(),
            collection.id.dimmed(),
            flags.join(" ")
        );
        if !collection.collectors_note.is_empty() {
            println!("     {}", collection.collectors_note.italic());
        }

        for section in &collection.sections {
            let items: Vec<String> = section
                .items
                .iter()
                .map(|item| match item {
                    StagedItem::Token { id } => {
                        let mut label = id.clone();
                        if collection.live_display_token_ids.contains(id) {
                            label.push_str("*live");
                        }
                        if collection.high_definition_token_ids.contains(id) {
                            label.push_str("*hd");
                        }
                        label
                    }
                    StagedItem::Whitespace { .. } => "·".to_string(),
                })
                .collect();

            let marker = if collection.active_section_id.as_deref() == Some(section.id.as_str()) {
                "▸"
            } else {
                " "
            };
            println!(
                "    {} {} [{} col] {}",
                marker,
                section.id.dimmed(),
                section.columns,
                items.join(" ")
            );
        }
    }
}
