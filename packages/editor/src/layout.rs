//! # Layout Codec
//!
//! Converts between the editor's nested sections and the server's flat
//! token list + section layout (see `gallery_common::wire`).
//!
//! Decoding is lenient: out-of-order section starts, whitespace positions
//! past the end of a section and duplicate tokens are clamped or dropped so
//! that every token lands in exactly one section.

use crate::model::{Collection, GalleryDraft, Section, StagedItem, DEFAULT_COLUMNS, MAX_COLUMNS};
use gallery_common::{
    CollectionRecord, GalleryRecord, IdGenerator, LayoutRecord, SectionLayoutRecord,
    TokenSettingsRecord,
};
use std::collections::HashSet;

/// A collection flattened into the server's storage shape
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCollection {
    pub tokens: Vec<String>,
    pub layout: LayoutRecord,
    pub token_settings: Vec<TokenSettingsRecord>,
}

pub fn encode_collection(collection: &Collection) -> EncodedCollection {
    let mut tokens = Vec::new();
    let mut layout = LayoutRecord::default();

    for section in &collection.sections {
        layout.sections.push(tokens.len() as u32);

        let mut whitespace = Vec::new();
        let mut preceding = 0u32;
        for item in &section.items {
            match item {
                StagedItem::Token { id } => {
                    tokens.push(id.clone());
                    preceding += 1;
                }
                StagedItem::Whitespace { .. } => whitespace.push(preceding),
            }
        }

        layout.section_layout.push(SectionLayoutRecord {
            columns: section.columns,
            whitespace,
        });
    }

    let token_settings = tokens
        .iter()
        .filter_map(|token_id| {
            let render_live = collection.live_display_token_ids.contains(token_id);
            let high_definition = collection.high_definition_token_ids.contains(token_id);
            (render_live || high_definition).then(|| TokenSettingsRecord {
                token_id: token_id.clone(),
                render_live,
                high_definition,
            })
        })
        .collect();

    EncodedCollection {
        tokens,
        layout,
        token_settings,
    }
}

pub fn decode_collection(record: &CollectionRecord, ids: &mut IdGenerator) -> Collection {
    let mut seen = HashSet::new();
    let tokens: Vec<&str> = record
        .tokens
        .iter()
        .map(|t| t.dbid.as_str())
        .filter(|id| {
            let fresh = seen.insert(*id);
            if !fresh {
                tracing::warn!(collection_id = %record.dbid, token_id = id, "dropping duplicate token");
            }
            fresh
        })
        .collect();

    let sections = match record.layout.as_ref().filter(|l| !l.sections.is_empty()) {
        Some(layout) => decode_sections(&record.dbid, &tokens, layout, ids),
        None => vec![Section {
            id: ids.next_id(),
            columns: DEFAULT_COLUMNS,
            items: tokens.iter().map(|t| StagedItem::token(*t)).collect(),
        }],
    };

    let mut live_display_token_ids = HashSet::new();
    let mut high_definition_token_ids = HashSet::new();
    for setting in &record.token_settings {
        if !seen.contains(setting.token_id.as_str()) {
            continue;
        }
        if setting.render_live {
            live_display_token_ids.insert(setting.token_id.clone());
        }
        if setting.high_definition {
            high_definition_token_ids.insert(setting.token_id.clone());
        }
    }

    Collection {
        id: record.dbid.clone(),
        name: record.name.clone().unwrap_or_default(),
        collectors_note: record.collectors_note.clone().unwrap_or_default(),
        hidden: record.hidden,
        local_only: false,
        sections,
        active_section_id: None,
        live_display_token_ids,
        high_definition_token_ids,
    }
}

fn decode_sections(collection_id: &str, tokens: &[&str], layout: &LayoutRecord, ids: &mut IdGenerator) -> Vec<Section> {
    let total = tokens.len();

    // First section always starts at 0 and starts never go backwards
    let mut starts = Vec::with_capacity(layout.sections.len());
    for (i, start) in layout.sections.iter().enumerate() {
        let floor = starts.last().copied().unwrap_or(0);
        let start = if i == 0 { 0 } else { (*start as usize).clamp(floor, total) };
        starts.push(start);
    }

    if layout.sections.first().copied().unwrap_or(0) != 0 {
        tracing::warn!(collection_id, "layout does not start at token 0; clamping");
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(total);
            let section_layout = layout.section_layout.get(i);

            let columns = section_layout
                .map(|l| l.columns)
                .filter(|c| (1..=MAX_COLUMNS).contains(c))
                .unwrap_or(DEFAULT_COLUMNS);

            let slice = &tokens[start..end];
            let mut whitespace: Vec<usize> = section_layout
                .map(|l| l.whitespace.iter().map(|w| (*w as usize).min(slice.len())).collect())
                .unwrap_or_default();
            whitespace.sort_unstable();

            let mut items = Vec::with_capacity(slice.len() + whitespace.len());
            let mut spacers = whitespace.into_iter().peekable();
            for position in 0..=slice.len() {
                while spacers.next_if(|w| *w == position).is_some() {
                    items.push(StagedItem::whitespace(ids.next_id()));
                }
                if let Some(token) = slice.get(position) {
                    items.push(StagedItem::token(*token));
                }
            }

            Section {
                id: ids.next_id(),
                columns,
                items,
            }
        })
        .collect()
}

pub fn decode_gallery(record: &GalleryRecord, ids: &mut IdGenerator) -> GalleryDraft {
    GalleryDraft {
        id: record.dbid.clone(),
        name: record.name.clone().unwrap_or_default(),
        description: record.description.clone().unwrap_or_default(),
        collections: record
            .collections
            .iter()
            .map(|c| decode_collection(c, ids))
            .collect(),
    }
}
