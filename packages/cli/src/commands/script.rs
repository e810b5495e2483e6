//! Edit scripts: a JSON array of mutations and drags replayed against a session.
//!
//! ```json
//! [
//!   { "type": "addSection", "collectionId": "c1" },
//!   { "drag": { "collectionId": "c1", "active": { "item": "t1" }, "over": [{ "section": "s2" }] } }
//! ]
//! ```

use anyhow::{Context, Result};
use colored::Colorize;
use gallery_editor::{DragNode, EditSession, Mutation, MutationOutcome, OverTarget};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Node {
    Section(String),
    Item(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStep {
    pub collection_id: String,
    pub active: Node,
    #[serde(default)]
    pub over: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Drag { drag: DragStep },
    Mutation(Mutation),
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid script {}", path.display()))
}

/// Apply every step in order; returns how many changed the draft
pub fn run_script(session: &mut EditSession, steps: Vec<ScriptStep>) -> usize {
    let mut applied = 0;

    for (index, step) in steps.into_iter().enumerate() {
        let (label, outcome) = match step {
            ScriptStep::Mutation(mutation) => {
                let label = mutation.name().to_string();
                (label, Some(session.apply(mutation)))
            }
            ScriptStep::Drag { drag } => ("drag".to_string(), run_drag(session, drag)),
        };

        match outcome {
            Some(MutationOutcome::Applied { version }) => {
                applied += 1;
                println!("  {} {:>3} {} (v{})", "✓".green(), index + 1, label, version);
            }
            Some(MutationOutcome::Noop { reason }) => {
                println!("  {} {:>3} {} skipped: {}", "·".yellow(), index + 1, label, reason);
            }
            None => {
                println!("  {} {:>3} {} changed nothing", "·".dimmed(), index + 1, label);
            }
        }
    }

    applied
}

fn run_drag(session: &mut EditSession, step: DragStep) -> Option<MutationOutcome> {
    let active = match step.active {
        Node::Section(id) => DragNode::Section(id),
        Node::Item(id) => DragNode::Item(id),
    };
    let collisions: Vec<OverTarget> = step
        .over
        .into_iter()
        .map(|node| match node {
            Node::Section(id) => OverTarget::Section(id),
            Node::Item(id) => OverTarget::Item(id),
        })
        .collect();

    let drag = session.begin_drag(&step.collection_id, active)?;
    session.finish_drag(&step.collection_id, drag, &collisions)
}
