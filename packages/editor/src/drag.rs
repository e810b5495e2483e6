//! # Drag Session Coordinator
//!
//! Turns begin/over/end events from whatever drag-and-drop layer the UI uses
//! into a previewed, then committed, section list. Geometry stays outside:
//! the UI reports which nodes the pointer collides with and this module
//! decides what that means.
//!
//! ```text
//! begin(Item t2)          over([Item t4, Section s2])       end(..)
//!   committed ──┐           target = Item t4 (most specific)   Commit(preview)
//!               └─ preview = arrange(committed, t2 → before t4)  or Unchanged
//! ```
//!
//! Each `over` recomputes the preview from the committed layout, so the last
//! event always wins and nothing accumulates between events.

use crate::model::Section;
use crate::mutations::Mutation;

/// Node picked up by the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragNode {
    Section(String),
    Item(String),
}

/// Node the pointer currently collides with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverTarget {
    Section(String),
    Item(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The layout changed; hand these sections to the store
    Commit(Vec<Section>),
    /// Cancelled, dropped outside, or dropped back where it started
    Unchanged,
}

impl DropOutcome {
    pub fn into_mutation(self, collection_id: impl Into<String>) -> Option<Mutation> {
        match self {
            DropOutcome::Commit(sections) => Some(Mutation::ReplaceSections {
                collection_id: collection_id.into(),
                sections,
            }),
            DropOutcome::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    active: DragNode,
    committed: Vec<Section>,
    preview: Vec<Section>,
    target: Option<OverTarget>,
}

impl DragSession {
    /// Start dragging `active`; `None` when it is not part of `sections`
    pub fn begin(sections: &[Section], active: DragNode) -> Option<Self> {
        let known = match &active {
            DragNode::Section(id) => sections.iter().any(|s| &s.id == id),
            DragNode::Item(id) => find_item(sections, id).is_some(),
        };

        if !known {
            tracing::debug!(?active, "drag started on unknown node");
            return None;
        }

        Some(Self {
            active,
            committed: sections.to_vec(),
            preview: sections.to_vec(),
            target: None,
        })
    }

    pub fn active(&self) -> &DragNode {
        &self.active
    }

    /// Layout to render while the drag is in progress
    pub fn preview(&self) -> &[Section] {
        &self.preview
    }

    pub fn target(&self) -> Option<&OverTarget> {
        self.target.as_ref()
    }

    /// Section the dragged node currently sits in within the preview
    pub fn current_container(&self) -> Option<&str> {
        match &self.active {
            DragNode::Section(id) => Some(id.as_str()),
            DragNode::Item(id) => find_item(&self.preview, id).map(|(s, _)| self.preview[s].id.as_str()),
        }
    }

    /// Pointer moved over `collisions`; replaces the previous preview
    pub fn over(&mut self, collisions: &[OverTarget]) {
        self.target = resolve_target(collisions);
        self.preview = arrange(&self.committed, &self.active, self.target.as_ref());
    }

    /// Pointer released over `collisions`
    pub fn end(self, collisions: &[OverTarget]) -> DropOutcome {
        let target = resolve_target(collisions);
        let arranged = arrange(&self.committed, &self.active, target.as_ref());

        if arranged == self.committed {
            DropOutcome::Unchanged
        } else {
            DropOutcome::Commit(arranged)
        }
    }

    /// Abandon the drag and get the committed layout back
    pub fn cancel(self) -> Vec<Section> {
        self.committed
    }
}

/// Pick the drop target among the reported collisions.
///
/// An item-level collision is more specific than the section containing it,
/// so the first item wins; a section is only used when no item collides.
pub fn resolve_target(collisions: &[OverTarget]) -> Option<OverTarget> {
    collisions
        .iter()
        .find(|t| matches!(t, OverTarget::Item(_)))
        .or_else(|| collisions.first())
        .cloned()
}

/// Layout produced by dropping `active` on `target`
pub fn arrange(sections: &[Section], active: &DragNode, target: Option<&OverTarget>) -> Vec<Section> {
    let Some(target) = target else {
        return sections.to_vec();
    };

    match active {
        DragNode::Section(id) => move_section(sections, id, target),
        DragNode::Item(id) => move_item(sections, id, target),
    }
}

fn move_section(sections: &[Section], section_id: &str, target: &OverTarget) -> Vec<Section> {
    let mut result = sections.to_vec();

    let Some(from) = sections.iter().position(|s| s.id == section_id) else {
        return result;
    };
    // Sections only reorder at the top level; an item target stands for its section
    let Some(to) = container_index(sections, target) else {
        return result;
    };

    if from != to {
        let moved = result.remove(from);
        result.insert(to, moved);
    }
    result
}

fn move_item(sections: &[Section], item_id: &str, target: &OverTarget) -> Vec<Section> {
    let mut result = sections.to_vec();

    let Some((from_section, from_index)) = find_item(sections, item_id) else {
        return result;
    };

    match target {
        OverTarget::Item(over_id) if over_id == item_id => result,

        OverTarget::Item(over_id) => {
            let Some((to_section, to_index)) = find_item(sections, over_id) else {
                return result;
            };

            let moved = result[from_section].items.remove(from_index);
            // Same container: land at the hovered index. Other container: take
            // the hovered item's slot and push it down.
            result[to_section].items.insert(to_index, moved);
            result
        }

        OverTarget::Section(section_id) => {
            let Some(to_section) = sections.iter().position(|s| &s.id == section_id) else {
                return result;
            };

            if to_section == from_section {
                return result;
            }

            let moved = result[from_section].items.remove(from_index);
            result[to_section].items.push(moved);
            result
        }
    }
}

fn container_index(sections: &[Section], target: &OverTarget) -> Option<usize> {
    match target {
        OverTarget::Section(id) => sections.iter().position(|s| &s.id == id),
        OverTarget::Item(id) => find_item(sections, id).map(|(s, _)| s),
    }
}

fn find_item(sections: &[Section], item_id: &str) -> Option<(usize, usize)> {
    sections
        .iter()
        .enumerate()
        .find_map(|(s, section)| section.position_of(item_id).map(|i| (s, i)))
}
