//! Flat section list -> nested outline.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::{FlatSection, SectionNode};

/// Rebuild the outline from flat sections.
///
/// A section whose parent is missing from `sections` becomes a root. Every
/// level is ordered by `order_index`; ties keep input order. Input order is
/// otherwise irrelevant.
pub fn build_section_tree(sections: &[FlatSection]) -> Vec<SectionNode> {
    let mut by_id: HashMap<Uuid, usize> = HashMap::with_capacity(sections.len());
    for (position, section) in sections.iter().enumerate() {
        by_id.insert(section.id, position);
    }

    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
    for (position, section) in sections.iter().enumerate() {
        // a duplicate id only contributes its last occurrence
        if by_id.get(&section.id) != Some(&position) {
            continue;
        }
        match section.parent_id.filter(|parent| by_id.contains_key(parent)) {
            Some(parent) => children.entry(parent).or_default().push(position),
            None => roots.push(position),
        }
    }

    let mut visited = HashSet::with_capacity(sections.len());
    assemble(sections, &roots, &children, &mut visited)
}

fn assemble(
    sections: &[FlatSection],
    level: &[usize],
    children: &HashMap<Uuid, Vec<usize>>,
    visited: &mut HashSet<Uuid>,
) -> Vec<SectionNode> {
    let mut ordered = level.to_vec();
    ordered.sort_by_key(|&position| sections[position].order_index);

    let mut nodes = Vec::with_capacity(ordered.len());
    for position in ordered {
        let section = &sections[position];
        if !visited.insert(section.id) {
            continue;
        }
        let nested = children
            .get(&section.id)
            .map(|below| assemble(sections, below, children, visited))
            .unwrap_or_default();
        nodes.push(SectionNode {
            id: section.id,
            title: section.title.clone(),
            depth: section.depth,
            children: nested,
        });
    }
    nodes
}
