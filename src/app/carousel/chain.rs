use eframe::egui::Color32;

use crate::layout::{NodeContent, NodeLayout, node_layout};
use crate::store::GraphStore;

use super::color::{
    DEFAULT_NODE_COLOR, FORCED_LIGHT_TEXT, parse_color, progressive_color, text_color_for,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum EntryKind {
    Current,
    Generic,
    /// Context above the chain; never a settle point.
    NonReachable,
}

impl EntryKind {
    pub(in crate::app) fn is_reachable(self) -> bool {
        !matches!(self, EntryKind::NonReachable)
    }
}

/// Negative levels are more generic, positive more specific.
#[derive(Clone, Debug)]
pub(in crate::app) struct ChainEntry {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub kind: EntryKind,
    pub color: Color32,
    pub text_color: Color32,
    pub has_thumbnail: bool,
    pub layout: NodeLayout,
}

/// The focused prototype's own chain wins; otherwise the store is scanned
/// in sorted-id order; otherwise the focused node stands alone.
pub(in crate::app) fn resolve_chain(
    store: &GraphStore,
    focused_id: &str,
    dimension: &str,
) -> Vec<ChainEntry> {
    let Some(focused) = store.get(focused_id) else {
        log::warn!("carousel opened on unknown prototype {focused_id:?}");
        return Vec::new();
    };

    let owned = focused
        .abstraction_chains
        .get(dimension)
        .filter(|chain| !chain.is_empty());

    let chain: Vec<String> = match owned {
        Some(chain) => chain.clone(),
        None => match find_containing_chain(store, focused_id, dimension) {
            Some(chain) => chain,
            None => vec![focused_id.to_owned()],
        },
    };

    let Some(focused_index) = chain.iter().position(|id| id == focused_id) else {
        log::error!(
            "prototype {focused_id:?} owns a {dimension:?} chain that does not contain it"
        );
        return Vec::new();
    };

    let base_color = parse_color(&focused.color).unwrap_or(DEFAULT_NODE_COLOR);

    let mut entries = Vec::with_capacity(chain.len() + 1);

    // Root sits one slot above the most generic member unless it is
    // already in the chain.
    if let Some(root_id) = &store.root_concept_id {
        if !chain.contains(root_id) {
            if let Some(root) = store.get(root_id) {
                let level = -(focused_index as i32) - 1;
                entries.push(make_entry(
                    root_id,
                    &root.name,
                    root.description.as_deref(),
                    root.has_thumbnail,
                    root.image_aspect_ratio,
                    level,
                    EntryKind::NonReachable,
                    base_color,
                ));
            }
        }
    }

    for (index, member_id) in chain.iter().enumerate() {
        let Some(member) = store.get(member_id) else {
            log::warn!("chain for {focused_id:?} references unknown prototype {member_id:?}");
            continue;
        };
        let level = index as i32 - focused_index as i32;
        let kind = if level == 0 {
            EntryKind::Current
        } else {
            EntryKind::Generic
        };
        entries.push(make_entry(
            member_id,
            &member.name,
            member.description.as_deref(),
            member.has_thumbnail,
            member.image_aspect_ratio,
            level,
            kind,
            base_color,
        ));
    }

    entries
}

fn find_containing_chain(
    store: &GraphStore,
    focused_id: &str,
    dimension: &str,
) -> Option<Vec<String>> {
    for owner_id in store.sorted_ids() {
        if owner_id == focused_id {
            continue;
        }
        let owner = store.get(owner_id)?;
        if let Some(chain) = owner.abstraction_chains.get(dimension) {
            if chain.iter().any(|id| id == focused_id) {
                return Some(chain.clone());
            }
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn make_entry(
    id: &str,
    name: &str,
    description: Option<&str>,
    has_thumbnail: bool,
    image_aspect_ratio: Option<f32>,
    level: i32,
    kind: EntryKind,
    base_color: Color32,
) -> ChainEntry {
    let color = progressive_color(base_color, level);
    let text_color = if level > 0 {
        FORCED_LIGHT_TEXT
    } else {
        text_color_for(color)
    };
    let layout = node_layout(
        &NodeContent {
            name,
            has_thumbnail,
            image_aspect_ratio: image_aspect_ratio.unwrap_or(0.0),
            description,
        },
        false,
    );

    ChainEntry {
        id: id.to_owned(),
        name: name.to_owned(),
        level,
        kind,
        color,
        text_color,
        has_thumbnail,
        layout,
    }
}

pub(in crate::app) fn reachable_levels(entries: &[ChainEntry]) -> Vec<i32> {
    let mut levels: Vec<i32> = entries
        .iter()
        .filter(|entry| entry.kind.is_reachable())
        .map(|entry| entry.level)
        .collect();
    levels.sort_unstable();
    levels
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::store::NodePrototype;

    use super::*;

    fn prototype(id: &str, chains: &[(&str, &[&str])]) -> NodePrototype {
        NodePrototype {
            id: id.to_owned(),
            name: id.to_owned(),
            color: "#8b0000".to_owned(),
            description: None,
            has_thumbnail: false,
            image_aspect_ratio: None,
            abstraction_chains: chains
                .iter()
                .map(|(dimension, members)| {
                    (
                        (*dimension).to_owned(),
                        members.iter().map(|id| (*id).to_owned()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn store_with(prototypes: Vec<NodePrototype>, root: Option<&str>) -> GraphStore {
        let map: HashMap<String, NodePrototype> = prototypes
            .into_iter()
            .map(|prototype| (prototype.id.clone(), prototype))
            .collect();
        GraphStore::new(map, root.map(str::to_owned))
    }

    fn levels_of(entries: &[ChainEntry]) -> Vec<(i32, &str)> {
        entries
            .iter()
            .map(|entry| (entry.level, entry.id.as_str()))
            .collect()
    }

    #[test]
    fn own_chain_centers_on_the_focused_node() {
        let store = store_with(
            vec![
                prototype("tool", &[]),
                prototype("hammer", &[("Physical", &["tool", "hammer", "claw"])]),
                prototype("claw", &[]),
            ],
            None,
        );

        let entries = resolve_chain(&store, "hammer", "Physical");
        assert_eq!(
            levels_of(&entries),
            [(-1, "tool"), (0, "hammer"), (1, "claw")]
        );
        assert!(entries.iter().all(|e| e.kind.is_reachable()));

        let current: Vec<_> = entries
            .iter()
            .filter(|e| e.kind == EntryKind::Current)
            .collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].level, 0);
    }

    #[test]
    fn falls_back_to_a_chain_that_contains_the_focused_node() {
        let store = store_with(
            vec![
                prototype("tool", &[]),
                prototype("hammer", &[("Physical", &["tool", "hammer", "claw"])]),
                prototype("claw", &[]),
            ],
            None,
        );

        let entries = resolve_chain(&store, "claw", "Physical");
        assert_eq!(
            levels_of(&entries),
            [(-2, "tool"), (-1, "hammer"), (0, "claw")]
        );
    }

    #[test]
    fn owner_scan_is_deterministic_in_sorted_id_order() {
        // Both "alpha" and "beta" own chains containing "x"; the sorted
        // scan must always pick alpha's.
        let store = store_with(
            vec![
                prototype("beta", &[("D", &["b1", "x"])]),
                prototype("alpha", &[("D", &["a1", "x"])]),
                prototype("a1", &[]),
                prototype("b1", &[]),
                prototype("x", &[]),
            ],
            None,
        );

        let entries = resolve_chain(&store, "x", "D");
        assert_eq!(levels_of(&entries), [(-1, "a1"), (0, "x")]);
    }

    #[test]
    fn no_chain_synthesizes_a_single_element_stack() {
        let store = store_with(vec![prototype("lonely", &[])], None);
        let entries = resolve_chain(&store, "lonely", "Physical");
        assert_eq!(levels_of(&entries), [(0, "lonely")]);
    }

    #[test]
    fn root_concept_is_prepended_as_non_reachable() {
        let store = store_with(
            vec![
                prototype("thing", &[]),
                prototype("tool", &[]),
                prototype("hammer", &[("Physical", &["tool", "hammer"])]),
            ],
            Some("thing"),
        );

        let entries = resolve_chain(&store, "hammer", "Physical");
        assert_eq!(
            levels_of(&entries),
            [(-2, "thing"), (-1, "tool"), (0, "hammer")]
        );
        assert_eq!(entries[0].kind, EntryKind::NonReachable);
        assert_eq!(reachable_levels(&entries), [-1, 0]);
    }

    #[test]
    fn root_already_in_chain_is_not_duplicated() {
        let store = store_with(
            vec![
                prototype("thing", &[]),
                prototype("hammer", &[("Physical", &["thing", "hammer"])]),
            ],
            Some("thing"),
        );

        let entries = resolve_chain(&store, "hammer", "Physical");
        assert_eq!(levels_of(&entries), [(-1, "thing"), (0, "hammer")]);
        assert!(entries.iter().all(|e| e.kind.is_reachable()));
    }

    #[test]
    fn unknown_chain_members_are_skipped() {
        let store = store_with(
            vec![prototype(
                "hammer",
                &[("Physical", &["ghost", "hammer", "claw"])],
            )],
            None,
        );

        let entries = resolve_chain(&store, "hammer", "Physical");
        assert_eq!(levels_of(&entries), [(0, "hammer")]);
    }

    #[test]
    fn resolving_twice_gives_identical_stacks() {
        let store = store_with(
            vec![
                prototype("tool", &[]),
                prototype("hammer", &[("Physical", &["tool", "hammer", "claw"])]),
                prototype("claw", &[]),
            ],
            None,
        );

        let first = resolve_chain(&store, "claw", "Physical");
        let second = resolve_chain(&store, "claw", "Physical");
        assert_eq!(levels_of(&first), levels_of(&second));
    }

    #[test]
    fn unknown_focused_id_yields_an_empty_stack() {
        let store = store_with(vec![prototype("a", &[])], None);
        assert!(resolve_chain(&store, "missing", "Physical").is_empty());
    }

    #[test]
    fn specific_levels_use_forced_light_text() {
        let store = store_with(
            vec![
                prototype("tool", &[]),
                prototype("hammer", &[("Physical", &["tool", "hammer", "claw"])]),
                prototype("claw", &[]),
            ],
            None,
        );

        let entries = resolve_chain(&store, "hammer", "Physical");
        let claw = entries.iter().find(|e| e.id == "claw").expect("claw");
        assert_eq!(claw.text_color, FORCED_LIGHT_TEXT);
    }
}
