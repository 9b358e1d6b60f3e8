use crate::hierarchy::{NodeKey, NodeRef, OrgTree};
use crate::layout::PackedTree;
use crate::notion::RoleRecord;

/// Per laid-out node: does the filter pick it out. Only roles can match and
/// an empty query matches nothing.
pub(super) fn highlight_mask(tree: &OrgTree, layout: &PackedTree, query: &str) -> Vec<bool> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return vec![false; layout.nodes.len()];
    }

    layout
        .nodes
        .iter()
        .map(|node| match (node.key, tree.node(node.key)) {
            (NodeKey::Role { .. }, Some(NodeRef::Role(role))) => role_matches(&role.record, &query),
            _ => false,
        })
        .collect()
}

fn role_matches(role: &RoleRecord, query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(&role.name)
        || role.purpose.as_deref().is_some_and(contains)
        || role.responsibilities.as_deref().is_some_and(contains)
        || role
            .people
            .iter()
            .filter_map(|person| person.title.as_deref())
            .any(contains)
}
