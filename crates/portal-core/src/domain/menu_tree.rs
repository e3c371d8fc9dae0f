//! Depth-first operations over the menu forest.
//!
//! All searches are linear in the number of nodes and visit siblings in
//! their stored order, so the first match in pre-order wins.

use std::collections::HashSet;

use super::menu_node::{MenuNode, RouteMatch};
use crate::error::DomainError;

pub fn find_by_route<'a>(nodes: &'a [MenuNode], route: &str) -> Option<&'a MenuNode> {
    for node in nodes {
        if node.route.as_deref() == Some(route) {
            return Some(node);
        }
        if let Some(found) = find_by_route(&node.children, route) {
            return Some(found);
        }
    }
    None
}

pub fn find_by_id<'a>(nodes: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Ids on the root-to-target path, excluding the target itself.
/// `None` when the id is not in the tree.
pub fn ancestor_ids(nodes: &[MenuNode], id: &str) -> Option<Vec<String>> {
    fn walk(nodes: &[MenuNode], id: &str, path: &mut Vec<String>) -> bool {
        for node in nodes {
            if node.id == id {
                return true;
            }
            path.push(node.id.clone());
            if walk(&node.children, id, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    walk(nodes, id, &mut path).then_some(path)
}

/// Filtered copy of the forest for a search query.
///
/// A node survives when it matches or has a surviving descendant. Nodes kept
/// for their descendants show only those descendants; a node kept for its
/// own match keeps all of its children.
pub fn filter_nodes(nodes: &[MenuNode], query: &str) -> Vec<MenuNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return nodes.to_vec();
    }
    filter_with(nodes, &needle)
}

fn filter_with(nodes: &[MenuNode], needle: &str) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let children = filter_with(&node.children, needle);
            if !children.is_empty() {
                Some(MenuNode {
                    id: node.id.clone(),
                    title: node.title.clone(),
                    description: node.description.clone(),
                    icon: node.icon.clone(),
                    route: node.route.clone(),
                    children,
                })
            } else if node.matches_query(needle) {
                Some(node.clone())
            } else {
                None
            }
        })
        .collect()
}

/// Whether `path` is reachable through the menu, exact matches first.
pub fn authorize_route(nodes: &[MenuNode], path: &str) -> Option<RouteMatch> {
    if find_by_route(nodes, path).is_some() {
        return Some(RouteMatch::Exact);
    }
    find_descendant(nodes, path).then_some(RouteMatch::Descendant)
}

fn find_descendant(nodes: &[MenuNode], path: &str) -> bool {
    nodes.iter().any(|node| {
        node.route_match(path) == Some(RouteMatch::Descendant) || find_descendant(&node.children, path)
    })
}

/// Node that best covers `path`: the exact route match, otherwise the node
/// with the longest route that `path` descends from.
pub fn best_match_for_path<'a>(nodes: &'a [MenuNode], path: &str) -> Option<&'a MenuNode> {
    fn route_len(node: &MenuNode) -> usize {
        node.route.as_deref().map_or(0, str::len)
    }

    fn walk<'a>(nodes: &'a [MenuNode], path: &str, best: &mut Option<&'a MenuNode>) {
        for node in nodes {
            if node.route_match(path) == Some(RouteMatch::Descendant)
                && best.map_or(true, |b| route_len(b) < route_len(node))
            {
                *best = Some(node);
            }
            walk(&node.children, path, best);
        }
    }

    if let Some(exact) = find_by_route(nodes, path) {
        return Some(exact);
    }
    let mut best = None;
    walk(nodes, path, &mut best);
    best
}

/// Structural check of a converted tree: non-empty ids and titles.
pub fn check_well_formed(nodes: &[MenuNode]) -> Result<(), DomainError> {
    for node in nodes {
        if node.id.trim().is_empty() {
            return Err(DomainError::MalformedMenu("node with empty id".into()));
        }
        if node.title.trim().is_empty() {
            return Err(DomainError::MalformedMenu(format!("node {} has no title", node.id)));
        }
        check_well_formed(&node.children)?;
    }
    Ok(())
}

/// First id seen twice in pre-order. Id lookups resolve to the first
/// occurrence, so a repeat only affects sidebar state.
pub fn first_duplicate_id(nodes: &[MenuNode]) -> Option<&str> {
    fn walk<'a>(nodes: &'a [MenuNode], seen: &mut HashSet<&'a str>) -> Option<&'a str> {
        for node in nodes {
            if !seen.insert(node.id.as_str()) {
                return Some(node.id.as_str());
            }
            if let Some(id) = walk(&node.children, seen) {
                return Some(id);
            }
        }
        None
    }

    walk(nodes, &mut HashSet::new())
}

pub fn collect_ids(nodes: &[MenuNode]) -> HashSet<String> {
    fn walk(nodes: &[MenuNode], ids: &mut HashSet<String>) {
        for node in nodes {
            ids.insert(node.id.clone());
            walk(&node.children, ids);
        }
    }

    let mut ids = HashSet::new();
    walk(nodes, &mut ids);
    ids
}

pub fn count_nodes(nodes: &[MenuNode]) -> usize {
    nodes.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<MenuNode> {
        vec![
            MenuNode::new("1", "Home").with_route("/dashboard"),
            MenuNode::new("10", "Configuration").with_children(vec![
                MenuNode::new("2", "Users")
                    .with_route("/configuration/users")
                    .with_description("Accounts and photos"),
                MenuNode::new("3", "Roles").with_route("/configuration/roles"),
                MenuNode::new("20", "Audit").with_children(vec![
                    MenuNode::new("21", "Login history").with_route("/configuration/audit/logins"),
                ]),
            ]),
        ]
    }

    #[test]
    fn test_find_by_route_every_route_present() {
        let tree = sample_tree();
        for (route, id) in [
            ("/dashboard", "1"),
            ("/configuration/users", "2"),
            ("/configuration/roles", "3"),
            ("/configuration/audit/logins", "21"),
        ] {
            assert_eq!(find_by_route(&tree, route).map(|n| n.id.as_str()), Some(id));
        }
        assert!(find_by_route(&tree, "/reports").is_none());
    }

    #[test]
    fn test_find_by_id_nested() {
        let tree = sample_tree();
        assert_eq!(find_by_id(&tree, "21").map(|n| n.title.as_str()), Some("Login history"));
        assert!(find_by_id(&tree, "99").is_none());
    }

    #[test]
    fn test_ancestor_ids() {
        let tree = sample_tree();
        assert_eq!(ancestor_ids(&tree, "21"), Some(vec!["10".to_string(), "20".to_string()]));
        assert_eq!(ancestor_ids(&tree, "1"), Some(vec![]));
        assert_eq!(ancestor_ids(&tree, "missing"), None);
    }

    #[test]
    fn test_filter_keeps_ancestors_of_matches() {
        let tree = sample_tree();
        let filtered = filter_nodes(&tree, "LOGIN");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "10");
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].id, "20");
        assert_eq!(filtered[0].children[0].children[0].id, "21");
    }

    #[test]
    fn test_filter_matches_description() {
        let filtered = filter_nodes(&sample_tree(), "photos");
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].id, "2");
    }

    #[test]
    fn test_filter_self_match_keeps_all_children() {
        let filtered = filter_nodes(&sample_tree(), "configuration");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].children.len(), 3);
    }

    #[test]
    fn test_filter_empty_query_is_identity() {
        let tree = sample_tree();
        assert_eq!(filter_nodes(&tree, ""), tree);
        assert_eq!(filter_nodes(&tree, "   "), tree);
        assert!(filter_nodes(&tree, "nothing-matches").is_empty());
    }

    #[test]
    fn test_authorize_route() {
        let tree = sample_tree();
        assert_eq!(authorize_route(&tree, "/configuration/users"), Some(RouteMatch::Exact));
        assert_eq!(authorize_route(&tree, "/configuration/users/5"), Some(RouteMatch::Descendant));
        assert_eq!(
            authorize_route(&tree, "/configuration/audit/logins/2026/01"),
            Some(RouteMatch::Descendant)
        );
        assert_eq!(authorize_route(&tree, "/configuration"), None);
        assert_eq!(authorize_route(&tree, "/reports"), None);
    }

    #[test]
    fn test_best_match_prefers_longest_route() {
        let tree = vec![
            MenuNode::new("1", "Configuration").with_route("/configuration").with_children(vec![
                MenuNode::new("2", "Users").with_route("/configuration/users"),
            ]),
        ];
        let best = best_match_for_path(&tree, "/configuration/users/5/edit").unwrap();
        assert_eq!(best.id, "2");
        assert_eq!(best_match_for_path(&tree, "/configuration").unwrap().id, "1");
        assert!(best_match_for_path(&tree, "/reports").is_none());
    }

    #[test]
    fn test_check_well_formed() {
        assert!(check_well_formed(&sample_tree()).is_ok());

        let duplicate = vec![MenuNode::new("1", "A"), MenuNode::new("1", "B")];
        assert!(check_well_formed(&duplicate).is_ok());

        let untitled = vec![MenuNode::new("1", "A").with_children(vec![MenuNode::new("2", " ")])];
        assert!(check_well_formed(&untitled).is_err());
    }

    #[test]
    fn test_first_duplicate_id() {
        assert_eq!(first_duplicate_id(&sample_tree()), None);

        let nested = vec![MenuNode::new("1", "A").with_children(vec![MenuNode::new("1", "B")])];
        assert_eq!(first_duplicate_id(&nested), Some("1"));
    }

    #[test]
    fn test_counts_and_ids() {
        let tree = sample_tree();
        assert_eq!(count_nodes(&tree), 6);
        assert!(collect_ids(&tree).contains("21"));
    }
}
