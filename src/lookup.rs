//! Shared read-only descent used by `get`, `contains_key`, `complete`, and
//! any operation that needs to find the subtree rooted at a given prefix.
//!
//! There is no separate "slot address" concept here: because children are
//! addressed purely through recursive borrows (see `node.rs`), a lookup is
//! just a loop comparing each node's compressed path against the remaining
//! key bytes and then stepping into a child keyed by the next byte.

use crate::node::Node;

/// Look up `key` starting from `node`, treating `node`'s own path as the
/// prefix already consumed on the way down to it.
pub fn get<'a, V>(node: &'a Node<V>, key: &[u8]) -> Option<&'a V> {
    let common = node.path.common_prefix_len(key);
    if common != node.path.len() {
        return None;
    }
    let rest = &key[common..];
    match rest.first() {
        None => node.as_leaf(),
        Some(&b) => get(node.seek_child(b)?, &rest[1..]),
    }
}

pub fn get_mut<'a, V>(node: &'a mut Node<V>, key: &[u8]) -> Option<&'a mut V> {
    let common = node.path.common_prefix_len(key);
    if common != node.path.len() {
        return None;
    }
    let rest = &key[common..];
    match rest.first() {
        None => node.as_leaf_mut(),
        Some(&b) => get_mut(node.seek_child_mut(b)?, &rest[1..]),
    }
}

/// Find the node rooting the subtree that holds exactly the keys starting
/// with `prefix`, if any.
///
/// Three ways this can resolve at a given node:
/// - `prefix` is fully consumed by (a prefix of) `node.path`: every key
///   under `node` starts with `prefix` by construction, so `node` itself is
///   the answer.
/// - `node.path` is fully consumed and `prefix` has bytes left over: step
///   into the child keyed by the next byte and recurse.
/// - neither path is a prefix of the other: no stored key can start with
///   `prefix`.
pub fn find_subtree_by_prefix<'a, V>(node: &'a Node<V>, prefix: &[u8]) -> Option<&'a Node<V>> {
    let common = node.path.common_prefix_len(prefix);
    if common == prefix.len() {
        return Some(node);
    }
    if common < node.path.len() {
        return None;
    }
    let rest = &prefix[common..];
    find_subtree_by_prefix(node.seek_child(rest[0])?, &rest[1..])
}

pub fn find_subtree_by_prefix_mut<'a, V>(
    node: &'a mut Node<V>,
    prefix: &[u8],
) -> Option<&'a mut Node<V>> {
    let common = node.path.common_prefix_len(prefix);
    if common == prefix.len() {
        return Some(node);
    }
    if common < node.path.len() {
        return None;
    }
    let rest = &prefix[common..];
    find_subtree_by_prefix_mut(node.seek_child_mut(rest[0])?, &rest[1..])
}

/// Like [`find_subtree_by_prefix`], but also reports how many bytes of
/// `prefix` were consumed by ancestors *before* the returned node's own
/// path — i.e. `prefix[..consumed]` is exactly the key bytes contributed by
/// everything above the returned node. Used by `fold`/`find` with a prefix
/// scope to seed the reconstructed-key buffer without double-counting the
/// node's own path, which the traversal walk adds itself.
pub fn find_subtree<'a, V>(node: &'a Node<V>, prefix: &[u8]) -> Option<(&'a Node<V>, usize)> {
    find_subtree_at(node, prefix, 0)
}

fn find_subtree_at<'a, V>(
    node: &'a Node<V>,
    prefix: &[u8],
    consumed: usize,
) -> Option<(&'a Node<V>, usize)> {
    let common = node.path.common_prefix_len(prefix);
    if common == prefix.len() {
        return Some((node, consumed));
    }
    if common < node.path.len() {
        return None;
    }
    let rest = &prefix[common..];
    find_subtree_at(node.seek_child(rest[0])?, &rest[1..], consumed + common + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Mode;
    use crate::path::Path;

    fn leaf<V>(path: &[u8], v: V) -> Box<Node<V>> {
        Box::new(Node::new_leaf(Path::from_slice(path), v))
    }

    #[test]
    fn get_walks_through_compressed_path_and_one_child() {
        let mut root = Node::new_n4(Path::from_slice(b"ab"), Mode::Ordered);
        root.add_child(b'c', leaf(b"", 42u32));
        assert_eq!(get(&root, b"abc"), Some(&42));
        assert_eq!(get(&root, b"abd"), None);
        assert_eq!(get(&root, b"xy"), None);
    }

    #[test]
    fn find_subtree_by_prefix_stops_inside_a_longer_path() {
        let root = Node::new_leaf(Path::from_slice(b"hello"), 1u32);
        assert!(find_subtree_by_prefix(&root, b"he").is_some());
        assert!(find_subtree_by_prefix(&root, b"hello").is_some());
        assert!(find_subtree_by_prefix(&root, b"help").is_none());
    }

    #[test]
    fn find_subtree_by_prefix_descends_into_children() {
        let mut root = Node::new_n4(Path::from_slice(b"a"), Mode::Ordered);
        root.add_child(b'b', leaf(b"c", 1u32));
        root.add_child(b'x', leaf(b"y", 2u32));
        let found = find_subtree_by_prefix(&root, b"ab").unwrap();
        assert_eq!(found.path.as_slice(), b"c");
        assert!(find_subtree_by_prefix(&root, b"az").is_none());
    }
}
