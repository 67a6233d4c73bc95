//! Introspection: per-shape node counts (for tuning the [`crate::Mode`]
//! choice and watching fanout in practice) and `memsize`, the tree's current
//! in-memory footprint.

use std::collections::HashMap;

use crate::node::{Content, Node};

/// Aggregate counters for a single node shape (`N4`..`N256`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeStats {
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
}

/// Shape distribution and depth of a tree, as returned by
/// [`crate::tree::AdaptiveRadixTree::stats`].
#[derive(Debug, Default)]
pub struct TreeStats {
    pub node_stats: HashMap<&'static str, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub max_depth: usize,
}

pub fn collect_stats<V>(node: &Node<V>, stats: &mut TreeStats, depth: usize) {
    stats.max_depth = stats.max_depth.max(depth);
    match &node.content {
        Content::Leaf(_) => stats.num_leaves += 1,
        Content::Inner(inner) => {
            stats.num_inner_nodes += 1;
            let entry = stats.node_stats.entry(inner.shape_name()).or_default();
            entry.width = inner.capacity();
            entry.total_nodes += 1;
            entry.total_children += inner.num_children();
            for (_, child) in inner.iter() {
                collect_stats(child.as_ref(), stats, depth + 1);
            }
        }
    }
}

/// Sum of a per-node base cost, any heap-allocated path bytes, and
/// `payload_size(value)` for every stored value, if given.
pub fn memsize<V>(node: &Node<V>, payload_size: &Option<impl Fn(&V) -> usize>) -> usize {
    let mut total = std::mem::size_of::<Node<V>>() + node.path.heap_bytes();
    match &node.content {
        Content::Leaf(v) => {
            if let Some(f) = payload_size {
                total += f(v);
            }
        }
        Content::Inner(inner) => {
            for (_, child) in inner.iter() {
                total += memsize(child.as_ref(), payload_size);
            }
        }
    }
    total
}
