//! The leaf-ordered walk behind `find`/`fold` and their prefix-restricted,
//! reversed, and key-reconstructing variants.
//!
//! Physical child order inside a node is always ascending key order — see
//! `mapping::small`'s `iter`, which sorts even its `Unordered` storage on the
//! way out — so ascending/descending traversal is simply "iterate children
//! forwards" vs "iterate children backwards"; there is no separate physical-
//! order walk to support.
//!
//! Visits only leaves: this tree never stores a payload at an internal
//! node, so a generic pre/in/post-order callback would have nothing to pass
//! at the internal steps. (`stats.rs` walks every node, payload or not, for
//! `memsize` and shape counts, but doesn't need ordering for that.)

use std::ops::ControlFlow;

use crate::node::{Content, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// What a `find`/`fold` call ranges over.
pub enum Scope<'a> {
    All,
    Prefix(&'a [u8]),
}

/// The visitor's verdict on early termination: `Done(t)` is a positive stop
/// carrying a result, `Error(e)` is a negative stop that the caller
/// surfaces as [`crate::Error::Callback`].
pub enum FoldOutcome<T, E> {
    Done(T),
    Error(E),
}

/// Walk every leaf under `node` in `direction`, calling `visitor(key, value)`
/// for each. `key` is the reconstructed full key when `want_key` is set,
/// otherwise an empty slice. `key_buf` accumulates path bytes across the
/// recursion and is restored to its original length before returning,
/// including on early termination.
pub fn fold_leaves<'a, V, T, E>(
    node: &'a Node<V>,
    direction: Direction,
    want_key: bool,
    key_buf: &mut Vec<u8>,
    visitor: &mut impl FnMut(&[u8], &'a V) -> ControlFlow<FoldOutcome<T, E>>,
) -> ControlFlow<FoldOutcome<T, E>> {
    let before = key_buf.len();
    if want_key {
        key_buf.extend_from_slice(node.path.as_slice());
    }
    let result = (|| -> ControlFlow<FoldOutcome<T, E>> {
        match &node.content {
            Content::Leaf(v) => {
                let k: &[u8] = if want_key { key_buf.as_slice() } else { &[] };
                visitor(k, v)
            }
            Content::Inner(inner) => {
                let mut children: Vec<(u8, &'a Node<V>)> =
                    inner.iter().map(|(k, c)| (k, c.as_ref())).collect();
                if direction == Direction::Descending {
                    children.reverse();
                }
                for (b, child) in children {
                    if want_key {
                        key_buf.push(b);
                    }
                    let r = fold_leaves(child, direction, want_key, key_buf, visitor);
                    if want_key {
                        key_buf.pop();
                    }
                    if let ControlFlow::Break(outcome) = r {
                        return ControlFlow::Break(outcome);
                    }
                }
                ControlFlow::Continue(())
            }
        }
    })();
    if want_key {
        key_buf.truncate(before);
    }
    result
}

/// Walk every leaf under `node`, stopping at the first one for which `pred`
/// returns `true`, and returning its (optionally reconstructed) key and a
/// reference to its value.
pub fn find_leaf<'a, V>(
    node: &'a Node<V>,
    direction: Direction,
    want_key: bool,
    pred: &mut impl FnMut(&[u8], &V) -> bool,
) -> Option<(Box<[u8]>, &'a V)> {
    let mut key_buf = Vec::new();
    let mut found: Option<(Box<[u8]>, &'a V)> = None;
    let _ = fold_leaves::<V, (), ()>(node, direction, want_key, &mut key_buf, &mut |k, v| {
        if pred(k, v) {
            found = Some((k.to_vec().into_boxed_slice(), v));
            ControlFlow::Break(FoldOutcome::Done(()))
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}
