//! The eight physical node shapes and the transitions between them.
//!
//! A [`Node<V>`] is either a `Leaf` holding a payload, or an `Inner` node
//! holding a child table in one of seven shapes (`N4` through `N256`). Every
//! node, leaf or inner, carries a compressed [`Path`] — see `path.rs` — so
//! that reconstructing a stored key is just walking from the root
//! concatenating `key_byte_used_to_reach_child || child.path` at each step.
//!
//! There is no `parent` back-pointer and no node-local "key" field: this
//! crate addresses children exclusively by recursive `&mut` borrow (the
//! byte used to reach a child is always available as a local in the
//! recursive call that looked it up), which is the idiomatic Rust
//! replacement for the original's explicit parent-pointer/slot-address
//! bookkeeping.

use crate::mapping::direct::DirectMapping;
use crate::mapping::indexed::IndexedMapping;
use crate::mapping::small::SmallMapping;
use crate::mapping::{Mode, NodeMapping};
use crate::path::Path;
use crate::utils::bitset::Bitset64;

pub type Child<V> = Box<Node<V>>;

/// The seven internal (non-leaf) shapes.
pub enum Inner<V> {
    N4(SmallMapping<Child<V>, 4>),
    N8(SmallMapping<Child<V>, 8>),
    N16(SmallMapping<Child<V>, 16>),
    N32(SmallMapping<Child<V>, 32>),
    N64(IndexedMapping<Child<V>, 64, Bitset64<1>>),
    N128(IndexedMapping<Child<V>, 128, Bitset64<2>>),
    N256(DirectMapping<Child<V>>),
}

pub enum Content<V> {
    Leaf(V),
    Inner(Inner<V>),
}

pub struct Node<V> {
    pub path: Path,
    pub content: Content<V>,
}

impl<V> Node<V> {
    pub fn new_leaf(path: Path, value: V) -> Self {
        Node {
            path,
            content: Content::Leaf(value),
        }
    }

    pub fn new_n4(path: Path, mode: Mode) -> Self {
        Node {
            path,
            content: Content::Inner(Inner::N4(SmallMapping::new(mode))),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&V> {
        match &self.content {
            Content::Leaf(v) => Some(v),
            Content::Inner(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut V> {
        match &mut self.content {
            Content::Leaf(v) => Some(v),
            Content::Inner(_) => None,
        }
    }

    pub fn into_leaf(self) -> Option<V> {
        match self.content {
            Content::Leaf(v) => Some(v),
            Content::Inner(_) => None,
        }
    }

    pub fn as_inner(&self) -> Option<&Inner<V>> {
        match &self.content {
            Content::Inner(i) => Some(i),
            Content::Leaf(_) => None,
        }
    }

    pub fn as_inner_mut(&mut self) -> Option<&mut Inner<V>> {
        match &mut self.content {
            Content::Inner(i) => Some(i),
            Content::Leaf(_) => None,
        }
    }

    pub fn num_children(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => 0,
            Content::Inner(i) => i.num_children(),
        }
    }

    pub fn seek_child(&self, key: u8) -> Option<&Node<V>> {
        match &self.content {
            Content::Leaf(_) => None,
            Content::Inner(i) => i.seek_child(key).map(|b| b.as_ref()),
        }
    }

    pub fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<V>> {
        match &mut self.content {
            Content::Leaf(_) => None,
            Content::Inner(i) => i.seek_child_mut(key).map(|b| b.as_mut()),
        }
    }

    pub fn delete_child(&mut self, key: u8) -> Option<Child<V>> {
        match &mut self.content {
            Content::Leaf(_) => None,
            Content::Inner(i) => i.delete_child(key),
        }
    }

    /// Grow this node's shape if it is at capacity, so that a subsequent
    /// `add_child` is guaranteed to succeed.
    pub fn ensure_capacity(&mut self, mode: Mode) {
        if let Content::Inner(inner) = &mut self.content {
            if inner.is_full() {
                let placeholder = Inner::N4(SmallMapping::new(mode));
                let grown = std::mem::replace(inner, placeholder).grow(mode);
                *inner = grown;
            }
        }
    }

    pub fn add_child(&mut self, key: u8, child: Child<V>) {
        match &mut self.content {
            Content::Leaf(_) => panic!("cannot add a child to a leaf"),
            Content::Inner(i) => i.add_child(key, child),
        }
    }

    /// Shrink this node's shape if its load has dropped to capacity/4 or
    /// below and it isn't already the smallest shape.
    pub fn maybe_shrink(&mut self, mode: Mode) {
        if let Content::Inner(inner) = &mut self.content {
            if let Some(shrunk) = inner.try_shrink(mode) {
                *inner = shrunk;
            }
        }
    }

    pub fn iter_children(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &Node<V>)> + '_> {
        match &self.content {
            Content::Leaf(_) => Box::new(std::iter::empty()),
            Content::Inner(i) => Box::new(i.iter().map(|(k, c)| (k, c.as_ref()))),
        }
    }
}

impl<V> Inner<V> {
    pub fn capacity(&self) -> usize {
        match self {
            Inner::N4(_) => 4,
            Inner::N8(_) => 8,
            Inner::N16(_) => 16,
            Inner::N32(_) => 32,
            Inner::N64(_) => 64,
            Inner::N128(_) => 128,
            Inner::N256(_) => 256,
        }
    }

    pub fn num_children(&self) -> usize {
        match self {
            Inner::N4(m) => m.num_children(),
            Inner::N8(m) => m.num_children(),
            Inner::N16(m) => m.num_children(),
            Inner::N32(m) => m.num_children(),
            Inner::N64(m) => m.num_children(),
            Inner::N128(m) => m.num_children(),
            Inner::N256(m) => m.num_children(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.num_children() >= self.capacity()
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            Inner::N4(_) => "N4",
            Inner::N8(_) => "N8",
            Inner::N16(_) => "N16",
            Inner::N32(_) => "N32",
            Inner::N64(_) => "N64",
            Inner::N128(_) => "N128",
            Inner::N256(_) => "N256",
        }
    }

    pub fn seek_child(&self, key: u8) -> Option<&Child<V>> {
        match self {
            Inner::N4(m) => m.seek_child(key),
            Inner::N8(m) => m.seek_child(key),
            Inner::N16(m) => m.seek_child(key),
            Inner::N32(m) => m.seek_child(key),
            Inner::N64(m) => m.seek_child(key),
            Inner::N128(m) => m.seek_child(key),
            Inner::N256(m) => m.seek_child(key),
        }
    }

    pub fn seek_child_mut(&mut self, key: u8) -> Option<&mut Child<V>> {
        match self {
            Inner::N4(m) => m.seek_child_mut(key),
            Inner::N8(m) => m.seek_child_mut(key),
            Inner::N16(m) => m.seek_child_mut(key),
            Inner::N32(m) => m.seek_child_mut(key),
            Inner::N64(m) => m.seek_child_mut(key),
            Inner::N128(m) => m.seek_child_mut(key),
            Inner::N256(m) => m.seek_child_mut(key),
        }
    }

    pub fn delete_child(&mut self, key: u8) -> Option<Child<V>> {
        match self {
            Inner::N4(m) => m.delete_child(key),
            Inner::N8(m) => m.delete_child(key),
            Inner::N16(m) => m.delete_child(key),
            Inner::N32(m) => m.delete_child(key),
            Inner::N64(m) => m.delete_child(key),
            Inner::N128(m) => m.delete_child(key),
            Inner::N256(m) => m.delete_child(key),
        }
    }

    pub fn add_child(&mut self, key: u8, child: Child<V>) {
        match self {
            Inner::N4(m) => m.add_child(key, child),
            Inner::N8(m) => m.add_child(key, child),
            Inner::N16(m) => m.add_child(key, child),
            Inner::N32(m) => m.add_child(key, child),
            Inner::N64(m) => m.add_child(key, child),
            Inner::N128(m) => m.add_child(key, child),
            Inner::N256(m) => m.add_child(key, child),
        }
    }

    pub fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &Child<V>)> + '_> {
        match self {
            Inner::N4(m) => m.iter(),
            Inner::N8(m) => m.iter(),
            Inner::N16(m) => m.iter(),
            Inner::N32(m) => m.iter(),
            Inner::N64(m) => m.iter(),
            Inner::N128(m) => m.iter(),
            Inner::N256(m) => m.iter(),
        }
    }

    /// The only child, if there is exactly one — used by the mutation
    /// engine to detect merge candidates.
    pub fn only_child_key(&self) -> Option<u8> {
        if self.num_children() != 1 {
            return None;
        }
        self.iter().next().map(|(k, _)| k)
    }

    /// Consumes every child, in no particular order. Used to tear down a
    /// subtree (`clear`, `remove_prefix`) without caring about shape.
    pub fn into_children(self) -> Vec<(u8, Child<V>)> {
        match self {
            Inner::N4(m) => m.drain_sorted(),
            Inner::N8(m) => m.drain_sorted(),
            Inner::N16(m) => m.drain_sorted(),
            Inner::N32(m) => m.drain_sorted(),
            Inner::N64(m) => m.drain(),
            Inner::N128(m) => m.drain(),
            Inner::N256(m) => m.drain(),
        }
    }

    /// Consumes this node's children (in ascending key order) and returns
    /// the next-larger shape holding the same entries.
    pub fn grow(self, mode: Mode) -> Inner<V> {
        match self {
            Inner::N4(m) => {
                let mut n = SmallMapping::<Child<V>, 8>::new(mode);
                for (k, c) in m.drain_sorted() {
                    n.add_child(k, c);
                }
                Inner::N8(n)
            }
            Inner::N8(m) => {
                let mut n = SmallMapping::<Child<V>, 16>::new(mode);
                for (k, c) in m.drain_sorted() {
                    n.add_child(k, c);
                }
                Inner::N16(n)
            }
            Inner::N16(m) => {
                let mut n = SmallMapping::<Child<V>, 32>::new(mode);
                for (k, c) in m.drain_sorted() {
                    n.add_child(k, c);
                }
                Inner::N32(n)
            }
            Inner::N32(m) => Inner::N64(IndexedMapping::from_pairs(m.drain_sorted())),
            Inner::N64(m) => Inner::N128(IndexedMapping::from_pairs(m.drain())),
            Inner::N128(m) => Inner::N256(DirectMapping::from_pairs(m.drain())),
            Inner::N256(_) => panic!("N256 cannot grow further"),
        }
    }

    /// If this node's load has dropped to capacity/4 or below (and it isn't
    /// already the smallest shape), returns the shrunk replacement.
    pub fn try_shrink(&mut self, mode: Mode) -> Option<Inner<V>> {
        let n = self.num_children();
        let threshold = self.capacity() / 4;
        let shrunk = match self {
            Inner::N4(_) => return None,
            Inner::N8(m) if n <= threshold => {
                let mut s = SmallMapping::<Child<V>, 4>::new(mode);
                for (k, c) in std::mem::replace(m, SmallMapping::new(mode)).drain_sorted() {
                    s.add_child(k, c);
                }
                Inner::N4(s)
            }
            Inner::N16(m) if n <= threshold => {
                let mut s = SmallMapping::<Child<V>, 8>::new(mode);
                for (k, c) in std::mem::replace(m, SmallMapping::new(mode)).drain_sorted() {
                    s.add_child(k, c);
                }
                Inner::N8(s)
            }
            Inner::N32(m) if n <= threshold => {
                let mut s = SmallMapping::<Child<V>, 16>::new(mode);
                for (k, c) in std::mem::replace(m, SmallMapping::new(mode)).drain_sorted() {
                    s.add_child(k, c);
                }
                Inner::N16(s)
            }
            Inner::N64(m) if n <= threshold => {
                let mut s = SmallMapping::<Child<V>, 32>::new(mode);
                for (k, c) in std::mem::replace(m, IndexedMapping::new()).drain() {
                    s.add_child(k, c);
                }
                Inner::N32(s)
            }
            Inner::N128(m) if n <= threshold => Inner::N64(IndexedMapping::from_pairs(
                std::mem::replace(m, IndexedMapping::new()).drain(),
            )),
            Inner::N256(m) if n <= threshold => Inner::N128(IndexedMapping::from_pairs(
                std::mem::replace(m, DirectMapping::new()).drain(),
            )),
            _ => return None,
        };
        Some(shrunk)
    }
}
