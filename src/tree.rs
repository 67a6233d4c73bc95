//! [`AdaptiveRadixTree`]: the public container wiring together the node
//! representation, the lookup/mutation/traversal engines, and the external
//! [`Key`] view.

use std::ops::ControlFlow;

use crate::error::Error;
use crate::key::Key;
use crate::lookup;
use crate::mapping::Mode;
use crate::mutation;
use crate::node::{Child, Node};
use crate::traversal::{self, Direction, FoldOutcome, Scope};

/// A borrow-scoped reference to a stored leaf, returned by `find`/`find_prefix`.
///
/// Unlike the raw, pointer-stable leaf handles the container this is
/// modeled on hands out, this handle's lifetime is tied to the `&self`
/// borrow that produced it: it cannot outlive a subsequent mutation, and
/// there is no way to "re-validate" it later. That's a deliberate trade —
/// see `DESIGN.md` — in exchange for never risking a dangling handle after
/// a structural change (split, merge, shape transition) invalidates the
/// node it pointed into.
pub struct LeafHandle<'a, V> {
    key: Box<[u8]>,
    value: &'a V,
}

impl<'a, V> LeafHandle<'a, V> {
    /// The matched value.
    pub fn value(&self) -> &'a V {
        self.value
    }

    /// The full key this leaf was stored under, if the call that produced
    /// this handle asked for key reconstruction; empty otherwise.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Owned copy of [`Self::key`], for passing to `remove` once the
    /// borrow that produced this handle has ended.
    pub fn reconstruct_key(&self) -> Box<[u8]> {
        self.key.clone()
    }
}

/// An Adaptive Radix Tree mapping byte-string keys to values of type `V`.
///
/// See the crate documentation for the node-shape and path-compression
/// design this implements.
pub struct AdaptiveRadixTree<V> {
    root: Option<Child<V>>,
    mode: Mode,
    len: usize,
}

impl<V> AdaptiveRadixTree<V> {
    /// Create an empty tree. `mode` controls whether the N8/N16/N32 node
    /// shapes keep their children physically sorted (`Mode::Ordered`) or
    /// append-and-swap-remove (`Mode::Unordered`) — see `mapping::Mode`.
    pub fn new(mode: Mode) -> Self {
        AdaptiveRadixTree {
            root: None,
            mode,
            len: 0,
        }
    }

    /// Number of entries stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` at `key`, overwriting and returning any previous
    /// value stored there.
    pub fn insert<'k>(&mut self, key: impl Into<Key<'k>>, value: V) -> Result<Option<V>, Error> {
        let key = key.into();
        let bytes = key.effective_bytes()?;
        match &mut self.root {
            None => {
                self.root = Some(Box::new(Node::new_leaf(
                    crate::path::Path::from_slice(&bytes),
                    value,
                )));
                self.len += 1;
                Ok(None)
            }
            Some(root) => {
                let prev = mutation::insert(root, &bytes, value, self.mode, true)?;
                if prev.is_none() {
                    self.len += 1;
                }
                Ok(prev)
            }
        }
    }

    /// Insert `value` at `key`, refusing (with [`Error::Exists`]) if the key
    /// is already present.
    pub fn insert_new<'k>(&mut self, key: impl Into<Key<'k>>, value: V) -> Result<(), Error> {
        let key = key.into();
        let bytes = key.effective_bytes()?;
        match &mut self.root {
            None => {
                self.root = Some(Box::new(Node::new_leaf(
                    crate::path::Path::from_slice(&bytes),
                    value,
                )));
                self.len += 1;
                Ok(())
            }
            Some(root) => {
                mutation::insert(root, &bytes, value, self.mode, false)?;
                self.len += 1;
                Ok(())
            }
        }
    }

    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Result<Option<&V>, Error> {
        let bytes = key.into().effective_bytes()?;
        Ok(self.root.as_deref().and_then(|r| lookup::get(r, &bytes)))
    }

    pub fn get_mut<'k>(&mut self, key: impl Into<Key<'k>>) -> Result<Option<&mut V>, Error> {
        let bytes = key.into().effective_bytes()?;
        Ok(self
            .root
            .as_deref_mut()
            .and_then(|r| lookup::get_mut(r, &bytes)))
    }

    pub fn contains_key<'k>(&self, key: impl Into<Key<'k>>) -> Result<bool, Error> {
        Ok(self.get(key)?.is_some())
    }

    /// Remove the entry at `key`, returning its value.
    pub fn remove<'k>(&mut self, key: impl Into<Key<'k>>) -> Result<V, Error> {
        let bytes = key.into().effective_bytes()?;
        let value = mutation::remove(&mut self.root, &bytes, self.mode)?;
        self.len -= 1;
        Ok(value)
    }

    /// Remove every key starting with the raw byte string `prefix`,
    /// invoking `on_remove` with each discarded value. Returns the number
    /// removed. Unlike [`AdaptiveRadixTree::insert`]/`get`/`remove`,
    /// `prefix` is matched as-is — it isn't a [`Key`] and gets no implicit
    /// trailing NUL, since a prefix search must see the raw bytes shared by
    /// every key in its scope.
    pub fn remove_prefix(
        &mut self,
        prefix: &[u8],
        mut on_remove: impl FnMut(V),
    ) -> Result<usize, Error> {
        let n = mutation::remove_prefix(&mut self.root, prefix, self.mode, &mut on_remove)?;
        self.len -= n;
        Ok(n)
    }

    /// Remove every entry, invoking `on_remove` (if given) with each value.
    pub fn clear(&mut self, on_remove: Option<impl FnMut(V)>) {
        if let Some(root) = self.root.take() {
            match on_remove {
                Some(mut f) => mutation::destroy_subtree(root, &mut f),
                None => mutation::destroy_subtree(root, &mut |_| {}),
            }
        }
        self.len = 0;
    }

    /// The shortest byte string that, appended to `prefix` (or to the empty
    /// string if `prefix` is `None`), still leaves every currently-stored
    /// key matching as a prefix — i.e. how far a caller could extend
    /// `prefix` before the first point at which stored keys diverge.
    /// [`Error::Empty`] on an empty tree, [`Error::NotFound`] if no stored
    /// key starts with `prefix`.
    pub fn complete(&self, prefix: Option<&[u8]>) -> Result<Box<[u8]>, Error> {
        let root = self.root.as_deref().ok_or(Error::Empty)?;
        let prefix = prefix.unwrap_or(&[]);
        let (node, consumed) = lookup::find_subtree(root, prefix).ok_or(Error::NotFound)?;
        let matched_in_node = prefix.len() - consumed;
        let mut out: Vec<u8> = node.path.as_slice()[matched_in_node..].to_vec();
        let mut cur = node;
        while let Some(inner) = cur.as_inner() {
            if inner.num_children() != 1 {
                break;
            }
            let (b, child) = inner.iter().next().unwrap();
            out.push(b);
            out.extend_from_slice(child.path.as_slice());
            cur = child;
        }
        Ok(out.into_boxed_slice())
    }

    /// Number of bytes the tree currently occupies: a per-node base cost
    /// plus any heap-allocated path bytes, plus `payload_size(value)` for
    /// every stored value if given.
    pub fn memsize(&self, payload_size: Option<impl Fn(&V) -> usize>) -> usize {
        match &self.root {
            None => 0,
            Some(root) => crate::stats::memsize(root, &payload_size),
        }
    }

    /// Shape-distribution and depth statistics, for introspection and
    /// tuning (see `stats.rs`).
    pub fn stats(&self) -> crate::stats::TreeStats {
        let mut stats = crate::stats::TreeStats::default();
        if let Some(root) = &self.root {
            crate::stats::collect_stats(root, &mut stats, 0);
        }
        stats
    }

    /// Walk stored entries (optionally restricted to `scope`, in `direction`,
    /// optionally reconstructing keys), stopping at the first one for which
    /// `pred` returns `true`.
    pub fn find<'t>(
        &'t self,
        scope: Scope<'_>,
        direction: Direction,
        want_key: bool,
        mut pred: impl FnMut(&[u8], &V) -> bool,
    ) -> Result<Option<LeafHandle<'t, V>>, Error> {
        let Some(root) = self.root.as_deref() else {
            return Ok(None);
        };
        let (node, seed): (&'t Node<V>, Vec<u8>) = match scope {
            Scope::All => (root, Vec::new()),
            Scope::Prefix(p) => match lookup::find_subtree(root, p) {
                None => return Err(Error::NotFound),
                Some((node, consumed)) => {
                    let seed = if want_key {
                        p[..consumed].to_vec()
                    } else {
                        Vec::new()
                    };
                    (node, seed)
                }
            },
        };
        let mut key_buf = seed;
        let mut found: Option<LeafHandle<'t, V>> = None;
        let _ = traversal::fold_leaves::<V, (), ()>(
            node,
            direction,
            want_key,
            &mut key_buf,
            &mut |k, v| {
                if pred(k, v) {
                    found = Some(LeafHandle {
                        key: k.to_vec().into_boxed_slice(),
                        value: v,
                    });
                    ControlFlow::Break(FoldOutcome::Done(()))
                } else {
                    ControlFlow::Continue(())
                }
            },
        );
        Ok(found)
    }

    /// [`AdaptiveRadixTree::find`] restricted to keys starting with `prefix`.
    pub fn find_prefix<'t>(
        &'t self,
        prefix: &[u8],
        direction: Direction,
        want_key: bool,
        pred: impl FnMut(&[u8], &V) -> bool,
    ) -> Result<Option<LeafHandle<'t, V>>, Error> {
        self.find(Scope::Prefix(prefix), direction, want_key, pred)
    }

    /// Walk stored entries (optionally restricted to `scope`, in
    /// `direction`, optionally reconstructing keys), invoking `visitor` on
    /// each. `ControlFlow::Break(FoldOutcome::Done(t))` stops the walk early
    /// and yields `Ok(Some(t))`; `ControlFlow::Break(FoldOutcome::Error(_))`
    /// stops the walk and yields [`Error::Callback`]; running to completion
    /// yields `Ok(None)`.
    pub fn fold<T, E>(
        &self,
        scope: Scope<'_>,
        direction: Direction,
        want_key: bool,
        mut visitor: impl FnMut(&[u8], &V) -> ControlFlow<FoldOutcome<T, E>>,
    ) -> Result<Option<T>, Error> {
        let Some(root) = self.root.as_deref() else {
            return Ok(None);
        };
        let (node, seed) = match scope {
            Scope::All => (root, Vec::new()),
            Scope::Prefix(p) => match lookup::find_subtree(root, p) {
                None => return Err(Error::NotFound),
                Some((node, consumed)) => {
                    let seed = if want_key {
                        p[..consumed].to_vec()
                    } else {
                        Vec::new()
                    };
                    (node, seed)
                }
            },
        };
        let mut key_buf = seed;
        let outcome =
            traversal::fold_leaves(node, direction, want_key, &mut key_buf, &mut visitor);
        match outcome {
            ControlFlow::Continue(()) => Ok(None),
            ControlFlow::Break(FoldOutcome::Done(t)) => Ok(Some(t)),
            ControlFlow::Break(FoldOutcome::Error(_)) => Err(Error::Callback),
        }
    }

    /// [`AdaptiveRadixTree::fold`] restricted to keys starting with `prefix`.
    pub fn fold_prefix<T, E>(
        &self,
        prefix: &[u8],
        direction: Direction,
        want_key: bool,
        visitor: impl FnMut(&[u8], &V) -> ControlFlow<FoldOutcome<T, E>>,
    ) -> Result<Option<T>, Error> {
        self.fold(Scope::Prefix(prefix), direction, want_key, visitor)
    }
}

impl<V> Default for AdaptiveRadixTree<V> {
    fn default() -> Self {
        AdaptiveRadixTree::new(Mode::Ordered)
    }
}
