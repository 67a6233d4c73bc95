//! The compressed path each node carries: the run of key bytes skipped
//! between a node and its parent thanks to path compression.
//!
//! Short paths live inline in the node (no extra allocation); paths longer
//! than a pointer width spill to the heap. The threshold matches the size of
//! the pointer-width field that would otherwise sit unused, the same trick
//! the container this is modeled on uses for its short-string optimization.

use std::mem::size_of;

const INLINE_CAP: usize = size_of::<usize>();

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Inline([u8; INLINE_CAP], u8),
    Heap(Box<[u8]>),
}

/// A compressed path of zero or more key bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Repr);

impl Path {
    pub fn empty() -> Self {
        Path(Repr::Inline([0; INLINE_CAP], 0))
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        if bytes.len() <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..bytes.len()].copy_from_slice(bytes);
            Path(Repr::Inline(buf, bytes.len() as u8))
        } else {
            Path(Repr::Heap(bytes.into()))
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.0 {
            Repr::Inline(buf, len) => &buf[..*len as usize],
            Repr::Heap(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes occupied on the heap by this path, 0 if it is stored inline.
    /// Used by `memsize` to account for out-of-line storage.
    pub fn heap_bytes(&self) -> usize {
        match &self.0 {
            Repr::Inline(..) => 0,
            Repr::Heap(b) => b.len(),
        }
    }

    /// Number of bytes that match between this path and `key`, bounded by
    /// both lengths.
    pub fn common_prefix_len(&self, key: &[u8]) -> usize {
        self.as_slice()
            .iter()
            .zip(key.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Drop the first `n` bytes, as happens when a path is split during
    /// insertion and a new intermediate node takes over the skipped prefix.
    pub fn drop_head(&self, n: usize) -> Path {
        Path::from_slice(&self.as_slice()[n..])
    }

    /// Build `prefix || byte || self`, as happens when a single-child node
    /// is merged into its parent during removal: `prefix` is the parent's
    /// own compressed path, `byte` is the key byte that used to dispatch to
    /// this path's owner, and `self` is that owner's own path.
    pub fn prepend(&self, byte: u8, prefix: &[u8]) -> Path {
        let mut out = Vec::with_capacity(prefix.len() + 1 + self.len());
        out.extend_from_slice(prefix);
        out.push(byte);
        out.extend_from_slice(self.as_slice());
        Path::from_slice(&out)
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::empty()
    }
}
