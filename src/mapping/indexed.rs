//! The mapping family backing the N64/N128 node shapes: a 256-entry byte
//! lookup table pointing into a packed, bitset-tracked child array.
//!
//! Unlike the small shapes, lookups here never scan: `index[key]` gives the
//! child's slot directly (or the `0xFF` sentinel for "no such child"),
//! trading a little more memory for O(1) dispatch once a node holds enough
//! children that scanning the key bytes directly stops paying off.

use crate::mapping::NodeMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::BitsetTrait;

const EMPTY: u8 = 0xFF;

pub struct IndexedMapping<N, const WIDTH: usize, B: BitsetTrait> {
    index: [u8; 256],
    children: BitArray<N, WIDTH, B>,
}

impl<N, const WIDTH: usize, B: BitsetTrait> IndexedMapping<N, WIDTH, B> {
    pub fn new() -> Self {
        assert!(WIDTH < EMPTY as usize, "WIDTH must fit below the empty sentinel");
        IndexedMapping {
            index: [EMPTY; 256],
            children: BitArray::new(),
        }
    }

    /// Build from a small mapping's (key, child) pairs (grow) or another
    /// indexed mapping's pairs (shrink target N64<->N128), in any order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, N)>) -> Self {
        let mut m = Self::new();
        for (k, n) in pairs {
            m.add_child(k, n);
        }
        m
    }

    /// Drain into (key, child) pairs in ascending key order, consuming the
    /// mapping. Used when growing to `DirectMapping` or shrinking to
    /// `SmallMapping`.
    pub fn drain(mut self) -> Vec<(u8, N)> {
        let mut out = Vec::with_capacity(self.children.size());
        for key in 0..256usize {
            let idx = self.index[key];
            if idx != EMPTY {
                let node = self.children.erase(idx as usize).unwrap();
                out.push((key as u8, node));
            }
        }
        self.index = [EMPTY; 256];
        out
    }
}

impl<N, const WIDTH: usize, B: BitsetTrait> NodeMapping<N, WIDTH> for IndexedMapping<N, WIDTH, B> {
    fn add_child(&mut self, key: u8, node: N) {
        let pos = self.children.push(node);
        self.index[key as usize] = pos as u8;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = self.index[key as usize];
        if idx == EMPTY {
            None
        } else {
            self.children.get(idx as usize)
        }
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = self.index[key as usize];
        if idx == EMPTY {
            None
        } else {
            self.children.get_mut(idx as usize)
        }
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let idx = self.index[key as usize];
        if idx == EMPTY {
            return None;
        }
        self.index[key as usize] = EMPTY;
        self.children.erase(idx as usize)
    }

    fn num_children(&self) -> usize {
        self.children.size()
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &N)> + '_> {
        Box::new((0u16..256).filter_map(move |key| {
            let idx = self.index[key as usize];
            if idx == EMPTY {
                None
            } else {
                self.children.get(idx as usize).map(|n| (key as u8, n))
            }
        }))
    }
}

impl<N, const WIDTH: usize, B: BitsetTrait> Default for IndexedMapping<N, WIDTH, B> {
    fn default() -> Self {
        Self::new()
    }
}
