//! The mapping family backing the N256 node shape: every possible key byte
//! addresses its own slot directly, so lookup, insert, and delete are all
//! O(1) with no search of any kind.

use crate::mapping::NodeMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::Bitset64;

pub struct DirectMapping<N> {
    children: BitArray<N, 256, Bitset64<4>>,
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        DirectMapping {
            children: BitArray::new(),
        }
    }

    /// Build directly from (key, child) pairs, in any order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, N)>) -> Self {
        let mut m = Self::new();
        for (k, n) in pairs {
            m.add_child(k, n);
        }
        m
    }

    /// Drain into (key, child) pairs in ascending key order, consuming the
    /// mapping. Used when shrinking back down to `IndexedMapping`.
    pub fn drain(mut self) -> Vec<(u8, N)> {
        let keys: Vec<usize> = self.children.iter_keys().collect();
        keys.into_iter()
            .map(|k| (k as u8, self.children.erase(k).unwrap()))
            .collect()
    }
}

impl<N> NodeMapping<N, 256> for DirectMapping<N> {
    fn add_child(&mut self, key: u8, node: N) {
        self.children.set(key as usize, node);
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        self.children.erase(key as usize)
    }

    fn num_children(&self) -> usize {
        self.children.size()
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &N)> + '_> {
        Box::new(self.children.iter().map(|(k, n)| (k as u8, n)))
    }
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}
