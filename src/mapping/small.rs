//! The mapping family backing the N4/N8/N16/N32 node shapes: a flat,
//! dense array of up to `WIDTH` (key byte, child) pairs.
//!
//! N4 is always kept sorted by key byte (cheap to shift four elements on
//! every insert, and a linearly-scanned node gains nothing from being
//! unordered). N8/N16/N32 honor the container's [`Mode`]: `Ordered` keeps
//! them sorted the same way N4 is; `Unordered` instead appends new entries
//! at the end and fills the resulting hole on removal by swapping in the
//! last entry, trading per-level physical ordering for cheaper mutation.

use std::mem::MaybeUninit;

use crate::mapping::{Mode, NodeMapping};
use crate::utils::simd::{find_insert_pos, find_key_any, find_key_sorted};

pub struct SmallMapping<N, const WIDTH: usize> {
    keys: [u8; WIDTH],
    children: Box<[MaybeUninit<N>; WIDTH]>,
    num_children: u8,
    sorted: bool,
}

impl<N, const WIDTH: usize> SmallMapping<N, WIDTH> {
    pub fn new(mode: Mode) -> Self {
        SmallMapping {
            keys: [0u8; WIDTH],
            children: Box::new(unsafe { MaybeUninit::uninit().assume_init() }),
            num_children: 0,
            sorted: WIDTH <= 4 || mode == Mode::Ordered,
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Move every (key, child) pair out, in ascending key order, consuming
    /// the mapping. Used when growing into a wider shape.
    pub fn drain_sorted(mut self) -> Vec<(u8, N)> {
        let mut pairs: Vec<(u8, N)> = (0..self.num_children as usize)
            .map(|i| {
                let child =
                    std::mem::replace(&mut self.children[i], MaybeUninit::uninit());
                (self.keys[i], unsafe { child.assume_init() })
            })
            .collect();
        self.num_children = 0;
        pairs.sort_by_key(|(k, _)| *k);
        pairs
    }

    fn find(&self, key: u8) -> Option<usize> {
        let n = self.num_children as usize;
        if self.sorted {
            find_key_sorted::<WIDTH>(key, &self.keys, n)
        } else {
            find_key_any::<WIDTH>(key, &self.keys, n)
        }
    }
}

impl<N, const WIDTH: usize> NodeMapping<N, WIDTH> for SmallMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        assert!(!self.is_full(), "SmallMapping is full");
        let n = self.num_children as usize;
        let pos = if self.sorted {
            find_insert_pos::<WIDTH>(key, &self.keys, n)
        } else {
            n
        };
        if pos < n {
            self.keys.copy_within(pos..n, pos + 1);
            for i in (pos..n).rev() {
                self.children.swap(i, i + 1);
            }
        }
        self.keys[pos] = key;
        self.children[pos].write(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        self.find(key)
            .map(|i| unsafe { self.children[i].assume_init_ref() })
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.find(key)
            .map(move |i| unsafe { self.children[i].assume_init_mut() })
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let pos = self.find(key)?;
        let n = self.num_children as usize;
        let removed = std::mem::replace(&mut self.children[pos], MaybeUninit::uninit());
        if self.sorted {
            self.keys.copy_within(pos + 1..n, pos);
            for i in pos..n - 1 {
                self.children.swap(i, i + 1);
            }
        } else if pos != n - 1 {
            self.keys[pos] = self.keys[n - 1];
            self.children.swap(pos, n - 1);
        }
        self.num_children -= 1;
        Some(unsafe { removed.assume_init() })
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &N)> + '_> {
        let n = self.num_children as usize;
        if self.sorted {
            Box::new((0..n).map(move |i| (self.keys[i], unsafe { self.children[i].assume_init_ref() })))
        } else {
            let mut pairs: Vec<(u8, &N)> = (0..n)
                .map(|i| (self.keys[i], unsafe { self.children[i].assume_init_ref() }))
                .collect();
            pairs.sort_by_key(|(k, _)| *k);
            Box::new(pairs.into_iter())
        }
    }
}

impl<N, const WIDTH: usize> Drop for SmallMapping<N, WIDTH> {
    fn drop(&mut self) {
        for i in 0..self.num_children as usize {
            unsafe { self.children[i].assume_init_drop() };
        }
    }
}
