use std::mem::MaybeUninit;
use std::ops::Index;

use crate::utils::bitset::BitsetTrait;

/// A fixed-capacity slot array with a bitset tracking which slots are live.
///
/// `B` is the bitset type backing occupancy tracking; its capacity must be
/// at least `WIDTH`. Used by the unordered small-node mapping and by the
/// indexed/direct mappings to store children without requiring every slot
/// to hold a valid `X`.
pub struct BitArray<X, const WIDTH: usize, B: BitsetTrait> {
    bitset: B,
    storage: [MaybeUninit<X>; WIDTH],
}

impl<X, const WIDTH: usize, B: BitsetTrait> BitArray<X, WIDTH, B> {
    pub fn new() -> Self {
        let bitset = B::default();
        assert!(bitset.capacity() >= WIDTH);
        Self {
            bitset,
            storage: unsafe { MaybeUninit::uninit().assume_init() },
        }
    }

    pub fn push(&mut self, x: X) -> usize {
        let pos = self.bitset.first_empty().expect("BitArray is full");
        assert!(pos < WIDTH);
        self.bitset.set(pos);
        unsafe {
            self.storage[pos].as_mut_ptr().write(x);
        }
        pos
    }

    pub fn pop(&mut self) -> Option<X> {
        let pos = self.bitset.last()?;
        self.bitset.unset(pos);
        let old = std::mem::replace(&mut self.storage[pos], MaybeUninit::uninit());
        Some(unsafe { old.assume_init() })
    }

    pub fn last(&self) -> Option<&X> {
        self.bitset
            .last()
            .map(|pos| unsafe { self.storage[pos].assume_init_ref() })
    }

    #[inline]
    pub fn last_used_pos(&self) -> Option<usize> {
        self.bitset.last()
    }

    #[inline]
    pub fn first_free_pos(&self) -> Option<usize> {
        self.bitset.first_empty()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&X> {
        assert!(pos < WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_ref() })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut X> {
        assert!(pos < WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_mut() })
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, pos: usize, x: X) {
        assert!(pos < WIDTH);
        unsafe {
            self.storage[pos].as_mut_ptr().write(x);
        };
        self.bitset.set(pos);
    }

    #[inline]
    pub fn update(&mut self, pos: usize, x: X) -> Option<X> {
        let old = self.erase_internal(pos);
        unsafe {
            self.storage[pos].as_mut_ptr().write(x);
        };
        self.bitset.set(pos);
        old
    }

    #[inline]
    pub fn erase(&mut self, pos: usize) -> Option<X> {
        let old = self.erase_internal(pos);
        self.bitset.unset(pos);
        self.storage[pos] = MaybeUninit::uninit();
        old
    }

    // Erase without updating the bitset, used by update and erase.
    #[inline]
    fn erase_internal(&mut self, pos: usize) -> Option<X> {
        assert!(pos < WIDTH);
        if self.bitset.check(pos) {
            let old = std::mem::replace(&mut self.storage[pos], MaybeUninit::uninit());
            Some(unsafe { old.assume_init() })
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        for i in 0..WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
        self.bitset.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bitset.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bitset.size()
    }

    pub fn bitmask(&self) -> &B {
        &self.bitset
    }

    pub fn iter_keys(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&i| self.bitset.check(i))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &X)> {
        self.storage.iter().enumerate().filter_map(|x| {
            if !self.bitset.check(x.0) {
                None
            } else {
                Some((x.0, unsafe { x.1.assume_init_ref() }))
            }
        })
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (usize, &mut X)> {
        let bitset = &self.bitset;
        self.storage.iter_mut().enumerate().filter_map(move |x| {
            if !bitset.check(x.0) {
                None
            } else {
                Some((x.0, unsafe { x.1.assume_init_mut() }))
            }
        })
    }
}

impl<X, const WIDTH: usize, B: BitsetTrait> Default for BitArray<X, WIDTH, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X, const WIDTH: usize, B: BitsetTrait> Index<usize> for BitArray<X, WIDTH, B> {
    type Output = X;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).unwrap()
    }
}

impl<X, const WIDTH: usize, B: BitsetTrait> Drop for BitArray<X, WIDTH, B> {
    fn drop(&mut self) {
        for i in 0..WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
    }
}
