//! # art — an Adaptive Radix Tree
//!
//! A memory-efficient ordered map keyed by byte strings, backed by an
//! Adaptive Radix Tree: a trie whose internal node representation grows and
//! shrinks (`N4` through `N256`) with the number of children actually in
//! use, and whose single-child runs are path-compressed away.
//!
//! - **Space efficient**: node shape adapts to local fanout instead of
//!   paying a fixed 256-pointer cost everywhere.
//! - **Ordered**: keys are stored byte-lexicographically, so ascending and
//!   descending traversal, prefix restriction, and "shortest unambiguous
//!   extension" (`complete`) all fall out of the trie structure for free.
//! - **No parent pointers, no arena**: children are addressed purely by
//!   recursive `&mut` borrow (see `node.rs`); there is no generation index
//!   or raw pointer anywhere in this crate.
//!
//! ## Quick start
//!
//! ```rust
//! use art::{AdaptiveRadixTree, Mode};
//!
//! let mut tree: AdaptiveRadixTree<String> = AdaptiveRadixTree::new(Mode::Ordered);
//!
//! tree.insert("hello", "world".to_string()).unwrap();
//! tree.insert("foo", "bar".to_string()).unwrap();
//!
//! assert_eq!(tree.get("hello").unwrap(), Some(&"world".to_string()));
//! assert_eq!(tree.get("missing").unwrap(), None);
//! ```
//!
//! ## Key flavors
//!
//! Every operation takes a [`Key`], which is either [`Key::text`] (gets an
//! implicit trailing NUL, so no text key is ever a byte-for-byte prefix of
//! another) or [`Key::binary`] (stored exactly as given). `&str` converts to
//! a text key via `Into<Key>`:
//!
//! ```rust
//! use art::{AdaptiveRadixTree, Key, Mode};
//!
//! let mut tree: AdaptiveRadixTree<u32> = AdaptiveRadixTree::new(Mode::Ordered);
//! tree.insert(Key::binary(b"\x01\x02"), 1).unwrap();
//! tree.insert("hello", 2).unwrap();
//! ```

mod lookup;
mod mutation;
mod node;
mod path;
mod traversal;

#[doc(hidden)]
pub mod mapping;
#[doc(hidden)]
pub mod utils;

pub mod error;
pub mod key;
pub mod stats;
pub mod tree;

pub use error::{Error, Result};
pub use key::{Key, KeyKind};
pub use mapping::Mode;
pub use traversal::{Direction, FoldOutcome, Scope};
pub use tree::{AdaptiveRadixTree, LeafHandle};
