pub mod direct;
pub mod indexed;
pub mod small;

/// Whether a container maintains sorted child order within its small
/// (N8/N16/N32) node shapes.
///
/// `N4` is always kept sorted regardless of this setting (four elements are
/// cheap enough to shift on every insert, and a fully linear-scanned node
/// gains nothing from being unordered). `Ordered` keeps N8/N16/N32 sorted
/// too, so traversal at those levels can walk children in key order without
/// a separate sort step; `Unordered` instead appends new children and fills
/// holes with a swap-from-the-end on removal, which is cheaper to mutate
/// but loses per-level physical ordering (ascending/descending traversal
/// still produces correctly ordered output overall, since child dispatch
/// goes through the key byte either way — it just costs a sort at the point
/// ordering actually matters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ordered,
    Unordered,
}

/// A node's children, addressed by key byte.
///
/// Implemented once per shape family (`SmallMapping`, `IndexedMapping`,
/// `DirectMapping`); the tree and node-transition code are written against
/// this trait rather than any one shape.
pub trait NodeMapping<N, const WIDTH: usize> {
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
    fn is_full(&self) -> bool {
        self.num_children() >= WIDTH
    }
    fn width(&self) -> usize {
        WIDTH
    }
    /// Children in ascending key order, for traversal.
    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &N)> + '_>;
}
