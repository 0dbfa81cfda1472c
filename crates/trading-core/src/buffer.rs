//! Fixed-capacity rolling window.

use std::collections::VecDeque;

/// FIFO buffer holding at most `capacity` values.
///
/// The window understands the replace protocol: a replacing update swaps the
/// newest value instead of pushing, so its length never changes on replace.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    values: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> RollingWindow<T> {
    /// Create an empty window. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push a new value or replace the newest one.
    ///
    /// Returns the value that dropped out of the window: the evicted oldest
    /// value on a push into a full window, or the previous newest value on a
    /// replace. Replacing into an empty window pushes.
    pub fn update(&mut self, value: T, replace: bool) -> Option<T> {
        if replace {
            if let Some(last) = self.values.back_mut() {
                return Some(std::mem::replace(last, value));
            }
        }
        self.push(value)
    }

    /// Append a value, evicting the oldest one once full.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front()
        } else {
            None
        }
    }

    /// Overwrite the newest value.
    pub fn replace_last(&mut self, value: T) -> Option<T> {
        self.values
            .back_mut()
            .map(|last| std::mem::replace(last, value))
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest value.
    #[inline]
    pub fn first(&self) -> Option<T> {
        self.values.front().copied()
    }

    /// Newest value.
    #[inline]
    pub fn last(&self) -> Option<T> {
        self.values.back().copied()
    }

    /// Value at `index`, counted from the oldest.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + ExactSizeIterator + Clone + '_ {
        self.values.iter().copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut window = RollingWindow::new(3);

        for value in 1..=6 {
            window.update(value, false);
            assert!(window.len() <= 3);
        }

        assert!(window.is_full());
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_push_returns_evicted() {
        let mut window = RollingWindow::new(2);

        assert_eq!(window.push(1), None);
        assert_eq!(window.push(2), None);
        assert_eq!(window.push(3), Some(1));
        assert_eq!(window.first(), Some(2));
        assert_eq!(window.last(), Some(3));
    }

    #[test]
    fn test_replace_swaps_newest() {
        let mut window = RollingWindow::new(3);
        window.update(1, false);
        window.update(2, false);

        assert_eq!(window.update(20, true), Some(2));
        assert_eq!(window.len(), 2);
        assert_eq!(window.get(1), Some(20));
    }

    #[test]
    fn test_replace_on_empty_pushes() {
        let mut window = RollingWindow::new(2);

        assert_eq!(window.update(7, true), None);
        assert_eq!(window.len(), 1);
        assert_eq!(window.replace_last(8), Some(7));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut window = RollingWindow::new(0);
        window.push(1);
        window.push(2);

        assert_eq!(window.capacity(), 1);
        assert_eq!(window.last(), Some(2));
    }
}
