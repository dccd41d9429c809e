use std::cmp::Ordering;

use crate::error::{HuffmanError, Result};

/// Array-backed binary min-heap ordered by a caller-supplied comparison.
///
/// The element for which `cmp` answers `Less` against every other element
/// sits at index 0. Children of `i` live at `2i + 1` and `2i + 2`.
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    elements: Vec<T>,
    cmp: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(cmp: F) -> Self {
        PriorityQueue {
            elements: Vec::new(),
            cmp,
        }
    }

    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        PriorityQueue {
            elements: Vec::with_capacity(capacity),
            cmp,
        }
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn insert(&mut self, item: T) {
        self.elements.push(item);
        self.sift_up(self.elements.len() - 1);
    }

    pub fn peek_min(&self) -> Result<&T> {
        self.elements.first().ok_or(HuffmanError::EmptyQueue)
    }

    pub fn remove_min(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(HuffmanError::EmptyQueue);
        }
        // the last leaf takes the root slot and sinks back down
        let min = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.elements[a], &self.elements[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn valid_min_heap(&self) -> bool {
        (1..self.elements.len()).all(|i| !self.less(i, (i - 1) / 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }

    fn min_queue() -> PriorityQueue<u32, fn(&u32, &u32) -> Ordering> {
        PriorityQueue::new(ascending as fn(&u32, &u32) -> Ordering)
    }

    #[test]
    fn empty_queue_fails_fast() {
        let mut queue = min_queue();
        assert_eq!(queue.size(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.peek_min(), Err(HuffmanError::EmptyQueue));
        assert_eq!(queue.remove_min(), Err(HuffmanError::EmptyQueue));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = min_queue();
        queue.insert(7);
        queue.insert(3);
        assert_eq!(queue.peek_min(), Ok(&3));
        assert_eq!(queue.size(), 2);
    }

    #[test]
    fn removing_last_element_empties_queue() {
        let mut queue = min_queue();
        queue.insert(11);
        assert_eq!(queue.remove_min(), Ok(11));
        assert!(queue.is_empty());
        assert_eq!(queue.remove_min(), Err(HuffmanError::EmptyQueue));
    }

    #[test]
    fn remove_min_yields_sorted_order() {
        let mut queue = min_queue();
        for value in [42, 5, 17, 5, 99, 0, 23, 8, 61, 1] {
            queue.insert(value);
            assert!(queue.valid_min_heap());
        }

        let mut drained = Vec::new();
        while let Ok(value) = queue.remove_min() {
            assert!(queue.valid_min_heap());
            drained.push(value);
        }
        assert_eq!(drained, vec![0, 1, 5, 5, 8, 17, 23, 42, 61, 99]);
    }

    #[test]
    fn interleaved_inserts_and_removes_track_global_minimum() {
        let mut queue = min_queue();
        let mut shadow: Vec<u32> = Vec::new();
        let mut seed: u32 = 0x9E37_79B9;

        for step in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            if step % 3 == 2 && !shadow.is_empty() {
                let expected = *shadow.iter().min().unwrap();
                let pos = shadow.iter().position(|&v| v == expected).unwrap();
                shadow.swap_remove(pos);
                assert_eq!(queue.remove_min(), Ok(expected));
            } else {
                let value = seed >> 24;
                shadow.push(value);
                queue.insert(value);
            }
            assert_eq!(queue.size(), shadow.len());
        }
    }

    #[test]
    fn comparator_controls_order() {
        let mut queue = PriorityQueue::with_capacity(4, |a: &i32, b: &i32| b.cmp(a));
        for value in [1, 4, 2, 3] {
            queue.insert(value);
        }
        assert_eq!(queue.remove_min(), Ok(4));
        assert_eq!(queue.remove_min(), Ok(3));
        assert_eq!(queue.size(), 2);
    }
}
