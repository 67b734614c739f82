// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! The hierarchical queue driving every propagation operator.
use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::layout::Depth;
use crate::Error;

/// The number of levels of a dense queue, enough for any byte image.
pub const DENSE_LEVELS: usize = 256;

/// A priority queue of pixel indices keyed by level, first-in first-out within a level.
///
/// Extraction always takes from the lowest non-empty level at or above a cursor, and the cursor
/// only moves upwards. Insertions below the cursor are raised to the cursor. This gives a
/// deterministic order: lower levels first, earlier insertions first.
///
/// ```
/// use image_morph::HierarchicalQueue;
///
/// let mut queue = HierarchicalQueue::dense();
/// queue.push(3, 10)?;
/// queue.push(1, 11)?;
/// queue.push(3, 12)?;
///
/// assert_eq!(queue.pop(), Some((1, 11)));
/// assert_eq!(queue.pop(), Some((3, 10)));
/// // Below the cursor, raised to level 3 and queued behind the earlier entry.
/// queue.push(0, 13)?;
/// assert_eq!(queue.pop(), Some((3, 12)));
/// assert_eq!(queue.pop(), Some((3, 13)));
/// assert_eq!(queue.pop(), None);
/// # Ok::<(), image_morph::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct HierarchicalQueue {
    levels: Levels,
    cursor: u32,
    len: usize,
}

#[derive(Clone, Debug)]
enum Levels {
    /// One queue per possible level.
    Dense(Vec<VecDeque<usize>>),
    /// Queues only for occupied levels.
    Sparse(BTreeMap<u32, VecDeque<usize>>),
}

impl HierarchicalQueue {
    /// A queue for levels `0..256`.
    pub fn dense() -> Self {
        let levels = (0..DENSE_LEVELS).map(|_| VecDeque::new()).collect();
        HierarchicalQueue {
            levels: Levels::Dense(levels),
            cursor: 0,
            len: 0,
        }
    }

    /// A queue for any `u32` level.
    pub fn sparse() -> Self {
        HierarchicalQueue {
            levels: Levels::Sparse(BTreeMap::new()),
            cursor: 0,
            len: 0,
        }
    }

    /// The queue suited to the values of an image depth.
    pub fn for_depth(depth: Depth) -> Self {
        match depth {
            Depth::Bit | Depth::Byte => Self::dense(),
            Depth::Word => Self::sparse(),
        }
    }

    /// Insert an item at a level, or at the cursor if the level lies below it.
    ///
    /// Fails with [`Error::BadValue`] for levels beyond a dense queue and with
    /// [`Error::CannotAllocate`] when the level can not grow.
    pub fn push(&mut self, level: u32, item: usize) -> Result<(), Error> {
        let level = level.max(self.cursor);
        let fifo = match &mut self.levels {
            Levels::Dense(levels) => levels.get_mut(level as usize).ok_or(Error::BadValue)?,
            Levels::Sparse(levels) => levels.entry(level).or_default(),
        };

        fifo.try_reserve(1)?;
        fifo.push_back(item);
        self.len += 1;
        Ok(())
    }

    /// Remove the earliest item of the lowest non-empty level, with that level.
    pub fn pop(&mut self) -> Option<(u32, usize)> {
        if self.len == 0 {
            return None;
        }

        let (level, item) = match &mut self.levels {
            Levels::Dense(levels) => {
                let start = self.cursor as usize;
                let (offset, item) = levels[start..]
                    .iter_mut()
                    .enumerate()
                    .find_map(|(offset, fifo)| Some((offset, fifo.pop_front()?)))?;
                ((start + offset) as u32, item)
            }
            Levels::Sparse(levels) => {
                let mut entry = levels.first_entry()?;
                let level = *entry.key();
                let item = entry.get_mut().pop_front()?;
                if entry.get().is_empty() {
                    entry.remove();
                }
                (level, item)
            }
        };

        self.cursor = level;
        self.len -= 1;
        Some((level, item))
    }

    /// The level below which no item will be returned anymore.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_within_and_across_levels() {
        for mut queue in [HierarchicalQueue::dense(), HierarchicalQueue::sparse()] {
            queue.push(7, 1).unwrap();
            queue.push(2, 2).unwrap();
            queue.push(7, 3).unwrap();
            queue.push(2, 4).unwrap();
            assert_eq!(queue.len(), 4);

            assert_eq!(queue.pop(), Some((2, 2)));
            assert_eq!(queue.pop(), Some((2, 4)));
            assert_eq!(queue.cursor(), 2);
            assert_eq!(queue.pop(), Some((7, 1)));
            assert_eq!(queue.cursor(), 7);

            queue.push(1, 5).unwrap();
            assert_eq!(queue.pop(), Some((7, 3)));
            assert_eq!(queue.pop(), Some((7, 5)));
            assert!(queue.is_empty());
            assert_eq!(queue.pop(), None);
        }
    }

    #[test]
    fn dense_bounds() {
        let mut queue = HierarchicalQueue::dense();
        assert_eq!(queue.push(256, 0), Err(Error::BadValue));
        queue.push(255, 0).unwrap();
        assert_eq!(queue.pop(), Some((255, 0)));
    }

    #[test]
    fn sparse_levels() {
        let mut queue = HierarchicalQueue::for_depth(Depth::Word);
        queue.push(u32::MAX, 9).unwrap();
        queue.push(1 << 20, 8).unwrap();
        assert_eq!(queue.pop(), Some((1 << 20, 8)));
        assert_eq!(queue.pop(), Some((u32::MAX, 9)));
    }
}
