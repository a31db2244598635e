//! # Growing ring buffer: the per-processor unbounded FIFO.
//!
//! [`GrowingRing`] is a circular array that doubles its capacity when a push
//! finds it full. It never shrinks, so memory stays bounded by the largest
//! backlog the owning processor has seen.
//!
//! ## Layout
//! ```text
//!            read            write
//!             ▼                ▼
//!   [ _ | _ | a | b | c | d | _ | _ ]      len = 4, capacity = 8
//!
//! grow (len == capacity):
//!   old:  [ e | f | a | b | c | d ]   read = 2
//!   new:  [ a | b | c | d | e | f | _ | ... ]   read = 0, write = len
//!          slot i ◄── old[(read + i) % old_capacity]
//! ```
//!
//! ## Rules
//! - `0 <= len <= capacity`; both cursors stay in `[0, capacity)`.
//! - Capacity `0` grows to `1` on the first push.
//! - A failed allocation, or growth past the limit set with
//!   [`with_limit`](GrowingRing::with_limit), leaves the buffer untouched and
//!   returns [`RingError::Grow`].
//! - Single owner: the ring is driven only by its processor's pump task, so it
//!   carries no synchronization of its own.

use crate::error::RingError;

/// Unbounded FIFO backed by a doubling circular array.
#[derive(Debug)]
pub struct GrowingRing<T> {
    slots: Vec<Option<T>>,
    read: usize,
    write: usize,
    len: usize,
    limit: Option<usize>,
}

impl<T> GrowingRing<T> {
    /// Creates a ring with room for `capacity` items before the first growth.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            read: 0,
            write: 0,
            len: 0,
            limit: None,
        }
    }

    /// Caps growth: a push that would need more than `max_capacity` slots fails.
    pub fn with_limit(capacity: usize, max_capacity: usize) -> Self {
        Self {
            limit: Some(max_capacity),
            ..Self::with_capacity(capacity)
        }
    }

    /// Appends `value` at the tail, doubling the capacity first if the ring is full.
    pub fn push(&mut self, value: T) -> Result<(), RingError> {
        if self.len == self.slots.len() {
            self.grow()?;
        }
        self.slots[self.write] = Some(value);
        self.write = (self.write + 1) % self.slots.len();
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the head item, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.read].take();
        self.read = (self.read + 1) % self.slots.len();
        self.len -= 1;
        value
    }

    /// Number of live items.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there are no live items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Doubles the slot array and compacts live items to the front.
    fn grow(&mut self) -> Result<(), RingError> {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(RingError::Grow {
                requested: usize::MAX,
            })?
            .max(1);
        if self.limit.is_some_and(|max| new_capacity > max) {
            return Err(RingError::Grow {
                requested: new_capacity,
            });
        }

        let mut next: Vec<Option<T>> = Vec::new();
        next.try_reserve_exact(new_capacity)
            .map_err(|_| RingError::Grow {
                requested: new_capacity,
            })?;

        for i in 0..self.len {
            next.push(self.slots[(self.read + i) % old_capacity].take());
        }
        next.resize_with(new_capacity, || None);

        self.slots = next;
        self.read = 0;
        self.write = self.len % new_capacity;
        Ok(())
    }
}

impl<T> Default for GrowingRing<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(ring: &mut GrowingRing<T>) -> Vec<T> {
        std::iter::from_fn(|| ring.pop()).collect()
    }

    #[test]
    fn test_pop_empty_returns_none() {
        let mut ring: GrowingRing<u32> = GrowingRing::with_capacity(4);
        assert_eq!(ring.pop(), None);
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 4);
    }

    #[test]
    fn test_fifo_without_growth() {
        let mut ring = GrowingRing::with_capacity(8);
        for i in 0..5 {
            ring.push(i).unwrap();
        }
        assert_eq!(drain(&mut ring), vec![0, 1, 2, 3, 4]);
        assert_eq!(ring.capacity(), 8);
    }

    #[test]
    fn test_growth_from_two_keeps_order() {
        let mut ring = GrowingRing::with_capacity(2);
        for i in 0..5 {
            ring.push(i).unwrap();
        }
        assert!(ring.capacity() >= 5);
        assert_eq!(ring.pop(), Some(0));
        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), Some(4));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_growth_capacity_is_power_of_two_multiple() {
        for initial in [1usize, 3, 5, 16] {
            let mut ring = GrowingRing::with_capacity(initial);
            let n = initial * 5 + 1;
            for i in 0..n {
                ring.push(i).unwrap();
            }
            let cap = ring.capacity();
            assert!(cap >= n, "capacity {cap} < {n}");
            assert_eq!(cap % initial, 0);
            assert!((cap / initial).is_power_of_two());
            assert_eq!(drain(&mut ring), (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_zero_capacity_grows_on_first_push() {
        let mut ring = GrowingRing::default();
        assert_eq!(ring.capacity(), 0);
        ring.push("a").unwrap();
        assert_eq!(ring.capacity(), 1);
        ring.push("b").unwrap();
        ring.push("c").unwrap();
        assert_eq!(ring.capacity(), 4);
        assert_eq!(drain(&mut ring), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_growth_with_wrapped_cursors() {
        let mut ring = GrowingRing::with_capacity(4);
        for i in 0..4 {
            ring.push(i).unwrap();
        }
        // Move the read cursor forward so live items wrap around the end.
        assert_eq!(ring.pop(), Some(0));
        assert_eq!(ring.pop(), Some(1));
        ring.push(4).unwrap();
        ring.push(5).unwrap();
        assert_eq!(ring.len(), 4);

        // Full with read = 2: this push must compact [2, 3, 4, 5] in order.
        ring.push(6).unwrap();
        assert_eq!(ring.capacity(), 8);
        assert_eq!(drain(&mut ring), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_repeated_push_pop_at_full_occupancy() {
        let mut ring = GrowingRing::with_capacity(3);
        for i in 0..3 {
            ring.push(i).unwrap();
        }
        for i in 3..100 {
            assert_eq!(ring.pop(), Some(i - 3));
            ring.push(i).unwrap();
            assert_eq!(ring.len(), 3);
            assert_eq!(ring.capacity(), 3);
        }
        assert_eq!(drain(&mut ring), vec![97, 98, 99]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_growth_past_limit_fails_and_keeps_contents() {
        let mut ring = GrowingRing::with_limit(2, 4);
        for i in 0..4 {
            ring.push(i).unwrap();
        }
        assert_eq!(ring.capacity(), 4);

        let err = ring.push(4).unwrap_err();
        assert_eq!(err, RingError::Grow { requested: 8 });
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.capacity(), 4);
        assert_eq!(drain(&mut ring), vec![0, 1, 2, 3]);

        // Room freed by pops is usable again without growing.
        ring.push(5).unwrap();
        assert_eq!(ring.pop(), Some(5));
    }

    #[test]
    fn test_interleaved_growth_and_pops() {
        let mut ring = GrowingRing::with_capacity(2);
        let mut expected = std::collections::VecDeque::new();
        let mut next = 0;
        for round in 0..50 {
            for _ in 0..(round % 7 + 1) {
                ring.push(next).unwrap();
                expected.push_back(next);
                next += 1;
            }
            for _ in 0..(round % 5) {
                assert_eq!(ring.pop(), expected.pop_front());
            }
        }
        assert_eq!(drain(&mut ring), expected.into_iter().collect::<Vec<_>>());
    }
}
