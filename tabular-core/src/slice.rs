//! Start/stop/step ranges over row positions
//!
//! Bounds follow conventional sequence slicing: the range is half open,
//! negative positions count from the end, out-of-range bounds are clipped
//! and a negative step walks backward.

use crate::error::{Error, Result};

/// A start/stop/step range over a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliceRange {
    /// First position (inclusive); `None` means the natural start for the step
    pub start: Option<isize>,

    /// Last position (exclusive); `None` means the natural end for the step
    pub stop: Option<isize>,

    /// Distance between positions; must not be zero
    pub step: isize,
}

impl SliceRange {
    /// A range from `start` to `stop` with step 1
    pub fn new(start: isize, stop: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    /// The whole sequence
    pub fn full() -> Self {
        Self {
            start: None,
            stop: None,
            step: 1,
        }
    }

    /// Replace the step
    #[must_use]
    pub fn with_step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }

    /// Everything from `start` onward
    pub fn starting_at(start: isize) -> Self {
        Self {
            start: Some(start),
            stop: None,
            step: 1,
        }
    }

    /// Everything before `stop`
    pub fn up_to(stop: isize) -> Self {
        Self {
            start: None,
            stop: Some(stop),
            step: 1,
        }
    }

    /// Resolve this range against a sequence of `len` items
    ///
    /// Returns the concrete positions in visiting order.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        if self.step == 0 {
            return Err(Error::InvalidArgument("slice step cannot be zero".into()));
        }

        let len = isize::try_from(len)
            .map_err(|_| Error::InvalidArgument(format!("sequence of {len} items is too long to slice")))?;
        let step = self.step;

        // Clipping window depends on direction
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };

        let clip = |bound: isize| -> isize {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self.start.map_or(if step > 0 { lower } else { upper }, clip);
        let stop = self.stop.map_or(if step > 0 { upper } else { lower }, clip);

        let mut positions = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            // Window clipping keeps i within [0, len) here
            positions.push(i.unsigned_abs());
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }

        Ok(positions)
    }
}

impl Default for SliceRange {
    fn default() -> Self {
        Self::full()
    }
}

impl From<std::ops::Range<isize>> for SliceRange {
    fn from(range: std::ops::Range<isize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<std::ops::RangeFrom<isize>> for SliceRange {
    fn from(range: std::ops::RangeFrom<isize>) -> Self {
        Self::starting_at(range.start)
    }
}

impl From<std::ops::RangeTo<isize>> for SliceRange {
    fn from(range: std::ops::RangeTo<isize>) -> Self {
        Self::up_to(range.end)
    }
}

impl From<std::ops::RangeFull> for SliceRange {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(SliceRange::full(), 5, vec![0, 1, 2, 3, 4] ; "full")]
    #[test_case(SliceRange::new(1, 3), 5, vec![1, 2] ; "plain")]
    #[test_case(SliceRange::new(-2, 100), 5, vec![3, 4] ; "negative start clipped stop")]
    #[test_case(SliceRange::new(-100, 2), 5, vec![0, 1] ; "clipped start")]
    #[test_case(SliceRange::new(4, 1), 5, vec![] ; "empty when start after stop")]
    #[test_case(SliceRange::full().with_step(2), 5, vec![0, 2, 4] ; "stepped")]
    #[test_case(SliceRange::full().with_step(-1), 5, vec![4, 3, 2, 1, 0] ; "reversed")]
    #[test_case(SliceRange::new(3, 0).with_step(-2), 5, vec![3, 1] ; "reverse stepped")]
    #[test_case(SliceRange::starting_at(-1).with_step(-1), 3, vec![2, 1, 0] ; "reverse from last")]
    #[test_case(SliceRange::up_to(-1), 3, vec![0, 1] ; "to negative")]
    #[test_case(SliceRange::new(1, 3).with_step(isize::MAX), 5, vec![1] ; "huge step")]
    #[test_case(SliceRange::starting_at(2).with_step(isize::MIN), 5, vec![2] ; "huge negative step")]
    #[test_case(SliceRange::full(), 0, vec![] ; "empty sequence")]
    #[test_case(SliceRange::full().with_step(-1), 0, vec![] ; "empty sequence reversed")]
    fn test_indices(range: SliceRange, len: usize, expected: Vec<usize>) {
        assert_eq!(range.indices(len).unwrap(), expected);
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = SliceRange::full().with_step(0).indices(3).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_from_std_ranges() {
        assert_eq!(SliceRange::from(1..3), SliceRange::new(1, 3));
        assert_eq!(SliceRange::from(..), SliceRange::full());
        assert_eq!(SliceRange::from(..2).indices(4).unwrap(), vec![0, 1]);
    }
}
