//! Structured index spaces
use crate::types::MAX_RANK;
use itertools::{izip, Itertools};
use std::fmt;

/// Half-open index range `[min, max)` along each of up to [`MAX_RANK`] axes
///
/// Index spaces are small `Copy` values. Passing an axis index at or above
/// [`IndexSpace::rank`] is a caller error and panics.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexSpace {
    rank: usize,
    min: [i64; MAX_RANK],
    max: [i64; MAX_RANK],
}

impl IndexSpace {
    /// Create an index space from per-axis minimum and maximum indices
    pub fn new(min: &[i64], max: &[i64]) -> Self {
        assert_eq!(min.len(), max.len());
        assert!(min.len() <= MAX_RANK, "Index spaces support at most {MAX_RANK} axes");
        let mut space = Self {
            rank: min.len(),
            min: [0; MAX_RANK],
            max: [0; MAX_RANK],
        };
        for (d, (lo, hi)) in izip!(min, max).enumerate() {
            assert!(lo <= hi, "Minimum index above maximum index on axis {d}");
            space.min[d] = *lo;
            space.max[d] = *hi;
        }
        space
    }

    /// Create an index space starting at zero with the given size along each axis
    pub fn from_sizes(size: &[i64]) -> Self {
        Self::new(&vec![0; size.len()], size)
    }

    /// Create an index space from `(min, max)` pairs
    pub fn from_ranges(ranges: &[(i64, i64)]) -> Self {
        let (min, max): (Vec<_>, Vec<_>) = ranges.iter().copied().unzip();
        Self::new(&min, &max)
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Minimum index along an axis
    pub fn min(&self, dim: usize) -> i64 {
        self.min[..self.rank][dim]
    }

    /// Maximum (exclusive) index along an axis
    pub fn max(&self, dim: usize) -> i64 {
        self.max[..self.rank][dim]
    }

    /// Minimum indices along all axes
    pub fn min_indices(&self) -> &[i64] {
        &self.min[..self.rank]
    }

    /// Maximum indices along all axes
    pub fn max_indices(&self) -> &[i64] {
        &self.max[..self.rank]
    }

    /// The `(min, max)` range along an axis
    pub fn range(&self, dim: usize) -> (i64, i64) {
        (self.min(dim), self.max(dim))
    }

    /// Number of indices along an axis
    pub fn extent(&self, dim: usize) -> i64 {
        self.max(dim) - self.min(dim)
    }

    /// Total number of indices
    pub fn size(&self) -> i64 {
        (0..self.rank).map(|d| self.extent(d)).product()
    }

    /// Does the space contain no indices?
    pub fn is_empty(&self) -> bool {
        (0..self.rank).any(|d| self.extent(d) == 0)
    }

    /// Append a trailing axis `[0, size)`
    pub fn append_dimension(&self, size: i64) -> Self {
        self.append_dimension_range(0, size)
    }

    /// Append a trailing axis `[min, max)`
    pub fn append_dimension_range(&self, min: i64, max: i64) -> Self {
        assert!(self.rank < MAX_RANK, "Index spaces support at most {MAX_RANK} axes");
        assert!(min <= max);
        let mut space = *self;
        space.min[self.rank] = min;
        space.max[self.rank] = max;
        space.rank += 1;
        space
    }

    /// Is a multi-index inside this space?
    pub fn contains(&self, index: &[i64]) -> bool {
        assert_eq!(index.len(), self.rank);
        izip!(index, self.min_indices(), self.max_indices())
            .all(|(i, lo, hi)| lo <= i && i < hi)
    }

    /// Largest index space contained in both spaces
    ///
    /// Disjoint spaces give an empty space whose bounds are clamped together.
    pub fn intersection(&self, other: &Self) -> Self {
        assert_eq!(self.rank, other.rank);
        let min = (0..self.rank)
            .map(|d| self.min(d).max(other.min(d)))
            .collect_vec();
        let max = (0..self.rank)
            .map(|d| self.max(d).min(other.max(d)).max(min[d]))
            .collect_vec();
        Self::new(&min, &max)
    }

    /// Position of a multi-index in a row-major buffer covering this space
    pub fn linear_index(&self, index: &[i64]) -> usize {
        debug_assert!(self.contains(index));
        let mut linear = 0;
        for d in 0..self.rank {
            linear = linear * self.extent(d) + (index[d] - self.min(d));
        }
        linear as usize
    }

    /// Iterate over every multi-index in row-major order (last axis fastest)
    pub fn iter(&self) -> IndexSpaceIter {
        IndexSpaceIter {
            space: *self,
            current: if self.is_empty() {
                None
            } else {
                Some(self.min)
            },
        }
    }

    /// Allocate a default-initialised row-major buffer with one entry per index
    pub fn create_buffer<T: Default + Clone>(&self) -> Vec<T> {
        vec![T::default(); self.size() as usize]
    }
}

impl From<&[i64]> for IndexSpace {
    fn from(size: &[i64]) -> Self {
        Self::from_sizes(size)
    }
}

impl From<Vec<i64>> for IndexSpace {
    fn from(size: Vec<i64>) -> Self {
        Self::from_sizes(&size)
    }
}

impl<const N: usize> From<[i64; N]> for IndexSpace {
    fn from(size: [i64; N]) -> Self {
        Self::from_sizes(&size)
    }
}

impl From<&[(i64, i64)]> for IndexSpace {
    fn from(ranges: &[(i64, i64)]) -> Self {
        Self::from_ranges(ranges)
    }
}

impl From<Vec<(i64, i64)>> for IndexSpace {
    fn from(ranges: Vec<(i64, i64)>) -> Self {
        Self::from_ranges(&ranges)
    }
}

impl<const N: usize> From<[(i64, i64); N]> for IndexSpace {
    fn from(ranges: [(i64, i64); N]) -> Self {
        Self::from_ranges(&ranges)
    }
}

impl fmt::Display for IndexSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            (0..self.rank)
                .map(|d| format!("[{}, {})", self.min(d), self.max(d)))
                .join(" x ")
        )
    }
}

impl<'a> IntoIterator for &'a IndexSpace {
    type Item = Vec<i64>;
    type IntoIter = IndexSpaceIter;

    fn into_iter(self) -> IndexSpaceIter {
        self.iter()
    }
}

/// Row-major iterator over the multi-indices of an [`IndexSpace`]
#[derive(Debug, Clone)]
pub struct IndexSpaceIter {
    space: IndexSpace,
    current: Option<[i64; MAX_RANK]>,
}

impl Iterator for IndexSpaceIter {
    type Item = Vec<i64>;

    fn next(&mut self) -> Option<Vec<i64>> {
        let rank = self.space.rank;
        let current = self.current?;
        let item = current[..rank].to_vec();

        let mut next = current;
        self.current = None;
        for d in (0..rank).rev() {
            next[d] += 1;
            if next[d] < self.space.max[d] {
                self.current = Some(next);
                break;
            }
            next[d] = self.space.min[d];
        }
        Some(item)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_size_constructors_agree() {
        let a = IndexSpace::from_sizes(&[18, 22, 5]);
        let b = IndexSpace::from(vec![18, 22, 5]);
        let c = IndexSpace::from([18, 22, 5]);
        let d = IndexSpace::new(&[0, 0, 0], &[18, 22, 5]);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
        assert_eq!(a.rank(), 3);
        assert_eq!(a.size(), 18 * 22 * 5);
    }

    #[test]
    fn test_range_constructors_agree() {
        let a = IndexSpace::new(&[4, 3, -2], &[8, 9, 7]);
        let b = IndexSpace::from_ranges(&[(4, 8), (3, 9), (-2, 7)]);
        let c = IndexSpace::from(vec![(4, 8), (3, 9), (-2, 7)]);
        let d = IndexSpace::from([(4, 8), (3, 9), (-2, 7)]);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
        assert_eq!(a.min_indices(), &[4, 3, -2]);
        assert_eq!(a.max_indices(), &[8, 9, 7]);
        assert_eq!(a.range(1), (3, 9));
        assert_eq!(a.extent(2), 9);
        assert_eq!(a.size(), 4 * 6 * 9);
    }

    #[test]
    fn test_inequality() {
        let a = IndexSpace::new(&[4, 3], &[8, 9]);
        assert_ne!(a, IndexSpace::new(&[4, 3], &[8, 10]));
        assert_ne!(a, IndexSpace::new(&[5, 3], &[8, 9]));
        assert_ne!(a, IndexSpace::new(&[4, 3, 0], &[8, 9, 1]));
    }

    #[test]
    fn test_empty() {
        let a = IndexSpace::new(&[4, 3, 1], &[8, 3, 5]);
        assert_eq!(a.extent(1), 0);
        assert_eq!(a.size(), 0);
        assert!(a.is_empty());
        assert_eq!(a.iter().count(), 0);
    }

    #[test]
    fn test_append_dimension() {
        let cells = IndexSpace::new(&[2, 5], &[7, 9]);
        let vectors = cells.append_dimension(3);
        assert_eq!(vectors.rank(), 3);
        assert_eq!(vectors.range(0), (2, 7));
        assert_eq!(vectors.range(1), (5, 9));
        assert_eq!(vectors.range(2), (0, 3));
        assert_eq!(vectors.size(), cells.size() * 3);

        let shifted = cells.append_dimension_range(-1, 4);
        assert_eq!(shifted, IndexSpace::new(&[2, 5, -1], &[7, 9, 4]));
    }

    #[test]
    #[should_panic]
    fn test_append_beyond_max_rank() {
        IndexSpace::from_sizes(&[1, 2, 3, 4]).append_dimension(5);
    }

    #[test]
    #[should_panic]
    fn test_axis_out_of_range() {
        IndexSpace::from_sizes(&[1, 2]).extent(2);
    }

    #[test]
    fn test_iter_row_major() {
        let space = IndexSpace::new(&[1, -1], &[3, 2]);
        let indices = space.iter().collect_vec();
        assert_eq!(indices.len(), 6);
        assert_eq!(indices[0], vec![1, -1]);
        assert_eq!(indices[1], vec![1, 0]);
        assert_eq!(indices[3], vec![2, -1]);
        assert_eq!(indices[5], vec![2, 1]);
        for (n, index) in indices.iter().enumerate() {
            assert_eq!(space.linear_index(index), n);
        }
    }

    #[test]
    fn test_contains_and_intersection() {
        let a = IndexSpace::new(&[0, 0], &[10, 10]);
        let b = IndexSpace::new(&[5, -3], &[12, 4]);
        assert!(a.contains(&[9, 0]));
        assert!(!a.contains(&[10, 0]));
        assert_eq!(a.intersection(&b), IndexSpace::new(&[5, 0], &[10, 4]));

        let c = IndexSpace::new(&[20, 0], &[30, 10]);
        assert!(a.intersection(&c).is_empty());
    }

    #[test]
    fn test_create_buffer() {
        let space = IndexSpace::new(&[3, 3, 0], &[5, 7, 2]);
        let buffer = space.create_buffer::<f64>();
        assert_eq!(buffer.len(), 16);
        assert!(buffer.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_display() {
        let space = IndexSpace::new(&[0, -2], &[4, 3]);
        assert_eq!(format!("{space}"), "[0, 4) x [-2, 3)");
    }
}
