//! Shared range types. All sequence coordinates in this crate are 1-based and
//! inclusive; these types make that explicit instead of scattering `+1`/`-1`
//! adjustments through the algorithms.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// An inclusive integer range over 1-based positions. Empty when `end < start`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Encode, Decode, Serialize, Deserialize)]
pub struct RangeIncl {
    pub start: usize,
    pub end: usize,
}

impl RangeIncl {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The canonical empty range.
    pub const fn empty() -> Self {
        Self { start: 1, end: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of positions covered; 0 for an empty range.
    pub fn len(&self) -> usize {
        if self.end >= self.start {
            self.end - self.start + 1
        } else {
            0
        }
    }

    pub fn contains(&self, val: usize) -> bool {
        val >= self.start && val <= self.end
    }
}

impl Default for RangeIncl {
    fn default() -> Self {
        Self::empty()
    }
}

/// An inclusive floating-point range, e.g. an acceptable melting-temperature
/// window in °C.
#[derive(Clone, Copy, PartialEq, Debug, Encode, Decode, Serialize, Deserialize)]
pub struct RangeF {
    pub start: f64,
    pub end: f64,
}

impl RangeF {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, val: f64) -> bool {
        val >= self.start && val <= self.end
    }
}

/// Approximate equality for derived floating-point values (scores, melting
/// temperatures). Mirrors the fuzzy comparison the persistence layer relies
/// on when round-tripping.
pub fn fuzzy_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_incl_len_and_contains() {
        let r = RangeIncl::new(3, 7);
        assert_eq!(r.len(), 5);
        assert!(r.contains(3));
        assert!(r.contains(7));
        assert!(!r.contains(8));
        assert!(!r.is_empty());

        let single = RangeIncl::new(4, 4);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn range_incl_empty() {
        assert!(RangeIncl::empty().is_empty());
        assert_eq!(RangeIncl::empty().len(), 0);
        assert!(RangeIncl::new(5, 4).is_empty());
        assert!(!RangeIncl::new(5, 4).contains(5));
    }

    #[test]
    fn range_f() {
        let r = RangeF::new(55., 65.);
        assert!(r.is_valid());
        assert!(r.contains(55.));
        assert!(r.contains(60.5));
        assert!(!r.contains(65.001));
        assert!(!RangeF::new(2., 1.).is_valid());
    }
}
