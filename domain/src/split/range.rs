//! Inclusive, 1-indexed page ranges

use serde::{Deserialize, Serialize};

/// Inclusive 1-indexed page range with `1 <= start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Build a range that is valid for a document of `total_pages` pages.
    ///
    /// Missing `end` means a single page; inverted bounds are swapped; both
    /// bounds are clamped into `[1, total_pages]`.
    ///
    /// ```
    /// use score_domain::PageRange;
    ///
    /// let range = PageRange::normalize(10, Some(3), 20);
    /// assert_eq!((range.start(), range.end()), (3, 10));
    ///
    /// let range = PageRange::normalize(50, None, 20);
    /// assert_eq!((range.start(), range.end()), (20, 20));
    /// ```
    pub fn normalize(start: i64, end: Option<i64>, total_pages: u32) -> Self {
        let end = end.unwrap_or(start);
        let (lo, hi) = if start > end { (end, start) } else { (start, end) };
        let last = i64::from(total_pages.max(1));

        Self {
            start: lo.clamp(1, last) as u32,
            end: hi.clamp(1, last) as u32,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages in the range
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// A range always covers at least one page
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 1-indexed page numbers in order
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// 0-based page indices in order
    pub fn zero_based(&self) -> std::ops::Range<u32> {
        (self.start - 1)..self.end
    }

    /// Check whether two ranges share a page
    pub fn overlaps(&self, other: &PageRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "p. {}", self.start)
        } else {
            write!(f, "pp. {}-{}", self.start, self.end)
        }
    }
}
