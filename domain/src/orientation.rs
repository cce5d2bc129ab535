//! Page orientation planning
//!
//! A page is landscape when its media box is wider than it is tall. The
//! majority orientation wins once it passes a percentage threshold; every
//! page that disagrees is rotated a quarter turn.

use serde::{Deserialize, Serialize};

/// Default landscape share (in percent) above which a document is landscape
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 60.0;

/// Rotation applied to pages that do not match the target
pub const QUARTER_TURN: i64 = 90;

/// Media box dimensions of one page, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pages to rotate so the document shares one orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationPlan {
    pub target: Orientation,
    pub landscape_count: usize,
    pub total: usize,
    /// 1-based numbers of pages that need a quarter turn
    pub rotations: Vec<u32>,
}

impl OrientationPlan {
    /// Plan from page sizes in document order.
    ///
    /// The target is landscape only when the landscape share is strictly
    /// greater than `threshold_percent`. An empty document plans portrait
    /// with nothing to rotate.
    pub fn from_sizes(sizes: &[PageSize], threshold_percent: f64) -> Self {
        let total = sizes.len();
        let landscape_count = sizes
            .iter()
            .filter(|s| s.orientation() == Orientation::Landscape)
            .count();

        let target = if total > 0 && landscape_share(landscape_count, total) > threshold_percent {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };

        let rotations = sizes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.orientation() != target)
            .map(|(i, _)| i as u32 + 1)
            .collect();

        Self {
            target,
            landscape_count,
            total,
            rotations,
        }
    }

    pub fn landscape_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            landscape_share(self.landscape_count, self.total)
        }
    }

    pub fn is_noop(&self) -> bool {
        self.rotations.is_empty()
    }
}

fn landscape_share(landscape: usize, total: usize) -> f64 {
    landscape as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTRAIT: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };
    const LANDSCAPE: PageSize = PageSize {
        width: 842.0,
        height: 595.0,
    };

    fn pages(landscape: usize, portrait: usize) -> Vec<PageSize> {
        let mut sizes = vec![LANDSCAPE; landscape];
        sizes.extend(std::iter::repeat_n(PORTRAIT, portrait));
        sizes
    }

    #[test]
    fn test_landscape_majority_rotates_portrait_pages() {
        let plan = OrientationPlan::from_sizes(&pages(7, 3), DEFAULT_THRESHOLD_PERCENT);

        assert_eq!(plan.target, Orientation::Landscape);
        assert_eq!(plan.landscape_count, 7);
        assert_eq!(plan.rotations, vec![8, 9, 10]);
    }

    #[test]
    fn test_even_split_stays_portrait() {
        let plan = OrientationPlan::from_sizes(&pages(5, 5), DEFAULT_THRESHOLD_PERCENT);

        assert_eq!(plan.target, Orientation::Portrait);
        assert_eq!(plan.rotations, vec![1, 2, 3, 4, 5]);
        assert_eq!(plan.landscape_percent(), 50.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let plan = OrientationPlan::from_sizes(&pages(3, 2), 60.0);
        assert_eq!(plan.target, Orientation::Portrait);

        let plan = OrientationPlan::from_sizes(&pages(3, 2), 59.0);
        assert_eq!(plan.target, Orientation::Landscape);
    }

    #[test]
    fn test_square_page_is_portrait() {
        assert_eq!(PageSize::new(600.0, 600.0).orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_empty_document() {
        let plan = OrientationPlan::from_sizes(&[], DEFAULT_THRESHOLD_PERCENT);

        assert_eq!(plan.target, Orientation::Portrait);
        assert!(plan.is_noop());
        assert_eq!(plan.landscape_percent(), 0.0);
    }

    #[test]
    fn test_uniform_document_is_noop() {
        let plan = OrientationPlan::from_sizes(&pages(0, 4), DEFAULT_THRESHOLD_PERCENT);
        assert!(plan.is_noop());
    }
}
