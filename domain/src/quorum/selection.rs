//! Page endpoint selection: mode with median tie-break

use super::tally::Tally;

/// Median of `values`, rounded half away from zero.
///
/// `[2, 4]` gives 3 and `[8, 9]` gives 9. Returns `None` for no values.
pub fn median_rounded(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        let median = (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0;
        Some(median.round() as i64)
    }
}

/// Pick one page endpoint from the values the replicas observed.
///
/// The most frequent value wins when its count strictly exceeds the runner
/// up's; any tie at the top falls back to the rounded median of all values.
pub fn pick_page(values: &[i64]) -> Option<i64> {
    let tally: Tally<i64> = values.iter().copied().collect();
    let ranked = tally.ranked();
    match ranked.as_slice() {
        [] => None,
        [(only, _)] => Some(**only),
        [(first, top), (_, second), ..] if top > second => Some(**first),
        _ => median_rounded(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_mode_wins() {
        assert_eq!(pick_page(&[5, 5, 6]), Some(5));
        assert_eq!(pick_page(&[9, 3, 9, 3, 9]), Some(9));
    }

    #[test]
    fn test_two_way_tie_uses_median() {
        assert_eq!(pick_page(&[2, 4]), Some(3));
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(pick_page(&[8, 9]), Some(9));
        assert_eq!(median_rounded(&[2, 3, 4, 5]), Some(4));
    }

    #[test]
    fn test_tie_between_repeated_values() {
        // 1 and 7 both seen twice -> median of [1, 1, 7, 7] = 4
        assert_eq!(pick_page(&[1, 7, 7, 1]), Some(4));
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(pick_page(&[12]), Some(12));
        assert_eq!(pick_page(&[4, 4]), Some(4));
        assert_eq!(pick_page(&[]), None);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median_rounded(&[10, 1, 4]), Some(4));
    }
}
