//! Insertion-ordered frequency counter

/// Counts occurrences of values while remembering first appearance.
///
/// `most_common` breaks ties in favour of the value seen first, so results
/// do not depend on hash ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<T> {
    entries: Vec<(T, usize)>,
}

impl<T> Default for Tally<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialEq> Tally<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: T) {
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((value, 1)),
        }
    }

    /// Number of distinct values
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest count first; equal counts keep first-appearance order
    pub fn ranked(&self) -> Vec<(&T, usize)> {
        let mut ranked: Vec<_> = self.entries.iter().map(|(v, c)| (v, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn most_common(&self) -> Option<(&T, usize)> {
        self.ranked().into_iter().next()
    }
}

impl<T: PartialEq> FromIterator<T> for Tally<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for value in iter {
            tally.add(value);
        }
        tally
    }
}
