//! Instrument part entity

use serde::{Deserialize, Serialize};

/// A single instrument part with an optional voice/desk number and a
/// 1-indexed inclusive page range.
///
/// # Example
///
/// ```
/// use score_domain::InstrumentPart;
///
/// let part = InstrumentPart::new("Trumpet", Some("1"), 1, 5);
/// assert_eq!(part.page_count(), 5);
/// assert_eq!(part.label(), "Trumpet 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentPart {
    /// Instrument name (e.g., "Trumpet", "Alto Sax", "Clarinet in Bb")
    pub name: String,
    /// Voice/desk identifier (e.g., "1", "II"); `None` if not applicable
    pub voice: Option<String>,
    /// First page of the part (1-indexed)
    pub start_page: u32,
    /// Last page of the part (1-indexed, inclusive)
    pub end_page: u32,
}

impl InstrumentPart {
    pub fn new(
        name: impl Into<String>,
        voice: Option<impl Into<String>>,
        start_page: u32,
        end_page: u32,
    ) -> Self {
        Self {
            name: name.into(),
            voice: voice.map(Into::into),
            start_page,
            end_page,
        }
    }

    /// Number of pages covered (0 if the range is inverted)
    pub fn page_count(&self) -> u32 {
        if self.end_page < self.start_page {
            0
        } else {
            self.end_page - self.start_page + 1
        }
    }

    /// Human-readable label: name plus voice when present
    pub fn label(&self) -> String {
        match self.voice.as_deref().map(str::trim) {
            Some(v) if !super::is_absent_voice(Some(v)) => format!("{} {}", self.name, v),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_without_voice() {
        let part = InstrumentPart::new("Clarinet", None::<String>, 6, 12);
        assert_eq!(part.label(), "Clarinet");
        assert_eq!(part.page_count(), 7);
    }

    #[test]
    fn test_label_ignores_null_voice_strings() {
        let part = InstrumentPart::new("Horn", Some("null"), 1, 1);
        assert_eq!(part.label(), "Horn");
    }

    #[test]
    fn test_serde_shape() {
        let part = InstrumentPart::new("Trumpet", Some("1"), 1, 5);
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Trumpet", "voice": "1", "start_page": 1, "end_page": 5})
        );
    }
}
