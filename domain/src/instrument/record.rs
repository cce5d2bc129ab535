//! Loosely-typed instrument records
//!
//! Oracle answers and caller-supplied part lists do not always agree on
//! types: voices come back as `"1"`, `1` or `null`, pages sometimes as
//! `"3"` or `3.0`. [`InstrumentRecord`] accepts all of them and keeps only
//! what is usable: voices are stringified, page fields survive only when
//! they are JSON integers.

use super::entities::InstrumentPart;
use crate::split::PageRange;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field whose absence makes a record unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    StartPage,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingField::Name => "name",
            MissingField::StartPage => "start_page",
        }
    }
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detection as it arrives at an ingestion boundary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub voice: Option<String>,
    #[serde(default, deserialize_with = "integer_only")]
    pub start_page: Option<i64>,
    #[serde(default, deserialize_with = "integer_only")]
    pub end_page: Option<i64>,
}

impl InstrumentRecord {
    pub fn new(name: impl Into<String>, voice: Option<&str>, start: i64, end: i64) -> Self {
        Self {
            name: Some(name.into()),
            voice: voice.map(str::to_string),
            start_page: Some(start),
            end_page: Some(end),
        }
    }

    /// Name with surrounding whitespace removed, `None` when blank
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// End page as observed, falling back to the start page when missing
    pub fn end_or_start(&self) -> Option<i64> {
        self.end_page.or(self.start_page)
    }

    /// Turn the record into a part whose range is valid for a document of
    /// `total_pages` pages.
    ///
    /// A missing end page defaults to the start page, an inverted range is
    /// swapped and both ends are clamped into `[1, total_pages]`. Records
    /// without a name or a start page cannot be placed and are rejected.
    pub fn normalize(&self, total_pages: u32) -> Result<InstrumentPart, MissingField> {
        let name = self.trimmed_name().ok_or(MissingField::Name)?;
        let start = self.start_page.ok_or(MissingField::StartPage)?;
        let range = PageRange::normalize(start, self.end_page, total_pages);

        Ok(InstrumentPart {
            name: name.to_string(),
            voice: self.voice.clone(),
            start_page: range.start(),
            end_page: range.end(),
        })
    }
}

impl From<&InstrumentPart> for InstrumentRecord {
    fn from(part: &InstrumentPart) -> Self {
        Self {
            name: Some(part.name.clone()),
            voice: part.voice.clone(),
            start_page: Some(i64::from(part.start_page)),
            end_page: Some(i64::from(part.end_page)),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn integer_only<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InstrumentRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_lenient_voice_types() {
        assert_eq!(parse(r#"{"voice": 2}"#).voice.as_deref(), Some("2"));
        assert_eq!(parse(r#"{"voice": "II"}"#).voice.as_deref(), Some("II"));
        assert_eq!(parse(r#"{"voice": null}"#).voice, None);
        assert_eq!(parse(r#"{}"#).voice, None);
    }

    #[test]
    fn test_pages_must_be_integers() {
        let record = parse(r#"{"name": "Flute", "start_page": 3, "end_page": 4.0}"#);
        assert_eq!(record.start_page, Some(3));
        assert_eq!(record.end_page, None);

        let record = parse(r#"{"name": "Flute", "start_page": "3"}"#);
        assert_eq!(record.start_page, None);
    }

    #[test]
    fn test_normalize_swaps_inverted_range() {
        let record = InstrumentRecord::new("Oboe", None, 10, 3);
        let part = record.normalize(20).unwrap();
        assert_eq!((part.start_page, part.end_page), (3, 10));
    }

    #[test]
    fn test_normalize_clamps_out_of_bounds() {
        let record = InstrumentRecord::new("Tuba", None, 50, 60);
        let part = record.normalize(20).unwrap();
        assert_eq!((part.start_page, part.end_page), (20, 20));
    }

    #[test]
    fn test_normalize_defaults_missing_end() {
        let record = parse(r#"{"name": "Harp", "start_page": 7}"#);
        let part = record.normalize(20).unwrap();
        assert_eq!((part.start_page, part.end_page), (7, 7));
    }

    #[test]
    fn test_normalize_rejects_missing_fields() {
        let no_name = parse(r#"{"name": "  ", "start_page": 1}"#);
        assert_eq!(no_name.normalize(5), Err(MissingField::Name));

        let no_start = parse(r#"{"name": "Viola", "end_page": 4}"#);
        assert_eq!(no_start.normalize(5), Err(MissingField::StartPage));
    }

    #[test]
    fn test_from_part_roundtrip_shape() {
        let part = InstrumentPart::new("Cello", None::<String>, 2, 9);
        let record = InstrumentRecord::from(&part);
        assert_eq!(record.normalize(12).unwrap(), part);
    }
}
