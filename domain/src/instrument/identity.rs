//! Identity normalization for merging detections across replicas

use crate::core::string::collapse_whitespace;
use serde::{Deserialize, Serialize};

/// String forms that all mean "no voice"
const ABSENT_VOICE_FORMS: [&str; 3] = ["", "null", "None"];

/// Check whether a raw voice value means "no voice"
pub fn is_absent_voice(voice: Option<&str>) -> bool {
    match voice {
        None => true,
        Some(v) => ABSENT_VOICE_FORMS.contains(&v.trim()),
    }
}

/// Lowercase, whitespace-collapsed, trimmed name; `None` for empty names
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    let collapsed = collapse_whitespace(name?);
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.to_lowercase())
    }
}

/// Trimmed voice with a single trailing period removed (`"1."` -> `"1"`)
pub fn normalize_voice(voice: Option<&str>) -> Option<String> {
    if is_absent_voice(voice) {
        return None;
    }
    let trimmed = voice?.trim();
    let stripped = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Merge key across analysis results: `(normalized_name, normalized_voice)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub name: Option<String>,
    pub voice: Option<String>,
}

impl IdentityKey {
    pub fn new(name: Option<&str>, voice: Option<&str>) -> Self {
        Self {
            name: normalize_name(name),
            voice: normalize_voice(voice),
        }
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        match &self.voice {
            Some(v) => write!(f, "{} [{}]", name, v),
            None => write!(f, "{}", name),
        }
    }
}
