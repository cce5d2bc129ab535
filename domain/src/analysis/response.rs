//! Response parsing for multi-part and single-part analysis

use crate::core::error::DomainError;
use crate::core::string::truncate;
use crate::instrument::InstrumentRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Instruments proposed by one successful oracle call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub instruments: Vec<InstrumentRecord>,
}

impl AnalysisResult {
    pub fn new(instruments: Vec<InstrumentRecord>) -> Self {
        Self { instruments }
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Name and voice proposed for a single-part document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinglePartAnswer {
    pub name: Option<String>,
    pub voice: Option<String>,
}

/// Locate the outermost JSON object in `text`.
///
/// Handles bare JSON as well as objects wrapped in prose or a fenced code
/// block: everything from the first `{` to the last `}` is taken.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text[start..].rfind('}')?;
    Some(&text[start..start + end + 1])
}

fn parse_object(text: &str) -> Result<serde_json::Map<String, Value>, DomainError> {
    let json = extract_json_object(text).ok_or_else(|| {
        DomainError::MalformedResponse(format!("no JSON object in: {}", truncate(text, 80)))
    })?;

    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DomainError::MalformedResponse(
            "top-level value is not an object".to_string(),
        )),
        Err(e) => Err(DomainError::MalformedResponse(format!("invalid JSON: {e}"))),
    }
}

/// Parse a multi-part answer of the form `{"instruments": [...]}`.
///
/// # Examples
///
/// ```
/// use score_domain::parse_analysis_response;
///
/// let text = r#"Sure! {"instruments": [{"name": "Horn", "voice": 2, "start_page": 3, "end_page": 4}]}"#;
/// let result = parse_analysis_response(text).unwrap();
/// assert_eq!(result.instruments[0].voice.as_deref(), Some("2"));
///
/// assert!(parse_analysis_response(r#"{"parts": []}"#).is_err());
/// ```
pub fn parse_analysis_response(text: &str) -> Result<AnalysisResult, DomainError> {
    let mut object = parse_object(text)?;

    let Some(Value::Array(items)) = object.remove("instruments") else {
        return Err(DomainError::MalformedResponse(
            "missing \"instruments\" array".to_string(),
        ));
    };

    let instruments = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(DomainError::MalformedResponse(format!(
                    "instrument #{} is not an object",
                    i + 1
                )));
            }
            serde_json::from_value::<InstrumentRecord>(item).map_err(|e| {
                DomainError::MalformedResponse(format!("instrument #{}: {e}", i + 1))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisResult { instruments })
}

/// Parse a single-part answer of the form `{"name": ..., "voice": ...}`.
///
/// `name` must be a string; an answer without one is malformed.
pub fn parse_single_part_response(text: &str) -> Result<SinglePartAnswer, DomainError> {
    let object = parse_object(text)?;

    let Some(Value::String(name)) = object.get("name") else {
        return Err(DomainError::MalformedResponse(
            "missing \"name\" string".to_string(),
        ));
    };

    let voice = match object.get("voice") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(SinglePartAnswer {
        name: Some(name.clone()),
        voice,
    })
}
