//! Wire types for the OpenAI Responses and Files APIs.
//!
//! - **Responses**: `POST /v1/responses` with one user message holding an
//!   `input_file` part and an `input_text` part
//! - **Files**: `GET /v1/files` to list, `POST /v1/files` (multipart) to upload

use score_application::{ContentRef, OracleRequest};
use serde::{Deserialize, Serialize};

/// Purpose attached to uploaded documents
pub const UPLOAD_PURPOSE: &str = "assistants";

/// Request body for `POST /v1/responses`
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Reasoning>,
}

impl ResponsesRequest {
    pub fn new(model: &str, request: &OracleRequest, reasoning_effort: Option<&str>) -> Self {
        let file = match &request.content {
            ContentRef::RemoteFile(id) => ContentPart::InputFile {
                file_id: Some(id.as_str().to_string()),
                file_url: None,
            },
            ContentRef::Url(url) => ContentPart::InputFile {
                file_id: None,
                file_url: Some(url.clone()),
            },
        };

        Self {
            model: model.to_string(),
            input: vec![InputMessage {
                role: "user",
                content: vec![
                    file,
                    ContentPart::InputText {
                        text: request.instructions.clone(),
                    },
                ],
            }],
            reasoning: reasoning_effort
                .filter(|e| !e.is_empty())
                .map(|effort| Reasoning {
                    effort: effort.to_string(),
                }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: &'static str,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    InputFile {
        #[serde(skip_serializing_if = "Option::is_none")]
        file_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_url: Option<String>,
    },
    InputText {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Reasoning {
    pub effort: String,
}

/// Response body of `POST /v1/responses` (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsesResponse {
    /// Model output text: the `output_text` convenience field when present,
    /// otherwise every `output_text` content part concatenated
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.output_text
            && !text.is_empty()
        {
            return Some(text.clone());
        }

        let joined: String = self
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|c| c.kind == "output_text")
            .filter_map(|c| c.text.as_deref())
            .collect();

        (!joined.is_empty()).then_some(joined)
    }
}

/// Response body of `GET /v1/files`
#[derive(Debug, Clone, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub data: Vec<FileObject>,
}

/// One file as reported by the Files API
#[derive(Debug, Clone, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: String,
}

/// Error envelope returned by the API on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
