//! OpenAI oracle gateway implementation

use super::error::{OpenAiError, Result};
use super::protocol::{
    ErrorEnvelope, FileList, ResponsesRequest, ResponsesResponse, UPLOAD_PURPOSE,
};
use crate::config::FileOracleConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use score_application::{GatewayError, OracleGateway, OracleRequest, RemoteFile, RemoteFileId};
use std::time::Duration;
use tracing::{debug, info};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Oracle gateway backed by the OpenAI HTTP API
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    reasoning_effort: Option<String>,
}

impl OpenAiGateway {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            reasoning_effort: None,
        })
    }

    /// Build from the `[oracle]` config section, reading the key from the
    /// configured environment variable
    pub fn from_config(config: &FileOracleConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| OpenAiError::MissingApiKey(config.api_key_env.clone()))?;

        info!("OpenAiGateway using model {} at {}", config.model, config.base_url);
        Ok(Self::new(api_key, &config.base_url, &config.model)?
            .with_reasoning_effort(Some(config.reasoning_effort.clone())))
    }

    pub fn with_reasoning_effort(mut self, effort: Option<String>) -> Self {
        self.reasoning_effort = effort.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    async fn list(&self) -> Result<Vec<RemoteFile>> {
        let response = self
            .client
            .get(self.url("files"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let list: FileList = check(response).await?.json().await?;

        Ok(list
            .data
            .into_iter()
            .map(|f| RemoteFile {
                id: RemoteFileId::new(f.id),
                filename: f.filename,
            })
            .collect())
    }

    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<RemoteFileId> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().text("purpose", UPLOAD_PURPOSE).part("file", part);

        let response = self
            .client
            .post(self.url("files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;
        let file: super::protocol::FileObject = check(response).await?.json().await?;

        debug!("Uploaded {} as {}", filename, file.id);
        Ok(RemoteFileId::new(file.id))
    }

    async fn responses(&self, request: &OracleRequest) -> Result<String> {
        let body = ResponsesRequest::new(&self.model, request, self.reasoning_effort.as_deref());

        let response = self
            .client
            .post(self.url("responses"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let parsed: ResponsesResponse = check(response).await?.json().await?;

        parsed
            .text()
            .ok_or_else(|| OpenAiError::UnexpectedResponse("response has no output text".into()))
    }
}

/// Turn non-2xx responses into [`OpenAiError::Api`], keeping the API's own
/// message when the body carries one
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body,
    };

    Err(OpenAiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl OracleGateway for OpenAiGateway {
    async fn list_files(&self) -> std::result::Result<Vec<RemoteFile>, GatewayError> {
        Ok(self.list().await?)
    }

    async fn upload_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> std::result::Result<RemoteFileId, GatewayError> {
        Ok(self.upload(filename, bytes).await?)
    }

    async fn respond(&self, request: &OracleRequest) -> std::result::Result<String, GatewayError> {
        Ok(self.responses(request).await?)
    }
}
