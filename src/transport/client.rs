use std::io::Read;

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::ClientConfig;
use crate::request::{RequestBody, ToolRequest};

use super::{Result, TransportError};

const ERROR_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: Url,
    token: Option<String>,
    max_response_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub fn new(agent: ureq::Agent, base_url: Url) -> Self {
        Self {
            agent,
            base_url,
            token: None,
            max_response_bytes: ClientConfig::default().max_response_bytes,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config
            .base_url()
            .map_err(|error| TransportError::InvalidEndpoint(error.to_string()))?;
        let mut client = Self::new(config.agent(), base_url)
            .with_max_response_bytes(config.max_response_bytes);
        if let Some(token) = config.token() {
            client = client.with_token(token);
        }
        Ok(client)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_max_response_bytes(mut self, limit: u64) -> Self {
        self.max_response_bytes = limit;
        self
    }

    pub fn agent(&self) -> &ureq::Agent {
        &self.agent
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{}", path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|error| TransportError::InvalidEndpoint(format!("{joined}: {error}")))
    }

    #[tracing::instrument(skip(self, request), fields(tool = request.tool, path = %request.path))]
    pub fn execute(&self, request: &ToolRequest) -> Result<ApiResponse> {
        let url = self.endpoint(&request.path)?;
        let mut call = self.agent.request(request.method, url.as_str());
        if let Some(token) = &self.token {
            call = call.set("Authorization", &format!("Bearer {token}"));
        }

        let sent = match &request.body {
            RequestBody::Multipart(form) => {
                let encoded = form.encode();
                debug!(bytes = encoded.body.len(), "sending multipart form");
                call.set("Content-Type", &encoded.content_type)
                    .send_bytes(&encoded.body)
            }
            RequestBody::Json(body) => {
                let payload = body.to_string();
                debug!(bytes = payload.len(), "sending json body");
                call.set("Content-Type", "application/json")
                    .send_string(&payload)
            }
        };

        let response = match sent {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_capped(response, ERROR_SNIPPET_CHARS as u64 * 64).unwrap_or_default();
                return Err(TransportError::Status {
                    code,
                    message: server_message(&body),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(TransportError::Network(transport.to_string()));
            }
        };

        let status = response.status();
        let content_type = response.content_type().to_string();
        let bytes = read_capped(response, self.max_response_bytes)?;
        if bytes.len() as u64 > self.max_response_bytes {
            return Err(TransportError::TooLarge {
                limit: self.max_response_bytes,
            });
        }
        info!(status, content_type = %content_type, bytes = bytes.len(), "tool response received");
        Ok(ApiResponse {
            status,
            content_type,
            bytes,
        })
    }
}

pub trait RequestSender: Send + Sync {
    fn send(&self, request: &ToolRequest) -> Result<ApiResponse>;
}

impl RequestSender for ApiClient {
    fn send(&self, request: &ToolRequest) -> Result<ApiResponse> {
        self.execute(request)
    }
}

fn read_capped(response: ureq::Response, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Human-readable message from an error body: `detail`, `error` or
/// `message` of a JSON object, otherwise the leading text.
pub(crate) fn server_message(body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        for key in ["detail", "error", "message"] {
            match map.get(key) {
                Some(Value::String(text)) => return text.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "no details provided".to_string();
    }
    text.chars().take(ERROR_SNIPPET_CHARS).collect()
}
