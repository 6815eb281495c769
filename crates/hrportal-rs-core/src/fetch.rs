//! Remote data fetcher: the seam every page uses to reach the backend.

use crate::error::PortalError;
use async_trait::async_trait;
use hrportal_rs_config::ApiConfig;
use hrportal_rs_protocol::DocumentUpload;
use log::{debug, warn};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form with fields `file`, `document_type`, and `description`.
    Upload(DocumentUpload),
}

/// A single request against a JSON resource, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn upload(mut self, upload: DocumentUpload) -> Self {
        self.body = RequestBody::Upload(upload);
        self
    }
}

/// Executes requests and yields the decoded JSON body.
///
/// An empty success body is returned as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, PortalError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, PortalError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn multipart(upload: DocumentUpload) -> reqwest::multipart::Form {
        let file = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("document_type", upload.document_type);
        match upload.description {
            Some(description) => form.text("description", description),
            None => form,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, PortalError> {
        let url = self.url(&request.path);
        debug!(
            "sending request (method={}, path={})",
            request.method.as_str(),
            request.path
        );
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Upload(upload) => builder.multipart(Self::multipart(upload)),
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = error_detail(&bytes);
            warn!(
                "request failed (method={}, path={}, status={})",
                request.method.as_str(),
                request.path,
                status.as_u16()
            );
            return Err(PortalError::Status {
                status: status.as_u16(),
                message,
            });
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pull the backend's `detail` field out of an error body, falling back to
/// the raw text.
fn error_detail(bytes: &[u8]) -> String {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::{ApiRequest, HttpTransport, Method, error_detail};
    use hrportal_rs_config::ApiConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_base_url_and_path_with_one_slash() {
        let transport = HttpTransport::new(&ApiConfig {
            base_url: "http://hr.local/api/".to_string(),
            ..ApiConfig::default()
        })
        .expect("transport");
        assert_eq!(
            transport.url("/announcements/"),
            "http://hr.local/api/announcements/"
        );
    }

    #[test]
    fn error_detail_prefers_backend_detail() {
        assert_eq!(
            error_detail(br#"{"detail": "Announcement not found"}"#),
            "Announcement not found"
        );
        assert_eq!(error_detail(b"Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn request_builder_collects_query_pairs() {
        let request = ApiRequest::get("/onboarding/analytics").query("range", "30d");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.query, vec![("range".to_string(), "30d".to_string())]);
    }
}
