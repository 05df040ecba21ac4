//! # Remote Data Client
//!
//! [`ApiClient`] is the only place the admin client talks HTTP. Every request is
//! built from the configured base URL plus an absolute path (`"/admin/users"`),
//! and carries `Authorization: Bearer <token>` when a credential is set.
//!
//! ## Response handling
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx | Body decoded as JSON into the requested type (an empty body decodes as `null`). |
//! | non-2xx | [`ApiError::Status`] carrying the body's `message` (or `error`) field, else the status reason. |
//! | transport failure | [`ApiError::Network`] |
//! | 2xx with a body of the wrong shape | [`ApiError::Decode`] |
//!
//! There is no retry and no cache: each call is a fresh round trip and the
//! caller decides what a failure means.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Authenticated JSON client for the admin backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

/// A file attached to a multipart upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// A multipart request: one `file` part plus plain text fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

impl Upload {
    pub fn new(file: FilePart) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach `value` serialised as a JSON string field.
    pub fn json_field<T: Serialize>(self, name: &str, value: &T) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.field(name, encoded))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Attach (or clear) the bearer credential.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    /// GET with URL-encoded query parameters.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// POST a multipart form built from `upload`.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: Upload,
    ) -> Result<T, ApiError> {
        let Upload { file, fields } = upload;
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)?;
        let mut form = Form::new().part("file", part);
        for (name, value) in fields {
            form = form.text(name, value);
        }
        self.send(self.request(Method::POST, path).multipart(form))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request failed: {e}");
            ApiError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        decode(status, &body)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if status.is_success() {
        let body = if body.trim().is_empty() { "null" } else { body };
        return serde_json::from_str(body).map_err(ApiError::from);
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    tracing::debug!("Backend returned {status}: {message}");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::{json, Value};

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.url("/admin/users"), "http://localhost:5000/api/admin/users");
        assert_eq!(client.url("auth/login"), "http://localhost:5000/api/auth/login");
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let client = ApiClient::new("http://x").with_token(Some(String::new()));
        assert!(client.token().is_none());
    }

    #[test]
    fn test_decode_error_message() {
        let err = decode::<Value>(StatusCode::BAD_REQUEST, r#"{"message":"Invalid credentials"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "Invalid credentials".into()
            }
        );

        let err = decode::<Value>(StatusCode::NOT_FOUND, "<html>nope</html>").unwrap_err();
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_decode_empty_success_body() {
        let value: Value = decode(StatusCode::NO_CONTENT, "").unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/profile")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).with_token(Some("tok-1".into()));
        let body: Value = client.get("/auth/profile").await.unwrap();
        assert_eq!(body, json!({"ok": true}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/admin/users")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"users":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let _: Value = client.get("/admin/users").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_is_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/admin/users/search")
            .match_query(Matcher::UrlEncoded("q".into(), "al & co".into()))
            .with_status(200)
            .with_body(r#"{"users":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let _: Value = client
            .get_query("/admin/users/search", &[("q", "al & co")])
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_sends_json_and_maps_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/admin/tickets/7")
            .match_body(Matcher::Json(json!({"status": "Resolved"})))
            .with_status(500)
            .with_body(r#"{"error":"database unavailable"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client
            .put::<_, Value>("/admin/tickets/7", &json!({"status": "Resolved"}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message("Failed to update status"), "database unavailable");
    }

    #[tokio::test]
    async fn test_upload_is_multipart() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/admin/invoice")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="inv.pdf""#.into()),
                Matcher::Regex(r#"name="userId""#.into()),
                Matcher::Regex(r#"\{"amount":"120"\}"#.into()),
            ]))
            .with_status(201)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let upload = Upload::new(FilePart {
            file_name: "inv.pdf".into(),
            mime: "application/pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        })
        .field("userId", "u1")
        .json_field("invoiceData", &json!({"amount": "120"}))
        .unwrap();

        let client = ApiClient::new(server.url());
        let _: Value = client.upload("/admin/invoice", upload).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_network_error() {
        // Port 9 (discard) is never served by the test environment.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.get::<Value>("/admin/users").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
