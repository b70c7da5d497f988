///! API client for the HRMS backend

use anyhow::Result;
use async_trait::async_trait;
use hrms_common::{AuthError, Authenticator, LoginRequest, LoginResponse};
use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the bearer token sent with every request
    pub async fn set_token(&self, token: String) {
        let mut t = self.token.write().await;
        *t = Some(token);
    }

    pub async fn clear_token(&self) {
        let mut t = self.token.write().await;
        *t = None;
    }

    /// Build request with authentication header
    async fn build_request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");
        let mut request = self.client.request(method, &url);

        if let Some(token) = self.token.read().await.as_ref() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }

    /// Send and turn any non-2xx status into an error carrying the
    /// backend's message
    async fn execute(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed: {} - {}", status, error_message(&error_text));
        }

        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.build_request(reqwest::Method::GET, path).await;
        let data = Self::execute(request).await?.json().await?;
        Ok(data)
    }

    pub async fn post_empty<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.build_request(reqwest::Method::POST, path).await.json(body);
        Self::execute(request).await?;
        Ok(())
    }

    pub async fn put_empty<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.build_request(reqwest::Method::PUT, path).await.json(body);
        Self::execute(request).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.build_request(reqwest::Method::DELETE, path).await;
        Self::execute(request).await?;
        Ok(())
    }

    /// Multipart request; reqwest sets the boundary header
    pub async fn send_form(&self, method: reqwest::Method, path: &str, form: Form) -> Result<reqwest::Response> {
        let request = self.build_request(method, path).await.multipart(form);
        Self::execute(request).await
    }
}

#[async_trait(?Send)]
impl Authenticator for ApiClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .build_request(reqwest::Method::POST, "/api/auth/login")
            .await
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials),
            status if status.is_success() => response
                .json::<LoginResponse>()
                .await
                .map_err(|e| AuthError::Backend(format!("unexpected login response: {}", e))),
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(AuthError::Backend(format!("{} - {}", status, error_message(&text))))
            }
        }
    }
}

/// Human-readable message from an error body. JSON bodies are searched for
/// `detail`, `message` or `error`; anything else is returned trimmed.
pub fn error_message(body: &str) -> String {
    let body = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["detail", "message", "error"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_known_keys() {
        assert_eq!(error_message(r#"{"detail":"Employee not found"}"#), "Employee not found");
        assert_eq!(error_message(r#"{"code":7,"error":"boom"}"#), "boom");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"detail":42}"#), r#"{"detail":42}"#);
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
