///! User-facing error handling for the UI
///!
///! Network and backend failures are never fatal: they become notices and
///! leave the session untouched.

use leptos::*;
use serde::{Deserialize, Serialize};

/// Failed API call. `status` is 0 when the request never reached the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self.status {
            0 => "Could not reach the server. Check your connection and try again.".to_string(),
            401 => "Your session has expired. Please log in again.".to_string(),
            403 => "You don't have permission to perform this action.".to_string(),
            404 => "The requested record was not found.".to_string(),
            409 => format!("Conflict: {}", self.message),
            500..=599 => "The server ran into a problem. Please try again later.".to_string(),
            _ => self.message.clone(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.status {
            400..=499 => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.status {
            0 => "🔌",
            401 => "🔐",
            403 => "🚫",
            404 => "🔍",
            409 => "⚡",
            _ => "❌",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.status, 0 | 502..=504)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_message())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

impl ErrorSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "alert-warning",
            ErrorSeverity::Error => "alert-error",
        }
    }
}

/// Inline error notice with optional retry and dismiss actions
#[component]
pub fn ErrorAlert(
    error: ApiError,
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let severity = error.severity();
    let retry = on_retry.filter(|_| error.is_retryable());

    view! {
        <div class=format!("alert {}", severity.class())>
            <div class="alert-icon">{error.icon()}</div>
            <div class="alert-content">
                <div class="alert-message">{error.user_message()}</div>
            </div>
            <div class="alert-actions">
                {retry.map(|on_retry| view! {
                    <button class="btn-secondary btn-sm" on:click=move |_| on_retry.call(())>
                        "Retry"
                    </button>
                })}
                {on_dismiss.map(|on_dismiss| view! {
                    <button class="btn-ghost btn-sm" on:click=move |_| on_dismiss.call(())>
                        "✕"
                    </button>
                })}
            </div>
        </div>
    }
}

/// Full-panel state shown when a page's data could not be loaded
#[component]
pub fn LoadingError(
    error: ApiError,
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="loading-error">
            <div class="loading-error-icon">{error.icon()}</div>
            <h3>"Failed to Load"</h3>
            <p>{error.user_message()}</p>
            {on_retry.map(|on_retry| view! {
                <button class="btn-primary" on:click=move |_| on_retry.call(())>
                    "Try Again"
                </button>
            })}
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(default = "📭")]
    icon: &'static str,
    title: String,
    description: String,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state-icon">{icon}</div>
            <h3>{title}</h3>
            <p>{description}</p>
        </div>
    }
}

/// Build an [`ApiError`] from a non-2xx response. The backend reports
/// failures as `{"detail": ...}` or `{"message": ...}`; anything else falls
/// back to the status code.
pub async fn extract_api_error(response: reqwasm::http::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError {
        status,
        message: error_message_from_body(&body).unwrap_or_else(|| format!("HTTP {}", status)),
    }
}

fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(status: u16, message: &str) -> ApiError {
        ApiError {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_user_message_by_status() {
        assert_eq!(
            error(401, "Unauthorized").user_message(),
            "Your session has expired. Please log in again."
        );
        assert_eq!(
            error(409, "Username already exists").user_message(),
            "Conflict: Username already exists"
        );
        assert_eq!(error(422, "Employee code is required").user_message(), "Employee code is required");
        assert!(ApiError::network("fetch failed").user_message().contains("Could not reach"));
    }

    #[test]
    fn test_severity() {
        assert_eq!(error(404, "").severity(), ErrorSeverity::Warning);
        assert_eq!(error(500, "").severity(), ErrorSeverity::Error);
        assert_eq!(ApiError::network("").severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_is_retryable() {
        assert!(ApiError::network("offline").is_retryable());
        assert!(error(503, "").is_retryable());
        assert!(!error(400, "").is_retryable());
        assert!(!error(500, "").is_retryable());
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"detail":"Employee not found"}"#).as_deref(),
            Some("Employee not found")
        );
        assert_eq!(
            error_message_from_body(r#"{"message":"bad input"}"#).as_deref(),
            Some("bad input")
        );
        assert_eq!(error_message_from_body("<html>"), None);
        assert_eq!(error_message_from_body(r#"{"detail":{"loc":[]}}"#), None);
    }
}
