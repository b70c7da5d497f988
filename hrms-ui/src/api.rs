//! API client for communicating with the HRMS backend

use crate::error::{extract_api_error, ApiError};
use async_trait::async_trait;
use hrms_common::dashboard::DashboardStats;
use hrms_common::employee::{BulkUploadReport, EmployeeRecord, EmployeeSummary};
use hrms_common::users::{CreateUserRequest, PasswordUpdate, UserAccount};
use hrms_common::{AuthError, Authenticator, LoginRequest, LoginResponse};
use reqwasm::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Compiled-in API root, overridable at build time with `HRMS_API_BASE_URL`
pub const API_BASE: &str = match option_env!("HRMS_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api",
};

/// URL of an uploaded document (photo or CV) served by the backend
pub fn file_url(path: &str) -> String {
    format!("{}/files/{}", API_BASE.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Thin reqwasm wrapper carrying the session's bearer token
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base_url: API_BASE.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: Request) -> Request {
        match &self.token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            Err(extract_api_error(response).await)
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        response.json().await.map_err(|e| ApiError {
            status,
            message: format!("unexpected response: {}", e),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Request::get(&self.url(path))).await?;
        Self::parse(response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let request = Request::post(&self.url(path))
            .header("Content-Type", "application/json")
            .body(to_json(body)?);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = Request::put(&self.url(path))
            .header("Content-Type", "application/json")
            .body(to_json(body)?);
        self.send(request).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Request::delete(&self.url(path))).await.map(|_| ())
    }

    /// Multipart upload. The browser sets the `Content-Type` boundary.
    async fn send_form(&self, request: Request, form: web_sys::FormData) -> Result<Response, ApiError> {
        self.send(request.body(form)).await
    }

    pub async fn list_employees(&self) -> Result<Vec<EmployeeSummary>, ApiError> {
        self.get_json("/employees").await
    }

    pub async fn get_employee(&self, code: &str) -> Result<EmployeeRecord, ApiError> {
        self.get_json(&format!("/employees/{}", urlencoding::encode(code))).await
    }

    pub async fn create_employee(&self, form: web_sys::FormData) -> Result<(), ApiError> {
        self.send_form(Request::post(&self.url("/employees")), form)
            .await
            .map(|_| ())
    }

    pub async fn update_employee(&self, code: &str, form: web_sys::FormData) -> Result<(), ApiError> {
        let url = self.url(&format!("/employees/{}", urlencoding::encode(code)));
        self.send_form(Request::put(&url), form).await.map(|_| ())
    }

    pub async fn bulk_upload(&self, form: web_sys::FormData) -> Result<BulkUploadReport, ApiError> {
        let response = self
            .send_form(Request::post(&self.url("/employees/bulk")), form)
            .await?;
        Self::parse(response).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/dashboard/stats").await
    }

    pub async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.get_json("/users").await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<(), ApiError> {
        let request = Request::post(&self.url("/users"))
            .header("Content-Type", "application/json")
            .body(to_json(request)?);
        self.send(request).await.map(|_| ())
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        self.delete(&format!("/users/{}", urlencoding::encode(username))).await
    }

    pub async fn update_password(&self, username: &str, new_password: &str) -> Result<(), ApiError> {
        let body = PasswordUpdate {
            new_password: new_password.to_string(),
        };
        self.put_json(&format!("/users/{}/password", urlencoding::encode(username)), &body)
            .await
    }
}

#[async_trait(?Send)]
impl Authenticator for ApiClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.post_json::<LoginResponse, _>("/auth/login", &body).await {
            Ok(response) => Ok(response),
            Err(e) if e.status == 401 => Err(AuthError::InvalidCredentials),
            Err(e) => Err(AuthError::Backend(e.user_message())),
        }
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError {
        status: 0,
        message: format!("failed to encode request: {}", e),
    })
}
