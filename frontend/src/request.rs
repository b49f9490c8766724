// keep in sync with the backend's route table
use common::req::*;
use reqwest::{header::ACCEPT, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    config,
    error::Result,
    sse::{self, AlertStream},
};

/// Status and JSON body of a backend reply. The body is parsed whatever the
/// status; it is up to the caller to decide what a non-2xx reply means.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn parse<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.body)?)
    }

    /// Human readable text the backend put in the body, if any.
    pub fn message(&self) -> Option<&str> {
        ["message", "error", "detail"]
            .iter()
            .find_map(|key| self.body.get(key)?.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: http_client(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::api_base_url())
    }

    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.api_url(endpoint))
            .header(ACCEPT, "application/json");
        with_credentials(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Reply> {
        let resp = builder.send().await?;
        let status = resp.status();
        log::debug!("{} -> {status}", resp.url());
        let bytes = resp.bytes().await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(Reply { status, body })
    }

    async fn get(&self, endpoint: &str) -> Result<Reply> {
        self.send(self.request(Method::GET, endpoint)).await
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<Reply> {
        self.send(self.request(Method::POST, endpoint).json(body))
            .await
    }

    async fn put<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<Reply> {
        self.send(self.request(Method::PUT, endpoint).json(body))
            .await
    }

    // ===============================================
    // auth
    // ===============================================

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device_id: Option<&str>,
    ) -> Result<Reply> {
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            device_id: device_id.map(str::to_owned),
        };
        self.post("auth/login", &body).await
    }

    pub async fn logout(&self) -> Result<Reply> {
        self.send(self.request(Method::POST, "auth/logout")).await
    }

    // ===============================================
    // profile
    // ===============================================

    pub async fn profile(&self) -> Result<Reply> {
        self.get("users/me").await
    }

    /// Status of `GET /users/me` with the body left unread. Any 2xx means the
    /// session cookie is still good.
    pub async fn session_status(&self) -> Result<StatusCode> {
        let resp = self.request(Method::GET, "users/me").send().await?;
        log::debug!("{} -> {}", resp.url(), resp.status());
        Ok(resp.status())
    }

    pub async fn update_email(&self, email: &str) -> Result<Reply> {
        let body = EmailUpdate {
            email: email.to_owned(),
        };
        self.put("users/email", &body).await
    }

    pub async fn update_password(&self, password: &str) -> Result<Reply> {
        let body = PasswordUpdate {
            password: password.to_owned(),
        };
        self.put("users/password", &body).await
    }

    pub async fn update_phone(&self, phone: &str) -> Result<Reply> {
        let body = PhoneUpdate {
            phone: phone.to_owned(),
        };
        self.put("users/phone", &body).await
    }

    // ===============================================
    // devices
    // ===============================================

    pub async fn device_info(&self) -> Result<Reply> {
        self.get("devices/me").await
    }

    pub async fn device_status(&self) -> Result<Reply> {
        self.get("devices/status").await
    }

    pub async fn set_device_status(&self, device_id: &str, action: DeviceAction) -> Result<Reply> {
        let body = DeviceStatusChange {
            device_id: device_id.to_owned(),
            action,
        };
        self.post("devices/status", &body).await
    }

    // ===============================================
    // alerts
    // ===============================================

    pub async fn alerts(&self) -> Result<Reply> {
        self.get("alerts").await
    }

    /// Opens the server-push alert stream. `on_message` runs once per decoded
    /// alert until the returned handle is closed or dropped.
    pub fn alerts_sse(&self, on_message: impl FnMut(Alert) + 'static) -> Result<AlertStream> {
        sse::open(&self.api_url("sse/alerts"), on_message)
    }

    // ===============================================
    // password reset (no session)
    // ===============================================

    pub async fn request_password_reset(&self, email: &str) -> Result<Reply> {
        let body = PasswordResetRequest {
            email: email.to_owned(),
        };
        self.post("password-resets/request", &body).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Reply> {
        let body = PasswordReset {
            token: token.to_owned(),
            new_password: new_password.to_owned(),
        };
        self.post("password-resets/reset", &body).await
    }
}

#[cfg(target_arch = "wasm32")]
fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(not(target_arch = "wasm32"))]
fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

// the browser attaches the session cookie only in "include" mode
#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_endpoints_onto_base_url() {
        let api = ApiClient::new("https://home.example/api/");
        assert_eq!(api.api_url("users/me"), "https://home.example/api/users/me");
        assert_eq!(api.api_url("/sse/alerts"), "https://home.example/api/sse/alerts");
    }

    #[test]
    fn reply_message_prefers_message_field() {
        let reply = Reply {
            status: StatusCode::UNAUTHORIZED,
            body: json!({ "error": "unauthorized", "message": "Wrong password" }),
        };
        assert!(!reply.is_success());
        assert_eq!(reply.message(), Some("Wrong password"));

        let reply = Reply {
            status: StatusCode::OK,
            body: json!([1, 2]),
        };
        assert_eq!(reply.message(), None);
    }

    #[test]
    fn reply_parses_device_list() {
        let reply = Reply {
            status: StatusCode::OK,
            body: json!([{ "id": "d1", "name": "Front door", "status": "active" }]),
        };
        let devices: Vec<Device> = reply.parse().unwrap();
        assert_eq!(devices.len(), 1);
        assert!(devices[0].is_active());
    }

    #[test]
    fn reply_parse_reports_shape_mismatch() {
        let reply = Reply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "error": "boom" }),
        };
        assert!(reply.parse::<Vec<Device>>().is_err());
    }
}
