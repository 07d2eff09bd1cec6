use crate::models::{MenuItem, Session};
use crate::storage::{clear_session, load_session};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const API_PREFIX: &str = "/api";
pub(crate) const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// 401/403 from any endpoint: the session is no longer valid.
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
        }
    }

    fn unauthorized(status: u16) -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            status: Some(status),
            message: format!("Unauthorized ({status})"),
        }
    }

    fn http(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            format!("Request failed ({status})")
        } else {
            body
        };
        Self {
            kind: ApiErrorKind::Http,
            status: Some(status),
            message,
        }
    }

    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if is_auth_failure(status) {
            Self::unauthorized(status)
        } else {
            Self::http(status, body)
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// Text suitable for an inline form error.
    pub fn user_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Network => SERVER_ERROR_MESSAGE.to_string(),
            _ => self.message.clone(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) fn is_auth_failure(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Maps a `/auth/register` reply. The body's `message` wins over the generic failure text.
fn register_outcome(status: u16, body: String) -> ApiResult<String> {
    let message = serde_json::from_str::<MessageResponse>(&body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty());

    if (200..300).contains(&status) {
        Ok(message.unwrap_or_default())
    } else {
        Err(ApiError::from_status(status, body)
            .with_message(message.unwrap_or_else(|| "Registration failed".to_string())))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8080".to_string();

        // `window.ENV.API_URL` is the documented knob; `api_url` is accepted as well.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub username: String,
}

impl From<LoginResponse> for Session {
    fn from(res: LoginResponse) -> Self {
        Session {
            token: res.token,
            username: res.username,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A file picked in the item editor, read into memory for the multipart upload.
#[derive(Clone, Debug)]
pub(crate) struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    /// Backend origin, e.g. `http://localhost:8080`. Endpoints live under `/api`.
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let mut client = Self::new(EnvConfig::new().api_url);
        client.token = load_session().map(|s| s.token);
        client
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn get_auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn logout(&mut self) {
        self.token = None;
        clear_session();
    }

    /// Origin that relative image paths resolve against.
    pub fn asset_origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.asset_origin(), API_PREFIX, path)
    }

    /// The search text is sent verbatim; only an empty string omits the parameter.
    pub(crate) fn menu_url(&self, search: &str) -> String {
        if search.is_empty() {
            self.endpoint("/menu")
        } else {
            format!(
                "{}?search={}",
                self.endpoint("/menu"),
                urlencoding::encode(search)
            )
        }
    }

    pub(crate) fn item_url(&self, id: i64) -> String {
        self.endpoint(&format!("/menu/{id}"))
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        Self::with_auth_headers(req, self.get_auth_token())
    }

    async fn send(req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, body))
        }
    }

    pub(crate) fn login_request(&self, username: &str, password: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .post(self.endpoint("/auth/login"))
            .json(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let res = Self::send(self.login_request(username, password))
            .await
            .map_err(|e| match e.kind {
                ApiErrorKind::Network => e,
                _ => e.with_message("Invalid credentials"),
            })?;

        let body: LoginResponse = res.json().await.map_err(ApiError::parse)?;
        Ok(body.into())
    }

    /// Returns the server's confirmation message on success.
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<String> {
        let res = reqwest::Client::new()
            .post(self.endpoint("/auth/register"))
            .json(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        register_outcome(status, body)
    }

    pub(crate) fn menu_request(&self, search: &str) -> reqwest::RequestBuilder {
        self.authorized(reqwest::Client::new().get(self.menu_url(search)))
    }

    pub async fn get_menu(&self, search: &str) -> ApiResult<Vec<MenuItem>> {
        Self::send(self.menu_request(search))
            .await?
            .json()
            .await
            .map_err(ApiError::parse)
    }

    /// `PUT /menu/{id}` when the item is persisted, `POST /menu` otherwise.
    pub(crate) fn save_request(&self, item: &MenuItem) -> reqwest::RequestBuilder {
        let client = reqwest::Client::new();
        let req = match item.id {
            Some(id) => client.put(self.item_url(id)),
            None => client.post(self.endpoint("/menu")),
        };
        self.authorized(req).json(item)
    }

    pub async fn save_item(&self, item: &MenuItem) -> ApiResult<()> {
        Self::dispatch(self.save_request(item)).await
    }

    pub(crate) fn delete_request(&self, id: i64) -> reqwest::RequestBuilder {
        self.authorized(reqwest::Client::new().delete(self.item_url(id)))
    }

    /// Sends a prepared mutation and drops the response body.
    pub(crate) async fn dispatch(req: reqwest::RequestBuilder) -> ApiResult<()> {
        Self::send(req).await.map(|_| ())
    }

    /// Uploads an image and returns the stored URL from the plain-text body.
    pub async fn upload_image(&self, upload: ImageUpload) -> ApiResult<String> {
        let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        if !upload.mime.trim().is_empty() {
            part = part.mime_str(&upload.mime).map_err(ApiError::parse)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let req = reqwest::Client::new()
            .post(self.endpoint("/menu/upload"))
            .multipart(form);
        let res = Self::send(self.authorized(req)).await?;
        let url = res.text().await.map_err(ApiError::network)?;
        Ok(url.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_token(token: &str) -> ApiClient {
        let mut client = ApiClient::new("http://localhost:8080".to_string());
        client.set_token(token.to_string());
        client
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://localhost:8080".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
        assert!(client.token.is_none());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_auth_failure_statuses() {
        assert!(is_auth_failure(401));
        assert!(is_auth_failure(403));
        assert!(!is_auth_failure(400));
        assert!(!is_auth_failure(404));
        assert!(!is_auth_failure(500));
    }

    #[test]
    fn test_from_status_classifies_expired_session() {
        for status in [401, 403] {
            let e = ApiError::from_status(status, String::new());
            assert!(e.is_unauthorized());
            assert_eq!(e.status, Some(status));
        }

        let e = ApiError::from_status(500, "boom".to_string());
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.to_string(), "boom");
    }

    #[test]
    fn test_http_error_without_body_mentions_status() {
        let e = ApiError::from_status(404, "  ".to_string());
        assert_eq!(e.to_string(), "Request failed (404)");
    }

    #[test]
    fn test_user_message_hides_transport_details() {
        let e = ApiError {
            kind: ApiErrorKind::Network,
            status: None,
            message: "error sending request".to_string(),
        };
        assert_eq!(e.user_message(), SERVER_ERROR_MESSAGE);

        let e = ApiError::from_status(400, String::new()).with_message("Invalid credentials");
        assert_eq!(e.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_menu_url_without_search() {
        let client = ApiClient::new("http://localhost:8080/".to_string());
        assert_eq!(client.menu_url(""), "http://localhost:8080/api/menu");
    }

    #[test]
    fn test_menu_url_sends_search_verbatim() {
        let client = ApiClient::new("http://localhost:8080".to_string());
        assert_eq!(
            client.menu_url("   "),
            "http://localhost:8080/api/menu?search=%20%20%20"
        );
        assert_eq!(
            client.menu_url(" pizza"),
            "http://localhost:8080/api/menu?search=%20pizza"
        );
    }

    #[test]
    fn test_register_outcome_success_message() {
        let ok = register_outcome(200, r#"{"message":"User registered"}"#.to_string());
        assert_eq!(ok.ok().as_deref(), Some("User registered"));
    }

    #[test]
    fn test_register_outcome_conflict_uses_body_message() {
        let err = register_outcome(409, r#"{"message":"Username taken"}"#.to_string())
            .expect_err("409 should fail");
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(409));
        assert_eq!(err.user_message(), "Username taken");
    }

    #[test]
    fn test_register_outcome_auth_failure_is_unauthorized() {
        for status in [401, 403] {
            let err = register_outcome(status, String::new()).expect_err("should fail");
            assert_eq!(err.kind, ApiErrorKind::Unauthorized);
            assert!(err.is_unauthorized());
            assert_eq!(err.message, "Registration failed");
        }
    }

    #[test]
    fn test_menu_url_encodes_search() {
        let client = ApiClient::new("http://localhost:8080".to_string());
        assert_eq!(
            client.menu_url("mac & cheese"),
            "http://localhost:8080/api/menu?search=mac%20%26%20cheese"
        );
    }

    #[test]
    fn test_menu_request_carries_bearer_token() {
        let client = client_with_token("t1");
        let req = client.menu_request("").build().expect("request should build");
        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(req.url().as_str(), "http://localhost:8080/api/menu");
        assert_eq!(
            req.headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok()),
            Some("Bearer t1")
        );
    }

    #[test]
    fn test_menu_request_without_token_has_no_auth_header() {
        let client = ApiClient::new("http://localhost:8080".to_string());
        let req = client.menu_request("soup").build().expect("request should build");
        assert!(req.headers().get("Authorization").is_none());
    }

    #[test]
    fn test_delete_request_targets_item_path() {
        let client = client_with_token("t1");
        let req = client.delete_request(5).build().expect("request should build");
        assert_eq!(req.method(), reqwest::Method::DELETE);
        assert_eq!(req.url().path(), "/api/menu/5");
    }

    #[test]
    fn test_save_request_method_depends_on_id() {
        let client = client_with_token("t1");
        let mut item = MenuItem {
            id: None,
            name: "Soup".to_string(),
            description: String::new(),
            price: 4.0,
            category: "Appetizers".to_string(),
            image_url: None,
        };

        let create = client.save_request(&item).build().expect("request should build");
        assert_eq!(create.method(), reqwest::Method::POST);
        assert_eq!(create.url().path(), "/api/menu");

        item.id = Some(9);
        let update = client.save_request(&item).build().expect("request should build");
        assert_eq!(update.method(), reqwest::Method::PUT);
        assert_eq!(update.url().path(), "/api/menu/9");
    }

    #[test]
    fn test_login_request_body() {
        let client = ApiClient::new("http://localhost:8080".to_string());
        let req = client
            .login_request("a", "b")
            .build()
            .expect("request should build");
        assert_eq!(req.url().path(), "/api/auth/login");
        let body = req
            .body()
            .and_then(|b| b.as_bytes())
            .expect("json body should be buffered");
        let v: serde_json::Value = serde_json::from_slice(body).expect("body should be json");
        assert_eq!(v, serde_json::json!({"username": "a", "password": "b"}));
    }

    #[test]
    fn test_login_response_contract_deserialize() {
        let json = r#"{"token": "t1", "username": "a"}"#;
        let parsed: LoginResponse =
            serde_json::from_str(json).expect("login response should parse");
        let session: Session = parsed.into();
        assert_eq!(session.token, "t1");
        assert_eq!(session.username, "a");
    }

    #[test]
    fn test_message_response_contract_deserialize() {
        let parsed: MessageResponse =
            serde_json::from_str(r#"{"message": "Error: Username is already taken!"}"#)
                .expect("message response should parse");
        assert_eq!(
            parsed.message.as_deref(),
            Some("Error: Username is already taken!")
        );
    }
}
