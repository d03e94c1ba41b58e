//! HTTP API Client
//!
//! Functions for communicating with the Lost & Found backend API.
//!
//! Auth-protected calls take the token explicitly; callers read it just
//! before the request. Every request runs against a fixed timeout so the UI
//! never hangs on an unreachable backend.

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;

use crate::state::global::{ChatTurn, FoundItem};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Fixed timeout applied to every request
pub const REQUEST_TIMEOUT_MS: u32 = 5_000;

/// Local storage key for the API base override
const API_URL_KEY: &str = "smartmatch_api_url";

/// Local storage key for the auth token
const TOKEN_KEY: &str = "smartmatch_auth_token";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(API_URL_KEY) {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Read the stored auth token, if any
pub fn load_token() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(TOKEN_KEY).ok()?
}

/// Persist the auth token across sessions
pub fn store_token(token: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }
}

/// Remove the stored auth token
pub fn clear_token() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

// ============ Error Type ============

/// Error from an API call, carrying the HTTP status when one was received
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
    /// Error text the failure body carried, when it was a string
    pub server_text: Option<String>,
}

impl ApiError {
    fn network(detail: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Network error: {}", detail),
            server_text: None,
        }
    }

    fn build(detail: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Request build error: {}", detail),
            server_text: None,
        }
    }

    fn parse(detail: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Parse error: {}", detail),
            server_text: None,
        }
    }

    fn timeout() -> Self {
        Self {
            status: None,
            message: "Request timed out".to_string(),
            server_text: None,
        }
    }

    fn http(status: u16, server_text: Option<String>, detail: String) -> Self {
        Self {
            status: Some(status),
            message: status_message(status, detail),
            server_text,
        }
    }

    /// Whether the server rejected the token
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Map an HTTP failure status to the message shown to the user
fn status_message(status: u16, detail: String) -> String {
    match status {
        401 => "Unauthorized. Please log out and log back in.".to_string(),
        404 => "Endpoint not found (404). Check API path.".to_string(),
        _ => detail,
    }
}

/// Pull the server-sent error string out of a failure body, if it has one
///
/// Checks `detail` (Django Ninja) then `message` (register endpoint);
/// non-string fields such as validation arrays do not count.
fn extract_server_text(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("detail")
        .and_then(|v| v.as_str())
        .or_else(|| parsed.get("message").and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Most specific display text for a failure body
fn error_detail(body: &str) -> String {
    if let Some(text) = extract_server_text(body) {
        return text;
    }
    if serde_json::from_str::<serde_json::Value>(body).is_ok() {
        body.to_string()
    } else {
        "Unknown error occurred or server returned non-JSON data.".to_string()
    }
}

/// Turn a non-2xx response into an ApiError
async fn failure(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::http(status, extract_server_text(&body), error_detail(&body))
}

/// Race a request future against the fixed client-wide timeout
async fn with_timeout<T>(
    fut: impl std::future::Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    pin_mut!(fut);
    pin_mut!(timeout);

    match select(fut, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::timeout()),
    }
}

// ============ Wire Types ============

/// One prior conversation turn in the shape the chat endpoint expects
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HistoryPart {
    pub role: String,
    pub text: String,
}

/// Convert transcript turns into the history payload for the chat endpoint,
/// preserving order
pub fn history_payload(turns: &[ChatTurn]) -> Vec<HistoryPart> {
    turns
        .iter()
        .map(|turn| HistoryPart {
            role: turn.role.wire_name().to_string(),
            text: turn.text.clone(),
        })
        .collect()
}

/// Fields submitted when reporting a found item
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FoundItemDraft {
    pub item_name: String,
    pub description: String,
    pub location_found: String,
    pub contact_email: String,
}

// ============ API Functions ============

/// Exchange credentials for an auth token
///
/// Returns the token field as sent by the server, empty when absent.
pub async fn login(username: &str, password: &str) -> Result<String, ApiError> {
    #[derive(serde::Serialize)]
    struct LoginRequest {
        username: String,
        password: String,
    }

    #[derive(serde::Deserialize)]
    struct TokenResponse {
        #[serde(default)]
        token: String,
    }

    let url = join_base(&get_api_base(), "api/token-auth/");
    let body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    with_timeout(async move {
        let response = Request::post(&url)
            .json(&body)
            .map_err(ApiError::build)?
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        let result: TokenResponse = response.json().await.map_err(ApiError::parse)?;
        Ok(result.token)
    })
    .await
}

/// Register a new user account
pub async fn register(username: &str, password: &str, email: &str) -> Result<(), ApiError> {
    #[derive(serde::Serialize)]
    struct RegisterRequest {
        username: String,
        password: String,
        email: String,
    }

    let url = join_base(&get_api_base(), "api/ninja/core/register");
    let body = RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        email: email.to_string(),
    };

    with_timeout(async move {
        let response = Request::post(&url)
            .json(&body)
            .map_err(ApiError::build)?
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        Ok(())
    })
    .await
}

/// Send a chat message along with the preceding conversation history
pub async fn send_chat_message(
    token: &str,
    message: &str,
    history: Vec<HistoryPart>,
) -> Result<String, ApiError> {
    #[derive(serde::Serialize)]
    struct ChatRequest {
        message: String,
        history: Vec<HistoryPart>,
    }

    #[derive(serde::Deserialize)]
    struct ChatResponse {
        response: String,
    }

    let url = join_base(&get_api_base(), "api/ninja/core/chat");
    let auth = auth_header_value(token);
    let body = ChatRequest {
        message: message.to_string(),
        history,
    };

    with_timeout(async move {
        let response = Request::post(&url)
            .header("Authorization", &auth)
            .json(&body)
            .map_err(ApiError::build)?
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        let result: ChatResponse = response.json().await.map_err(ApiError::parse)?;
        Ok(result.response)
    })
    .await
}

/// Fetch all reported found items
pub async fn list_found_items(token: &str) -> Result<Vec<FoundItem>, ApiError> {
    let url = join_base(&get_api_base(), "api/ninja/core/found_items/");
    let auth = auth_header_value(token);

    with_timeout(async move {
        let response = Request::get(&url)
            .header("Authorization", &auth)
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(ApiError::parse)
    })
    .await
}

/// Report a newly found item
pub async fn report_found_item(
    token: &str,
    draft: &FoundItemDraft,
) -> Result<FoundItem, ApiError> {
    let url = join_base(&get_api_base(), "api/ninja/core/found_items/");
    let auth = auth_header_value(token);
    let body = draft.clone();

    with_timeout(async move {
        let response = Request::post(&url)
            .header("Authorization", &auth)
            .json(&body)
            .map_err(ApiError::build)?
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(ApiError::parse)
    })
    .await
}

/// Search found items by keywords, with an optional location hint
///
/// Served through the origin-relative proxy path rather than the configured
/// API base.
pub async fn search_items(
    token: &str,
    keywords: &str,
    location_hint: &str,
) -> Result<Vec<FoundItem>, ApiError> {
    let url = build_search_url(keywords, location_hint);
    let auth = auth_header_value(token);

    with_timeout(async move {
        let response = Request::get(&url)
            .header("Authorization", &auth)
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(ApiError::parse)
    })
    .await
}

/// Claim a found item by its id
///
/// Served through the origin-relative proxy path rather than the configured
/// API base.
pub async fn claim_item(token: &str, item_id: &str) -> Result<(), ApiError> {
    let url = format!("/api/core/claim_item/{}", item_id);
    let auth = auth_header_value(token);

    with_timeout(async move {
        // The endpoint expects an empty JSON body
        let response = Request::post(&url)
            .header("Authorization", &auth)
            .json(&serde_json::json!({}))
            .map_err(ApiError::build)?
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.ok() {
            return Err(failure(response).await);
        }

        Ok(())
    })
    .await
}

// ============ URL Helpers ============

/// Join a path onto the API base
fn join_base(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Build the search URL with encoded query parameters
fn build_search_url(keywords: &str, location_hint: &str) -> String {
    format!(
        "/api/core/search/?keywords={}&location_hint={}",
        urlencoding::encode(keywords.trim()),
        urlencoding::encode(location_hint.trim())
    )
}

/// Authorization header value for the token scheme used by the backend
fn auth_header_value(token: &str) -> String {
    format!("Token {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{ItemStatus, Role};

    #[test]
    fn test_join_base() {
        assert_eq!(
            join_base("http://127.0.0.1:8000", "api/token-auth/"),
            "http://127.0.0.1:8000/api/token-auth/"
        );
        assert_eq!(
            join_base("http://127.0.0.1:8000/", "/api/ninja/core/chat"),
            "http://127.0.0.1:8000/api/ninja/core/chat"
        );
    }

    #[test]
    fn test_build_search_url_encodes_params() {
        assert_eq!(
            build_search_url(" red wallet ", "locker room"),
            "/api/core/search/?keywords=red%20wallet&location_hint=locker%20room"
        );
        assert_eq!(
            build_search_url("keys", ""),
            "/api/core/search/?keywords=keys&location_hint="
        );
    }

    #[test]
    fn test_auth_header_value() {
        assert_eq!(auth_header_value("abc123"), "Token abc123");
    }

    #[test]
    fn test_history_payload_maps_roles_in_order() {
        let turns = vec![
            ChatTurn::user("I lost my keys"),
            ChatTurn::assistant("Where did you last see them?"),
            ChatTurn::user("Near the cafeteria"),
        ];

        let payload = history_payload(&turns);
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[0].role, "user");
        assert_eq!(payload[1].role, "model");
        assert_eq!(payload[2].role, "user");
        assert_eq!(payload[2].text, "Near the cafeteria");
    }

    #[test]
    fn test_history_payload_uses_wire_roles() {
        assert_eq!(Role::Assistant.wire_name(), "model");
        let payload = history_payload(&[ChatTurn::assistant("hi")]);
        assert_eq!(payload[0].role, "model");
    }

    #[test]
    fn test_status_message_mapping() {
        assert_eq!(
            status_message(401, "detail".to_string()),
            "Unauthorized. Please log out and log back in."
        );
        assert_eq!(
            status_message(404, "detail".to_string()),
            "Endpoint not found (404). Check API path."
        );
        assert_eq!(
            status_message(500, "Internal Server Error".to_string()),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_error_detail_precedence() {
        assert_eq!(error_detail(r#"{"detail": "No token"}"#), "No token");
        assert_eq!(
            error_detail(r#"{"message": "Username taken"}"#),
            "Username taken"
        );
        assert_eq!(
            error_detail(r#"{"detail": "first", "message": "second"}"#),
            "first"
        );
        // JSON without a usable string falls back to the raw body
        assert_eq!(error_detail(r#"{"other": 1}"#), r#"{"other": 1}"#);
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}]}"#),
            r#"{"detail": [{"msg": "field required"}]}"#
        );
        assert_eq!(
            error_detail("<html>boom</html>"),
            "Unknown error occurred or server returned non-JSON data."
        );
    }

    #[test]
    fn test_server_text_extraction() {
        assert_eq!(
            extract_server_text(r#"{"message": "Username already exists"}"#),
            Some("Username already exists".to_string())
        );
        assert_eq!(
            extract_server_text(r#"{"detail": "Unauthorized"}"#),
            Some("Unauthorized".to_string())
        );
        // Non-string fields are not server text
        assert_eq!(
            extract_server_text(r#"{"detail": [{"msg": "field required"}]}"#),
            None
        );
        assert_eq!(extract_server_text("<html>boom</html>"), None);
    }

    #[test]
    fn test_unauthorized_error() {
        let err = ApiError::http(401, None, "ignored".to_string());
        assert!(err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "Unauthorized. Please log out and log back in."
        );
        assert!(!ApiError::timeout().is_unauthorized());
    }

    #[test]
    fn test_found_item_deserializes() {
        let json = r#"{
            "item_id": "550e8400-e29b-41d4-a716-446655440000",
            "item_name": "Black Backpack",
            "description": "Nike, torn left strap",
            "location_found": "Library",
            "date_found": "2025-11-03",
            "status": "PENDING",
            "contact_email": null
        }"#;

        let item: FoundItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_name, "Black Backpack");
        assert_eq!(item.status, ItemStatus::Pending);
        assert!(item.contact_email.is_none());
    }

    #[test]
    fn test_found_item_draft_serializes() {
        let draft = FoundItemDraft {
            item_name: "Umbrella".to_string(),
            description: "Blue, wooden handle".to_string(),
            location_found: "Gym entrance".to_string(),
            contact_email: "finder@example.edu".to_string(),
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["item_name"], "Umbrella");
        assert_eq!(json["location_found"], "Gym entrance");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn token_storage_roundtrip() {
        clear_token();
        assert_eq!(load_token(), None);

        store_token("abc123");
        assert_eq!(load_token(), Some("abc123".to_string()));

        clear_token();
        assert_eq!(load_token(), None);
    }

    #[wasm_bindgen_test]
    fn api_base_roundtrip() {
        set_api_base("http://localhost:9001/");
        assert_eq!(get_api_base(), "http://localhost:9001");
    }
}
