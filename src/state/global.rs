//! Session State
//!
//! Reactive state shared across the app, plus the domain types for chat
//! turns and found items.

use leptos::*;

/// Session-wide state provided to all components
#[derive(Clone)]
pub struct SessionState {
    /// API auth token, None while logged out
    pub token: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Who authored a chat turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role name expected by the chat endpoint
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

/// One turn in the assistant conversation
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Lifecycle status of a found item
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Pending,
    Claimed,
    Returned,
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "PENDING",
            ItemStatus::Claimed => "CLAIMED",
            ItemStatus::Returned => "RETURNED",
        }
    }

    /// Color class for the status line in result cards
    pub fn badge_class(&self) -> &'static str {
        match self {
            ItemStatus::Claimed => "text-red-400",
            _ => "text-green-400",
        }
    }

    /// Only pending items can start a claim
    pub fn can_claim(&self) -> bool {
        matches!(self, ItemStatus::Pending)
    }
}

/// A reported found item as returned by the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FoundItem {
    pub item_id: String,
    pub item_name: String,
    pub description: String,
    pub location_found: String,
    /// ISO date (YYYY-MM-DD)
    pub date_found: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl FoundItem {
    /// Human-readable found date, falling back to the raw value
    pub fn date_display(&self) -> String {
        chrono::NaiveDate::parse_from_str(&self.date_found, "%Y-%m-%d")
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| self.date_found.clone())
    }
}

/// Provide session state to the component tree, restoring any stored token
pub fn provide_session_state() {
    provide_context(SessionState::new(crate::api::load_token()));
}

impl SessionState {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: create_rw_signal(token),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
        }
    }

    /// Whether a user is currently logged in. Reads the token reactively so
    /// callers inside a tracking scope re-run on login and logout.
    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    /// Mark the session as logged in
    pub fn login(&self, token: String) {
        self.token.set(Some(token));
    }

    /// Mark the session as logged out
    pub fn logout(&self) {
        self.token.set(None);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::User.wire_name(), "user");
        assert_eq!(Role::Assistant.wire_name(), "model");
    }

    #[test]
    fn test_chat_turn_constructors() {
        let turn = ChatTurn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "hello");
        assert_eq!(ChatTurn::assistant("hi").role, Role::Assistant);
    }

    #[test]
    fn test_status_claim_rules() {
        assert!(ItemStatus::Pending.can_claim());
        assert!(!ItemStatus::Claimed.can_claim());
        assert!(!ItemStatus::Returned.can_claim());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ItemStatus::Pending.label(), "PENDING");
        assert_eq!(ItemStatus::Claimed.label(), "CLAIMED");
        assert_eq!(ItemStatus::Returned.label(), "RETURNED");
    }

    #[test]
    fn test_date_display() {
        let mut item = sample_item();
        assert_eq!(item.date_display(), "Nov 3, 2025");

        item.date_found = "not-a-date".to_string();
        assert_eq!(item.date_display(), "not-a-date");
    }

    #[test]
    fn test_session_login_logout() {
        let runtime = create_runtime();

        let state = SessionState::new(None);
        assert!(!state.is_authenticated());

        state.login("abc123".to_string());
        assert!(state.is_authenticated());
        assert_eq!(state.token.get_untracked(), Some("abc123".to_string()));

        state.logout();
        assert!(!state.is_authenticated());
        assert_eq!(state.token.get_untracked(), None);

        runtime.dispose();
    }

    #[test]
    fn test_session_restores_initial_token() {
        let runtime = create_runtime();

        let state = SessionState::new(Some("stored".to_string()));
        assert!(state.is_authenticated());

        runtime.dispose();
    }

    #[test]
    fn test_is_authenticated_tracks_token() {
        let runtime = create_runtime();

        // A memo over the predicate must recompute across login and logout
        let state = SessionState::new(None);
        let state_for_gate = state.clone();
        let gate = create_memo(move |_| state_for_gate.is_authenticated());
        assert!(!gate.get_untracked());

        state.login("abc123".to_string());
        assert!(gate.get_untracked());

        state.logout();
        assert!(!gate.get_untracked());

        runtime.dispose();
    }

    fn sample_item() -> FoundItem {
        FoundItem {
            item_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            item_name: "Black Backpack".to_string(),
            description: "Nike, torn left strap".to_string(),
            location_found: "Library".to_string(),
            date_found: "2025-11-03".to_string(),
            status: ItemStatus::Pending,
            contact_email: None,
        }
    }
}
