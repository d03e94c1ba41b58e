//! State Management
//!
//! Session-wide reactive state and the shared domain types.

pub mod global;

pub use global::{provide_session_state, ChatTurn, FoundItem, ItemStatus, Role, SessionState};
