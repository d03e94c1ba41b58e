//! Pages
//!
//! Top-level view components for each application state.

pub mod chat;
pub mod login;
pub mod manual;
pub mod register;

pub use chat::Chat;
pub use login::Login;
pub use manual::ManualActions;
pub use register::Register;
