//! # Smart Match UI
//!
//! Browser client for the Lost & Found Smart Match service, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - AI assistant chat for reporting, searching and claiming items
//! - Token-based login and registration
//! - Manual report/search/claim forms (kept available, not mounted)
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles
//! to WebAssembly. Everything sits behind a token gate: until a login
//! succeeds, only the login and register views render. The token is kept
//! in browser local storage and sent with every API call.

pub mod api;
pub mod app;
pub mod components;
pub mod pages;
pub mod state;

pub use app::App;
