//! API Client
//!
//! HTTP access to the Lost & Found backend.

pub mod client;

pub use client::*;
