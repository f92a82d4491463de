//! REST API client module for the wellness backend.
//!
//! This module provides the `ApiClient`, the one path every outbound
//! request takes. It attaches the session credential as a bearer token
//! and turns a 401 from any endpoint into a cleared session plus a forced
//! return to the login page.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
