//! Authentication module for holding the session credential.
//!
//! This module provides:
//! - `Session`: The injectable session context read by the gate and the API client
//! - `TokenStore`: The get/set/clear contract behind a session
//! - `MemoryTokenStore`, `FileTokenStore`, `KeyringTokenStore`: Store backends
//!
//! The credential is an opaque bearer token. Its presence is the only signal
//! of being logged in; it is never inspected or expired client-side.

pub mod credentials;
pub mod session;

pub use credentials::KeyringTokenStore;
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionData, TokenStore};
