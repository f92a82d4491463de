//! Client core for the wellness tracker.
//!
//! - [`auth`]: the session context holding the bearer credential
//! - [`routes`]: route table and the session gate
//! - [`api`]: the authenticated request pipeline and typed endpoints
//! - [`models`]: request/response payloads
//! - [`config`]: persisted client settings

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::Session;
pub use config::Config;
pub use routes::{GateDecision, NavigationLog, Navigator, Route, SessionGate};
