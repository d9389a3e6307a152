//! HTTP server for the CAS repository service.
//!
//! Exposes the coordinator over JSON endpoints. Payloads are hex-encoded on
//! the wire and every failure is rendered as `{kind, message}` with a status
//! chosen from the error kind.

pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::ApiError;
pub use server::CrsServer;
pub use state::AppState;
