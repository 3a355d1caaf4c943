//! HTTP surface of the agent.
//!
//! One browser page (`GET /`, `POST /analyze`) rendered on the server, plus a
//! small JSON API for the same analysis flow. `app_router()` returns a
//! `Router` that `server::start_server` mounts on a TCP listener.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::app_router;
pub use server::{start_server, AgentServer, ServerError};
