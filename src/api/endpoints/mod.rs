//! Endpoint handlers. Each takes the shared `CoreState` and delegates to the
//! form, analysis and rendering modules.

pub mod analyze;
pub mod health;
pub mod page;
pub mod state;
