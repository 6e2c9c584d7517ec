pub mod auth;
pub mod config;
pub mod tracing;

pub use auth::*;
pub use config::*;
pub use tracing::*;
