#![cfg_attr(not(test), deny(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::todo, clippy::unimplemented))]

pub mod config;
pub mod domain;
pub mod error;
pub mod routes;
pub mod store;
pub mod telemetry;
pub mod ws;

// Re-exports for public API
pub use config::Config;
pub use error::AppError;
pub use store::RoomStore;
pub use ws::registry::RoomRegistry;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    telemetry::init_test_tracing();
}
