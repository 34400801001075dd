//! HTTP transport: configuration, handlers, middleware, lifecycle, and the
//! server module that ties them together.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod module;
pub mod shutdown;

pub use config::*;
pub use handlers::AppState;
pub use module::NetworkModule;
pub use shutdown::*;
