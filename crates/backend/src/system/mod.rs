pub mod handlers;
pub mod menu;
pub mod middleware;
pub mod tracing;
