// ABOUTME: HTTP middleware for bearer authentication and cross-origin access
// ABOUTME: Route handlers call the auth middleware; CORS wraps the whole router

/// Bearer token authentication
pub mod auth;
/// CORS layer construction
pub mod cors;

pub use auth::{AuthMiddleware, AuthResult};
pub use cors::setup_cors;
