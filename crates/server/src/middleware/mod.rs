//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. CORS (dashboard and storefront origins)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//!
//! Caller identity is not a layer: handlers pull it per route with the
//! extractors in [`auth`], because public catalog reads must work
//! without one.

pub mod auth;
pub mod request_id;

pub use auth::{OptionalAuth, RequireAuth, USER_ID_HEADER};
pub use request_id::request_id_middleware;
