//! Quiz backend library modules.
//!
//! The domain layer owns validation, identity resolution and ownership
//! rules. Inbound HTTP handlers and outbound Supabase adapters sit on either
//! side of the ports declared in [`domain::ports`].

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
