//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: PostgREST repositories and the GoTrue identity provider.
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod supabase;
