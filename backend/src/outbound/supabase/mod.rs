//! Supabase outbound adapters.
//!
//! Data access goes through PostgREST (`rest/v1`) under the caller's
//! credential so row-level security decides visibility. Account management
//! goes through GoTrue (`auth/v1`).

mod answers;
mod choices;
mod client;
mod dto;
mod genres;
mod identity;
mod questions;

pub use answers::SupabaseAnswerRepository;
pub use choices::SupabaseChoiceRepository;
pub use client::{RestError, SupabaseClient};
pub use genres::SupabaseGenreRepository;
pub use identity::SupabaseIdentityProvider;
pub use questions::SupabaseQuestionRepository;
