//! HTTP inbound adapter exposing the quiz REST API.

pub mod accounts;
pub mod answers;
pub mod auth;
pub mod choices;
pub mod error;
pub mod genres;
pub mod health;
pub mod questions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::{ApiResult, ErrorBody};

/// Register every `/api` route.
///
/// Callers supply [`state::HttpState`] and the extractor configurations from
/// [`validation`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(accounts::sign_up)
            .service(accounts::login)
            .service(accounts::logout)
            .service(genres::list_genres)
            .service(genres::create_genre)
            .service(questions::list_questions)
            .service(questions::create_question)
            .service(questions::get_question)
            .service(questions::update_question)
            .service(questions::delete_question)
            .service(questions::my_questions)
            .service(answers::submit_answer)
            .service(answers::answers_by_question)
            .service(answers::answers_by_user)
            .service(choices::list_choices)
            .service(choices::create_choice)
            .service(choices::update_choice)
            .service(choices::delete_choice),
    );
}
