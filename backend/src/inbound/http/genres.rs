//! Genre handlers.
//!
//! ```text
//! GET  /api/genres
//! POST /api/genres {"name":"History"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::Genre;
use crate::domain::ports::CreateGenreRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/genres`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGenreBody {
    #[serde(default)]
    #[schema(example = "History")]
    pub name: String,
}

/// List every genre.
#[utoipa::path(
    get,
    path = "/api/genres",
    responses(
        (status = 200, description = "Genres", body = [Genre]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["genres"],
    operation_id = "listGenres",
    security([])
)]
#[get("/genres")]
pub async fn list_genres(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Genre>>> {
    Ok(web::Json(state.genres.list_genres().await?))
}

/// Create a genre with a unique name.
#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreBody,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid name", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["genres"],
    operation_id = "createGenre"
)]
#[post("/genres")]
pub async fn create_genre(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CreateGenreBody>,
) -> ApiResult<HttpResponse> {
    let genre = state
        .genres
        .create_genre(CreateGenreRequest {
            name: payload.into_inner().name,
            credential: caller.credential(),
        })
        .await?;
    Ok(HttpResponse::Created().json(genre))
}
