pub mod model;
pub mod query;
pub mod repo;

use crate::AppState;
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use model::{JsonBook, JsonBookPage, JsonBookSample};
use query::{ListParams, ListQuery, RandomParams};

pub fn books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books_handler))
        .route("/random", get(random_books_handler))
        .route("/{id}", get(get_book_handler))
}

// query pairs are read as a list so a repeated key can't turn into a 400
async fn list_books_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<JsonBookPage>, ApiError> {
    let query = ListQuery::from_params(&ListParams::from_pairs(pairs));
    let page = repo::list_page(state.repo.as_ref(), &query).await?;

    Ok(Json(page.into()))
}

async fn random_books_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<JsonBookSample>, ApiError> {
    let limit = query::random_limit(&RandomParams::from_pairs(pairs));
    let books = state.repo.random_books(limit).await?;

    Ok(Json(JsonBookSample {
        items: books.into_iter().map(JsonBook::from).collect(),
    }))
}

// ids that aren't integers can't name a book, so they get the same 404
async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JsonBook>, ApiError> {
    let id = id.parse::<i64>().map_err(|_| ApiError::NotFound)?;

    match state.repo.get_book_by_id(id).await? {
        Some(book) => Ok(Json(book.into())),
        None => Err(ApiError::NotFound),
    }
}
