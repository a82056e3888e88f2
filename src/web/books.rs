//! Book page handlers, including the catalog home page

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
// Multi-value checkbox fields need the serde_html_form backed extractor
use axum_extra::extract::Form as MultiForm;
use serde::Deserialize;

use crate::{
    error::AppResult,
    forms::{parse_entity_id, BookForm},
    AppState,
};

use super::respond;

#[derive(Debug, Deserialize)]
pub struct DeleteBookForm {
    pub bookid: String,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.books.index().await?)
}

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.books.list().await?)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.books.detail(id).await?)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.books.create_get().await?)
}

pub async fn create_post(
    State(state): State<AppState>,
    MultiForm(form): MultiForm<BookForm>,
) -> AppResult<Response> {
    respond(&state, state.services.books.create_post(form).await?)
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.books.update_get(id).await?)
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MultiForm(form): MultiForm<BookForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.books.update_post(id, form).await?)
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.books.delete_get(id).await?)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Form(form): Form<DeleteBookForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&form.bookid)?;
    respond(&state, state.services.books.delete_post(id).await?)
}
