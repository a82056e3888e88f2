//! Author page handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    forms::{parse_entity_id, AuthorForm},
    AppState,
};

use super::respond;

#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.authors.list().await?)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.authors.detail(id).await?)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.authors.create_get().await?)
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    respond(&state, state.services.authors.create_post(form).await?)
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.authors.update_get(id).await?)
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.authors.update_post(id, form).await?)
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.authors.delete_get(id).await?)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&form.authorid)?;
    respond(&state, state.services.authors.delete_post(id).await?)
}
