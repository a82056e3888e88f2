//! Genre page handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    forms::{parse_entity_id, GenreForm},
    AppState,
};

use super::respond;

/// Delete confirmations post the record id back in the form body
#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    pub genreid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.genres.list().await?)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.genres.detail(id).await?)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.genres.create_get().await?)
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    respond(&state, state.services.genres.create_post(form).await?)
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.genres.update_get(id).await?)
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.genres.update_post(id, form).await?)
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.genres.delete_get(id).await?)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Form(form): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&form.genreid)?;
    respond(&state, state.services.genres.delete_post(id).await?)
}
