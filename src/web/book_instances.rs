//! Book copy page handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    forms::{parse_entity_id, BookInstanceForm},
    AppState,
};

use super::respond;

#[derive(Debug, Deserialize)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.book_instances.list().await?)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.book_instances.detail(id).await?)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    respond(&state, state.services.book_instances.create_get().await?)
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    respond(&state, state.services.book_instances.create_post(form).await?)
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.book_instances.update_get(id).await?)
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(
        &state,
        state.services.book_instances.update_post(id, form).await?,
    )
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_entity_id(&id)?;
    respond(&state, state.services.book_instances.delete_get(id).await?)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Response> {
    let id = parse_entity_id(&form.bookinstanceid)?;
    respond(&state, state.services.book_instances.delete_post(id).await?)
}
