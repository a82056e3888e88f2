//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;

use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::{error::AppResult, views::Outcome, AppState};

/// Turn a controller outcome into an HTTP response. Renders go through the
/// application renderer, redirects become 303s so a POST never replays.
pub fn respond(state: &AppState, outcome: Outcome) -> AppResult<Response> {
    match outcome {
        Outcome::Render { view, data } => {
            let body = state.renderer.render(view, &data)?;
            Ok(Html(body).into_response())
        }
        Outcome::Redirect(target) => Ok(Redirect::to(&target).into_response()),
    }
}

/// The site root forwards to the catalog home page
pub async fn root_redirect() -> Redirect {
    Redirect::to("/catalog")
}
