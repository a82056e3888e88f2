//! Controller outcomes and the rendering seam.
//!
//! Controllers never touch HTML themselves: they produce an [`Outcome`] that
//! either names a view and its data bag, or a URL to redirect to. The actual
//! template engine lives behind the [`Renderer`] trait.

use serde_json::Value;

use crate::error::{AppError, AppResult};

/// What a controller operation decided to do with the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Render the named view with the given data bag.
    Render { view: &'static str, data: Value },
    /// Redirect the browser to the given URL (303 See Other).
    Redirect(String),
}

impl Outcome {
    pub fn render(view: &'static str, data: Value) -> Self {
        Outcome::Render { view, data }
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Outcome::Redirect(to.into())
    }
}

/// Template engine seam. Implementations turn a view name and a flat data bag
/// into an HTML document.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, data: &Value) -> AppResult<String>;
}

/// Built-in renderer producing a bare HTML page with the data bag serialized
/// inline. Stands in until a template pack is plugged into the [`Renderer`]
/// seam.
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, view: &str, data: &Value) -> AppResult<String> {
        let title = data
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(view);
        let body = serde_json::to_string_pretty(data)
            .map_err(|e| AppError::Template(e.to_string()))?;
        Ok(format!(
            "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\
             <body><h1>{title}</h1><pre data-view=\"{view}\">{body}</pre></body></html>",
            title = crate::forms::escape_html(title),
            view = view,
            body = crate::forms::escape_html(&body),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_renderer_uses_title() {
        let html = PlainRenderer
            .render("genre_list", &json!({"title": "Genre List"}))
            .unwrap();
        assert!(html.contains("<title>Genre List</title>"));
        assert!(html.contains("data-view=\"genre_list\""));
    }

    #[test]
    fn test_outcome_constructors() {
        assert_eq!(
            Outcome::redirect("/catalog/genres"),
            Outcome::Redirect("/catalog/genres".to_string())
        );
        match Outcome::render("index", json!({})) {
            Outcome::Render { view, .. } => assert_eq!(view, "index"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
