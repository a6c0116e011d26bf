//! The 500 page, its route handler, and a helper for rendering errors as a
//! full page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The text shown on the internal server error page.
pub struct InternalServerErrorPage<'a> {
    /// A short summary of what went wrong.
    pub description: &'a str,
    /// A hint for how the user might resolve the problem.
    pub fix: &'a str,
}

impl Default for InternalServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

/// Route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}

/// Render `page` as a 500 response.
pub fn render_internal_server_error(page: InternalServerErrorPage) -> Response {
    let markup = error_view("Error", "500", page.description, page.fix);

    (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response()
}
