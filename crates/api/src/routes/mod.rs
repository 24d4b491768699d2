pub mod categories;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /categories                                      list, create
/// /categories/{id}                                 get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/categories", categories::router())
}
