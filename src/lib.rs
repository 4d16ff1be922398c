//! wikid - a minimal wiki server
//!
//! Pages are plain text files, one per title, rendered to HTML with
//! `[Title]` references turned into links. Everything is served through
//! three routes: `/view/{title}`, `/edit/{title}` and `/save/{title}`.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod render;
pub mod routes;
pub mod services;
pub mod types;

use axum::{routing::get, Router};

// Re-export commonly used items
pub use components::Templates;
pub use config::Config;
pub use errors::WikiError;
pub use render::{escape, render_body};
pub use routes::{is_valid_title, parse_route, Action, Route};
pub use services::PageStore;
pub use types::{AppState, Page};

/// Build the HTTP router: `/` redirects to the front page, everything else
/// goes through the route dispatcher.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .fallback(handlers::dispatch)
        .with_state(state)
}
