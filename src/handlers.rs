use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use log::{debug, info, warn};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::routes::{parse_route, Action, Route};
use crate::types::{AppState, Page};

/// Form posted by the edit page
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// `302 Found` pointing at `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Handle root path requests
pub async fn handle_root(State(state): State<AppState>) -> Response {
    found(&Action::View.path(&state.front_page))
}

/// Entry point for every path other than `/`.
///
/// Validates the path, then hands the title to the handler for its action.
/// Paths that do not match get a 404 without reaching any handler.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let Some(Route { action, title }) = parse_route(request.uri().path()) else {
        debug!("No route for {} {}", request.method(), request.uri().path());
        return WikiError::NotFound.into_response();
    };
    debug!("{} {} -> {} {:?}", request.method(), request.uri().path(), action, title);

    let result = match action {
        Action::View => view(&state, title).await,
        Action::Edit => edit(&state, title).await,
        Action::Save => save(&state, title, request).await,
    };
    result.unwrap_or_else(IntoResponse::into_response)
}

/// Show a rendered page, or send the user to the editor if it can't be loaded.
async fn view(state: &AppState, title: String) -> Result<Response, WikiError> {
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(_) => {
            debug!("Page {:?} not available, redirecting to editor", title);
            return Ok(found(&Action::Edit.path(&title)));
        }
    };
    let html = state.templates.render_view(&page)?;
    Ok(Html(html).into_response())
}

/// Show the edit form. A page that can't be loaded is edited as an empty one.
async fn edit(state: &AppState, title: String) -> Result<Response, WikiError> {
    let page = state.store.load(&title).unwrap_or_else(|_| Page::empty(title));
    let html = state.templates.render_edit(&page)?;
    Ok(Html(html).into_response())
}

async fn save(state: &AppState, title: String, request: Request) -> Result<Response, WikiError> {
    let Form(form) = match Form::<SaveForm>::from_request(request, state).await {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Rejected save of {:?}: {}", title, rejection);
            return Ok(rejection.into_response());
        }
    };

    let page = Page::new(title, form.body);
    state.store.save(&page)?;
    info!("Page {:?} updated", page.title);
    Ok(found(&Action::View.path(&page.title)))
}
