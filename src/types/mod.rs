use std::sync::Arc;

use crate::components::Templates;
use crate::services::PageStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub templates: Arc<Templates>,
    pub front_page: Arc<str>,
}

impl AppState {
    pub fn new(store: PageStore, templates: Templates, front_page: &str) -> Self {
        Self {
            store: Arc::new(store),
            templates: Arc::new(templates),
            front_page: Arc::from(front_page),
        }
    }
}

/// A named unit of wiki content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// A page with no content, used when editing a title that was never saved
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// The body decoded as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
