use std::path::Path;

use log::info;
use serde::Serialize;
use tera::{Context, Tera};

use crate::errors::WikiError;
use crate::render::render_body;
use crate::types::Page;

pub const VIEW_TEMPLATE: &str = "view.html";
pub const EDIT_TEMPLATE: &str = "edit.html";

/// Values handed to a page template
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PageContext<'a> {
    title: &'a str,
    body: String,
}

/// The compiled `view` and `edit` templates.
///
/// Built once at startup and read-only afterwards. Tera auto-escapes `.html`
/// templates, so `Title` is always escaped; the view template marks the
/// pre-rendered `Body` as `safe`.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Load `view.html` and `edit.html` from `dir`. Fails if either file is
    /// missing or does not parse.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut tera = Tera::default();
        tera.add_template_files(vec![
            (dir.join(VIEW_TEMPLATE), Some(VIEW_TEMPLATE)),
            (dir.join(EDIT_TEMPLATE), Some(EDIT_TEMPLATE)),
        ])?;
        info!("Loaded templates from {:?}", dir);
        Ok(Self { tera })
    }

    /// Build from in-memory sources, mostly for tests and embedding.
    pub fn from_sources(view: &str, edit: &str) -> Result<Self, WikiError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(VIEW_TEMPLATE, view), (EDIT_TEMPLATE, edit)])?;
        Ok(Self { tera })
    }

    /// Page view with the body run through the renderer.
    pub fn render_view(&self, page: &Page) -> Result<String, WikiError> {
        let context = PageContext { title: &page.title, body: render_body(&page.body) };
        self.render(VIEW_TEMPLATE, &context)
    }

    /// Edit form pre-filled with the raw body text.
    pub fn render_edit(&self, page: &Page) -> Result<String, WikiError> {
        let context = PageContext { title: &page.title, body: page.body_text() };
        self.render(EDIT_TEMPLATE, &context)
    }

    fn render(&self, name: &str, page: &PageContext<'_>) -> Result<String, WikiError> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(name, &context)?)
    }
}
