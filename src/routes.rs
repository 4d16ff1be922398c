use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static VALID_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").expect("valid path pattern"));

static VALID_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid title pattern"));

/// The three page actions the wiki understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Save,
    View,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Edit => "edit",
            Action::Save => "save",
            Action::View => "view",
        }
    }

    /// URL path for this action on `title`, e.g. `/view/FrontPage`
    pub fn path(&self, title: &str) -> String {
        format!("/{}/{}", self.as_str(), title)
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "edit" => Some(Action::Edit),
            "save" => Some(Action::Save),
            "view" => Some(Action::View),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request path that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    pub title: String,
}

/// Match a request path against `/{edit|save|view}/{title}`.
///
/// Returns `None` for anything else, including unknown actions, empty titles,
/// titles with non-alphanumeric characters and trailing segments.
pub fn parse_route(path: &str) -> Option<Route> {
    let caps = VALID_PATH.captures(path)?;
    let action = Action::from_segment(caps.get(1)?.as_str())?;
    let title = caps.get(2)?.as_str().to_string();
    Some(Route { action, title })
}

/// Page titles are one or more ASCII letters or digits.
pub fn is_valid_title(title: &str) -> bool {
    VALID_TITLE.is_match(title)
}
