use std::{error::Error, fmt, io};
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Error types for the wiki server
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    InvalidTitle(String),
    Template(tera::Error),
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "{}", e),
            WikiError::NotFound => write!(f, "404 page not found"),
            WikiError::InvalidTitle(t) => write!(f, "invalid page title: {:?}", t),
            WikiError::Template(e) => write!(f, "{}", unpack_error(e)),
        }
    }
}

impl Error for WikiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WikiError::Io(e) => Some(e),
            WikiError::Template(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl From<tera::Error> for WikiError {
    fn from(err: tera::Error) -> Self {
        WikiError::Template(err)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = match self {
            WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            WikiError::Io(_) | WikiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Join an error and its chain of sources into one line.
///
/// Tera buries the useful part (which variable, which line) in the source chain.
pub fn unpack_error(err: &dyn Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
