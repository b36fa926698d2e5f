use listview::{ConsoleError, ResourceKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CtlError {
    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is not on the requested page")]
    NotOnPage(String),

    #[error("session {0} is still connected; disconnect it instead")]
    LiveSession(String),

    #[error("access denied to {0}")]
    AccessDenied(ResourceKind),

    #[error("could not load {0}")]
    LoadFailed(ResourceKind),
}
