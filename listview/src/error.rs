use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Envelope came back with `status != "ok"`.
    #[error("server error: {0}")]
    Server(String),

    /// The caller may not view or act on the collection.
    #[error("access denied: {0}")]
    Denied(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column {0} is not server-sortable")]
    NotSortable(String),

    #[error("column {0} is not searchable")]
    NotSearchable(String),

    #[error("{value} is not a filter option of column {column}")]
    InvalidOption { column: String, value: String },

    #[error("invalid table binding: {0}")]
    Binding(String),

    #[error("row index {index} out of range for {len} rows")]
    RowIndex { index: usize, len: usize },

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("operation not permitted: {0}")]
    Forbidden(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("list page has been torn down")]
    TornDown,
}

impl ConsoleError {
    /// Whether this error should switch the page into its access-denied view.
    pub fn is_denied(&self) -> bool {
        matches!(self, ConsoleError::Denied(_))
    }

    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Server(msg) | ConsoleError::Denied(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
