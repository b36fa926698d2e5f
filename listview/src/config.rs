use crate::error::{ConsoleError, Result};

/// Organization whose administrators may list across every scope.
pub const BUILT_IN_ORG: &str = "built-in";

/// Envelope messages the backend uses to signal an authorization failure.
pub const DEFAULT_DENIAL_MESSAGES: &[&str] = &[
    "Unauthorized operation",
    "Please login first",
    "this operation requires admin privilege",
];

/// Configuration for the console client.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL for the console server (e.g. `http://localhost:19000`).
    pub server_url: String,
    /// Bearer token sent on every request, if any.
    pub access_token: Option<String>,
    /// Scope used by built-in administrators instead of "all scopes".
    pub scope_override: Option<String>,
    /// Initial page size for new list pages.
    pub page_size: u32,
    /// Error-envelope messages treated as a denial.
    pub denial_messages: Vec<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:19000".into(),
            access_token: None,
            scope_override: None,
            page_size: 10,
            denial_messages: DEFAULT_DENIAL_MESSAGES
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl ConsoleConfig {
    /// Check that `server_url` is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.server_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConsoleError::Config(format!(
                "server URL must be http or https, got {other}"
            ))),
        }
    }
}

/// The signed-in account a list page acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub owner: String,
    pub name: String,
    pub is_admin: bool,
}

impl Account {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, is_admin: bool) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            is_admin,
        }
    }

    /// Whether this account administers every organization.
    pub fn is_global_admin(&self) -> bool {
        self.is_admin && self.owner == BUILT_IN_ORG
    }

    /// Scope to send with list requests.
    ///
    /// Global administrators see every scope ("") unless an override is set;
    /// everyone else is confined to their own organization.
    pub fn request_scope(&self, scope_override: Option<&str>) -> String {
        if self.is_global_admin() {
            scope_override.unwrap_or_default().to_string()
        } else {
            self.owner.clone()
        }
    }

    /// Whether this account may delete a row owned by `owner`.
    pub fn can_delete(&self, owner: &str) -> bool {
        self.is_global_admin() || self.owner == owner
    }
}
