use serde::{Deserialize, Serialize};

/// Sort direction as reported by a table header.
///
/// `None` means "server default order" and is never put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascend,
    Descend,
    #[default]
    None,
}

impl SortOrder {
    /// Wire value, or `None` when the order should be omitted.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortOrder::Ascend => Some("ascend"),
            SortOrder::Descend => Some("descend"),
            SortOrder::None => None,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascend" | "asc" => Ok(SortOrder::Ascend),
            "descend" | "desc" => Ok(SortOrder::Descend),
            "" | "none" => Ok(SortOrder::None),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// The collections the console can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Machine,
    Provider,
    Session,
}

impl ResourceKind {
    /// Singular endpoint noun (`add-machine`, `delete-machine`).
    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Machine => "machine",
            ResourceKind::Provider => "provider",
            ResourceKind::Session => "session",
        }
    }

    /// Plural endpoint noun (`get-machines`), also the route prefix.
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Machine => "machines",
            ResourceKind::Provider => "providers",
            ResourceKind::Session => "sessions",
        }
    }

    /// Human label used in notifications ("Machine added successfully").
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Machine => "Machine",
            ResourceKind::Provider => "Provider",
            ResourceKind::Session => "Session",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.plural())
    }
}

/// Online/history toggle on the session page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Connected,
    Disconnected,
}

impl SessionStatus {
    pub fn as_param(self) -> &'static str {
        match self {
            SessionStatus::Connected => "connected",
            SessionStatus::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}
