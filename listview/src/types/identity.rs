use crate::error::{ConsoleError, Result};

/// Composite `owner/name` key of a resource row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    pub owner: String,
    pub name: String,
}

impl Identity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`, splitting on the first slash.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ConsoleError::InvalidIdentity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for Identity {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
