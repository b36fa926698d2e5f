use serde::{Deserialize, Serialize};

/// Status value of a successful envelope.
pub const STATUS_OK: &str = "ok";

/// Uniform `{status, msg, data, data2}` wrapper returned by every endpoint.
///
/// List endpoints put the page rows in `data` and the collection total in
/// `data2`. Mutation endpoints only carry `status` and `msg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub status: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub data2: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Whether this is an error envelope carrying one of the denial messages.
    pub fn is_denied<S: AsRef<str>>(&self, denial_messages: &[S]) -> bool {
        !self.is_ok() && denial_messages.iter().any(|m| m.as_ref() == self.msg)
    }

    /// Collection total from `data2`, if it is a non-negative integer.
    pub fn total(&self) -> Option<u64> {
        self.data2.as_ref().and_then(|v| v.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_with_total() {
        let env: Envelope<Vec<serde_json::Value>> =
            serde_json::from_str(r#"{"status":"ok","msg":"","data":[{},{}],"data2":25}"#).unwrap();
        assert!(env.is_ok());
        assert_eq!(env.data.as_ref().map(Vec::len), Some(2));
        assert_eq!(env.total(), Some(25));
    }

    #[test]
    fn test_null_data_and_missing_fields() {
        let env: Envelope<Vec<serde_json::Value>> =
            serde_json::from_str(r#"{"status":"ok","data":null}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.total(), None);
        assert_eq!(env.msg, "");
    }

    #[test]
    fn test_denial_requires_error_status() {
        let denial = ["Unauthorized operation"];
        let err: Envelope =
            serde_json::from_str(r#"{"status":"error","msg":"Unauthorized operation"}"#).unwrap();
        assert!(err.is_denied(&denial));

        let other: Envelope =
            serde_json::from_str(r#"{"status":"error","msg":"quota exceeded"}"#).unwrap();
        assert!(!other.is_denied(&denial));

        let ok: Envelope =
            serde_json::from_str(r#"{"status":"ok","msg":"Unauthorized operation"}"#).unwrap();
        assert!(!ok.is_denied(&denial));
    }
}
