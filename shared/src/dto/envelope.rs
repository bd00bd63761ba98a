use serde::{Deserialize, Serialize};

/// Standard response wrapper: `{ "success": true, "message": "...", "data": ... }`.
///
/// `data` falls back to `T::default()` when the backend omits it, which is how
/// write endpoints answer when they have nothing to echo back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// `false` only when the backend explicitly said so.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_defaults() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "message": "ok"}"#).unwrap();
        assert!(envelope.is_success());
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_explicit_failure() {
        let envelope: ApiEnvelope<Option<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "Insufficient balance"}"#).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.message.as_deref(), Some("Insufficient balance"));
        assert_eq!(envelope.into_data(), None);
    }
}
