//! The JSON wrapper around every API response.
//!
//! # Design
//! Every body carries `status`. Successful responses may add `data`; failed
//! responses add `error`. Members that do not apply are omitted rather than
//! serialized as `null`, so `{"status":"ok"}` is a complete delete response.

use serde::{Deserialize, Serialize};

/// Value of the envelope's `status` member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Ok,
    Created,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Ok,
            data: Some(data),
            error: None,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Created,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    /// `{"status":"ok"}` with no payload.
    pub fn ok_empty() -> Self {
        Self {
            status: EnvelopeStatus::Ok,
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn created_carries_new_id() {
        let json = serde_json::to_value(Envelope::created(1_i64)).unwrap();
        assert_eq!(json, json!({"status": "created", "data": 1}));
    }

    #[test]
    fn ok_empty_has_only_status() {
        let json = serde_json::to_value(Envelope::ok_empty()).unwrap();
        assert_eq!(json, json!({"status": "ok"}));
    }

    #[test]
    fn error_carries_message() {
        let json = serde_json::to_value(Envelope::error("record not found: id 3")).unwrap();
        assert_eq!(json, json!({"status": "error", "error": "record not found: id 3"}));
    }

    #[test]
    fn parses_back_from_wire() {
        let env: Envelope<i64> = serde_json::from_str(r#"{"status":"created","data":42}"#).unwrap();
        assert_eq!(env.status, EnvelopeStatus::Created);
        assert_eq!(env.data, Some(42));
        assert!(env.error.is_none());
    }
}
