//! Wire types for the reply endpoint.

use serde::{Deserialize, Serialize};

use parley_core::types::QuickOption;

/// Request body for the reply endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRequest<'a> {
    pub message: &'a str,
    pub user_id: &'a str,
}

/// Response body from the reply endpoint.
///
/// `options` is frequently absent; a missing or null-free field
/// deserializes to an empty set. Option fields beyond `label` ride along
/// untouched inside each `QuickOption`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplyPayload {
    pub reply: String,
    #[serde(default)]
    pub options: Vec<QuickOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_shape() {
        let req = ReplyRequest {
            message: "What is WASAPI?",
            user_id: "web-user",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "What is WASAPI?");
        assert_eq!(json["user_id"], "web-user");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_payload_without_options() {
        let payload: ReplyPayload = serde_json::from_str(r#"{"reply": "Hello"}"#).unwrap();
        assert_eq!(payload.reply, "Hello");
        assert!(payload.options.is_empty());
    }

    #[test]
    fn test_payload_with_options() {
        let payload: ReplyPayload = serde_json::from_str(
            r#"{"reply": "Pick one", "options": [{"label": "A"}, {"label": "B"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.options.len(), 2);
        assert_eq!(payload.options[0].label, "A");
        assert_eq!(payload.options[1].label, "B");
    }

    #[test]
    fn test_payload_options_keep_opaque_fields() {
        let payload: ReplyPayload = serde_json::from_str(
            r#"{"reply": "ok", "options": [{"label": "More", "intent": "expand", "rank": 1}]}"#,
        )
        .unwrap();
        let opt = &payload.options[0];
        assert_eq!(opt.label, "More");
        assert_eq!(opt.extra.get("intent").unwrap(), "expand");
        assert_eq!(opt.extra.get("rank").unwrap(), 1);
    }

    #[test]
    fn test_payload_missing_reply_is_error() {
        let result = serde_json::from_str::<ReplyPayload>(r#"{"options": []}"#);
        assert!(result.is_err());
    }
}
