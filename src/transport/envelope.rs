use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::domain::{ApiFailure, Envelope};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no answer")]
    MissingAnswer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeJson {
    success: bool,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_tag: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    show_error_message: Option<bool>,
    #[serde(default)]
    show_error_tag: Option<bool>,
    #[serde(default)]
    answer: Option<Box<RawValue>>,
}

pub fn decode_envelope(json: &str) -> Result<Envelope, TransportError> {
    let parsed: EnvelopeJson = serde_json::from_str(json)?;

    let failure = non_empty(parsed.error_code).map(|code| ApiFailure {
        code,
        tag: non_empty(parsed.error_tag),
        message: non_empty(parsed.error_message),
        show_message: parsed.show_error_message.unwrap_or(false),
        show_tag: parsed.show_error_tag.unwrap_or(false),
    });

    Ok(Envelope {
        success: parsed.success,
        failure,
        answer: parsed.answer.map(|raw| raw.get().to_owned()),
    })
}

/// Decode the raw answer of an envelope into `T`.
///
/// Callers check [`Envelope::is_success`] first.
pub fn decode_answer<T: DeserializeOwned>(envelope: &Envelope) -> Result<T, TransportError> {
    let json = envelope
        .answer_json()
        .ok_or(TransportError::MissingAnswer)?;
    Ok(serde_json::from_str(json)?)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_success_keeps_raw_answer() {
        let json = r#"{"success": true, "answer": {"count": 1, "productEntries": []}}"#;
        let envelope = decode_envelope(json).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.failure(), None);
        assert_eq!(
            envelope.answer_json(),
            Some(r#"{"count": 1, "productEntries": []}"#)
        );
    }

    #[test]
    fn decode_failure_maps_error_fields() {
        let json = r#"
        {
          "success": false,
          "errorCode": "not_logged_in",
          "errorTag": "SESSION",
          "errorMessage": "You are not logged in",
          "showErrorMessage": true
        }
        "#;
        let envelope = decode_envelope(json).unwrap();
        assert!(!envelope.is_success());
        let failure = envelope.failure().unwrap();
        assert_eq!(failure.code, "not_logged_in");
        assert_eq!(failure.tag.as_deref(), Some("SESSION"));
        assert_eq!(failure.message.as_deref(), Some("You are not logged in"));
        assert!(failure.show_message);
        assert!(!failure.show_tag);
    }

    #[test]
    fn empty_error_code_is_not_a_failure() {
        let json = r#"{"success": true, "errorCode": "", "answer": true}"#;
        let envelope = decode_envelope(json).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.error_code(), None);
    }

    #[test]
    fn decode_rejects_non_envelope_bodies() {
        assert!(decode_envelope("{ not json }").is_err());
        assert!(decode_envelope("[]").is_err());
        assert!(decode_envelope(r#"{"answer": 1}"#).is_err());
    }

    #[test]
    fn decode_answer_handles_scalars_and_missing_answer() {
        let envelope = decode_envelope(r#"{"success": true, "answer": "abc"}"#).unwrap();
        assert_eq!(decode_answer::<String>(&envelope).unwrap(), "abc");

        let envelope = decode_envelope(r#"{"success": true, "answer": null}"#).unwrap();
        assert!(matches!(
            decode_answer::<bool>(&envelope),
            Err(TransportError::MissingAnswer)
        ));
    }
}
