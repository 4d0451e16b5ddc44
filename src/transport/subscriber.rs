use serde::Deserialize;
use serde_json::value::RawValue;

use super::number::TransportInt;
use crate::domain::{Subscriber, SubscriberCode};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON answer: {0}")]
    Json(#[from] serde_json::Error),

    #[error("answer contains a subscriber without code")]
    MissingCode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriberListJson {
    #[serde(default)]
    extended_subscriber_entries: Option<Vec<SubscriberJson>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriberJson {
    #[serde(default)]
    subscriber_code: Option<String>,
    #[serde(default)]
    region_id: Option<TransportInt>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    caf: Option<Box<RawValue>>,
    #[serde(default)]
    smartcards: Option<Vec<String>>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    last_expiry_time: Option<String>,
    #[serde(default)]
    created: Option<String>,
}

impl TryFrom<SubscriberJson> for Subscriber {
    type Error = TransportError;

    fn try_from(value: SubscriberJson) -> Result<Self, Self::Error> {
        let code = value
            .subscriber_code
            .and_then(|code| SubscriberCode::new(code).ok())
            .ok_or(TransportError::MissingCode)?;

        Ok(Self {
            code,
            region_id: value.region_id.map(TransportInt::value),
            first_name: value.first_name,
            last_name: value.last_name,
            country_code: value.country_code,
            caf: value.caf.map(|raw| raw.get().to_owned()),
            smartcards: value.smartcards.unwrap_or_default(),
            comment: value.comment,
            last_expiry_time: value.last_expiry_time,
            created: value.created,
        })
    }
}

/// Decode the answer of `getListOfExtendedSubscribers`.
pub fn decode_subscriber_list(json: &str) -> Result<Vec<Subscriber>, TransportError> {
    let parsed: SubscriberListJson = serde_json::from_str(json)?;
    parsed
        .extended_subscriber_entries
        .unwrap_or_default()
        .into_iter()
        .map(Subscriber::try_from)
        .collect()
}
