use serde::Deserialize;

use super::number::TransportInt;
use crate::domain::{Smartcard, SmartcardSn};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON answer: {0}")]
    Json(#[from] serde_json::Error),

    #[error("answer contains a smartcard without serial number")]
    MissingSerial,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmartcardListJson {
    #[serde(default)]
    smartcard_entries: Option<Vec<SmartcardJson>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmartcardJson {
    #[serde(default)]
    sn: Option<String>,
    #[serde(default)]
    subscriber_code: Option<String>,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    blacklisted: Option<bool>,
    #[serde(default)]
    defect: Option<bool>,
    #[serde(default)]
    disabled: Option<bool>,
    #[serde(default)]
    config_protected: Option<bool>,
    #[serde(default)]
    camlib_version: Option<String>,
    #[serde(default)]
    cas_ids: Option<String>,
    #[serde(default)]
    config_id: Option<String>,
    #[serde(default)]
    firmware_version: Option<String>,
    #[serde(default)]
    hc_id: Option<String>,
    #[serde(default)]
    mac: Option<String>,
    #[serde(default)]
    master_sn: Option<String>,
    #[serde(default)]
    paired_box: Option<String>,
    #[serde(default)]
    pin: Option<String>,
    #[serde(default)]
    region_id: Option<TransportInt>,
    #[serde(default)]
    region_name: Option<String>,
    #[serde(default)]
    stb_chipset: Option<String>,
    #[serde(default)]
    stb_model: Option<String>,
    #[serde(default)]
    stb_vendor: Option<String>,
    #[serde(default)]
    last_activation: Option<String>,
    #[serde(default)]
    last_service_list_download: Option<String>,
    #[serde(default)]
    packages: Option<Vec<TransportInt>>,
    #[serde(default)]
    package_names: Option<Vec<String>>,
    #[serde(default)]
    products: Option<Vec<String>>,
}

impl TryFrom<SmartcardJson> for Smartcard {
    type Error = TransportError;

    fn try_from(value: SmartcardJson) -> Result<Self, Self::Error> {
        let sn = value
            .sn
            .and_then(|sn| SmartcardSn::new(sn).ok())
            .ok_or(TransportError::MissingSerial)?;

        Ok(Self {
            sn,
            subscriber_code: value.subscriber_code,
            alias: value.alias,
            first_name: value.first_name,
            last_name: value.last_name,
            blacklisted: value.blacklisted.unwrap_or(false),
            defect: value.defect.unwrap_or(false),
            disabled: value.disabled.unwrap_or(false),
            config_protected: value.config_protected.unwrap_or(false),
            camlib_version: value.camlib_version,
            cas_ids: value.cas_ids,
            config_id: value.config_id,
            firmware_version: value.firmware_version,
            hc_id: value.hc_id,
            mac: value.mac,
            master_sn: value.master_sn,
            paired_box: value.paired_box,
            pin: value.pin,
            region_id: value.region_id.map(TransportInt::value),
            region_name: value.region_name,
            stb_chipset: value.stb_chipset,
            stb_model: value.stb_model,
            stb_vendor: value.stb_vendor,
            last_activation: value.last_activation,
            last_service_list_download: value.last_service_list_download,
            packages: value
                .packages
                .unwrap_or_default()
                .into_iter()
                .map(TransportInt::value)
                .collect(),
            package_names: value.package_names.unwrap_or_default(),
            products: value.products.unwrap_or_default(),
        })
    }
}

fn convert(entries: Vec<SmartcardJson>) -> Result<Vec<Smartcard>, TransportError> {
    entries.into_iter().map(Smartcard::try_from).collect()
}

/// Decode the answer of `getListOfSmartcards`.
pub fn decode_smartcard_list(json: &str) -> Result<Vec<Smartcard>, TransportError> {
    let parsed: SmartcardListJson = serde_json::from_str(json)?;
    convert(parsed.smartcard_entries.unwrap_or_default())
}

/// Decode the answer of `getUnusedSmartcards`, which is a bare array.
pub fn decode_smartcard_array(json: &str) -> Result<Vec<Smartcard>, TransportError> {
    let parsed: Option<Vec<SmartcardJson>> = serde_json::from_str(json)?;
    convert(parsed.unwrap_or_default())
}
