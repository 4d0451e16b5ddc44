use serde::Deserialize;

use super::number::TransportInt;
use crate::domain::{Product, ProductId};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON answer: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductListJson {
    #[serde(default)]
    product_entries: Option<Vec<ProductJson>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductJson {
    product_id: TransportInt,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    deleted: Option<bool>,
}

impl From<ProductJson> for Product {
    fn from(value: ProductJson) -> Self {
        Self {
            id: ProductId::new(value.product_id.value()),
            name: value.name.unwrap_or_default(),
            deleted: value.deleted.unwrap_or(false),
        }
    }
}

/// Decode the answer of `getListOfProducts`.
pub fn decode_product_list(json: &str) -> Result<Vec<Product>, TransportError> {
    let parsed: ProductListJson = serde_json::from_str(json)?;
    Ok(parsed
        .product_entries
        .unwrap_or_default()
        .into_iter()
        .map(Product::from)
        .collect())
}
