use crate::domain::validation::ValidationError;
use crate::domain::value::{ProductId, SubscriberCode};

/// Request to book a product for a subscriber.
///
/// Times are passed through verbatim in the format the Panaccess tenant
/// expects (typically `YYYY-MM-DD HH:MM:SS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOrder {
    subscriber_code: SubscriberCode,
    product_id: ProductId,
    activation_time: String,
    expiry_time: String,
}

impl AddOrder {
    pub const ACTIVATION_TIME_FIELD: &'static str = "activationTime";
    pub const EXPIRY_TIME_FIELD: &'static str = "expiryTime";

    pub fn new(
        subscriber_code: SubscriberCode,
        product_id: ProductId,
        activation_time: impl Into<String>,
        expiry_time: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let activation_time = activation_time.into();
        if activation_time.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::ACTIVATION_TIME_FIELD,
            });
        }
        let expiry_time = expiry_time.into();
        if expiry_time.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::EXPIRY_TIME_FIELD,
            });
        }
        Ok(Self {
            subscriber_code,
            product_id,
            activation_time,
            expiry_time,
        })
    }

    pub fn subscriber_code(&self) -> &SubscriberCode {
        &self.subscriber_code
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn activation_time(&self) -> &str {
        &self.activation_time
    }

    pub fn expiry_time(&self) -> &str {
        &self.expiry_time
    }
}
