use crate::domain::value::{OrderId, ProductId, SmartcardSn, SubscriberCode};

/// A product (package bundle) that can be ordered for a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub deleted: bool,
}

/// An order of a product for a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub subscriber_code: Option<String>,
    pub alias: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sn: Option<String>,
    pub smartcards: Vec<String>,
    pub sc_defect: bool,
    pub sc_disabled: bool,
    pub order_time: Option<String>,
    pub activation_time: Option<String>,
    pub expiry_time: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

/// A conditional-access smartcard (or cardless client id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smartcard {
    pub sn: SmartcardSn,
    pub subscriber_code: Option<String>,
    pub alias: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub blacklisted: bool,
    pub defect: bool,
    pub disabled: bool,
    pub config_protected: bool,
    pub camlib_version: Option<String>,
    pub cas_ids: Option<String>,
    pub config_id: Option<String>,
    pub firmware_version: Option<String>,
    pub hc_id: Option<String>,
    pub mac: Option<String>,
    pub master_sn: Option<String>,
    pub paired_box: Option<String>,
    pub pin: Option<String>,
    pub region_id: Option<i64>,
    pub region_name: Option<String>,
    pub stb_chipset: Option<String>,
    pub stb_model: Option<String>,
    pub stb_vendor: Option<String>,
    pub last_activation: Option<String>,
    pub last_service_list_download: Option<String>,
    pub packages: Vec<i64>,
    pub package_names: Vec<String>,
    /// Names of the products currently active on this card.
    pub products: Vec<String>,
}

impl Smartcard {
    /// Whether a product with this name is already active on the card.
    pub fn has_product(&self, product_name: &str) -> bool {
        self.products.iter().any(|name| name == product_name)
    }
}

/// Subscriber as returned by the extended subscriber listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub code: SubscriberCode,
    pub region_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country_code: Option<String>,
    /// Customer account fields; raw JSON because the shape is tenant-defined.
    pub caf: Option<String>,
    pub smartcards: Vec<String>,
    pub comment: Option<String>,
    pub last_expiry_time: Option<String>,
    pub created: Option<String>,
}
