//! Transport layer: wire-format details (serialization/deserialization).

mod envelope;
mod filters;
mod number;
mod order;
mod product;
mod smartcard;
mod subscriber;

pub use envelope::{decode_answer, decode_envelope};
pub use filters::encode_filters;
pub use order::{decode_order_array, decode_order_list};
pub use product::decode_product_list;
pub use smartcard::{decode_smartcard_array, decode_smartcard_list};
pub use subscriber::decode_subscriber_list;
