//! Domain layer: strong types with validation and invariants (no I/O).

mod entity;
mod filter;
mod params;
mod request;
mod response;
mod validation;
mod value;

pub use entity::{Order, Product, Smartcard, Subscriber};
pub use filter::{Filter, FilterOp, GroupOp, Rule};
pub use params::{DEFAULT_LIMIT, Params};
pub use request::AddOrder;
pub use response::{ApiFailure, Envelope};
pub use validation::ValidationError;
pub use value::{
    ApiToken, OrderId, Password, ProductId, ServerUrl, SessionId, SmartcardSn, SubscriberCode,
    Username,
};
