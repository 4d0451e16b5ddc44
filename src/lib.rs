//! Typed Rust client for the Panaccess subscriber-management HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks, and a client layer that owns the session: it logs
//! in, fails over between API nodes, and renews an expired session once per
//! call before giving up.
//!
//! ```rust,no_run
//! use panaccess::{Credentials, PanaccessClient, Params, ServerUrl};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), panaccess::PanaccessError> {
//!     let credentials = Credentials::new("reseller", "secret", "api-token")?;
//!     let client = PanaccessClient::builder(credentials)
//!         .server(ServerUrl::new("https://cas1.example.com/admin/api")?)
//!         .server(ServerUrl::new("https://cas2.example.com/admin/api")?)
//!         .build()?;
//!     client.login().await?;
//!     let products = client.list_products(Params::new()).await?;
//!     println!("{} products", products.len());
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, PanaccessClient, PanaccessClientBuilder, PanaccessError};
pub use domain::{
    AddOrder, ApiFailure, ApiToken, DEFAULT_LIMIT, Envelope, Filter, FilterOp, GroupOp, Order,
    OrderId, Params, Password, Product, ProductId, Rule, ServerUrl, SessionId, Smartcard,
    SmartcardSn, Subscriber, SubscriberCode, Username, ValidationError,
};
