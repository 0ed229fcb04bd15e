//! Order store facade
//!
//! A single `orders` table with a typed core (iqama, mobile, order_date,
//! status) and an open `extra` JSONB map for everything else. The business
//! identity key is `iqama`: submitting an order for an existing iqama
//! replaces that order instead of creating a duplicate.

pub mod handlers;
pub mod models;
pub mod store;

pub use models::{Order, OrderPage, PatchFields, SubmitOrderRequest, SubmitOutcome};
pub use store::{OrderStore, StoreError};
