//! Storefront Suite Support
//!
//! Domain models the endpoint suites deserialize API responses into.
//! The suites themselves live under `tests/`.

pub mod models;

pub use models::{Cart, CartItem};
