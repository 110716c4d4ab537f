//! Tally
//!
//! Tally is the cart ledger behind a demonstration storefront: line items keyed by id,
//! quantity updates, and the subtotal and total derived from them.

pub mod cart;
pub mod fixtures;
pub mod items;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod summary;
pub mod utils;
