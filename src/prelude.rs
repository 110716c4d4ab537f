//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, QuantityChange, input::parse_quantity},
    fixtures::{Fixture, FixtureError},
    items::{ItemId, LineItem, LineItemError, describe},
    pricing::{TotalPriceError, line_total, total_price},
    summary::{CartSummary, SummaryError},
};
