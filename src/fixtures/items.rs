//! Line Item Fixtures

use std::num::NonZeroU32;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, items::LineItem};

/// Wrapper for cart items in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Line items, in cart order
    pub items: Vec<LineItemFixture>,
}

/// Line Item Fixture
#[derive(Debug, Deserialize)]
pub struct LineItemFixture {
    /// Item id, unique within the cart
    pub id: u64,

    /// Item title
    pub title: String,

    /// Unit price (e.g., "180.00 USD")
    pub price: String,

    /// Discount (e.g., "15%" or "0.15")
    #[serde(default)]
    pub discount: Option<String>,

    /// Quantity, defaults to one
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Size
    #[serde(default)]
    pub size: Option<String>,

    /// Color
    #[serde(default)]
    pub color: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl TryFrom<LineItemFixture> for LineItem<'_> {
    type Error = FixtureError;

    fn try_from(fixture: LineItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let quantity =
            NonZeroU32::new(fixture.quantity).ok_or(FixtureError::ZeroQuantity(fixture.id))?;

        let price = Money::from_minor(minor_units, currency);
        let mut item = LineItem::new(fixture.id, fixture.title, price)?.with_quantity(quantity);

        if let Some(discount) = fixture.discount.as_deref() {
            item = item.with_discount(parse_percentage(discount)?);
        }

        if let Some(size) = fixture.size {
            item = item.with_size(size);
        }

        if let Some(color) = fixture.color {
            item = item.with_color(color);
        }

        Ok(item)
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / Decimal::ONE_HUNDRED))
    } else {
        let value = trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
