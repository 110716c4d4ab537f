//! Prices

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::{ItemId, LineItem};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// Unit price multiplied by quantity, or the running sum, overflowed.
    #[error("total for item {0} overflowed")]
    Overflow(ItemId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the unit price multiplied by the quantity of a line item.
///
/// Discounts stored on the item are not applied.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total<'a>(item: &LineItem<'a>) -> Result<Money<'a, Currency>, TotalPriceError> {
    let minor = item
        .unit_price()
        .to_minor_units()
        .checked_mul(i64::from(item.quantity().get()))
        .ok_or(TotalPriceError::Overflow(item.id()))?;

    Ok(Money::from_minor(minor, item.unit_price().currency()))
}

/// Calculates the total price of a list of line items
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Overflow`]: A line total overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(items: &[LineItem<'a>]) -> Result<Money<'a, Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    let total = items.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, item| -> Result<_, TotalPriceError> {
            let line = line_total(item)?;

            acc.to_minor_units()
                .checked_add(line.to_minor_units())
                .ok_or(TotalPriceError::Overflow(item.id()))?;

            Ok(acc.add(line)?)
        },
    )?;

    Ok(total)
}
