//! Cart
//!
//! The cart ledger: an ordered list of line items keyed by id, all priced in a
//! single currency, with derived totals.

use std::num::NonZeroU32;

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    items::{ItemId, LineItem},
    pricing::{TotalPriceError, line_total, total_price},
};

pub mod input;

/// Errors related to cart construction or lookups.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item id, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ItemId, &'static str, &'static str),

    /// An item with the same id is already in the cart.
    #[error("Item {0} is already in the cart")]
    DuplicateItem(ItemId),

    /// An item was not found in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    /// Errors bubbled up from total price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Outcome of a quantity update.
///
/// Only [`QuantityChange::Updated`] changes the cart.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity was replaced.
    Updated {
        /// Quantity before the update.
        previous: NonZeroU32,
    },

    /// The requested quantity equals the current one.
    Unchanged,

    /// No item with the requested id is in the cart.
    NotFound,

    /// The requested quantity was zero, negative, or too large.
    Rejected,
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if there was a currency mismatch or a duplicate item id.
    pub fn with_items(
        items: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();
        let mut seen = FxHashSet::default();

        items.iter().try_for_each(|item| {
            check_currency(item, currency)?;

            if seen.insert(item.id()) {
                Ok(())
            } else {
                Err(CartError::DuplicateItem(item.id()))
            }
        })?;

        Ok(Cart { items, currency })
    }

    /// Append an item to the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the item's currency differs from the cart's, or
    /// if an item with the same id is already present. The cart is unchanged.
    pub fn add_item(&mut self, item: LineItem<'a>) -> Result<(), CartError> {
        check_currency(&item, self.currency)?;

        if self.contains(item.id()) {
            return Err(CartError::DuplicateItem(item.id()));
        }

        trace!(item = %item.id(), quantity = item.quantity().get(), "added item");

        self.items.push(item);

        Ok(())
    }

    /// Replace the quantity of an item.
    ///
    /// Zero and negative quantities are ignored; they never remove the item.
    /// Use [`Cart::remove_item`] for that.
    pub fn set_quantity(&mut self, id: ItemId, quantity: i64) -> QuantityChange {
        let Some(quantity) = u32::try_from(quantity).ok().and_then(NonZeroU32::new) else {
            debug!(item = %id, quantity, "ignored non-positive quantity");
            return QuantityChange::Rejected;
        };

        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            debug!(item = %id, "ignored quantity update for missing item");
            return QuantityChange::NotFound;
        };

        let previous = item.quantity();

        if previous == quantity {
            return QuantityChange::Unchanged;
        }

        item.set_quantity(quantity);

        trace!(item = %id, previous = previous.get(), quantity = quantity.get(), "updated quantity");

        QuantityChange::Updated { previous }
    }

    /// Replace the quantity of an item from free-text input.
    ///
    /// See [`input::parse_quantity`] for how the text is read.
    pub fn set_quantity_from_input(&mut self, id: ItemId, input: &str) -> QuantityChange {
        self.set_quantity(id, input::parse_quantity(input))
    }

    /// Remove an item from the cart, returning it if it was present.
    pub fn remove_item(&mut self, id: ItemId) -> Option<LineItem<'a>> {
        let Some(position) = self.items.iter().position(|item| item.id() == id) else {
            debug!(item = %id, "ignored removal of missing item");
            return None;
        };

        trace!(item = %id, "removed item");

        Some(self.items.remove(position))
    }

    /// Calculate the subtotal of the cart.
    ///
    /// This is the sum of unit price times quantity over all items. Stored
    /// discounts are not applied.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was an overflow or money arithmetic error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Calculate the total of the cart.
    ///
    /// Nothing is charged on top of the subtotal, so the two are equal.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was an overflow or money arithmetic error.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        self.subtotal()
    }

    /// Calculate the unit price times quantity of a single item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the item is not in the cart, or
    /// `CartError::TotalPrice` if the line total overflows.
    pub fn line_total(&self, id: ItemId) -> Result<Money<'a, Currency>, CartError> {
        Ok(line_total(self.get_item(id)?)?)
    }

    /// Get an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not found.
    pub fn get_item(&self, id: ItemId) -> Result<&LineItem<'a>, CartError> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .ok_or(CartError::ItemNotFound(id))
    }

    /// Check whether an item with the given id is in the cart.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Iterate over the items in the cart, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Sum of the quantities of all items.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Get the number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn check_currency(item: &LineItem<'_>, currency: &'static Currency) -> Result<(), CartError> {
    let item_currency = item.unit_price().currency();

    if item_currency == currency {
        Ok(())
    } else {
        Err(CartError::CurrencyMismatch(
            item.id(),
            item_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}
