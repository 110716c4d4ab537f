//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    fixtures::items::{CartFixture, parse_price},
    items::{LineItem, LineItemError},
};

pub mod items;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Item declared with a quantity of zero
    #[error("Item {0} has a quantity of zero")]
    ZeroQuantity(u64),

    /// Currency mismatch between items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No items loaded
    #[error("No items loaded; cannot create cart")]
    NoItems,

    /// Line item construction error
    #[error("Invalid line item: {0}")]
    LineItem(#[from] LineItemError),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Pre-built line items
    items: Vec<LineItem<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            items: Vec::new(),
            currency: None,
        }
    }

    /// Load cart line items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an item is
    /// invalid, or if the items do not share one currency.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for item_fixture in fixture.items {
            let (_minor_units, currency) = parse_price(&item_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let item: LineItem<'a> = item_fixture.try_into()?;

            self.items.push(item);
        }

        debug!(fixture = name, items = self.items.len(), "loaded cart fixture");

        Ok(self)
    }

    /// Load a complete fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_cart(name)?;

        Ok(fixture)
    }

    /// Get all items
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Create a cart from the loaded items
    ///
    /// # Errors
    ///
    /// Returns an error if no items are loaded or if cart creation fails.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoItems)?;

        Ok(Cart::with_items(self.items.clone(), currency)?)
    }

    /// Get the currency, if any items have been loaded
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
