//! Items

use std::{fmt, num::NonZeroU32};

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to line item construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// The unit price was below zero.
    #[error("Item {0} has a negative unit price")]
    NegativePrice(ItemId),
}

/// Identity of a line item, unique within a cart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new item id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product entry in a cart, with a quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    id: ItemId,
    title: String,
    unit_price: Money<'a, Currency>,
    discount: Option<Percentage>,
    size: Option<String>,
    color: Option<String>,
    quantity: NonZeroU32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item with a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::NegativePrice`] if `unit_price` is below zero.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Result<Self, LineItemError> {
        let id = ItemId::new(id);

        if unit_price.to_minor_units() < 0 {
            return Err(LineItemError::NegativePrice(id));
        }

        Ok(Self {
            id,
            title: title.into(),
            unit_price,
            discount: None,
            size: None,
            color: None,
            quantity: NonZeroU32::MIN,
        })
    }

    /// Sets the stored discount percentage.
    ///
    /// The discount is informational; totals do not apply it.
    #[must_use]
    pub fn with_discount(mut self, discount: Percentage) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the size. An empty string clears it.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = non_empty(size.into());
        self
    }

    /// Sets the color. An empty string clears it.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = non_empty(color.into());
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns the id of the item
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the title of the item
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the unit price of the item
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the stored discount percentage, if any
    pub fn discount(&self) -> Option<Percentage> {
        self.discount
    }

    /// Returns the size, if any
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Returns the color, if any
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the quantity of the item
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Returns the display description of the item. See [`describe`].
    pub fn description(&self) -> String {
        describe(self)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Builds the display string for a line item.
///
/// The title comes first. When a color or size is present it is followed by
/// `" - "`, the color, a `", "` separator when both are present, and the size
/// prefixed with `"S "`.
pub fn describe(item: &LineItem<'_>) -> String {
    let mut description = item.title.clone();

    match (item.color(), item.size()) {
        (None, None) => {}
        (Some(color), None) => {
            description.push_str(" - ");
            description.push_str(color);
        }
        (None, Some(size)) => {
            description.push_str(" - S ");
            description.push_str(size);
        }
        (Some(color), Some(size)) => {
            description.push_str(" - ");
            description.push_str(color);
            description.push_str(", S ");
            description.push_str(size);
        }
    }

    description
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn shoe<'a>() -> Result<LineItem<'a>, LineItemError> {
        LineItem::new(2, "Adidas Ultraboost 21", Money::from_minor(18_000, USD))
    }

    #[test]
    fn new_item_starts_at_quantity_one() -> TestResult {
        let item = shoe()?;

        assert_eq!(item.quantity().get(), 1);
        assert_eq!(item.id(), ItemId::new(2));
        assert_eq!(item.unit_price(), &Money::from_minor(18_000, USD));
        assert!(item.discount().is_none());

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = LineItem::new(7, "Refund", Money::from_minor(-1, USD));

        assert_eq!(result.err(), Some(LineItemError::NegativePrice(ItemId::new(7))));
    }

    #[test]
    fn zero_price_is_allowed() -> TestResult {
        let item = LineItem::new(1, "Sticker", Money::from_minor(0, USD))?;

        assert_eq!(item.unit_price().to_minor_units(), 0);

        Ok(())
    }

    #[test]
    fn describe_with_color_and_size() -> TestResult {
        let item = shoe()?.with_color("Black").with_size("M");

        assert_eq!(describe(&item), "Adidas Ultraboost 21 - Black, S M");

        Ok(())
    }

    #[test]
    fn describe_with_color_only() -> TestResult {
        let item = shoe()?.with_color("Black");

        assert_eq!(describe(&item), "Adidas Ultraboost 21 - Black");

        Ok(())
    }

    #[test]
    fn describe_with_size_only() -> TestResult {
        let item = shoe()?.with_size("XL");

        assert_eq!(item.description(), "Adidas Ultraboost 21 - S XL");

        Ok(())
    }

    #[test]
    fn describe_title_only() -> TestResult {
        let item = shoe()?;

        assert_eq!(describe(&item), "Adidas Ultraboost 21");

        Ok(())
    }

    #[test]
    fn empty_qualifiers_are_absent() -> TestResult {
        let item = shoe()?.with_color("").with_size("");

        assert!(item.color().is_none());
        assert!(item.size().is_none());
        assert_eq!(describe(&item), "Adidas Ultraboost 21");

        Ok(())
    }

    #[test]
    fn item_id_displays_bare_number() {
        assert_eq!(ItemId::new(42).to_string(), "42");
    }
}
