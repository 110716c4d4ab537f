//! Integration tests for the cart ledger's quantity and subtotal behaviour.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use tally::prelude::*;

fn catalog<'a>() -> Result<Cart<'a>, Box<dyn std::error::Error>> {
    let items = [
        LineItem::new(1, "Nike Air Max 270", Money::from_minor(15_000, USD))?,
        LineItem::new(2, "Adidas Ultraboost 21", Money::from_minor(18_000, USD))?,
        LineItem::new(3, "Puma RS-X Toys", Money::from_minor(12_000, USD))?,
        LineItem::new(4, "New Balance 990v5", Money::from_minor(18_500, USD))?,
    ];

    Ok(Cart::with_items(items, USD)?)
}

/// Sum of unit price times quantity, computed independently of the ledger.
fn expected_subtotal(cart: &Cart<'_>) -> i64 {
    cart.iter()
        .map(|item| item.unit_price().to_minor_units() * i64::from(item.quantity().get()))
        .sum()
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Set(u64, i64),
    Remove(u64),
}

/// Deterministic pseudo-random operation stream (64-bit LCG).
fn operations(seed: u64, len: usize) -> Vec<Op> {
    let mut state = seed;

    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);

            let id = (state >> 33) % 6;
            let quantity = i64::try_from((state >> 40) % 9).unwrap_or(0) - 3;

            if (state >> 20) % 5 == 0 {
                Op::Remove(id)
            } else {
                Op::Set(id, quantity)
            }
        })
        .collect()
}

#[test]
fn quantities_stay_positive_for_any_operation_sequence() -> TestResult {
    for seed in 0..64 {
        let mut cart = catalog()?;

        for op in operations(seed, 40) {
            match op {
                Op::Set(id, quantity) => {
                    cart.set_quantity(ItemId::new(id), quantity);
                }
                Op::Remove(id) => {
                    cart.remove_item(ItemId::new(id));
                }
            }

            assert!(
                cart.iter().all(|item| item.quantity().get() >= 1),
                "seed {seed}: quantity fell below one after {op:?}"
            );

            assert_eq!(
                cart.subtotal()?.to_minor_units(),
                expected_subtotal(&cart),
                "seed {seed}: subtotal drifted after {op:?}"
            );
        }
    }

    Ok(())
}

#[test]
fn non_positive_quantities_leave_cart_unchanged() -> TestResult {
    let mut cart = catalog()?;
    let before: Vec<_> = cart.iter().cloned().collect();

    assert_eq!(cart.set_quantity(ItemId::new(2), 0), QuantityChange::Rejected);
    assert_eq!(cart.set_quantity(ItemId::new(2), -1), QuantityChange::Rejected);

    let after: Vec<_> = cart.iter().cloned().collect();

    assert_eq!(before, after);

    Ok(())
}

#[test]
fn removing_missing_item_is_noop() -> TestResult {
    let mut cart = catalog()?;
    let before: Vec<_> = cart.iter().cloned().collect();

    assert!(cart.remove_item(ItemId::new(404)).is_none());

    let after: Vec<_> = cart.iter().cloned().collect();

    assert_eq!(before, after);

    Ok(())
}

#[test]
fn subtotal_is_unaffected_by_discounts() -> TestResult {
    let plain = catalog()?;

    let discounted = Cart::with_items(
        plain
            .iter()
            .cloned()
            .map(|item| item.with_discount(decimal_percentage::Percentage::from(0.5)))
            .collect::<Vec<_>>(),
        USD,
    )?;

    assert_eq!(plain.subtotal()?, discounted.subtotal()?);
    assert_eq!(discounted.subtotal()?.to_minor_units(), expected_subtotal(&discounted));

    Ok(())
}

#[test]
fn single_item_walkthrough() -> TestResult {
    let item = LineItem::new(2, "Adidas Ultraboost 21", Money::from_minor(18_000, USD))?;
    let mut cart = Cart::with_items([item], USD)?;

    assert_eq!(cart.subtotal()?, Money::from_minor(18_000, USD));

    cart.set_quantity(ItemId::new(2), 3);
    assert_eq!(cart.subtotal()?, Money::from_minor(54_000, USD));

    cart.remove_item(ItemId::new(2));
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn empty_cart_subtotal_is_zero() -> TestResult {
    let cart = Cart::new(USD);

    assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));
    assert_eq!(cart.total()?, Money::from_minor(0, USD));

    Ok(())
}
