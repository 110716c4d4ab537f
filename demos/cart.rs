//! Cart Example
//!
//! Loads a cart fixture, applies quantity updates and removals, and prints the cart totals.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s ID=QTY` to update a quantity (repeatable)
//! Use `-r ID` to remove an item (repeatable)

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tally::{
    fixtures::Fixture, items::ItemId, observability::init_subscriber, summary::CartSummary,
    utils::DemoCartArgs,
};

/// Cart Example
pub fn main() -> Result<()> {
    let args = DemoCartArgs::parse();

    init_subscriber(&args.log_level, args.log_format)?;

    let mut fixture = Fixture::with_base_path(&args.fixtures_dir);
    fixture.load_cart(&args.fixture)?;

    let mut cart = fixture.cart()?;

    for update in &args.updates {
        let change = cart.set_quantity(update.id, update.quantity);

        info!(item = %update.id, quantity = update.quantity, ?change, "quantity update");
    }

    for &id in &args.removals {
        let removed = cart.remove_item(ItemId::new(id)).is_some();

        info!(item = id, removed, "removal");
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    CartSummary::from_cart(&cart)?.write_to(&mut handle)?;

    Ok(())
}
