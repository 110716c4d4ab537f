//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::{cart::input::parse_quantity, items::ItemId, observability::LogFormat};

/// Arguments for the cart demo
#[derive(Debug, Parser)]
pub struct DemoCartArgs {
    /// Fixture set to load the cart from
    #[clap(short, long, env = "TALLY_FIXTURE", default_value = "demo")]
    pub fixture: String,

    /// Directory containing the `carts/` fixtures
    #[clap(long, env = "TALLY_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Quantity update as `ID=QTY`, may be repeated
    #[clap(short = 's', long = "set", value_parser = parse_quantity_update)]
    pub updates: Vec<QuantityUpdate>,

    /// Item id to remove, may be repeated
    #[clap(short = 'r', long = "remove")]
    pub removals: Vec<u64>,

    /// Default log filter when `RUST_LOG` is unset
    #[clap(long, env = "TALLY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[clap(long, env = "TALLY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// A requested quantity change for one item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuantityUpdate {
    /// Item to update
    pub id: ItemId,

    /// Requested quantity, as read by [`parse_quantity`]
    pub quantity: i64,
}

/// Parses `ID=QTY` into a [`QuantityUpdate`].
///
/// The quantity part is read like the cart's quantity field, so `2=abc` requests a quantity of one.
///
/// # Errors
///
/// Returns a message if there is no `=` or the id is not an unsigned integer.
pub fn parse_quantity_update(s: &str) -> Result<QuantityUpdate, String> {
    let (id, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got: {s}"))?;

    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|err| format!("invalid item id '{id}': {err}"))?;

    Ok(QuantityUpdate {
        id: ItemId::new(id),
        quantity: parse_quantity(quantity),
    })
}
