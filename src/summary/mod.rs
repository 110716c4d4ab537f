//! Summary
//!
//! Terminal rendering of a cart: one row per line item followed by the cart totals.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows, Segment},
        style::BorderColor,
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    items::ItemId,
    pricing::{TotalPriceError, line_total},
};

/// Errors that can occur when building or writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating a line total or the cart subtotal.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    Io,
}

/// A single line of the summary.
#[derive(Debug, Clone)]
pub struct SummaryLine<'a> {
    /// Item id
    pub id: ItemId,

    /// Item description, see [`crate::items::describe`]
    pub description: String,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Stored discount, shown but not applied
    pub discount: Option<Percentage>,

    /// Quantity
    pub quantity: u32,

    /// Unit price times quantity
    pub line_total: Money<'a, Currency>,
}

/// Snapshot of a cart's lines and totals.
#[derive(Debug, Clone)]
pub struct CartSummary<'a> {
    lines: Vec<SummaryLine<'a>>,
    subtotal: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> CartSummary<'a> {
    /// Build a summary from a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a line total or the subtotal cannot be calculated.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, SummaryError> {
        let lines = cart
            .iter()
            .map(|item| -> Result<SummaryLine<'a>, TotalPriceError> {
                Ok(SummaryLine {
                    id: item.id(),
                    description: item.description(),
                    unit_price: *item.unit_price(),
                    discount: item.discount(),
                    quantity: item.quantity().get(),
                    line_total: line_total(item)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            subtotal: cart.subtotal()?,
            total: cart.total()?,
        })
    }

    /// Lines in cart order
    #[must_use]
    pub fn lines(&self) -> &[SummaryLine<'a>] {
        &self.lines
    }

    /// Cart subtotal
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Cart total
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Writes the summary as a table followed by the cart totals.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.lines.is_empty() {
            return writeln!(out, "\nYour cart is empty\n").map_err(|_err| SummaryError::Io);
        }

        let mut builder = Builder::default();

        builder.push_record(["#", "Product", "Price", "Discount", "Quantity", "Total"]);

        for line in &self.lines {
            builder.push_record([
                format!("{}", line.id),
                line.description.clone(),
                format!("{}", line.unit_price),
                line.discount.map(percent_display).unwrap_or_default(),
                format!("{}", line.quantity),
                format!("{}", line.line_total),
            ]);
        }

        write_table(&mut out, builder)?;
        write_totals(&mut out, self)
    }
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..6), Alignment::right());
    table.modify(Columns::new(3..4), Color::FG_BRIGHT_BLACK);
    table.modify(Segment::all(), BorderColor::filled(Color::FG_BRIGHT_BLACK));

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::Io)
}

fn write_totals(out: &mut impl io::Write, summary: &CartSummary<'_>) -> Result<(), SummaryError> {
    let subtotal = summary.subtotal().to_string();
    let total = summary.total().to_string();

    let width = subtotal.chars().count().max(total.chars().count());

    writeln!(out, " {:>9}  {subtotal:>width$}", "Subtotal:").map_err(|_err| SummaryError::Io)?;
    writeln!(out, " \x1b[1m{:>9}  {total:>width$}\x1b[0m\n", "Total:")
        .map_err(|_err| SummaryError::Io)
}

/// Formats a fractional percentage (e.g. 0.15) as percent points (`15%`).
fn percent_display(percentage: Percentage) -> String {
    let points = (percentage * Decimal::ONE) * Decimal::ONE_HUNDRED;

    format!("{}%", points.round_dp(2).normalize())
}
