//! Quantity input

/// Parses free-text quantity input the way the cart's quantity field does.
///
/// The leading integer is taken (an optional sign followed by digits, anything
/// after that is ignored). Text without a leading integer, and zero, become `1`.
/// Negative values are returned as-is.
pub fn parse_quantity(input: &str) -> i64 {
    let trimmed = input.trim_start();

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(idx, _)| idx);

    let parsed = digits
        .get(..end)
        .filter(|number| !number.is_empty())
        .map(|number| {
            // Digit runs beyond i64 saturate.
            number.parse::<i64>().unwrap_or(i64::MAX)
        });

    match parsed {
        None | Some(0) => 1,
        Some(value) if negative => -value,
        Some(value) => value,
    }
}
