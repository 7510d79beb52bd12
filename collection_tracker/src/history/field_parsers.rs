//! Field-level parsing for the history table.
//!
//! Pure functions that split raw table text and decode the compact
//! `[quantity]goatbots_price;scryfall_price` cell notation.

use super::PricePoint;

/// Splits `text` into substrings on a single-character delimiter.
///
/// Total over all inputs: joining the result with `delimiter` reproduces
/// `text` exactly. A trailing delimiter yields a trailing empty element and
/// an empty input yields a single empty element.
pub fn split_fields(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter).map(str::to_string).collect()
}

/// Decodes one history cell.
///
/// Grammar: an optional `[quantity]` prefix, then the Goatbots price, `;`,
/// then the Scryfall price. An absent price is written as `-`. A cell with
/// more than two `;`-separated fields only has the leading numeric prefix of
/// the second field consumed; the rest is silently dropped.
///
/// # Panics
///
/// Panics if the quantity digits or a present price field do not form a
/// valid number. History cells are written exclusively by
/// [`render_price_point`], so a malformed cell means the producer broke the
/// format contract; there is no recovery path.
pub fn parse_price_point(cell: &str) -> PricePoint {
    let mut rest = cell;
    let mut quantity = None;

    if let Some(bracketed) = rest.strip_prefix('[') {
        let end = bracketed
            .find(']')
            .unwrap_or_else(|| panic!("Unterminated quantity bracket in cell '{cell}'"));
        let digits = &bracketed[..end];
        let parsed = digits
            .parse::<u16>()
            .unwrap_or_else(|e| panic!("Invalid quantity '{digits}' in cell '{cell}': {e}"));
        quantity = Some(parsed);
        rest = &bracketed[end + 1..];
    }

    let (goatbots_field, scryfall_field) = rest
        .split_once(';')
        .unwrap_or_else(|| panic!("Cell '{cell}' has no price separator"));

    PricePoint {
        quantity,
        goatbots_price: parse_price_field(goatbots_field, cell),
        scryfall_price: parse_price_field(scryfall_field, cell),
    }
}

// A price field is `-` for absent, otherwise a decimal literal. Only the
// leading numeric prefix counts; anything after it (extra `;`-separated
// content in over-long cells) is discarded.
fn parse_price_field(field: &str, cell: &str) -> Option<f32> {
    if field == "-" {
        return None;
    }
    let end = field
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(field.len());
    let price = field[..end]
        .parse::<f32>()
        .unwrap_or_else(|e| panic!("Invalid price '{field}' in cell '{cell}': {e}"));
    Some(price)
}

/// Renders a [`PricePoint`] back to cell notation.
///
/// Inverse of [`parse_price_point`]: parsing a rendered cell yields the
/// original point, and re-rendering that parse reproduces the cell byte for
/// byte.
pub fn render_price_point(point: &PricePoint) -> String {
    let mut cell = String::with_capacity(16);
    if let Some(quantity) = point.quantity {
        cell.push('[');
        cell.push_str(&quantity.to_string());
        cell.push(']');
    }
    match point.goatbots_price {
        Some(price) => cell.push_str(&price.to_string()),
        None => cell.push('-'),
    }
    cell.push(';');
    match point.scryfall_price {
        Some(price) => cell.push_str(&price.to_string()),
        None => cell.push('-'),
    }
    cell
}

/// Decodes a slice of history cells, one per snapshot column, preserving
/// order and length.
pub fn parse_price_points(cells: &[String]) -> Vec<PricePoint> {
    cells.iter().map(|cell| parse_price_point(cell)).collect()
}

#[cfg(test)]
#[path = "field_parsers_tests.rs"]
mod tests;
