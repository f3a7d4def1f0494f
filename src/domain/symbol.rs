//! Symbol-level price conventions.
//!
//! Every other calculation depends on these: pip size, per-lot pip value,
//! and display precision are all keyed off the instrument's quote currency.
//! JPY-quoted pairs tick in hundredths; everything else in ten-thousandths.
//! Unknown symbols fall back to the non-JPY convention rather than erroring.

/// Last three characters of the symbol, by convention the quote currency.
pub fn quote_currency(symbol: &str) -> &str {
    match symbol.char_indices().rev().nth(2) {
        Some((i, _)) => &symbol[i..],
        None => symbol,
    }
}

fn is_jpy_quoted(symbol: &str) -> bool {
    quote_currency(symbol).eq_ignore_ascii_case("JPY")
}

/// 0.01 for JPY-quoted symbols, 0.0001 otherwise.
pub fn pip_size(symbol: &str) -> f64 {
    if is_jpy_quoted(symbol) { 0.01 } else { 0.0001 }
}

/// Dollar value of a one-pip move for one standard lot.
///
/// Fixed at 10.0 regardless of quote/account currency. When the quote
/// currency differs from the account currency a real system would convert
/// through the quote rate; the flat figure is a deliberate simplification
/// and callers must not treat it as exchange-rate aware.
pub fn pip_value(symbol: &str, account_currency: &str) -> f64 {
    let _ = (symbol, account_currency);
    10.0
}

/// Display precision: 2 decimals for JPY pairs, 4 otherwise.
pub fn price_decimals(symbol: &str) -> usize {
    if is_jpy_quoted(symbol) { 2 } else { 4 }
}

pub fn format_price(price: f64, symbol: &str) -> String {
    format!("{:.*}", price_decimals(symbol), price)
}
