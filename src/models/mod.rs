pub mod direction;
pub mod path;
pub mod tick;
pub mod trade;

/// Split a pair symbol into exactly two non-empty `(base, quote)` tokens.
///
/// Anything else (`"BTCUSDT"`, `"A_B_C"`, `"_USDT"`) is malformed.
pub fn split_pair(symbol: &str) -> Option<(&str, &str)> {
    let mut parts = symbol.split('_');
    let base = parts.next()?;
    let quote = parts.next()?;
    if parts.next().is_some() || base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base, quote))
}

/// Normalize a human-readable `"BASE/QUOTE"` pair to the `"BASE_QUOTE"`
/// form the core works with. Already-normalized symbols pass through.
pub fn normalize_pair(symbol: &str) -> String {
    symbol.replace('/', "_")
}
