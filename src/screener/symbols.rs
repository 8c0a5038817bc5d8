/// Normalize a single symbol: trimmed and upper-cased, `None` if blank.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol.to_uppercase())
    }
}

/// Split comma-separated symbol input, dropping blanks and repeats.
///
/// Symbols are case-insensitive, so `aapl, AAPL` yields one entry. First-seen
/// order is kept.
pub fn parse_symbols(input: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in input.split(',').filter_map(normalize_symbol) {
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}
