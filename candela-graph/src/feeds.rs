use candela_core::CandelaError;

/// Ethereum-network Chainlink aggregator contracts, keyed by `SYMBOL_USD`
/// market name. Immutable, process-lifetime configuration.
const FEED_IDS: &[(&str, &str)] = &[
    ("BTC_USD", "0xF04B8cf2CB29cbE2FcFD0d6CdcD64A3d96b0e944"),
    ("ETH_USD", "0x9359fec0A7a4180d3313208eb9F5fE335eb80F36"),
    ("GT_USD", "0x948c46AE6010551a7F8aBbf5D0186a44D7D47Af3"),
    ("BNB_USD", "0xCA4e0946138DCF6f3f12c6D44b77f12fbB5B308E"),
    ("DAI_USD", "0xA9B2e4E3282a39A6f76Cd7B60f3B41D071D71902"),
];

/// Wrapped-asset tickers that chart as their underlying asset.
const WRAPPED: &[&str] = &["WBTC", "WETH", "WAVAX", "WGT"];

/// Normalize a chart symbol: wrapped assets map to their underlying.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> &str {
    if WRAPPED.contains(&symbol) {
        &symbol[1..]
    } else {
        symbol
    }
}

/// Resolve a normalized symbol to its oracle feed identifier.
///
/// # Errors
/// `CandelaError::UnknownFeed` when the symbol has no configured aggregator.
/// This is a configuration error: the caller must not retry it.
pub fn feed_id(symbol: &str) -> Result<&'static str, CandelaError> {
    let market = format!("{}_USD", normalize_symbol(symbol));
    FEED_IDS
        .iter()
        .find(|(name, _)| *name == market)
        .map(|(_, id)| *id)
        .ok_or_else(|| CandelaError::unknown_feed(symbol))
}
