use crate::model::MarketRecord;

/// Render one market record into the fixed update template.
///
/// Deterministic and infallible; absent numeric fields were already reduced
/// to `Unknown` during parsing.
pub fn render_update(record: &MarketRecord) -> String {
    format!(
        "Cryptocurrency Update for {} ({}):\n\
         Current Price: ${}\n\
         Market Cap: ${}\n\
         Total Volume: ${}\n",
        record.name,
        record.symbol,
        record.current_price_usd,
        record.market_cap_usd,
        record.total_volume_usd,
    )
}
