use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::debug;

use crate::error::MarketError;
use crate::market::MarketDataProvider;
use crate::model::{MarketRecord, UsdValue};

pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl MarketDataProvider for CoinGeckoProvider {
    fn fetch_coin(&self, id: &str) -> BoxFuture<'_, Result<MarketRecord, Report<MarketError>>> {
        let id = id.to_owned();
        Box::pin(async move {
            let url = format!("{}/coins/{}", self.base_url, id);

            debug!(coin = %id, "fetching market data");

            let response =
                self.client
                    .get(&url)
                    .send()
                    .await
                    .change_context(MarketError::Request { coin: id.clone() })?;

            if !response.status().is_success() {
                return Err(Report::new(MarketError::Status { coin: id.clone() })
                    .attach(format!("HTTP status: {}", response.status())));
            }

            let raw: CoinDetail =
                response
                    .json()
                    .await
                    .change_context(MarketError::ResponseParse { coin: id.clone() })?;

            Ok(raw.into_record())
        })
    }
}

// ── REST response types ───────────────────────────────────────────────────────

/// Subset of the `/coins/{id}` payload we report on. Every field is optional;
/// a missing field reduces to `Unknown` instead of failing the record.
#[derive(Debug, Deserialize)]
struct CoinDetail {
    name: Option<String>,
    symbol: Option<String>,
    market_data: Option<MarketDataSection>,
}

#[derive(Debug, Default, Deserialize)]
struct MarketDataSection {
    #[serde(default)]
    current_price: CurrencyQuote,
    #[serde(default)]
    market_cap: CurrencyQuote,
    #[serde(default)]
    total_volume: CurrencyQuote,
}

/// Currency → value map reduced to the single currency we report.
#[derive(Debug, Default, Deserialize)]
struct CurrencyQuote {
    usd: Option<f64>,
}

impl CoinDetail {
    fn into_record(self) -> MarketRecord {
        let market_data = self.market_data.unwrap_or_default();
        MarketRecord {
            name: self.name.unwrap_or_else(|| "Unknown".to_owned()),
            symbol: self.symbol.unwrap_or_else(|| "Unknown".to_owned()),
            current_price_usd: UsdValue::from(market_data.current_price.usd),
            market_cap_usd: UsdValue::from(market_data.market_cap.usd),
            total_volume_usd: UsdValue::from(market_data.total_volume.usd),
        }
    }
}
