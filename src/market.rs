pub mod coingecko;

use error_stack::Report;
use futures::future::BoxFuture;

use crate::error::MarketError;
use crate::model::MarketRecord;

/// Abstraction over the upstream price-data API.
///
/// Uses `BoxFuture` (from `futures` crate) instead of `async fn` in trait
/// to keep the trait object-safe (`dyn MarketDataProvider`).
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the current market snapshot for one asset identifier.
    fn fetch_coin(&self, id: &str) -> BoxFuture<'_, Result<MarketRecord, Report<MarketError>>>;
}
