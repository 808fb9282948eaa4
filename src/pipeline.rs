use tracing::{info, warn};

use crate::format;
use crate::market::MarketDataProvider;
use crate::model::{Notification, RunSummary};
use crate::publish::Publisher;

/// Longest body prefix included in publish-failure logs.
const LOG_BODY_PREFIX_CHARS: usize = 80;

/// Run one full fetch → format → publish pass over `identifiers`.
///
/// Failures are isolated per item: a failed fetch drops that identifier's
/// message, a failed publish drops only that message. The summary carries
/// the counts either way; the caller decides whether to surface them.
pub async fn run(
    identifiers: &[String],
    provider: &dyn MarketDataProvider,
    publisher: &dyn Publisher,
    subject: &str,
) -> RunSummary {
    let mut summary = RunSummary {
        identifiers: identifiers.len(),
        ..RunSummary::default()
    };

    let mut notifications: Vec<Notification> = Vec::with_capacity(identifiers.len());
    for id in identifiers {
        match provider.fetch_coin(id).await {
            Ok(record) => notifications.push(Notification {
                subject: subject.to_owned(),
                body: format::render_update(&record),
            }),
            Err(report) => {
                warn!(coin = %id, error = ?report, "market data fetch failed, skipping");
                summary.fetch_failures += 1;
            }
        }
    }

    for notification in &notifications {
        match publisher.publish(notification).await {
            Ok(()) => summary.published += 1,
            Err(report) => {
                let preview: String = notification
                    .body
                    .chars()
                    .take(LOG_BODY_PREFIX_CHARS)
                    .collect();
                warn!(error = ?report, body = %preview, "publish failed, skipping");
                summary.publish_failures += 1;
            }
        }
    }

    info!(
        identifiers = summary.identifiers,
        fetch_failures = summary.fetch_failures,
        published = summary.published,
        publish_failures = summary.publish_failures,
        "run complete"
    );

    summary
}
