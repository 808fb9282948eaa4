use error_stack::Report;
use futures::future::BoxFuture;
use tracing::info;

use crate::error::PublishError;
use crate::model::Notification;
use crate::publish::{Publisher, SinkKind};

/// Logs notifications through the tracing pipeline instead of delivering
/// them. Used for local runs.
pub struct TerminalPublisher;

impl Publisher for TerminalPublisher {
    fn kind(&self) -> SinkKind {
        SinkKind::Terminal
    }

    fn publish(
        &self,
        notification: &Notification,
    ) -> BoxFuture<'_, Result<(), Report<PublishError>>> {
        let notification = notification.clone();
        Box::pin(async move {
            info!(subject = %notification.subject, "{}", notification.body);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn terminal_publisher_never_fails() {
        let publisher = TerminalPublisher;
        let notification = Notification {
            subject: "Cryptocurrency Update".into(),
            body: "Cryptocurrency Update for Bitcoin (btc):\n".into(),
        };
        assert!(publisher.publish(&notification).await.is_ok());
        assert_eq!(publisher.kind(), SinkKind::Terminal);
    }
}
