use std::sync::Arc;

use chrono::{DateTime, Utc};
use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use redis::AsyncCommands;
use redis::aio::Connection;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PublishError;
use crate::model::Notification;
use crate::publish::{Publisher, SinkKind};

/// Publishes notifications to a Redis pub/sub channel.
///
/// The connection is opened once at startup and shared across publishes. A
/// failed publish reports its error and leaves the connection in place for
/// the next message.
pub struct RedisPublisher {
    connection: Arc<Mutex<Connection>>,
    topic: String,
}

/// Wire envelope for one published notification.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    subject: &'a str,
    body: &'a str,
    published_at: DateTime<Utc>,
}

impl RedisPublisher {
    pub async fn connect(url: &str, topic: String) -> Result<Self, Report<PublishError>> {
        let client = redis::Client::open(url).change_context(PublishError::Connect)?;
        let connection = client
            .get_async_connection()
            .await
            .change_context(PublishError::Connect)
            .attach_with(|| format!("url: {url}"))?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            topic,
        })
    }
}

impl Publisher for RedisPublisher {
    fn kind(&self) -> SinkKind {
        SinkKind::Redis
    }

    fn publish(
        &self,
        notification: &Notification,
    ) -> BoxFuture<'_, Result<(), Report<PublishError>>> {
        let notification = notification.clone();
        Box::pin(async move {
            let envelope = Envelope {
                subject: &notification.subject,
                body: &notification.body,
                published_at: Utc::now(),
            };
            let payload = serde_json::to_string(&envelope).change_context(PublishError::Encode)?;

            let mut conn = self.connection.lock().await;
            conn.publish::<_, _, ()>(&self.topic, payload)
                .await
                .change_context(PublishError::Publish)
                .attach_with(|| format!("topic: {}", self.topic))?;

            debug!(topic = %self.topic, "notification published");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_subject_and_body() {
        let envelope = Envelope {
            subject: "Cryptocurrency Update",
            body: "Cryptocurrency Update for Bitcoin (btc):\n",
            published_at: Utc::now(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["subject"], "Cryptocurrency Update");
        assert_eq!(
            value["body"],
            "Cryptocurrency Update for Bitcoin (btc):\n"
        );
        assert!(value["published_at"].is_string());
    }

    /// Integration test: requires a local Redis. Run with `cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn integration_publish_to_local_redis() {
        let publisher = RedisPublisher::connect("redis://localhost:6379", "coin-updates-test".into())
            .await
            .unwrap();
        let notification = Notification {
            subject: "Cryptocurrency Update".into(),
            body: "test body".into(),
        };
        publisher.publish(&notification).await.unwrap();
    }
}
