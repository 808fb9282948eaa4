pub mod redis;
pub mod terminal;

use std::fmt;

use error_stack::Report;
use futures::future::BoxFuture;

use crate::error::PublishError;
use crate::model::Notification;

/// Delivery sink selectable from config.
///
/// String representations match the config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Redis,
    Terminal,
}

impl SinkKind {
    /// Parse a config-format string into a `SinkKind`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "redis" => Some(Self::Redis),
            "terminal" => Some(Self::Terminal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sink for formatted notifications.
///
/// Uses `BoxFuture` (from `futures` crate) instead of `async fn` in trait
/// to keep the trait object-safe (`dyn Publisher`).
pub trait Publisher: Send + Sync {
    fn kind(&self) -> SinkKind;

    /// Deliver one notification to the configured topic.
    fn publish(
        &self,
        notification: &Notification,
    ) -> BoxFuture<'_, Result<(), Report<PublishError>>>;
}
