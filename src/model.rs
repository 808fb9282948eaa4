use std::fmt;

use serde::Serialize;

/// USD-denominated metric that may be absent from the upstream payload.
///
/// Renders the numeric value in its natural form, or the literal `Unknown`
/// when the upstream response omitted the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsdValue {
    Known(f64),
    Unknown,
}

impl From<Option<f64>> for UsdValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Known(v),
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for UsdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v}"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Parsed snapshot of one asset's market data.
#[derive(Debug, Clone)]
pub struct MarketRecord {
    pub name: String,
    pub symbol: String,
    pub current_price_usd: UsdValue,
    pub market_cap_usd: UsdValue,
    pub total_volume_usd: UsdValue,
}

/// One formatted update ready for delivery to the topic.
#[derive(Debug, Clone)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Per-item outcome counts for one run.
///
/// The invocation response never reflects these; they exist so callers and
/// logs can tell "all good" from "everything silently failed".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub identifiers: usize,
    pub fetch_failures: usize,
    pub published: usize,
    pub publish_failures: usize,
}

/// Fixed response emitted when a run completes, regardless of per-item
/// failures.
#[derive(Debug, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: &'static str,
}

impl InvocationResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: "Data processed and published",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_value_displays_natural_numeric_form() {
        assert_eq!(UsdValue::Known(42000.5).to_string(), "42000.5");
        assert_eq!(UsdValue::Known(1234567890.0).to_string(), "1234567890");
    }

    #[test]
    fn usd_value_missing_displays_unknown() {
        assert_eq!(UsdValue::Unknown.to_string(), "Unknown");
        assert_eq!(UsdValue::from(None).to_string(), "Unknown");
    }

    #[test]
    fn invocation_response_serializes_with_status_code_key() {
        let json = serde_json::to_string(&InvocationResponse::ok()).unwrap();
        assert_eq!(
            json,
            r#"{"statusCode":200,"body":"Data processed and published"}"#
        );
    }
}
