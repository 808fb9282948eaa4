use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config file")]
    ReadFile,
    #[display("failed to parse config: {reason}")]
    Parse { reason: String },
    #[display("invalid config: {field}")]
    Validation { field: String },
}

#[derive(Debug, Display, Error)]
pub enum SourceError {
    #[display("failed to read coin list")]
    ReadFile,
}

#[derive(Debug, Display, Error)]
pub enum MarketError {
    #[display("request for {coin} failed")]
    Request { coin: String },
    #[display("unexpected HTTP status for {coin}")]
    Status { coin: String },
    #[display("failed to parse response for {coin}")]
    ResponseParse { coin: String },
}

#[derive(Debug, Display, Error)]
pub enum PublishError {
    #[display("failed to connect to message broker")]
    Connect,
    #[display("failed to encode notification")]
    Encode,
    #[display("failed to publish notification")]
    Publish,
}
