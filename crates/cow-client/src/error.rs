use {model::order::OrderUid, reqwest::StatusCode};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request or the relay's response did not have the expected shape.
    #[error("invalid request or response: {0:#}")]
    Validation(anyhow::Error),
    /// Non-2xx response. The body is logged when the error is created and
    /// kept out of the message so it is not logged twice.
    #[error("relay responded with {status}")]
    Http {
        status: StatusCode,
        body: String,
        source: reqwest::Error,
    },
    #[error("failed to reach relay")]
    Transport(#[from] reqwest::Error),
    #[error("order {uid} has unrecognized status {status:?}")]
    UnrecognizedOrderStatus { uid: OrderUid, status: String },
    #[error("failed to sign typed data")]
    Signing(#[from] alloy::signers::Error),
    #[error("invalid relay url")]
    Url(#[from] url::ParseError),
}
