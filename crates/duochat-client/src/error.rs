use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the `message` field of the JSON body.
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
}
