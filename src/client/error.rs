use std::time::Duration;
use thiserror::Error;

/// Failures at the prediction service boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ClientError::Timeout(Duration::from_secs(10)).to_string(),
            "request timed out after 10s"
        );
        assert_eq!(
            ClientError::Status {
                status: 502,
                body: "bad gateway".into()
            }
            .to_string(),
            "service returned HTTP 502: bad gateway"
        );
    }
}
