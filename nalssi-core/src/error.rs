use std::path::PathBuf;

/// Everything that can go wrong talking to the weather API.
///
/// None of these are fatal: the service turns each of them (except a 404 on
/// a city lookup) into a fallback to demo data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("API key was rejected (401)")]
    Unauthorized,

    #[error("location not found (404)")]
    NotFound,

    #[error("API rate limit exceeded (429)")]
    RateLimited,

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ProviderError::Unauthorized,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited,
            _ => ProviderError::Status {
                status,
                body: truncate_body(body),
            },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiaryError {
    #[error("diary text is empty")]
    EmptyText,

    #[error("diary I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
