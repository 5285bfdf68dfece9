use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpiderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("retries exhausted for {url} (last status: {last_status})")]
    RetriesExhausted { url: String, last_status: u16 },

    #[error("proxy harvest failed on page {page}: {reason}")]
    HarvestFailed { page: u32, reason: String },
}

pub type Result<T> = std::result::Result<T, SpiderError>;
