// Error taxonomy: fatal bootstrap errors vs. transient per-tick sampling errors.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fatal at startup; the process exits non-zero with a one-line diagnostic.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("cannot read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("cannot read cf config {path:?}: {source}")]
    CliConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cf config {path:?}: {source}")]
    CliConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no space targeted; run `cf target -s <space>` first")]
    NoTargetSpace,

    #[error("app '{name}' not found in the targeted space")]
    AppNotFound { name: String },

    #[error("app lookup failed: {reason}")]
    Lookup { reason: String },
}

/// One failed sampling tick. Every variant is recovered by skipping the tick.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("stats fetch failed: {reason}")]
    Fetch { reason: String },

    #[error("stats fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("stats response malformed: {reason}")]
    Decode { reason: String },

    #[error("reference instance \"0\" missing from stats")]
    MissingReferenceInstance,

    #[error("bad usage timestamp {value:?}: {source}")]
    BadTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl SampleError {
    /// True for errors about the shape of the response rather than getting it.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            SampleError::Decode { .. }
                | SampleError::MissingReferenceInstance
                | SampleError::BadTimestamp { .. }
        )
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        if self.is_decode() { "decode" } else { "fetch" }
    }
}
