//! Core error type
//!
//! Only a missing credential is fatal; every "no data" outcome in this
//! domain is encoded as a `NotFound` status or pathway value instead.

/// Error from the classification pipeline or the pathway cache.
#[derive(Debug)]
pub enum CoreError {
    /// No Sherpa API key was passed and none is configured. Caller
    /// configuration defect; no classification is possible without it.
    MissingSherpaApiKey,
    /// Pathway cache file could not be read or written.
    CacheIo(std::io::Error),
    /// Pathway cache file is not a valid JSON object.
    CacheFormat(serde_json::Error),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSherpaApiKey => write!(
                f,
                "no Sherpa API key available (pass one explicitly or set SHERPA_API_KEY)"
            ),
            Self::CacheIo(e) => write!(f, "pathway cache IO: {e}"),
            Self::CacheFormat(e) => write!(f, "pathway cache format: {e}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        Self::CacheIo(e)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::CacheFormat(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_env_var() {
        let msg = format!("{}", CoreError::MissingSherpaApiKey);
        assert!(msg.contains("SHERPA_API_KEY"));
    }

    #[test]
    fn display_cache_io() {
        let err = CoreError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(format!("{err}").contains("pathway cache IO"));
    }
}
