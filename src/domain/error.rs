//! Domain error types.

/// Top-level error type for wealthwise.
#[derive(Debug, thiserror::Error)]
pub enum WealthError {
    #[error("invalid portfolio state: {reason}")]
    InvalidPortfolioState { reason: String },

    #[error("failed to parse user context from {source_name}: {reason}")]
    ContextParse { source_name: String, reason: String },

    #[error("failed to import holdings from {file}: {reason}")]
    HoldingsImport { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WealthError {
    pub(crate) fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        WealthError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&WealthError> for std::process::ExitCode {
    fn from(err: &WealthError) -> Self {
        let code: u8 = match err {
            WealthError::Io(_) => 1,
            WealthError::ConfigParse { .. }
            | WealthError::ConfigMissing { .. }
            | WealthError::ConfigInvalid { .. } => 2,
            WealthError::ContextParse { .. }
            | WealthError::HoldingsImport { .. }
            | WealthError::Json(_) => 3,
            WealthError::InvalidPortfolioState { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
