//! Domain error types.

/// Top-level error type for fundbot.
#[derive(Debug, thiserror::Error)]
pub enum FundbotError {
    #[error("data source not found: {path}")]
    SourceUnavailable { path: String },

    #[error("malformed data in {path}: {reason}")]
    SourceMalformed { path: String, reason: String },

    #[error("no data for fund '{fund}'")]
    NoDataForFund { fund: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FundbotError> for std::process::ExitCode {
    fn from(err: &FundbotError) -> Self {
        let code: u8 = match err {
            FundbotError::Io(_) => 1,
            FundbotError::ConfigParse { .. } => 2,
            FundbotError::SourceUnavailable { .. } | FundbotError::SourceMalformed { .. } => 3,
            FundbotError::NoDataForFund { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
