use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[cfg(feature = "client")]
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    Parse(String),

    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("A firm name is required to generate a report")]
    MissingFirmName,

    #[error("Firm not found: {0}")]
    FirmNotFound(String),

    #[error("Incorrect password")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportError {
    /// The network call could not complete or the server refused it.
    pub fn is_transport(&self) -> bool {
        match self {
            #[cfg(feature = "client")]
            ReportError::Transport(_) => true,
            ReportError::Status { .. } => true,
            _ => false,
        }
    }

    /// A response arrived but did not have the expected structure.
    pub fn is_parse(&self) -> bool {
        matches!(self, ReportError::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let status = ReportError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert!(status.is_transport());
        assert!(!status.is_parse());

        let parse = ReportError::Parse("missing citations".to_string());
        assert!(parse.is_parse());
        assert!(!parse.is_transport());

        assert!(!ReportError::EmptyPrompt.is_transport());
        assert!(!ReportError::EmptyPrompt.is_parse());
    }

    #[test]
    fn test_status_error_message() {
        let err = ReportError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API returned status 500: boom");
    }
}
