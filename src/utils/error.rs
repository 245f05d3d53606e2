use thiserror::Error;

/// Longest response excerpt kept in warnings.
pub const BODY_EXCERPT_LEN: usize = 100;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset parsing error: {0}")]
    DatasetParse(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Already exists (409): {body}")]
    AlreadyExists { body: String },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Response is missing field '{field}'")]
    MissingField { field: String },
}

impl SeedError {
    pub fn already_exists(body: &str) -> Self {
        SeedError::AlreadyExists {
            body: excerpt(body),
        }
    }

    pub fn unexpected_status(status: u16, body: &str) -> Self {
        SeedError::UnexpectedStatus {
            status,
            body: excerpt(body),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        SeedError::MissingField {
            field: field.to_string(),
        }
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, SeedError::AlreadyExists { .. })
    }

    /// Short message for the terminal, without the error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SeedError::Http(e) if e.is_connect() => {
                "Could not reach the API. Is the backend running?".to_string()
            }
            SeedError::Http(e) if e.is_timeout() => "The API did not answer in time".to_string(),
            SeedError::Io(e) => format!("Could not read file: {}", e),
            SeedError::DatasetParse(e) => format!("Dataset file is not valid: {}", e.message()),
            SeedError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SeedError::Http(_) => "Check --base-url and that the backend is reachable",
            SeedError::Io(_) => "Check that the dataset path exists and is readable",
            SeedError::DatasetParse(_) | SeedError::Serialization(_) => {
                "Fix the dataset TOML; the built-in data/medconnect.toml is a working template"
            }
            SeedError::Pattern(_) => "Report this as a bug",
            SeedError::InvalidConfigValue { .. } => {
                "Run with --help to see accepted values"
            }
            SeedError::AlreadyExists { .. } => "Nothing to do, the record is already there",
            SeedError::UnexpectedStatus { .. } | SeedError::MissingField { .. } => {
                "Check that the backend version matches the seeder"
            }
        }
    }
}

/// Cuts a response body down to [`BODY_EXCERPT_LEN`] characters.
pub fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}

pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let body = "é".repeat(150);
        let cut = excerpt(&body);
        assert_eq!(cut.chars().count(), BODY_EXCERPT_LEN);
    }

    #[test]
    fn test_unexpected_status_truncates_body() {
        let err = SeedError::unexpected_status(500, &"x".repeat(300));
        match err {
            SeedError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), BODY_EXCERPT_LEN);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_already_exists_detection() {
        assert!(SeedError::already_exists("dup").is_already_exists());
        assert!(!SeedError::unexpected_status(400, "bad").is_already_exists());
    }
}
