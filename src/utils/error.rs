use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreakError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("GraphQL HTTP error: {status} - {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("GraphQL errors: {errors}")]
    GraphQlError { errors: String },

    #[error("User '{username}' not found or no contribution data available")]
    UserNotFound { username: String },

    #[error("Unexpected response format: {message}")]
    DataFormatError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    RemoteData,
    Storage,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StreakError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StreakError::ApiError(_) | StreakError::ApiStatusError { .. } => ErrorCategory::Network,
            StreakError::GraphQlError { .. }
            | StreakError::UserNotFound { .. }
            | StreakError::DataFormatError { .. } => ErrorCategory::RemoteData,
            StreakError::IoError(_) => ErrorCategory::Storage,
            StreakError::SerializationError(_) => ErrorCategory::Internal,
            StreakError::ConfigError { .. }
            | StreakError::MissingConfigError { .. }
            | StreakError::InvalidConfigValueError { .. }
            | StreakError::ValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient network failures are worth retrying on the next scheduled run.
            StreakError::ApiError(_) => ErrorSeverity::Medium,
            StreakError::ApiStatusError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            StreakError::ApiStatusError { .. }
            | StreakError::GraphQlError { .. }
            | StreakError::UserNotFound { .. }
            | StreakError::DataFormatError { .. }
            | StreakError::ConfigError { .. }
            | StreakError::MissingConfigError { .. }
            | StreakError::InvalidConfigValueError { .. }
            | StreakError::ValidationError { .. } => ErrorSeverity::High,
            StreakError::IoError(_) | StreakError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StreakError::ApiError(_) => {
                "Check network connectivity to the GitHub API and try again".to_string()
            }
            StreakError::ApiStatusError { status: 401, .. } => {
                "The token was rejected; regenerate GITHUB_TOKEN and make sure it has read:user scope"
                    .to_string()
            }
            StreakError::ApiStatusError { status, .. } if *status >= 500 || *status == 429 => {
                "GitHub is unavailable or rate limiting; retry later".to_string()
            }
            StreakError::ApiStatusError { .. } => {
                "Verify the API endpoint and token permissions".to_string()
            }
            StreakError::GraphQlError { .. } => {
                "Inspect the GraphQL errors above; the query window must not exceed one year"
                    .to_string()
            }
            StreakError::UserNotFound { username } => {
                format!("Check that '{}' is an existing GitHub login", username)
            }
            StreakError::DataFormatError { .. } => {
                "The API response shape changed; verify the endpoint is GitHub GraphQL".to_string()
            }
            StreakError::IoError(_) => {
                "Check that the output directory is writable".to_string()
            }
            StreakError::SerializationError(_) => {
                "This is an internal error; please report it".to_string()
            }
            StreakError::MissingConfigError { field } => {
                format!("Provide a value for '{}' via CLI flag or config file", field)
            }
            StreakError::ConfigError { .. }
            | StreakError::InvalidConfigValueError { .. }
            | StreakError::ValidationError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach GitHub: {}", self),
            ErrorCategory::RemoteData => format!("GitHub returned unusable data: {}", self),
            ErrorCategory::Storage => format!("Could not write the streak card: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, StreakError>;
