use thiserror::Error;

#[derive(Error, Debug)]
pub enum HitError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Source responded with status {status}: {url}")]
    SourceStatusError { url: String, status: u16 },

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Character data must be a JSON array, found {found}")]
    DataShapeError { found: String },

    #[error("Invalid character record field '{field}': {reason}")]
    RecordError { field: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid damage value '{input}': {reason}")]
    InvalidDamage { input: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Data,
    Configuration,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HitError::HttpError(_) | HitError::SourceStatusError { .. } => ErrorCategory::Source,
            HitError::SerializationError(_)
            | HitError::DataShapeError { .. }
            | HitError::RecordError { .. } => ErrorCategory::Data,
            HitError::ConfigError { .. } | HitError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            HitError::InvalidDamage { .. } => ErrorCategory::Input,
            HitError::CsvError(_) | HitError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Source | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            HitError::InvalidDamage { .. } => "Please enter a valid damage value.".to_string(),
            HitError::HttpError(_) | HitError::SourceStatusError { .. } => {
                "Could not load the character data.".to_string()
            }
            HitError::SerializationError(_)
            | HitError::DataShapeError { .. }
            | HitError::RecordError { .. } => {
                "The character data file is not in the expected format.".to_string()
            }
            HitError::ConfigError { message } => format!("Configuration problem: {}", message),
            HitError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            HitError::CsvError(_) | HitError::IoError(_) => {
                format!("Could not write the result: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Use a whole number greater than zero, e.g. 2600",
            ErrorCategory::Source => "Check that the data source URL is reachable",
            ErrorCategory::Data => {
                "Make sure the file is a JSON array of {name, hp, icon} objects"
            }
            ErrorCategory::Configuration => "Review the config file and command line flags",
            ErrorCategory::Output => "Check that the output stream is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, HitError>;
