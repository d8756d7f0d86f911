use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordCountError {
    #[error("Input resource not found: {name} (searched: {searched})")]
    ResourceNotFound { name: String, searched: String },

    #[error("Failed to read input '{path}': {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write output '{path}': {reason}")]
    WriteError { path: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed output at {location}: {message}")]
    ParseError { location: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WordCountError {
    pub fn write(path: impl Into<String>, err: std::io::Error) -> Self {
        let reason = match err.kind() {
            std::io::ErrorKind::AlreadyExists => "destination already exists".to_string(),
            std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
            _ => err.to_string(),
        };
        WordCountError::WriteError {
            path: path.into(),
            reason,
        }
    }

    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        WordCountError::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WordCountError::ResourceNotFound { .. } | WordCountError::ReadError { .. } => {
                ErrorCategory::Input
            }
            WordCountError::WriteError { .. } => ErrorCategory::Output,
            WordCountError::ConfigError { .. } | WordCountError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            WordCountError::ParseError { .. }
            | WordCountError::ProcessingError { .. }
            | WordCountError::SerializationError(_)
            | WordCountError::CsvError(_) => ErrorCategory::Processing,
            WordCountError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WordCountError::ConfigError { .. } | WordCountError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            WordCountError::ResourceNotFound { .. }
            | WordCountError::ReadError { .. }
            | WordCountError::WriteError { .. }
            | WordCountError::ParseError { .. }
            | WordCountError::SerializationError(_)
            | WordCountError::CsvError(_) => ErrorSeverity::High,
            WordCountError::ProcessingError { .. } | WordCountError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 程序結束碼；所有錯誤皆為致命，永不回傳 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WordCountError::ResourceNotFound { name, .. } => {
                format!("Could not find the input file '{}'", name)
            }
            WordCountError::ReadError { path, .. } => {
                format!("Could not read the input file '{}'", path)
            }
            WordCountError::WriteError { path, reason } => {
                format!("Could not write results to '{}': {}", path, reason)
            }
            WordCountError::ConfigError { message } => format!("Invalid configuration: {}", message),
            WordCountError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WordCountError::ResourceNotFound { .. } => {
                "Place spark_example.txt under ./resources or pass --input <path>"
            }
            WordCountError::ReadError { .. } => {
                "Check file permissions and that the input is valid UTF-8 text"
            }
            WordCountError::WriteError { .. } => {
                "Remove the existing output directory or choose another with --output-path"
            }
            WordCountError::ConfigError { .. } | WordCountError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and run again"
            }
            WordCountError::ParseError { .. } => {
                "Make sure the output was written with the same --format"
            }
            _ => "Re-run with --verbose for more details",
        }
    }
}

pub type Result<T> = std::result::Result<T, WordCountError>;
