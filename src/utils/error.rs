use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Port catalog error: {message}")]
    CatalogError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RouteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RouteError::CsvError(_)
            | RouteError::SerializationError(_)
            | RouteError::CatalogError { .. } => ErrorCategory::Data,
            RouteError::ConfigError { .. }
            | RouteError::ConfigValidationError { .. }
            | RouteError::InvalidConfigValueError { .. }
            | RouteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RouteError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RouteError::CsvError(_) => "Make sure the CSV catalog has the header UNLOCODE,port_name,country,latitude,longitude",
            RouteError::IoError(_) => "Check that the input file exists and the output directory is writable",
            RouteError::SerializationError(_) => "Make sure the port catalog is a valid JSON array",
            RouteError::CatalogError { .. } => "Fix the offending port entry in the catalog",
            RouteError::MissingConfigError { .. } => "Provide the missing value via CLI flag, environment variable or TOML file",
            RouteError::ConfigError { .. }
            | RouteError::ConfigValidationError { .. }
            | RouteError::InvalidConfigValueError { .. } => "Review the configuration values and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;

/// 單一組合解析失敗的原因；只記錄為診斷資訊，不會中斷批次
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("service returned status {0}")]
    ServiceStatus(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
