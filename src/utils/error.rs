use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Unknown search field: {token}")]
    InvalidField { token: String },

    #[error("No contact with {field} = {value}")]
    NotFound { field: String, value: String },

    #[error("Selection {index} is out of range (0..{candidates})")]
    InvalidSelection { index: usize, candidates: usize },

    #[error("Invalid choice: {input}")]
    InvalidChoice { input: String },

    #[error("Address book is empty")]
    EmptyStore,

    #[error("Record {record} has a field with delimiter characters: {field}")]
    UnencodableField { record: usize, field: String },

    #[error("Cannot access file {path}: {source}")]
    IoUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input closed")]
    InputClosed,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Input,
    Persistence,
    Configuration,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ContactError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContactError::InvalidField { .. } | ContactError::NotFound { .. } => {
                ErrorCategory::Lookup
            }
            ContactError::InvalidSelection { .. } | ContactError::InvalidChoice { .. } => {
                ErrorCategory::Input
            }
            ContactError::EmptyStore
            | ContactError::UnencodableField { .. }
            | ContactError::IoUnavailable { .. }
            | ContactError::CsvError(_) => ErrorCategory::Persistence,
            ContactError::ConfigError { .. } | ContactError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ContactError::IoError(_) | ContactError::InputClosed => ErrorCategory::Terminal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Persistence => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Terminal => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ContactError::InvalidField { token } => {
                format!("'{}' is not a searchable field", token)
            }
            ContactError::NotFound { value, .. } => format!("Contact not found: {}", value),
            ContactError::InvalidSelection { index, .. } => {
                format!("Invalid index: {}", index)
            }
            ContactError::InvalidChoice { input } => format!("Invalid choice: {}", input),
            ContactError::EmptyStore => "The address book is empty".to_string(),
            ContactError::UnencodableField { field, .. } => {
                format!("Cannot save '{}' without quoting", field)
            }
            ContactError::IoUnavailable { path, .. } => format!("Cannot open file: {}", path),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ContactError::InvalidField { .. } => "Use one of name/n, gender/g, phone/p, class/c",
            ContactError::NotFound { .. } => "Check the value, or list all contacts first",
            ContactError::InvalidSelection { .. } => "Pick one of the listed indexes",
            ContactError::InvalidChoice { .. } => "Enter one of the listed menu numbers",
            ContactError::EmptyStore => "Add or load contacts before saving",
            ContactError::UnencodableField { .. } => {
                "Remove commas, quotes and line breaks, or set csv.quote_special = true"
            }
            ContactError::IoUnavailable { .. } => "Check that the path exists and is accessible",
            ContactError::CsvError(_) => "Check the file is valid CSV",
            ContactError::ConfigError { .. } | ContactError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments"
            }
            ContactError::IoError(_) | ContactError::InputClosed => "Restart the program",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
