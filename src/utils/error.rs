use thiserror::Error;

/// Failures of the live fetch collaborator.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status} for zone {zone}")]
    Status { zone: String, status: u16 },

    #[error("failed to decode sights for zone {zone}: {message}")]
    Decode { zone: String, message: String },
}

/// Failures of the persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("sight '{sight_name}' already exists in {zone}")]
    Duplicate { zone: String, sight_name: String },

    #[error("store backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum SightError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store failed: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Caller supplied a bad request.
    Low,
    /// Nothing matched; retrying with other input may help.
    Medium,
    /// A collaborator failed.
    High,
    /// The tool cannot start.
    Critical,
}

impl SightError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SightError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        SightError::NotFound {
            message: message.into(),
        }
    }

    /// HTTP status the request boundary reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            SightError::InvalidArgument { .. } => 400,
            SightError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SightError::InvalidArgument { .. } => ErrorSeverity::Low,
            SightError::NotFound { .. } => ErrorSeverity::Medium,
            SightError::Fetch(_) | SightError::Store(_) | SightError::IoError(_) => {
                ErrorSeverity::High
            }
            SightError::ConfigError { .. }
            | SightError::InvalidConfigValueError { .. }
            | SightError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SightError::InvalidArgument { message } => format!("輸入錯誤: {}", message),
            SightError::NotFound { message } => format!("查無資料: {}", message),
            SightError::Fetch(e) => format!("無法從網站取得景點資料: {}", e),
            SightError::Store(e) => format!("資料庫操作失敗: {}", e),
            SightError::IoError(e) => format!("檔案存取失敗: {}", e),
            SightError::ConfigError { message } => format!("配置錯誤: {}", message),
            SightError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置欄位 {} 不正確: {}", field, reason)
            }
            SightError::MissingConfigError { field } => format!("缺少必要配置: {}", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SightError::InvalidArgument { .. } => "Provide a non-empty zone name, e.g. 中正 or 中正區",
            SightError::NotFound { .. } => "Run `refresh` first or check the zone/id spelling",
            SightError::Fetch(_) => "Check the source endpoint and network connectivity",
            SightError::Store(_) | SightError::IoError(_) => {
                "Check that the store path is writable and the file is not corrupted"
            }
            SightError::ConfigError { .. }
            | SightError::InvalidConfigValueError { .. }
            | SightError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, SightError>;
