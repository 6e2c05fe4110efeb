use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog source {url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Catalog document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vehicle not found: {id}")]
    NotFound { id: String },

    #[error("Missing query parameter: {name}")]
    MissingParameter { name: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CatalogError {
    /// 資料來源無法取得或內容無法解析，頁面一律顯示同一則錯誤訊息
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::Parse(_) | Self::Io(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(_) | Self::Status { .. } | Self::Parse(_) => {
                "Не удалось загрузить список авто".to_string()
            }
            Self::Io(e) => format!("File access failed: {}", e),
            Self::NotFound { id } => format!("No vehicle with id '{}'", id),
            Self::MissingParameter { name } => format!("Query parameter '{}' is required", name),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::Status { .. } => {
                "Check that the catalog source is reachable and serves the listing"
            }
            Self::Parse(_) => "Make sure the listing is a JSON array of vehicle records",
            Self::Io(_) => "Check the file path and permissions",
            Self::NotFound { .. } => "Pick an id that exists in the listing",
            Self::MissingParameter { .. } => "Pass the vehicle id, e.g. --query 'id=42'",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_classification() {
        let status = CatalogError::Status {
            status: 500,
            url: "http://example.com/data/cars.json".to_string(),
        };
        assert!(status.is_load_failure());
        assert_eq!(status.user_friendly_message(), "Не удалось загрузить список авто");

        let parse = CatalogError::from(serde_json::from_str::<Vec<u32>>("{").unwrap_err());
        assert!(parse.is_load_failure());
        assert_eq!(parse.user_friendly_message(), status.user_friendly_message());

        let not_found = CatalogError::NotFound {
            id: "99".to_string(),
        };
        assert!(!not_found.is_load_failure());
        assert!(!not_found.is_config_error());
    }

    #[test]
    fn test_config_error_classification() {
        let err = CatalogError::InvalidConfigValueError {
            field: "source.location".to_string(),
            value: "ftp://cars".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_load_failure());
    }
}
