//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Geometry has no bounds")]
    EmptyGeometry,

    #[error("Map error: {0}")]
    Map(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_http_status() {
        assert_eq!(format!("{}", Error::HttpStatus(503)), "HTTP status 503");
    }

    #[test]
    fn test_error_display_geometry() {
        let error = Error::InvalidGeometry("unknown type 'Circle'".to_string());
        assert_eq!(format!("{}", error), "Invalid geometry: unknown type 'Circle'");
        assert_eq!(format!("{}", Error::EmptyGeometry), "Geometry has no bounds");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
