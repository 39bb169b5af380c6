// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for AmpliFi Exporter application

use std::fmt;
use thiserror::Error;

/// Maximum number of response body characters kept in an error for diagnostics
const MAX_BODY_CHARS: usize = 512;

/// Step of the poll cycle an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoginPage,
    Login,
    InfoPage,
    FullInfo,
    Translate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoginPage => "login page",
            Self::Login => "login",
            Self::InfoPage => "info page",
            Self::FullInfo => "full info",
            Self::Translate => "translate",
        };
        f.write_str(name)
    }
}

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Router rejected the credentials
    #[error("Authentication error during {stage}: {message}")]
    Authentication { stage: Stage, message: String },

    /// Connection failure or request timeout
    #[error("Transport error during {stage}: {source}")]
    Transport {
        stage: Stage,
        source: reqwest::Error,
    },

    /// Router answered with an unexpected HTTP status
    #[error("Unexpected HTTP status {status} during {stage}: {body}")]
    Status {
        stage: Stage,
        status: u16,
        body: String,
    },

    /// Malformed HTML/JSON or missing token
    #[error("Parse error during {stage}: {message}")]
    Parse { stage: Stage, message: String },

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl AppError {
    pub(crate) fn transport(stage: Stage, source: reqwest::Error) -> Self {
        Self::Transport { stage, source }
    }

    pub(crate) fn status(stage: Stage, status: u16, body: &str) -> Self {
        Self::Status {
            stage,
            status,
            body: truncate_body(body),
        }
    }

    pub(crate) fn parse(stage: Stage, message: impl Into<String>) -> Self {
        Self::Parse {
            stage,
            message: message.into(),
        }
    }

    pub(crate) fn authentication(stage: Stage, message: impl Into<String>) -> Self {
        Self::Authentication {
            stage,
            message: truncate_body(&message.into()),
        }
    }

    /// Stage of the poll cycle the error belongs to, if any
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Authentication { stage, .. }
            | Self::Transport { stage, .. }
            | Self::Status { stage, .. }
            | Self::Parse { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = AppError::Config("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_status_error_mentions_stage_and_code() {
        let err = AppError::status(Stage::FullInfo, 403, "forbidden");
        assert_eq!(
            err.to_string(),
            "Unexpected HTTP status 403 during full info: forbidden"
        );
        assert_eq!(err.stage(), Some(Stage::FullInfo));
    }

    #[test]
    fn test_parse_error_message() {
        let err = AppError::parse(Stage::LoginPage, "csrf token not found");
        assert_eq!(
            err.to_string(),
            "Parse error during login page: csrf token not found"
        );
    }

    #[test]
    fn test_authentication_error_message() {
        let err = AppError::authentication(Stage::Login, "status 401: bad password");
        assert_eq!(
            err.to_string(),
            "Authentication error during login: status 401: bad password"
        );
        assert_eq!(err.stage(), Some(Stage::Login));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(MAX_BODY_CHARS * 2);
        let err = AppError::status(Stage::InfoPage, 500, &body);
        match err {
            AppError::Status { body, .. } => {
                assert_eq!(body.len(), MAX_BODY_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_body_kept_verbatim() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_addr_parse_error_conversion() {
        let parse_result = "invalid".parse::<std::net::SocketAddr>();
        assert!(parse_result.is_err());
        let app_err: AppError = parse_result.unwrap_err().into();
        assert!(matches!(app_err, AppError::AddrParse(_)));
    }
}
