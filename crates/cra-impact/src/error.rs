use crate::config::ConfigError;
use crate::context::InputError;
use crate::regional::{TableError, UnknownGeography};
use crate::report::ReportError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Table(TableError),
    Input(InputError),
    Geography(UnknownGeography),
    Report(ReportError),
    Json(serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Geography(_) | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Report(ReportError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Report(ReportError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Report(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Table(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Table(err) => write!(f, "regional table error: {}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::Geography(err) => write!(f, "{}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Json(err) => write!(f, "invalid JSON: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Table(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Geography(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Json(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<TableError> for AppError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<UnknownGeography> for AppError {
    fn from(value: UnknownGeography) -> Self {
        Self::Geography(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (
                AppError::Input(InputError::Negative {
                    field: "hard_costs",
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Geography(UnknownGeography("atlantis".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Report(ReportError::NotConfigured),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Report(ReportError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Config(ConfigError::InvalidPort), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
