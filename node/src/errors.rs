// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mercury_ledger::error::LedgerError;
use mercury_ledger::history::HistoryError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    History(#[from] HistoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Validation failures go back verbatim; durability and
        // corruption are integrity problems and stay generic.
        let (status, message) = match self {
            ApiError::Ledger(LedgerError::Rejected(rejection)) => {
                (StatusCode::BAD_REQUEST, rejection.to_string())
            }
            ApiError::Ledger(err) => {
                tracing::error!("Ledger operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ledger write failed".to_string(),
                )
            }
            ApiError::History(err) => {
                tracing::error!("History query failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "history query failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
