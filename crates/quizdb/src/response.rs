//! Framework-agnostic response bodies for the quiz endpoints.
//!
//! A router turns an operation's result into an [`ApiResponse`] and writes
//! `status` and the JSON `body` with whatever HTTP stack it uses.

use crate::error::{QuizError, QuizResult};
use serde::Serialize;
use serde_json::{Value, json};

pub const MSG_CREATED: &str = "Quiz created successfully";
pub const MSG_UPDATED: &str = "Quiz updated successfully";
pub const MSG_DELETED: &str = "Quiz deleted successfully";

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl From<&QuizError> for ApiError {
    fn from(err: &QuizError) -> Self {
        // Internal failures are reported by status only.
        let error = match err.status_code() {
            500 => "internal server error".to_string(),
            _ => err.to_string(),
        };
        Self { error }
    }
}

/// Success body: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Status code and JSON body ready to be written by a router.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        let body = serde_json::to_value(body).unwrap_or_else(|e| json!({ "error": e.to_string() }));
        Self { status, body }
    }

    pub fn error(err: &QuizError) -> Self {
        Self::json(err.status_code(), &ApiError::from(err))
    }

    /// `200` with the serialized value, or the error mapping.
    pub fn ok<T: Serialize>(result: &QuizResult<T>) -> Self {
        match result {
            Ok(value) => Self::json(200, value),
            Err(err) => Self::error(err),
        }
    }

    /// `201` with `{"message", "quiz"}`, or the error mapping.
    pub fn created<T: Serialize>(result: &QuizResult<T>) -> Self {
        match result {
            Ok(quiz) => Self::json(201, &json!({ "message": MSG_CREATED, "quiz": quiz })),
            Err(err) => Self::error(err),
        }
    }

    /// `200` with a fixed message, or the error mapping.
    pub fn message<T>(result: &QuizResult<T>, message: &str) -> Self {
        match result {
            Ok(_) => Self::json(200, &ApiMessage::new(message)),
            Err(err) => Self::error(err),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
