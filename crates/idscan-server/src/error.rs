//! Request errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use idscan_core::{ExtractionError, OcrError};

/// Failure of a document request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Not an image! Please upload an image.")]
    NotAnImage,

    #[error("File too large. Maximum {0} bytes.")]
    TooLarge(usize),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFile | Self::NotAnImage | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Extraction(ExtractionError::UnsupportedDocumentType(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Ocr(OcrError::InvalidImage(_)) => StatusCode::BAD_REQUEST,
            Self::Ocr(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Server-side failures stay generic.
    fn public_message(&self) -> String {
        match self {
            Self::Ocr(OcrError::InvalidImage(_)) => Self::NotAnImage.to_string(),
            Self::Ocr(_) | Self::Internal(_) => "Error processing document".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Error processing document: {}", self);
        }

        let body = ErrorBody {
            success: false,
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
