//! HTTP front end: document upload, OCR, and field extraction.
//!
//! Routes:
//! - `POST /api/process-document` multipart `document` (image) + `documentType`
//! - `GET /health`

pub mod error;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use idscan_core::models::config::IdscanConfig;
use idscan_core::{DocumentType, ExtractionResult, Extractor, OcrProvider};

pub use error::ApiError;

/// Room for multipart boundaries and the form fields around the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared, read-only request context.
pub struct AppState {
    pub extractor: Extractor<'static>,
    pub ocr: Arc<dyn OcrProvider>,
    pub language: String,
    pub default_document_type: DocumentType,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(config: &IdscanConfig, ocr: Arc<dyn OcrProvider>) -> Self {
        Self {
            extractor: Extractor::new().with_fallback(config.extraction.fallback_document_type),
            ocr,
            language: config.ocr.language.clone(),
            default_document_type: config.extraction.default_document_type,
            max_upload_bytes: config.server.max_upload_bytes,
            allowed_origins: config.server.allowed_origins.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessData {
    extracted_info: ExtractionResult,
}

#[derive(Serialize)]
struct ProcessResponse {
    success: bool,
    data: ProcessData,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes + MULTIPART_OVERHEAD;
    let cors = cors_layer(&state.allowed_origins);

    let api = Router::new().route("/process-document", post(process_document));

    Router::new()
        .nest("/api", api)
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

struct Upload {
    bytes: Vec<u8>,
    document_type: Option<String>,
}

async fn read_upload(multipart: &mut Multipart, max_bytes: usize) -> Result<Upload, ApiError> {
    let mut bytes = None;
    let mut document_type = None;

    let to_api = |err: MultipartError| multipart_error(err, max_bytes);

    while let Some(field) = multipart.next_field().await.map_err(to_api)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "document" => {
                let is_image = field
                    .content_type()
                    .is_some_and(|ct| ct.starts_with("image/"));
                if !is_image {
                    return Err(ApiError::NotAnImage);
                }

                let data = field.bytes().await.map_err(to_api)?;
                if data.len() > max_bytes {
                    return Err(ApiError::TooLarge(max_bytes));
                }
                bytes = Some(data.to_vec());
            }
            "documentType" => {
                let text = field.text().await.map_err(to_api)?;
                document_type = Some(text.trim().to_string()).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    Ok(Upload {
        bytes: bytes.ok_or(ApiError::NoFile)?,
        document_type,
    })
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::TooLarge(max_bytes)
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

async fn process_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let start = Instant::now();
    let upload = read_upload(&mut multipart, state.max_upload_bytes).await?;

    let document_type = match upload.document_type {
        Some(id) => state.extractor.resolve(&id)?,
        None => state.default_document_type,
    };

    info!(
        "Processing {} byte upload as {} with {}",
        upload.bytes.len(),
        document_type,
        state.ocr.name()
    );

    let ocr = Arc::clone(&state.ocr);
    let language = state.language.clone();
    let text = tokio::task::spawn_blocking(move || ocr.recognize(&upload.bytes, &language))
        .await
        .map_err(|e| ApiError::Internal(format!("OCR task failed: {}", e)))??;

    let extracted_info = state.extractor.extract_typed(document_type, &text)?;

    info!(
        "Processed {} in {} ms (confidence {:?})",
        document_type,
        start.elapsed().as_millis(),
        extracted_info.confidence_score
    );

    Ok(Json(ProcessResponse {
        success: true,
        data: ProcessData { extracted_info },
    }))
}
