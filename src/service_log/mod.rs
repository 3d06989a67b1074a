//! Service log module - turns a service-visit form into a log sheet.
//!
//! - `models` - raw form, canonical record and output discriminator
//! - `normalizer` - form → canonical record
//! - `handlers` - the `/generate` endpoint

pub mod handlers;
pub mod models;
pub mod normalizer;

pub use handlers::config;
pub use models::{CanonicalRecord, DocumentKind, OutputFormat, ServiceVisitForm};
pub use normalizer::{normalize, NormalizeError};

use actix_web::HttpResponse;
use thiserror::Error;

use crate::generators::GeneratorError;
use crate::StatusResponse;

/// Failures that abort a `/generate` request.
#[derive(Debug, Error)]
pub enum ServiceLogError {
    #[error(transparent)]
    Format(#[from] NormalizeError),
    #[error("failed to render document: {0}")]
    Render(#[from] GeneratorError),
    #[error("rendering was interrupted: {0}")]
    Blocking(String),
    #[error("failed to read rendered document: {0}")]
    ReadDocument(#[source] std::io::Error),
}

impl From<ServiceLogError> for HttpResponse {
    fn from(error: ServiceLogError) -> Self {
        let body = StatusResponse::error(error.to_string());
        match error {
            ServiceLogError::Format(_) => HttpResponse::BadRequest().json(body),
            _ => HttpResponse::InternalServerError().json(body),
        }
    }
}
