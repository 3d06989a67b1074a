//! Archival forwarding - best-effort upload of the rendered PDF to the
//! external storage collaborator.
//!
//! The collaborator buckets files by company and month, so the payload carries
//! the original ISO date rather than the display date.

mod webhook;

pub use webhook::WebhookArchiver;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::generators::GeneratedDocument;
use crate::service_log::models::CanonicalRecord;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive endpoint is not configured")]
    NotConfigured,
    #[error("archive request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("archive endpoint answered with status {0}")]
    Status(u16),
}

/// Form fields expected by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveRequest {
    #[serde(rename = "fileData")]
    pub file_data: String,
    pub filename: String,
    pub company: String,
    /// `YYYY-MM-DD`, as submitted.
    pub date: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl ArchiveRequest {
    pub fn new(record: &CanonicalRecord, document: &GeneratedDocument, bytes: &[u8]) -> Self {
        Self {
            file_data: STANDARD.encode(bytes),
            filename: document.filename.clone(),
            company: record.company().to_string(),
            date: record.raw_date().to_string(),
            mime_type: document.mime_type().to_string(),
        }
    }
}

/// Destination for archived documents.
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn archive(&self, request: &ArchiveRequest) -> Result<(), ArchiveError>;
}

/// Archiver used when no endpoint is configured.
#[derive(Debug, Default)]
pub struct DisabledArchiver;

#[async_trait]
impl Archiver for DisabledArchiver {
    async fn archive(&self, _request: &ArchiveRequest) -> Result<(), ArchiveError> {
        Err(ArchiveError::NotConfigured)
    }
}

/// Result of a bounded archival attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Archived,
    Failed(String),
    TimedOut,
}

impl ArchiveOutcome {
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// User-facing description of a failed attempt.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Archived => None,
            Self::Failed(reason) => Some(format!("Failed to archive log sheet: {reason}")),
            Self::TimedOut => Some("Failed to archive log sheet: storage did not respond in time".to_string()),
        }
    }
}

/// Run one archival attempt, giving up after `deadline`.
///
/// Never returns an error; the outcome is a value the caller decides how to report.
pub async fn archive_with_deadline(
    archiver: &dyn Archiver,
    request: &ArchiveRequest,
    deadline: Duration,
) -> ArchiveOutcome {
    match tokio::time::timeout(deadline, archiver.archive(request)).await {
        Ok(Ok(())) => ArchiveOutcome::Archived,
        Ok(Err(e)) => ArchiveOutcome::Failed(e.to_string()),
        Err(_) => ArchiveOutcome::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_log::models::{DocumentKind, ServiceVisitForm};
    use crate::service_log::normalizer::normalize;

    struct SlowArchiver(Duration);

    #[async_trait]
    impl Archiver for SlowArchiver {
        async fn archive(&self, _request: &ArchiveRequest) -> Result<(), ArchiveError> {
            tokio::time::sleep(self.0).await;
            Ok(())
        }
    }

    fn request() -> ArchiveRequest {
        ArchiveRequest {
            file_data: "JVBERg==".into(),
            filename: "Acme_service_07-03-2024.pdf".into(),
            company: "Acme".into(),
            date: "2024-03-07".into(),
            mime_type: "application/pdf".into(),
        }
    }

    #[test]
    fn test_request_carries_iso_date_and_base64() {
        let record = normalize(&ServiceVisitForm {
            company: Some("Acme Corp".into()),
            date: Some("2024-03-07".into()),
            ..Default::default()
        })
        .unwrap();
        let doc = GeneratedDocument::from_bytes(
            b"%PDF-1.7 body",
            record.file_name(DocumentKind::Pdf),
            DocumentKind::Pdf,
        )
        .unwrap();

        let request = ArchiveRequest::new(&record, &doc, b"%PDF-1.7 body");

        assert_eq!(request.date, "2024-03-07");
        assert_eq!(request.company, "Acme Corp");
        assert_eq!(request.filename, "Acme_Corp_service_07-03-2024.pdf");
        assert_eq!(request.mime_type, "application/pdf");
        assert_eq!(STANDARD.decode(&request.file_data).unwrap(), b"%PDF-1.7 body");
    }

    #[test]
    fn test_request_serializes_collaborator_field_names() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["fileData"], "JVBERg==");
        assert_eq!(value["mimeType"], "application/pdf");
        assert_eq!(value["date"], "2024-03-07");
    }

    #[tokio::test]
    async fn test_disabled_archiver_fails() {
        let outcome = archive_with_deadline(&DisabledArchiver, &request(), Duration::from_secs(1)).await;
        assert_eq!(
            outcome,
            ArchiveOutcome::Failed("archive endpoint is not configured".into())
        );
        assert!(outcome.failure_message().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_slow_archiver_times_out() {
        let archiver = SlowArchiver(Duration::from_secs(5));
        let outcome = archive_with_deadline(&archiver, &request(), Duration::from_millis(50)).await;
        assert_eq!(outcome, ArchiveOutcome::TimedOut);
        assert!(!outcome.is_archived());
    }

    #[tokio::test]
    async fn test_fast_archiver_succeeds() {
        let archiver = SlowArchiver(Duration::from_millis(1));
        let outcome = archive_with_deadline(&archiver, &request(), Duration::from_secs(1)).await;
        assert!(outcome.is_archived());
        assert!(outcome.failure_message().is_none());
    }
}
