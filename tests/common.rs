#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use service_log_server::archive::{ArchiveError, ArchiveRequest, Archiver};
use service_log_server::generators::{GeneratedDocument, Generator, GeneratorError};
use service_log_server::service_log::{CanonicalRecord, DocumentKind};

pub const STUB_PDF: &[u8] = b"%PDF-1.7\n% stub log sheet\n%%EOF";

/// PDF generator that skips Typst and counts how often it runs.
#[derive(Default)]
pub struct StubPdfGenerator {
    calls: AtomicUsize,
}

impl StubPdfGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Generator for StubPdfGenerator {
    fn generate(&self, record: &CanonicalRecord) -> Result<GeneratedDocument, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        GeneratedDocument::from_bytes(
            STUB_PDF,
            record.file_name(DocumentKind::Pdf),
            DocumentKind::Pdf,
        )
    }
}

/// Generator that always fails as if the compiler crashed.
pub struct FailingGenerator;

impl Generator for FailingGenerator {
    fn generate(&self, _record: &CanonicalRecord) -> Result<GeneratedDocument, GeneratorError> {
        Err(GeneratorError::TypstExit(1))
    }
}

/// How a [`RecordingArchiver`] answers.
#[derive(Clone, Copy)]
pub enum ArchiveBehaviour {
    Accept,
    Reject,
    Hang,
}

/// Archiver that remembers every request it receives.
pub struct RecordingArchiver {
    behaviour: ArchiveBehaviour,
    requests: tokio::sync::Mutex<Vec<ArchiveRequest>>,
}

impl RecordingArchiver {
    pub fn new(behaviour: ArchiveBehaviour) -> Self {
        Self {
            behaviour,
            requests: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<ArchiveRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Archiver for RecordingArchiver {
    async fn archive(&self, request: &ArchiveRequest) -> Result<(), ArchiveError> {
        self.requests.lock().await.push(request.clone());
        match self.behaviour {
            ArchiveBehaviour::Accept => Ok(()),
            ArchiveBehaviour::Reject => Err(ArchiveError::Status(503)),
            ArchiveBehaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }
}

/// Standard valid submission, urlencoded field by field.
pub fn form_fields(format: &str) -> Vec<(&'static str, String)> {
    vec![
        ("company", "Acme Corp".to_string()),
        ("date", "2024-03-07".to_string()),
        ("in_time", "09:00".to_string()),
        ("in_period", "AM".to_string()),
        ("out_time", "04:30".to_string()),
        ("out_period", "PM".to_string()),
        ("works", "Filter change\r\nPump check".to_string()),
        ("workers", "Arun\r\nBala".to_string()),
        ("visit_type", "Scheduled".to_string()),
        ("staff_name", "Ravi".to_string()),
        ("format", format.to_string()),
    ]
}

pub fn timeout() -> Duration {
    Duration::from_millis(200)
}
