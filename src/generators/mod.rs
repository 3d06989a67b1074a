//! Generators module - renders a canonical record into a downloadable document.
//!
//! - `pdf` - landscape log sheet compiled with Typst
//! - `xlsx` - single-sheet workbook
//!
//! Every render happens in its own temporary directory, owned by the returned
//! [`GeneratedDocument`] and removed when it is dropped.

pub mod common;
pub mod engine;
pub mod pdf;
pub mod styles;
pub mod traits;
pub mod xlsx;

pub use engine::TypstRenderEngine;
pub use pdf::ServiceLogPdfGenerator;
pub use styles::{PdfStyle, SheetStyle};
pub use traits::Generator;
pub use xlsx::ServiceLogXlsxGenerator;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

use crate::service_log::models::DocumentKind;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to load Typst template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteTypst(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    TypstExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("failed to build spreadsheet: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to write document: {0}")]
    WriteDocument(#[source] std::io::Error),
}

/// A rendered document living in a private temporary directory.
///
/// The directory (and the file in it) is deleted when this value is dropped.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub kind: DocumentKind,
    path: PathBuf,
    _workspace: TempDir,
}

impl GeneratedDocument {
    /// Wrap a file that was rendered inside `workspace`.
    pub fn from_workspace(
        workspace: TempDir,
        path: PathBuf,
        filename: String,
        kind: DocumentKind,
    ) -> Self {
        Self {
            filename,
            kind,
            path,
            _workspace: workspace,
        }
    }

    /// Store already-rendered bytes in a fresh workspace.
    pub fn from_bytes(
        bytes: &[u8],
        filename: String,
        kind: DocumentKind,
    ) -> Result<Self, GeneratorError> {
        let workspace = tempfile::tempdir().map_err(GeneratorError::TempDir)?;
        let path = workspace.path().join(format!("output.{}", kind.extension()));
        fs::write(&path, bytes).map_err(GeneratorError::WriteDocument)?;
        Ok(Self::from_workspace(workspace, path, filename, kind))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_is_removed_on_drop() {
        let doc = GeneratedDocument::from_bytes(b"%PDF-1.7", "a.pdf".into(), DocumentKind::Pdf)
            .unwrap();
        let path = doc.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7");

        drop(doc);
        assert!(!path.exists());
    }

    #[test]
    fn test_each_document_gets_its_own_path() {
        let first = GeneratedDocument::from_bytes(b"one", "x.pdf".into(), DocumentKind::Pdf).unwrap();
        let second = GeneratedDocument::from_bytes(b"two", "x.pdf".into(), DocumentKind::Pdf).unwrap();
        assert_ne!(first.path(), second.path());
        assert_eq!(fs::read(first.path()).unwrap(), b"one");
    }
}
