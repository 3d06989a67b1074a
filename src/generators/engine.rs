//! Typst rendering engine.
//!
//! Handles the low-level details of invoking the compiler inside a prepared
//! workspace and locating the output PDF.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use super::GeneratorError;

/// Stateless engine for compiling Typst sources to PDF.
#[derive(Debug, Clone)]
pub struct TypstRenderEngine {
    binary: PathBuf,
}

impl TypstRenderEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Compile `source_name` inside the workspace to `output_name`.
    ///
    /// The workspace is the Typst root, so the source may only reference
    /// files that were copied into it.
    pub fn compile(
        &self,
        workspace: &TempDir,
        source_name: &str,
        output_name: &str,
    ) -> Result<PathBuf, GeneratorError> {
        let source_path = workspace.path().join(source_name);
        let output_path = workspace.path().join(output_name);

        log::debug!(
            "compiling {} with {}",
            source_path.display(),
            self.binary.display()
        );

        let status = Command::new(&self.binary)
            .arg("compile")
            .arg("--root")
            .arg(workspace.path())
            .arg(&source_path)
            .arg(&output_path)
            .current_dir(workspace.path())
            .status()
            .map_err(GeneratorError::TypstIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(GeneratorError::TypstExit(code));
        }

        if !output_path.is_file() {
            return Err(GeneratorError::ReadPdf(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} was not produced", output_path.display()),
            )));
        }

        Ok(output_path)
    }
}

impl Default for TypstRenderEngine {
    fn default() -> Self {
        Self::new("typst")
    }
}
