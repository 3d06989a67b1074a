//! PDF log sheet generator.
//!
//! Builds a Typst entry file that feeds the record into the layout function
//! from `static/service_log.typ`, then compiles it in a per-call workspace.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::common::{typst_content, typst_string};
use super::engine::TypstRenderEngine;
use super::styles::PdfStyle;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};
use crate::service_log::models::{CanonicalRecord, DocumentKind};

pub const TEMPLATE_FILE: &str = "service_log.typ";
const ENTRY_FILE: &str = "main.typ";
const OUTPUT_FILE: &str = "service_log.pdf";

/// Table header, one entry per column.
pub const PDF_HEADERS: [&str; 8] = [
    "Date",
    "Company Name",
    "Works Carried Out",
    "Workers",
    "Time In/Out",
    "Visit",
    "Staff Name",
    "Signature",
];

/// Generator for the landscape service log sheet.
pub struct ServiceLogPdfGenerator {
    template: String,
    logo_path: PathBuf,
    style: PdfStyle,
    engine: TypstRenderEngine,
}

impl ServiceLogPdfGenerator {
    /// Load the layout template from `template_dir`.
    ///
    /// The logo is looked up on every render, so it may appear or disappear
    /// while the server runs.
    pub fn new(
        template_dir: &Path,
        logo_path: impl Into<PathBuf>,
        engine: TypstRenderEngine,
    ) -> Result<Self, GeneratorError> {
        let template = fs::read_to_string(template_dir.join(TEMPLATE_FILE))
            .map_err(GeneratorError::TemplateIo)?;
        Ok(Self {
            template,
            logo_path: logo_path.into(),
            style: PdfStyle::default(),
            engine,
        })
    }

    pub fn with_style(mut self, style: PdfStyle) -> Self {
        self.style = style;
        self
    }

    /// Markup for the single data row. `logo` is the workspace-relative path
    /// of the staged logo, if any.
    pub fn table_cells(&self, record: &CanonicalRecord, logo: Option<&str>) -> [String; 8] {
        let time_range = format!("{}\nto\n{}", record.time_in(), record.time_out());

        [
            typst_content(record.date()),
            typst_content(record.company()),
            typst_content(record.works()),
            typst_content(record.workers()),
            typst_content(&time_range),
            typst_content(record.visit_type()),
            self.staff_cell(record.staff_name(), logo),
            "[]".to_string(),
        ]
    }

    fn staff_cell(&self, staff_name: &str, logo: Option<&str>) -> String {
        match logo {
            Some(logo) => format!(
                "[#stack(dir: ttb, spacing: 4pt, image({}, width: {}pt, height: {}pt), {})]",
                typst_string(logo),
                self.style.logo_width,
                self.style.logo_height,
                typst_content(staff_name),
            ),
            None => typst_content(staff_name),
        }
    }

    /// Complete Typst entry file for one record.
    pub fn build_source(&self, record: &CanonicalRecord, logo: Option<&str>) -> String {
        let style = &self.style;
        let columns = style
            .column_widths
            .iter()
            .map(|w| format!("{w}pt"))
            .collect::<Vec<_>>()
            .join(", ");
        let headers = PDF_HEADERS
            .iter()
            .map(|h| typst_string(h))
            .collect::<Vec<_>>()
            .join(", ");
        let row = self
            .table_cells(record, logo)
            .iter()
            .map(|cell| format!("    {cell},"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"#import "{template}": service-log

#service-log(
  title: {title},
  style: (
    margin: {margin}pt,
    title-size: {title_size}pt,
    title-space: {title_space}pt,
    body-size: {body_size}pt,
    header-size: {header_size}pt,
    grid: {grid}pt,
    header-fill: rgb({fill}),
    row-padding: {padding}pt,
    columns: ({columns}),
  ),
  headers: ({headers}),
  row: (
{row}
  ),
)
"#,
            template = TEMPLATE_FILE,
            title = typst_string(&style.title),
            margin = style.margin,
            title_size = style.title_size,
            title_space = style.title_space_after,
            body_size = style.body_size,
            header_size = style.header_size,
            grid = style.grid_width,
            fill = typst_string(&style.header_fill),
            padding = style.row_padding,
        )
    }

    /// Copy the logo into the workspace. A missing logo only costs the image.
    fn stage_logo(&self, workspace: &TempDir) -> Option<String> {
        if !self.logo_path.is_file() {
            log::warn!(
                "logo not found at {}, rendering staff name without it",
                self.logo_path.display()
            );
            return None;
        }

        let extension = self
            .logo_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("jpg");
        let staged = format!("logo.{extension}");

        match fs::copy(&self.logo_path, workspace.path().join(&staged)) {
            Ok(_) => Some(staged),
            Err(e) => {
                log::warn!("failed to stage logo {}: {}", self.logo_path.display(), e);
                None
            }
        }
    }
}

impl Generator for ServiceLogPdfGenerator {
    fn generate(&self, record: &CanonicalRecord) -> Result<GeneratedDocument, GeneratorError> {
        let workspace = tempfile::tempdir().map_err(GeneratorError::TempDir)?;

        fs::write(workspace.path().join(TEMPLATE_FILE), &self.template)
            .map_err(GeneratorError::WriteTypst)?;

        let logo = self.stage_logo(&workspace);
        let source = self.build_source(record, logo.as_deref());
        fs::write(workspace.path().join(ENTRY_FILE), source).map_err(GeneratorError::WriteTypst)?;

        let path = self.engine.compile(&workspace, ENTRY_FILE, OUTPUT_FILE)?;

        Ok(GeneratedDocument::from_workspace(
            workspace,
            path,
            record.file_name(DocumentKind::Pdf),
            DocumentKind::Pdf,
        ))
    }
}
