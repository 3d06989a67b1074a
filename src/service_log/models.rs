use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw service-visit form as submitted by the browser.
///
/// Every field is optional; the normalizer decides what a missing value means.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ServiceVisitForm {
    pub company: Option<String>,
    /// Visit date in `YYYY-MM-DD` form.
    pub date: Option<String>,
    pub in_time: Option<String>,
    /// `AM` / `PM`
    pub in_period: Option<String>,
    pub out_time: Option<String>,
    pub out_period: Option<String>,
    pub works: Option<String>,
    pub workers: Option<String>,
    pub visit_type: Option<String>,
    pub staff_name: Option<String>,
    /// Output discriminator: `excel`, `drive_excel`, or anything else for a PDF download.
    pub format: Option<String>,
}

/// Which artifact the caller receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Download the PDF log sheet.
    Pdf,
    /// Download the spreadsheet.
    Excel,
    /// Archive only; the caller gets a status payload instead of a file.
    Archive,
}

impl OutputFormat {
    pub fn from_discriminator(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("excel") => Self::Excel,
            Some("drive_excel") => Self::Archive,
            _ => Self::Pdf,
        }
    }
}

/// Document formats the renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Xlsx,
}

impl DocumentKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

/// Normalized, immutable view of one form submission.
///
/// Only the normalizer can build one, so every instance satisfies the
/// date and company invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub(super) company: String,
    pub(super) date: String,
    pub(super) raw_date: String,
    pub(super) works: String,
    pub(super) workers: String,
    pub(super) time_in: String,
    pub(super) time_out: String,
    pub(super) visit_type: String,
    pub(super) staff_name: String,
    pub(super) clean_name: String,
}

impl CanonicalRecord {
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Display date, `DD-MM-YYYY`, or empty when no date was submitted.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The date exactly as submitted (`YYYY-MM-DD`), for consumers that sort by it.
    pub fn raw_date(&self) -> &str {
        &self.raw_date
    }

    pub fn works(&self) -> &str {
        &self.works
    }

    pub fn workers(&self) -> &str {
        &self.workers
    }

    pub fn time_in(&self) -> &str {
        &self.time_in
    }

    pub fn time_out(&self) -> &str {
        &self.time_out
    }

    pub fn visit_type(&self) -> &str {
        &self.visit_type
    }

    pub fn staff_name(&self) -> &str {
        &self.staff_name
    }

    /// Company name with each space replaced by an underscore.
    pub fn clean_name(&self) -> &str {
        &self.clean_name
    }

    /// `{clean_name}_service_{date}.{ext}`
    pub fn file_name(&self, kind: DocumentKind) -> String {
        format!(
            "{}_service_{}.{}",
            self.clean_name,
            self.date,
            kind.extension()
        )
    }
}
