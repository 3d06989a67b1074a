//! Spreadsheet log sheet generator.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use super::styles::SheetStyle;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};
use crate::service_log::models::{CanonicalRecord, DocumentKind};

/// Column headers, A through I.
pub const SHEET_HEADERS: [&str; 9] = [
    "Date",
    "Company Name",
    "Works Carried Out",
    "Workers",
    "In Time",
    "Out Time",
    "Visit Type",
    "Staff Name",
    "Signature",
];

/// Excel refuses cell strings longer than this many characters.
pub const MAX_CELL_CHARS: usize = 32_767;

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const DATA_ROW: u32 = 2;

/// Generator for the three-row service log workbook.
#[derive(Debug, Clone, Default)]
pub struct ServiceLogXlsxGenerator {
    style: SheetStyle,
}

impl ServiceLogXlsxGenerator {
    /// Data row values in header order. The signature is left for pen and paper.
    pub fn row_values(record: &CanonicalRecord) -> [&str; 9] {
        [
            record.date(),
            record.company(),
            record.works(),
            record.workers(),
            record.time_in(),
            record.time_out(),
            record.visit_type(),
            record.staff_name(),
            "",
        ]
    }

    fn build_workbook(&self, record: &CanonicalRecord) -> Result<Workbook, GeneratorError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.style.sheet_name)?;

        let last_col = (SHEET_HEADERS.len() - 1) as u16;

        let title_format = Format::new()
            .set_bold()
            .set_font_size(self.style.title_size)
            .set_align(FormatAlign::Center);
        worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &self.style.title, &title_format)?;

        for (col, header) in SHEET_HEADERS.iter().enumerate() {
            worksheet.write_string(HEADER_ROW, col as u16, *header)?;
        }

        let data_format = Format::new()
            .set_text_wrap()
            .set_align(FormatAlign::Top)
            .set_border(FormatBorder::Thin);

        for (col, value) in Self::row_values(record).iter().enumerate() {
            let col = col as u16;
            if value.is_empty() {
                worksheet.write_blank(DATA_ROW, col, &data_format)?;
            } else {
                worksheet.write_string_with_format(
                    DATA_ROW,
                    col,
                    clamp_cell(value),
                    &data_format,
                )?;
            }
        }

        for (col, width) in self.style.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        Ok(workbook)
    }
}

/// Cut `value` to at most [`MAX_CELL_CHARS`] characters.
pub fn clamp_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

impl Generator for ServiceLogXlsxGenerator {
    fn generate(&self, record: &CanonicalRecord) -> Result<GeneratedDocument, GeneratorError> {
        let workspace = tempfile::tempdir().map_err(GeneratorError::TempDir)?;
        let path = workspace.path().join("service_log.xlsx");

        let mut workbook = self.build_workbook(record)?;
        workbook.save(&path)?;

        Ok(GeneratedDocument::from_workspace(
            workspace,
            path,
            record.file_name(DocumentKind::Xlsx),
            DocumentKind::Xlsx,
        ))
    }
}
