//! Style configurations for the two renderers.
//!
//! Each generator owns its style value and passes it into every render, so
//! nothing about one request's layout can leak into another.

/// Layout of the PDF log sheet. Lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStyle {
    pub title: String,
    pub margin: f32,
    pub title_size: f32,
    pub title_space_after: f32,
    pub body_size: f32,
    pub header_size: f32,
    pub grid_width: f32,
    /// Header row shading, `#rrggbb`.
    pub header_fill: String,
    pub row_padding: f32,
    pub column_widths: [f32; 8],
    pub logo_width: f32,
    pub logo_height: f32,
}

/// A4 landscape width in points.
pub const A4_LANDSCAPE_WIDTH: f32 = 841.89;

impl PdfStyle {
    /// Width available between the left and right margins.
    pub fn printable_width(&self) -> f32 {
        A4_LANDSCAPE_WIDTH - 2.0 * self.margin
    }
}

impl Default for PdfStyle {
    fn default() -> Self {
        Self {
            title: "SERVICE LOG SHEET".to_string(),
            margin: 15.0,
            title_size: 18.0,
            title_space_after: 20.0,
            body_size: 9.0,
            header_size: 10.0,
            grid_width: 0.5,
            header_fill: "#d3d3d3".to_string(),
            row_padding: 8.0,
            column_widths: [78.0, 98.0, 205.0, 98.0, 78.0, 78.0, 98.0, 78.0],
            logo_width: 60.0,
            logo_height: 35.0,
        }
    }
}

/// Layout of the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    pub title: String,
    pub sheet_name: String,
    pub title_size: f64,
    /// Widths for columns A through I.
    pub column_widths: [f64; 9],
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            title: "SERVICE LOG SHEET".to_string(),
            sheet_name: "Service Log".to_string(),
            title_size: 14.0,
            column_widths: [15.0, 20.0, 40.0, 20.0, 10.0, 10.0, 15.0, 20.0, 15.0],
        }
    }
}
