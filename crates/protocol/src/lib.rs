//! Mapping service wire types — v1 frozen field names.
//!
//! This crate is the single source of truth for the JSON exchanged with the
//! mapping service:
//!
//! - `GET  /api/excel/files`    → `[FileEntry]`
//! - `GET  /api/excel/elements?sheetName=…` → `[PredefinedElement]`
//! - `POST /api/excel/save`     ← `[SheetPayload]`, → `SaveResponse`
//! - `GET  /api/excel/data`     → `[SavedSheet]`
//!
//! The field names are **frozen**, including the service's historical
//! misspellings (`excellSheetName`, `exelCellValue`). The server keys off the
//! exact strings; renaming a Rust field is fine, changing a `rename` is a
//! breaking protocol change and requires an `API_VERSION` bump.

use serde::{Deserialize, Serialize};

/// Current wire contract version. Increment for breaking changes.
pub const API_VERSION: u32 = 1;

// =============================================================================
// GET /api/excel/files
// =============================================================================

/// One selectable source file, as returned by the files endpoint.
///
/// The server attaches bookkeeping fields (size, upload date); clients only
/// consume `fileName`, so unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(rename = "fileName", default)]
    pub file_name: String,
}

// =============================================================================
// GET /api/excel/elements
// =============================================================================

/// A server-supplied default line-item/cell pair for a chosen source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedElement {
    #[serde(rename = "excelElement", default)]
    pub excel_element: String,
    #[serde(rename = "exelCellValue", default)]
    pub exel_cell_value: String,
}

// =============================================================================
// POST /api/excel/save
// =============================================================================

/// One line-item → cell mapping inside a [`SheetPayload`].
///
/// Same wire shape as [`PredefinedElement`]; kept as a distinct type because
/// the two travel in opposite directions and may diverge independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementPayload {
    #[serde(rename = "excelElement")]
    pub excel_element: String,
    #[serde(rename = "exelCellValue")]
    pub exel_cell_value: String,
}

/// One named sheet in the save request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPayload {
    #[serde(rename = "excellSheetName")]
    pub excell_sheet_name: String,
    #[serde(rename = "excelElements")]
    pub excel_elements: Vec<ElementPayload>,
}

/// Response to the save request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    /// Human-readable detail. Empty when the server omits it.
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// GET /api/excel/data
// =============================================================================

/// A previously saved sheet, as returned by the saved-data endpoint.
///
/// Same wire shape as [`SheetPayload`]; elements may be absent on sheets
/// saved by older service versions, hence the `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSheet {
    #[serde(rename = "excellSheetName", default)]
    pub excell_sheet_name: String,
    #[serde(rename = "excelElements", default)]
    pub excel_elements: Vec<ElementPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entry_ignores_unknown_fields() {
        let json = r#"{"fileName":"report.xlsx","sizeBytes":1024,"uploadedBy":"alice"}"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.file_name, "report.xlsx");
    }

    #[test]
    fn save_response_message_defaults_to_empty() {
        let resp: SaveResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, "");
    }

    #[test]
    fn saved_sheet_without_elements() {
        let sheet: SavedSheet =
            serde_json::from_str(r#"{"excellSheetName":"legacy.xlsx"}"#).unwrap();
        assert_eq!(sheet.excell_sheet_name, "legacy.xlsx");
        assert!(sheet.excel_elements.is_empty());
    }
}
