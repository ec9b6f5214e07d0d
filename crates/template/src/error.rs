use std::fmt;

use crate::model::{ElementId, SheetId};

/// Errors from editor operations that name a missing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// The referenced sheet does not exist (never created, or deleted).
    UnknownSheet(SheetId),
    /// The referenced element does not exist within the sheet.
    UnknownElement(SheetId, ElementId),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSheet(sheet) => write!(f, "unknown sheet (id {})", sheet.0),
            Self::UnknownElement(sheet, el) => {
                write!(f, "unknown element (id {}) in sheet (id {})", el.0, sheet.0)
            }
        }
    }
}

impl std::error::Error for EditorError {}

/// The first save-blocking rule violation found in the sheet collection.
///
/// Validation short-circuits: one violation per scan, no aggregation.
/// Positions are 1-based and refer to display order; sheets are named by
/// their display label so messages stay meaningful for unnamed sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing to save.
    NoSheets,
    /// A sheet's name is empty or whitespace-only.
    BlankSheetName { position: usize },
    /// Two sheets share the same trimmed name.
    DuplicateSheetName { name: String },
    /// A sheet has no elements.
    NoElements { sheet: String },
    /// An element's line-item label is empty or whitespace-only.
    BlankElementName { sheet: String, position: usize },
    /// An element's cell reference is empty or whitespace-only.
    BlankCellValue { sheet: String, position: usize },
    /// Two elements in one sheet share the same trimmed line-item label.
    DuplicateElementName { sheet: String, name: String },
    /// Two elements in one sheet share the same trimmed cell reference.
    DuplicateCellValue { sheet: String, cell: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSheets => write!(f, "no sheets to save"),
            Self::BlankSheetName { position } => {
                write!(f, "sheet {} has no source file selected", position)
            }
            Self::DuplicateSheetName { name } => {
                write!(f, "duplicate sheet name '{}'", name)
            }
            Self::NoElements { sheet } => {
                write!(f, "sheet '{}' has no elements", sheet)
            }
            Self::BlankElementName { sheet, position } => {
                write!(f, "sheet '{}': element {} has a blank line item", sheet, position)
            }
            Self::BlankCellValue { sheet, position } => {
                write!(f, "sheet '{}': element {} has a blank cell value", sheet, position)
            }
            Self::DuplicateElementName { sheet, name } => {
                write!(f, "sheet '{}': duplicate line item '{}'", sheet, name)
            }
            Self::DuplicateCellValue { sheet, cell } => {
                write!(f, "sheet '{}': duplicate cell value '{}'", sheet, cell)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
