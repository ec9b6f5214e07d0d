//! Save-time validation — the `canSave` rules.
//!
//! Full synchronous re-scan over the collection, short-circuiting on the
//! first violation. Nothing is validated during editing; these rules only
//! gate the save action.
//!
//! Comparison is trim-only and case-sensitive: `"Report"` and `"report"`
//! are distinct, `" report "` and `"report"` collide.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::Sheet;

/// Check the whole collection against the save rules.
///
/// Rules, in scan order:
/// - the collection is non-empty;
/// - every sheet's trimmed name is non-empty and unique across sheets;
/// - every sheet has at least one element;
/// - every element's trimmed line item and cell value are non-empty;
/// - within a sheet, trimmed line items are unique and trimmed cell values
///   are unique (two independent dimensions, scoped per sheet).
pub fn validate(sheets: &[Sheet]) -> Result<(), ValidationError> {
    if sheets.is_empty() {
        return Err(ValidationError::NoSheets);
    }

    let mut seen_names: HashSet<&str> = HashSet::new();

    for (idx, sheet) in sheets.iter().enumerate() {
        let name = sheet.source_name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankSheetName { position: idx + 1 });
        }
        if !seen_names.insert(name) {
            return Err(ValidationError::DuplicateSheetName { name: name.to_string() });
        }

        if sheet.elements.is_empty() {
            return Err(ValidationError::NoElements { sheet: name.to_string() });
        }

        let mut seen_items: HashSet<&str> = HashSet::new();
        let mut seen_cells: HashSet<&str> = HashSet::new();

        for (el_idx, element) in sheet.elements.iter().enumerate() {
            let item = element.element_name.trim();
            let cell = element.cell_value.trim();

            if item.is_empty() {
                return Err(ValidationError::BlankElementName {
                    sheet: name.to_string(),
                    position: el_idx + 1,
                });
            }
            if cell.is_empty() {
                return Err(ValidationError::BlankCellValue {
                    sheet: name.to_string(),
                    position: el_idx + 1,
                });
            }

            if !seen_items.insert(item) {
                return Err(ValidationError::DuplicateElementName {
                    sheet: name.to_string(),
                    name: item.to_string(),
                });
            }
            if !seen_cells.insert(cell) {
                return Err(ValidationError::DuplicateCellValue {
                    sheet: name.to_string(),
                    cell: cell.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, ElementId, SheetId};

    fn sheet(id: u64, name: &str, elements: &[(&str, &str)]) -> Sheet {
        Sheet {
            id: SheetId(id),
            source_name: name.to_string(),
            elements: elements
                .iter()
                .enumerate()
                .map(|(i, (item, cell))| Element {
                    id: ElementId(id * 100 + i as u64),
                    element_name: item.to_string(),
                    cell_value: cell.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_collection_rejected() {
        assert_eq!(validate(&[]), Err(ValidationError::NoSheets));
    }

    #[test]
    fn valid_collection_accepted() {
        let sheets = vec![
            sheet(1, "report.xlsx", &[("Revenue", "B2"), ("Cost", "B3")]),
            sheet(2, "sales-data.xlsx", &[("Units", "C4")]),
        ];
        assert_eq!(validate(&sheets), Ok(()));
    }

    #[test]
    fn blank_sheet_name_rejected() {
        let sheets = vec![
            sheet(1, "report.xlsx", &[("Revenue", "B2")]),
            sheet(2, "   ", &[("Cost", "B3")]),
        ];
        assert_eq!(validate(&sheets), Err(ValidationError::BlankSheetName { position: 2 }));
    }

    #[test]
    fn duplicate_sheet_name_rejected_after_trim() {
        let sheets = vec![
            sheet(1, "report.xlsx", &[("Revenue", "B2")]),
            sheet(2, "  report.xlsx  ", &[("Cost", "B3")]),
        ];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::DuplicateSheetName { name: "report.xlsx".into() })
        );
    }

    #[test]
    fn sheet_names_are_case_sensitive() {
        // Open question resolved: case variants are distinct names.
        let sheets = vec![
            sheet(1, "Report.xlsx", &[("Revenue", "B2")]),
            sheet(2, "report.xlsx", &[("Cost", "B3")]),
        ];
        assert_eq!(validate(&sheets), Ok(()));
    }

    #[test]
    fn sheet_without_elements_rejected() {
        let sheets = vec![sheet(1, "report.xlsx", &[])];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::NoElements { sheet: "report.xlsx".into() })
        );
    }

    #[test]
    fn blank_element_fields_rejected() {
        let sheets = vec![sheet(1, "report.xlsx", &[("Revenue", "B2"), ("  ", "B3")])];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::BlankElementName { sheet: "report.xlsx".into(), position: 2 })
        );

        let sheets = vec![sheet(1, "report.xlsx", &[("Revenue", ""), ("Cost", "B3")])];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::BlankCellValue { sheet: "report.xlsx".into(), position: 1 })
        );
    }

    #[test]
    fn duplicate_line_item_rejected() {
        let sheets = vec![sheet(1, "report.xlsx", &[("Revenue", "B2"), ("Revenue ", "B3")])];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::DuplicateElementName {
                sheet: "report.xlsx".into(),
                name: "Revenue".into(),
            })
        );
    }

    #[test]
    fn duplicate_cell_value_rejected() {
        let sheets = vec![sheet(1, "report.xlsx", &[("Revenue", "B2"), ("Cost", " B2")])];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::DuplicateCellValue {
                sheet: "report.xlsx".into(),
                cell: "B2".into(),
            })
        );
    }

    #[test]
    fn duplicates_scoped_per_sheet_not_global() {
        // The same line item and cell may repeat across different sheets.
        let sheets = vec![
            sheet(1, "report.xlsx", &[("Revenue", "B2")]),
            sheet(2, "sales-data.xlsx", &[("Revenue", "B2")]),
        ];
        assert_eq!(validate(&sheets), Ok(()));
    }

    #[test]
    fn first_violation_wins() {
        // Sheet 1's blank element is hit before sheet 2's duplicate name.
        let sheets = vec![
            sheet(1, "report.xlsx", &[("", "B2")]),
            sheet(2, "report.xlsx", &[("Cost", "B3")]),
        ];
        assert_eq!(
            validate(&sheets),
            Err(ValidationError::BlankElementName { sheet: "report.xlsx".into(), position: 1 })
        );
    }
}
