//! `finmap saved` — browse previously saved sheets.
//!
//! Search is a case-insensitive substring match over both element fields;
//! pagination is over sheets (page size 6 by default, matching the service's
//! own viewer). Search narrows the elements shown per sheet, not the sheet
//! list — a sheet with no matching elements still appears, empty.

use finmap_client::MappingClient;
use finmap_protocol::{ElementPayload, SavedSheet};

use crate::{api_error, CliError};

/// Elements of `sheet` that match `search` (empty search matches all).
pub fn filter_elements<'a>(sheet: &'a SavedSheet, search: &str) -> Vec<&'a ElementPayload> {
    let query = search.trim().to_lowercase();
    sheet
        .excel_elements
        .iter()
        .filter(|el| {
            query.is_empty()
                || el.excel_element.to_lowercase().contains(&query)
                || el.exel_cell_value.to_lowercase().contains(&query)
        })
        .collect()
}

/// 1-based page slice over `total` items. Returns `(start, end)` indices;
/// pages past the end are empty.
pub fn page_bounds(total: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    (start, end)
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

pub fn cmd_saved(
    client: &MappingClient,
    search: Option<&str>,
    page: usize,
    page_size: usize,
    json: bool,
) -> Result<(), CliError> {
    if page_size == 0 {
        return Err(CliError::usage("--page-size must be at least 1"));
    }

    let sheets = client.saved_data().map_err(api_error)?;
    let search = search.unwrap_or("");

    let total_sheets = sheets.len();
    let total_elements: usize = sheets.iter().map(|s| s.excel_elements.len()).sum();
    let total_pages = page_count(total_sheets, page_size);
    let (start, end) = page_bounds(total_sheets, page, page_size);
    let page_sheets = &sheets[start..end];

    if json {
        let out = serde_json::json!({
            "page": page,
            "totalPages": total_pages,
            "totalSheets": total_sheets,
            "totalElements": total_elements,
            "sheets": page_sheets
                .iter()
                .map(|sheet| serde_json::json!({
                    "excellSheetName": sheet.excell_sheet_name,
                    "excelElements": filter_elements(sheet, search),
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", out);
        return Ok(());
    }

    if total_sheets == 0 {
        eprintln!("No saved sheets on {}", client.api_base());
        return Ok(());
    }

    println!("{} sheet(s), {} element(s) saved", total_sheets, total_elements);
    for sheet in page_sheets {
        let shown = filter_elements(sheet, search);
        println!("\n{} ({} element(s))", sheet.excell_sheet_name, sheet.excel_elements.len());
        for el in shown {
            println!("  {:<40} {}", el.excel_element, el.exel_cell_value);
        }
    }
    if total_pages > 1 {
        println!("\npage {} of {}", page.max(1).min(total_pages.max(1)), total_pages);
    }
    Ok(())
}
