// Integration tests enforcing the --json stdout contract.
//
// Stdout from --json commands must be exactly one valid JSON value — no
// banners, no progress lines. Anything human-oriented goes to stderr.

use std::process::Command;

use httpmock::prelude::*;

fn finmap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_finmap"))
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(stdout: &str) -> serde_json::Value {
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");
    serde_json::from_str(trimmed).unwrap_or_else(|e| {
        panic!("stdout must be valid JSON.\nParse error: {}\nstdout:\n{}", e, trimmed)
    })
}

#[test]
fn files_json_is_an_array_of_names() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/excel/files");
        then.status(200).json_body(serde_json::json!([
            {"fileName": "financial-report.xlsx"},
            {"fileName": "sales-data.xlsx"}
        ]));
    });

    let output = finmap()
        .args(["files", "--json", "--server", &server.base_url()])
        .output()
        .expect("finmap files --json");
    assert!(output.status.success());

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val, serde_json::json!(["financial-report.xlsx", "sales-data.xlsx"]));
}

#[test]
fn elements_json_keeps_wire_field_names() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/excel/elements")
            .query_param("sheetName", "report.xlsx");
        then.status(200)
            .json_body(serde_json::json!([{"excelElement": "Revenue", "exelCellValue": "B2"}]));
    });

    let output = finmap()
        .args(["elements", "report.xlsx", "--json", "--server", &server.base_url()])
        .output()
        .expect("finmap elements --json");
    assert!(output.status.success());

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val[0]["excelElement"], "Revenue");
    assert_eq!(val[0]["exelCellValue"], "B2");
}

#[test]
fn saved_json_shape_and_paging() {
    let server = MockServer::start();
    let sheets: Vec<serde_json::Value> = (1..=8)
        .map(|i| {
            serde_json::json!({
                "excellSheetName": format!("sheet-{}.xlsx", i),
                "excelElements": [{"excelElement": "Revenue", "exelCellValue": "B2"}]
            })
        })
        .collect();
    server.mock(|when, then| {
        when.method(GET).path("/api/excel/data");
        then.status(200).json_body(serde_json::json!(sheets));
    });

    let output = finmap()
        .args(["saved", "--json", "--page", "2", "--server", &server.base_url()])
        .output()
        .expect("finmap saved --json");
    assert!(output.status.success());

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["page"], 2);
    assert_eq!(val["totalPages"], 2);
    assert_eq!(val["totalSheets"], 8);
    assert_eq!(val["totalElements"], 8);
    // Page 2 of 8 sheets at the default page size of 6 holds sheets 7-8.
    let page = val["sheets"].as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["excellSheetName"], "sheet-7.xlsx");
}

#[test]
fn saved_json_search_filters_elements_not_sheets() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/excel/data");
        then.status(200).json_body(serde_json::json!([
            {"excellSheetName": "a.xlsx", "excelElements": [
                {"excelElement": "Revenue", "exelCellValue": "B2"},
                {"excelElement": "Cost", "exelCellValue": "B3"}
            ]},
            {"excellSheetName": "b.xlsx", "excelElements": [
                {"excelElement": "Units", "exelCellValue": "C4"}
            ]}
        ]));
    });

    let output = finmap()
        .args(["saved", "--json", "--search", "revenue", "--server", &server.base_url()])
        .output()
        .expect("finmap saved --search");
    assert!(output.status.success());

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    let page = val["sheets"].as_array().unwrap();
    // Both sheets appear; only matching elements remain.
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["excelElements"].as_array().unwrap().len(), 1);
    assert_eq!(page[1]["excelElements"].as_array().unwrap().len(), 0);
}

#[test]
fn network_failure_exits_with_api_code() {
    // Closed port: the files command must fail with the network exit code.
    let output = finmap()
        .args(["files", "--server", "http://127.0.0.1:9"])
        .output()
        .expect("finmap files");
    assert_eq!(output.status.code(), Some(20));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {}", stderr);
}
