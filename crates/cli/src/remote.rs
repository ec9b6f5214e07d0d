//! `finmap files` / `finmap elements` — read-only service queries.

use finmap_client::MappingClient;

use crate::exit_codes::EXIT_ERROR;
use crate::{api_error, CliError};

pub fn cmd_files(client: &MappingClient, json: bool) -> Result<(), CliError> {
    let files = client.list_files().map_err(api_error)?;

    if json {
        println!(
            "{}",
            serde_json::to_string(&files)
                .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?
        );
        return Ok(());
    }

    if files.is_empty() {
        eprintln!("No source files available on {}", client.api_base());
        return Ok(());
    }
    for file in &files {
        println!("{}", file);
    }
    Ok(())
}

pub fn cmd_elements(client: &MappingClient, file: &str, json: bool) -> Result<(), CliError> {
    if file.trim().is_empty() {
        return Err(CliError::usage("source file name must not be empty"));
    }

    let elements = client.predefined_elements(file).map_err(api_error)?;

    if json {
        println!(
            "{}",
            serde_json::to_string(&elements)
                .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?
        );
        return Ok(());
    }

    if elements.is_empty() {
        eprintln!("No predefined elements for '{}'", file);
        return Ok(());
    }
    for el in &elements {
        println!("{:<40} {}", el.excel_element, el.exel_cell_value);
    }
    Ok(())
}
