//! `finmap push` — validate a payload file and save it in one shot.
//!
//! The scriptable counterpart to `finmap edit`: reads a JSON array of
//! sheets (the save wire shape) from a file or stdin, runs it through the
//! same save rules, and posts it. `--check` stops after validation, so CI
//! can lint templates without touching the service.

use std::io::Read;
use std::path::PathBuf;

use finmap_client::MappingClient;
use finmap_protocol::SheetPayload;
use finmap_template::TemplateEditor;

use crate::exit_codes::EXIT_TEMPLATE_INVALID;
use crate::{api_error, CliError};

pub fn cmd_push(
    client: &MappingClient,
    input: Option<PathBuf>,
    check: bool,
) -> Result<(), CliError> {
    let contents = match &input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CliError::usage(format!("cannot read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::usage(format!("cannot read stdin: {}", e)))?;
            buf
        }
    };

    let payload: Vec<SheetPayload> = serde_json::from_str(&contents)
        .map_err(|e| CliError::usage(format!("not a valid sheet payload: {}", e)))?;

    let editor = TemplateEditor::from_payload(&payload);
    if let Err(violation) = editor.validate() {
        return Err(CliError {
            code: EXIT_TEMPLATE_INVALID,
            message: format!("invalid template: {}", violation),
            hint: None,
        });
    }

    if check {
        eprintln!(
            "ok: {} sheet(s), {} element(s)",
            payload.len(),
            payload.iter().map(|s| s.excel_elements.len()).sum::<usize>()
        );
        return Ok(());
    }

    let message = client.save_templates(&payload).map_err(api_error)?;
    if message.is_empty() {
        eprintln!("Data saved successfully");
    } else {
        eprintln!("{}", message);
    }
    Ok(())
}
