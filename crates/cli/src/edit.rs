//! `finmap edit` — interactive template editing session.
//!
//! A line-oriented loop over the editor state machine. State lives only in
//! memory for the duration of the session: a successful save discards it,
//! quitting abandons it, and nothing is written locally.
//!
//! The loop reads from any `BufRead` and writes to any `Write`, so tests
//! can script whole sessions.

use std::io::{self, BufRead, Write};

use finmap_client::MappingClient;
use finmap_template::{
    ElementField, ElementId, FetchApplied, FetchOutcome, SheetId, TemplateEditor,
};

use crate::exit_codes::EXIT_ERROR;
use crate::CliError;

const HELP: &str = "\
commands:
  add                        add a sheet
  rm <n>                     delete sheet n (asks to confirm)
  source <n> <file>          choose sheet n's source file (prefills elements)
  el add <n>                 add an element to sheet n
  el rm <n> <m>              delete element m of sheet n (asks to confirm)
  el set <n> <m> item <v>    set element m's line item
  el set <n> <m> cell <v>    set element m's cell value
  list                       show the collection
  check                      report whether the collection can be saved
  save                       validate and push to the service
  help                       this text
  quit                       leave without saving";

pub fn cmd_edit(client: &MappingClient) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut stdin.lock(), &mut stdout.lock(), client)
}

fn io_err(err: io::Error) -> CliError {
    CliError { code: EXIT_ERROR, message: err.to_string(), hint: None }
}

/// Run one editing session to completion (quit command or EOF).
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    client: &MappingClient,
) -> Result<(), CliError> {
    let mut editor = TemplateEditor::new();

    loop {
        write!(out, "finmap> ").map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            break; // EOF
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => {}
            ["help"] => writeln!(out, "{}", HELP).map_err(io_err)?,
            ["quit"] | ["exit"] => break,

            ["add"] => {
                editor.add_sheet();
                writeln!(out, "sheet {} added", editor.sheets().len()).map_err(io_err)?;
            }

            ["rm", n] => remove_sheet(&mut editor, *n, input, out)?,

            ["source", n, rest @ ..] if !rest.is_empty() => {
                let name = rest.join(" ");
                set_source(&mut editor, client, *n, &name, out)?;
            }

            ["el", "add", n] => add_element(&mut editor, *n, out)?,

            ["el", "rm", n, m] => remove_element(&mut editor, *n, *m, input, out)?,

            ["el", "set", n, m, field @ ("item" | "cell"), rest @ ..] if !rest.is_empty() => {
                let value = rest.join(" ");
                set_element_field(&mut editor, *n, *m, *field, &value, out)?;
            }

            ["list"] => list(&editor, out)?,

            ["check"] => match editor.validate() {
                Ok(()) => writeln!(out, "ok: ready to save").map_err(io_err)?,
                Err(violation) => {
                    writeln!(out, "cannot save: {}", violation).map_err(io_err)?
                }
            },

            ["save"] => {
                if save(&editor, client, out)? {
                    // Saved state is the service's now; start clean.
                    editor = TemplateEditor::new();
                }
            }

            _ => {
                writeln!(out, "unrecognized command (try 'help')").map_err(io_err)?;
            }
        }
    }

    Ok(())
}

// ── Command handlers ────────────────────────────────────────────────

fn add_element<W: Write>(
    editor: &mut TemplateEditor,
    n: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let id = match sheet_at(editor, n) {
        Ok(id) => id,
        Err(msg) => return writeln!(out, "error: {}", msg).map_err(io_err),
    };
    match editor.add_element(id) {
        Ok(_) => {
            let count = editor.sheet(id).map(|s| s.elements.len()).unwrap_or(0);
            writeln!(out, "element {} added", count).map_err(io_err)
        }
        Err(err) => writeln!(out, "error: {}", err).map_err(io_err),
    }
}

fn remove_sheet<R: BufRead, W: Write>(
    editor: &mut TemplateEditor,
    n: &str,
    input: &mut R,
    out: &mut W,
) -> Result<(), CliError> {
    let id = match sheet_at(editor, n) {
        Ok(id) => id,
        Err(msg) => return writeln!(out, "error: {}", msg).map_err(io_err),
    };
    let label = editor.sheet(id).map(|s| s.display_label().to_string()).unwrap_or_default();

    if editor.request_remove_sheet(id).is_err() {
        return writeln!(out, "error: no such sheet").map_err(io_err);
    }
    if confirm(input, out, &format!("Delete sheet '{}'?", label))? {
        editor.confirm_delete();
        writeln!(out, "sheet deleted").map_err(io_err)
    } else {
        editor.cancel_delete();
        writeln!(out, "kept").map_err(io_err)
    }
}

fn remove_element<R: BufRead, W: Write>(
    editor: &mut TemplateEditor,
    n: &str,
    m: &str,
    input: &mut R,
    out: &mut W,
) -> Result<(), CliError> {
    let (sheet, element) = match element_at(editor, n, m) {
        Ok(pair) => pair,
        Err(msg) => return writeln!(out, "error: {}", msg).map_err(io_err),
    };
    // Name the target in the prompt, like the original dialog.
    let label = editor
        .sheet(sheet)
        .and_then(|s| s.element(element))
        .map(|el| el.element_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "this element".to_string());

    if editor.request_remove_element(sheet, element).is_err() {
        return writeln!(out, "error: no such element").map_err(io_err);
    }
    if confirm(input, out, &format!("Delete '{}'?", label))? {
        editor.confirm_delete();
        writeln!(out, "element deleted").map_err(io_err)
    } else {
        editor.cancel_delete();
        writeln!(out, "kept").map_err(io_err)
    }
}

fn set_source<W: Write>(
    editor: &mut TemplateEditor,
    client: &MappingClient,
    n: &str,
    name: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let id = match sheet_at(editor, n) {
        Ok(id) => id,
        Err(msg) => return writeln!(out, "error: {}", msg).map_err(io_err),
    };

    let ticket = match editor.set_source_name(id, name) {
        Ok(ticket) => ticket,
        Err(err) => return writeln!(out, "error: {}", err).map_err(io_err),
    };
    let Some(ticket) = ticket else {
        return writeln!(out, "source cleared").map_err(io_err);
    };

    // Fetch failure is non-fatal: report it and leave the list empty.
    let outcome = match client.predefined_elements(name) {
        Ok(elements) => FetchOutcome::Success(elements),
        Err(err) => {
            writeln!(out, "warning: could not load elements: {}", err).map_err(io_err)?;
            FetchOutcome::Failure
        }
    };

    match editor.apply_fetch(ticket, outcome) {
        FetchApplied::Replaced(count) => {
            writeln!(out, "source '{}': {} predefined element(s)", name, count).map_err(io_err)
        }
        FetchApplied::Failed => writeln!(out, "element list cleared").map_err(io_err),
        FetchApplied::Stale => Ok(()),
    }
}

fn set_element_field<W: Write>(
    editor: &mut TemplateEditor,
    n: &str,
    m: &str,
    field: &str,
    value: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let (sheet, element) = match element_at(editor, n, m) {
        Ok(pair) => pair,
        Err(msg) => return writeln!(out, "error: {}", msg).map_err(io_err),
    };
    let field = if field == "item" { ElementField::Name } else { ElementField::Cell };
    match editor.update_element(sheet, element, field, value) {
        Ok(()) => Ok(()),
        Err(err) => writeln!(out, "error: {}", err).map_err(io_err),
    }
}

fn list<W: Write>(editor: &TemplateEditor, out: &mut W) -> Result<(), CliError> {
    if editor.is_empty() {
        return writeln!(out, "no sheets yet (try 'add')").map_err(io_err);
    }
    for (idx, sheet) in editor.sheets().iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, sheet.display_label()).map_err(io_err)?;
        for (el_idx, el) in sheet.elements.iter().enumerate() {
            writeln!(out, "   {}. {:<30} {}", el_idx + 1, el.element_name, el.cell_value)
                .map_err(io_err)?;
        }
    }
    Ok(())
}

/// Validate then push. Returns `true` on a successful save.
/// A blocked or failed save leaves the editor state untouched.
fn save<W: Write>(
    editor: &TemplateEditor,
    client: &MappingClient,
    out: &mut W,
) -> Result<bool, CliError> {
    if let Err(violation) = editor.validate() {
        writeln!(out, "cannot save: {}", violation).map_err(io_err)?;
        return Ok(false);
    }

    match client.save_templates(&editor.to_payload()) {
        Ok(message) => {
            let message =
                if message.is_empty() { "Data saved successfully".to_string() } else { message };
            writeln!(out, "{}", message).map_err(io_err)?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "save failed: {}", err).map_err(io_err)?;
            Ok(false)
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<bool, CliError> {
    write!(out, "{} [y/N] ", prompt).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Resolve a 1-based sheet position to its id.
fn sheet_at(editor: &TemplateEditor, token: &str) -> Result<SheetId, String> {
    let position: usize =
        token.parse().map_err(|_| format!("'{}' is not a sheet number", token))?;
    editor
        .sheets()
        .get(position.wrapping_sub(1))
        .map(|s| s.id)
        .ok_or_else(|| format!("no sheet {}", position))
}

/// Resolve 1-based sheet/element positions to their ids.
fn element_at(
    editor: &TemplateEditor,
    sheet_token: &str,
    element_token: &str,
) -> Result<(SheetId, ElementId), String> {
    let sheet = sheet_at(editor, sheet_token)?;
    let position: usize = element_token
        .parse()
        .map_err(|_| format!("'{}' is not an element number", element_token))?;
    let element = editor
        .sheet(sheet)
        .and_then(|s| s.elements.get(position.wrapping_sub(1)))
        .map(|el| el.id)
        .ok_or_else(|| format!("no element {}", position))?;
    Ok((sheet, element))
}
