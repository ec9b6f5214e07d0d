//! `finmap-template` — the mapping template editor state machine.
//!
//! Pure state crate: owns the sheet/element tree being edited, applies
//! mutations, gates saving behind the validation rules, and serializes the
//! tree into the wire payload. No IO — the caller performs HTTP fetches and
//! reports outcomes back through [`TemplateEditor::apply_fetch`].
//!
//! Destructive operations are two-phase: `request_remove_*` parks a
//! [`PendingDelete`], and `confirm_delete` / `cancel_delete` resolve it.
//! The front end (CLI prompt, dialog, whatever) supplies the yes/no; the
//! editor never blocks.

pub mod editor;
pub mod error;
pub mod model;
pub mod validate;

pub use editor::{FetchApplied, FetchOutcome, FetchTicket, PendingDelete, TemplateEditor};
pub use error::{EditorError, ValidationError};
pub use model::{Element, ElementField, ElementId, Sheet, SheetId};
pub use validate::validate;
