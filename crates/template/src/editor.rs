//! The template editor — a single owned state tree of sheets and elements.
//!
//! All mutation goes through `&mut self` methods, run to completion, one
//! event at a time. The two suspending operations of the workflow (the
//! per-sheet predefined-elements fetch and the final save) live outside this
//! crate; the editor only hands out [`FetchTicket`]s and consumes their
//! outcomes, so a stale completion can never overwrite a newer rename.

use std::collections::HashMap;

use finmap_protocol::{ElementPayload, PredefinedElement, SheetPayload};

use crate::error::{EditorError, ValidationError};
use crate::model::{Element, ElementField, ElementId, Sheet, SheetId};
use crate::validate;

/// A tag for one issued predefined-elements fetch.
///
/// Each call to [`TemplateEditor::set_source_name`] with a non-empty name
/// bumps the sheet's sequence number and issues a ticket. Only the latest
/// ticket per sheet is applied; earlier ones resolve as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    sheet: SheetId,
    seq: u64,
}

impl FetchTicket {
    /// The sheet this fetch was issued for.
    pub fn sheet(&self) -> SheetId {
        self.sheet
    }
}

/// Caller-reported outcome of a predefined-elements fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success(Vec<PredefinedElement>),
    Failure,
}

/// What the editor did with a fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Elements replaced with the fetched set (count given).
    Replaced(usize),
    /// Fetch failed; the element list stays empty.
    Failed,
    /// The ticket was superseded or its sheet deleted; nothing changed.
    Stale,
}

/// A destructive operation awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    Sheet(SheetId),
    Element(SheetId, ElementId),
}

/// The editor state machine. See the crate docs for the protocol.
#[derive(Debug, Default)]
pub struct TemplateEditor {
    sheets: Vec<Sheet>,
    next_id: u64,
    /// Latest issued fetch sequence per live sheet.
    latest_fetch: HashMap<SheetId, u64>,
    pending: Option<PendingDelete>,
}

impl TemplateEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an editor from a serialized payload (inverse of
    /// [`to_payload`](Self::to_payload)). No fetches are issued; the
    /// payload's elements are taken as-is with fresh ids.
    pub fn from_payload(payload: &[SheetPayload]) -> Self {
        let mut editor = Self::new();
        for sheet in payload {
            let id = SheetId(editor.alloc_id());
            let mut elements = Vec::with_capacity(sheet.excel_elements.len());
            for el in &sheet.excel_elements {
                elements.push(Element {
                    id: ElementId(editor.alloc_id()),
                    element_name: el.excel_element.clone(),
                    cell_value: el.exel_cell_value.clone(),
                });
            }
            editor.sheets.push(Sheet {
                id,
                source_name: sheet.excell_sheet_name.clone(),
                elements,
            });
        }
        editor
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn pending_delete(&self) -> Option<PendingDelete> {
        self.pending
    }

    // ── Sheet operations ────────────────────────────────────────────

    /// Append a new sheet with an empty name and no elements.
    pub fn add_sheet(&mut self) -> SheetId {
        let id = SheetId(self.alloc_id());
        self.sheets.push(Sheet { id, source_name: String::new(), elements: Vec::new() });
        id
    }

    /// Update a sheet's source name.
    ///
    /// The element list is cleared immediately. A non-empty name issues a
    /// [`FetchTicket`]; the caller fetches the predefined elements and
    /// reports back via [`apply_fetch`](Self::apply_fetch). An empty name
    /// issues nothing and the list stays empty.
    pub fn set_source_name(
        &mut self,
        sheet: SheetId,
        name: &str,
    ) -> Result<Option<FetchTicket>, EditorError> {
        let entry = self.sheet_mut(sheet)?;
        entry.source_name = name.to_string();
        entry.elements.clear();

        // Every name change supersedes outstanding tickets, including a
        // clear: the bumped sequence makes earlier completions stale.
        let seq = self.latest_fetch.entry(sheet).or_insert(0);
        *seq += 1;

        if name.is_empty() {
            return Ok(None);
        }
        Ok(Some(FetchTicket { sheet, seq: *seq }))
    }

    /// Apply the outcome of an issued fetch.
    ///
    /// Stale tickets (superseded by a later rename, or for a deleted sheet)
    /// are dropped without touching state.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> FetchApplied {
        if self.latest_fetch.get(&ticket.sheet) != Some(&ticket.seq) {
            return FetchApplied::Stale;
        }
        let Some(idx) = self.sheets.iter().position(|s| s.id == ticket.sheet) else {
            return FetchApplied::Stale;
        };

        match outcome {
            FetchOutcome::Success(predefined) => {
                let mut fresh = Vec::with_capacity(predefined.len());
                for el in predefined {
                    fresh.push(Element {
                        id: ElementId(self.alloc_id()),
                        element_name: el.excel_element,
                        cell_value: el.exel_cell_value,
                    });
                }
                let count = fresh.len();
                self.sheets[idx].elements = fresh;
                FetchApplied::Replaced(count)
            }
            FetchOutcome::Failure => {
                self.sheets[idx].elements.clear();
                FetchApplied::Failed
            }
        }
    }

    // ── Element operations ──────────────────────────────────────────

    /// Append an empty element to a sheet.
    pub fn add_element(&mut self, sheet: SheetId) -> Result<ElementId, EditorError> {
        let id = ElementId(self.alloc_id());
        let entry = self.sheet_mut(sheet)?;
        entry.elements.push(Element {
            id,
            element_name: String::new(),
            cell_value: String::new(),
        });
        Ok(id)
    }

    /// In-place field update. No validation happens here.
    pub fn update_element(
        &mut self,
        sheet: SheetId,
        element: ElementId,
        field: ElementField,
        value: &str,
    ) -> Result<(), EditorError> {
        let entry = self.sheet_mut(sheet)?;
        let el = entry
            .elements
            .iter_mut()
            .find(|el| el.id == element)
            .ok_or(EditorError::UnknownElement(sheet, element))?;
        match field {
            ElementField::Name => el.element_name = value.to_string(),
            ElementField::Cell => el.cell_value = value.to_string(),
        }
        Ok(())
    }

    // ── Two-phase deletes ───────────────────────────────────────────

    /// Park a sheet removal pending confirmation. Replaces any earlier
    /// pending delete.
    pub fn request_remove_sheet(&mut self, sheet: SheetId) -> Result<PendingDelete, EditorError> {
        self.sheet_mut(sheet)?;
        let pending = PendingDelete::Sheet(sheet);
        self.pending = Some(pending);
        Ok(pending)
    }

    /// Park an element removal pending confirmation.
    pub fn request_remove_element(
        &mut self,
        sheet: SheetId,
        element: ElementId,
    ) -> Result<PendingDelete, EditorError> {
        let entry = self.sheet_mut(sheet)?;
        if !entry.elements.iter().any(|el| el.id == element) {
            return Err(EditorError::UnknownElement(sheet, element));
        }
        let pending = PendingDelete::Element(sheet, element);
        self.pending = Some(pending);
        Ok(pending)
    }

    /// Perform the pending delete. Returns `true` if something was removed;
    /// a vanished target is a quiet no-op.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        match pending {
            PendingDelete::Sheet(id) => {
                let before = self.sheets.len();
                self.sheets.retain(|s| s.id != id);
                self.latest_fetch.remove(&id);
                self.sheets.len() != before
            }
            PendingDelete::Element(sheet, element) => {
                let Some(entry) = self.sheets.iter_mut().find(|s| s.id == sheet) else {
                    return false;
                };
                let before = entry.elements.len();
                entry.elements.retain(|el| el.id != element);
                entry.elements.len() != before
            }
        }
    }

    /// Drop the pending delete, leaving state unchanged.
    pub fn cancel_delete(&mut self) {
        self.pending = None;
    }

    // ── Saving ──────────────────────────────────────────────────────

    /// Pure save gate: true iff the whole collection passes validation.
    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }

    /// The first save-blocking violation, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate(&self.sheets)
    }

    /// Serialize the collection into the save request body.
    ///
    /// Values go over the wire untrimmed, exactly as edited; trimming is a
    /// validation concern only.
    pub fn to_payload(&self) -> Vec<SheetPayload> {
        self.sheets
            .iter()
            .map(|sheet| SheetPayload {
                excell_sheet_name: sheet.source_name.clone(),
                excel_elements: sheet
                    .elements
                    .iter()
                    .map(|el| ElementPayload {
                        excel_element: el.element_name.clone(),
                        exel_cell_value: el.cell_value.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn sheet_mut(&mut self, id: SheetId) -> Result<&mut Sheet, EditorError> {
        self.sheets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(EditorError::UnknownSheet(id))
    }
}
