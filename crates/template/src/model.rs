use serde::Serialize;

/// Placeholder label for a sheet with no source file chosen yet.
pub const UNNAMED_SHEET_LABEL: &str = "Select File";

/// Opaque sheet identifier. Allocated in creation order by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SheetId(pub(crate) u64);

/// Opaque element identifier. Allocated in creation order by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub(crate) u64);

/// Which field of an element an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementField {
    /// The line-item label.
    Name,
    /// The cell reference in the source file.
    Cell,
}

/// A single line-item → cell mapping within a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: ElementId,
    pub element_name: String,
    pub cell_value: String,
}

/// A named grouping representing one source file's mapping configuration.
///
/// Element order is display order; it carries no other meaning.
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub id: SheetId,
    pub source_name: String,
    pub elements: Vec<Element>,
}

impl Sheet {
    /// Header label: the source name, or the placeholder while unset.
    pub fn display_label(&self) -> &str {
        if self.source_name.is_empty() {
            UNNAMED_SHEET_LABEL
        } else {
            &self.source_name
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }
}
