//! Layout types: grid cells, field positions, and the persisted document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use formwork_fields::FieldId;

/// Column counts a layout may use.
pub const VALID_COLUMNS: [u8; 3] = [2, 3, 4];

/// A cell in the placement grid, 0-based.
///
/// An explicit (row, col) pair — cell identity is never a concatenated
/// string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

impl GridCell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Persisted position of one field inside a layout.
///
/// `order` is derived at serialization time as `row * columns + col`; it is
/// never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPosition {
    pub row: u32,
    pub col: u32,
    #[serde(default = "default_col_span")]
    pub col_span: u32,
    #[serde(default)]
    pub order: u32,
}

fn default_col_span() -> u32 {
    1
}

/// Vertical spacing between form rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Spacious,
}

/// Horizontal alignment of the form's action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonAlignment {
    Start,
    #[default]
    End,
    Center,
    Stretch,
}

/// Configuration of the form's action button row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonsConfig {
    #[serde(default)]
    pub alignment: ButtonAlignment,
    #[serde(default = "default_true")]
    pub show_cancel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_label: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            alignment: ButtonAlignment::default(),
            show_cancel: true,
            save_label: None,
            cancel_label: None,
        }
    }
}

/// The persisted layout of one module's form: a plain, JSON-compatible
/// document produced by the serializer and consumed at the next
/// `initialize`. The external config store persists it byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub columns: u8,
    #[serde(default)]
    pub fields: IndexMap<FieldId, FieldPosition>,
    #[serde(default)]
    pub buttons: ButtonsConfig,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub show_sections: bool,
}

impl LayoutDocument {
    /// An empty layout with the given column count.
    pub fn new(columns: u8) -> Self {
        Self {
            columns,
            fields: IndexMap::new(),
            buttons: ButtonsConfig::default(),
            spacing: Spacing::default(),
            show_sections: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_cell_orders_row_major() {
        let mut cells = vec![
            GridCell::new(1, 0),
            GridCell::new(0, 2),
            GridCell::new(0, 0),
        ];
        cells.sort();
        assert_eq!(
            cells,
            [GridCell::new(0, 0), GridCell::new(0, 2), GridCell::new(1, 0)]
        );
    }

    #[test]
    fn layout_document_json_round_trip() {
        let mut layout = LayoutDocument::new(3);
        layout.fields.insert(
            FieldId::from_string("f1"),
            FieldPosition {
                row: 0,
                col: 1,
                col_span: 1,
                order: 1,
            },
        );
        layout.spacing = Spacing::Compact;

        let json = serde_json::to_string(&layout).unwrap();
        let parsed: LayoutDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, layout);
    }

    #[test]
    fn layout_document_persisted_shape() {
        let mut layout = LayoutDocument::new(2);
        layout.fields.insert(
            FieldId::from_string("f1"),
            FieldPosition {
                row: 1,
                col: 0,
                col_span: 1,
                order: 2,
            },
        );
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["columns"], 2);
        assert_eq!(value["fields"]["f1"]["row"], 1);
        assert_eq!(value["fields"]["f1"]["order"], 2);
        assert_eq!(value["spacing"], "normal");
        assert_eq!(value["show_sections"], false);
        assert_eq!(value["buttons"]["show_cancel"], true);
    }

    #[test]
    fn field_position_col_span_defaults_to_one() {
        let json = r#"{"row":0,"col":0}"#;
        let pos: FieldPosition = serde_json::from_str(json).unwrap();
        assert_eq!(pos.col_span, 1);
        assert_eq!(pos.order, 0);
    }
}
