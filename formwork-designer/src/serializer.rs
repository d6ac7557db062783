//! Pure derivation of the persisted layout document from designer state.

use indexmap::IndexMap;

use crate::error::{LayoutError, Result};
use crate::state::DesignerState;
use crate::types::{FieldPosition, LayoutDocument, VALID_COLUMNS};

/// Derive the persistable document from the working state.
///
/// Entries come out in row-major cell order with `order = row * columns +
/// col` and a column span of 1. Pooled fields are simply absent.
pub fn serialize(state: &DesignerState) -> LayoutDocument {
    let columns = u32::from(state.columns());
    let mut fields = IndexMap::with_capacity(state.placements().len());
    for (cell, field) in state.placements() {
        fields.insert(
            field.id.clone(),
            FieldPosition {
                row: cell.row,
                col: cell.col,
                col_span: 1,
                order: cell.row * columns + cell.col,
            },
        );
    }
    LayoutDocument {
        columns: state.columns(),
        fields,
        buttons: state.buttons().clone(),
        spacing: state.spacing(),
        show_sections: state.show_sections(),
    }
}

/// Serialize for persistence, validating the save-time invariants.
///
/// The only typed error at this boundary is a column count outside
/// {2, 3, 4}; everything else the designer tolerates silently.
pub fn save(state: &DesignerState) -> Result<LayoutDocument> {
    if !VALID_COLUMNS.contains(&state.columns()) {
        return Err(LayoutError::InvalidColumnCount {
            columns: state.columns(),
        });
    }
    Ok(serialize(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DesignerCommand;
    use crate::types::GridCell;
    use formwork_fields::{FieldDefinition, FieldId, FieldType};

    fn session(names: &[&str]) -> DesignerState {
        let fields = names
            .iter()
            .map(|n| {
                FieldDefinition::new(*n, n.to_uppercase(), FieldType::Text)
                    .with_id(FieldId::from_string(*n))
            })
            .collect();
        DesignerState::new().apply(&DesignerCommand::Initialize {
            fields,
            layout: None,
        })
    }

    #[test]
    fn serialize_derives_order_row_major() {
        let state = session(&["a", "b"])
            .apply(&DesignerCommand::SetColumns { columns: 3 })
            .apply(&DesignerCommand::PlaceField {
                field_id: FieldId::from_string("a"),
                target: GridCell::new(1, 2),
            })
            .apply(&DesignerCommand::PlaceField {
                field_id: FieldId::from_string("b"),
                target: GridCell::new(0, 1),
            });

        let layout = serialize(&state);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.fields.len(), 2);

        let a = &layout.fields[&FieldId::from_string("a")];
        assert_eq!((a.row, a.col, a.order, a.col_span), (1, 2, 5, 1));
        let b = &layout.fields[&FieldId::from_string("b")];
        assert_eq!((b.row, b.col, b.order), (0, 1, 1));

        // Row-major document order
        let ids: Vec<_> = layout.fields.keys().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn serialize_omits_pooled_fields() {
        let state = session(&["a", "b"]).apply(&DesignerCommand::PlaceField {
            field_id: FieldId::from_string("a"),
            target: GridCell::new(0, 0),
        });
        let layout = serialize(&state);
        assert_eq!(layout.fields.len(), 1);
        assert!(!layout.fields.contains_key(&FieldId::from_string("b")));
    }

    #[test]
    fn save_rejects_invalid_columns() {
        let state = session(&["a"]).apply(&DesignerCommand::SetColumns { columns: 5 });
        let result = save(&state);
        assert!(matches!(
            result,
            Err(LayoutError::InvalidColumnCount { columns: 5 })
        ));
    }

    #[test]
    fn save_accepts_supported_columns() {
        for columns in [2u8, 3, 4] {
            let state = session(&["a"]).apply(&DesignerCommand::SetColumns { columns });
            assert_eq!(save(&state).unwrap().columns, columns);
        }
    }
}
