//! LayoutDesigner — the session-facing API over the command reducer.
//!
//! Owns the current state snapshot and turns method calls into commands, so
//! hosts get an ordinary imperative surface while every transition remains
//! an explicit, replayable command.

use formwork_fields::{FieldDefinition, FieldId};

use crate::error::Result;
use crate::serializer;
use crate::state::{DesignerCommand, DesignerState};
use crate::types::{ButtonsConfig, GridCell, LayoutDocument, Spacing};

/// One layout editing session. Created when the designer opens, discarded on
/// navigation away; only the serialized [`LayoutDocument`] survives.
#[derive(Debug, Clone, Default)]
pub struct LayoutDesigner {
    state: DesignerState,
}

impl LayoutDesigner {
    pub fn new() -> Self {
        Self {
            state: DesignerState::new(),
        }
    }

    /// Seed the session from a catalog snapshot and an optional persisted
    /// layout. Subsequent calls are no-ops for the lifetime of the session.
    pub fn initialize(&mut self, fields: Vec<FieldDefinition>, layout: Option<LayoutDocument>) {
        self.apply(DesignerCommand::Initialize { fields, layout });
    }

    /// Merge a refreshed catalog snapshot into the session.
    pub fn reconcile(&mut self, fields: Vec<FieldDefinition>) {
        self.apply(DesignerCommand::Reconcile { fields });
    }

    /// Move a field into a cell. Dropping onto an occupied cell is a silent
    /// no-op (the drag snaps back).
    pub fn place_field(&mut self, field_id: FieldId, target: GridCell) {
        self.apply(DesignerCommand::PlaceField { field_id, target });
    }

    /// Clear a cell, returning its field to the end of the available pool.
    pub fn remove_field(&mut self, cell: GridCell) {
        self.apply(DesignerCommand::RemoveField { cell });
    }

    pub fn set_columns(&mut self, columns: u8) {
        self.apply(DesignerCommand::SetColumns { columns });
    }

    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.apply(DesignerCommand::SetSpacing { spacing });
    }

    pub fn set_buttons(&mut self, buttons: ButtonsConfig) {
        self.apply(DesignerCommand::SetButtons { buttons });
    }

    pub fn set_show_sections(&mut self, show_sections: bool) {
        self.apply(DesignerCommand::SetShowSections { show_sections });
    }

    /// Apply a raw command to the session.
    pub fn apply(&mut self, command: DesignerCommand) {
        self.state = self.state.apply(&command);
    }

    /// Derive the persistable document from the current state.
    pub fn serialize(&self) -> LayoutDocument {
        serializer::serialize(&self.state)
    }

    /// Serialize for persistence, validating save-time invariants.
    pub fn save(&self) -> Result<LayoutDocument> {
        serializer::save(&self.state)
    }

    /// The current state snapshot.
    pub fn state(&self) -> &DesignerState {
        &self.state
    }

    /// Visible grid rows for the current session.
    pub fn row_count(&self) -> u32 {
        self.state.row_count()
    }
}
