//! Designer session state and the command reducer.
//!
//! One `DesignerState` exists per editing session. Every mutation is a
//! `DesignerCommand` applied through the pure reducer `DesignerState::apply`,
//! which returns a fresh snapshot — transitions are replayable and no
//! command ever fails. Conflicting placements leave the state unchanged.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use formwork_fields::{FieldDefinition, FieldId};

use crate::types::{ButtonsConfig, GridCell, LayoutDocument, Spacing};

/// Minimum number of grid rows shown, so an empty drop target always exists.
pub const MIN_ROWS: u32 = 3;

const DEFAULT_COLUMNS: u8 = 3;

/// A state transition of the designer session.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignerCommand {
    /// One-time seeding from a catalog snapshot and an optional persisted
    /// layout. Subsequent initializations of the same session are no-ops.
    Initialize {
        fields: Vec<FieldDefinition>,
        layout: Option<LayoutDocument>,
    },
    /// Merge a refreshed catalog snapshot into the session without
    /// disturbing the in-progress arrangement.
    Reconcile { fields: Vec<FieldDefinition> },
    /// Move a field from the pool (or another cell) into an empty cell.
    PlaceField { field_id: FieldId, target: GridCell },
    /// Clear a cell and return its field to the end of the pool.
    RemoveField { cell: GridCell },
    SetColumns { columns: u8 },
    SetSpacing { spacing: Spacing },
    SetButtons { buttons: ButtonsConfig },
    SetShowSections { show_sections: bool },
}

/// Working state of an in-progress layout edit.
///
/// Invariants: a field id appears in at most one of placements/pool; a cell
/// holds at most one field; only active fields ever enter the session.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerState {
    placements: BTreeMap<GridCell, FieldDefinition>,
    pool: Vec<FieldDefinition>,
    columns: u8,
    spacing: Spacing,
    buttons: ButtonsConfig,
    show_sections: bool,
    initialized: bool,
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerState {
    /// Fresh, uninitialized session state.
    pub fn new() -> Self {
        Self {
            placements: BTreeMap::new(),
            pool: Vec::new(),
            columns: DEFAULT_COLUMNS,
            spacing: Spacing::default(),
            buttons: ButtonsConfig::default(),
            show_sections: false,
            initialized: false,
        }
    }

    /// Apply a command, producing the next snapshot. Never fails; commands
    /// that cannot take effect return the state unchanged.
    pub fn apply(&self, command: &DesignerCommand) -> Self {
        match command {
            DesignerCommand::Initialize { fields, layout } => {
                self.initialize(fields, layout.as_ref())
            }
            DesignerCommand::Reconcile { fields } => self.reconcile(fields),
            DesignerCommand::PlaceField { field_id, target } => {
                self.place_field(field_id, *target)
            }
            DesignerCommand::RemoveField { cell } => self.remove_field(*cell),
            DesignerCommand::SetColumns { columns } => self.with(|s| s.columns = *columns),
            DesignerCommand::SetSpacing { spacing } => self.with(|s| s.spacing = *spacing),
            DesignerCommand::SetButtons { buttons } => {
                self.with(|s| s.buttons = buttons.clone())
            }
            DesignerCommand::SetShowSections { show_sections } => {
                self.with(|s| s.show_sections = *show_sections)
            }
        }
    }

    fn with(&self, f: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        f(&mut next);
        next
    }

    fn initialize(&self, fields: &[FieldDefinition], layout: Option<&LayoutDocument>) -> Self {
        // Sticky: a catalog refresh must not restart the session and discard
        // the in-progress arrangement.
        if self.initialized {
            return self.clone();
        }

        let mut next = self.clone();
        next.initialized = true;
        next.placements.clear();
        next.pool.clear();

        if let Some(layout) = layout {
            next.columns = layout.columns;
            next.spacing = layout.spacing;
            next.buttons = layout.buttons.clone();
            next.show_sections = layout.show_sections;

            for id in layout.fields.keys() {
                if !fields.iter().any(|f| f.id == *id) {
                    warn!(field_id = %id, "dropping orphaned layout entry");
                }
            }

            for field in fields.iter().filter(|f| f.is_active) {
                match layout.fields.get(&field.id) {
                    Some(pos) => {
                        let cell = GridCell::new(pos.row, pos.col);
                        if next.placements.contains_key(&cell) {
                            // Corrupt document placed two fields in one cell;
                            // the later one falls back to the pool.
                            warn!(field_id = %field.id, row = cell.row, col = cell.col,
                                "cell already occupied, moving field to pool");
                            next.pool.push(field.clone());
                        } else {
                            next.placements.insert(cell, field.clone());
                        }
                    }
                    None => next.pool.push(field.clone()),
                }
            }
        } else {
            next.pool = fields.iter().filter(|f| f.is_active).cloned().collect();
        }

        debug!(
            placed = next.placements.len(),
            pooled = next.pool.len(),
            "designer session initialized"
        );
        next
    }

    fn reconcile(&self, fields: &[FieldDefinition]) -> Self {
        let mut next = self.clone();

        // Refresh held definitions in place; drop fields that disappeared
        // from the catalog or became inactive. Metadata edits never move a
        // placed field.
        next.placements = self
            .placements
            .iter()
            .filter_map(|(cell, held)| {
                match fields.iter().find(|f| f.id == held.id && f.is_active) {
                    Some(updated) => Some((*cell, updated.clone())),
                    None => {
                        debug!(field_id = %held.id, "removing placed field no longer in catalog");
                        None
                    }
                }
            })
            .collect();
        next.pool = self
            .pool
            .iter()
            .filter_map(|held| {
                fields
                    .iter()
                    .find(|f| f.id == held.id && f.is_active)
                    .cloned()
            })
            .collect();

        // Append fields the session has never seen to the end of the pool.
        for field in fields.iter().filter(|f| f.is_active) {
            let known = next.placements.values().any(|f| f.id == field.id)
                || next.pool.iter().any(|f| f.id == field.id);
            if !known {
                next.pool.push(field.clone());
            }
        }

        next
    }

    fn place_field(&self, field_id: &FieldId, target: GridCell) -> Self {
        // Occupied target: the drag snaps back, pool and grid untouched.
        if self.placements.contains_key(&target) {
            return self.clone();
        }

        if let Some(index) = self.pool.iter().position(|f| f.id == *field_id) {
            return self.with(|s| {
                let field = s.pool.remove(index);
                s.placements.insert(target, field);
            });
        }

        if let Some(source) = self
            .placements
            .iter()
            .find(|(_, f)| f.id == *field_id)
            .map(|(cell, _)| *cell)
        {
            return self.with(|s| {
                if let Some(field) = s.placements.remove(&source) {
                    s.placements.insert(target, field);
                }
            });
        }

        // Unknown field id: nothing to move.
        self.clone()
    }

    fn remove_field(&self, cell: GridCell) -> Self {
        if !self.placements.contains_key(&cell) {
            return self.clone();
        }
        self.with(|s| {
            if let Some(field) = s.placements.remove(&cell) {
                s.pool.push(field);
            }
        })
    }

    // --- Read access ---

    /// Fields placed in the grid, in row-major cell order.
    pub fn placements(&self) -> &BTreeMap<GridCell, FieldDefinition> {
        &self.placements
    }

    /// Fields not currently placed, in pool order.
    pub fn pool(&self) -> &[FieldDefinition] {
        &self.pool
    }

    /// The field occupying a cell, if any.
    pub fn field_at(&self, cell: GridCell) -> Option<&FieldDefinition> {
        self.placements.get(&cell)
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn buttons(&self) -> &ButtonsConfig {
        &self.buttons
    }

    pub fn show_sections(&self) -> bool {
        self.show_sections
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Total fields in the session (placed plus pooled).
    pub fn field_count(&self) -> usize {
        self.placements.len() + self.pool.len()
    }

    /// Visible grid rows: enough for every session field, and never fewer
    /// than [`MIN_ROWS`] so an empty drop target always exists.
    pub fn row_count(&self) -> u32 {
        let columns = u32::from(self.columns.max(1));
        let needed = (self.field_count() as u32).div_ceil(columns);
        needed.max(MIN_ROWS)
    }
}
