//! FieldCatalog — the ordered field definitions of one business module.
//!
//! The catalog is in-memory only. Loading and persisting it is owned by the
//! external config store; the catalog enforces the invariants that must hold
//! regardless of where the definitions came from: unique names, and the
//! immutability guards on system fields.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::ids::FieldId;
use crate::types::FieldDefinition;

/// Ordered collection of field definitions for one module, indexed by id
/// and by name.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: IndexMap<FieldId, FieldDefinition>,
    name_index: HashMap<String, FieldId>,
}

impl FieldCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions, preserving order.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Result<Self> {
        let mut catalog = Self::new();
        for field in fields {
            catalog.insert(field)?;
        }
        Ok(catalog)
    }

    /// Append a new definition. Names must be unique within the catalog.
    pub fn insert(&mut self, field: FieldDefinition) -> Result<()> {
        if self.name_index.contains_key(&field.name) {
            return Err(FieldsError::DuplicateFieldName {
                name: field.name.clone(),
            });
        }
        self.name_index.insert(field.name.clone(), field.id.clone());
        self.fields.insert(field.id.clone(), field);
        Ok(())
    }

    /// Replace an existing definition, keeping its position.
    ///
    /// System fields may change label, options, grid visibility, and form
    /// placement — but never name, type, or required-ness.
    pub fn update_field(&mut self, field: FieldDefinition) -> Result<()> {
        let current = self
            .fields
            .get(&field.id)
            .ok_or_else(|| FieldsError::not_found(&field.id))?;

        if current.is_system
            && (current.name != field.name
                || current.field_type != field.field_type
                || current.validation.required != field.validation.required)
        {
            return Err(FieldsError::SystemFieldImmutable {
                name: current.name.clone(),
            });
        }

        if current.name != field.name {
            if self.name_index.contains_key(&field.name) {
                return Err(FieldsError::DuplicateFieldName {
                    name: field.name.clone(),
                });
            }
            let old_name = current.name.clone();
            self.name_index.remove(&old_name);
            self.name_index.insert(field.name.clone(), field.id.clone());
        }

        self.fields.insert(field.id.clone(), field);
        Ok(())
    }

    /// Remove a definition. System fields cannot be deleted.
    pub fn delete_field(&mut self, id: &FieldId) -> Result<FieldDefinition> {
        let current = self
            .fields
            .get(id)
            .ok_or_else(|| FieldsError::not_found(id))?;
        if current.is_system {
            return Err(FieldsError::SystemFieldProtected {
                name: current.name.clone(),
            });
        }

        // shift_remove keeps the remaining fields in order
        let removed = self
            .fields
            .shift_remove(id)
            .ok_or_else(|| FieldsError::not_found(id))?;
        self.name_index.remove(&removed.name);
        debug!(id = %id, name = %removed.name, "deleted field definition");
        Ok(removed)
    }

    /// Get a definition by id.
    pub fn get(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.get(id)
    }

    /// Get a definition by storage name.
    pub fn get_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.name_index.get(name).and_then(|id| self.fields.get(id))
    }

    /// All definitions in catalog order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    /// Active definitions in catalog order.
    pub fn active_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values().filter(|f| f.is_active)
    }

    /// Owned snapshot of all definitions, in catalog order.
    ///
    /// This is what gets handed to the layout designer and the form
    /// compiler: both consume catalog snapshots, never the live catalog.
    pub fn snapshot(&self) -> Vec<FieldDefinition> {
        self.fields.values().cloned().collect()
    }

    /// Active, grid-visible definitions ordered by their grid column order.
    pub fn grid_columns(&self) -> Vec<&FieldDefinition> {
        let mut columns: Vec<&FieldDefinition> = self
            .fields
            .values()
            .filter(|f| f.is_active && f.grid.visible)
            .collect();
        columns.sort_by_key(|f| f.grid.order);
        columns
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
