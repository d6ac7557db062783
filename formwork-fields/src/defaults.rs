//! Built-in field definitions a fresh module catalog is seeded with.
//!
//! Consumers build a `CatalogDefaults`, seed it into a catalog, and persist
//! the result through their own config store. Seeding is id-matched: a
//! default whose id already exists in the catalog is skipped, so user
//! customizations survive re-seeding.

use tracing::debug;

use crate::catalog::FieldCatalog;
use crate::error::Result;
use crate::ids::FieldId;
use crate::types::{FieldDefinition, FieldType, GridVisibility, ValidationRules};

/// A collection of default field definitions for one module.
#[derive(Debug, Clone, Default)]
pub struct CatalogDefaults {
    fields: Vec<FieldDefinition>,
}

impl CatalogDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default field definition.
    pub fn field(mut self, def: FieldDefinition) -> Self {
        self.fields.push(def);
        self
    }

    /// Access the field definitions.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Insert every default whose id is not already present.
    pub fn seed(&self, catalog: &mut FieldCatalog) -> Result<()> {
        for def in &self.fields {
            if catalog.get(&def.id).is_none() {
                catalog.insert(def.clone())?;
                debug!(name = %def.name, id = %def.id, "seeded default field");
            }
        }
        Ok(())
    }

    /// The core system fields every business module starts with: a required
    /// display name plus contact fields, all shown in the grid.
    pub fn core_module() -> Self {
        Self::new()
            .field(
                FieldDefinition::new("name", "Name", FieldType::Text)
                    .with_id(FieldId::from_string("core-name"))
                    .with_validation(ValidationRules::new().required())
                    .with_grid(GridVisibility::column(0))
                    .default_field()
                    .system(),
            )
            .field(
                FieldDefinition::new("email", "Email", FieldType::Email)
                    .with_id(FieldId::from_string("core-email"))
                    .with_validation(ValidationRules::new().email())
                    .with_grid(GridVisibility::column(1))
                    .with_form_order(1)
                    .default_field()
                    .system(),
            )
            .field(
                FieldDefinition::new("phone", "Phone", FieldType::Phone)
                    .with_id(FieldId::from_string("core-phone"))
                    .with_grid(GridVisibility::column(2))
                    .with_form_order(2)
                    .default_field()
                    .system(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_into_empty_catalog() {
        let mut catalog = FieldCatalog::new();
        CatalogDefaults::core_module().seed(&mut catalog).unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.get_by_name("name").unwrap().is_system);
        assert!(catalog.get_by_name("email").unwrap().validation.email);
    }

    #[test]
    fn reseed_preserves_customizations() {
        let mut catalog = FieldCatalog::new();
        let defaults = CatalogDefaults::core_module();
        defaults.seed(&mut catalog).unwrap();

        // User relabels the email field (allowed on system fields)
        let mut email = catalog.get_by_name("email").unwrap().clone();
        email.label = "E-Mail Address".into();
        catalog.update_field(email).unwrap();

        defaults.seed(&mut catalog).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get_by_name("email").unwrap().label, "E-Mail Address");
    }

    #[test]
    fn seed_adds_new_defaults_only() {
        let mut catalog = FieldCatalog::new();
        CatalogDefaults::core_module().seed(&mut catalog).unwrap();

        let extended = CatalogDefaults::core_module().field(
            FieldDefinition::new("website", "Website", FieldType::Url)
                .with_id(FieldId::from_string("core-website")),
        );
        extended.seed(&mut catalog).unwrap();

        assert_eq!(catalog.len(), 4);
        assert!(catalog.get_by_name("website").is_some());
    }
}
