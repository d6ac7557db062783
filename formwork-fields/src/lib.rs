//! Field catalog for per-module configurable form fields
//!
//! `formwork-fields` is a standalone, schema-only crate that manages the
//! field definitions of one business module (clients, materials, workers, …).
//! It knows nothing about layouts, forms, or storage — the layout designer
//! and the form compiler consume catalog snapshots, and an external config
//! store owns persistence.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns field definitions, not field values
//! - **In-memory**: The catalog is a snapshot; loading/saving is the caller's
//! - **Guarded boundary**: System fields never change name, type, or
//!   required-ness, and cannot be deleted — those are the only operations
//!   here that return typed errors
//! - **Default seeding**: `CatalogDefaults` seeds built-ins by id, preserving
//!   user customizations

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod ids;
pub mod types;

pub use catalog::FieldCatalog;
pub use defaults::CatalogDefaults;
pub use error::{FieldsError, Result};
pub use ids::FieldId;
pub use types::{
    FieldDefinition, FieldType, FormWidth, GridVisibility, SelectOption, ValidationRules,
};
