//! Grid layout designer engine for configurable form fields
//!
//! This crate holds the working state of an in-progress form layout edit:
//! which fields sit in which grid cell, which remain in the available pool,
//! and the layout-wide settings (columns, spacing, buttons). It reconciles
//! that state whenever the field catalog changes underneath it, and derives
//! the persistable [`LayoutDocument`] on save.
//!
//! The engine performs no I/O and never blocks: the host loads the catalog
//! and the persisted layout, delivers catalog changes as explicit
//! `reconcile` calls, and persists the document produced by `save`.
//! Placement commands never fail — conflicting drops are silent no-ops —
//! and the only typed error is an unsupported column count at save time.
//!
//! ## Basic Usage
//!
//! ```rust
//! use formwork_designer::{GridCell, LayoutDesigner};
//! use formwork_fields::{FieldDefinition, FieldType};
//!
//! let city = FieldDefinition::new("city", "City", FieldType::Text);
//! let id = city.id.clone();
//!
//! let mut designer = LayoutDesigner::new();
//! designer.initialize(vec![city], None);
//! designer.place_field(id, GridCell::new(0, 0));
//!
//! let layout = designer.save()?;
//! assert_eq!(layout.fields.len(), 1);
//! # Ok::<(), formwork_designer::LayoutError>(())
//! ```

mod designer;
mod error;
mod serializer;
mod state;
mod types;

pub use designer::LayoutDesigner;
pub use error::{LayoutError, Result};
pub use serializer::{save, serialize};
pub use state::{DesignerCommand, DesignerState, MIN_ROWS};
pub use types::{
    ButtonAlignment, ButtonsConfig, FieldPosition, GridCell, LayoutDocument, Spacing,
    VALID_COLUMNS,
};
