//! Dynamic form compiler
//!
//! `formwork-forms` turns a field catalog snapshot — plus, in edit mode, an
//! existing entity — into runtime form controls: keys, initial values, and
//! validators. Multi-valued dictionary fields fan out into one sub-control
//! per option for editing and fan back into a single object on submit; the
//! two transforms are exact inverses for well-formed option sets.
//!
//! Compilation never fails. Configuration problems that keep a field from
//! rendering (a dictionary without options, a grid-visible inactive field,
//! an uncompilable pattern) surface as [`CompileWarning`]s for the caller.
//!
//! ## Basic Usage
//!
//! ```rust
//! use formwork_fields::{FieldDefinition, FieldType, SelectOption};
//! use formwork_forms::compile;
//!
//! let colors = FieldDefinition::new("colors", "Colors", FieldType::Dictionary)
//!     .with_options(vec![
//!         SelectOption::new("red", "Red"),
//!         SelectOption::new("blue", "Blue"),
//!     ]);
//!
//! let form = compile(&[colors], None);
//! assert!(form.control("colors_red").is_some());
//! assert!(form.control("colors_blue").is_some());
//! ```

mod compiler;
mod entity;
mod validators;

pub use compiler::{
    compile, decompile, dictionary_key, validate, CompileWarning, CompiledForm,
    ControlDescriptor,
};
pub use entity::{Entity, SubmitPayload};
pub use validators::{ValidationError, Validator, EMAIL_PATTERN, URL_PATTERN};
