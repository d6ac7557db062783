//! Core field definition types.
//!
//! All types serialize to/from JSON via serde — the external config store
//! persists them as plain documents. A `FieldDefinition` is the complete
//! schema for one configurable form field: type, validation rules, select
//! options, grid visibility, and form placement metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::FieldId;

/// The type of a field — determines the widget, the value shape, and the
/// type-derived default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Phone,
    Select,
    MultiSelect,
    /// Multi-valued field: one sub-value per option, edited as one
    /// sub-control per option and stored as a single object.
    Dictionary,
    Date,
    DateTime,
    Checkbox,
    Textarea,
    Url,
    Currency,
}

impl FieldType {
    /// Whether definitions of this type must carry a non-empty options list.
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect | Self::Dictionary)
    }

    /// Get the string representation of this field type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Dictionary => "dictionary",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Checkbox => "checkbox",
            Self::Textarea => "textarea",
            Self::Url => "url",
            Self::Currency => "currency",
        }
    }
}

/// A single option in a select, multi-select, or dictionary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative validation rules attached to a field definition.
///
/// The form compiler turns these into runtime validators; the catalog only
/// stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationRules {
    /// Value must be present and non-empty.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Regex pattern the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Minimum numeric value, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum numeric value, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Value must look like an email address.
    #[serde(default, skip_serializing_if = "is_false")]
    pub email: bool,

    /// Value must look like a URL (scheme optional).
    #[serde(default, skip_serializing_if = "is_false")]
    pub url: bool,
}

fn is_false(b: &bool) -> bool {
    !b
}

impl ValidationRules {
    /// Create new empty validation rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the value as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set string length constraints.
    pub fn with_length_range(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Set regex pattern validation.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set numeric range constraints.
    pub fn with_numeric_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Require an email-shaped value.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require a URL-shaped value.
    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }
}

/// How a field participates in the list grid of its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GridVisibility {
    /// Shown as a grid column.
    #[serde(default)]
    pub visible: bool,
    /// Column order within the grid.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
}

impl GridVisibility {
    /// Visible grid column at the given order, sortable and filterable.
    pub fn column(order: u32) -> Self {
        Self {
            visible: true,
            order,
            sortable: true,
            filterable: true,
        }
    }
}

/// Horizontal space a field takes in the rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FormWidth {
    #[default]
    Full,
    Half,
    Third,
}

/// A field definition — the complete schema for a single configurable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: FieldId,
    /// Identifier used as the storage key for values.
    pub name: String,
    /// Human-readable label shown next to the widget.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub validation: ValidationRules,
    /// Ordered options; required for select, multi-select, and dictionary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub grid: GridVisibility,
    /// Position of the field among its siblings in the form.
    #[serde(default)]
    pub form_order: u32,
    #[serde(default)]
    pub form_width: FormWidth,
    /// Explicit initial value; overrides the type-derived default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Maps to a built-in entity property instead of a custom field.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Immutable core field: name, type, and required-ness never change.
    #[serde(default)]
    pub is_system: bool,
}

fn default_true() -> bool {
    true
}

impl FieldDefinition {
    /// Create an active, non-system definition with a fresh id.
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: FieldId::new(),
            name: name.into(),
            label: label.into(),
            field_type,
            validation: ValidationRules::default(),
            options: Vec::new(),
            grid: GridVisibility::default(),
            form_order: 0,
            form_width: FormWidth::Full,
            default_value: None,
            is_default: false,
            is_active: true,
            is_system: false,
        }
    }

    /// Use an explicit id instead of a generated one.
    pub fn with_id(mut self, id: impl Into<FieldId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_grid(mut self, grid: GridVisibility) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_form_order(mut self, order: u32) -> Self {
        self.form_order = order;
        self
    }

    pub fn with_form_width(mut self, width: FormWidth) -> Self {
        self.form_width = width;
        self
    }

    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Mark as mapping to a built-in entity property.
    pub fn default_field(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Mark as an immutable core field.
    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// A dictionary field with no options cannot be rendered.
    pub fn renderable(&self) -> bool {
        !(self.field_type.requires_options() && self.options.is_empty())
    }
}
