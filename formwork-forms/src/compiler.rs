//! The form compiler: field definitions in, runtime controls out.
//!
//! `compile` turns a catalog snapshot plus an optional existing entity into
//! control descriptors with initial values and validators, fanning
//! dictionary fields out into one sub-control per option. `decompile` is
//! the inverse: it regroups dictionary sub-controls and routes every value
//! to the built-in or custom side of the submit payload.

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use formwork_fields::{FieldDefinition, FieldType, ValidationRules};

use crate::entity::{Entity, SubmitPayload};
use crate::validators::{ValidationError, Validator};

/// One runtime form control.
#[derive(Debug, Clone)]
pub struct ControlDescriptor {
    /// Form-value key: the field name, or `{name}_{option}` for dictionary
    /// sub-controls.
    pub key: String,
    pub initial_value: Value,
    pub validators: Vec<Validator>,
    pub disabled: bool,
}

/// Non-fatal configuration problems found while compiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    /// Dictionary field with no options cannot be rendered and is excluded
    #[error("dictionary field '{name}' has no options and cannot be rendered")]
    DictionaryWithoutOptions { name: String },

    /// Inactive field still flagged visible in the grid
    #[error("field '{name}' is grid-visible but inactive")]
    GridVisibleButInactive { name: String },

    /// User-configured pattern does not compile; the rule is skipped
    #[error("field '{name}' has an invalid pattern '{pattern}'")]
    InvalidPattern { name: String, pattern: String },
}

/// Output of a compile pass: the controls to render plus any configuration
/// warnings for the caller to surface.
#[derive(Debug, Clone, Default)]
pub struct CompiledForm {
    pub controls: Vec<ControlDescriptor>,
    pub warnings: Vec<CompileWarning>,
}

impl CompiledForm {
    /// Look up a control by key.
    pub fn control(&self, key: &str) -> Option<&ControlDescriptor> {
        self.controls.iter().find(|c| c.key == key)
    }
}

/// Compile a catalog snapshot into form controls.
///
/// Only active fields compile. Initial values come from the entity when one
/// is given (built-in property, then custom field), otherwise from the
/// field's explicit default, otherwise from its type.
pub fn compile(fields: &[FieldDefinition], existing: Option<&Entity>) -> CompiledForm {
    let mut form = CompiledForm::default();

    for field in fields {
        if !field.is_active {
            if field.grid.visible {
                warn!(name = %field.name, "grid-visible field is inactive");
                form.warnings.push(CompileWarning::GridVisibleButInactive {
                    name: field.name.clone(),
                });
            }
            continue;
        }

        if field.field_type == FieldType::Dictionary {
            compile_dictionary(field, existing, &mut form);
            continue;
        }

        let validators = build_validators(field, &mut form.warnings);
        form.controls.push(ControlDescriptor {
            key: field.name.clone(),
            initial_value: initial_value(field, existing),
            validators,
            disabled: false,
        });
    }

    form
}

/// Fan a dictionary field out into one sub-control per option.
fn compile_dictionary(field: &FieldDefinition, existing: Option<&Entity>, form: &mut CompiledForm) {
    if field.options.is_empty() {
        warn!(name = %field.name, "dictionary field has no options, excluding");
        form.warnings.push(CompileWarning::DictionaryWithoutOptions {
            name: field.name.clone(),
        });
        return;
    }

    for option in &field.options {
        let initial = existing
            .and_then(|e| e.dictionary_value(&field.name, &option.value))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        let validators = if field.validation.required {
            vec![Validator::Required]
        } else {
            Vec::new()
        };
        form.controls.push(ControlDescriptor {
            key: dictionary_key(&field.name, &option.value),
            initial_value: initial,
            validators,
            disabled: false,
        });
    }
}

/// The form-value key of one dictionary sub-control.
pub fn dictionary_key(field_name: &str, option_value: &str) -> String {
    format!("{field_name}_{option_value}")
}

fn build_validators(field: &FieldDefinition, warnings: &mut Vec<CompileWarning>) -> Vec<Validator> {
    let rules: &ValidationRules = &field.validation;
    let mut validators = Vec::new();

    if rules.required {
        validators.push(Validator::Required);
    }
    if let Some(min_length) = rules.min_length {
        validators.push(Validator::MinLength(min_length));
    }
    if let Some(max_length) = rules.max_length {
        validators.push(Validator::MaxLength(max_length));
    }
    if let Some(pattern) = &rules.pattern {
        match Regex::new(pattern) {
            Ok(regex) => validators.push(Validator::Pattern(regex)),
            Err(_) => {
                warn!(name = %field.name, pattern = %pattern, "invalid pattern, skipping rule");
                warnings.push(CompileWarning::InvalidPattern {
                    name: field.name.clone(),
                    pattern: pattern.clone(),
                });
            }
        }
    }
    if rules.email || field.field_type == FieldType::Email {
        validators.push(Validator::Email);
    }
    if let Some(min) = rules.min {
        validators.push(Validator::Min(min));
    }
    if let Some(max) = rules.max {
        validators.push(Validator::Max(max));
    }
    if rules.url || field.field_type == FieldType::Url {
        validators.push(Validator::Url);
    }

    validators
}

fn initial_value(field: &FieldDefinition, existing: Option<&Entity>) -> Value {
    if let Some(stored) = existing.and_then(|e| e.value_of(&field.name)) {
        return stored.clone();
    }
    if let Some(default) = &field.default_value {
        return default.clone();
    }
    type_default(field.field_type)
}

/// Default value derived from the field type when nothing else applies.
fn type_default(field_type: FieldType) -> Value {
    match field_type {
        FieldType::Checkbox => Value::Bool(false),
        FieldType::Number | FieldType::Currency => Value::Null,
        FieldType::MultiSelect => Value::Array(Vec::new()),
        _ => Value::String(String::new()),
    }
}

/// Run every compiled validator over the submitted values. Controls absent
/// from `values` validate as null.
pub fn validate(form: &CompiledForm, values: &Map<String, Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for control in &form.controls {
        let value = values.get(&control.key).unwrap_or(&Value::Null);
        for validator in &control.validators {
            if let Err(error) = validator.check(&control.key, value) {
                errors.push(error);
            }
        }
    }
    errors
}

/// Regroup submitted values for persistence: dictionary sub-controls fan
/// back into one object per field, and every value routes to the built-in
/// or custom side depending on `is_default`.
pub fn decompile(fields: &[FieldDefinition], values: &Map<String, Value>) -> SubmitPayload {
    let mut payload = SubmitPayload::default();

    for field in fields.iter().filter(|f| f.is_active) {
        let value = if field.field_type == FieldType::Dictionary {
            if field.options.is_empty() {
                continue;
            }
            let mut grouped = Map::new();
            for option in &field.options {
                let sub = values
                    .get(&dictionary_key(&field.name, &option.value))
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new()));
                grouped.insert(option.value.clone(), sub);
            }
            Value::Object(grouped)
        } else {
            values.get(&field.name).cloned().unwrap_or(Value::Null)
        };

        if field.is_default {
            payload.default_fields.insert(field.name.clone(), value);
        } else {
            payload.custom_fields.insert(field.name.clone(), value);
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_fields::{GridVisibility, SelectOption};
    use serde_json::json;

    fn text_field(name: &str) -> FieldDefinition {
        FieldDefinition::new(name, name.to_uppercase(), FieldType::Text)
    }

    fn dictionary_field(name: &str, options: &[&str]) -> FieldDefinition {
        FieldDefinition::new(name, name.to_uppercase(), FieldType::Dictionary).with_options(
            options
                .iter()
                .map(|o| SelectOption::new(*o, o.to_uppercase()))
                .collect(),
        )
    }

    #[test]
    fn compiles_one_control_per_plain_field() {
        let fields = [text_field("a"), text_field("b")];
        let form = compile(&fields, None);
        assert_eq!(form.controls.len(), 2);
        assert_eq!(form.controls[0].key, "a");
        assert!(form.warnings.is_empty());
    }

    #[test]
    fn inactive_fields_are_excluded() {
        let fields = [text_field("a").inactive()];
        let form = compile(&fields, None);
        assert!(form.controls.is_empty());
        assert!(form.warnings.is_empty());
    }

    #[test]
    fn inactive_but_grid_visible_is_flagged() {
        let fields = [text_field("a")
            .with_grid(GridVisibility::column(0))
            .inactive()];
        let form = compile(&fields, None);
        assert!(form.controls.is_empty());
        assert_eq!(
            form.warnings,
            [CompileWarning::GridVisibleButInactive { name: "a".into() }]
        );
    }

    #[test]
    fn dictionary_fans_out_per_option() {
        let fields = [dictionary_field("colors", &["red", "blue"])];
        let form = compile(&fields, None);

        let keys: Vec<_> = form.controls.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["colors_red", "colors_blue"]);
        for control in &form.controls {
            assert_eq!(control.initial_value, json!(""));
            assert!(control.validators.is_empty());
        }
    }

    #[test]
    fn required_dictionary_propagates_to_sub_controls() {
        let mut field = dictionary_field("colors", &["red"]);
        field.validation.required = true;
        let form = compile(&[field], None);
        assert!(matches!(
            form.controls[0].validators[..],
            [Validator::Required]
        ));
    }

    #[test]
    fn dictionary_without_options_is_excluded_with_warning() {
        let fields = [
            FieldDefinition::new("colors", "Colors", FieldType::Dictionary),
            text_field("a"),
        ];
        let form = compile(&fields, None);
        assert_eq!(form.controls.len(), 1);
        assert_eq!(form.controls[0].key, "a");
        assert_eq!(
            form.warnings,
            [CompileWarning::DictionaryWithoutOptions {
                name: "colors".into()
            }]
        );
    }

    #[test]
    fn dictionary_reads_stored_sub_values() {
        let entity = Entity::new().with_custom_field("colors", json!({"red": "r1"}));
        let fields = [dictionary_field("colors", &["red", "blue"])];
        let form = compile(&fields, Some(&entity));

        assert_eq!(form.control("colors_red").unwrap().initial_value, json!("r1"));
        assert_eq!(form.control("colors_blue").unwrap().initial_value, json!(""));
    }

    #[test]
    fn type_defaults() {
        let fields = [
            FieldDefinition::new("done", "Done", FieldType::Checkbox),
            FieldDefinition::new("qty", "Qty", FieldType::Number),
            FieldDefinition::new("price", "Price", FieldType::Currency),
            FieldDefinition::new("tags", "Tags", FieldType::MultiSelect)
                .with_options(vec![SelectOption::new("a", "A")]),
            text_field("note"),
        ];
        let form = compile(&fields, None);
        assert_eq!(form.control("done").unwrap().initial_value, json!(false));
        assert_eq!(form.control("qty").unwrap().initial_value, Value::Null);
        assert_eq!(form.control("price").unwrap().initial_value, Value::Null);
        assert_eq!(form.control("tags").unwrap().initial_value, json!([]));
        assert_eq!(form.control("note").unwrap().initial_value, json!(""));
    }

    #[test]
    fn explicit_default_beats_type_default() {
        let fields = [text_field("country").with_default_value(json!("CH"))];
        let form = compile(&fields, None);
        assert_eq!(form.controls[0].initial_value, json!("CH"));
    }

    #[test]
    fn initial_value_precedence_in_edit_mode() {
        let entity = Entity::new()
            .with_property("name", json!("Acme"))
            .with_custom_field("vat_id", json!("DE123"));
        let fields = [
            text_field("name").default_field(),
            text_field("vat_id").with_default_value(json!("unused")),
            text_field("city").with_default_value(json!("Zurich")),
        ];
        let form = compile(&fields, Some(&entity));
        assert_eq!(form.control("name").unwrap().initial_value, json!("Acme"));
        assert_eq!(form.control("vat_id").unwrap().initial_value, json!("DE123"));
        assert_eq!(form.control("city").unwrap().initial_value, json!("Zurich"));
    }

    #[test]
    fn validators_follow_the_rules_table() {
        let field = text_field("code").with_validation(
            ValidationRules::new()
                .required()
                .with_length_range(Some(2), Some(8))
                .with_pattern(r"^[A-Z]+$"),
        );
        let form = compile(&[field], None);
        let validators = &form.controls[0].validators;
        assert_eq!(validators.len(), 4);
        assert!(matches!(validators[0], Validator::Required));
        assert!(matches!(validators[1], Validator::MinLength(2)));
        assert!(matches!(validators[2], Validator::MaxLength(8)));
        assert!(matches!(validators[3], Validator::Pattern(_)));
    }

    #[test]
    fn email_and_url_types_imply_their_validators() {
        let fields = [
            FieldDefinition::new("mail", "Mail", FieldType::Email),
            FieldDefinition::new("site", "Site", FieldType::Url),
        ];
        let form = compile(&fields, None);
        assert!(matches!(
            form.control("mail").unwrap().validators[..],
            [Validator::Email]
        ));
        assert!(matches!(
            form.control("site").unwrap().validators[..],
            [Validator::Url]
        ));
    }

    #[test]
    fn invalid_pattern_is_skipped_with_warning() {
        let field =
            text_field("code").with_validation(ValidationRules::new().with_pattern("([unclosed"));
        let form = compile(&[field], None);
        assert!(form.controls[0].validators.is_empty());
        assert!(matches!(
            form.warnings[..],
            [CompileWarning::InvalidPattern { .. }]
        ));
    }

    #[test]
    fn validate_reports_violations_per_control() {
        let fields = [
            text_field("name").with_validation(ValidationRules::new().required()),
            FieldDefinition::new("qty", "Qty", FieldType::Number)
                .with_validation(ValidationRules::new().with_numeric_range(Some(1.0), None)),
        ];
        let form = compile(&fields, None);

        let mut values = Map::new();
        values.insert("name".into(), json!(""));
        values.insert("qty".into(), json!(0));
        let errors = validate(&form, &values);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::Missing { .. }));
        assert!(matches!(errors[1], ValidationError::OutOfRange { .. }));

        values.insert("name".into(), json!("ok"));
        values.insert("qty".into(), json!(2));
        assert!(validate(&form, &values).is_empty());
    }

    #[test]
    fn decompile_routes_by_is_default() {
        let fields = [
            text_field("name").default_field(),
            text_field("vat_id"),
        ];
        let mut values = Map::new();
        values.insert("name".into(), json!("Acme"));
        values.insert("vat_id".into(), json!("DE123"));

        let payload = decompile(&fields, &values);
        assert_eq!(payload.default_fields.get("name"), Some(&json!("Acme")));
        assert_eq!(payload.custom_fields.get("vat_id"), Some(&json!("DE123")));
        assert!(payload.default_fields.get("vat_id").is_none());
    }

    #[test]
    fn decompile_regroups_dictionary_values() {
        let fields = [dictionary_field("colors", &["red", "blue"])];
        let mut values = Map::new();
        values.insert("colors_red".into(), json!("r1"));
        values.insert("colors_blue".into(), json!("b1"));

        let payload = decompile(&fields, &values);
        assert_eq!(
            payload.custom_fields.get("colors"),
            Some(&json!({"red": "r1", "blue": "b1"}))
        );
    }

    #[test]
    fn decompile_skips_inactive_and_optionless() {
        let fields = [
            text_field("a").inactive(),
            FieldDefinition::new("colors", "Colors", FieldType::Dictionary),
        ];
        let mut values = Map::new();
        values.insert("a".into(), json!("x"));

        let payload = decompile(&fields, &values);
        assert!(payload.custom_fields.is_empty());
        assert!(payload.default_fields.is_empty());
    }
}
