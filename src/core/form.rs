//! # Form State
//!
//! A form is an ordered list of `FieldSpec`s plus the values typed so far.
//! The same state backs entity create/edit screens and the auth screens.
//!
//! Validation runs before any request is built: a missing required field
//! stops the submit entirely.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::core::entity::{Choice, EntityKind, Field, FieldKind, FieldSpec, FieldValue, Record};

/// Minimum length for a changed password.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty.
    Missing(Field),
    PasswordMismatch,
    PasswordTooShort(usize),
    /// Activation/reset opened without a token.
    MissingToken,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Missing(field) => write!(f, "required field is empty: {field:?}"),
            FormError::PasswordMismatch => write!(f, "passwords do not match"),
            FormError::PasswordTooShort(min) => write!(f, "password shorter than {min} characters"),
            FormError::MissingToken => write!(f, "token is missing"),
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub specs: Vec<FieldSpec>,
    pub values: HashMap<Field, FieldValue>,
    /// Picker options, keyed by the choice field they belong to.
    pub choices: HashMap<Field, Vec<Choice>>,
    pub focused: usize,
}

impl FormState {
    pub fn new(specs: &[FieldSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| {
                let value = match spec.kind {
                    FieldKind::Text | FieldKind::Secret => FieldValue::Text(String::new()),
                    FieldKind::Flag => FieldValue::Flag(true),
                    FieldKind::Choice(_) => FieldValue::Choice(None),
                };
                (spec.field, value)
            })
            .collect();
        Self {
            specs: specs.to_vec(),
            values,
            choices: HashMap::new(),
            focused: 0,
        }
    }

    /// Form for an entity kind. Create-only fields are dropped when editing.
    pub fn for_entity(kind: EntityKind, editing: bool) -> Self {
        let specs: Vec<FieldSpec> = kind
            .form_fields()
            .iter()
            .filter(|spec| !(editing && spec.create_only))
            .copied()
            .collect();
        Self::new(&specs)
    }

    pub fn spec(&self, field: Field) -> Option<&FieldSpec> {
        self.specs.iter().find(|spec| spec.field == field)
    }

    pub fn focused_spec(&self) -> Option<&FieldSpec> {
        self.specs.get(self.focused)
    }

    /// Copies a record's values into the fields this form has.
    pub fn fill(&mut self, record: &Record) {
        for spec in &self.specs {
            if let Some(value) = record.values.get(&spec.field) {
                self.values.insert(spec.field, value.clone());
            }
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match self.values.get(&field) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn set_text(&mut self, field: Field, text: impl Into<String>) {
        if self.spec(field).is_some() {
            self.values.insert(field, FieldValue::Text(text.into()));
        }
    }

    pub fn flag(&self, field: Field) -> bool {
        matches!(self.values.get(&field), Some(FieldValue::Flag(true)))
    }

    pub fn choice(&self, field: Field) -> Option<i64> {
        match self.values.get(&field) {
            Some(FieldValue::Choice(id)) => *id,
            _ => None,
        }
    }

    pub fn set_choice(&mut self, field: Field, id: Option<i64>) {
        if self.spec(field).is_some() {
            self.values.insert(field, FieldValue::Choice(id));
        }
    }

    /// Label of the selected option, once the options have loaded.
    pub fn choice_label(&self, field: Field) -> Option<&str> {
        let id = self.choice(field)?;
        self.choices
            .get(&field)?
            .iter()
            .find(|choice| choice.id == id)
            .map(|choice| choice.label.as_str())
    }

    pub fn set_choices(&mut self, field: Field, choices: Vec<Choice>) {
        self.choices.insert(field, choices);
    }

    pub fn focus_next(&mut self) {
        if !self.specs.is_empty() {
            self.focused = (self.focused + 1) % self.specs.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.specs.is_empty() {
            self.focused = (self.focused + self.specs.len() - 1) % self.specs.len();
        }
    }

    /// Types into the focused field if it holds text.
    pub fn insert_char(&mut self, c: char) {
        if let Some(spec) = self.focused_spec().copied()
            && matches!(spec.kind, FieldKind::Text | FieldKind::Secret)
            && let Some(FieldValue::Text(text)) = self.values.get_mut(&spec.field)
        {
            text.push(c);
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(spec) = self.focused_spec().copied()
            && let Some(FieldValue::Text(text)) = self.values.get_mut(&spec.field)
        {
            text.pop();
        }
    }

    /// Flips the focused field if it is a flag.
    pub fn toggle(&mut self) {
        if let Some(spec) = self.focused_spec().copied()
            && let Some(FieldValue::Flag(on)) = self.values.get_mut(&spec.field)
        {
            *on = !*on;
        }
    }

    /// Required-field check. Text counts as empty when it is only whitespace.
    pub fn validate(&self) -> Result<(), FormError> {
        for spec in self.specs.iter().filter(|spec| spec.required) {
            let filled = match self.values.get(&spec.field) {
                Some(FieldValue::Text(text)) => !text.trim().is_empty(),
                Some(FieldValue::Choice(id)) => id.is_some(),
                Some(FieldValue::Flag(_)) => true,
                None => false,
            };
            if !filled {
                return Err(FormError::Missing(spec.field));
            }
        }
        Ok(())
    }

    /// Request body keyed by the backend names. Empty optional values are left out.
    pub fn payload(&self, body_id: Option<i64>) -> Value {
        let mut body = Map::new();
        if let Some(id) = body_id {
            body.insert("id".to_string(), Value::from(id));
        }
        for spec in &self.specs {
            let value = match (spec.kind, self.values.get(&spec.field)) {
                (FieldKind::Text, Some(FieldValue::Text(text))) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() && !spec.required {
                        continue;
                    }
                    Value::from(trimmed)
                }
                (FieldKind::Secret, Some(FieldValue::Text(text))) => Value::from(text.as_str()),
                (FieldKind::Flag, Some(FieldValue::Flag(on))) => Value::from(*on),
                (FieldKind::Choice(_), Some(FieldValue::Choice(Some(id)))) => Value::from(*id),
                _ => continue,
            };
            body.insert(spec.key.to_string(), value);
        }
        Value::Object(body)
    }
}

/// Confirmation must match; `min_len` applies to the new password when given.
pub fn check_passwords(password: &str, confirm: &str, min_len: Option<usize>) -> Result<(), FormError> {
    if password != confirm {
        return Err(FormError::PasswordMismatch);
    }
    match min_len {
        Some(min) if password.chars().count() < min => Err(FormError::PasswordTooShort(min)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn company_form() -> FormState {
        FormState::for_entity(EntityKind::Company, false)
    }

    #[test]
    fn test_new_form_defaults() {
        let form = company_form();
        assert_eq!(form.text(Field::Name), "");
        assert!(form.flag(Field::Active));
        assert_eq!(form.choice(Field::Town), None);
        assert_eq!(form.focused, 0);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut form = company_form();
        assert_eq!(form.validate(), Err(FormError::Missing(Field::Name)));

        form.set_text(Field::Name, "Acme");
        form.set_text(Field::ShortName, "   ");
        assert_eq!(form.validate(), Err(FormError::Missing(Field::ShortName)));

        form.set_text(Field::ShortName, "ACM");
        assert_eq!(form.validate(), Err(FormError::Missing(Field::Town)));

        form.set_choice(Field::Town, Some(3));
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_payload_trims_and_skips_empty_optionals() {
        let mut form = company_form();
        form.set_text(Field::Name, "  Acme  ");
        form.set_text(Field::ShortName, "ACM");
        form.set_choice(Field::Town, Some(3));

        assert_eq!(
            form.payload(None),
            json!({"name": "Acme", "shortName": "ACM", "townId": 3, "active": true})
        );
    }

    #[test]
    fn test_payload_includes_body_id() {
        let mut form = FormState::for_entity(EntityKind::DepartmentType, true);
        form.set_text(Field::Name, "Finance");
        assert_eq!(form.payload(Some(9)), json!({"id": 9, "name": "Finance"}));
    }

    #[test]
    fn test_edit_form_drops_create_only_fields() {
        let create = FormState::for_entity(EntityKind::User, false);
        let edit = FormState::for_entity(EntityKind::User, true);
        assert!(create.spec(Field::Role).is_some());
        assert!(edit.spec(Field::Role).is_none());
    }

    #[test]
    fn test_typing_goes_to_focused_text_field() {
        let mut form = company_form();
        form.insert_str("Ac\nme");
        form.focus_next();
        form.insert_char('X');
        form.backspace();
        form.insert_char('Y');
        assert_eq!(form.text(Field::Name), "Acme");
        assert_eq!(form.text(Field::ShortName), "Y");
    }

    #[test]
    fn test_typing_ignored_on_choice_and_toggle_on_flag() {
        let mut form = company_form();
        form.focused = 3; // town
        form.insert_char('z');
        assert_eq!(form.choice(Field::Town), None);

        form.focused = 5; // active
        form.toggle();
        assert!(!form.flag(Field::Active));
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = FormState::for_entity(EntityKind::City, false);
        form.focus_next();
        assert_eq!(form.focused, 0);
        form.focus_prev();
        assert_eq!(form.focused, 0);

        let mut form = company_form();
        form.focus_prev();
        assert_eq!(form.focused, form.specs.len() - 1);
    }

    #[test]
    fn test_fill_and_choice_label() {
        let record = Record::new(5, "Ankara")
            .text_value(Field::Name, Some("Ankara"))
            .choice_value(Field::Region, Some(2))
            .text_value(Field::ShortName, Some("ignored"));
        let mut form = FormState::for_entity(EntityKind::Town, true);
        form.fill(&record);
        form.set_choices(
            Field::Region,
            vec![Choice { id: 2, label: "İç Anadolu".to_string() }],
        );

        assert_eq!(form.text(Field::Name), "Ankara");
        assert_eq!(form.choice_label(Field::Region), Some("İç Anadolu"));
        assert!(!form.values.contains_key(&Field::ShortName));
    }

    #[test]
    fn test_check_passwords() {
        assert_eq!(check_passwords("secret1", "secret1", Some(6)), Ok(()));
        assert_eq!(
            check_passwords("secret1", "secret2", None),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(
            check_passwords("abc", "abc", Some(MIN_PASSWORD_LEN)),
            Err(FormError::PasswordTooShort(6))
        );
    }
}
