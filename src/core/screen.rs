//! # Screens
//!
//! Every screen on a navigation stack is one of a handful of generic kinds.
//! The entity CRUD surface is a single `ListScreen` and a single
//! `FormScreen`, parameterized by `EntityKind` and `Scope`.
//!
//! ```text
//! Screen { key, kind }
//!          ├── Form(FormScreen)        login, auth flows, entity create/edit
//!          ├── List(ListScreen)        any entity collection in a scope
//!          ├── Dashboard(Dashboard)    greeting + shortcuts
//!          ├── CompanyInfo(..)         the caller's company (user role)
//!          └── Profile(ProfileScreen)  the caller's own record
//! ```
//!
//! Lists re-fetch every time they gain focus. Forms fetch once, when first
//! shown.

use serde_json::Value;

use crate::core::command::Command;
use crate::core::entity::{
    Choice, ChoiceSource, EntityKind, Field, FieldKind, FieldSpec, Profile, Record, Scope,
    UpdateStyle,
};
use crate::core::form::{FormError, FormState, MIN_PASSWORD_LEN, check_passwords};
use crate::core::i18n::{Language, fill};
use crate::core::role::{Role, Tab, TabSet};

/// Identifies a pushed screen. Async results are routed back by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenKey(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub key: ScreenKey,
    pub kind: ScreenKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenKind {
    Form(FormScreen),
    List(ListScreen),
    Dashboard(Dashboard),
    CompanyInfo(CompanyInfoScreen),
    Profile(ProfileScreen),
}

impl Screen {
    /// Entity management screens only the Admin tab set may open.
    pub fn admin_only(&self) -> bool {
        match &self.kind {
            ScreenKind::Form(form) => {
                matches!(form.purpose, FormPurpose::Create(..) | FormPurpose::Edit(..))
            }
            ScreenKind::List(list) => list.scope == Scope::All,
            _ => false,
        }
    }

    /// Reads to issue when this screen becomes the visible one.
    pub fn focus_commands(&mut self, profile: Option<&Profile>) -> Vec<Command> {
        let target = self.key;
        match &mut self.kind {
            ScreenKind::List(list) => list.refresh(target),
            ScreenKind::Form(form) => form.mount(target),
            ScreenKind::CompanyInfo(info) => {
                match profile.and_then(|p| p.company_id) {
                    Some(company_id) => {
                        info.loading = true;
                        vec![Command::FetchCompanyInfo { target, company_id }]
                    }
                    None => {
                        info.company = None;
                        info.loading = false;
                        Vec::new()
                    }
                }
            }
            ScreenKind::Profile(_) => vec![Command::FetchProfile { target }],
            ScreenKind::Dashboard(_) => Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        match &self.kind {
            ScreenKind::List(list) => list.loading,
            ScreenKind::Form(form) => form.loading || form.submitting,
            ScreenKind::CompanyInfo(info) => info.loading,
            ScreenKind::Dashboard(_) | ScreenKind::Profile(_) => false,
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

/// What a form is for. Decides its fields, its request and what happens after.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPurpose {
    Login,
    ForgotPassword,
    /// With a token: set the first password. Without: resend the activation mail.
    Activation { token: Option<String> },
    ResetPassword { token: Option<String> },
    ChangePassword,
    EditProfile { id: i64, department_id: Option<i64> },
    Create(EntityKind, Scope),
    Edit(EntityKind, i64),
}

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Email, "email", true),
    FieldSpec::secret(Field::Password, "password"),
];

const EMAIL_ONLY_FIELDS: &[FieldSpec] = &[FieldSpec::text(Field::Email, "email", true)];

const ACTIVATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::secret(Field::Password, "password"),
    FieldSpec::secret(Field::ConfirmPassword, "confirmPassword"),
];

const RESET_FIELDS: &[FieldSpec] = &[
    FieldSpec::secret(Field::NewPassword, "newPassword"),
    FieldSpec::secret(Field::ConfirmPassword, "confirmPassword"),
];

const CHANGE_PASSWORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::secret(Field::CurrentPassword, "currentPassword"),
    FieldSpec::secret(Field::NewPassword, "newPassword"),
    FieldSpec::secret(Field::ConfirmPassword, "confirmPassword"),
];

const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::text(Field::Surname, "surname", true),
    FieldSpec::text(Field::Email, "email", true),
];

impl FormPurpose {
    pub fn title(&self, language: Language) -> String {
        let s = language.strings();
        match self {
            FormPurpose::Login => s.login_title.to_string(),
            FormPurpose::ForgotPassword => s.forgot_password_title.to_string(),
            FormPurpose::Activation { .. } => s.activation_title.to_string(),
            FormPurpose::ResetPassword { .. } => s.reset_password_title.to_string(),
            FormPurpose::ChangePassword => s.change_password_title.to_string(),
            FormPurpose::EditProfile { .. } => s.edit_profile_title.to_string(),
            FormPurpose::Create(kind, _) => fill(s.new_record, "entity", language.entity(*kind)),
            FormPurpose::Edit(kind, _) => fill(s.edit_record, "entity", language.entity(*kind)),
        }
    }

    fn initial_state(&self) -> FormState {
        match self {
            FormPurpose::Login => FormState::new(LOGIN_FIELDS),
            FormPurpose::ForgotPassword => FormState::new(EMAIL_ONLY_FIELDS),
            FormPurpose::Activation { token: Some(_) } => FormState::new(ACTIVATION_FIELDS),
            FormPurpose::Activation { token: None } => FormState::new(EMAIL_ONLY_FIELDS),
            FormPurpose::ResetPassword { .. } => FormState::new(RESET_FIELDS),
            FormPurpose::ChangePassword => FormState::new(CHANGE_PASSWORD_FIELDS),
            FormPurpose::EditProfile { .. } => FormState::new(PROFILE_FIELDS),
            FormPurpose::Create(kind, scope) => {
                let mut form = FormState::for_entity(*kind, false);
                match (kind, scope) {
                    (EntityKind::Department, Scope::Company(id)) => {
                        form.set_choice(Field::Company, Some(*id));
                    }
                    (EntityKind::User, Scope::Department(id)) => {
                        form.set_choice(Field::Department, Some(*id));
                    }
                    _ => {}
                }
                form
            }
            FormPurpose::Edit(kind, _) => FormState::for_entity(*kind, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormScreen {
    pub purpose: FormPurpose,
    pub form: FormState,
    /// Waiting for the record that pre-fills an edit form.
    pub loading: bool,
    pub submitting: bool,
    mounted: bool,
}

impl FormScreen {
    pub fn new(purpose: FormPurpose) -> Self {
        let mut form = purpose.initial_state();
        let role_choices: Vec<Choice> = Role::ASSIGNABLE
            .iter()
            .map(|(id, role)| Choice {
                id: *id,
                label: role.name().to_string(),
            })
            .collect();
        if form.spec(Field::Role).is_some() {
            form.set_choices(Field::Role, role_choices);
        }
        Self {
            purpose,
            form,
            loading: false,
            submitting: false,
            mounted: false,
        }
    }

    /// Pre-fill and picker reads, issued once.
    fn mount(&mut self, target: ScreenKey) -> Vec<Command> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;

        let mut commands = Vec::new();
        if let FormPurpose::Edit(kind, id) = self.purpose {
            self.loading = true;
            commands.push(Command::FetchRecord { target, kind, id });
        }
        for spec in &self.form.specs {
            if let FieldKind::Choice(ChoiceSource::Entity(kind)) = spec.kind {
                commands.push(Command::FetchChoices {
                    target,
                    field: spec.field,
                    kind,
                });
            }
        }
        commands
    }

    /// Validates and builds the request. `Err` means nothing is sent.
    pub fn submit(&self, target: ScreenKey) -> Result<Command, FormError> {
        let form = &self.form;
        form.validate()?;

        let command = match &self.purpose {
            FormPurpose::Login => Command::Login {
                target,
                payload: form.payload(None),
            },
            FormPurpose::ForgotPassword => Command::ForgotPassword {
                target,
                payload: form.payload(None),
            },
            FormPurpose::Activation { token: None } => Command::ResendActivation {
                target,
                payload: form.payload(None),
            },
            FormPurpose::Activation { token: Some(token) } => {
                check_passwords(form.text(Field::Password), form.text(Field::ConfirmPassword), None)?;
                Command::Activate {
                    target,
                    payload: with_token(form.payload(None), token),
                }
            }
            FormPurpose::ResetPassword { token } => {
                let token = token.as_deref().ok_or(FormError::MissingToken)?;
                check_passwords(form.text(Field::NewPassword), form.text(Field::ConfirmPassword), None)?;
                Command::ResetPassword {
                    target,
                    payload: with_token(form.payload(None), token),
                }
            }
            FormPurpose::ChangePassword => {
                check_passwords(
                    form.text(Field::NewPassword),
                    form.text(Field::ConfirmPassword),
                    Some(MIN_PASSWORD_LEN),
                )?;
                Command::ChangePassword {
                    target,
                    payload: form.payload(None),
                }
            }
            FormPurpose::EditProfile { id, department_id } => {
                let mut payload = form.payload(Some(*id));
                if let (Some(department_id), Value::Object(body)) = (department_id, &mut payload) {
                    body.insert("departmentId".to_string(), Value::from(*department_id));
                }
                Command::UpdateProfile { target, payload }
            }
            FormPurpose::Create(kind, _) => Command::Save {
                target,
                kind: *kind,
                id: None,
                payload: form.payload(None),
            },
            FormPurpose::Edit(kind, id) => {
                let body_id = match kind.endpoints().update_style {
                    UpdateStyle::BodyId => Some(*id),
                    UpdateStyle::PathId => None,
                };
                Command::Save {
                    target,
                    kind: *kind,
                    id: Some(*id),
                    payload: form.payload(body_id),
                }
            }
        };
        Ok(command)
    }
}

fn with_token(mut payload: Value, token: &str) -> Value {
    if let Value::Object(body) = &mut payload {
        body.insert("token".to_string(), Value::from(token));
    }
    payload
}

// ============================================================================
// Lists
// ============================================================================

/// What the user may do from a list. Derived from the active tab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCaps {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ListCaps {
    pub const READ_ONLY: ListCaps = ListCaps {
        create: false,
        edit: false,
        delete: false,
    };

    pub fn for_list(tab_set: Option<TabSet>, scope: Scope) -> Self {
        match (tab_set, scope) {
            (Some(TabSet::Admin), _) => ListCaps {
                create: true,
                edit: true,
                delete: true,
            },
            (Some(TabSet::Manager), Scope::ManagedDepartment) => ListCaps {
                delete: true,
                ..ListCaps::READ_ONLY
            },
            _ => ListCaps::READ_ONLY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListScreen {
    pub kind: EntityKind,
    pub scope: Scope,
    /// The parent record for scoped lists (company detail, department detail).
    pub header: Option<Record>,
    pub records: Vec<Record>,
    pub selected: usize,
    pub loading: bool,
    pub caps: ListCaps,
    /// Number of the latest list request; answers to older ones are stale.
    pub seq: u64,
}

impl ListScreen {
    pub fn new(kind: EntityKind, scope: Scope, caps: ListCaps) -> Self {
        Self {
            kind,
            scope,
            header: None,
            records: Vec::new(),
            selected: 0,
            loading: false,
            caps,
            seq: 0,
        }
    }

    pub fn refresh(&mut self, target: ScreenKey) -> Vec<Command> {
        self.loading = true;
        self.seq += 1;
        let mut commands = vec![Command::FetchList {
            target,
            kind: self.kind,
            scope: self.scope,
            seq: self.seq,
        }];
        if self.header.is_none()
            && let Some((kind, id)) = self.scope.parent()
        {
            commands.push(Command::FetchRecord { target, kind, id });
        }
        commands
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.seq
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
        self.loading = false;
    }

    /// Drops a record locally, ahead of the re-fetch.
    pub fn remove(&mut self, id: i64) {
        self.records.retain(|record| record.id != id);
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    /// The nested list a record opens into, if its kind has one.
    pub fn detail_of(&self, record: &Record) -> Option<(EntityKind, Scope)> {
        match self.kind {
            EntityKind::Company => Some((EntityKind::Department, Scope::Company(record.id))),
            EntityKind::Department => Some((EntityKind::User, Scope::Department(record.id))),
            _ => None,
        }
    }
}

// ============================================================================
// Role screens
// ============================================================================

/// A dashboard entry the user can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    List(EntityKind, Scope),
    Tab(Tab),
}

impl Shortcut {
    pub fn label(self, language: Language) -> &'static str {
        match self {
            Shortcut::List(EntityKind::Company, Scope::OwnCompany) => language.strings().my_company,
            Shortcut::List(kind, _) => language.entities(kind),
            Shortcut::Tab(tab) => language.tab(tab),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub shortcuts: Vec<Shortcut>,
    pub selected: usize,
}

impl Dashboard {
    pub fn for_tab_set(tab_set: TabSet) -> Self {
        let shortcuts = match tab_set {
            TabSet::Admin => EntityKind::reference_data()
                .into_iter()
                .map(|kind| Shortcut::List(kind, Scope::All))
                .collect(),
            TabSet::Manager => vec![
                Shortcut::Tab(Tab::ManagerUsers),
                Shortcut::List(EntityKind::Company, Scope::OwnCompany),
                Shortcut::Tab(Tab::ManagerProfile),
            ],
            TabSet::User => Vec::new(),
        };
        Self {
            shortcuts,
            selected: 0,
        }
    }

    pub fn selected_shortcut(&self) -> Option<Shortcut> {
        self.shortcuts.get(self.selected).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyInfoScreen {
    pub company: Option<Record>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileScreen {
    /// Managers may edit their own name and contact details.
    pub editable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screen(kind: ScreenKind) -> Screen {
        Screen {
            key: ScreenKey(1),
            kind,
        }
    }

    #[test]
    fn test_list_refetches_on_every_focus() {
        let mut list = screen(ScreenKind::List(ListScreen::new(
            EntityKind::City,
            Scope::All,
            ListCaps::READ_ONLY,
        )));
        let fetch = |seq| {
            vec![Command::FetchList {
                target: ScreenKey(1),
                kind: EntityKind::City,
                scope: Scope::All,
                seq,
            }]
        };
        assert_eq!(list.focus_commands(None), fetch(1));
        assert_eq!(list.focus_commands(None), fetch(2));
        assert!(list.is_loading());
    }

    #[test]
    fn test_scoped_list_fetches_parent_header() {
        let mut list = screen(ScreenKind::List(ListScreen::new(
            EntityKind::Department,
            Scope::Company(7),
            ListCaps::READ_ONLY,
        )));
        let commands = list.focus_commands(None);
        assert!(commands.contains(&Command::FetchRecord {
            target: ScreenKey(1),
            kind: EntityKind::Company,
            id: 7,
        }));
    }

    #[test]
    fn test_edit_form_fetches_once() {
        let mut form = screen(ScreenKind::Form(FormScreen::new(FormPurpose::Edit(
            EntityKind::Town,
            4,
        ))));
        let first = form.focus_commands(None);
        assert_eq!(
            first,
            vec![
                Command::FetchRecord {
                    target: ScreenKey(1),
                    kind: EntityKind::Town,
                    id: 4
                },
                Command::FetchChoices {
                    target: ScreenKey(1),
                    field: Field::Region,
                    kind: EntityKind::Region
                },
            ]
        );
        assert!(form.focus_commands(None).is_empty());
    }

    #[test]
    fn test_submit_with_missing_field_builds_nothing() {
        let form = FormScreen::new(FormPurpose::Create(EntityKind::City, Scope::All));
        assert_eq!(
            form.submit(ScreenKey(1)),
            Err(FormError::Missing(Field::Name))
        );
    }

    #[test]
    fn test_department_create_preselects_company() {
        let form = FormScreen::new(FormPurpose::Create(EntityKind::Department, Scope::Company(3)));
        assert_eq!(form.form.choice(Field::Company), Some(3));
    }

    #[test]
    fn test_user_create_offers_roles() {
        let form = FormScreen::new(FormPurpose::Create(EntityKind::User, Scope::All));
        let roles = &form.form.choices[&Field::Role];
        assert_eq!(roles.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_edit_with_path_id_leaves_body_id_out() {
        let mut form = FormScreen::new(FormPurpose::Edit(EntityKind::City, 2));
        form.form.set_text(Field::Name, "İzmir");
        assert_eq!(
            form.submit(ScreenKey(1)),
            Ok(Command::Save {
                target: ScreenKey(1),
                kind: EntityKind::City,
                id: Some(2),
                payload: json!({"name": "İzmir"}),
            })
        );
    }

    #[test]
    fn test_edit_with_body_id_includes_it() {
        let mut form = FormScreen::new(FormPurpose::Edit(EntityKind::DepartmentType, 8));
        form.form.set_text(Field::Name, "IT");
        let Ok(Command::Save { payload, .. }) = form.submit(ScreenKey(1)) else {
            panic!("expected save");
        };
        assert_eq!(payload, json!({"id": 8, "name": "IT"}));
    }

    #[test]
    fn test_reset_requires_token_and_matching_passwords() {
        let mut form = FormScreen::new(FormPurpose::ResetPassword { token: None });
        form.form.set_text(Field::NewPassword, "secret");
        form.form.set_text(Field::ConfirmPassword, "secret");
        assert_eq!(form.submit(ScreenKey(1)), Err(FormError::MissingToken));

        let mut form = FormScreen::new(FormPurpose::ResetPassword {
            token: Some("tok".to_string()),
        });
        form.form.set_text(Field::NewPassword, "secret");
        form.form.set_text(Field::ConfirmPassword, "secreT");
        assert_eq!(form.submit(ScreenKey(1)), Err(FormError::PasswordMismatch));

        form.form.set_text(Field::ConfirmPassword, "secret");
        assert_eq!(
            form.submit(ScreenKey(1)),
            Ok(Command::ResetPassword {
                target: ScreenKey(1),
                payload: json!({"token": "tok", "newPassword": "secret", "confirmPassword": "secret"}),
            })
        );
    }

    #[test]
    fn test_activation_without_token_resends_mail() {
        let mut form = FormScreen::new(FormPurpose::Activation { token: None });
        form.form.set_text(Field::Email, "a@b.c");
        assert!(matches!(
            form.submit(ScreenKey(1)),
            Ok(Command::ResendActivation { .. })
        ));
    }

    #[test]
    fn test_change_password_minimum_length() {
        let mut form = FormScreen::new(FormPurpose::ChangePassword);
        form.form.set_text(Field::CurrentPassword, "old");
        form.form.set_text(Field::NewPassword, "abc");
        form.form.set_text(Field::ConfirmPassword, "abc");
        assert_eq!(
            form.submit(ScreenKey(1)),
            Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN))
        );
    }

    #[test]
    fn test_edit_profile_sends_own_id_and_department() {
        let mut form = FormScreen::new(FormPurpose::EditProfile {
            id: 12,
            department_id: Some(5),
        });
        form.form.set_text(Field::Name, "Ayşe");
        form.form.set_text(Field::Surname, "Yılmaz");
        form.form.set_text(Field::Email, "ayse@example.com");
        assert_eq!(
            form.submit(ScreenKey(1)),
            Ok(Command::UpdateProfile {
                target: ScreenKey(1),
                payload: json!({
                    "id": 12,
                    "name": "Ayşe",
                    "surname": "Yılmaz",
                    "email": "ayse@example.com",
                    "departmentId": 5
                }),
            })
        );
    }

    #[test]
    fn test_caps_by_tab_set() {
        assert!(ListCaps::for_list(Some(TabSet::Admin), Scope::All).create);
        let manager = ListCaps::for_list(Some(TabSet::Manager), Scope::ManagedDepartment);
        assert!(manager.delete && !manager.create && !manager.edit);
        assert_eq!(
            ListCaps::for_list(Some(TabSet::Manager), Scope::OwnCompany),
            ListCaps::READ_ONLY
        );
    }

    #[test]
    fn test_admin_only_screens() {
        let form = screen(ScreenKind::Form(FormScreen::new(FormPurpose::Create(
            EntityKind::City,
            Scope::All,
        ))));
        assert!(form.admin_only());
        let own = screen(ScreenKind::List(ListScreen::new(
            EntityKind::Company,
            Scope::OwnCompany,
            ListCaps::READ_ONLY,
        )));
        assert!(!own.admin_only());
    }

    #[test]
    fn test_company_info_without_company_skips_fetch() {
        let mut info = screen(ScreenKind::CompanyInfo(CompanyInfoScreen::default()));
        assert!(info.focus_commands(None).is_empty());
        assert!(!info.is_loading());
    }
}
