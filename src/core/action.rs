//! # Actions
//!
//! Everything that can happen in orgdesk becomes an `Action`.
//! User presses Enter on a form? That's `Action::Submit`.
//! The backend answers? That's `Action::ListLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect`. No I/O here: requests leave as
//! `Command`s inside `Effect::Dispatch` and come back as result actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Results carry the key of the screen that asked. A result whose screen is
//! gone (popped, or dropped by logout) is ignored.

use log::{debug, info, warn};

use crate::api::client::ApiError;
use crate::core::command::Command;
use crate::core::deep_link::DeepLink;
use crate::core::entity::{Choice, Field, Profile, Record};
use crate::core::form::FormState;
use crate::core::i18n::fill;
use crate::core::role::Tab;
use crate::core::screen::{
    FormPurpose, FormScreen, ListCaps, ListScreen, ScreenKey, ScreenKind, Shortcut,
};
use crate::core::state::{Alert, AlertKind, App};

/// Edits to the focused form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormInput {
    Char(char),
    Paste(String),
    Backspace,
    Next,
    Prev,
    Toggle,
    /// A picker selection for a choice field.
    Pick(Field, i64),
}

#[derive(Debug)]
pub enum Action {
    // User intents
    Quit,
    /// Dismisses an alert, otherwise pops the current screen.
    Back,
    Logout,
    NextTab,
    SelectTab(usize),
    ToggleLanguage,
    CursorUp,
    CursorDown,
    Input(FormInput),
    Submit,
    /// Enter on a list row, dashboard shortcut or profile.
    Open,
    New,
    Edit,
    RequestDelete,
    Refresh,
    ConfirmAlert,
    DismissAlert,
    OpenForgotPassword,
    OpenActivation,
    OpenLink(DeepLink),

    // Request results
    LoggedIn {
        target: ScreenKey,
        result: Result<(), ApiError>,
    },
    SessionResolved(Result<Profile, ApiError>),
    ProfileLoaded {
        target: ScreenKey,
        result: Result<Profile, ApiError>,
    },
    ListLoaded {
        target: ScreenKey,
        /// Echo of the request's sequence number.
        seq: u64,
        result: Result<Vec<Record>, ApiError>,
    },
    RecordLoaded {
        target: ScreenKey,
        result: Result<Record, ApiError>,
    },
    ChoicesLoaded {
        target: ScreenKey,
        field: Field,
        result: Result<Vec<Choice>, ApiError>,
    },
    Submitted {
        target: ScreenKey,
        result: Result<(), ApiError>,
    },
    Deleted {
        target: ScreenKey,
        id: i64,
        result: Result<(), ApiError>,
    },
    CompanyInfoLoaded {
        target: ScreenKey,
        result: Result<Record, ApiError>,
    },
}

/// What the adapter should do after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Run each command on a background task.
    Dispatch(Vec<Command>),
}

fn dispatch(commands: Vec<Command>) -> Effect {
    if commands.is_empty() {
        Effect::None
    } else {
        Effect::Dispatch(commands)
    }
}

/// Issues the reads of whichever screen is now visible.
fn focus_current(app: &mut App) -> Effect {
    let profile = app.profile.as_ref();
    match app.nav.current_mut() {
        Some(screen) => dispatch(screen.focus_commands(profile)),
        None => Effect::None,
    }
}

fn push(app: &mut App, kind: ScreenKind) -> Effect {
    match app.nav.push(kind) {
        Some(_) => focus_current(app),
        None => Effect::None,
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Back => {
            if app.alert.take().is_some() {
                return Effect::None;
            }
            if app.nav.pop() {
                focus_current(app)
            } else {
                Effect::None
            }
        }
        Action::Logout => {
            if app.nav.tab_set().is_none() {
                return Effect::None;
            }
            info!("Logging out");
            app.profile = None;
            app.alert = None;
            app.nav.show_auth();
            app.status_message = app.language.strings().logged_out.to_string();
            Effect::Dispatch(vec![Command::EndSession])
        }
        Action::NextTab => {
            if app.nav.next_tab() {
                focus_current(app)
            } else {
                Effect::None
            }
        }
        Action::SelectTab(index) => {
            if app.nav.select_tab(index) {
                focus_current(app)
            } else {
                Effect::None
            }
        }
        Action::ToggleLanguage => {
            app.language = app.language.toggle();
            app.status_message = app.language.strings().language_name.to_string();
            Effect::None
        }
        Action::CursorUp | Action::CursorDown => {
            let up = matches!(action, Action::CursorUp);
            if let Some(screen) = app.nav.current_mut() {
                match &mut screen.kind {
                    ScreenKind::List(list) if up => list.select_prev(),
                    ScreenKind::List(list) => list.select_next(),
                    ScreenKind::Dashboard(dash) if up => {
                        dash.selected = dash.selected.saturating_sub(1);
                    }
                    ScreenKind::Dashboard(dash) => {
                        if dash.selected + 1 < dash.shortcuts.len() {
                            dash.selected += 1;
                        }
                    }
                    ScreenKind::Form(form) if up => form.form.focus_prev(),
                    ScreenKind::Form(form) => form.form.focus_next(),
                    _ => {}
                }
            }
            Effect::None
        }
        Action::Input(input) => {
            if let Some(screen) = app.nav.current_mut()
                && let ScreenKind::Form(form) = &mut screen.kind
                && !form.submitting
            {
                apply_input(&mut form.form, input);
            }
            Effect::None
        }
        Action::Submit => submit(app),
        Action::Open => open(app),
        Action::New => {
            let next = match app.nav.current().map(|s| &s.kind) {
                Some(ScreenKind::List(list)) if list.caps.create => {
                    Some(FormPurpose::Create(list.kind, list.scope))
                }
                _ => None,
            };
            match next {
                Some(purpose) => push(app, ScreenKind::Form(FormScreen::new(purpose))),
                None => Effect::None,
            }
        }
        Action::Edit => edit(app),
        Action::RequestDelete => {
            let s = app.language.strings();
            let alert = match app.nav.current() {
                Some(screen) => match &screen.kind {
                    ScreenKind::List(list) if list.caps.delete => {
                        list.selected_record().map(|record| Alert {
                            kind: AlertKind::ConfirmDelete {
                                target: screen.key,
                                kind: list.kind,
                                id: record.id,
                            },
                            message: fill(s.delete_confirm, "name", &record.title),
                        })
                    }
                    _ => None,
                },
                None => None,
            };
            if alert.is_some() {
                app.alert = alert;
            }
            Effect::None
        }
        Action::Refresh => focus_current(app),
        Action::ConfirmAlert => match app.alert.take() {
            Some(Alert {
                kind: AlertKind::ConfirmDelete { target, kind, id },
                ..
            }) => {
                info!("Deleting {:?} {}", kind, id);
                Effect::Dispatch(vec![Command::Delete { target, kind, id }])
            }
            _ => Effect::None,
        },
        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }
        Action::OpenForgotPassword | Action::OpenActivation => {
            let on_login = app.nav.tab_set().is_none()
                && matches!(
                    app.nav.current().map(|s| &s.kind),
                    Some(ScreenKind::Form(form)) if form.purpose == FormPurpose::Login
                );
            if !on_login {
                return Effect::None;
            }
            let purpose = match action {
                Action::OpenForgotPassword => FormPurpose::ForgotPassword,
                _ => FormPurpose::Activation { token: None },
            };
            push(app, ScreenKind::Form(FormScreen::new(purpose)))
        }
        Action::OpenLink(link) => open_link(app, link),

        Action::LoggedIn { target, result } => {
            if let Some(form) = form_mut(app, target) {
                form.submitting = false;
            }
            match result {
                Ok(()) => {
                    info!("Login accepted, fetching profile");
                    Effect::Dispatch(vec![Command::FetchSelf])
                }
                Err(e) => {
                    warn!("Login failed: {}", e);
                    request_failed(app, &e)
                }
            }
        }
        Action::SessionResolved(result) => resolve_session(app, result),
        Action::ProfileLoaded { target, result } => {
            if app.nav.find_mut(target).is_none() {
                debug!("Dropping profile for closed screen {:?}", target);
                return Effect::None;
            }
            match result {
                Ok(profile) => {
                    app.profile = Some(profile);
                    Effect::None
                }
                Err(e) => request_failed(app, &e),
            }
        }
        Action::ListLoaded {
            target,
            seq,
            result,
        } => {
            let Some(list) = list_mut(app, target) else {
                debug!("Dropping list for closed screen {:?}", target);
                return Effect::None;
            };
            if !list.is_latest(seq) {
                debug!(
                    "Dropping stale list {:?} (request {}, latest {})",
                    list.kind, seq, list.seq
                );
                return Effect::None;
            }
            match result {
                Ok(records) => {
                    debug!("List {:?} loaded {} records", list.kind, records.len());
                    list.set_records(records);
                    Effect::None
                }
                Err(e) => {
                    list.loading = false;
                    request_failed(app, &e)
                }
            }
        }
        Action::RecordLoaded { target, result } => {
            let error = match app.nav.find_mut(target).map(|s| &mut s.kind) {
                Some(ScreenKind::Form(form)) => {
                    form.loading = false;
                    match result {
                        Ok(record) => {
                            form.form.fill(&record);
                            None
                        }
                        Err(e) => Some(e),
                    }
                }
                Some(ScreenKind::List(list)) => match result {
                    Ok(record) => {
                        list.header = Some(record);
                        None
                    }
                    Err(e) => Some(e),
                },
                _ => {
                    debug!("Dropping record for closed screen {:?}", target);
                    None
                }
            };
            match error {
                Some(e) => request_failed(app, &e),
                None => Effect::None,
            }
        }
        Action::ChoicesLoaded {
            target,
            field,
            result,
        } => {
            let Some(form) = form_mut(app, target) else {
                return Effect::None;
            };
            match result {
                Ok(choices) => {
                    form.form.set_choices(field, choices);
                    Effect::None
                }
                Err(e) => request_failed(app, &e),
            }
        }
        Action::Submitted { target, result } => submitted(app, target, result),
        Action::Deleted { target, id, result } => {
            let Some(list) = list_mut(app, target) else {
                return Effect::None;
            };
            match result {
                Ok(()) => {
                    list.remove(id);
                    let commands = list.refresh(target);
                    app.status_message = app.language.strings().deleted.to_string();
                    Effect::Dispatch(commands)
                }
                Err(e) => request_failed(app, &e),
            }
        }
        Action::CompanyInfoLoaded { target, result } => {
            let Some(ScreenKind::CompanyInfo(info)) = app.nav.find_mut(target).map(|s| &mut s.kind)
            else {
                return Effect::None;
            };
            info.loading = false;
            match result {
                Ok(company) => {
                    info.company = Some(company);
                    Effect::None
                }
                Err(e) => request_failed(app, &e),
            }
        }
    }
}

/// Reports a failed request. A 401 while signed in means the token is dead,
/// so the session ends instead of every later screen failing the same way.
fn request_failed(app: &mut App, error: &ApiError) -> Effect {
    if error.is_unauthorized() && app.profile.is_some() {
        warn!("Token rejected, ending session");
        app.profile = None;
        if app.nav.tab_set().is_some() {
            app.nav.show_auth();
        }
        let message = app.language.strings().session_expired;
        app.show_error(message);
        return Effect::Dispatch(vec![Command::EndSession]);
    }
    let message = app.api_error_text(error);
    app.show_error(message);
    Effect::None
}

fn form_mut(app: &mut App, key: ScreenKey) -> Option<&mut FormScreen> {
    match app.nav.find_mut(key).map(|s| &mut s.kind) {
        Some(ScreenKind::Form(form)) => Some(form),
        _ => None,
    }
}

fn list_mut(app: &mut App, key: ScreenKey) -> Option<&mut ListScreen> {
    match app.nav.find_mut(key).map(|s| &mut s.kind) {
        Some(ScreenKind::List(list)) => Some(list),
        _ => None,
    }
}

fn apply_input(form: &mut FormState, input: FormInput) {
    match input {
        FormInput::Char(c) => form.insert_char(c),
        FormInput::Paste(text) => form.insert_str(&text),
        FormInput::Backspace => form.backspace(),
        FormInput::Next => form.focus_next(),
        FormInput::Prev => form.focus_prev(),
        FormInput::Toggle => form.toggle(),
        FormInput::Pick(field, id) => form.set_choice(field, Some(id)),
    }
}

fn submit(app: &mut App) -> Effect {
    if app.alert.is_some() {
        return Effect::None;
    }
    let outcome = match app.nav.current_mut() {
        Some(screen) => {
            let key = screen.key;
            match &mut screen.kind {
                ScreenKind::Form(form) if !form.submitting && !form.loading => {
                    let outcome = form.submit(key);
                    if outcome.is_ok() {
                        form.submitting = true;
                    }
                    Some(outcome)
                }
                _ => None,
            }
        }
        None => None,
    };
    match outcome {
        Some(Ok(command)) => {
            info!("Submitting {}", command.name());
            Effect::Dispatch(vec![command])
        }
        Some(Err(e)) => {
            debug!("Form rejected: {}", e);
            let message = app.form_error_text(&e);
            app.show_error(message);
            Effect::None
        }
        None => Effect::None,
    }
}

/// Where Enter leads from the current screen.
enum Next {
    Push(ScreenKind),
    Tab(Tab),
}

fn open(app: &mut App) -> Effect {
    let tab_set = app.nav.tab_set();
    let next = match app.nav.current().map(|s| &s.kind) {
        Some(ScreenKind::List(list)) => list.selected_record().and_then(|record| {
            match list.detail_of(record) {
                Some((kind, scope)) => Some(Next::Push(ScreenKind::List(ListScreen::new(
                    kind,
                    scope,
                    ListCaps::for_list(tab_set, scope),
                )))),
                None if list.caps.edit => Some(Next::Push(ScreenKind::Form(FormScreen::new(
                    FormPurpose::Edit(list.kind, record.id),
                )))),
                None => None,
            }
        }),
        Some(ScreenKind::Dashboard(dash)) => match dash.selected_shortcut() {
            Some(Shortcut::List(kind, scope)) => Some(Next::Push(ScreenKind::List(
                ListScreen::new(kind, scope, ListCaps::for_list(tab_set, scope)),
            ))),
            Some(Shortcut::Tab(tab)) => Some(Next::Tab(tab)),
            None => None,
        },
        Some(ScreenKind::Profile(_)) => Some(Next::Push(ScreenKind::Form(FormScreen::new(
            FormPurpose::ChangePassword,
        )))),
        _ => None,
    };
    match next {
        Some(Next::Push(kind)) => push(app, kind),
        Some(Next::Tab(tab)) if app.nav.select(tab) => focus_current(app),
        _ => Effect::None,
    }
}

fn edit(app: &mut App) -> Effect {
    let next = match app.nav.current().map(|s| &s.kind) {
        Some(ScreenKind::List(list)) if list.caps.edit => list
            .selected_record()
            .map(|record| FormScreen::new(FormPurpose::Edit(list.kind, record.id))),
        Some(ScreenKind::Profile(profile_screen)) if profile_screen.editable => {
            app.profile.as_ref().map(|profile| {
                let mut screen = FormScreen::new(FormPurpose::EditProfile {
                    id: profile.id,
                    department_id: profile.department_id,
                });
                screen.form.set_text(Field::Name, profile.name.clone());
                screen.form.set_text(Field::Surname, profile.surname.clone());
                screen
                    .form
                    .set_text(Field::Email, profile.email.clone().unwrap_or_default());
                screen
            })
        }
        _ => None,
    };
    match next {
        Some(form) => push(app, ScreenKind::Form(form)),
        None => Effect::None,
    }
}

fn open_link(app: &mut App, link: DeepLink) -> Effect {
    match link {
        DeepLink::Login => {
            if app.nav.tab_set().is_some() {
                warn!("Ignoring login link while signed in");
                return Effect::None;
            }
            info!("Opening login link");
            while app.nav.pop() {}
            Effect::None
        }
        DeepLink::ResetPassword { token: None } => {
            let message = app.language.strings().missing_token.to_string();
            app.show_error(message);
            Effect::None
        }
        DeepLink::ResetPassword { token } => {
            info!("Opening password reset link");
            push(
                app,
                ScreenKind::Form(FormScreen::new(FormPurpose::ResetPassword { token })),
            )
        }
        DeepLink::Activate { token } => {
            info!("Opening activation link");
            push(
                app,
                ScreenKind::Form(FormScreen::new(FormPurpose::Activation { token })),
            )
        }
    }
}

fn resolve_session(app: &mut App, result: Result<Profile, ApiError>) -> Effect {
    match result {
        Ok(profile) => match profile.role.tab_set() {
            Some(tab_set) => {
                info!("Signed in as {}", profile.role.name());
                app.status_message = fill(
                    app.language.strings().welcome,
                    "name",
                    &profile.display_name(),
                );
                app.profile = Some(profile);
                app.alert = None;
                app.nav.enter(tab_set);
                focus_current(app)
            }
            None => {
                warn!("Role not defined: {:?}", profile.role.name());
                app.profile = None;
                if app.nav.tab_set().is_some() {
                    app.nav.show_auth();
                }
                let message = app.language.strings().role_not_defined.to_string();
                app.show_error(message);
                Effect::Dispatch(vec![Command::EndSession])
            }
        },
        Err(e) => {
            warn!("Could not load profile: {}", e);
            let message = match e.is_unauthorized() {
                true => app.language.strings().session_expired.to_string(),
                false => app.api_error_text(&e),
            };
            app.profile = None;
            if app.nav.tab_set().is_some() {
                app.nav.show_auth();
            }
            app.show_error(message);
            Effect::Dispatch(vec![Command::EndSession])
        }
    }
}

fn submitted(app: &mut App, target: ScreenKey, result: Result<(), ApiError>) -> Effect {
    let Some(form) = form_mut(app, target) else {
        debug!("Dropping submit result for closed screen {:?}", target);
        return Effect::None;
    };
    form.submitting = false;
    let purpose = form.purpose.clone();

    if let Err(e) = result {
        // A wrong current password may come back as 401 too
        if purpose == FormPurpose::ChangePassword {
            let message = app.api_error_text(&e);
            app.show_error(message);
            return Effect::None;
        }
        return request_failed(app, &e);
    }

    let s = app.language.strings();
    match purpose {
        FormPurpose::Create(..) | FormPurpose::Edit(..) => app.status_message = s.saved.to_string(),
        FormPurpose::ChangePassword => app.status_message = s.password_changed.to_string(),
        FormPurpose::EditProfile { .. } => app.status_message = s.profile_updated.to_string(),
        FormPurpose::ForgotPassword => app.show_info(s.reset_mail_sent),
        FormPurpose::Activation { token: None } => app.show_info(s.activation_mail_sent),
        FormPurpose::Activation { token: Some(_) } => app.show_info(s.account_activated),
        FormPurpose::ResetPassword { .. } => app.show_info(s.password_reset_done),
        FormPurpose::Login => {}
    }

    let was_current = app.nav.is_current(target);
    app.nav.pop_screen(target);
    if was_current {
        focus_current(app)
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{EntityKind, Scope};
    use crate::core::role::{Role, TabSet};
    use crate::test_support::{profile, records, signed_in, test_app};

    fn current_kind(app: &App) -> &ScreenKind {
        &app.nav.current().unwrap().kind
    }

    fn current_key(app: &App) -> ScreenKey {
        app.nav.current().unwrap().key
    }

    fn type_text(app: &mut App, text: &str) {
        update(app, Action::Input(FormInput::Paste(text.to_string())));
    }

    // ------------------------------------------------------------------
    // Login and role gate
    // ------------------------------------------------------------------

    #[test]
    fn test_login_with_empty_field_sends_nothing() {
        let mut app = test_app();
        type_text(&mut app, "admin@example.com");
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.alert.as_ref().unwrap().message, "Password is required");
    }

    #[test]
    fn test_login_submit_then_fetch_self() {
        let mut app = test_app();
        type_text(&mut app, "admin@example.com");
        update(&mut app, Action::Input(FormInput::Next));
        type_text(&mut app, "secret");
        let target = current_key(&app);

        let effect = update(&mut app, Action::Submit);
        assert_eq!(
            effect,
            Effect::Dispatch(vec![Command::Login {
                target,
                payload: serde_json::json!({"email": "admin@example.com", "password": "secret"}),
            }])
        );
        assert!(app.is_loading());

        let effect = update(
            &mut app,
            Action::LoggedIn {
                target,
                result: Ok(()),
            },
        );
        assert_eq!(effect, Effect::Dispatch(vec![Command::FetchSelf]));
    }

    #[test]
    fn test_login_failure_shows_alert() {
        let mut app = test_app();
        let target = current_key(&app);
        update(
            &mut app,
            Action::LoggedIn {
                target,
                result: Err(ApiError::Api {
                    status: 401,
                    message: "Bad credentials".to_string(),
                }),
            },
        );
        assert_eq!(app.alert.as_ref().unwrap().message, "Bad credentials");
        assert_eq!(app.nav.tab_set(), None);
    }

    #[test]
    fn test_each_role_lands_on_its_tab_set() {
        for (role, expected) in [
            (Role::Admin, TabSet::Admin),
            (Role::Manager, TabSet::Manager),
            (Role::User, TabSet::User),
        ] {
            let mut app = test_app();
            update(&mut app, Action::SessionResolved(Ok(profile(role))));
            assert_eq!(app.nav.tab_set(), Some(expected));
            assert!(app.alert.is_none());
        }
    }

    #[test]
    fn test_unknown_role_stays_on_login_and_drops_token() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SessionResolved(Ok(profile(Role::Unknown("AUDITOR".to_string())))),
        );
        assert_eq!(effect, Effect::Dispatch(vec![Command::EndSession]));
        assert_eq!(app.nav.tab_set(), None);
        assert!(app.profile.is_none());
        assert_eq!(app.alert.as_ref().unwrap().message, "Role not defined");
    }

    #[test]
    fn test_expired_restored_session_returns_to_login() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SessionResolved(Err(ApiError::Api {
                status: 401,
                message: String::new(),
            })),
        );
        assert_eq!(effect, Effect::Dispatch(vec![Command::EndSession]));
        assert_eq!(
            app.alert.as_ref().unwrap().message,
            "Session expired, please sign in again"
        );
    }

    #[test]
    fn test_manager_tabs_and_no_admin_screens() {
        let mut app = signed_in(Role::Manager);
        assert_eq!(
            app.nav.tabs(),
            &[Tab::ManagerDashboard, Tab::ManagerUsers, Tab::ManagerProfile]
        );

        // Users tab: no create or edit
        update(&mut app, Action::SelectTab(1));
        let depth = app.nav.depth();
        assert_eq!(update(&mut app, Action::New), Effect::None);
        assert_eq!(update(&mut app, Action::Edit), Effect::None);
        assert_eq!(app.nav.depth(), depth);

        // Dashboard shortcuts never reach an admin-only screen
        update(&mut app, Action::SelectTab(0));
        for _ in 0..3 {
            update(&mut app, Action::Open);
            assert!(!app.nav.current().unwrap().admin_only());
            update(&mut app, Action::SelectTab(0));
            update(&mut app, Action::Back);
            update(&mut app, Action::CursorDown);
        }
    }

    #[test]
    fn test_manager_company_shortcut_opens_own_company() {
        let mut app = signed_in(Role::Manager);
        update(&mut app, Action::CursorDown);
        let effect = update(&mut app, Action::Open);
        let Effect::Dispatch(commands) = effect else {
            panic!("expected fetch");
        };
        assert!(matches!(
            commands[0],
            Command::FetchList {
                kind: EntityKind::Company,
                scope: Scope::OwnCompany,
                ..
            }
        ));
        let ScreenKind::List(list) = current_kind(&app) else {
            panic!("expected list");
        };
        assert_eq!(list.caps, ListCaps::READ_ONLY);
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    #[test]
    fn test_list_refetches_when_it_regains_focus() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        let list_key = current_key(&app);
        update(&mut app, Action::New);
        let effect = update(&mut app, Action::Back);
        assert_eq!(
            effect,
            Effect::Dispatch(vec![Command::FetchList {
                target: list_key,
                kind: EntityKind::Company,
                scope: Scope::All,
                seq: 2,
            }])
        );
    }

    #[test]
    fn test_submit_create_with_missing_field_sends_nothing() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        update(&mut app, Action::New);
        type_text(&mut app, "Acme");
        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        assert_eq!(
            app.alert.as_ref().unwrap().message,
            "Short name is required"
        );
    }

    #[test]
    fn test_successful_create_navigates_back_and_refreshes() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        let list_key = current_key(&app);
        update(&mut app, Action::New);
        let form_key = current_key(&app);
        type_text(&mut app, "Acme");
        update(&mut app, Action::Input(FormInput::Next));
        type_text(&mut app, "ACM");
        update(
            &mut app,
            Action::Input(FormInput::Pick(Field::Town, 11)),
        );

        let effect = update(&mut app, Action::Submit);
        assert!(matches!(
            effect,
            Effect::Dispatch(ref c) if matches!(c[0], Command::Save { id: None, .. })
        ));

        let effect = update(
            &mut app,
            Action::Submitted {
                target: form_key,
                result: Ok(()),
            },
        );
        assert!(app.alert.is_none());
        assert_eq!(current_key(&app), list_key);
        assert_eq!(app.status_message, "Saved");
        assert!(matches!(
            effect,
            Effect::Dispatch(ref c) if matches!(c[0], Command::FetchList { .. })
        ));
    }

    #[test]
    fn test_failed_save_keeps_form_open() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        update(&mut app, Action::New);
        let form_key = current_key(&app);
        update(
            &mut app,
            Action::Submitted {
                target: form_key,
                result: Err(ApiError::Network("timeout".to_string())),
            },
        );
        assert_eq!(current_key(&app), form_key);
        assert_eq!(
            app.alert.as_ref().unwrap().message,
            "Could not reach the server"
        );
    }

    #[test]
    fn test_delete_confirm_removes_row_and_refetches() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(2));
        let key = current_key(&app);
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 1,
                result: Ok(records(&[(1, "Ali"), (2, "Veli")])),
            },
        );
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::RequestDelete);
        assert_eq!(app.alert.as_ref().unwrap().message, "Delete \"Veli\"?");

        let effect = update(&mut app, Action::ConfirmAlert);
        assert_eq!(
            effect,
            Effect::Dispatch(vec![Command::Delete {
                target: key,
                kind: EntityKind::User,
                id: 2,
            }])
        );

        let effect = update(
            &mut app,
            Action::Deleted {
                target: key,
                id: 2,
                result: Ok(()),
            },
        );
        let ScreenKind::List(list) = current_kind(&app) else {
            panic!("expected list");
        };
        assert!(list.records.iter().all(|r| r.id != 2));
        assert_eq!(list.selected, 0);
        assert!(matches!(
            effect,
            Effect::Dispatch(ref c) if matches!(c[0], Command::FetchList { .. })
        ));
    }

    #[test]
    fn test_read_started_before_delete_cannot_restore_the_row() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(2));
        let key = current_key(&app);
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 1,
                result: Ok(records(&[(1, "Ali"), (2, "Veli")])),
            },
        );
        // A manual refresh whose answer is still out when the delete lands
        update(&mut app, Action::Refresh);
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::RequestDelete);
        update(&mut app, Action::ConfirmAlert);
        update(
            &mut app,
            Action::Deleted {
                target: key,
                id: 2,
                result: Ok(()),
            },
        );

        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 3,
                result: Ok(records(&[(1, "Ali")])),
            },
        );
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 2,
                result: Ok(records(&[(1, "Ali"), (2, "Veli")])),
            },
        );
        let ScreenKind::List(list) = current_kind(&app) else {
            panic!("expected list");
        };
        assert_eq!(list.records.len(), 1);
        assert!(list.records.iter().all(|r| r.id != 2));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_list_stays_loading_until_latest_answer() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        let key = current_key(&app);
        update(&mut app, Action::Refresh);
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 1,
                result: Err(ApiError::Network("late".to_string())),
            },
        );
        assert!(app.alert.is_none());
        assert!(app.is_loading());
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 2,
                result: Ok(records(&[(5, "Acme")])),
            },
        );
        assert!(!app.is_loading());
    }

    #[test]
    fn test_rejected_token_ends_session() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        let key = current_key(&app);
        let effect = update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 1,
                result: Err(ApiError::Api {
                    status: 401,
                    message: String::new(),
                }),
            },
        );
        assert_eq!(effect, Effect::Dispatch(vec![Command::EndSession]));
        assert!(app.profile.is_none());
        assert_eq!(app.nav.tab_set(), None);
        assert_eq!(
            app.alert.as_ref().unwrap().message,
            "Session expired, please sign in again"
        );
        assert!(matches!(
            current_kind(&app),
            ScreenKind::Form(f) if f.purpose == FormPurpose::Login
        ));
    }

    #[test]
    fn test_wrong_current_password_keeps_session() {
        let mut app = signed_in(Role::User);
        update(&mut app, Action::SelectTab(2));
        update(&mut app, Action::Open);
        let form_key = current_key(&app);
        let effect = update(
            &mut app,
            Action::Submitted {
                target: form_key,
                result: Err(ApiError::Api {
                    status: 401,
                    message: "Mevcut şifre hatalı".to_string(),
                }),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.profile.is_some());
        assert_eq!(app.alert.as_ref().unwrap().message, "Mevcut şifre hatalı");
    }

    #[test]
    fn test_cancelled_delete_sends_nothing() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(2));
        let key = current_key(&app);
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 1,
                result: Ok(records(&[(1, "Ali")])),
            },
        );
        update(&mut app, Action::RequestDelete);
        assert_eq!(update(&mut app, Action::Back), Effect::None);
        assert!(app.alert.is_none());
        assert_eq!(update(&mut app, Action::ConfirmAlert), Effect::None);
    }

    #[test]
    fn test_company_row_opens_its_departments() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        let key = current_key(&app);
        update(
            &mut app,
            Action::ListLoaded {
                target: key,
                seq: 1,
                result: Ok(records(&[(5, "Acme")])),
            },
        );
        update(&mut app, Action::Open);
        let ScreenKind::List(list) = current_kind(&app) else {
            panic!("expected list");
        };
        assert_eq!(list.kind, EntityKind::Department);
        assert_eq!(list.scope, Scope::Company(5));
        assert!(list.caps.create);
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::Open); // Regions shortcut
        let list_key = current_key(&app);
        update(
            &mut app,
            Action::ListLoaded {
                target: list_key,
                seq: 1,
                result: Ok(records(&[(3, "Ege")])),
            },
        );
        let effect = update(&mut app, Action::Edit);
        assert!(matches!(
            effect,
            Effect::Dispatch(ref c) if matches!(c[0], Command::FetchRecord { id: 3, .. })
        ));
        let form_key = current_key(&app);
        update(
            &mut app,
            Action::RecordLoaded {
                target: form_key,
                result: Ok(Record::new(3, "Ege").text_value(Field::Name, Some("Ege"))),
            },
        );
        let ScreenKind::Form(form) = current_kind(&app) else {
            panic!("expected form");
        };
        assert_eq!(form.form.text(Field::Name), "Ege");
        assert!(!form.loading);
    }

    #[test]
    fn test_results_for_closed_screens_are_dropped() {
        let mut app = signed_in(Role::Admin);
        update(&mut app, Action::SelectTab(1));
        update(&mut app, Action::New);
        let form_key = current_key(&app);
        update(&mut app, Action::Back);

        let effect = update(
            &mut app,
            Action::Submitted {
                target: form_key,
                result: Err(ApiError::Network("late".to_string())),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.alert.is_none());

        update(
            &mut app,
            Action::ListLoaded {
                target: form_key,
                seq: 1,
                result: Ok(records(&[(1, "x")])),
            },
        );
        let ScreenKind::List(list) = current_kind(&app) else {
            panic!("expected list");
        };
        assert!(list.records.is_empty());
    }

    // ------------------------------------------------------------------
    // Account flows
    // ------------------------------------------------------------------

    #[test]
    fn test_reset_link_without_token_is_rejected() {
        let mut app = test_app();
        update(
            &mut app,
            Action::OpenLink(DeepLink::ResetPassword { token: None }),
        );
        assert_eq!(app.nav.depth(), 1);
        assert_eq!(
            app.alert.as_ref().unwrap().message,
            "Invalid link: token is missing"
        );
    }

    #[test]
    fn test_reset_link_opens_form_and_returns_to_login() {
        let mut app = test_app();
        update(
            &mut app,
            Action::OpenLink(DeepLink::ResetPassword {
                token: Some("tok".to_string()),
            }),
        );
        let key = current_key(&app);
        assert!(matches!(
            current_kind(&app),
            ScreenKind::Form(f) if matches!(f.purpose, FormPurpose::ResetPassword { .. })
        ));
        update(
            &mut app,
            Action::Submitted {
                target: key,
                result: Ok(()),
            },
        );
        assert_eq!(app.nav.depth(), 1);
        assert_eq!(
            app.alert.as_ref().unwrap().kind,
            AlertKind::Info
        );
    }

    #[test]
    fn test_forgot_password_only_from_login() {
        let mut app = test_app();
        update(&mut app, Action::OpenForgotPassword);
        assert_eq!(app.nav.depth(), 2);
        update(&mut app, Action::OpenActivation);
        assert_eq!(app.nav.depth(), 2);
    }

    #[test]
    fn test_manager_edit_profile_is_prefilled() {
        let mut app = signed_in(Role::Manager);
        update(&mut app, Action::SelectTab(2));
        update(&mut app, Action::Edit);
        let ScreenKind::Form(form) = current_kind(&app) else {
            panic!("expected form");
        };
        assert_eq!(form.form.text(Field::Name), "Test");
        assert!(matches!(form.purpose, FormPurpose::EditProfile { id: 42, .. }));
    }

    #[test]
    fn test_profile_update_leaves_phone_alone() {
        let mut app = test_app();
        let mut manager = profile(Role::Manager);
        manager.phone = Some("555 0101".to_string());
        update(&mut app, Action::SessionResolved(Ok(manager)));
        update(&mut app, Action::SelectTab(2));
        update(&mut app, Action::Edit);

        let effect = update(&mut app, Action::Submit);
        let Effect::Dispatch(commands) = effect else {
            panic!("expected update");
        };
        let Command::UpdateProfile { payload, .. } = &commands[0] else {
            panic!("expected update-profile");
        };
        assert!(payload.get("phone").is_none());
        assert_eq!(payload["departmentId"], 5);
        assert_eq!(payload["email"], "test@example.com");
    }

    #[test]
    fn test_user_profile_is_not_editable() {
        let mut app = signed_in(Role::User);
        update(&mut app, Action::SelectTab(2));
        assert_eq!(update(&mut app, Action::Edit), Effect::None);
        update(&mut app, Action::Open);
        assert!(matches!(
            current_kind(&app),
            ScreenKind::Form(f) if f.purpose == FormPurpose::ChangePassword
        ));
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut app = signed_in(Role::User);
        let effect = update(&mut app, Action::Logout);
        assert_eq!(effect, Effect::Dispatch(vec![Command::EndSession]));
        assert_eq!(app.nav.tab_set(), None);
        assert!(app.profile.is_none());
        assert_eq!(app.status_message, "Signed out");
    }

    #[test]
    fn test_toggle_language() {
        let mut app = test_app();
        update(&mut app, Action::ToggleLanguage);
        assert_eq!(app.status_message, "Türkçe");
        type_text(&mut app, "x@y.z");
        update(&mut app, Action::Submit);
        assert_eq!(app.alert.as_ref().unwrap().message, "Şifre alanı zorunludur");
    }
}
