//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::dispatch::Backend;
use crate::core::action::{Action, update};
use crate::core::command::Command;
use crate::core::entity::{Profile, Record};
use crate::core::i18n::Language;
use crate::core::role::Role;
use crate::core::state::App;

/// A backend that never answers, for tests that don't need real API calls.
pub struct NoopBackend;

#[async_trait]
impl Backend for NoopBackend {
    async fn execute(&self, _command: Command) -> Option<Action> {
        None
    }
}

/// Creates a signed-out test App in English.
pub fn test_app() -> App {
    App::new(Language::En)
}

/// A profile with the given role, department 5 of company 9.
pub fn profile(role: Role) -> Profile {
    Profile {
        id: 42,
        name: "Test".to_string(),
        surname: "User".to_string(),
        email: Some("test@example.com".to_string()),
        phone: None,
        role,
        department_id: Some(5),
        department_name: Some("Muhasebe".to_string()),
        company_id: Some(9),
        company_name: Some("Acme".to_string()),
        created_at: None,
    }
}

/// A test App that has already resolved its session with `role`.
pub fn signed_in(role: Role) -> App {
    let mut app = test_app();
    update(&mut app, Action::SessionResolved(Ok(profile(role))));
    app
}

/// Bare records from `(id, title)` pairs.
pub fn records(rows: &[(i64, &str)]) -> Vec<Record> {
    rows.iter().map(|(id, title)| Record::new(*id, *title)).collect()
}
