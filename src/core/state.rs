//! # Application State
//!
//! Core business state for orgdesk. No TUI-specific types live here;
//! presentation state (picker overlays, list scroll) stays in the `tui` module.
//!
//! ```text
//! App
//! ├── nav: Navigator              // tab set + one screen stack per tab
//! ├── language: Language          // active string table
//! ├── profile: Option<Profile>    // signed-in user, from get-self
//! ├── alert: Option<Alert>        // blocking modal (error, info, confirm)
//! └── status_message: String      // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::client::ApiError;
use crate::core::entity::{EntityKind, Profile};
use crate::core::form::FormError;
use crate::core::i18n::{Language, fill};
use crate::core::nav::Navigator;
use crate::core::screen::ScreenKey;

#[derive(Debug, Clone, PartialEq)]
pub enum AlertKind {
    Error,
    Info,
    /// Delete waiting for confirmation.
    ConfirmDelete {
        target: ScreenKey,
        kind: EntityKind,
        id: i64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug)]
pub struct App {
    pub nav: Navigator,
    pub language: Language,
    pub profile: Option<Profile>,
    pub alert: Option<Alert>,
    pub status_message: String,
}

impl App {
    pub fn new(language: Language) -> Self {
        Self {
            nav: Navigator::new(),
            language,
            profile: None,
            alert: None,
            status_message: language.strings().not_logged_in.to_string(),
        }
    }

    /// True while the visible screen waits on a request.
    pub fn is_loading(&self) -> bool {
        self.nav.current().is_some_and(|s| s.is_loading())
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind: AlertKind::Error,
            message: message.into(),
        });
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind: AlertKind::Info,
            message: message.into(),
        });
    }

    /// Localized alert text for a failed request.
    pub fn api_error_text(&self, error: &ApiError) -> String {
        let s = self.language.strings();
        match error {
            ApiError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Network(_) => s.network_error.to_string(),
            _ => s.unexpected_error.to_string(),
        }
    }

    /// Localized alert text for a rejected form.
    pub fn form_error_text(&self, error: &FormError) -> String {
        let s = self.language.strings();
        match error {
            FormError::Missing(field) => fill(s.required_field, "field", self.language.field(*field)),
            FormError::PasswordMismatch => s.password_mismatch.to_string(),
            FormError::PasswordTooShort(min) => fill(s.password_too_short, "min", &min.to_string()),
            FormError::MissingToken => s.missing_token.to_string(),
        }
    }
}
