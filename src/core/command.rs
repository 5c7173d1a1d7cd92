//! # Commands
//!
//! Requests the reducer wants performed. `update()` never does I/O; it
//! returns `Effect::Dispatch(commands)` and the adapter runs each one on a
//! background task. Every command that belongs to a screen carries that
//! screen's key so its result can find its way back.

use serde_json::Value;

use crate::core::entity::{EntityKind, Field, Scope};
use crate::core::screen::ScreenKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `POST /api/auth/login`; the token is stored before the result is sent.
    Login { target: ScreenKey, payload: Value },
    /// `GET /api/user/get-self` after login or a restored token.
    FetchSelf,
    /// Drops the token from memory and from disk.
    EndSession,
    Activate { target: ScreenKey, payload: Value },
    ResendActivation { target: ScreenKey, payload: Value },
    ForgotPassword { target: ScreenKey, payload: Value },
    ResetPassword { target: ScreenKey, payload: Value },
    ChangePassword { target: ScreenKey, payload: Value },
    UpdateProfile { target: ScreenKey, payload: Value },

    FetchList {
        target: ScreenKey,
        kind: EntityKind,
        scope: Scope,
        seq: u64,
    },
    FetchRecord { target: ScreenKey, kind: EntityKind, id: i64 },
    FetchChoices { target: ScreenKey, field: Field, kind: EntityKind },
    /// Create when `id` is `None`, update otherwise.
    Save {
        target: ScreenKey,
        kind: EntityKind,
        id: Option<i64>,
        payload: Value,
    },
    Delete { target: ScreenKey, kind: EntityKind, id: i64 },

    FetchProfile { target: ScreenKey },
    FetchCompanyInfo { target: ScreenKey, company_id: i64 },
}

impl Command {
    /// Short name for logs. Payloads may hold passwords and are never logged.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::FetchSelf => "fetch-self",
            Command::EndSession => "end-session",
            Command::Activate { .. } => "activate",
            Command::ResendActivation { .. } => "resend-activation",
            Command::ForgotPassword { .. } => "forgot-password",
            Command::ResetPassword { .. } => "reset-password",
            Command::ChangePassword { .. } => "change-password",
            Command::UpdateProfile { .. } => "update-profile",
            Command::FetchList { .. } => "fetch-list",
            Command::FetchRecord { .. } => "fetch-record",
            Command::FetchChoices { .. } => "fetch-choices",
            Command::Save { .. } => "save",
            Command::Delete { .. } => "delete",
            Command::FetchProfile { .. } => "fetch-profile",
            Command::FetchCompanyInfo { .. } => "fetch-company-info",
        }
    }
}
