//! # Command execution
//!
//! Turns a `Command` from the reducer into HTTP calls and wraps the outcome
//! in the result `Action` the reducer expects. The TUI runs each command on
//! its own task; tests swap in a `Backend` that never touches the network.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Method;
use serde_json::Value;

use crate::api::client::{ApiClient, ApiError};
use crate::api::resource::{fetch_own_company, fetch_record, fetch_records, fetch_scoped, fetch_self};
use crate::api::types::LoginResponse;
use crate::core::action::Action;
use crate::core::command::Command;
use crate::core::entity::EntityKind;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ACTIVATE_PATH: &str = "/api/auth/activate-with-password";
pub const RESEND_ACTIVATION_PATH: &str = "/api/auth/resend-activation";
pub const FORGOT_PASSWORD_PATH: &str = "/api/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/api/auth/reset-password";
pub const CHANGE_PASSWORD_PATH: &str = "/api/auth/change-password";

#[async_trait]
pub trait Backend: Send + Sync {
    /// Runs one command. `None` when the command has no result to report.
    async fn execute(&self, command: Command) -> Option<Action>;
}

pub struct HttpBackend {
    client: ApiClient,
}

impl HttpBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn login(&self, payload: &Value) -> Result<(), ApiError> {
        let response: LoginResponse = self.client.post(LOGIN_PATH, payload).await?;
        self.client.session().begin(response.access_token);
        Ok(())
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<(), ApiError> {
        self.client.send_json(Method::POST, path, payload).await
    }

    async fn save(&self, kind: EntityKind, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        let endpoints = kind.endpoints();
        match id {
            None => self.client.send_json(Method::POST, endpoints.create, payload).await,
            Some(id) => {
                self.client
                    .send_json(Method::PUT, &endpoints.update_path(id), payload)
                    .await
            }
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn execute(&self, command: Command) -> Option<Action> {
        debug!("Executing {}", command.name());
        let action = match command {
            Command::Login { target, payload } => Action::LoggedIn {
                target,
                result: self.login(&payload).await,
            },
            Command::FetchSelf => {
                Action::SessionResolved(fetch_self(&self.client).await.map(|u| u.to_profile()))
            }
            Command::EndSession => {
                info!("Ending session");
                self.client.session().end();
                return None;
            }
            Command::Activate { target, payload } => Action::Submitted {
                target,
                result: self.post(ACTIVATE_PATH, &payload).await,
            },
            Command::ResendActivation { target, payload } => Action::Submitted {
                target,
                result: self.post(RESEND_ACTIVATION_PATH, &payload).await,
            },
            Command::ForgotPassword { target, payload } => Action::Submitted {
                target,
                result: self.post(FORGOT_PASSWORD_PATH, &payload).await,
            },
            Command::ResetPassword { target, payload } => Action::Submitted {
                target,
                result: self.post(RESET_PASSWORD_PATH, &payload).await,
            },
            Command::ChangePassword { target, payload } => Action::Submitted {
                target,
                result: self.post(CHANGE_PASSWORD_PATH, &payload).await,
            },
            Command::UpdateProfile { target, payload } => Action::Submitted {
                target,
                result: self
                    .client
                    .send_json(Method::PUT, EntityKind::User.endpoints().update, &payload)
                    .await,
            },
            Command::FetchList {
                target,
                kind,
                scope,
                seq,
            } => Action::ListLoaded {
                target,
                seq,
                result: fetch_scoped(&self.client, kind, scope).await,
            },
            Command::FetchRecord { target, kind, id } => Action::RecordLoaded {
                target,
                result: fetch_record(&self.client, kind, id).await,
            },
            Command::FetchChoices {
                target,
                field,
                kind,
            } => Action::ChoicesLoaded {
                target,
                field,
                result: fetch_records(&self.client, kind)
                    .await
                    .map(|records| records.iter().map(|r| r.as_choice()).collect()),
            },
            Command::Save {
                target,
                kind,
                id,
                payload,
            } => Action::Submitted {
                target,
                result: self.save(kind, id, &payload).await,
            },
            Command::Delete { target, kind, id } => Action::Deleted {
                target,
                id,
                result: self.client.delete(&kind.endpoints().delete_path(id)).await,
            },
            Command::FetchProfile { target } => Action::ProfileLoaded {
                target,
                result: fetch_self(&self.client).await.map(|u| u.to_profile()),
            },
            Command::FetchCompanyInfo { target, company_id } => Action::CompanyInfoLoaded {
                target,
                result: fetch_own_company(&self.client, company_id)
                    .await
                    .map(|c| c.to_info_record()),
            },
        };
        Some(action)
    }
}
