//! # Core Application Logic
//!
//! This module contains orgdesk's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Command (requests)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │   Command    │    API     │
//!           │  Adapter   │ ───────────▶ │  (reqwest) │
//!           │ (ratatui)  │ ◀─────────── │            │
//!           └────────────┘    Action    └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`command`]: Requests the reducer hands to the adapter
//! - [`nav`] / [`screen`]: Tab sets, screen stacks and the generic screens
//! - [`entity`] / [`form`]: Backend record kinds, fields and form state
//! - [`role`]: Role → tab set lookup
//! - [`i18n`]: Turkish and English string tables
//! - [`session`]: Access token lifecycle and persistence
//! - [`deep_link`]: Activation and reset links
//! - [`config`]: Layered configuration

pub mod action;
pub mod command;
pub mod config;
pub mod deep_link;
pub mod entity;
pub mod form;
pub mod i18n;
pub mod nav;
pub mod role;
pub mod screen;
pub mod session;
pub mod state;
