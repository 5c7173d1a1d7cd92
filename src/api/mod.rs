//! # Backend API
//!
//! - [`client`]: reqwest wrapper with bearer auth and error mapping
//! - [`types`]: serde shapes of backend records
//! - [`resource`]: generic list fetching and scope filters
//! - [`dispatch`]: runs core `Command`s and reports result `Action`s

pub mod client;
pub mod dispatch;
pub mod resource;
pub mod types;
