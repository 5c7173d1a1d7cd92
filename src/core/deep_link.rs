//! # Deep Links
//!
//! Links from activation and password-reset emails, e.g.
//! `orgdesk://reset-password?token=abc` or
//! `http://localhost:5173/activate?token=abc`.
//!
//! Only configured prefixes are accepted. Everything after the prefix is
//! parsed as a relative URL so query decoding follows the usual rules.

use log::warn;
use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Login,
    Activate { token: Option<String> },
    ResetPassword { token: Option<String> },
}

pub const DEFAULT_PREFIXES: [&str; 2] = ["orgdesk://", "http://localhost:5173"];

/// Parses `link` against `prefixes`. Unknown prefixes or paths yield `None`.
pub fn parse(link: &str, prefixes: &[String]) -> Option<DeepLink> {
    let link = link.trim();
    let rest = prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| link.strip_prefix(prefix.as_str()))?;

    let url = match Url::parse(&format!("http://link/{}", rest.trim_start_matches('/'))) {
        Ok(url) => url,
        Err(e) => {
            warn!("Malformed deep link: {}", e);
            return None;
        }
    };

    let token = url
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty());

    match url.path().trim_matches('/') {
        "login" => Some(DeepLink::Login),
        "activate" => Some(DeepLink::Activate { token }),
        "reset-password" => Some(DeepLink::ResetPassword { token }),
        other => {
            warn!("Unknown deep link path: {}", other);
            None
        }
    }
}
