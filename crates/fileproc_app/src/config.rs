//! Environment-driven configuration for the console.
//!
//! Everything has a localhost default so a dev setup runs with no
//! environment at all; the bearer token and client id come from the identity
//! exchange and are consumed here as opaque values.

use crate::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub ws_url: String,
    pub token: Option<String>,
    pub client_id: Option<String>,
    pub log_destination: LogDestination,
}

pub fn from_env() -> AppConfig {
    from_lookup(|name| std::env::var(name).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let base_url = lookup("FILEPROC_BASE_URL")
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let ws_url = lookup("FILEPROC_WS_URL")
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| derive_ws_url(&base_url));

    AppConfig {
        base_url,
        ws_url,
        token: lookup("FILEPROC_TOKEN").filter(|value| !value.is_empty()),
        client_id: lookup("FILEPROC_CLIENT_ID").filter(|value| !value.is_empty()),
        log_destination: match lookup("FILEPROC_LOG").as_deref() {
            Some("term") => LogDestination::Terminal,
            Some("both") => LogDestination::Both,
            _ => LogDestination::File,
        },
    }
}

/// `http(s)://host -> ws(s)://host/api/v1/ws`.
fn derive_ws_url(base_url: &str) -> String {
    let origin = base_url.trim_end_matches('/');
    let origin = origin
        .strip_prefix("https://")
        .map(|rest| format!("wss://{rest}"))
        .or_else(|| {
            origin
                .strip_prefix("http://")
                .map(|rest| format!("ws://{rest}"))
        })
        .unwrap_or_else(|| origin.to_string());
    format!("{origin}/api/v1/ws")
}
