use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

const DEFAULT_CONFIG_FILE: &str = "spool_picker.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: Option<String>,
    pub redirect_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: None,
            redirect_delay_ms: 3000,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Defaults, then the TOML file, then environment variables.
///
/// A missing file is only an error when the path was given explicitly.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if config_path.is_none() && err.kind() == std::io::ErrorKind::NotFound => {
            Settings::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SPOOL_SERVER_URL") {
        settings.server_url = Some(v);
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = Some(v);
    }

    if let Some(v) = lookup("APP__REDIRECT_DELAY_MS") {
        match v.parse() {
            Ok(parsed) => settings.redirect_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__REDIRECT_DELAY_MS"),
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}

/// Command line beats configuration, which beats the origin of a scanned
/// tag URL.
pub fn resolve_server_url(
    cli_value: Option<&str>,
    settings: &Settings,
    scanned_origin: Option<&Url>,
) -> anyhow::Result<Url> {
    let configured = cli_value
        .or(settings.server_url.as_deref())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match (configured, scanned_origin) {
        (Some(raw), _) => {
            Url::parse(raw).with_context(|| format!("invalid server url '{raw}'"))
        }
        (None, Some(origin)) => Ok(origin.clone()),
        (None, None) => bail!(
            "no server url configured; pass --server-url, set SPOOL_SERVER_URL or scan a tag URL"
        ),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
