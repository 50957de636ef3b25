use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::warn;

use crate::types::EXPORT_FILENAME;

pub const CONFIG_FILE: &str = "lecturelm.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub export_filename: String,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            request_timeout_secs: 120,
            export_filename: EXPORT_FILENAME.into(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    export_filename: Option<String>,
    output_dir: Option<PathBuf>,
}

/// Defaults, then `lecturelm.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
                if let Some(v) = file_cfg.export_filename {
                    settings.export_filename = v;
                }
                if let Some(v) = file_cfg.output_dir {
                    settings.output_dir = v;
                }
            }
            Err(err) => warn!("ignoring malformed {}: {err}", path.display()),
        }
    }

    if let Some(v) = non_empty(env("LECTURELM_API_URL")) {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty(env("APP__API_BASE_URL")) {
        settings.api_base_url = v;
    }

    if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v}: {err}"),
        }
    }

    if let Some(v) = non_empty(env("APP__EXPORT_FILENAME")) {
        settings.export_filename = v;
    }
    if let Some(v) = non_empty(env("APP__OUTPUT_DIR")) {
        settings.output_dir = PathBuf::from(v);
    }

    settings
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
