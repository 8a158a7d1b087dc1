//! Application configuration
//!
//! Values are fixed at build time through environment variables read with
//! `option_env!`, falling back to defaults derived from the browser location.

use once_cell::sync::Lazy;

/// Overrides the backend origin, e.g. `https://pos.example.com`
const API_BASE_ENV: Option<&str> = option_env!("POS_ADMIN_API_BASE");
/// `error` | `warn` | `info` | `debug` | `trace`
const LOG_LEVEL_ENV: Option<&str> = option_env!("POS_ADMIN_LOG_LEVEL");

pub const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4000;
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Port the backend listens on when no explicit base is configured
pub const DEFAULT_API_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub log_level: log::Level,
    pub toast_timeout_ms: u32,
    pub page_size: usize,
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

impl AppConfig {
    /// Process-wide configuration, resolved on first access
    pub fn get() -> &'static AppConfig {
        &CONFIG
    }

    fn from_env() -> Self {
        let api_base = API_BASE_ENV
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(window_api_base);

        Self {
            api_base,
            log_level: parse_log_level(LOG_LEVEL_ENV).unwrap_or_else(default_log_level),
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

pub fn parse_log_level(raw: Option<&str>) -> Option<log::Level> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "error" => Some(log::Level::Error),
        "warn" | "warning" => Some(log::Level::Warn),
        "info" => Some(log::Level::Info),
        "debug" => Some(log::Level::Debug),
        "trace" => Some(log::Level::Trace),
        _ => None,
    }
}

/// Backend origin derived from the page location, always on [`DEFAULT_API_PORT`]
fn window_api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}
