use std::path::PathBuf;
use std::time::Duration;

use portal_core::config::{env_or, env_string_or};

/// Portal configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Directory holding one file per storage slot. Env var: `PORTAL_DATA_DIR`.
    pub data_dir: PathBuf,
    /// Byte quota for a single slot (default 5 MiB, like browser local storage).
    /// Env var: `PORTAL_STORAGE_QUOTA`.
    pub storage_quota: usize,
    /// How long a toast stays visible (default 3000 ms). Env var: `PORTAL_TOAST_VISIBLE_MS`.
    pub toast_visible: Duration,
    /// Fade-out before a toast is removed (default 150 ms). Env var: `PORTAL_TOAST_FADE_MS`.
    pub toast_fade: Duration,
}

pub const DEFAULT_STORAGE_QUOTA: usize = 5 * 1024 * 1024;
pub const DEFAULT_TOAST_VISIBLE_MS: u64 = 3000;
pub const DEFAULT_TOAST_FADE_MS: u64 = 150;

impl PortalConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(env_string_or("PORTAL_DATA_DIR", "portal-data")),
            storage_quota: env_or("PORTAL_STORAGE_QUOTA", DEFAULT_STORAGE_QUOTA),
            toast_visible: Duration::from_millis(env_or(
                "PORTAL_TOAST_VISIBLE_MS",
                DEFAULT_TOAST_VISIBLE_MS,
            )),
            toast_fade: Duration::from_millis(env_or("PORTAL_TOAST_FADE_MS", DEFAULT_TOAST_FADE_MS)),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("portal-data"),
            storage_quota: DEFAULT_STORAGE_QUOTA,
            toast_visible: Duration::from_millis(DEFAULT_TOAST_VISIBLE_MS),
            toast_fade: Duration::from_millis(DEFAULT_TOAST_FADE_MS),
        }
    }
}
