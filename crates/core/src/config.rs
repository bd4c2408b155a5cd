use std::env;
use std::path::PathBuf;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_i32(profile: &str, key: &str, default: i32) -> i32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_i64(profile: &str, key: &str, default: i64) -> i64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub user: UserConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FIXITUP_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("FIXITUP_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            storage: StorageConfig::from_env_profiled(p),
            schedule: ScheduleConfig::from_env_profiled(p),
            user: UserConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  storage:   data_dir={}", self.storage.data_dir.display());
        tracing::info!(
            "  schedule:  utc_offset_minutes={}, due_soon_days={}",
            self.schedule.utc_offset_minutes,
            self.schedule.due_soon_days
        );
        tracing::info!(
            "  user:      username={}",
            self.user.username.as_deref().unwrap_or("(generated)")
        );
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            data_dir: PathBuf::from(profiled_env_or(p, "FIXITUP_DATA_DIR", "data")),
        }
    }
}

// ── Schedule ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Offset of the user's local calendar from UTC, in minutes.
    /// Date-only comparisons ("today") happen in this calendar.
    pub utc_offset_minutes: i32,
    /// Tasks due within this many days are reported as due soon.
    pub due_soon_days: i64,
}

impl ScheduleConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            utc_offset_minutes: profiled_env_i32(p, "FIXITUP_UTC_OFFSET_MINUTES", 0),
            due_soon_days: profiled_env_i64(p, "FIXITUP_DUE_SOON_DAYS", 7),
        }
    }

    /// The configured offset as a chrono [`FixedOffset`].
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            CoreError::Config(format!(
                "utc offset out of range: {} minutes",
                self.utc_offset_minutes
            ))
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            due_soon_days: 7,
        }
    }
}

// ── User ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Username for newly created profiles; generated when absent.
    pub username: Option<String>,
}

impl UserConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            username: profiled_env_opt(p, "FIXITUP_USERNAME"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_offset_in_range() {
        let cfg = ScheduleConfig {
            utc_offset_minutes: -300,
            due_soon_days: 7,
        };
        assert_eq!(cfg.utc_offset().unwrap().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn utc_offset_out_of_range_is_config_error() {
        let cfg = ScheduleConfig {
            utc_offset_minutes: 24 * 60,
            due_soon_days: 7,
        };
        assert!(matches!(cfg.utc_offset(), Err(CoreError::Config(_))));
    }

    #[test]
    fn profile_label_defaults() {
        let cfg = Config {
            profile: String::new(),
            storage: StorageConfig { data_dir: PathBuf::from("data") },
            schedule: ScheduleConfig::default(),
            user: UserConfig::default(),
        };
        assert_eq!(cfg.profile_label(), "default");
    }
}
