//! Environment configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_REFRESH_MS: u64 = 100;
pub const MIN_REFRESH_MS: u64 = 10;
pub const MAX_REFRESH_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub refresh_ms: u64,
    pub write_log: Option<String>,
    pub debug: bool,
    pub legacy_color: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            refresh_ms: env_refresh_ms("CONSOLE_DOC_REFRESH_MS"),
            write_log: env_string_opt("CONSOLE_DOC_WRITE_LOG"),
            debug: env_flag("CONSOLE_DOC_DEBUG"),
            legacy_color: env_string_opt("NO_COLOR").is_some()
                || env_flag("CONSOLE_DOC_LEGACY_COLOR"),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_REFRESH_MS,
            write_log: None,
            debug: false,
            legacy_color: false,
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_refresh_ms(key: &str) -> u64 {
    env_string_opt(key)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(|ms| ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS))
        .unwrap_or(DEFAULT_REFRESH_MS)
}

#[cfg(test)]
mod tests {
    use super::{EnvConfig, DEFAULT_REFRESH_MS, MAX_REFRESH_MS, MIN_REFRESH_MS};
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CONSOLE_DOC_REFRESH_MS", None);
        let _g2 = set_env_guard("CONSOLE_DOC_WRITE_LOG", None);
        let _g3 = set_env_guard("CONSOLE_DOC_DEBUG", None);
        let _g4 = set_env_guard("NO_COLOR", None);
        let _g5 = set_env_guard("CONSOLE_DOC_LEGACY_COLOR", None);

        let config = EnvConfig::from_env();
        assert_eq!(config.refresh_ms, DEFAULT_REFRESH_MS);
        assert!(config.write_log.is_none());
        assert!(!config.debug);
        assert!(!config.legacy_color);
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CONSOLE_DOC_WRITE_LOG", Some("/tmp/console_doc.log"));
        let _g2 = set_env_guard("CONSOLE_DOC_DEBUG", Some("1"));
        let _g3 = set_env_guard("NO_COLOR", None);
        let _g4 = set_env_guard("CONSOLE_DOC_LEGACY_COLOR", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.write_log.as_deref(), Some("/tmp/console_doc.log"));
        assert!(config.debug);
        assert!(config.legacy_color);
    }

    #[test]
    fn flags_other_than_one_are_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CONSOLE_DOC_DEBUG", Some("true"));
        let _g2 = set_env_guard("CONSOLE_DOC_LEGACY_COLOR", Some("yes"));
        let _g3 = set_env_guard("NO_COLOR", None);

        let config = EnvConfig::from_env();
        assert!(!config.debug);
        assert!(!config.legacy_color);
    }

    #[test]
    fn no_color_forces_legacy_encoder() {
        let _lock = env_lock();
        let _g1 = set_env_guard("NO_COLOR", Some("anything"));
        let _g2 = set_env_guard("CONSOLE_DOC_LEGACY_COLOR", None);
        assert!(EnvConfig::from_env().legacy_color);
    }

    #[test]
    fn refresh_interval_is_clamped_and_falls_back() {
        let _lock = env_lock();
        {
            let _g = set_env_guard("CONSOLE_DOC_REFRESH_MS", Some("1"));
            assert_eq!(EnvConfig::from_env().refresh_ms, MIN_REFRESH_MS);
        }
        {
            let _g = set_env_guard("CONSOLE_DOC_REFRESH_MS", Some("999999"));
            assert_eq!(EnvConfig::from_env().refresh_ms, MAX_REFRESH_MS);
        }
        {
            let _g = set_env_guard("CONSOLE_DOC_REFRESH_MS", Some("fast"));
            assert_eq!(EnvConfig::from_env().refresh_ms, DEFAULT_REFRESH_MS);
        }
        {
            let _g = set_env_guard("CONSOLE_DOC_REFRESH_MS", Some(" 250 "));
            assert_eq!(EnvConfig::from_env().refresh_ms, 250);
        }
    }

    #[test]
    fn empty_write_log_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CONSOLE_DOC_WRITE_LOG", Some("  "));
        let config = EnvConfig::from_env();
        assert!(config.write_log.is_none());
    }
}
