//! Tracing helpers and the raw terminal write log.
//!
//! The library only emits `tracing` events; installing a subscriber is left to the
//! binary (see `demos/dashboard.rs`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::config::EnvConfig;

static ENV_CONFIG: Lazy<EnvConfig> = Lazy::new(EnvConfig::from_env);

/// Process-wide configuration, read from the environment on first use.
pub fn env_config() -> &'static EnvConfig {
    &ENV_CONFIG
}

/// Whether per-tick tracing is enabled (`CONSOLE_DOC_DEBUG=1`).
pub fn verbose_ticks() -> bool {
    ENV_CONFIG.debug
}

/// Append-only capture of every byte written to a terminal.
///
/// The first failed append disables the log for the rest of its lifetime.
#[derive(Debug, Default)]
pub struct WriteLog {
    path: Option<PathBuf>,
    failed: bool,
}

impl WriteLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            failed: false,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ENV_CONFIG.write_log.as_ref().map(PathBuf::from))
    }

    pub fn is_active(&self) -> bool {
        self.path.is_some() && !self.failed
    }

    pub fn append(&mut self, data: &str) {
        if self.failed || data.is_empty() {
            return;
        }
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(data.as_bytes()));
        if let Err(err) = result {
            tracing::debug!(path = %path.display(), error = %err, "disabling terminal write log");
            self.failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WriteLog;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("console_doc_{}_{name}", std::process::id()));
        path
    }

    #[test]
    fn appends_every_write() {
        let path = scratch_path("write_log_appends");
        let _ = fs::remove_file(&path);

        let mut log = WriteLog::new(Some(path.clone()));
        log.append("\x1b[?25l");
        log.append("row");
        assert!(log.is_active());

        let captured = fs::read_to_string(&path).expect("read write log");
        assert_eq!(captured, "\x1b[?25lrow");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn failure_disables_log() {
        let mut path = scratch_path("missing_dir");
        path.push("nested");
        path.push("log.txt");

        let mut log = WriteLog::new(Some(path));
        log.append("x");
        assert!(!log.is_active());
        log.append("y");
    }

    #[test]
    fn no_path_is_inactive() {
        let mut log = WriteLog::default();
        log.append("ignored");
        assert!(!log.is_active());
    }
}
