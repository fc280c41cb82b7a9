//! Path utilities for ptypool
//!
//! Handles XDG Base Directory specification compliance for config,
//! state, and log directories.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Application identifier for XDG directories
const APP_NAME: &str = "ptypool";

/// Get project directories
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the runtime directory
///
/// Location: `$XDG_RUNTIME_DIR/ptypool` or `/tmp/ptypool-$UID`
pub fn runtime_dir() -> PathBuf {
    if let Ok(xdg_runtime) = std::env::var("XDG_RUNTIME_DIR") {
        PathBuf::from(xdg_runtime).join(APP_NAME)
    } else {
        // Fallback to /tmp with UID for security
        // SAFETY: getuid() is always safe to call
        let uid = unsafe { libc::getuid() };
        PathBuf::from(format!("/tmp/{}-{}", APP_NAME, uid))
    }
}

/// Get the configuration directory
///
/// Location: `$XDG_CONFIG_HOME/ptypool` or `~/.config/ptypool`
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(fallback_config_dir)
}

/// Get the main configuration file path
///
/// Location: `$XDG_CONFIG_HOME/ptypool/config.toml`
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the state directory
///
/// Location: `$XDG_STATE_HOME/ptypool` or `~/.local/state/ptypool`
pub fn state_dir() -> PathBuf {
    project_dirs()
        .and_then(|p| p.state_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(fallback_state_dir)
}

/// Get the log directory
///
/// Location: `$XDG_STATE_HOME/ptypool/log` or `~/.local/state/ptypool/log`
pub fn log_dir() -> PathBuf {
    state_dir().join("log")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

// Fallback implementations when ProjectDirs is unavailable

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

fn fallback_config_dir() -> PathBuf {
    home_dir().join(".config").join(APP_NAME)
}

fn fallback_state_dir() -> PathBuf {
    home_dir().join(".local").join("state").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // ==================== Runtime Dir Tests ====================

    #[test]
    fn test_runtime_dir_contains_app_name() {
        let path = runtime_dir();
        assert!(path.to_string_lossy().contains("ptypool"));
    }

    #[test]
    fn test_runtime_dir_with_xdg_set() {
        let original = env::var("XDG_RUNTIME_DIR").ok();

        env::set_var("XDG_RUNTIME_DIR", "/run/user/1000");
        let path = runtime_dir();
        assert_eq!(path, PathBuf::from("/run/user/1000/ptypool"));

        match original {
            Some(val) => env::set_var("XDG_RUNTIME_DIR", val),
            None => env::remove_var("XDG_RUNTIME_DIR"),
        }
    }

    // ==================== Config Path Tests ====================

    #[test]
    fn test_config_file_name() {
        let path = config_file();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "config.toml");
    }

    #[test]
    fn test_config_file_in_config_dir() {
        let file = config_file();
        let dir = config_dir();
        assert!(file.starts_with(&dir));
    }

    // ==================== Log Dir Tests ====================

    #[test]
    fn test_log_dir_under_state_dir() {
        let log = log_dir();
        let state = state_dir();
        assert!(log.starts_with(&state));
        assert_eq!(log.file_name().unwrap().to_str().unwrap(), "log");
    }

    // ==================== Ensure Dir Tests ====================

    #[test]
    fn test_ensure_dir_creates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
