use std::path::PathBuf;

const APP_DIR: &str = "lumina";

/// Directory for logs and other runtime artefacts.
pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/lumina/ (XDG layout) rather than
    // Application Support so every unix looks the same.
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(temp_dir)
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// Directory holding `config.toml` and the optional `layout.toml`.
pub fn config_dir() -> PathBuf {
    // A config.toml beside the executable wins (portable installs).
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if exe_dir.join("config.toml").exists() {
                return exe_dir.to_path_buf();
            }
        }
    }

    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

pub fn log_path() -> PathBuf {
    data_dir().join("lumina.log")
}

pub fn layout_path() -> PathBuf {
    config_dir().join("layout.toml")
}
