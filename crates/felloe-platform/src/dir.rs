use std::path::PathBuf;

pub fn user_home() -> Option<PathBuf> { home::home_dir() }

/// Per-user data directory (`XDG_DATA_HOME`, `~/Library/Application Support`
/// or `%LOCALAPPDATA%`).
pub fn user_data() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        std::env::var_os("XDG_DATA_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".local/share")))
    }
}
