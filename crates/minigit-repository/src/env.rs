use std::path::PathBuf;

/// Environment variable overrides for repository operations.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    /// MINIGIT_DIR: the metadata directory to use instead of discovering one.
    pub git_dir: Option<PathBuf>,
    /// MINIGIT_AUTHOR_NAME
    pub author_name: Option<String>,
    /// MINIGIT_AUTHOR_EMAIL
    pub author_email: Option<String>,
}

impl EnvOverrides {
    /// Read the minigit environment variables. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            git_dir: std::env::var_os("MINIGIT_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            author_name: non_empty_var("MINIGIT_AUTHOR_NAME"),
            author_email: non_empty_var("MINIGIT_AUTHOR_EMAIL"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
