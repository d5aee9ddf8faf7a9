use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tmenu";
const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Base directories the resolver reads from.
#[derive(Clone, Debug, Default)]
pub struct SearchPaths {
    /// `$XDG_CONFIG_HOME/tmenu`
    pub config_dir: Option<PathBuf>,
    /// `$XDG_DATA_HOME/tmenu`
    pub data_dir: Option<PathBuf>,
    /// `$XDG_DATA_DIRS/*/tmenu`
    pub system_data_dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn from_env() -> Self {
        let data_dirs = env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());
        Self {
            config_dir: dirs::config_dir().map(|d| d.join(APP_DIR)),
            data_dir: dirs::data_dir().map(|d| d.join(APP_DIR)),
            system_data_dirs: env::split_paths(&data_dirs)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.join(APP_DIR))
                .collect(),
        }
    }

    /// Rooted in a single directory, with no system directories.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            config_dir: Some(root.join("config").join(APP_DIR)),
            data_dir: Some(root.join("data").join(APP_DIR)),
            system_data_dirs: Vec::new(),
        }
    }

    pub fn default_config_file(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|d| d.join("config.toml"))
    }

    /// On-disk candidates for a theme, strongest first.
    pub fn theme_candidates(&self, name: &str) -> Vec<PathBuf> {
        let file = format!("{name}.toml");
        self.config_dir
            .iter()
            .chain(self.data_dir.iter())
            .chain(self.system_data_dirs.iter())
            .map(|dir| dir.join("themes").join(&file))
            .collect()
    }

    pub fn font_file(&self, name: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|d| d.join("fonts").join(format!("{name}.flf")))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
