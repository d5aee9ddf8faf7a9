pub mod color;
pub mod file;
pub mod paths;
pub mod theme;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use thiserror::Error;

use crate::catalog::{ItemCatalog, RawCatalog, RawSubmenus, SubmenuTable, merge_submenus};
use color::TERMINAL_DEFAULT;
use file::{ColorSection, ConfigFile, DisplaySection};
use paths::{SearchPaths, expand_tilde};
use theme::Theme;

#[derive(Embed)]
#[folder = "assets/templates/"]
struct Templates;

const DEFAULT_CONFIG_TEMPLATE: &str = "config.default.toml";

/// Why a layer contributed nothing. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("default config template is not bundled")]
    MissingTemplate,
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Resolved scalar settings. Colours are xterm-256 indices, -1 for the terminal default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub foreground: i32,
    pub background: i32,
    pub selection_foreground: i32,
    pub selection_background: i32,
    pub prompt_foreground: i32,
    pub centered: bool,
    pub width: u16,
    pub height: u16,
    pub figlet: bool,
    pub figlet_font: String,
    pub title: String,
    pub theme: Option<String>,
    pub theme_dir: Option<String>,
    pub sort_items: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            foreground: 7,
            background: TERMINAL_DEFAULT,
            selection_foreground: 0,
            selection_background: 6,
            prompt_foreground: 4,
            centered: true,
            width: 60,
            height: 10,
            figlet: false,
            figlet_font: "standard".to_string(),
            title: String::new(),
            theme: None,
            theme_dir: None,
            sort_items: false,
        }
    }
}

impl RuntimeConfig {
    /// Overlay every colour present in `colors`.
    pub fn apply_colors(&mut self, colors: &ColorSection) {
        let slots = [
            (&mut self.foreground, &colors.foreground),
            (&mut self.background, &colors.background),
            (&mut self.selection_foreground, &colors.selection_foreground),
            (&mut self.selection_background, &colors.selection_background),
            (&mut self.prompt_foreground, &colors.prompt_foreground),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                *slot = value.resolve();
            }
        }
    }

    pub fn apply_display(&mut self, display: &DisplaySection) {
        if let Some(centered) = display.centered {
            self.centered = centered;
        }
        if let Some(width) = display.width {
            self.width = width;
        }
        if let Some(height) = display.height {
            self.height = height;
        }
        if let Some(title) = &display.title {
            self.title = title.clone();
        }
        if let Some(figlet) = display.figlet {
            self.figlet = figlet;
        }
        if let Some(font) = &display.figlet_font {
            self.figlet_font = font.clone();
        }
        if let Some(theme) = &display.theme {
            self.theme = Some(theme.clone());
        }
        if let Some(dir) = &display.theme_dir {
            self.theme_dir = Some(dir.clone());
        }
        if let Some(sort) = display.sort_items {
            self.sort_items = sort;
        }
    }
}

/// Everything the session needs, built once per run.
#[derive(Clone, Debug, Default)]
pub struct ResolvedMenu {
    pub config: RuntimeConfig,
    pub catalog: ItemCatalog,
    pub submenus: SubmenuTable,
    pub title: String,
}

pub struct ConfigResolver {
    paths: SearchPaths,
}

impl ConfigResolver {
    pub fn new(paths: SearchPaths) -> Self {
        Self { paths }
    }

    pub fn from_env() -> Self {
        Self::new(SearchPaths::from_env())
    }

    pub fn paths(&self) -> &SearchPaths {
        &self.paths
    }

    /// Cascade base config, theme and extension files. Never fails: each broken
    /// layer is logged and contributes nothing.
    pub fn resolve(&self, config_path: Option<&Path>) -> ResolvedMenu {
        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                if let Err(err) = self.ensure_default_config() {
                    log::debug!("default config not created: {err}");
                }
                self.paths.default_config_file().filter(|p| p.is_file())
            }
        };

        let base = config_path.and_then(|path| match ConfigFile::load(&path) {
            Ok(file) => {
                log::info!("loaded config {}", path.display());
                Some(file)
            }
            Err(err) => {
                log::warn!("{err}");
                None
            }
        });
        let base = base.unwrap_or_default();

        let mut config = RuntimeConfig::default();
        if let Some(theme) = base
            .display
            .theme
            .as_deref()
            .and_then(|name| Theme::load(name, &self.paths))
        {
            log::debug!("applying theme {:?}", theme.name);
            config.apply_colors(&theme.colors);
        }
        config.apply_colors(&base.colors);
        config.apply_display(&base.display);

        let mut menu = base.menu_items();
        let mut submenus = base.submenus();

        if let Some(dir) = config.theme_dir.as_deref() {
            let (extra_menu, extra_submenus) = load_menu_dir(&expand_tilde(dir));
            menu.merge(extra_menu);
            merge_submenus(&mut submenus, extra_submenus);
        }

        let title = config.title.clone();
        ResolvedMenu {
            catalog: menu.resolve(|name| submenus.contains_key(name)),
            submenus: SubmenuTable::from_raw(&submenus),
            config,
            title,
        }
    }

    /// Write the bundled template to the default location unless a config exists.
    pub fn ensure_default_config(&self) -> Result<Option<PathBuf>, ConfigError> {
        let Some(path) = self.paths.default_config_file() else {
            return Ok(None);
        };
        if path.exists() {
            return Ok(None);
        }
        let template = Templates::get(DEFAULT_CONFIG_TEMPLATE).ok_or(ConfigError::MissingTemplate)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, template.data.as_ref()).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("created default config at {}", path.display());
        Ok(Some(path))
    }
}

/// Read every `*.toml` in `dir`, sorted by filename. Unreadable entries are skipped.
pub fn load_menu_dir(dir: &Path) -> (RawCatalog, RawSubmenus) {
    let mut menu = RawCatalog::new();
    let mut submenus = RawSubmenus::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("menu directory {} unavailable: {err}", dir.display());
            return (menu, submenus);
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    for path in files {
        match ConfigFile::load(&path) {
            Ok(file) => {
                log::debug!("merging menu file {}", path.display());
                menu.merge(file.menu_items());
                merge_submenus(&mut submenus, file.submenus());
            }
            Err(err) => log::warn!("skipping menu file: {err}"),
        }
    }

    (menu, submenus)
}
