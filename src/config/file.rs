use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{RawCatalog, RawSubmenus};
use crate::config::ConfigError;
use crate::config::color::ColorValue;

/// One parsed config, theme or menu-extension file. Every section is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub colors: ColorSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub menu: toml::Table,
    #[serde(default)]
    pub submenu: BTreeMap<String, toml::Table>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ColorSection {
    pub foreground: Option<ColorValue>,
    pub background: Option<ColorValue>,
    pub selection_foreground: Option<ColorValue>,
    pub selection_background: Option<ColorValue>,
    pub prompt_foreground: Option<ColorValue>,
}

/// `[display]` with every field coerced on its own. A value that cannot be
/// coerced is logged and left unset; it never fails the file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "toml::Table")]
pub struct DisplaySection {
    pub centered: Option<bool>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub title: Option<String>,
    pub figlet: Option<bool>,
    pub figlet_font: Option<String>,
    pub theme: Option<String>,
    pub theme_dir: Option<String>,
    pub sort_items: Option<bool>,
}

impl From<toml::Table> for DisplaySection {
    fn from(table: toml::Table) -> Self {
        let field = |key: &'static str| table.get(key).map(|value| (key, value));
        Self {
            centered: field("centered").and_then(coerce_bool),
            width: field("width").and_then(coerce_u16),
            height: field("height").and_then(coerce_u16),
            title: field("title").and_then(coerce_string),
            figlet: field("figlet").and_then(coerce_bool),
            figlet_font: field("figlet_font").and_then(coerce_string),
            theme: field("theme").and_then(coerce_string),
            theme_dir: field("theme_dir").and_then(coerce_string),
            sort_items: field("sort_items").and_then(coerce_bool),
        }
    }
}

fn skipped<T>(key: &str, value: &toml::Value) -> Option<T> {
    log::warn!("ignoring display.{key} = {value}: wrong type");
    None
}

fn coerce_string((key, value): (&str, &toml::Value)) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(n) => Some(n.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        other => skipped(key, other),
    }
}

/// Floats truncate toward zero; numeric strings are parsed.
fn coerce_u16((key, value): (&str, &toml::Value)) -> Option<u16> {
    let n = match value {
        toml::Value::Integer(n) => Some(*n),
        toml::Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        toml::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match n.and_then(|n| u16::try_from(n).ok()) {
        Some(n) => Some(n),
        None => skipped(key, value),
    }
}

/// Booleans, integers (non-zero is true) and the usual yes/no spellings.
fn coerce_bool((key, value): (&str, &toml::Value)) -> Option<bool> {
    let b = match value {
        toml::Value::Boolean(b) => Some(*b),
        toml::Value::Integer(n) => Some(*n != 0),
        toml::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    match b {
        Some(b) => Some(b),
        None => skipped(key, value),
    }
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The `[menu]` section. Non-string values are skipped.
    pub fn menu_items(&self) -> RawCatalog {
        table_to_catalog(&self.menu)
    }

    /// Every `[submenu.<name>]` section.
    pub fn submenus(&self) -> RawSubmenus {
        self.submenu
            .iter()
            .map(|(name, table)| (name.clone(), table_to_catalog(table)))
            .collect()
    }
}

fn table_to_catalog(table: &toml::Table) -> RawCatalog {
    let mut catalog = RawCatalog::new();
    for (label, value) in table {
        match value {
            toml::Value::String(command) => catalog.insert(label.as_str(), command.as_str()),
            other => log::debug!("skipping menu entry {label:?}: not a string ({other})"),
        }
    }
    catalog
}
