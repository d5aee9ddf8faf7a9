use rust_embed::Embed;

use crate::config::file::{ColorSection, ConfigFile};
use crate::config::paths::SearchPaths;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

/// A named bundle of colours, weaker than the user's own `[colors]`.
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub colors: ColorSection,
}

impl Theme {
    /// Search the user, data and system theme directories, then the bundled themes.
    /// The first file that exists and parses wins.
    pub fn load(name: &str, paths: &SearchPaths) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        for path in paths.theme_candidates(name) {
            if !path.is_file() {
                continue;
            }
            match ConfigFile::load(&path) {
                Ok(file) => {
                    log::info!("using theme {name:?} from {}", path.display());
                    return Some(Self::from_file(name, file));
                }
                Err(err) => log::warn!("{err}"),
            }
        }

        let filename = format!("{name}.toml");
        let bundled = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(bundled.data.as_ref()).ok()?;
        match ConfigFile::parse(content) {
            Ok(file) => {
                log::info!("using bundled theme {name:?}");
                Some(Self::from_file(name, file))
            }
            Err(err) => {
                log::warn!("bundled theme {name:?} is malformed: {err}");
                None
            }
        }
    }

    pub fn bundled_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }

    fn from_file(name: &str, file: ConfigFile) -> Self {
        Self {
            name: name.to_string(),
            colors: file.colors,
        }
    }
}
