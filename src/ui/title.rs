use crate::config::RuntimeConfig;
use crate::config::paths::SearchPaths;

/// Expand a title into the lines drawn above the menu. Empty title, no lines.
pub fn title_lines(title: &str, config: &RuntimeConfig, paths: &SearchPaths) -> Vec<String> {
    if title.is_empty() {
        return Vec::new();
    }
    if config.figlet {
        if let Some(lines) = figlet::render(title, &config.figlet_font, paths) {
            return lines;
        }
    }
    vec![title.to_string()]
}

#[cfg(feature = "figlet")]
mod figlet {
    use std::path::Path;

    use figlet_rs::FIGfont;

    use crate::config::paths::SearchPaths;

    fn load_font(name: &str, paths: &SearchPaths) -> Option<FIGfont> {
        if name == "standard" {
            return FIGfont::standard().ok();
        }
        let candidates = std::iter::once(Path::new(name).to_path_buf()).chain(paths.font_file(name));
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match FIGfont::from_file(&path.to_string_lossy()) {
                Ok(font) => return Some(font),
                Err(err) => log::warn!("figlet font {} unusable: {err}", path.display()),
            }
        }
        log::debug!("figlet font {name:?} not found");
        None
    }

    pub fn render(title: &str, font: &str, paths: &SearchPaths) -> Option<Vec<String>> {
        let font = load_font(font, paths)?;
        let figure = font.convert(title)?;
        let text = figure.to_string();
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return None;
        }
        Some(lines)
    }
}

#[cfg(not(feature = "figlet"))]
mod figlet {
    use crate::config::paths::SearchPaths;

    pub fn render(_title: &str, _font: &str, _paths: &SearchPaths) -> Option<Vec<String>> {
        None
    }
}
