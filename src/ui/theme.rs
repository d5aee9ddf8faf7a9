use ratatui::style::{Color, Modifier, Style};

use crate::config::RuntimeConfig;

/// Styles for one session, built once from the resolved colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub normal: Style,
    pub selected: Style,
    pub prompt: Style,
}

impl Palette {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let bg = to_color(config.background);
        Self {
            normal: Style::default().fg(to_color(config.foreground)).bg(bg),
            selected: Style::default()
                .fg(to_color(config.selection_foreground))
                .bg(to_color(config.selection_background)),
            prompt: Style::default()
                .fg(to_color(config.prompt_foreground))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

/// Palette index to a terminal colour. Negative or out-of-range indices keep
/// the terminal's default.
pub fn to_color(index: i32) -> Color {
    match u8::try_from(index) {
        Ok(n) => Color::Indexed(n),
        Err(_) => Color::Reset,
    }
}
