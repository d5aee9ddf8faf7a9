use serde::Deserialize;

/// Palette value meaning "leave the terminal's own colour".
pub const TERMINAL_DEFAULT: i32 = -1;

const NAMED_COLORS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const SYSTEM_COLORS: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// A colour as written in a config or theme file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Index(i64),
    Text(String),
    Other(toml::Value),
}

impl ColorValue {
    /// Resolve to a palette index, or [`TERMINAL_DEFAULT`] when unrecognised.
    pub fn resolve(&self) -> i32 {
        match self {
            ColorValue::Index(n) => clamp_index(*n),
            ColorValue::Text(text) => parse_color(text),
            ColorValue::Other(_) => TERMINAL_DEFAULT,
        }
    }
}

/// Hex (`#rrggbb` or `rrggbb`), one of the eight standard names, or an integer.
pub fn parse_color(value: &str) -> i32 {
    let value = value.trim();
    if let Some(rgb) = parse_hex(value) {
        return xterm256_from_rgb(rgb) as i32;
    }
    let lower = value.to_ascii_lowercase();
    if let Some(index) = NAMED_COLORS.iter().position(|name| *name == lower) {
        return index as i32;
    }
    match value.parse::<i64>() {
        Ok(n) => clamp_index(n),
        Err(_) => TERMINAL_DEFAULT,
    }
}

fn clamp_index(n: i64) -> i32 {
    i32::try_from(n).unwrap_or(TERMINAL_DEFAULT)
}

fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some((
        u8::from_str_radix(&hex[0..2], 16).ok()?,
        u8::from_str_radix(&hex[2..4], 16).ok()?,
        u8::from_str_radix(&hex[4..6], 16).ok()?,
    ))
}

/// RGB value of an xterm-256 palette entry.
pub fn xterm256_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => SYSTEM_COLORS[index as usize],
        16..=231 => {
            let i = index - 16;
            (
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i / 6) % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let level = 8 + (index - 232) * 10;
            (level, level, level)
        }
    }
}

/// Nearest palette entry by Euclidean distance. Ties go to the higher index,
/// so pure colours land in the 6x6x6 cube rather than the system range.
pub fn xterm256_from_rgb((r, g, b): (u8, u8, u8)) -> u8 {
    let mut best = (u32::MAX, 0u8);
    for index in 0..=255u8 {
        let (pr, pg, pb) = xterm256_rgb(index);
        let dr = r as i32 - pr as i32;
        let dg = g as i32 - pg as i32;
        let db = b as i32 - pb as i32;
        let distance = (dr * dr + dg * dg + db * db) as u32;
        if distance <= best.0 {
            best = (distance, index);
        }
    }
    best.1
}
