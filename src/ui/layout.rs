use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::RuntimeConfig;

/// Where one menu level lands on screen. All coordinates are terminal cells
/// with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub terminal_height: u16,
    pub terminal_width: u16,
    pub start_y: u16,
    pub start_x: u16,
    pub box_width: u16,
    /// May lie below the terminal when the title alone fills it.
    pub separator_y: u16,
    pub visible_window: usize,
    pub centered: bool,
}

/// A line of text placed at a cell position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRow {
    pub x: u16,
    pub y: u16,
    pub text: String,
}

/// A visible menu entry: its index in the level, the text to draw and the
/// rectangle that counts as a click on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRow {
    pub index: usize,
    pub y: u16,
    pub text_x: u16,
    pub indent: u16,
    pub text: String,
    pub hit: Rect,
}

fn to_u16(n: i32) -> u16 {
    n.clamp(0, u16::MAX as i32) as u16
}

pub fn layout(
    terminal_height: u16,
    terminal_width: u16,
    item_count: usize,
    title_line_count: usize,
    config: &RuntimeConfig,
) -> Geometry {
    let th = terminal_height as i32;
    let tw = terminal_width as i32;
    let items = item_count.min(i32::MAX as usize) as i32;
    let title = title_line_count.min(u16::MAX as usize) as i32;

    let box_width = if config.centered {
        (config.width as i32).min(tw - 4).max(0)
    } else {
        (tw - 1).max(0)
    };

    let block_height = items.min(config.height as i32) + 1;
    let items_start_y = ((th - block_height) / 2).max(0);
    let start_y = (items_start_y - title).max(0);
    let start_x = if config.centered {
        ((tw - box_width) / 2).max(0)
    } else {
        0
    };

    let separator_y = start_y + title;
    let visible_window = items.min(th - separator_y - 1).max(0) as usize;

    Geometry {
        terminal_height,
        terminal_width,
        start_y: to_u16(start_y),
        start_x: to_u16(start_x),
        box_width: to_u16(box_width),
        separator_y: to_u16(separator_y),
        visible_window,
        centered: config.centered,
    }
}

/// Cut `text` to at most `max_width` display columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

impl Geometry {
    pub fn separator_visible(&self) -> bool {
        self.separator_y < self.terminal_height
    }

    /// Title lines stacked from `start_y`, each cut to the box width.
    pub fn title_rows(&self, lines: &[String]) -> Vec<TextRow> {
        let box_width = self.box_width as usize;
        lines
            .iter()
            .enumerate()
            .map_while(|(i, line)| {
                let y = self.start_y as usize + i;
                if y >= self.terminal_height as usize {
                    return None;
                }
                let text = truncate_to_width(line, box_width);
                let x = if self.centered {
                    self.start_x + ((box_width.saturating_sub(text.width())) / 2) as u16
                } else {
                    self.start_x
                };
                Some(TextRow {
                    x,
                    y: y as u16,
                    text,
                })
            })
            .collect()
    }

    /// Rows for the entries in `scroll_offset..scroll_offset + visible_window`.
    /// Centered menus share one left edge, indented by half the spare width.
    pub fn item_rows(&self, labels: &[&str], scroll_offset: usize) -> Vec<ItemRow> {
        let max_text = (self.box_width as usize).saturating_sub(2);
        let visible: Vec<(usize, String)> = labels
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(self.visible_window)
            .map(|(index, label)| (index, truncate_to_width(label, max_text)))
            .collect();

        let indent = if self.centered {
            let widest = visible.iter().map(|(_, t)| t.width()).max().unwrap_or(0);
            ((self.box_width as usize).saturating_sub(widest) / 2) as u16
        } else {
            0
        };

        visible
            .into_iter()
            .enumerate()
            .map(|(row, (index, text))| {
                let y = self.separator_y.saturating_add(1).saturating_add(row as u16);
                let text_x = self.start_x + indent;
                let hit = if self.centered {
                    Rect::new(self.start_x, y, self.box_width, 1)
                } else {
                    Rect::new(text_x, y, text.width() as u16, 1)
                };
                ItemRow {
                    index,
                    y,
                    text_x,
                    indent,
                    text,
                    hit,
                }
            })
            .collect()
    }

    /// ` [selected/total]`, right-aligned on the separator, when not everything fits.
    pub fn scroll_indicator(&self, selected: usize, total: usize) -> Option<TextRow> {
        if total <= self.visible_window || !self.separator_visible() {
            return None;
        }
        let text = format!(" [{}/{}]", selected + 1, total);
        let right = self.start_x as usize + self.box_width as usize;
        let x = right.checked_sub(text.width())?;
        Some(TextRow {
            x: x as u16,
            y: self.separator_y,
            text,
        })
    }
}
