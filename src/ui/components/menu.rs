use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::session::navigation::NavigationState;
use crate::ui::layout::{Geometry, ItemRow};
use crate::ui::theme::Palette;

/// Paints one menu level: title, separator, visible entries, selection bar
/// and scroll position.
pub struct MenuView<'a> {
    nav: &'a NavigationState,
    geometry: Geometry,
    title_lines: &'a [String],
    palette: &'a Palette,
    rows: Vec<ItemRow>,
}

impl<'a> MenuView<'a> {
    pub fn new(
        nav: &'a NavigationState,
        geometry: Geometry,
        title_lines: &'a [String],
        palette: &'a Palette,
    ) -> Self {
        let rows = geometry.item_rows(&nav.labels(), nav.scroll_offset);
        Self {
            nav,
            geometry,
            title_lines,
            palette,
            rows,
        }
    }

    /// Clickable rectangles of the rows this view draws, with their entry index.
    pub fn hit_rows(&self) -> Vec<(Rect, usize)> {
        self.rows.iter().map(|row| (row.hit, row.index)).collect()
    }
}

/// Write `text` at (x, y), clipped to `area`. Out-of-bounds lines are dropped.
fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < area.top() || y >= area.bottom() || x < area.left() || x >= area.right() {
        return;
    }
    let max_width = (area.right() - x) as usize;
    buf.set_stringn(x, y, text, max_width, style);
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(*buf.area());
        let g = self.geometry;
        let box_width = g.box_width as usize;

        for row in g.title_rows(self.title_lines) {
            put(buf, area, row.x, row.y, &row.text, self.palette.prompt);
        }

        if g.separator_visible() && box_width > 0 {
            let separator = "─".repeat(box_width);
            put(buf, area, g.start_x, g.separator_y, &separator, self.palette.normal);
        }

        for row in &self.rows {
            if row.index == self.nav.selected {
                let indent = row.indent as usize;
                let pad = box_width.saturating_sub(indent + row.text.width());
                let bar = format!("{}{}{}", " ".repeat(indent), row.text, " ".repeat(pad));
                let x = g.start_x;
                let max = box_width.min(area.right().saturating_sub(x) as usize);
                if row.y < area.bottom() && x < area.right() {
                    buf.set_stringn(x, row.y, &bar, max, self.palette.selected);
                }
            } else {
                put(buf, area, row.text_x, row.y, &row.text, self.palette.normal);
            }
        }

        if let Some(indicator) = g.scroll_indicator(self.nav.selected, self.nav.len()) {
            put(
                buf,
                area,
                indicator.x,
                indicator.y,
                &indicator.text,
                self.palette.normal,
            );
        }
    }
}
