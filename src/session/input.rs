use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Position, Rect};

use crate::session::navigation::{Directive, NavigationState};

/// Two clicks on the same row within this window count as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
    Triple,
}

/// A left-button click as reported by the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Click {
    pub column: u16,
    pub row: u16,
    pub kind: ClickKind,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ClickState {
    last: Option<(usize, Instant)>,
}

impl ClickState {
    /// Record a single click; returns true when it completes a double-click.
    pub fn register(&mut self, index: usize, at: Instant) -> bool {
        if let Some((prev, prev_at)) = self.last {
            if prev == index && at.saturating_duration_since(prev_at) < DOUBLE_CLICK_WINDOW {
                self.last = None;
                return true;
            }
        }
        self.last = Some((index, at));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Turns key and mouse input into navigation moves or directives.
#[derive(Clone, Debug, Default)]
pub struct InputDispatcher {
    clicks: ClickState,
    hit_rows: Vec<(Rect, usize)>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clickable rows with those of the latest render.
    pub fn set_hit_rows(&mut self, rows: Vec<(Rect, usize)>) {
        self.hit_rows = rows;
    }

    /// Forget click history and hit rows, e.g. when the menu level changes.
    pub fn reset(&mut self) {
        self.clicks.reset();
        self.hit_rows.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent, nav: &mut NavigationState) -> Option<Directive> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Directive::Interrupted),
                KeyCode::Char('p') => {
                    nav.move_by(-1);
                    None
                }
                KeyCode::Char('n') => {
                    nav.move_by(1);
                    None
                }
                KeyCode::Char('a') => {
                    nav.move_to_start();
                    None
                }
                KeyCode::Char('e') => {
                    nav.move_to_end();
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Enter => return nav.activate_selected(),
            KeyCode::Esc => return Some(nav.escape()),
            KeyCode::Char('q') => return Some(Directive::Quit),
            KeyCode::Char(ch @ '1'..='9') => {
                let index = ch as usize - '1' as usize;
                return nav.activate(index);
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => nav.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => nav.move_by(1),
            KeyCode::Home | KeyCode::Char('h') | KeyCode::Char('g') | KeyCode::Char('a') => {
                nav.move_to_start()
            }
            KeyCode::End | KeyCode::Char('l') | KeyCode::Char('G') | KeyCode::Char('d') => {
                nav.move_to_end()
            }
            KeyCode::PageUp => nav.page(-1),
            KeyCode::PageDown => nav.page(1),
            _ => {}
        }
        None
    }

    pub fn handle_click(
        &mut self,
        click: Click,
        nav: &mut NavigationState,
        now: Instant,
    ) -> Option<Directive> {
        let index = self.row_at(click.column, click.row)?;
        let is_double = match click.kind {
            ClickKind::Double | ClickKind::Triple => true,
            ClickKind::Single => self.clicks.register(index, now),
        };
        if is_double {
            self.clicks.reset();
            return nav.activate(index);
        }
        nav.set_selected(index);
        None
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.hit_rows
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, index)| *index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Command, ItemCatalog};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn nav(n: usize, is_submenu: bool) -> NavigationState {
        let mut catalog = ItemCatalog::new();
        for i in 0..n {
            catalog.insert(format!("item{i}"), Command::Literal(format!("cmd{i}")));
        }
        NavigationState::new(&catalog, is_submenu, false)
    }

    /// One clickable row per entry, starting at row 5, columns 10..30.
    fn dispatcher_with_rows(n: usize) -> InputDispatcher {
        let mut dispatcher = InputDispatcher::new();
        dispatcher.set_hit_rows((0..n).map(|i| (Rect::new(10, 5 + i as u16, 20, 1), i)).collect());
        dispatcher
    }

    fn click(row: u16, kind: ClickKind) -> Click {
        Click {
            column: 15,
            row,
            kind,
        }
    }

    #[test]
    fn test_alternate_key_sets_agree() {
        let down = [key(KeyCode::Down), key(KeyCode::Char('j')), key(KeyCode::Char('s')), ctrl('n')];
        let up = [key(KeyCode::Up), key(KeyCode::Char('k')), key(KeyCode::Char('w')), ctrl('p')];
        for (d, u) in down.into_iter().zip(up) {
            let mut dispatcher = InputDispatcher::new();
            let mut state = nav(5, false);
            assert_eq!(dispatcher.handle_key(d, &mut state), None);
            assert_eq!(dispatcher.handle_key(d, &mut state), None);
            assert_eq!(state.selected, 2);
            dispatcher.handle_key(u, &mut state);
            assert_eq!(state.selected, 1);
        }
    }

    #[test]
    fn test_start_and_end_keys() {
        let end = [key(KeyCode::End), key(KeyCode::Char('l')), key(KeyCode::Char('G')), key(KeyCode::Char('d')), ctrl('e')];
        let start = [key(KeyCode::Home), key(KeyCode::Char('h')), key(KeyCode::Char('g')), key(KeyCode::Char('a')), ctrl('a')];
        for (e, s) in end.into_iter().zip(start) {
            let mut dispatcher = InputDispatcher::new();
            let mut state = nav(5, false);
            dispatcher.handle_key(e, &mut state);
            assert_eq!(state.selected, 5);
            dispatcher.handle_key(s, &mut state);
            assert_eq!(state.selected, 0);
        }
    }

    #[test]
    fn test_page_keys() {
        let mut dispatcher = InputDispatcher::new();
        let mut state = nav(25, false);
        dispatcher.handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.selected, 10);
        dispatcher.handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_enter_activates_selection() {
        let mut dispatcher = InputDispatcher::new();
        let mut state = nav(3, false);
        dispatcher.handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(
            dispatcher.handle_key(key(KeyCode::Enter), &mut state),
            Some(Directive::Execute("cmd1".to_string()))
        );
    }

    #[test]
    fn test_escape_and_quit() {
        let mut dispatcher = InputDispatcher::new();
        let mut root = nav(2, false);
        let mut sub = nav(2, true);
        assert_eq!(dispatcher.handle_key(key(KeyCode::Esc), &mut root), Some(Directive::Quit));
        assert_eq!(dispatcher.handle_key(key(KeyCode::Esc), &mut sub), Some(Directive::GoBack));
        assert_eq!(dispatcher.handle_key(key(KeyCode::Char('q')), &mut sub), Some(Directive::Quit));
        assert_eq!(dispatcher.handle_key(ctrl('c'), &mut sub), Some(Directive::Interrupted));
    }

    #[test]
    fn test_digits_activate_directly() {
        let mut dispatcher = InputDispatcher::new();
        let mut state = nav(3, false);
        assert_eq!(
            dispatcher.handle_key(key(KeyCode::Char('3')), &mut state),
            Some(Directive::Execute("cmd2".to_string()))
        );
        assert_eq!(dispatcher.handle_key(key(KeyCode::Char('4')), &mut state), Some(Directive::Quit));
        assert_eq!(dispatcher.handle_key(key(KeyCode::Char('9')), &mut state), None);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_release_and_unknown_keys_ignored() {
        let mut dispatcher = InputDispatcher::new();
        let mut state = nav(3, false);
        let mut release = key(KeyCode::Down);
        release.kind = KeyEventKind::Release;
        assert_eq!(dispatcher.handle_key(release, &mut state), None);
        assert_eq!(dispatcher.handle_key(key(KeyCode::Char('z')), &mut state), None);
        assert_eq!(dispatcher.handle_key(key(KeyCode::F(5)), &mut state), None);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_single_click_selects() {
        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        let now = Instant::now();
        assert_eq!(dispatcher.handle_click(click(7, ClickKind::Single), &mut state, now), None);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_two_quick_clicks_match_native_double() {
        let start = Instant::now();

        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        dispatcher.handle_click(click(6, ClickKind::Single), &mut state, start);
        let synthesized = dispatcher.handle_click(
            click(6, ClickKind::Single),
            &mut state,
            start + Duration::from_millis(120),
        );

        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        let native = dispatcher.handle_click(click(6, ClickKind::Double), &mut state, start);

        assert_eq!(synthesized, Some(Directive::Execute("cmd1".to_string())));
        assert_eq!(synthesized, native);
    }

    #[test]
    fn test_slow_second_click_only_selects() {
        let start = Instant::now();
        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        dispatcher.handle_click(click(6, ClickKind::Single), &mut state, start);
        let second = dispatcher.handle_click(
            click(6, ClickKind::Single),
            &mut state,
            start + Duration::from_millis(450),
        );
        assert_eq!(second, None);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_clicks_on_different_rows_reselect() {
        let start = Instant::now();
        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        dispatcher.handle_click(click(5, ClickKind::Single), &mut state, start);
        let second = dispatcher.handle_click(
            click(6, ClickKind::Single),
            &mut state,
            start + Duration::from_millis(50),
        );
        assert_eq!(second, None);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_triple_click_acts_like_double() {
        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        assert_eq!(
            dispatcher.handle_click(click(8, ClickKind::Triple), &mut state, Instant::now()),
            Some(Directive::Quit)
        );
    }

    #[test]
    fn test_click_outside_rows_ignored() {
        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        state.set_selected(2);
        let miss = Click {
            column: 2,
            row: 6,
            kind: ClickKind::Double,
        };
        assert_eq!(dispatcher.handle_click(miss, &mut state, Instant::now()), None);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_reset_forgets_rows() {
        let mut dispatcher = dispatcher_with_rows(4);
        let mut state = nav(3, false);
        dispatcher.reset();
        assert_eq!(
            dispatcher.handle_click(click(5, ClickKind::Double), &mut state, Instant::now()),
            None
        );
    }
}
