use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::catalog::ItemCatalog;
use crate::config::ResolvedMenu;
use crate::config::paths::SearchPaths;
use crate::event::AppEvent;
use crate::session::input::InputDispatcher;
use crate::session::navigation::{Directive, NavigationState};
use crate::ui::components::menu::MenuView;
use crate::ui::layout::layout;
use crate::ui::theme::Palette;
use crate::ui::title::title_lines;

/// How the session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Execute(String),
    Interrupted,
}

impl Outcome {
    pub fn exit_code(&self) -> Option<u8> {
        match self {
            Outcome::Quit => Some(0),
            Outcome::Interrupted => Some(130),
            Outcome::Execute(_) => None,
        }
    }
}

/// One interactive session: the current level plus the path that led to it.
pub struct App<'a> {
    menu: &'a ResolvedMenu,
    paths: &'a SearchPaths,
    pub palette: Palette,
    pub nav: NavigationState,
    /// (submenu name, label it was entered through), root first.
    pub stack: Vec<(String, String)>,
    pub title: String,
    pub title_lines: Vec<String>,
    input: InputDispatcher,
}

impl<'a> App<'a> {
    pub fn new(menu: &'a ResolvedMenu, paths: &'a SearchPaths) -> Self {
        let title = menu.title.clone();
        let mut app = Self {
            menu,
            paths,
            palette: Palette::from_config(&menu.config),
            nav: NavigationState::new(&menu.catalog, false, menu.config.sort_items),
            stack: Vec::new(),
            title: String::new(),
            title_lines: Vec::new(),
            input: InputDispatcher::new(),
        };
        app.set_title(title);
        app
    }

    fn set_title(&mut self, title: String) {
        self.title_lines = title_lines(&title, &self.menu.config, self.paths);
        self.title = title;
    }

    fn enter_level(&mut self, catalog: &ItemCatalog, title: String) {
        let is_submenu = !self.stack.is_empty();
        self.nav = NavigationState::new(catalog, is_submenu, self.menu.config.sort_items);
        self.input.reset();
        self.set_title(title);
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) -> Option<Outcome> {
        let directive = match event {
            AppEvent::Key(key) => self.input.handle_key(key, &mut self.nav),
            AppEvent::Click(click) => self.input.handle_click(click, &mut self.nav, now),
            AppEvent::Resize(..) => None,
            AppEvent::Interrupted => Some(Directive::Interrupted),
        }?;
        self.apply(directive)
    }

    /// Carry out a directive. Navigation is handled here; anything that ends
    /// the session is handed back.
    pub fn apply(&mut self, directive: Directive) -> Option<Outcome> {
        match directive {
            Directive::Quit => Some(Outcome::Quit),
            Directive::Interrupted => Some(Outcome::Interrupted),
            Directive::Execute(command) => Some(Outcome::Execute(command)),
            Directive::EnterSubmenu { name, label } => {
                let menu = self.menu;
                match menu.submenus.get(&name) {
                    Some(catalog) => {
                        log::debug!("entering submenu {name:?}");
                        self.stack.push((name, label.clone()));
                        self.enter_level(catalog, label);
                    }
                    None => log::warn!("submenu {name:?} vanished"),
                }
                None
            }
            Directive::GoBack => {
                self.stack.pop();
                let menu = self.menu;
                match self.stack.last() {
                    Some((name, label)) => {
                        let label = label.clone();
                        match menu.submenus.get(name) {
                            Some(catalog) => self.enter_level(catalog, label),
                            None => {
                                self.stack.clear();
                                self.enter_level(&menu.catalog, menu.title.clone());
                            }
                        }
                    }
                    None => self.enter_level(&menu.catalog, menu.title.clone()),
                }
                None
            }
        }
    }

    /// Lay out and paint the current level, remembering its clickable rows.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let geometry = layout(
            area.height,
            area.width,
            self.nav.len(),
            self.title_lines.len(),
            &self.menu.config,
        );
        self.nav.set_visible_window(geometry.visible_window);
        let view = MenuView::new(&self.nav, geometry, &self.title_lines, &self.palette);
        self.input.set_hit_rows(view.hit_rows());
        view.render(area, buf);
    }
}
