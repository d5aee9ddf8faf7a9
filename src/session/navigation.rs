use crate::catalog::{Command, ItemCatalog};

pub const BACK_LABEL: &str = "← Back";
pub const EXIT_LABEL: &str = "Exit";
pub const PAGE_SIZE: isize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Item(Command),
    Back,
    Exit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub kind: EntryKind,
}

/// What the session driver must do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    Quit,
    GoBack,
    EnterSubmenu { name: String, label: String },
    Execute(String),
    Interrupted,
}

/// Selection and scroll position within one menu level.
#[derive(Clone, Debug)]
pub struct NavigationState {
    entries: Vec<Entry>,
    pub selected: usize,
    pub scroll_offset: usize,
    visible_window: usize,
    is_submenu: bool,
}

impl NavigationState {
    pub fn new(catalog: &ItemCatalog, is_submenu: bool, sorted: bool) -> Self {
        let mut entries: Vec<Entry> = catalog
            .labels(sorted)
            .into_iter()
            .filter_map(|label| {
                catalog.get(label).map(|command| Entry {
                    label: label.to_string(),
                    kind: EntryKind::Item(command.clone()),
                })
            })
            .collect();
        if is_submenu {
            entries.push(Entry {
                label: BACK_LABEL.to_string(),
                kind: EntryKind::Back,
            });
        }
        entries.push(Entry {
            label: EXIT_LABEL.to_string(),
            kind: EntryKind::Exit,
        });

        let visible_window = entries.len();
        Self {
            entries,
            selected: 0,
            scroll_offset: 0,
            visible_window,
            is_submenu,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_window(&self) -> usize {
        self.visible_window
    }

    fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn move_by(&mut self, delta: isize) {
        let target = self.selected.saturating_add_signed(delta);
        self.selected = target.min(self.last_index());
        self.reconcile_scroll();
    }

    pub fn move_to_start(&mut self) {
        self.selected = 0;
        self.reconcile_scroll();
    }

    pub fn move_to_end(&mut self) {
        self.selected = self.last_index();
        self.reconcile_scroll();
    }

    pub fn page(&mut self, direction: isize) {
        self.move_by(direction.signum() * PAGE_SIZE);
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.last_index());
        self.reconcile_scroll();
    }

    /// Record how many rows the last layout could show, then keep the selection inside them.
    pub fn set_visible_window(&mut self, rows: usize) {
        self.visible_window = rows;
        self.reconcile_scroll();
    }

    fn reconcile_scroll(&mut self) {
        if self.visible_window == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.visible_window {
            self.scroll_offset = self.selected + 1 - self.visible_window;
        }
        // Never leave rows unused at the bottom once the window has grown.
        let max_offset = self.entries.len().saturating_sub(self.visible_window);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    pub fn activate_selected(&self) -> Option<Directive> {
        self.activate(self.selected)
    }

    pub fn activate(&self, index: usize) -> Option<Directive> {
        let entry = self.entries.get(index)?;
        let directive = match &entry.kind {
            EntryKind::Back => Directive::GoBack,
            EntryKind::Exit => Directive::Quit,
            EntryKind::Item(Command::SubmenuRef(name)) => Directive::EnterSubmenu {
                name: name.clone(),
                label: entry.label.clone(),
            },
            EntryKind::Item(Command::Literal(command)) => Directive::Execute(command.clone()),
        };
        Some(directive)
    }

    /// Escape: back out of a submenu, quit from the root.
    pub fn escape(&self) -> Directive {
        if self.is_submenu {
            Directive::GoBack
        } else {
            Directive::Quit
        }
    }
}
