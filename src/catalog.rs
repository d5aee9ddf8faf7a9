use std::collections::{BTreeMap, HashMap};

/// Prefix marking a menu value as a reference to another submenu.
pub const SUBMENU_PREFIX: &str = "submenu:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// A shell command line, split into words at launch time.
    Literal(String),
    /// Name of an entry in the [`SubmenuTable`].
    SubmenuRef(String),
}

/// Label-to-value pairs as read from one file, before submenu references are resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCatalog {
    labels: Vec<String>,
    values: HashMap<String, String>,
}

impl RawCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or override a label. An existing label keeps its position.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        if !self.values.contains_key(&label) {
            self.labels.push(label.clone());
        }
        self.values.insert(label, value.into());
    }

    pub fn merge(&mut self, other: RawCatalog) {
        let RawCatalog { labels, mut values } = other;
        for label in labels {
            if let Some(value) = values.remove(&label) {
                self.insert(label, value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .filter_map(|label| self.values.get(label).map(|v| (label.as_str(), v.as_str())))
    }

    /// Resolve `submenu:<name>` values against the set of known submenu names.
    /// References to unknown submenus stay literal.
    pub fn resolve<F>(&self, submenu_exists: F) -> ItemCatalog
    where
        F: Fn(&str) -> bool,
    {
        let mut catalog = ItemCatalog::new();
        for (label, value) in self.iter() {
            let command = match value.strip_prefix(SUBMENU_PREFIX) {
                Some(name) if submenu_exists(name) => Command::SubmenuRef(name.to_string()),
                _ => Command::Literal(value.to_string()),
            };
            catalog.insert(label, command);
        }
        catalog
    }
}

/// The commands of one menu level, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    labels: Vec<String>,
    commands: HashMap<String, Command>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, command: Command) {
        let label = label.into();
        if !self.commands.contains_key(&label) {
            self.labels.push(label.clone());
        }
        self.commands.insert(label, command);
    }

    pub fn get(&self, label: &str) -> Option<&Command> {
        self.commands.get(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Labels in display order: declaration order, or alphabetical when `sorted`.
    pub fn labels(&self, sorted: bool) -> Vec<&str> {
        let mut labels: Vec<&str> = self.labels.iter().map(String::as_str).collect();
        if sorted {
            labels.sort_unstable();
        }
        labels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.labels
            .iter()
            .filter_map(|label| self.commands.get(label).map(|c| (label.as_str(), c)))
    }
}

pub type RawSubmenus = BTreeMap<String, RawCatalog>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmenuTable {
    menus: BTreeMap<String, ItemCatalog>,
}

impl SubmenuTable {
    /// Build the table and resolve every cross reference, including nested ones.
    pub fn from_raw(raw: &RawSubmenus) -> Self {
        let menus = raw
            .iter()
            .map(|(name, items)| (name.clone(), items.resolve(|n| raw.contains_key(n))))
            .collect();
        Self { menus }
    }

    pub fn get(&self, name: &str) -> Option<&ItemCatalog> {
        self.menus.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.menus.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

/// Merge an extension file's submenus into the accumulated set, key by key.
pub fn merge_submenus(into: &mut RawSubmenus, from: RawSubmenus) {
    for (name, items) in from {
        into.entry(name).or_default().merge(items);
    }
}
