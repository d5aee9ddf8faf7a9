use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tmenu::catalog::Command;
use tmenu::config::ConfigResolver;
use tmenu::config::paths::SearchPaths;

fn setup() -> (TempDir, ConfigResolver) {
    let dir = tempfile::tempdir().unwrap();
    let resolver = ConfigResolver::new(SearchPaths::rooted_at(dir.path()));
    (dir, resolver)
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

#[test]
fn config_colors_override_theme_colors() {
    let (dir, resolver) = setup();
    write(
        &dir.path().join("config/tmenu/themes/alarm.toml"),
        "[colors]\nselection_background = \"red\"\nforeground = 3\n",
    );
    let config = write(
        &dir.path().join("menu.toml"),
        "[colors]\nselection_background = \"blue\"\n\n[display]\ntheme = \"alarm\"\n\n[menu]\nshell = \"sh\"\n",
    );

    let menu = resolver.resolve(Some(&config));
    assert_eq!(menu.config.selection_background, 4);
    assert_eq!(menu.config.foreground, 3);
    assert_eq!(menu.config.prompt_foreground, 4);
}

#[test]
fn bundled_theme_applies_when_none_on_disk() {
    let (dir, resolver) = setup();
    let config = write(
        &dir.path().join("menu.toml"),
        "[display]\ntheme = \"nord\"\n\n[menu]\nshell = \"sh\"\n",
    );
    let menu = resolver.resolve(Some(&config));
    assert_ne!(menu.config.foreground, 7);
    assert_eq!(menu.config.theme.as_deref(), Some("nord"));
}

#[test]
fn unknown_theme_keeps_defaults() {
    let (dir, resolver) = setup();
    let config = write(
        &dir.path().join("menu.toml"),
        "[display]\ntheme = \"no-such-theme\"\n\n[menu]\nshell = \"sh\"\n",
    );
    let menu = resolver.resolve(Some(&config));
    assert_eq!(menu.config.foreground, 7);
    assert_eq!(menu.config.selection_background, 6);
}

#[test]
fn hex_colors_map_to_nearest_palette_entry() {
    let (dir, resolver) = setup();
    let config = write(
        &dir.path().join("menu.toml"),
        "[colors]\nforeground = \"ff0000\"\nbackground = \"#000000\"\nprompt_foreground = \"bogus\"\n",
    );
    let menu = resolver.resolve(Some(&config));
    assert_eq!(menu.config.foreground, 196);
    assert_eq!(menu.config.background, 16);
    assert_eq!(menu.config.prompt_foreground, -1);
}

#[test]
fn missing_config_yields_empty_catalog() {
    let (dir, resolver) = setup();
    let menu = resolver.resolve(Some(&dir.path().join("absent.toml")));
    assert!(menu.catalog.is_empty());
    assert!(menu.submenus.is_empty());
    assert_eq!(menu.config, tmenu::config::RuntimeConfig::default());
}

#[test]
fn malformed_config_is_treated_as_empty() {
    let (dir, resolver) = setup();
    let config = write(&dir.path().join("menu.toml"), "[menu\nbroken = ");
    let menu = resolver.resolve(Some(&config));
    assert!(menu.catalog.is_empty());
}

#[test]
fn first_run_writes_default_config() {
    let (dir, resolver) = setup();
    let menu = resolver.resolve(None);
    assert!(dir.path().join("config/tmenu/config.toml").is_file());
    assert!(!menu.catalog.is_empty());
}

#[test]
fn extension_files_merge_in_filename_order() {
    let (dir, resolver) = setup();
    let menus = dir.path().join("menus");
    write(
        &menus.join("20-late.toml"),
        "[menu]\nbrowser = \"chromium\"\nmail = \"aerc\"\n",
    );
    write(&menus.join("10-early.toml"), "[menu]\nbrowser = \"firefox\"\n");
    write(&menus.join("15-broken.toml"), "this is = = not toml");
    write(&menus.join("notes.txt"), "[menu]\nignored = \"yes\"\n");
    let config = write(
        &dir.path().join("menu.toml"),
        &format!(
            "[display]\ntheme_dir = '{}'\n\n[menu]\nterminal = \"foot\"\nmail = \"mutt\"\n",
            menus.display()
        ),
    );

    let menu = resolver.resolve(Some(&config));
    assert_eq!(menu.catalog.labels(false), ["terminal", "mail", "browser"]);
    assert_eq!(
        menu.catalog.get("browser"),
        Some(&Command::Literal("chromium".to_string()))
    );
    assert_eq!(
        menu.catalog.get("mail"),
        Some(&Command::Literal("aerc".to_string()))
    );
    assert!(menu.catalog.get("ignored").is_none());
}

#[test]
fn extension_submenus_merge_key_by_key() {
    let (dir, resolver) = setup();
    let menus = dir.path().join("menus");
    write(
        &menus.join("dev.toml"),
        "[submenu.Dev]\nDebugger = \"gdb\"\n\n[submenu.Games]\nChess = \"gnuchess\"\n",
    );
    let config = write(
        &dir.path().join("menu.toml"),
        &format!(
            "[display]\ntheme_dir = '{}'\n\n[menu]\nDevelopment = \"submenu:Dev\"\nPlay = \"submenu:Games\"\n\n[submenu.Dev]\nEditor = \"nvim\"\n",
            menus.display()
        ),
    );

    let menu = resolver.resolve(Some(&config));
    let dev = menu.submenus.get("Dev").unwrap();
    assert_eq!(dev.labels(false), ["Editor", "Debugger"]);
    assert!(menu.submenus.contains("Games"));
    assert_eq!(
        menu.catalog.get("Play"),
        Some(&Command::SubmenuRef("Games".to_string()))
    );
}

#[test]
fn reference_to_unknown_submenu_stays_literal() {
    let (dir, resolver) = setup();
    let config = write(
        &dir.path().join("menu.toml"),
        "[menu]\nGhost = \"submenu:Nowhere\"\n",
    );
    let menu = resolver.resolve(Some(&config));
    assert_eq!(
        menu.catalog.get("Ghost"),
        Some(&Command::Literal("submenu:Nowhere".to_string()))
    );
}

#[test]
fn display_section_and_title() {
    let (dir, resolver) = setup();
    let config = write(
        &dir.path().join("menu.toml"),
        "[display]\ncentered = false\nheight = 4\ntitle = \"Launcher\"\nsort_items = true\n\n[menu]\nb = \"b\"\na = \"a\"\n",
    );
    let menu = resolver.resolve(Some(&config));
    assert!(!menu.config.centered);
    assert_eq!(menu.config.height, 4);
    assert_eq!(menu.config.width, 60);
    assert_eq!(menu.title, "Launcher");
    assert_eq!(menu.catalog.labels(menu.config.sort_items), ["a", "b"]);
}

#[test]
fn off_type_display_values_keep_the_rest_of_the_file() {
    let (dir, resolver) = setup();
    let config = write(
        &dir.path().join("menu.toml"),
        "[colors]\nforeground = \"green\"\n\n[display]\ntitle = 2024\nwidth = 80.0\nheight = \"tall\"\n\n[menu]\nshell = \"sh\"\n",
    );
    let menu = resolver.resolve(Some(&config));
    assert_eq!(menu.catalog.len(), 1);
    assert_eq!(menu.title, "2024");
    assert_eq!(menu.config.width, 80);
    assert_eq!(menu.config.height, 10);
    assert_eq!(menu.config.foreground, 2);
}
