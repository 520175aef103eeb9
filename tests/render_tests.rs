//! End-to-end page rendering from the fixture dataset.

use seadex_table::dataset::{load_entries, write_entries};
use seadex_table::render::{RenderOptions, render_page};
use seadex_table::table::{GroupBy, flatten, flatten_with};
use seadex_table::theme::{MemoryThemeStore, Theme, ThemeSettings};
use std::path::Path;

const FIXTURE: &str = "tests/fixtures/releases.json";

fn body_rows(html: &str) -> Vec<&str> {
    html.lines().filter(|l| l.starts_with("<tr class=")).collect()
}

#[test]
fn renders_fixture_with_spans() {
    let entries = load_entries(Path::new(FIXTURE)).expect("fixture should load");
    let rows = flatten(&entries);
    let html = render_page(&rows, ThemeSettings::default(), &RenderOptions::default());
    let body = body_rows(&html);

    assert_eq!(body.len(), rows.len());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));

    // Bocchi: one row, no rowspan.
    assert!(body[0].contains("Bocchi the Rock!"));
    assert!(!body[0].contains("rowspan"));
    // Frieren: two rows, merged per-title cells.
    assert!(body[1].contains("rowspan=\"2\""));
    assert!(!body[2].contains("class=\"title\""));
    // Suzume: three rows.
    assert!(body[3].contains("rowspan=\"3\""));
    assert!(body[3].contains("<span class=\"meta\">Movie</span>"));
    // Tenki no Ko: a single row with empty release cells.
    assert!(body[6].contains("Tenki no Ko"));
    assert_eq!(body[6].matches("<td class=\"release\"></td>").count(), 2);
}

#[test]
fn text_and_links_survive_escaping() {
    let entries = load_entries(Path::new(FIXTURE)).expect("fixture should load");
    let rows = flatten(&entries);
    let html = render_page(&rows, ThemeSettings::default(), &RenderOptions::default());

    assert!(html.contains("Frieren: Beyond Journey's End"));
    assert!(html.contains("<a href=\"http://example.com/notes\""));
}

#[test]
fn stored_theme_reaches_the_page() {
    let store = MemoryThemeStore::default();
    let mut settings = ThemeSettings::load(&store).expect("memory store cannot fail");
    assert_eq!(settings.theme(), Theme::Dark);

    settings.toggle(&store).expect("memory store cannot fail");
    let reloaded = ThemeSettings::load(&store).expect("memory store cannot fail");

    let html = render_page(&[], reloaded, &RenderOptions::default());
    assert!(html.contains("data-theme=\"light\""));
}

#[test]
fn title_grouping_changes_only_spans() {
    let entries = load_entries(Path::new(FIXTURE)).expect("fixture should load");
    let by_entry = flatten(&entries);
    let by_title = flatten_with(&entries, GroupBy::Title);

    // Fixture titles are unique, so both groupings agree.
    assert_eq!(by_entry, by_title);
}

#[test]
fn rewritten_dataset_renders_identically() {
    let entries = load_entries(Path::new(FIXTURE)).expect("fixture should load");
    let dir = std::env::temp_dir()
        .join(format!("seadex-table-render-{}", uuid::Uuid::new_v4()));
    let copy = dir.join("releases.json");

    write_entries(&copy, &entries).expect("write dataset");
    let reloaded = load_entries(&copy).expect("reload dataset");

    let options = RenderOptions::default();
    assert_eq!(
        render_page(&flatten(&entries), ThemeSettings::default(), &options),
        render_page(&flatten(&reloaded), ThemeSettings::default(), &options)
    );

    let _ = std::fs::remove_dir_all(dir);
}
