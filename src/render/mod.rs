//! Static HTML rendering of the comparison table.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::{self, Write};

use crate::constants::page::{DEFAULT_TITLE, HEADERS};
use crate::models::ReleaseStatus;
use crate::table::{ComparisonLine, DisplayRow, StatusStyle};
use crate::theme::{STORAGE_KEY, ThemeSettings};

const PAGE_CSS: &str = include_str!("page.css");
const THEME_SCRIPT: &str = include_str!("theme.js");

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub page_title: String,

    /// Show the status colour legend above the table.
    pub show_legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_title: DEFAULT_TITLE.to_string(),
            show_legend: true,
        }
    }
}

/// A complete HTML document, written lazily through [`fmt::Display`].
pub struct Page<'r, 'a> {
    pub rows: &'r [DisplayRow<'a>],
    pub settings: ThemeSettings,
    pub options: &'r RenderOptions,
}

impl fmt::Display for Page<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_page(f, self.rows, self.settings, self.options)
    }
}

/// Renders a complete HTML document for the given rows.
#[must_use]
pub fn render_page(
    rows: &[DisplayRow<'_>],
    settings: ThemeSettings,
    options: &RenderOptions,
) -> String {
    Page {
        rows,
        settings,
        options,
    }
    .to_string()
}

pub fn write_page<W: Write>(
    out: &mut W,
    rows: &[DisplayRow<'_>],
    settings: ThemeSettings,
    options: &RenderOptions,
) -> fmt::Result {
    let title = encode_text(&options.page_title);

    write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}" data-storage-key="{key}">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{PAGE_CSS}</style>
<script>
{THEME_SCRIPT}</script>
</head>
<body>
<header><h1>{title}</h1><button id="theme-toggle" type="button">Toggle theme</button></header>
"#,
        theme = settings.theme().as_str(),
        key = STORAGE_KEY,
    )?;

    if options.show_legend {
        write_legend(out)?;
    }

    write_table(out, rows)?;
    writeln!(out, "</body>\n</html>")
}

fn write_legend<W: Write>(out: &mut W) -> fmt::Result {
    write!(out, "<ul class=\"legend\">")?;
    for status in ReleaseStatus::ALL {
        if let Some(style) = StatusStyle::for_status(status) {
            write!(
                out,
                "<li style=\"{}\">{}</li>",
                style.css(),
                encode_text(status.label())
            )?;
        }
    }
    writeln!(out, "</ul>")
}

pub fn write_table<W: Write>(out: &mut W, rows: &[DisplayRow<'_>]) -> fmt::Result {
    write!(out, "<div class=\"table-wrap\"><table>\n<thead><tr>")?;
    for header in HEADERS {
        write!(out, "<th>{header}</th>")?;
    }
    writeln!(out, "</tr></thead>\n<tbody>")?;

    if rows.is_empty() {
        writeln!(
            out,
            "<tr><td colspan=\"{}\" class=\"empty-state\">No titles in this dataset</td></tr>",
            HEADERS.len()
        )?;
    }

    for row in rows {
        write_row(out, row)?;
    }

    writeln!(out, "</tbody></table></div>")
}

fn write_row<W: Write>(out: &mut W, row: &DisplayRow<'_>) -> fmt::Result {
    let parity = if row.group_index % 2 == 0 {
        "group-even"
    } else {
        "group-odd"
    };
    write!(out, "<tr class=\"{parity}\">")?;

    if row.is_first_of_group {
        let span = rowspan(row.group_span);
        write!(out, "<td class=\"title\"{span}>{}", encode_text(row.title))?;
        write_title_meta(out, row)?;
        write!(out, "</td>")?;
        write!(out, "<td class=\"alt-title\"{span}>{}</td>", encode_text(row.alt_title))?;
    }

    write_release_cell(out, row.best_name, row.best_status)?;
    write_release_cell(out, row.alt_name, row.alt_status)?;

    if row.is_first_of_group {
        let span = rowspan(row.group_span);
        write!(out, "<td class=\"comparison\"{span}>")?;
        write_comparison(out, row)?;
        write!(out, "</td>")?;
        write!(out, "<td class=\"notes\"{span}>{}</td>", encode_text(row.notes))?;
    }

    writeln!(out, "</tr>")
}

fn rowspan(span: usize) -> String {
    if span > 1 {
        format!(" rowspan=\"{span}\"")
    } else {
        String::new()
    }
}

fn write_title_meta<W: Write>(out: &mut W, row: &DisplayRow<'_>) -> fmt::Result {
    let year = row.year.map(|y| y.to_string());
    let parts: Vec<&str> = [year.as_deref(), row.format.as_ref().map(|f| f.label())]
        .into_iter()
        .flatten()
        .collect();

    if parts.is_empty() {
        return Ok(());
    }
    write!(out, "<span class=\"meta\">{}</span>", encode_text(&parts.join(" · ")))
}

fn write_release_cell<W: Write>(out: &mut W, name: &str, status: ReleaseStatus) -> fmt::Result {
    match StatusStyle::for_status(status) {
        Some(style) => write!(
            out,
            "<td class=\"release\" style=\"{}\" title=\"{}\">{}</td>",
            style.css(),
            encode_double_quoted_attribute(status.label()),
            encode_text(name)
        ),
        None => write!(out, "<td class=\"release\">{}</td>", encode_text(name)),
    }
}

fn write_comparison<W: Write>(out: &mut W, row: &DisplayRow<'_>) -> fmt::Result {
    for (i, line) in row.comparison_lines().enumerate() {
        if i > 0 {
            write!(out, "<br>")?;
        }
        match line {
            ComparisonLine::Link(url) => write!(
                out,
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                encode_double_quoted_attribute(url),
                encode_text(url)
            )?,
            ComparisonLine::Text(text) => write!(out, "{}", encode_text(text))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaFormat, Release, TitleEntry};
    use crate::table::flatten;
    use crate::theme::Theme;

    fn sample() -> Vec<TitleEntry> {
        let mut frieren = TitleEntry::new("Frieren")
            .with_best(Release::new("Vodes (Dual Audio)", ReleaseStatus::Broken))
            .with_best(Release::new("Arg0", ReleaseStatus::None))
            .with_alt(Release::new("SubsPlease", ReleaseStatus::NotNyaa));
        frieren.alt_title = "Sousou no Frieren".to_string();
        frieren.year = Some(2023);
        frieren.format = Some(MediaFormat::Tv);
        frieren.comparison = "https://slow.pics/c/abc\n  WEB looks worse  ".to_string();

        let bocchi = TitleEntry::new("Bocchi the Rock!")
            .with_best(Release::new("Okay-Subs", ReleaseStatus::None));

        vec![frieren, bocchi]
    }

    fn body_rows(html: &str) -> Vec<&str> {
        html.lines().filter(|l| l.starts_with("<tr class=")).collect()
    }

    #[test]
    fn test_rowspan_only_on_first_row_of_group() {
        let entries = sample();
        let rows = flatten(&entries);
        let html = render_page(&rows, ThemeSettings::default(), &RenderOptions::default());
        let body = body_rows(&html);

        assert_eq!(body.len(), 3);
        assert_eq!(body[0].matches("rowspan=\"2\"").count(), 4);
        assert!(!body[1].contains("rowspan"));
        assert!(!body[1].contains("class=\"title\""));
        assert!(body[2].contains("class=\"title\""));
        assert!(!body[2].contains("rowspan"));
    }

    #[test]
    fn test_group_parity_classes() {
        let entries = sample();
        let rows = flatten(&entries);
        let html = render_page(&rows, ThemeSettings::default(), &RenderOptions::default());
        let body = body_rows(&html);

        assert!(body[0].starts_with("<tr class=\"group-even\">"));
        assert!(body[1].starts_with("<tr class=\"group-even\">"));
        assert!(body[2].starts_with("<tr class=\"group-odd\">"));
    }

    #[test]
    fn test_status_styles_applied() {
        let entries = sample();
        let rows = flatten(&entries);
        let html = render_page(&rows, ThemeSettings::default(), &RenderOptions::default());
        let body = body_rows(&html);

        let broken = StatusStyle::for_status(ReleaseStatus::Broken).unwrap().css();
        let not_nyaa = StatusStyle::for_status(ReleaseStatus::NotNyaa).unwrap().css();
        assert!(body[0].contains(&format!("style=\"{broken}\"")));
        assert!(body[0].contains(&format!("style=\"{not_nyaa}\"")));
        assert!(body[2].contains("<td class=\"release\">Okay-Subs</td>"));
    }

    #[test]
    fn test_comparison_links_and_meta() {
        let entries = sample();
        let rows = flatten(&entries);
        let html = render_page(&rows, ThemeSettings::default(), &RenderOptions::default());

        assert!(html.contains(
            "<a href=\"https://slow.pics/c/abc\" target=\"_blank\" rel=\"noopener noreferrer\">https://slow.pics/c/abc</a><br>WEB looks worse"
        ));
        assert!(html.contains("<span class=\"meta\">2023 · TV</span>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut entry = TitleEntry::new("<script>alert(1)</script>");
        entry.notes = "Tom & Jerry".to_string();
        let entries = vec![entry];
        let options = RenderOptions {
            page_title: "A <b>bold</b> page".to_string(),
            show_legend: false,
        };
        let html = render_page(&flatten(&entries), ThemeSettings::default(), &options);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("<title>A &lt;b&gt;bold&lt;/b&gt; page</title>"));
        assert!(!html.contains("class=\"legend\""));
    }

    #[test]
    fn test_theme_attribute() {
        let html = render_page(&[], ThemeSettings::new(Theme::Light), &RenderOptions::default());
        assert!(html.contains("data-theme=\"light\""));
        assert!(html.contains("data-storage-key=\"theme\""));

        let html = render_page(&[], ThemeSettings::default(), &RenderOptions::default());
        assert!(html.contains("data-theme=\"dark\""));
    }

    #[test]
    fn test_page_display_matches_writer() {
        let entries = sample();
        let rows = flatten(&entries);
        let options = RenderOptions::default();

        let mut written = String::new();
        write_page(&mut written, &rows, ThemeSettings::default(), &options).unwrap();

        assert_eq!(render_page(&rows, ThemeSettings::default(), &options), written);
    }

    #[test]
    fn test_header_and_empty_state() {
        let html = render_page(&[], ThemeSettings::default(), &RenderOptions::default());
        assert!(html.contains(
            "<th>Title</th><th>Alt Title</th><th>Best Release</th><th>Alt Release</th><th>Comparison</th><th>Notes</th>"
        ));
        assert!(html.contains("colspan=\"6\" class=\"empty-state\""));
    }
}
