//! Row flattening for the comparison table.
//!
//! Each [`TitleEntry`] holds two independent release lists. The table shows
//! them side by side, so a title expands into `max(best, alt, 1)` rows and
//! the per-title columns are merged vertically across those rows.

pub mod comparison;
pub mod status;

use serde::{Deserialize, Serialize};

use crate::models::{MediaFormat, Release, ReleaseStatus, TitleEntry};

pub use comparison::{ComparisonLine, ComparisonLines};
pub use status::StatusStyle;

/// How rows are assigned to vertically merged groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One group per input entry.
    #[default]
    Entry,
    /// One group per contiguous run of rows with an identical title string.
    /// Adjacent entries sharing a title collapse into a single group.
    Title,
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Ok(Self::Entry),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown grouping '{other}' (expected entry or title)")),
        }
    }
}

/// One rendered table row. Title-level fields are repeated on every row of
/// a group; only the first row of a group carries a non-zero span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRow<'a> {
    pub title: &'a str,
    pub alt_title: &'a str,
    pub year: Option<i32>,
    pub format: Option<MediaFormat>,
    pub notes: &'a str,
    pub comparison: &'a str,
    pub best_name: &'a str,
    pub best_status: ReleaseStatus,
    pub alt_name: &'a str,
    pub alt_status: ReleaseStatus,
    pub is_first_of_group: bool,
    pub group_span: usize,
    pub group_index: usize,
}

impl<'a> DisplayRow<'a> {
    fn new(entry: &'a TitleEntry, index: usize, position: usize, span: usize) -> Self {
        let best = entry.best_releases.get(position);
        let alt = entry.alt_releases.get(position);

        Self {
            title: &entry.title,
            alt_title: &entry.alt_title,
            year: entry.year,
            format: entry.format,
            notes: &entry.notes,
            comparison: &entry.comparison,
            best_name: release_name(best),
            best_status: release_status(best),
            alt_name: release_name(alt),
            alt_status: release_status(alt),
            is_first_of_group: position == 0,
            group_span: if position == 0 { span } else { 0 },
            group_index: index,
        }
    }

    #[must_use]
    pub fn comparison_lines(&self) -> ComparisonLines<'a> {
        ComparisonLines::new(self.comparison)
    }
}

fn release_name(release: Option<&Release>) -> &str {
    release.map_or("", |r| r.name.as_str())
}

fn release_status(release: Option<&Release>) -> ReleaseStatus {
    release.map_or(ReleaseStatus::None, |r| r.status)
}

/// Flattens entries into table rows, one group per entry.
#[must_use]
pub fn flatten(entries: &[TitleEntry]) -> Vec<DisplayRow<'_>> {
    flatten_with(entries, GroupBy::Entry)
}

#[must_use]
pub fn flatten_with(entries: &[TitleEntry], group_by: GroupBy) -> Vec<DisplayRow<'_>> {
    let total = entries.iter().map(TitleEntry::row_count).sum();
    let mut rows = Vec::with_capacity(total);

    for (index, entry) in entries.iter().enumerate() {
        let span = entry.row_count();
        rows.extend((0..span).map(|position| DisplayRow::new(entry, index, position, span)));
    }

    if group_by == GroupBy::Title {
        merge_title_runs(&mut rows);
    }

    rows
}

/// Re-derives groups from maximal runs of equal `title` values.
fn merge_title_runs(rows: &mut [DisplayRow<'_>]) {
    let mut start = 0;
    let mut group = 0;

    while start < rows.len() {
        let title = rows[start].title;
        let end = rows[start..]
            .iter()
            .position(|row| row.title != title)
            .map_or(rows.len(), |offset| start + offset);
        let span = end - start;

        for (offset, row) in rows[start..end].iter_mut().enumerate() {
            row.is_first_of_group = offset == 0;
            row.group_span = if offset == 0 { span } else { 0 };
            row.group_index = group;
        }

        group += 1;
        start = end;
    }
}

/// Number of groups in an already flattened table.
#[must_use]
pub fn group_count(rows: &[DisplayRow<'_>]) -> usize {
    rows.iter().filter(|row| row.is_first_of_group).count()
}
