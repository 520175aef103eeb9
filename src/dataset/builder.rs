//! Builds the comparison dataset from raw SeaDex records.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::clients::seadex::{SeaDexEntry, SeaDexRelease, TitleListing};
use crate::constants::DUAL_AUDIO_SUFFIX;
use crate::constants::seadex::NYAA_TRACKER;
use crate::models::{Release, ReleaseStatus, TitleEntry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ReleaseFlags {
    broken: bool,
    incomplete: bool,
    unmuxed: bool,
    not_nyaa: bool,
}

impl ReleaseFlags {
    fn from_tags(tags: &[String]) -> Self {
        let has = |tag: &str| tags.iter().any(|t| t.eq_ignore_ascii_case(tag));
        Self {
            broken: has("broken"),
            incomplete: has("incomplete"),
            unmuxed: has("unmuxed"),
            not_nyaa: true,
        }
    }

    const fn merge(&mut self, other: Self) {
        self.broken |= other.broken;
        self.incomplete |= other.incomplete;
        self.unmuxed |= other.unmuxed;
    }

    const fn status(self) -> ReleaseStatus {
        if self.broken {
            ReleaseStatus::Broken
        } else if self.incomplete {
            ReleaseStatus::Incomplete
        } else if self.unmuxed {
            ReleaseStatus::Unmuxed
        } else if self.not_nyaa {
            ReleaseStatus::NotNyaa
        } else {
            ReleaseStatus::None
        }
    }
}

/// Release groups of one record, split into best and alternative lists.
#[derive(Debug, Default)]
struct CollectedReleases {
    best: Vec<String>,
    alt: Vec<String>,
    flags: HashMap<(String, bool), ReleaseFlags>,
}

impl CollectedReleases {
    fn collect(torrents: &[SeaDexRelease]) -> Self {
        let mut collected = Self::default();
        let mut trackers: HashMap<String, HashSet<String>> = HashMap::new();

        for torrent in torrents {
            let group = torrent.release_group.as_str();
            if group.is_empty() {
                continue;
            }

            let name = if torrent.dual_audio {
                format!("{group}{DUAL_AUDIO_SUFFIX}")
            } else {
                group.to_string()
            };

            trackers
                .entry(name.clone())
                .or_default()
                .insert(torrent.tracker.as_deref().unwrap_or_default().to_lowercase());

            let flags = ReleaseFlags::from_tags(&torrent.tags);
            collected
                .flags
                .entry((name.clone(), torrent.is_best))
                .and_modify(|existing| existing.merge(flags))
                .or_insert(flags);

            let list = if torrent.is_best {
                &mut collected.best
            } else {
                &mut collected.alt
            };
            if !list.contains(&name) {
                list.push(name);
            }
        }

        for ((name, _), flags) in &mut collected.flags {
            flags.not_nyaa = !trackers
                .get(name)
                .is_some_and(|seen| seen.contains(NYAA_TRACKER));
        }

        collected
    }

    /// Uses the record's theoretical best when no torrent is marked best.
    fn fill_theoretical_best(&mut self, theoretical_best: &str) {
        if !self.best.is_empty() || theoretical_best.is_empty() {
            return;
        }

        self.best.push(theoretical_best.to_string());
        self.flags.insert(
            (theoretical_best.to_string(), true),
            ReleaseFlags {
                unmuxed: theoretical_best.contains('+'),
                not_nyaa: true,
                ..ReleaseFlags::default()
            },
        );
    }

    fn releases(&self, names: Vec<String>, is_best: bool) -> Vec<Release> {
        let mut names = dedupe_dual_audio(names);
        names.sort();

        names
            .into_iter()
            .map(|name| {
                let status = self
                    .flags
                    .get(&(name.clone(), is_best))
                    .map_or(ReleaseStatus::None, |flags| flags.status());
                Release::new(name, status)
            })
            .collect()
    }

    fn into_lists(mut self) -> (Vec<Release>, Vec<Release>) {
        let best = std::mem::take(&mut self.best);
        let alt = std::mem::take(&mut self.alt);
        (self.releases(best, true), self.releases(alt, false))
    }
}

/// Collapses `X` and `X (Dual Audio)` into the dual-audio variant, keeping
/// the order in which base names first appeared.
fn dedupe_dual_audio(names: Vec<String>) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut versions: HashMap<String, Vec<String>> = HashMap::new();

    for name in names {
        let base = name.replace(DUAL_AUDIO_SUFFIX, "");
        if !versions.contains_key(&base) {
            order.push(base.clone());
        }
        versions.entry(base).or_default().push(name);
    }

    order
        .into_iter()
        .filter_map(|base| {
            let mut group = versions.remove(&base)?;
            let dual = format!("{base}{DUAL_AUDIO_SUFFIX}");
            if group.len() > 1 && group.contains(&dual) {
                Some(dual)
            } else {
                Some(group.swap_remove(0))
            }
        })
        .collect()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// English title first with romaji as the alternative, romaji alone otherwise.
fn pick_titles(anilist_id: i32, listing: Option<&TitleListing>) -> (String, String) {
    let english = listing.and_then(|l| non_empty(l.titles.english.as_ref()));
    let romaji = listing.and_then(|l| non_empty(l.titles.romaji.as_ref()));

    let (main, alt) = match (english, romaji) {
        (Some(english), romaji) => (english.to_string(), romaji.unwrap_or_default().to_string()),
        (None, Some(romaji)) => (romaji.to_string(), String::new()),
        (None, None) => {
            warn!("No title found for AniList ID {}", anilist_id);
            (format!("AniList {anilist_id}"), String::new())
        }
    };

    if main == alt {
        (main, String::new())
    } else {
        (main, alt)
    }
}

/// Turns SeaDex records into sorted table entries.
///
/// Records without any release are dropped. When two records resolve to the
/// same main title, the later one is shown under its alternative title.
#[must_use]
pub fn build_entries(
    records: &[SeaDexEntry],
    titles: &HashMap<i32, TitleListing>,
) -> Vec<TitleEntry> {
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let listing = titles.get(&record.anilist_id);
        let (mut title, mut alt_title) = pick_titles(record.anilist_id, listing);

        if seen_titles.contains(&title) && !alt_title.is_empty() {
            std::mem::swap(&mut title, &mut alt_title);
        }
        seen_titles.insert(title.clone());

        let mut collected = CollectedReleases::collect(&record.expand.trs);
        collected.fill_theoretical_best(record.theoretical_best.trim());
        let (best_releases, alt_releases) = collected.into_lists();

        if best_releases.is_empty() && alt_releases.is_empty() {
            debug!("Skipping {} (no releases)", title);
            continue;
        }

        entries.push(TitleEntry {
            title,
            alt_title,
            year: listing.and_then(TitleListing::release_year),
            format: listing.and_then(TitleListing::media_format),
            notes: record.notes.trim().to_string(),
            comparison: record.comparison.trim().replace(',', "\n"),
            best_releases,
            alt_releases,
        });
    }

    entries.sort_by_cached_key(|entry| entry.title.to_lowercase());
    entries
}
