use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::release::Release;
use crate::table::comparison::ComparisonLines;

/// Media type of a title, as reported by `AniList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    #[serde(rename = "TV")]
    Tv,
    #[serde(rename = "TV_SHORT", alias = "TV Short", alias = "TV-Short")]
    TvShort,
    #[serde(rename = "MOVIE", alias = "Movie")]
    Movie,
    #[serde(rename = "SPECIAL", alias = "Special")]
    Special,
    #[serde(rename = "OVA")]
    Ova,
    #[serde(rename = "ONA")]
    Ona,
    #[serde(rename = "MUSIC", alias = "Music")]
    Music,
}

impl MediaFormat {
    pub const ALL: [Self; 7] = [
        Self::Tv,
        Self::TvShort,
        Self::Movie,
        Self::Special,
        Self::Ova,
        Self::Ona,
        Self::Music,
    ];

    /// Lenient parse used for upstream metadata (`tv_short`, `TV Short`, `Movie`...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "TV" => Some(Self::Tv),
            "TV_SHORT" => Some(Self::TvShort),
            "MOVIE" => Some(Self::Movie),
            "SPECIAL" => Some(Self::Special),
            "OVA" => Some(Self::Ova),
            "ONA" => Some(Self::Ona),
            "MUSIC" => Some(Self::Music),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::TvShort => "TV Short",
            Self::Movie => "Movie",
            Self::Special => "Special",
            Self::Ova => "OVA",
            Self::Ona => "ONA",
            Self::Music => "Music",
        }
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One anime title of the comparison dataset, with its best and alternative
/// release groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<MediaFormat>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub comparison: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub best_releases: Vec<Release>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_releases: Vec<Release>,
}

impl TitleEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_best(mut self, release: Release) -> Self {
        self.best_releases.push(release);
        self
    }

    #[must_use]
    pub fn with_alt(mut self, release: Release) -> Self {
        self.alt_releases.push(release);
        self
    }

    /// Number of table rows this title occupies. Never zero.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.best_releases
            .len()
            .max(self.alt_releases.len())
            .max(1)
    }

    #[must_use]
    pub fn comparison_lines(&self) -> ComparisonLines<'_> {
        ComparisonLines::new(&self.comparison)
    }
}
