use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Condition tag attached to a release group entry.
///
/// Serialized as the plain tags used by the dataset (`broken`, `incomplete`,
/// `unmuxed`, `not_nyaa`, or an empty string). Unrecognised tags and `null`
/// read as [`ReleaseStatus::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum ReleaseStatus {
    #[default]
    None,
    Broken,
    Incomplete,
    Unmuxed,
    NotNyaa,
}

impl ReleaseStatus {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Broken,
        Self::Incomplete,
        Self::Unmuxed,
        Self::NotNyaa,
    ];

    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "broken" => Self::Broken,
            "incomplete" => Self::Incomplete,
            "unmuxed" => Self::Unmuxed,
            "not_nyaa" => Self::NotNyaa,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Broken => "broken",
            Self::Incomplete => "incomplete",
            Self::Unmuxed => "unmuxed",
            Self::NotNyaa => "not_nyaa",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Broken => "Broken",
            Self::Incomplete => "Incomplete",
            Self::Unmuxed => "Unmuxed",
            Self::NotNyaa => "Not on Nyaa",
        }
    }
}

impl From<Option<String>> for ReleaseStatus {
    fn from(tag: Option<String>) -> Self {
        tag.as_deref().map_or(Self::None, Self::from_tag)
    }
}

impl From<ReleaseStatus> for &'static str {
    fn from(status: ReleaseStatus) -> Self {
        status.as_str()
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single release group listed for a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    pub status: ReleaseStatus,
}

impl Release {
    pub fn new(name: impl Into<String>, status: ReleaseStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}
