use crate::models::ReleaseStatus;

/// Cell colours applied to a release cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub background: &'static str,
    pub foreground: &'static str,
}

const GRAY: StatusStyle = StatusStyle {
    background: "#6b7280",
    foreground: "#f9fafb",
};

const PINK: StatusStyle = StatusStyle {
    background: "#f9a8d4",
    foreground: "#1f2937",
};

const YELLOW: StatusStyle = StatusStyle {
    background: "#fde68a",
    foreground: "#1f2937",
};

const BLUE: StatusStyle = StatusStyle {
    background: "#93c5fd",
    foreground: "#1f2937",
};

impl StatusStyle {
    /// Returns `None` when the cell should inherit the default text styling.
    #[must_use]
    pub const fn for_status(status: ReleaseStatus) -> Option<Self> {
        match status {
            ReleaseStatus::Broken => Some(GRAY),
            ReleaseStatus::Incomplete => Some(PINK),
            ReleaseStatus::Unmuxed => Some(YELLOW),
            ReleaseStatus::NotNyaa => Some(BLUE),
            ReleaseStatus::None => None,
        }
    }

    #[must_use]
    pub fn for_tag(tag: &str) -> Option<Self> {
        Self::for_status(ReleaseStatus::from_tag(tag))
    }

    /// Inline CSS declaration for the cell.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "background-color:{};color:{}",
            self.background, self.foreground
        )
    }
}
