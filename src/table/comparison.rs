/// A non-blank line of a title's comparison field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonLine<'a> {
    Link(&'a str),
    Text(&'a str),
}

impl<'a> ComparisonLine<'a> {
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with("http://") || line.starts_with("https://") {
            Self::Link(line)
        } else {
            Self::Text(line)
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Link(s) | Self::Text(s) => *s,
        }
    }

    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Link(_))
    }
}

/// Lazily yields trimmed, non-empty comparison lines in order.
#[derive(Debug, Clone)]
pub struct ComparisonLines<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> ComparisonLines<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }
}

impl<'a> Iterator for ComparisonLines<'a> {
    type Item = ComparisonLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(ComparisonLine::classify)
    }
}

impl std::iter::FusedIterator for ComparisonLines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_detection() {
        assert_eq!(
            ComparisonLine::classify("https://example.com/x"),
            ComparisonLine::Link("https://example.com/x")
        );
        assert!(ComparisonLine::classify("http://slow.pics/c/1").is_link());
        assert!(!ComparisonLine::classify("ftp://example.com").is_link());
        assert!(!ComparisonLine::classify("see https://example.com").is_link());
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_dropped() {
        let lines: Vec<_> =
            ComparisonLines::new("  looks worse  \n\n   \nhttps://example.com/x\r\n").collect();

        assert_eq!(
            lines,
            vec![
                ComparisonLine::Text("looks worse"),
                ComparisonLine::Link("https://example.com/x"),
            ]
        );
    }

    #[test]
    fn test_empty_comparison() {
        assert_eq!(ComparisonLines::new("").count(), 0);
        assert_eq!(ComparisonLines::new("\n \n\t\n").count(), 0);
    }

    #[test]
    fn test_exhausted_iterator_stays_exhausted() {
        let mut lines = ComparisonLines::new("one");
        assert_eq!(lines.next().map(|l| l.as_str()), Some("one"));
        assert_eq!(lines.next(), None);
        assert_eq!(lines.next(), None);
    }
}
