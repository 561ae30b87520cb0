//! Page layout types produced by the reader and consumed by the extractor.

use serde::{Deserialize, Serialize};

/// A font size normalized to tenths of a point.
///
/// Rendered sizes jitter in the last bits (`11.9999` vs `12.0001`), so sizes
/// are rounded to one decimal place before they are compared or grouped.
/// Ties round to the even tenth (14.25 becomes 14.2). Storing the tenths as
/// an integer gives a total order for map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FontSize(i64);

impl FontSize {
    /// The size of a line without any visible text.
    pub const ZERO: FontSize = FontSize(0);

    /// Round a size in points to one decimal place, ties to even.
    pub fn from_points(points: f32) -> Self {
        // Exact for any f32, so only true ties are rounded to even.
        let tenths = (f64::from(points) * 10.0).round_ties_even();
        if tenths.is_finite() {
            FontSize(tenths as i64)
        } else {
            FontSize::ZERO
        }
    }

    /// The rounded size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// The rounded size in tenths of a point.
    pub fn tenths(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}pt", self.points())
    }
}

/// Smallest text fragment carrying a single font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Decoded text, possibly empty or whitespace-only.
    pub text: String,
    /// Rendered font size in points.
    pub size: f32,
}

impl Span {
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }

    /// Whether the span has any visible text.
    pub fn is_blank(&self) -> bool {
        strip(&self.text).is_empty()
    }
}

/// Whitespace stripped from span and line text. Includes the ASCII
/// separator controls U+001C..U+001F.
pub fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Trim [`is_strippable`] characters from both ends.
pub fn strip(text: &str) -> &str {
    text.trim_matches(is_strippable)
}

/// One visual line of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Trimmed non-blank span texts joined with single spaces.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| strip(&s.text))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Largest rounded size among spans with visible text.
    ///
    /// Blank spans are ignored; a line with no visible text has size zero.
    pub fn max_size(&self) -> FontSize {
        self.spans
            .iter()
            .filter(|s| !s.is_blank())
            .map(|s| FontSize::from_points(s.size))
            .fold(FontSize::ZERO, FontSize::max)
    }
}

/// A layout region on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A run of lines grouped by vertical spacing.
    Text { lines: Vec<Line> },
    /// A painted image; carries no text.
    Image { name: String },
}

impl Block {
    /// Create a text block.
    pub fn text(lines: Vec<Line>) -> Self {
        Block::Text { lines }
    }

    /// Create an image block.
    pub fn image(name: impl Into<String>) -> Self {
        Block::Image { name: name.into() }
    }

    /// The block's lines, or `None` for blocks without text.
    pub fn lines(&self) -> Option<&[Line]> {
        match self {
            Block::Text { lines } => Some(lines),
            Block::Image { .. } => None,
        }
    }
}

/// The blocks found on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,
    pub blocks: Vec<Block>,
}

impl PageLayout {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterate over every line in every text block.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().filter_map(Block::lines).flatten()
    }
}

/// A document as a page-ordered sequence of layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the document.
    pub fn push(&mut self, page: PageLayout) {
        self.pages.push(page);
    }

    /// Number of pages in the layout.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the layout has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_rounding() {
        assert_eq!(FontSize::from_points(11.96), FontSize::from_points(12.0));
        assert_eq!(FontSize::from_points(12.04), FontSize::from_points(12.0));
        assert_ne!(FontSize::from_points(12.06), FontSize::from_points(12.0));
        assert_eq!(FontSize::from_points(f32::NAN), FontSize::ZERO);
        assert_eq!(FontSize::from_points(10.5).to_string(), "10.5pt");
    }

    #[test]
    fn test_font_size_ties_round_to_even() {
        assert_eq!(FontSize::from_points(14.25).tenths(), 142);
        assert_eq!(FontSize::from_points(14.75).tenths(), 148);
        assert_eq!(FontSize::from_points(10.25).tenths(), 102);
        assert_eq!(FontSize::from_points(0.25).tenths(), 2);
        assert_eq!(FontSize::from_points(14.25), FontSize::from_points(14.2));
        // 14.35 is not a tie in binary (14.3500003...), so it rounds up.
        assert_eq!(FontSize::from_points(14.35).tenths(), 144);
    }

    #[test]
    fn test_strip_separator_controls() {
        assert!(is_strippable('\x1c'));
        assert!(is_strippable('\x1f'));
        assert!(!is_strippable('\x1b'));
        assert_eq!(strip("\x1d Title\x1e\n"), "Title");

        let line = Line::new(vec![
            Span::new("\x1cChapter\x1f", 14.0),
            Span::new("\x1e", 30.0),
            Span::new("One", 14.0),
        ]);
        assert_eq!(line.text(), "Chapter One");
        assert_eq!(line.max_size(), FontSize::from_points(14.0));
        assert!(Span::new("\x1c\x1d", 12.0).is_blank());
    }

    #[test]
    fn test_line_text_joins_trimmed_spans() {
        let line = Line::new(vec![
            Span::new("  Chapter ", 14.0),
            Span::new("   ", 20.0),
            Span::new("", 20.0),
            Span::new("One\t", 14.0),
        ]);
        assert_eq!(line.text(), "Chapter One");
    }

    #[test]
    fn test_line_max_size_ignores_blank_spans() {
        let line = Line::new(vec![
            Span::new("Body", 10.0),
            Span::new(" ", 30.0),
            Span::new("Bigger", 12.04),
        ]);
        assert_eq!(line.max_size(), FontSize::from_points(12.0));

        let blank = Line::new(vec![Span::new("  ", 18.0)]);
        assert_eq!(blank.max_size(), FontSize::ZERO);
        assert!(blank.text().is_empty());
    }

    #[test]
    fn test_block_lines() {
        let text = Block::text(vec![Line::default()]);
        assert_eq!(text.lines().map(<[Line]>::len), Some(1));
        assert!(Block::image("Im0").lines().is_none());
    }

    #[test]
    fn test_page_lines_skip_images() {
        let mut page = PageLayout::new(1);
        page.push(Block::text(vec![Line::new(vec![Span::new("a", 1.0)])]));
        page.push(Block::image("Im1"));
        page.push(Block::text(vec![
            Line::new(vec![Span::new("b", 1.0)]),
            Line::new(vec![Span::new("c", 1.0)]),
        ]));
        assert_eq!(page.lines().count(), 3);
    }
}
