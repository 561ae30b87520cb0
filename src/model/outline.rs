//! Extraction results and the persisted outline record.

use serde::{Deserialize, Serialize};

/// Title written when a document yields no title text.
pub const UNTITLED: &str = "Untitled Document";

/// Outline level, assigned by font-size rank below the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Levels in rank order.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level for the n-th size below the title (0-based), if any.
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// `None` when the document had no qualifying text.
    pub title: Option<String>,
    pub outline: Vec<OutlineEntry>,
}

impl ExtractionResult {
    /// Whether neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty) && self.outline.is_empty()
    }

    /// Entries at the given level, in outline order.
    pub fn entries_at(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }

    /// Convert into the persisted record.
    pub fn into_record(self) -> OutlineRecord {
        OutlineRecord::from(self)
    }
}

/// The JSON record written for each document.
///
/// Field order is part of the output format: `title` first, then `outline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineRecord {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl From<ExtractionResult> for OutlineRecord {
    fn from(result: ExtractionResult) -> Self {
        let title = result
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        Self {
            title,
            outline: result.outline,
        }
    }
}
