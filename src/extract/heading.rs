//! Title and heading detection by font-size rank.
//!
//! Every line with at least [`MIN_LINE_CHARS`] characters is bucketed by its
//! largest rounded font size. The largest size becomes the title and the next
//! three sizes become H1, H2 and H3. Nothing but the rendered size is used:
//! no position, weight or numbering.

use crate::model::{strip, DocumentLayout, ExtractionResult, HeadingLevel, OutlineEntry};

use super::size_group::{SizeGroup, SizedLine};

/// Lines shorter than this (in characters) are ignored.
pub const MIN_LINE_CHARS: usize = 5;

/// Title fragments must be longer than this.
///
/// Every candidate already has at least [`MIN_LINE_CHARS`] characters, so
/// this filter currently never removes anything. It stays so that lowering
/// [`MIN_LINE_CHARS`] does not silently change which lines form the title.
pub const TITLE_FRAGMENT_MIN_CHARS: usize = 3;

/// Extracts a title and a three-level outline from a document layout.
///
/// The extractor holds no state; one value can serve any number of
/// documents, from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingExtractor;

impl HeadingExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the title and outline of `doc`.
    pub fn extract(&self, doc: &DocumentLayout) -> ExtractionResult {
        let group = self.scan(doc);
        log::debug!(
            "Scanned {} pages into {} distinct font sizes",
            doc.pages.len(),
            group.len()
        );
        self.rank(group)
    }

    /// Bucket every qualifying line of `doc` by its rounded font size.
    pub fn scan(&self, doc: &DocumentLayout) -> SizeGroup {
        let mut group = SizeGroup::new();

        for page in &doc.pages {
            for line in page.lines() {
                let text = line.text();
                if text.chars().count() >= MIN_LINE_CHARS {
                    group.insert(line.max_size(), text, page.number);
                }
            }
        }

        group
    }

    /// Turn a populated size group into a title and outline.
    pub fn rank(&self, group: SizeGroup) -> ExtractionResult {
        let mut ranked = group.into_ranked();

        let Some((_, title_lines)) = ranked.next() else {
            return ExtractionResult::default();
        };

        let title = compose_title(&title_lines);

        let mut outline = Vec::new();
        for (level, (size, lines)) in HeadingLevel::ALL.into_iter().zip(ranked) {
            log::trace!("{} -> {} ({} lines)", size, level, lines.len());
            outline.extend(
                lines
                    .into_iter()
                    .map(|line| OutlineEntry::new(level, line.text, line.page)),
            );
        }

        ExtractionResult { title, outline }
    }
}

fn compose_title(lines: &[SizedLine]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }

    let title = lines
        .iter()
        .map(|l| l.text.as_str())
        .filter(|t| t.chars().count() > TITLE_FRAGMENT_MIN_CHARS)
        .collect::<Vec<_>>()
        .join(" ");

    Some(strip(&title).to_string())
}
