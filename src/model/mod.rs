//! Document model types.
//!
//! `layout` is the reader's output: pages of blocks, lines and spans with
//! rendered font sizes. `outline` is the extractor's output and the record
//! persisted per document.

mod layout;
mod outline;

pub use layout::{is_strippable, strip, Block, DocumentLayout, FontSize, Line, PageLayout, Span};
pub use outline::{ExtractionResult, HeadingLevel, OutlineEntry, OutlineRecord, UNTITLED};
