//! Heading extraction.

mod heading;
mod size_group;

pub use heading::{HeadingExtractor, MIN_LINE_CHARS, TITLE_FRAGMENT_MIN_CHARS};
pub use size_group::{SizeGroup, SizedLine};
