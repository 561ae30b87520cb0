//! PDF reading: content stream interpretation and layout reconstruction.

pub mod backend;
mod content;
mod layout;
mod options;
mod pdf_reader;

pub use backend::{LopdfBackend, PdfBackend};
pub use content::{ContentInterpreter, Matrix, PageContent, TextRun};
pub use layout::{build_text_blocks, group_lines_into_blocks, group_runs_into_lines, RunLine};
pub use options::{ErrorMode, PageSelection, ReadOptions};
pub use pdf_reader::PdfReader;
