//! # pdf-outline
//!
//! Title and heading outline extraction for PDF documents.
//!
//! Text lines are grouped by rendered font size across the whole document.
//! The largest size becomes the title and the next three sizes become the
//! H1, H2 and H3 levels of the outline. Font size is the only signal used.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_file, outline_json, JsonFormat};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_file("report.pdf")?;
//!     println!("{}", outline_json(result, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! - [`reader`]: lopdf-backed reader producing a [`DocumentLayout`]
//! - [`extract`]: the font-size heuristic, [`HeadingExtractor`]
//! - [`render`]: JSON output
//! - [`batch`]: directory-to-directory driver

pub mod batch;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod reader;
pub mod render;

// Re-export commonly used types
pub use batch::{run_batch, BatchOptions, BatchReport, DocumentOutcome};
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use extract::HeadingExtractor;
pub use model::{
    Block, DocumentLayout, ExtractionResult, FontSize, HeadingLevel, Line, OutlineEntry,
    OutlineRecord, PageLayout, Span, UNTITLED,
};
pub use reader::{ErrorMode, PageSelection, PdfReader, ReadOptions};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Read a PDF file into its page layout.
///
/// # Example
///
/// ```no_run
/// let layout = pdf_outline::read_file("report.pdf").unwrap();
/// println!("Pages: {}", layout.page_count());
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<DocumentLayout> {
    PdfReader::open(path)?.read()
}

/// Read a PDF file into its page layout with custom options.
pub fn read_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ReadOptions,
) -> Result<DocumentLayout> {
    PdfReader::open_with_options(path, options)?.read()
}

/// Read a PDF from bytes into its page layout.
pub fn read_bytes(data: &[u8]) -> Result<DocumentLayout> {
    PdfReader::from_bytes(data)?.read()
}

/// Run the heading heuristic over an already-read layout.
///
/// Never fails: a layout without qualifying text yields no title and an
/// empty outline.
pub fn extract_layout(layout: &DocumentLayout) -> ExtractionResult {
    HeadingExtractor::new().extract(layout)
}

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_file;
///
/// let result = extract_file("report.pdf").unwrap();
/// for entry in &result.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    Ok(extract_layout(&read_file(path)?))
}

/// Extract the title and outline of a PDF file with custom read options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ReadOptions,
) -> Result<ExtractionResult> {
    Ok(extract_layout(&read_file_with_options(path, options)?))
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractionResult> {
    Ok(extract_layout(&read_bytes(data)?))
}

/// Extract the title and outline of a PDF from a reader.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_reader;
/// use std::fs::File;
///
/// let file = File::open("report.pdf").unwrap();
/// let result = extract_reader(file).unwrap();
/// ```
pub fn extract_reader<R: Read>(reader: R) -> Result<ExtractionResult> {
    Ok(extract_layout(&PdfReader::from_reader(reader)?.read()?))
}

/// Serialize an extraction result as the persisted outline record.
///
/// A missing title is written as [`UNTITLED`].
pub fn outline_json(result: ExtractionResult, format: JsonFormat) -> Result<String> {
    render::to_json(&OutlineRecord::from(result), format)
}

/// Builder for reading PDFs and extracting their outline.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{JsonFormat, Outliner, PageSelection};
///
/// let json = Outliner::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=20))
///     .extract("report.pdf")?
///     .to_json(JsonFormat::Compact)?;
/// # Ok::<(), pdf_outline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    read_options: ReadOptions,
    extractor: HeadingExtractor,
}

impl Outliner {
    /// Create a new builder with strict reading of every page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient reading mode.
    pub fn lenient(mut self) -> Self {
        self.read_options = self.read_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.read_options = self.read_options.with_pages(pages);
        self
    }

    /// Replace all read options.
    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// Read and extract a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let reader = PdfReader::open_with_options(path, self.read_options.clone())?;
        Ok(self.finish(reader.read()?))
    }

    /// Read and extract a PDF from bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Outline> {
        let reader = PdfReader::from_bytes_with_options(data, self.read_options.clone())?;
        Ok(self.finish(reader.read()?))
    }

    fn finish(&self, layout: DocumentLayout) -> Outline {
        let result = self.extractor.extract(&layout);
        Outline { layout, result }
    }
}

/// A document's layout together with the outline extracted from it.
#[derive(Debug, Clone)]
pub struct Outline {
    /// The layout the outline was extracted from
    pub layout: DocumentLayout,
    /// Extracted title and headings
    pub result: ExtractionResult,
}

impl Outline {
    /// The persisted record for this document.
    pub fn record(&self) -> OutlineRecord {
        OutlineRecord::from(self.result.clone())
    }

    /// Serialize the persisted record.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.record(), format)
    }

    /// Title, if one was found.
    pub fn title(&self) -> Option<&str> {
        self.result.title.as_deref()
    }
}
