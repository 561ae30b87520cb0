//! PDF document reader using lopdf.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::detect::{sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::model::{Block, DocumentLayout, PageLayout};

use super::backend::{LopdfBackend, PdfBackend};
use super::content::ContentInterpreter;
use super::layout::build_text_blocks;
use super::options::{ErrorMode, ReadOptions};

/// Reads a PDF into a [`DocumentLayout`].
pub struct PdfReader<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ReadOptions,
}

impl PdfReader<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReadOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();

        let header = sniff_path(path)?;
        log::debug!("Opening {} ({})", path.display(), header);

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::loaded(backend, options))
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ReadOptions::default())
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ReadOptions) -> Result<Self> {
        sniff_bytes(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::loaded(backend, options))
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ReadOptions::default())
    }

    /// Read a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ReadOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn loaded(backend: LopdfBackend, options: ReadOptions) -> Self {
        // lopdf decrypts documents with an empty user password on load;
        // anything else comes through as unreadable page content.
        if backend.is_encrypted() {
            log::warn!("Document is encrypted; page text may be unreadable");
        }
        Self { backend, options }
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.backend.is_encrypted()
    }

    /// PDF version from the document header.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

impl<B: PdfBackend> PdfReader<B> {
    /// Create a reader over any backend.
    pub fn with_backend(backend: B, options: ReadOptions) -> Self {
        Self { backend, options }
    }

    /// Total number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Options this reader was created with.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read the selected pages in page order.
    pub fn read(&self) -> Result<DocumentLayout> {
        let mut layout = DocumentLayout::new();

        for page_num in self.backend.pages().into_keys() {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            match self.read_page(page_num) {
                Ok(page) => layout.push(page),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to read page {}: {}", page_num, e);
                    layout.push(PageLayout::new(page_num));
                }
            }
        }

        log::debug!("Read {} page(s)", layout.page_count());
        Ok(layout)
    }

    /// Read a single page (1-indexed).
    pub fn read_page(&self, page_num: u32) -> Result<PageLayout> {
        let pages = self.backend.pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let fonts: HashMap<Vec<u8>, String> = self
            .backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|f| (f.name, f.base_font))
            .collect();
        let images = self.backend.page_images(page_id)?;

        let data = self.backend.page_content(page_id)?;
        let ops = self
            .backend
            .decode_content(&data)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;

        let content = ContentInterpreter::new(&self.backend, page_id, fonts, images).run(&ops);
        log::trace!(
            "Page {}: {} run(s), {} image(s)",
            page_num,
            content.runs.len(),
            content.images.len()
        );

        let mut page = PageLayout::new(page_num);
        for block in build_text_blocks(content.runs) {
            page.push(block);
        }
        for name in content.images {
            page.push(Block::image(name));
        }

        Ok(page)
    }
}
