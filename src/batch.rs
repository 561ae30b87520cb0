//! Directory batch driver.
//!
//! Walks an input directory, extracts every PDF and writes one JSON record
//! per document into an output directory. A failing document is logged and
//! recorded in its [`DocumentOutcome`]; the rest of the batch carries on.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::HeadingExtractor;
use crate::model::OutlineRecord;
use crate::reader::{PdfReader, ReadOptions};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for `.pdf` files
    pub input_dir: PathBuf,

    /// Directory receiving one `.json` file per input
    pub output_dir: PathBuf,

    /// Options used to read each document
    pub read_options: ReadOptions,

    /// JSON layout of the written records
    pub format: JsonFormat,

    /// Process documents on rayon's thread pool
    pub parallel: bool,
}

impl BatchOptions {
    /// Create batch options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set read options.
    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// Set JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            read_options: ReadOptions::new().lenient(),
            format: JsonFormat::Pretty,
            parallel: true,
        }
    }
}

/// Result of processing one input file.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    /// `None` when the record was written
    pub error: Option<Error>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a batch run, in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of documents written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed outcomes, in discovery order.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Total number of documents processed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// List the PDF files directly inside `dir`, sorted by path.
///
/// The extension match is ASCII case-insensitive; subdirectories are not
/// descended into.
pub fn discover_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if has_pdf_extension(&path) {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Output path for `input`: its file stem with a `.json` extension.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input.file_name().map(PathBuf::from).unwrap_or_default();
    output_dir.join(name).with_extension("json")
}

/// Extract and write a single document.
pub fn process_document(input: &Path, output: &Path, options: &BatchOptions) -> Result<()> {
    let reader = PdfReader::open_with_options(input, options.read_options.clone())?;
    let layout = reader.read()?;
    let record = OutlineRecord::from(HeadingExtractor::new().extract(&layout));

    log::debug!(
        "{}: {} heading(s), title {:?}",
        input.display(),
        record.outline.len(),
        record.title
    );

    let json = to_json(&record, options.format)?;
    write_atomic(output, input, json.as_bytes())
}

/// Write to a temporary sibling named after the input, then rename it over
/// the target.
fn write_atomic(target: &Path, input: &Path, data: &[u8]) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let tmp_name = format!(
        ".{}.tmp",
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    let tmp = dir.join(tmp_name);

    fs::write(&tmp, data)?;
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Run a batch over `options.input_dir`.
pub fn run_batch(options: &BatchOptions) -> Result<BatchReport> {
    run_batch_with_progress(options, |_| {})
}

/// Run a batch, calling `on_done` after each document finishes.
///
/// `on_done` may be called from rayon worker threads.
pub fn run_batch_with_progress<F>(options: &BatchOptions, on_done: F) -> Result<BatchReport>
where
    F: Fn(&DocumentOutcome) + Sync,
{
    fs::create_dir_all(&options.output_dir)?;
    let inputs = discover_inputs(&options.input_dir)?;

    log::info!(
        "Processing {} PDF(s) from {}",
        inputs.len(),
        options.input_dir.display()
    );

    let process = |input: &PathBuf| {
        let output = output_path_for(input, &options.output_dir);
        let error = process_document(input, &output, options).err();
        if let Some(e) = &error {
            log::warn!("Failed to process {}: {}", input.display(), e);
        }
        let outcome = DocumentOutcome {
            input: input.clone(),
            output,
            error,
        };
        on_done(&outcome);
        outcome
    };

    let outcomes: Vec<DocumentOutcome> = if options.parallel {
        inputs.par_iter().map(process).collect()
    } else {
        inputs.iter().map(process).collect()
    };

    let report = BatchReport { outcomes };
    log::info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_for() {
        let out = Path::new("/out");
        assert_eq!(
            output_path_for(Path::new("/in/report.pdf"), out),
            PathBuf::from("/out/report.json")
        );
        assert_eq!(
            output_path_for(Path::new("/in/Scan.PDF"), out),
            PathBuf::from("/out/Scan.json")
        );
        assert_eq!(
            output_path_for(Path::new("/in/v1.2.final.pdf"), out),
            PathBuf::from("/out/v1.2.final.json")
        );
    }

    #[test]
    fn test_discover_inputs_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak", "noext"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let inputs = discover_inputs(dir.path()).unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_discover_inputs_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            discover_inputs(dir.path().join("missing")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_batch_options_defaults() {
        let options = BatchOptions::default();
        assert_eq!(options.input_dir, PathBuf::from("input"));
        assert_eq!(options.output_dir, PathBuf::from("output"));
        assert_eq!(
            options.read_options.error_mode,
            crate::reader::ErrorMode::Lenient
        );
        assert_eq!(options.format, JsonFormat::Pretty);
        assert!(options.parallel);
        assert!(!BatchOptions::new("i", "o").sequential().parallel);
    }

    #[test]
    fn test_write_atomic_replaces_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("doc.json");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, Path::new("doc.pdf"), b"new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!dir.path().join(".doc.pdf.tmp").exists());
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            outcomes: vec![
                DocumentOutcome {
                    input: "a.pdf".into(),
                    output: "a.json".into(),
                    error: None,
                },
                DocumentOutcome {
                    input: "b.pdf".into(),
                    output: "b.json".into(),
                    error: Some(Error::UnknownFormat),
                },
            ],
        };
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().next().unwrap().input, PathBuf::from("b.pdf"));
    }
}
