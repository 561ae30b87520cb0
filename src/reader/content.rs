//! Content stream interpretation.
//!
//! Walks a page's operators, tracking the graphics and text state needed to
//! know where each string is drawn and at what rendered size. Glyph widths
//! are not read from font programs; advances are estimated from character
//! classes, which is enough to tell word gaps from continuations.

use std::collections::HashMap;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};
use crate::model::strip;

/// `TJ` adjustments larger than this (thousandths of an em, leftwards) are
/// treated as word spaces.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A 2D affine transform `[a b c d e f]` in PDF's row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self × other`: apply `self`, then `other`.
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit x vector.
    pub fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Length of the transformed unit y vector.
    pub fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    fn from_operands(op: &ContentOp) -> Option<Matrix> {
        Some(Matrix::new(
            op.number(0)?,
            op.number(1)?,
            op.number(2)?,
            op.number(3)?,
            op.number(4)?,
            op.number(5)?,
        ))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

/// Text drawn by one show operator, in user space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// X of the run origin
    pub x: f32,
    /// Y of the baseline
    pub y: f32,
    /// Estimated advance width
    pub width: f32,
    /// Rendered font size in points
    pub size: f32,
    /// Base font name
    pub font: String,
}

/// Everything drawn on a page that the layout stage cares about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub runs: Vec<TextRun>,
    /// Resource names of image XObjects painted with `Do`, in paint order.
    pub images: Vec<String>,
}

/// Parameters saved and restored by `q` / `Q`.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

/// Interprets one page's content stream against a backend.
pub struct ContentInterpreter<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page: PageId,
    fonts: HashMap<Vec<u8>, String>,
    images: Vec<Vec<u8>>,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    in_text: bool,
    out: PageContent,
}

impl<'a, B: PdfBackend + ?Sized> ContentInterpreter<'a, B> {
    /// Create an interpreter for `page`.
    ///
    /// `fonts` maps font resource names to base font names and `images`
    /// lists the page's image XObject names.
    pub fn new(
        backend: &'a B,
        page: PageId,
        fonts: HashMap<Vec<u8>, String>,
        images: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            backend,
            page,
            fonts,
            images,
            state: GraphicsState::default(),
            stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            in_text: false,
            out: PageContent::default(),
        }
    }

    /// Run every operation and return what was drawn.
    pub fn run(mut self, ops: &[ContentOp]) -> PageContent {
        for op in ops {
            self.apply(op);
        }
        self.out
    }

    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.stack.push(self.state.clone()),
            "Q" => {
                if let Some(saved) = self.stack.pop() {
                    self.state = saved;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.state.ctm = m.then(&self.state.ctm);
                }
            }
            "BT" => {
                self.in_text = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.font_name = self
                        .fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    self.state.font_resource = name.clone();
                }
                if let Some(size) = op.number(1) {
                    self.state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.state.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.line_matrix = m;
                    self.text_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show_string(bytes);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show_string(bytes);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    self.show_string(bytes);
                }
            }
            "Do" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    if self.images.contains(name) {
                        self.out
                            .images
                            .push(String::from_utf8_lossy(name).to_string());
                    }
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.leading;
        self.move_line(0.0, -leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page, &self.state.font_resource, bytes)
    }

    fn show_string(&mut self, bytes: &[u8]) {
        let text = self.decode(bytes);
        let advance = estimate_advance(&text) * self.state.font_size;
        self.emit(text, advance);
    }

    fn show_array(&mut self, items: &[PdfValue]) {
        let mut combined = String::new();
        let mut advance = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    let text = self.decode(bytes);
                    advance += estimate_advance(&text) * self.state.font_size;
                    combined.push_str(&text);
                }
                other => {
                    let Some(adjustment) = other.as_number() else {
                        continue;
                    };
                    advance -= adjustment / 1000.0 * self.state.font_size;
                    if -adjustment > TJ_SPACE_THRESHOLD {
                        match combined.chars().last() {
                            Some(c) if !c.is_whitespace() && !is_spaceless_script_char(c) => {
                                combined.push(' ')
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        self.emit(combined, advance);
    }

    /// Record a run at the current text position and advance past it.
    fn emit(&mut self, text: String, advance: f32) {
        if self.in_text && !strip(&text).is_empty() {
            let rendering = self.text_matrix.then(&self.state.ctm);
            self.out.runs.push(TextRun {
                text,
                x: rendering.e,
                y: rendering.f,
                width: advance * rendering.horizontal_scale(),
                size: self.state.font_size * rendering.vertical_scale(),
                font: self.state.font_name.clone(),
            });
        }
        self.text_matrix = Matrix::translation(advance, 0.0).then(&self.text_matrix);
    }
}

/// Estimated advance of `text` in ems.
fn estimate_advance(text: &str) -> f32 {
    text.chars()
        .map(|c| {
            if c == ' ' {
                0.25
            } else if is_spaceless_script_char(c) {
                1.0
            } else {
                0.5
            }
        })
        .sum()
}

/// Check if a character belongs to a script written without word spaces.
///
/// Chinese and Japanese don't use spaces between words; Korean does, so
/// Hangul is not included.
pub fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // CJK Unified Ideographs Extension B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
