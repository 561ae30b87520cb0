//! Grouping of positioned text runs into lines and blocks.
//!
//! Positions are used here only to rebuild the page → block → line → span
//! hierarchy; they are dropped before the layout reaches the extractor.

use crate::model::{Block, FontSize, Line, Span};

use super::content::{is_spaceless_script_char, TextRun};

/// Baselines within this fraction of the run size share a line.
const LINE_Y_TOLERANCE: f32 = 0.3;
/// Gaps wider than this fraction of the size separate words inside a span.
const WORD_GAP_RATIO: f32 = 0.15;
/// Spacing above this multiple of the average starts a new block.
const BLOCK_SPACING_RATIO: f32 = 1.5;
/// Size change (points) between lines that starts a new block.
const BLOCK_SIZE_CHANGE: f32 = 1.0;
/// Left edge shift (points) between lines that starts a new block.
const BLOCK_INDENT_CHANGE: f32 = 20.0;
const DEFAULT_LINE_SPACING: f32 = 12.0;

/// Runs sharing a baseline, ordered left to right.
#[derive(Debug, Clone)]
pub struct RunLine {
    pub runs: Vec<TextRun>,
    /// Baseline of the first run
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Character-weighted average size
    pub size: f32,
}

impl RunLine {
    fn from_runs(mut runs: Vec<TextRun>) -> Self {
        runs.sort_by(|a, b| a.x.total_cmp(&b.x));

        let total_chars: usize = runs.iter().map(|r| r.text.chars().count()).sum();
        let weighted: f32 = runs
            .iter()
            .map(|r| r.size * r.text.chars().count() as f32)
            .sum();
        let size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            runs.first().map_or(0.0, |r| r.size)
        };

        let y = runs.first().map_or(0.0, |r| r.y);
        let x = runs.first().map_or(0.0, |r| r.x);

        Self { runs, y, x, size }
    }

    /// Merge adjacent runs that share font and rounded size into spans.
    pub fn into_line(self) -> Line {
        let mut merged: Vec<TextRun> = Vec::with_capacity(self.runs.len());

        for run in self.runs {
            match merged.last_mut() {
                Some(prev)
                    if prev.font == run.font
                        && FontSize::from_points(prev.size) == FontSize::from_points(run.size) =>
                {
                    if needs_word_space(prev, &run) {
                        prev.text.push(' ');
                    }
                    prev.text.push_str(&run.text);
                    prev.width = (run.x + run.width - prev.x).max(prev.width);
                }
                _ => merged.push(run),
            }
        }

        Line::new(
            merged
                .into_iter()
                .map(|r| Span::new(r.text, r.size))
                .collect(),
        )
    }
}

fn needs_word_space(prev: &TextRun, next: &TextRun) -> bool {
    let gap = next.x - (prev.x + prev.width);
    if gap <= next.size * WORD_GAP_RATIO {
        return false;
    }

    let (Some(last), Some(first)) = (prev.text.chars().last(), next.text.chars().next()) else {
        return false;
    };
    if last.is_whitespace() || first.is_whitespace() {
        return false;
    }
    !(is_spaceless_script_char(last) && is_spaceless_script_char(first))
}

/// Group runs into lines, top to bottom.
pub fn group_runs_into_lines(mut runs: Vec<TextRun>) -> Vec<RunLine> {
    // PDF y grows upwards: sort descending for reading order.
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let tolerance = run.size * LINE_Y_TOLERANCE;
        match current_y {
            Some(y) if (run.y - y).abs() <= tolerance => current.push(run),
            _ => {
                if !current.is_empty() {
                    lines.push(RunLine::from_runs(std::mem::take(&mut current)));
                }
                current_y = Some(run.y);
                current.push(run);
            }
        }
    }

    if !current.is_empty() {
        lines.push(RunLine::from_runs(current));
    }

    lines
}

/// Group lines into blocks based on spacing, size and indentation changes.
pub fn group_lines_into_blocks(lines: Vec<RunLine>) -> Vec<Vec<RunLine>> {
    let avg_spacing = average_line_spacing(&lines);

    let mut blocks: Vec<Vec<RunLine>> = Vec::new();
    let mut current: Vec<RunLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(std::mem::take(&mut current));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Build text blocks for a page from its runs.
pub fn build_text_blocks(runs: Vec<TextRun>) -> Vec<Block> {
    let lines = group_runs_into_lines(runs);
    group_lines_into_blocks(lines)
        .into_iter()
        .map(|lines| Block::text(lines.into_iter().map(RunLine::into_line).collect()))
        .collect()
}

fn average_line_spacing(lines: &[RunLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return DEFAULT_LINE_SPACING;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &RunLine, curr: &RunLine, avg_spacing: f32) -> bool {
    (prev.y - curr.y).abs() > avg_spacing * BLOCK_SPACING_RATIO
        || (prev.size - curr.size).abs() > BLOCK_SIZE_CHANGE
        || (prev.x - curr.x).abs() > BLOCK_INDENT_CHANGE
}
