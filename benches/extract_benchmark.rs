//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf_outline::{Block, DocumentLayout, HeadingExtractor, Line, PageLayout, Span};

/// Creates a synthetic PDF whose pages carry a heading hierarchy and body text.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    let mut offsets = Vec::new();

    content.push_str("%PDF-1.4\n");

    offsets.push(content.len());
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 4)).collect();
    offsets.push(content.len());
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    ));

    offsets.push(content.len());
    content.push_str(
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
    );

    for i in 0..page_count {
        let page_obj = i * 2 + 4;
        let content_obj = page_obj + 1;

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let mut text = format!(
            "BT /F1 18 Tf 72 740 Td (Chapter {}) Tj ET\n\
             BT /F1 14 Tf 72 700 Td (Section {}.1) Tj ET\n",
            i + 1,
            i + 1
        );
        for row in 0..30 {
            text.push_str(&format!(
                "BT /F1 10 Tf 72 {} Td (Body text line {} on page {}.) Tj ET\n",
                680 - row * 14,
                row + 1,
                i + 1
            ));
        }

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len() + 1,
            text
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", offsets.len() + 1));
    content.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        content.push_str(&format!("{:010} 00000 n \n", offset));
    }

    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_offset
    ));

    content.into_bytes()
}

/// Creates a layout with one title, three heading tiers and body text per page.
fn create_test_layout(page_count: u32) -> DocumentLayout {
    let mut doc = DocumentLayout::new();
    for number in 1..=page_count {
        let mut lines = vec![
            Line::new(vec![Span::new(format!("Chapter {number}"), 18.0)]),
            Line::new(vec![Span::new(format!("Section {number}.1"), 14.0)]),
            Line::new(vec![Span::new(format!("Topic {number}.1.1"), 12.0)]),
        ];
        for row in 0..40 {
            lines.push(Line::new(vec![
                Span::new(format!("Body text line {row}"), 10.0),
                Span::new(" ", 10.0),
            ]));
        }

        let mut page = PageLayout::new(number);
        page.push(Block::text(lines));
        doc.push(page);
    }
    doc.pages[0]
        .blocks
        .insert(0, Block::text(vec![Line::new(vec![Span::new("Benchmark Report", 24.0)])]));
    doc
}

/// Benchmark PDF header sniffing.
fn bench_header_sniffing(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("sniff_valid_pdf", |b| {
        b.iter(|| pdf_outline::sniff_bytes(black_box(&pdf_data)).is_ok());
    });

    c.bench_function("sniff_non_pdf", |b| {
        b.iter(|| pdf_outline::sniff_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark the heading heuristic alone.
fn bench_heading_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("heading_extraction");
    let extractor = HeadingExtractor::new();

    for page_count in [1, 10, 100] {
        let layout = create_test_layout(page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&layout)));
        });
    }

    group.finish();
}

/// Benchmark reading and extraction end to end.
fn bench_pdf_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_extraction");

    for page_count in [1, 5, 10] {
        let data = create_test_pdf(page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = pdf_outline::Outliner::new()
                    .lenient()
                    .extract_bytes(black_box(&data));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_header_sniffing,
    bench_heading_extraction,
    bench_pdf_extraction,
);
criterion_main!(benches);
