//! PDF fixtures synthesized with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text drawn at an absolute position.
pub struct TextLine {
    pub text: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
}

pub fn line(text: &'static str, size: i64, x: i64, y: i64) -> TextLine {
    TextLine { text, size, x, y }
}

/// Content of one synthesized page.
#[derive(Default)]
pub struct PageSpec {
    pub lines: Vec<TextLine>,
    /// Paint a 1x1 image XObject named `Im1`
    pub image: bool,
}

impl PageSpec {
    pub fn text(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            image: false,
        }
    }

    pub fn with_image(mut self) -> Self {
        self.image = true;
        self
    }
}

fn page_operations(page: &PageSpec) -> Vec<Operation> {
    let mut ops = Vec::new();
    for l in &page.lines {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["F1".into(), l.size.into()]));
        ops.push(Operation::new("Td", vec![l.x.into(), l.y.into()]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
        ops.push(Operation::new("ET", vec![]));
    }
    if page.image {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                100.into(),
                0.into(),
                0.into(),
                100.into(),
                72.into(),
                72.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec!["Im1".into()]));
        ops.push(Operation::new("Q", vec![]));
    }
    ops
}

/// Build a PDF whose pages draw the given lines with Helvetica.
pub fn build_pdf(pages: &[PageSpec]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1,
            "Height" => 1,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        vec![0x80],
    ));

    let mut kids = Vec::new();
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let data = content.encode().expect("content encodes");
        let content_id = doc.add_object(Stream::new(dictionary! {}, data));

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("document saves");
    buf
}

/// Two-page report using four distinct sizes (24/18/14/10pt).
pub fn four_tier_report() -> Vec<u8> {
    build_pdf(&[
        PageSpec::text(vec![
            line("Annual Report", 24, 72, 740),
            line("Introduction", 18, 72, 690),
            line("Background", 14, 72, 650),
            line("This is body text.", 10, 72, 620),
        ]),
        PageSpec::text(vec![
            line("Methods", 18, 72, 740),
            line("More body text here.", 10, 72, 700),
        ])
        .with_image(),
    ])
}
