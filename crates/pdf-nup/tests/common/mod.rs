#![allow(dead_code)]

use image::{Rgb, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_nup::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Distinct, never-white colour for each page index
pub fn page_colour(page: usize) -> Rgb<u8> {
    Rgb([
        (37 * page % 200) as u8,
        (91 * page % 200) as u8,
        (page % 7 * 30) as u8,
    ])
}

pub fn assert_colour(actual: &Rgb<u8>, expected: Rgb<u8>) {
    for channel in 0..3 {
        let diff = (actual[channel] as i32 - expected[channel] as i32).abs();
        assert!(diff <= 2, "expected {:?}, got {:?}", expected, actual);
    }
}

/// Paints every page as a solid US Letter sized image in its own colour
pub struct ColourRenderer {
    pub page_count: usize,
    pub fail_on: Option<usize>,
    pub rendered: Mutex<Vec<usize>>,
}

impl ColourRenderer {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            fail_on: None,
            rendered: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(page_count: usize, page: usize) -> Self {
        Self {
            fail_on: Some(page),
            ..Self::new(page_count)
        }
    }

    pub fn rendered(&self) -> Vec<usize> {
        self.rendered.lock().unwrap().clone()
    }
}

impl PageRenderer for ColourRenderer {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render(&self, page_index: usize, dpi: u32) -> Result<RgbImage> {
        if self.fail_on == Some(page_index) {
            return Err(NupError::Render(format!("page {page_index} is broken")));
        }
        self.rendered.lock().unwrap().push(page_index);
        let width = (8.5 * dpi as f32) as u32;
        let height = (11.0 * dpi as f32) as u32;
        Ok(RgbImage::from_pixel(width, height, page_colour(page_index)))
    }
}

/// Opens any path as a colour renderer; paths in `broken` fail on their second page
#[derive(Default)]
pub struct ColourBackend {
    pub broken: HashSet<PathBuf>,
    pub page_counts: Vec<(PathBuf, usize)>,
}

impl ColourBackend {
    pub fn with_broken(path: impl Into<PathBuf>) -> Self {
        let mut backend = Self::default();
        backend.broken.insert(path.into());
        backend
    }
}

impl RenderBackend for ColourBackend {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageRenderer + 'a>> {
        let page_count = self
            .page_counts
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, count)| *count)
            .unwrap_or(64);
        if self.broken.contains(path) {
            Ok(Box::new(ColourRenderer::failing_on(page_count, 1)))
        } else {
            Ok(Box::new(ColourRenderer::new(page_count)))
        }
    }
}

pub fn item(name: &str, page_count: usize) -> BatchItem {
    BatchItem::new(PageSource {
        path: PathBuf::from(name),
        page_count,
    })
}

/// Pixel at the centre of a slot on a sheet rendered at `dpi`
pub fn slot_centre_pixel(sheet: &RgbImage, slot: &Slot, dpi: u32) -> Rgb<u8> {
    let scale = dpi as f32 / 72.0;
    let x = (slot.center_x() * scale) as u32;
    let y = sheet.height() - (slot.center_y() * scale) as u32;
    *sheet.get_pixel(x, y)
}

pub fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn write_test_pdf(path: &Path, num_pages: usize) {
    let mut doc = create_test_pdf(num_pages);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}
