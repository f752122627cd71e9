//! PDF output sink
//!
//! Each placed page becomes a Flate-compressed DeviceRGB image XObject
//! drawn into its rectangle on the current sheet.

use crate::layout::Rect;
use crate::types::*;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::io::Write;
use std::path::Path;

/// Destination for composed sheets
pub trait SheetWriter {
    /// Draw `image` stretched to exactly `rect` (sheet points, bottom-left origin)
    fn place_image(&mut self, image: &RgbImage, rect: Rect) -> Result<()>;

    /// Close the current sheet and start a new, empty one
    fn finish_sheet(&mut self) -> Result<()>;
}

/// Builds a multi-page PDF one sheet at a time
pub struct PdfSheetWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    width_pt: f32,
    height_pt: f32,
    content: String,
    xobjects: Dictionary,
}

impl PdfSheetWriter {
    pub fn new(width_pt: f32, height_pt: f32) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            width_pt,
            height_pt,
            content: String::new(),
            xobjects: Dictionary::new(),
        }
    }

    /// Sheets finalized so far
    pub fn sheet_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Finish the document and return it
    pub fn into_document(mut self) -> Document {
        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let count = kids.len() as i64;

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.document.trailer.set("Root", catalog_id);

        self.document
    }

    /// Serialize the document to `path`.
    ///
    /// The bytes go to a temporary file next to `path` which is only renamed
    /// into place once fully written, so a failure never leaves a truncated
    /// file behind.
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut document = self.into_document();

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SheetWriter for PdfSheetWriter {
    fn place_image(&mut self, image: &RgbImage, rect: Rect) -> Result<()> {
        let name = format!("Im{}", self.xobjects.len());
        let image_id = self.document.add_object(image_xobject(image)?);
        self.xobjects.set(name.clone(), Object::Reference(image_id));

        self.content.push_str(&format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            rect.width, rect.height, rect.x, rect.y, name
        ));
        Ok(())
    }

    fn finish_sheet(&mut self) -> Result<()> {
        let content = std::mem::take(&mut self.content);
        let xobjects = std::mem::replace(&mut self.xobjects, Dictionary::new());

        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width_pt),
                Object::Real(self.height_pt),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }
}

fn image_xobject(image: &RgbImage) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(image.as_raw())?;
    let data = encoder.finish()?;

    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
            "Filter" => "FlateDecode",
        },
        data,
    );
    Ok(stream.with_compression(false))
}
