use crate::fonts::{Font, encode_win_ansi, text_width};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// An RGB colour with 8-bit channels.
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];

/// A decoded 8-bit RGB image, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    /// Height of the image when drawn `width` units wide.
    pub fn scaled_height(&self, width: f32) -> f32 {
        if self.width == 0 {
            0.0
        } else {
            width * self.height as f32 / self.width as f32
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Document-level metadata written to the PDF `Info` dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    /// `D:YYYYMMDDHHmmSS`.
    pub creation_date: String,
}

#[derive(Default)]
struct PageBuffer {
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

/// A paginated drawing surface backed by lopdf.
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
/// Pages are buffered in memory and only serialized by [`PdfCanvas::finish`].
pub struct PdfCanvas {
    doc: Document,
    pages_id: ObjectId,
    fonts_id: ObjectId,
    width: f32,
    height: f32,
    pages: Vec<PageBuffer>,
    image_count: usize,
}

impl PdfCanvas {
    /// Starts a document with a single blank page of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut fonts = Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let fonts_id = doc.add_object(fonts);

        Self {
            doc,
            pages_id,
            fonts_id,
            width,
            height,
            pages: vec![PageBuffer::default()],
            image_count: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn new_page(&mut self) {
        self.pages.push(PageBuffer::default());
    }

    fn page(&mut self) -> &mut PageBuffer {
        if self.pages.is_empty() {
            self.pages.push(PageBuffer::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.page().operations.push(Operation::new(operator, operands));
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push("rg", color_operands(color));
        self.push("re", vec![real(x), real(y), real(width), real(height)]);
        self.push("f", vec![]);
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb) {
        self.push("RG", color_operands(color));
        self.push("w", vec![real(width)]);
        self.push("m", vec![real(from.0), real(from.1)]);
        self.push("l", vec![real(to.0), real(to.1)]);
        self.push("S", vec![]);
    }

    /// Draws `text` with its baseline starting at (`x`, `y`).
    pub fn text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Rgb) {
        self.push("rg", color_operands(color));
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![Object::Name(font.resource_name().to_vec()), real(size)],
        );
        self.push("Td", vec![real(x), real(y)]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    /// Draws `text` aligned relative to `x`.
    pub fn aligned_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Rgb,
        align: TextAlign,
    ) {
        let width = text_width(text, font, size);
        let start = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        self.text(start, y, text, font, size, color);
    }

    pub fn centered_text(&mut self, center_x: f32, y: f32, text: &str, font: Font, size: f32, color: Rgb) {
        self.aligned_text(center_x, y, text, font, size, color, TextAlign::Center);
    }

    /// Places `image` with its bottom-left corner at (`x`, `y`), stretched to `width` x `height`.
    pub fn image(&mut self, image: &RasterImage, x: f32, y: f32, width: f32, height: f32) {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width),
                "Height" => i64::from(image.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            image.rgb.clone(),
        );
        let image_id = self.doc.add_object(stream);
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.page().xobjects.set(name.as_bytes(), image_id);

        self.push("q", vec![]);
        self.push(
            "cm",
            vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
    }

    /// Serializes every page into a complete PDF byte buffer.
    pub fn finish(mut self, info: &DocumentInfo, compress: bool) -> Result<Vec<u8>, lopdf::Error> {
        let mut kids = Vec::with_capacity(self.pages.len());
        for page in std::mem::take(&mut self.pages) {
            let content = Content {
                operations: page.operations,
            };
            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), content.encode()?));
            let resources_id = self.doc.add_object(dictionary! {
                "Font" => self.fonts_id,
                "XObject" => page.xobjects,
            });
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![real(0.0), real(0.0), real(self.width), real(self.height)],
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(&info.title), StringFormat::Literal),
            "Producer" => Object::string_literal("vaic"),
            "CreationDate" => Object::string_literal(info.creation_date.as_str()),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        if compress {
            self.doc.compress();
        }

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn color_operands(color: Rgb) -> Vec<Object> {
    color
        .iter()
        .map(|&channel| real(f32::from(channel) / 255.0))
        .collect()
}
