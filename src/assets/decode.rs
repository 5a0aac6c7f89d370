use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use anyhow::Context;

use crate::foundation::error::{LayoutError, LayoutResult};
use crate::render::frame::{RasterImage, premultiply_rgba8_in_place};

/// Raster formats accepted on the overlay path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
    Gif,
    Bmp,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::Png,
        MediaType::Jpeg,
        MediaType::Webp,
        MediaType::Gif,
        MediaType::Bmp,
    ];

    /// Parse a declared MIME type; parameters (`; charset=…`) and case are ignored.
    pub fn from_mime(mime: &str) -> LayoutResult<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Ok(MediaType::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Ok(MediaType::Jpeg),
            "image/webp" => Ok(MediaType::Webp),
            "image/gif" => Ok(MediaType::Gif),
            "image/bmp" | "image/x-ms-bmp" => Ok(MediaType::Bmp),
            _ => Err(LayoutError::unsupported_media(format!(
                "'{}' is not an accepted raster type",
                mime.trim()
            ))),
        }
    }

    /// Guess from a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> LayoutResult<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Ok(MediaType::Png),
            "jpg" | "jpeg" => Ok(MediaType::Jpeg),
            "webp" => Ok(MediaType::Webp),
            "gif" => Ok(MediaType::Gif),
            "bmp" => Ok(MediaType::Bmp),
            other => Err(LayoutError::unsupported_media(format!(
                "unknown image extension '{other}'"
            ))),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Webp => "image/webp",
            MediaType::Gif => "image/gif",
            MediaType::Bmp => "image/bmp",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            MediaType::Png => image::ImageFormat::Png,
            MediaType::Jpeg => image::ImageFormat::Jpeg,
            MediaType::Webp => image::ImageFormat::WebP,
            MediaType::Gif => image::ImageFormat::Gif,
            MediaType::Bmp => image::ImageFormat::Bmp,
        }
    }

    pub fn supports_alpha(self) -> bool {
        !matches!(self, MediaType::Jpeg)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for MediaType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_mime(s)
    }
}

/// Encoded raster bytes tagged with their format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

/// Decode `bytes` declared as `media_type` into premultiplied RGBA8.
///
/// Bytes that do not decode as the declared format are rejected even if they are some other
/// valid image.
pub fn decode_raster(bytes: &[u8], media_type: MediaType) -> LayoutResult<RasterImage> {
    let dyn_img = image::load_from_memory_with_format(bytes, media_type.image_format())
        .map_err(|e| LayoutError::unsupported_media(format!("decode {media_type}: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    RasterImage::new(width, height, rgba8_premul)
        .map_err(|e| LayoutError::unsupported_media(e.to_string()))
}

/// Encode a premultiplied raster in `media_type`.
///
/// Formats without an alpha channel are flattened onto white first.
pub fn encode_raster(img: &RasterImage, media_type: MediaType) -> LayoutResult<EncodedImage> {
    let straight = img.to_straight_rgba8();
    let rgba = image::RgbaImage::from_raw(img.width, img.height, straight)
        .ok_or_else(|| LayoutError::render("raster buffer does not match its dimensions"))?;

    let dyn_img = if media_type.supports_alpha() {
        image::DynamicImage::ImageRgba8(rgba)
    } else {
        image::DynamicImage::ImageRgb8(flatten_onto_white(img)?)
    };

    let mut bytes = Vec::new();
    dyn_img
        .write_to(&mut Cursor::new(&mut bytes), media_type.image_format())
        .with_context(|| format!("encode {media_type}"))?;

    Ok(EncodedImage { media_type, bytes })
}

fn flatten_onto_white(img: &RasterImage) -> LayoutResult<image::RgbImage> {
    let mut out = Vec::with_capacity(img.data.len() / 4 * 3);
    for px in img.data.chunks_exact(4) {
        let inv = 255 - u16::from(px[3]);
        for &c in &px[..3] {
            // Premultiplied: out = c + 255 * (1 - a).
            out.push((u16::from(c) + inv).min(255) as u8);
        }
    }
    image::RgbImage::from_raw(img.width, img.height, out)
        .ok_or_else(|| LayoutError::render("raster buffer does not match its dimensions"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
