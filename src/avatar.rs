//! Profile picture upload.
//!
//! An upload is checked, fitted into a square box and stored in the
//! settings store as a JPEG data URL under [`PROFILE_PICTURE_KEY`]. The
//! stored picture takes precedence over `profile.avatar` from the content
//! document; with neither, a generated initials badge is shown.
//!
//! ## Processing
//!
//! | Step | Rule |
//! |---|---|
//! | Size | reject uploads larger than `avatar.max_bytes` (5 MiB) |
//! | Type | sniff the bytes with `image::guess_format`; unknown → rejected |
//! | Fit | shrink (never enlarge) to fit a `size`×`size` box, aspect kept |
//! | Canvas | centre on an opaque white `size`×`size` square |
//! | Encode | JPEG at `avatar.quality`, base64 data URL |

use crate::config::AvatarConfig;
use crate::settings::{PROFILE_PICTURE_KEY, SettingsError, SettingsStore};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Image size should be less than {limit_mb}MB (got {size} bytes)")]
    TooLarge { size: u64, limit_mb: u64 },
    #[error("Please select a valid image file")]
    NotAnImage,
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Could not encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Check size and type. Returns the sniffed format.
pub fn validate(bytes: &[u8], config: &AvatarConfig) -> Result<image::ImageFormat, AvatarError> {
    let size = bytes.len() as u64;
    if size > config.max_bytes {
        return Err(AvatarError::TooLarge {
            size,
            limit_mb: config.max_bytes / (1024 * 1024),
        });
    }
    image::guess_format(bytes).map_err(|_| AvatarError::NotAnImage)
}

/// Dimensions of a `width`×`height` image shrunk to fit a `bound` square.
/// Images already inside the box keep their size.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let (w, h) = (width as f64, height as f64);
    let b = bound as f64;
    let (w, h) = if width > height {
        if width > bound { (b, h * b / w) } else { (w, h) }
    } else if height > bound {
        (w * b / h, b)
    } else {
        (w, h)
    };
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

/// Validate, fit and encode an upload. Returns the data URL to store.
pub fn process_upload(bytes: &[u8], config: &AvatarConfig) -> Result<String, AvatarError> {
    let format = validate(bytes, config)?;
    let img = image::load_from_memory_with_format(bytes, format).map_err(AvatarError::Decode)?;

    let (w, h) = fit_within(img.width(), img.height(), config.size);
    let fitted = if (w, h) == (img.width(), img.height()) {
        img.to_rgba8()
    } else {
        imageops::resize(&img.to_rgba8(), w, h, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(config.size, config.size, Rgba([255, 255, 255, 255]));
    let x = (config.size - w) / 2;
    let y = (config.size - h) / 2;
    imageops::overlay(&mut canvas, &fitted, x as i64, y as i64);
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, config.quality);
    rgb.write_with_encoder(encoder).map_err(AvatarError::Encode)?;

    tracing::debug!(
        source = ?format,
        width = w,
        height = h,
        bytes = jpeg.len(),
        "processed profile picture"
    );
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)))
}

/// Up to two initials from `name`, uppercased.
fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() { "?".to_string() } else { letters }
}

/// Gradient badge with the author's initials, as an SVG data URL.
pub fn default_avatar(author: &str) -> String {
    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300" viewBox="0 0 300 300">"#,
            r#"<defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1">"#,
            r##"<stop offset="0" stop-color="#667eea"/><stop offset="0.5" stop-color="#764ba2"/>"##,
            r##"<stop offset="1" stop-color="#f093fb"/></linearGradient></defs>"##,
            r#"<rect width="300" height="300" fill="url(#g)"/>"#,
            r#"<text x="150" y="150" fill="white" font-family="Inter, sans-serif" font-size="120" "#,
            r#"font-weight="bold" text-anchor="middle" dominant-baseline="central">{}</text></svg>"#
        ),
        initials(author)
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Source for the avatar `img`: stored upload, then the content document's
/// avatar, then the generated default.
pub fn resolve_avatar(stored: Option<&str>, content_avatar: Option<&str>, author: &str) -> String {
    [stored, content_avatar]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_avatar(author))
}

/// The stored profile picture in a settings store.
pub struct ProfilePicture<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> ProfilePicture<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored data URL, if an upload has been saved.
    pub fn load(&self) -> Option<String> {
        self.store.get(PROFILE_PICTURE_KEY).filter(|v| !v.is_empty())
    }

    /// Process and persist an upload. Nothing is stored on error.
    pub fn upload(&mut self, bytes: &[u8], config: &AvatarConfig) -> Result<String, AvatarError> {
        let data_url = process_upload(bytes, config)?;
        self.store.set(PROFILE_PICTURE_KEY, &data_url)?;
        Ok(data_url)
    }

    pub fn clear(&mut self) -> Result<(), AvatarError> {
        self.store.remove(PROFILE_PICTURE_KEY)?;
        Ok(())
    }

    pub fn resolve(&self, content_avatar: Option<&str>, author: &str) -> String {
        resolve_avatar(self.load().as_deref(), content_avatar, author)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
