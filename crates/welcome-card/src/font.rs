//! Greeting text rendering on top of imageproc, with an embedded fallback face.

use std::path::Path;

use ab_glyph::{Font, FontRef, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, warn};

/// DejaVu Sans Mono, used whenever the configured font cannot be loaded.
static FALLBACK_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// Font used for the greeting line.
#[derive(Debug)]
pub enum WelcomeFont {
    Configured { font: FontVec, scale: PxScale },
    Fallback { font: FontRef<'static>, scale: PxScale },
}

impl WelcomeFont {
    /// Loads the configured font, substituting the embedded face if the file
    /// is missing or cannot be parsed.
    pub fn load(path: &Path, size: f32) -> Self {
        match Self::from_path(path, size) {
            Ok(font) => font,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Font unavailable, using built-in fallback font"
                );
                Self::fallback(size)
            }
        }
    }

    pub fn from_path(path: &Path, size: f32) -> eyre::Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| eyre::eyre!("read font file {}: {}", path.display(), e))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| eyre::eyre!("parse font file {}: {}", path.display(), e))?;
        debug!(path = %path.display(), size, "Loaded TrueType font");
        Ok(Self::Configured {
            font,
            scale: PxScale::from(size),
        })
    }

    pub fn fallback(size: f32) -> Self {
        let font = FontRef::try_from_slice(FALLBACK_FONT)
            .expect("embedded fallback font is a valid TrueType file");
        Self::Fallback {
            font,
            scale: PxScale::from(size),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Width and height of the line box `text` occupies when drawn.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::Configured { font, scale } => line_box(font, *scale, text),
            Self::Fallback { font, scale } => line_box(font, *scale, text),
        }
    }

    /// Draws `text` with its line box's top-left corner at `origin`.
    pub fn draw_text(&self, canvas: &mut RgbaImage, origin: (i32, i32), text: &str, color: [u8; 3]) {
        let [r, g, b] = color;
        let color = Rgba([r, g, b, u8::MAX]);
        let (x, y) = origin;
        match self {
            Self::Configured { font, scale } => draw_text_mut(canvas, color, x, y, *scale, font, text),
            Self::Fallback { font, scale } => draw_text_mut(canvas, color, x, y, *scale, font, text),
        }
    }
}

/// Advance width from imageproc's layout, height from ascent to descent.
fn line_box(font: &impl Font, scale: PxScale, text: &str) -> (u32, u32) {
    let (width, _) = text_size(scale, font, text);
    let scaled = font.as_scaled(scale);
    let height = (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32;
    (width, height)
}
