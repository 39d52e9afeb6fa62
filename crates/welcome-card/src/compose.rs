use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageError, ImageFormat, Luma, RgbaImage};
use tracing::{debug, error};

use crate::config::WelcomeConfig;
use crate::error::{ComposeError, Result};
use crate::font::WelcomeFont;

pub fn welcome_text(display_name: &str) -> String {
    format!("Welcome, {display_name}!")
}

/// Composes the welcome card for a member, logging and returning `None` on
/// any failure so the caller can fall back to a text greeting.
pub fn create_welcome_image<E: Display>(
    display_name: &str,
    avatar: std::result::Result<&[u8], E>,
    config: &WelcomeConfig,
) -> Option<Vec<u8>> {
    let result = match avatar {
        Ok(bytes) => compose_welcome_image(display_name, bytes, config),
        Err(e) => Err(ComposeError::avatar_fetch(e.to_string())),
    };

    match result {
        Ok(png) => Some(png),
        Err(e) => {
            error!("Welcome image for {} not created: {}", display_name, e);
            None
        }
    }
}

/// Builds the PNG-encoded welcome card: background, circular avatar, greeting.
pub fn compose_welcome_image(
    display_name: &str,
    avatar: &[u8],
    config: &WelcomeConfig,
) -> Result<Vec<u8>> {
    let mut canvas = load_background(&config.welcome_background_image)?;

    let avatar = image::load_from_memory(avatar)
        .map_err(|e| ComposeError::avatar_fetch(format!("decode avatar image: {e}")))?;
    let avatar = circular_avatar(&avatar, config.avatar_size);

    let [x, y] = config.avatar_position;
    imageops::overlay(&mut canvas, &avatar, i64::from(x), i64::from(y));

    let font = WelcomeFont::load(&config.font_path, config.font_size);
    let [tx, ty] = config.text_position;
    font.draw_text(&mut canvas, (tx, ty), &welcome_text(display_name), config.text_color);

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    debug!(bytes = png.len(), "Composed welcome image for {}", display_name);
    Ok(png)
}

/// Stretches the avatar to `size` and masks it to the inscribed ellipse.
pub fn circular_avatar(avatar: &DynamicImage, size: [u32; 2]) -> RgbaImage {
    let [width, height] = size;
    let mut resized = imageops::resize(&avatar.to_rgba8(), width, height, FilterType::CatmullRom);
    let mask = ellipse_mask(width, height);

    for (px, m) in resized.pixels_mut().zip(mask.pixels()) {
        px.0[3] = m.0[0];
    }
    resized
}

/// 255 where the pixel centre lies inside the ellipse inscribed in the box, 0 elsewhere.
pub fn ellipse_mask(width: u32, height: u32) -> GrayImage {
    let rx = width as f64 / 2.0;
    let ry = height as f64 / 2.0;

    GrayImage::from_fn(width, height, |x, y| {
        let dx = (x as f64 + 0.5 - rx) / rx;
        let dy = (y as f64 + 0.5 - ry) / ry;
        if dx * dx + dy * dy <= 1.0 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn load_background(path: &Path) -> Result<RgbaImage> {
    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ComposeError::MissingAsset(path.to_path_buf()))
        }
        Err(source) => Err(ComposeError::Background {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_opaque_at_centre_and_clear_in_corners() {
        let mask = ellipse_mask(10, 10);
        assert_eq!(mask.get_pixel(5, 5).0[0], 255);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(9, 0).0[0], 0);
        assert_eq!(mask.get_pixel(0, 9).0[0], 0);
        assert_eq!(mask.get_pixel(9, 9).0[0], 0);
        // Edge midpoints touch the bounding box.
        assert_eq!(mask.get_pixel(0, 5).0[0], 255);
        assert_eq!(mask.get_pixel(5, 0).0[0], 255);
    }

    #[test]
    fn mask_is_symmetric() {
        let mask = ellipse_mask(17, 9);
        for y in 0..9 {
            for x in 0..17 {
                assert_eq!(mask.get_pixel(x, y), mask.get_pixel(16 - x, y));
                assert_eq!(mask.get_pixel(x, y), mask.get_pixel(x, 8 - y));
            }
        }
    }

    #[test]
    fn circular_avatar_stretches_to_requested_size() {
        let avatar = DynamicImage::ImageRgba8(RgbaImage::new(64, 32));
        let out = circular_avatar(&avatar, [40, 50]);
        assert_eq!(out.dimensions(), (40, 50));
    }

    #[test]
    fn greeting_interpolates_name() {
        assert_eq!(welcome_text("Ava"), "Welcome, Ava!");
    }
}
