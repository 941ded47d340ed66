use std::convert::TryInto;
use std::path::Path;

use image::RgbaImage;

use crate::viewport::Viewport;

#[derive(Debug)]
pub enum ScreenshotError {
    /// Pixel buffer does not match the given dimensions
    SizeMismatch {
        width: u32,
        height: u32,
        len: usize,
    },
    Image(image::ImageError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::SizeMismatch { width, height, len } => write!(
                f,
                "{} bytes of pixel data do not make a {}x{} rgba image",
                len, width, height
            ),
            ScreenshotError::Image(error) => write!(f, "image error: {}", error),
        }
    }
}

impl std::error::Error for ScreenshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenshotError::Image(error) => Some(error),
            _ => None,
        }
    }
}

impl From<image::ImageError> for ScreenshotError {
    fn from(error: image::ImageError) -> Self {
        ScreenshotError::Image(error)
    }
}

/// Build a top-down image from rgba rows read back from OpenGL,
/// which stores them bottom-up.
pub fn image_from_gl_pixels(
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<RgbaImage, ScreenshotError> {
    let len = pixels.len();
    let image = RgbaImage::from_raw(width, height, pixels).ok_or(
        ScreenshotError::SizeMismatch { width, height, len },
    )?;
    Ok(image::imageops::flip_vertical(&image))
}

/// Read back the currently bound framebuffer.
pub fn read_framebuffer(viewport: &Viewport) -> Result<RgbaImage, ScreenshotError> {
    let width: u32 = viewport.get_width().try_into().unwrap_or(0);
    let height: u32 = viewport.get_height().try_into().unwrap_or(0);
    let mut pixels = vec![0_u8; 4 * width as usize * height as usize];

    unsafe {
        gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
        gl::ReadPixels(
            0,
            0,
            viewport.get_width(),
            viewport.get_height(),
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_mut_ptr() as *mut gl::types::GLvoid,
        );
    }

    image_from_gl_pixels(width, height, pixels)
}

/// Save the currently bound framebuffer, format picked from the
/// extension of `path`.
pub fn save_framebuffer<P: AsRef<Path>>(path: P, viewport: &Viewport) -> Result<(), ScreenshotError> {
    let image = read_framebuffer(viewport)?;
    image.save(path.as_ref())?;
    log::info!(
        "saved {}x{} screenshot to {}",
        image.width(),
        image.height(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_from_gl_pixels_flips_rows() {
        // bottom row red, top row blue as OpenGL returns it
        let pixels = vec![
            255, 0, 0, 255, 255, 0, 0, 255, //
            0, 0, 255, 255, 0, 0, 255, 255,
        ];
        let image = image_from_gl_pixels(2, 2, pixels).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn image_from_gl_pixels_size_mismatch() {
        match image_from_gl_pixels(2, 2, vec![0; 15]) {
            Err(ScreenshotError::SizeMismatch { width, height, len }) => {
                assert_eq!((width, height, len), (2, 2, 15));
            }
            _ => panic!("Should have gotten a size mismatch error"),
        }
    }
}
