//! Single line text rasterising.

use fontdue::{Font, FontSettings};
use wargui_geom::DeviceSize;

use crate::{Color, PixelImage};

/// Turns a line of text into pixels. Implemented by the host's font provider;
/// [`FontRasterizer`] is the bundled `fontdue` implementation.
pub trait TextRasterizer {
  /// Render `text` in `color` on an opaque `background`. The image is exactly
  /// as large as the laid out line.
  fn rasterize(&self, text: &str, color: Color, background: Color) -> PixelImage;
}

#[derive(Debug, thiserror::Error)]
#[error("invalid font data: {0}")]
pub struct FontError(pub &'static str);

pub struct FontRasterizer {
  font: Font,
  px: f32,
}

impl FontRasterizer {
  pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self, FontError> {
    let font = Font::from_bytes(bytes, FontSettings::default()).map_err(FontError)?;
    Ok(Self { font, px })
  }

  fn line_metrics(&self) -> (f32, f32) {
    match self.font.horizontal_line_metrics(self.px) {
      Some(m) => (m.ascent, m.new_line_size),
      None => {
        log::warn!("[painter]: font has no horizontal metrics, use the font size as line height.");
        (self.px, self.px)
      }
    }
  }
}

impl TextRasterizer for FontRasterizer {
  fn rasterize(&self, text: &str, color: Color, background: Color) -> PixelImage {
    let (ascent, line_height) = self.line_metrics();
    let width: f32 = text
      .chars()
      .map(|c| self.font.metrics(c, self.px).advance_width)
      .sum();
    let size = DeviceSize::new(width.ceil() as i32, line_height.ceil() as i32);
    let mut image = PixelImage::from_color(size, background);

    let baseline = ascent.round() as i32;
    let mut pen = 0f32;
    for c in text.chars() {
      let (metrics, coverage) = self.font.rasterize(c, self.px);
      let left = (pen + metrics.xmin as f32).round() as i32;
      let top = baseline - metrics.height as i32 - metrics.ymin;
      for (i, alpha) in coverage.iter().enumerate() {
        if *alpha == 0 {
          continue;
        }
        let x = left + (i % metrics.width) as i32;
        let y = top + (i / metrics.width) as i32;
        if x < 0 || y < 0 {
          continue;
        }
        if let Some(dst) = image.pixel(x as u32, y as u32) {
          image.put_pixel(x as u32, y as u32, color.blend_over(dst, *alpha));
        }
      }
      pen += metrics.advance_width;
    }
    image
  }
}
