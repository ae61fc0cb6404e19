use ::image::{RgbaImage, imageops};
use wargui_geom::{DevicePoint, DeviceRect, DeviceSize};

use crate::Color;

/// An owned RGBA8 pixel surface.
///
/// Every surface belongs to exactly one node. Compositing always borrows the
/// source immutably and the destination mutably, so a surface can never be
/// blitted onto itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelImage {
  data: RgbaImage,
}

impl PixelImage {
  #[inline]
  pub fn new(data: RgbaImage) -> Self { PixelImage { data } }

  /// A surface of `size` flooded with `color`. Negative extents are treated
  /// as zero.
  pub fn from_color(size: DeviceSize, color: Color) -> Self {
    let (width, height) = (size.width.max(0) as u32, size.height.max(0) as u32);
    PixelImage { data: RgbaImage::from_pixel(width, height, color.into()) }
  }

  #[cfg(feature = "png")]
  pub fn from_png(bytes: &[u8]) -> Result<Self, ::image::ImageError> {
    let img = ::image::load_from_memory_with_format(bytes, ::image::ImageFormat::Png)?;
    Ok(PixelImage::new(img.to_rgba8()))
  }

  #[cfg(feature = "png")]
  pub fn write_as_png(&self, w: &mut (impl std::io::Write + std::io::Seek)) -> ::image::ImageResult<()> {
    self.data.write_to(w, ::image::ImageFormat::Png)
  }

  #[inline]
  pub fn width(&self) -> u32 { self.data.width() }
  #[inline]
  pub fn height(&self) -> u32 { self.data.height() }

  pub fn size(&self) -> DeviceSize { DeviceSize::new(self.width() as i32, self.height() as i32) }

  #[inline]
  pub fn bounds(&self) -> DeviceRect { DeviceRect::from_size(self.size()) }

  #[inline]
  pub fn pixel_bytes(&self) -> &[u8] { self.data.as_raw() }

  /// The colour at `(x, y)`, `None` outside the surface.
  pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
    self.data.get_pixel_checked(x, y).map(|p| (*p).into())
  }

  pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
    if let Some(p) = self.data.get_pixel_mut_checked(x, y) {
      *p = color.into();
    }
  }

  /// Copy the whole of `src` so that its top-left corner lands on `at`.
  /// Pixels falling outside `self` are dropped.
  #[inline]
  pub fn blit(&mut self, src: &PixelImage, at: DevicePoint) { self.blit_area(src, &src.bounds(), at) }

  /// Copy the `area` of `src` so that the top-left corner of `area` lands on
  /// `at`. The area is clipped to the source first; the copy replaces the
  /// destination pixels rather than blending with them.
  pub fn blit_area(&mut self, src: &PixelImage, area: &DeviceRect, at: DevicePoint) {
    let Some(clipped) = area.intersection(&src.bounds()) else {
      return;
    };
    let at = at + (clipped.origin - area.origin);
    let part = imageops::crop_imm(
      &src.data,
      clipped.origin.x as u32,
      clipped.origin.y as u32,
      clipped.size.width as u32,
      clipped.size.height as u32,
    )
    .to_image();
    imageops::replace(&mut self.data, &part, at.x as i64, at.y as i64);
  }
}

impl std::fmt::Debug for PixelImage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("PixelImage")
      .field(&format!("{}x{}", self.width(), self.height()))
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn negative_extent_is_empty() {
    let img = PixelImage::from_color(DeviceSize::new(-3, 4), Color::RED);
    assert_eq!(img.size(), DeviceSize::new(0, 4));
  }

  #[test]
  fn blit_clips_to_destination() {
    let mut dst = PixelImage::from_color(DeviceSize::new(4, 4), Color::BLACK);
    let src = PixelImage::from_color(DeviceSize::new(3, 3), Color::WHITE);
    dst.blit(&src, DevicePoint::new(2, 2));

    assert_eq!(dst.pixel(1, 1), Some(Color::BLACK));
    assert_eq!(dst.pixel(2, 2), Some(Color::WHITE));
    assert_eq!(dst.pixel(3, 3), Some(Color::WHITE));
    assert_eq!(dst.pixel(4, 4), None);
  }

  #[test]
  fn blit_area_copies_only_the_area() {
    let mut src = PixelImage::from_color(DeviceSize::new(4, 4), Color::BLUE);
    src.put_pixel(1, 1, Color::RED);
    let mut dst = PixelImage::from_color(DeviceSize::new(10, 10), Color::BLACK);
    let area = DeviceRect::new(DevicePoint::new(1, 1), DeviceSize::new(2, 1));
    dst.blit_area(&src, &area, DevicePoint::new(6, 7));

    assert_eq!(dst.pixel(6, 7), Some(Color::RED));
    assert_eq!(dst.pixel(7, 7), Some(Color::BLUE));
    assert_eq!(dst.pixel(8, 7), Some(Color::BLACK));
    assert_eq!(dst.pixel(6, 8), Some(Color::BLACK));
  }

  #[test]
  fn blit_area_partly_outside_source() {
    let src = PixelImage::from_color(DeviceSize::new(2, 2), Color::WHITE);
    let mut dst = PixelImage::from_color(DeviceSize::new(6, 6), Color::BLACK);
    let area = DeviceRect::new(DevicePoint::new(-1, -1), DeviceSize::new(3, 3));
    dst.blit_area(&src, &area, DevicePoint::new(2, 2));

    // the clipped-off row and column keep the destination colour
    assert_eq!(dst.pixel(2, 2), Some(Color::BLACK));
    assert_eq!(dst.pixel(3, 3), Some(Color::WHITE));
    assert_eq!(dst.pixel(4, 4), Some(Color::WHITE));
    assert_eq!(dst.pixel(5, 5), Some(Color::BLACK));
  }

  #[cfg(feature = "png")]
  #[test]
  fn png_round_trip() {
    let mut img = PixelImage::from_color(DeviceSize::new(5, 3), Color::BLUE);
    img.put_pixel(4, 2, Color::RED);
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_as_png(&mut bytes).unwrap();

    let decoded = PixelImage::from_png(bytes.get_ref()).unwrap();
    assert_eq!(decoded, img);
  }

  #[cfg(feature = "png")]
  #[test]
  fn png_rejects_garbage() { assert!(PixelImage::from_png(b"garbage").is_err()); }
}
