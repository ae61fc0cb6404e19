use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
  pub red: u8,
  pub green: u8,
  pub blue: u8,
  #[serde(default = "opaque")]
  pub alpha: u8,
}

fn opaque() -> u8 { u8::MAX }

impl Color {
  #[inline]
  pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
    Self { red, green, blue, alpha }
  }

  #[inline]
  pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self { Self::new(r, g, b, 255) }

  #[inline]
  pub const fn from_u32(rgba: u32) -> Self {
    let bytes = rgba.to_be_bytes();
    Self { red: bytes[0], green: bytes[1], blue: bytes[2], alpha: bytes[3] }
  }

  #[inline]
  pub const fn into_u32(self) -> u32 {
    let Self { red, green, blue, alpha } = self;
    u32::from_be_bytes([red, green, blue, alpha])
  }

  #[inline]
  pub const fn into_components(self) -> [u8; 4] {
    let Self { red, green, blue, alpha } = self;
    [red, green, blue, alpha]
  }

  #[inline]
  pub const fn from_components([red, green, blue, alpha]: [u8; 4]) -> Self {
    Self { red, green, blue, alpha }
  }

  /// Source-over blend of `self` onto `dst`, with an extra `coverage` in
  /// `0..=255` scaling the source alpha. The result is opaque when `dst` is.
  pub fn blend_over(self, dst: Color, coverage: u8) -> Color {
    let a = self.alpha as u32 * coverage as u32 / 255;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    Color {
      red: mix(self.red, dst.red),
      green: mix(self.green, dst.green),
      blue: mix(self.blue, dst.blue),
      alpha: (a + dst.alpha as u32 * (255 - a) / 255) as u8,
    }
  }
}

impl From<Color> for ::image::Rgba<u8> {
  #[inline]
  fn from(c: Color) -> Self { ::image::Rgba(c.into_components()) }
}

impl From<::image::Rgba<u8>> for Color {
  #[inline]
  fn from(p: ::image::Rgba<u8>) -> Self { Color::from_components(p.0) }
}

impl Color {
  pub const BLACK: Color = Self::from_rgb(0, 0, 0);
  pub const BLUE: Color = Self::from_rgb(0, 0, 255);
  pub const DARKGRAY: Color = Self::from_rgb(169, 169, 169);
  pub const GRAY: Color = Self::from_rgb(128, 128, 128);
  pub const GREEN: Color = Self::from_rgb(0, 128, 0);
  pub const LIGHTGRAY: Color = Self::from_rgb(211, 211, 211);
  pub const RED: Color = Self::from_rgb(255, 0, 0);
  pub const WHITE: Color = Self::from_rgb(255, 255, 255);
  pub const YELLOW: Color = Self::from_rgb(255, 255, 0);
  pub const TRANSPARENT: Color = Self::new(0, 0, 0, 0);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn u32_round_trip() {
    let c = Color::new(1, 2, 3, 4);
    assert_eq!(c.into_u32(), 0x01020304);
    assert_eq!(Color::from_u32(0x01020304), c);
  }

  #[test]
  fn alpha_defaults_to_opaque() {
    let c: Color = serde_json::from_str(r#"{"red": 10, "green": 20, "blue": 30}"#).unwrap();
    assert_eq!(c, Color::from_rgb(10, 20, 30));
  }

  #[test]
  fn blend_full_and_zero_coverage() {
    assert_eq!(Color::WHITE.blend_over(Color::BLACK, 255), Color::WHITE);
    assert_eq!(Color::WHITE.blend_over(Color::BLACK, 0), Color::BLACK);
    let half = Color::WHITE.blend_over(Color::BLACK, 128);
    assert_eq!(half, Color::from_rgb(128, 128, 128));
  }
}
