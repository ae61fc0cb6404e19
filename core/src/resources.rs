//! Named assets the widgets are built from.

use ahash::HashMap;
use serde::Deserialize;
use wargui_geom::{DevicePoint, DeviceRect, DeviceSize, ScreenPoint, ScreenSize, centre_in};
use wargui_painter::{Color, FontError, PixelImage, TextRasterizer};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
  #[error("no image named `{0}`")]
  MissingImage(String),
  #[error("no border configuration named `{0}`")]
  MissingBorder(String),
  #[error("invalid border configuration: {0}")]
  Config(#[from] serde_json::Error),
  #[cfg(feature = "png")]
  #[error("cannot decode image `{name}`")]
  Decode {
    name: String,
    #[source]
    source: image::ImageError,
  },
  #[error(transparent)]
  Font(#[from] FontError),
}

/// Synchronous access to decoded assets.
pub trait Resources {
  fn image(&self, name: &str) -> Result<&PixelImage, AssetError>;

  fn border(&self, name: &str) -> Result<&BorderConfig, AssetError>;

  /// Render a single line of text on an opaque background.
  fn render_text(&self, text: &str, color: Color, background: Color) -> PixelImage;

  fn screen_size(&self) -> ScreenSize;

  /// The screen position centring an image of `size` on the display.
  fn centre(&self, size: DeviceSize) -> ScreenPoint { centre_in(size, self.screen_size()) }
}

/// One piece of a border image, stored in configuration as `[x, y, w, h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[i32; 4]")]
pub struct BorderPiece(pub DeviceRect);

impl From<[i32; 4]> for BorderPiece {
  fn from([x, y, w, h]: [i32; 4]) -> Self {
    BorderPiece(DeviceRect::new(DevicePoint::new(x, y), DeviceSize::new(w, h)))
  }
}

impl BorderPiece {
  #[inline]
  pub fn width(&self) -> i32 { self.0.width() }
  #[inline]
  pub fn height(&self) -> i32 { self.0.height() }
}

/// Where the eight pieces of a border live in the border image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BorderRects {
  pub top_left: BorderPiece,
  pub top: BorderPiece,
  pub top_right: BorderPiece,
  pub middle_left: BorderPiece,
  pub middle_right: BorderPiece,
  pub bottom_left: BorderPiece,
  pub bottom: BorderPiece,
  pub bottom_right: BorderPiece,
}

/// A named border decoration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BorderConfig {
  /// Name of the image holding the pieces.
  pub image: String,
  /// Width of the band between the decoration and the decorated image.
  pub border_size: i32,
  /// Colour of that band.
  #[serde(default = "band_color")]
  pub background: Color,
  pub rects: BorderRects,
}

fn band_color() -> Color { Color::BLACK }

/// An in-memory [`Resources`] implementation.
pub struct AssetStore {
  screen: ScreenSize,
  images: HashMap<String, PixelImage>,
  borders: HashMap<String, BorderConfig>,
  text: Box<dyn TextRasterizer>,
}

impl AssetStore {
  pub fn new(screen: ScreenSize, text: impl TextRasterizer + 'static) -> Self {
    Self {
      screen,
      images: HashMap::default(),
      borders: HashMap::default(),
      text: Box::new(text),
    }
  }

  pub fn insert_image(&mut self, name: impl Into<String>, image: PixelImage) {
    self.images.insert(name.into(), image);
  }

  #[cfg(feature = "png")]
  pub fn load_png(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<(), AssetError> {
    let name = name.into();
    match PixelImage::from_png(bytes) {
      Ok(image) => {
        self.images.insert(name, image);
        Ok(())
      }
      Err(source) => Err(AssetError::Decode { name, source }),
    }
  }

  pub fn insert_border(&mut self, name: impl Into<String>, config: BorderConfig) {
    self.borders.insert(name.into(), config);
  }

  /// Load border configurations from a JSON object mapping names to
  /// configurations. Returns how many were loaded; existing names are
  /// replaced.
  pub fn load_borders(&mut self, json: &str) -> Result<usize, AssetError> {
    let configs: HashMap<String, BorderConfig> = serde_json::from_str(json)?;
    let count = configs.len();
    for (name, config) in configs {
      if !self.images.contains_key(&config.image) {
        log::warn!("border `{name}` uses image `{}` which is not loaded yet", config.image);
      }
      self.borders.insert(name, config);
    }
    Ok(count)
  }
}

impl Resources for AssetStore {
  fn image(&self, name: &str) -> Result<&PixelImage, AssetError> {
    self
      .images
      .get(name)
      .ok_or_else(|| AssetError::MissingImage(name.to_owned()))
  }

  fn border(&self, name: &str) -> Result<&BorderConfig, AssetError> {
    self
      .borders
      .get(name)
      .ok_or_else(|| AssetError::MissingBorder(name.to_owned()))
  }

  fn render_text(&self, text: &str, color: Color, background: Color) -> PixelImage {
    self.text.rasterize(text, color, background)
  }

  #[inline]
  fn screen_size(&self) -> ScreenSize { self.screen }
}

#[cfg(test)]
mod tests {
  use wargui_dev_helper::capture_logs;

  use super::*;
  use crate::test_helper::{BlockText, WINDOW_BORDER_JSON};

  #[test]
  fn load_border_configuration() {
    let mut store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    store.insert_image("border", PixelImage::from_color(DeviceSize::new(12, 12), Color::WHITE));
    assert_eq!(store.load_borders(WINDOW_BORDER_JSON).unwrap(), 1);

    let border = store.border("WindowBorder").unwrap();
    assert_eq!(border.image, "border");
    assert_eq!(border.border_size, 2);
    assert_eq!(border.rects.middle_left.width(), 4);
    assert_eq!(border.rects.top_left.height(), 4);
    assert_eq!(border.background, Color::from_rgb(40, 40, 40));
  }

  #[test]
  fn missing_assets() {
    let store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    assert!(matches!(store.image("nope"), Err(AssetError::MissingImage(n)) if n == "nope"));
    assert!(matches!(store.border("nope"), Err(AssetError::MissingBorder(_))));
  }

  #[test]
  fn malformed_configuration() {
    let mut store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    let err = store.load_borders(r#"{"Broken": {"image": "x"}}"#).unwrap_err();
    assert!(matches!(err, AssetError::Config(_)));
  }

  #[test]
  fn warn_when_border_image_unknown() {
    let mut store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    let (loaded, logs) = capture_logs(|| store.load_borders(WINDOW_BORDER_JSON));
    assert_eq!(loaded.unwrap(), 1);
    assert_eq!(logs.warnings(), 1);
  }

  #[test]
  fn centre_on_screen() {
    let store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    assert_eq!(store.centre(DeviceSize::new(200, 100)), ScreenPoint::new(300, 250));
  }

  #[cfg(feature = "png")]
  #[test]
  fn undecodable_png_names_the_asset() {
    let mut store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    let err = store.load_png("bad", b"garbage").unwrap_err();
    assert!(matches!(&err, AssetError::Decode { name, .. } if name == "bad"));
    assert!(std::error::Error::source(&err).is_some());
    assert!(matches!(store.image("bad"), Err(AssetError::MissingImage(_))));
  }

  #[cfg(feature = "png")]
  #[test]
  fn load_png_round_trip() {
    let img = crate::test_helper::border_image();
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_as_png(&mut bytes).unwrap();

    let mut store = AssetStore::new(ScreenSize::new(800, 600), BlockText);
    store.load_png("border", bytes.get_ref()).unwrap();
    assert_eq!(store.image("border").unwrap(), &img);
  }
}
