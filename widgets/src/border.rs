use std::time::Duration;

use wargui_core::prelude::*;

/// Frame `content` with the pieces of `config` cut from `border_image`.
///
/// Corners are copied as they are, edges are tiled along the sides and the
/// last tile is cut short. A band of `config.border_size` pixels in
/// `config.background` separates the frame from the content.
pub fn add_border(content: &PixelImage, config: &BorderConfig, border_image: &PixelImage) -> PixelImage {
  let r = &config.rects;
  let band = config.border_size;
  let inner = content.size();
  let size = DeviceSize::new(
    r.middle_left.width() + band * 2 + inner.width + r.middle_right.width(),
    r.top_left.height() + band * 2 + inner.height + r.bottom_left.height(),
  );
  let mut image = PixelImage::from_color(size, config.background);
  image.blit(content, content_offset(config));

  let right = |piece: &BorderPiece| size.width - piece.width();
  let bottom = |piece: &BorderPiece| size.height - piece.height();

  tile_x(&mut image, border_image, &r.top, 0, r.top_left.width()..right(&r.top_right));
  tile_x(&mut image, border_image, &r.bottom, bottom(&r.bottom), r.bottom_left.width()..right(&r.bottom_right));
  tile_y(&mut image, border_image, &r.middle_left, 0, r.top_left.height()..bottom(&r.bottom_left));
  tile_y(
    &mut image,
    border_image,
    &r.middle_right,
    right(&r.middle_right),
    r.top_right.height()..bottom(&r.bottom_right),
  );

  let corners = [
    (&r.top_left, DevicePoint::new(0, 0)),
    (&r.top_right, DevicePoint::new(right(&r.top_right), 0)),
    (&r.bottom_left, DevicePoint::new(0, bottom(&r.bottom_left))),
    (&r.bottom_right, DevicePoint::new(right(&r.bottom_right), bottom(&r.bottom_right))),
  ];
  for (piece, at) in corners {
    image.blit_area(border_image, &piece.0, at);
  }
  image
}

/// Where [`add_border`] places the content inside the framed image.
pub fn content_offset(config: &BorderConfig) -> DevicePoint {
  let band = config.border_size;
  DevicePoint::new(config.rects.middle_left.width() + band, config.rects.top_left.height() + band)
}

fn tile_x(dst: &mut PixelImage, src: &PixelImage, piece: &BorderPiece, y: i32, span: std::ops::Range<i32>) {
  if piece.width() <= 0 {
    return;
  }
  for x in span.clone().step_by(piece.width() as usize) {
    let mut area = piece.0;
    area.size.width = area.size.width.min(span.end - x);
    dst.blit_area(src, &area, DevicePoint::new(x, y));
  }
}

fn tile_y(dst: &mut PixelImage, src: &PixelImage, piece: &BorderPiece, x: i32, span: std::ops::Range<i32>) {
  if piece.height() <= 0 {
    return;
  }
  for y in span.clone().step_by(piece.height() as usize) {
    let mut area = piece.0;
    area.size.height = area.size.height.min(span.end - y);
    dst.blit_area(src, &area, DevicePoint::new(x, y));
  }
}

/// A container framed by a named border decoration, placed on the screen.
///
/// This is the root the host talks to: it forwards screen space input to the
/// contents and, each frame, reports the screen rects whose pixels changed in
/// [`BorderWidget::image`].
pub struct BorderWidget {
  rect: ScreenRect,
  image: PixelImage,
  contents: Container,
  config_name: String,
  position: Option<ScreenPoint>,
}

impl BorderWidget {
  /// Lay `contents` out and frame it with the border named `config_name`.
  /// Without a `position` the framed image is centred on the screen.
  pub fn new(
    contents: Container, config_name: impl Into<String>, position: Option<ScreenPoint>,
    res: &impl Resources,
  ) -> Result<Self, AssetError> {
    let mut this = Self {
      rect: ScreenRect::zero(),
      image: PixelImage::from_color(ZERO_SIZE, Color::TRANSPARENT),
      contents,
      config_name: config_name.into(),
      position,
    };
    this.rebuild(res)?;
    Ok(this)
  }

  /// Lay the contents out again and recompose the frame. Returns the screen
  /// area the host must redraw: the union of the old and new placements.
  pub fn rebuild(&mut self, res: &impl Resources) -> Result<ScreenRect, AssetError> {
    let config = res.border(&self.config_name)?;
    let border_image = res.image(&config.image)?;

    self.contents.invalidate_layout();
    let image = add_border(self.contents.rebuild(), config, border_image);
    self.contents.update_position(content_offset(config));

    let origin = self.position.unwrap_or_else(|| res.centre(image.size()));
    let old = self.rect;
    self.rect = ScreenRect::new(origin, image.size().cast_unit());
    self.image = image;
    log::debug!("`{}` framed at {:?}", self.config_name, self.rect);
    Ok(if old.is_empty() { self.rect } else { old.union(&self.rect) })
  }

  /// Advance the contents by `time_delta` and return the changed screen
  /// rects. [`BorderWidget::image`] already shows the new pixels.
  pub fn update(&mut self, time_delta: Duration) -> Vec<ScreenRect> {
    let Self { rect, image, contents, .. } = self;
    let offset = contents.state().offset;
    let size = contents.state().rect.size;
    contents
      .update(time_delta)
      .into_iter()
      .filter_map(|dirty| clip_to(&dirty, size))
      .map(|dirty| {
        let moved = dirty.translate(offset.to_vector());
        if let Some(src) = contents.image() {
          image.blit_area(src, &dirty, moved.origin);
        }
        to_screen(&moved, rect.origin)
      })
      .collect()
  }

  /// Route a screen space message to the contents.
  #[inline]
  pub fn handle(&mut self, message: &Message<ScreenUnit>) -> bool {
    self.contents.handle_screen(message, &self.rect)
  }

  #[inline]
  pub fn rect(&self) -> &ScreenRect { &self.rect }

  #[inline]
  pub fn image(&self) -> &PixelImage { &self.image }

  #[inline]
  pub fn contents(&self) -> &Container { &self.contents }

  #[inline]
  pub fn contents_mut(&mut self) -> &mut Container { &mut self.contents }

  #[inline]
  pub fn config_name(&self) -> &str { &self.config_name }
}

/// A [`BorderWidget`] with the window decoration.
pub struct Window;

impl Window {
  pub const BORDER: &'static str = "WindowBorder";

  pub fn new(
    contents: Container, position: Option<ScreenPoint>, res: &impl Resources,
  ) -> Result<BorderWidget, AssetError> {
    BorderWidget::new(contents, Self::BORDER, position, res)
  }
}
