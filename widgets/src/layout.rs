use wargui_core::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Direction {
  /// Left to right.
  Horizontal,
  #[default]
  /// Top to bottom.
  Vertical,
}

impl Direction {
  pub fn is_horizontal(&self) -> bool { matches!(self, Direction::Horizontal) }

  /// The extent of `size` along the stacking axis.
  #[inline]
  pub fn main(&self, size: DeviceSize) -> i32 { if self.is_horizontal() { size.width } else { size.height } }

  /// The edge children are anchored to when [`StretchPolicy::PadStart`]
  /// pads the rest of the space.
  pub fn start(&self) -> Align { if self.is_horizontal() { Align::Left } else { Align::Top } }
}

mod horizontal;
mod vertical;
pub use horizontal::*;
pub use vertical::*;

/// Extend `simple` to the offered extent when `style` asks for start
/// anchored padding, the children are aligned to the start edge and their
/// sizes along `dir` sum to less than the offered extent on that axis.
/// Otherwise the natural image is returned unchanged.
pub(crate) fn stretch_along(
  dir: Direction, style: &ContainerStyle, children: &[Node], simple: PixelImage, width: Option<i32>,
  height: i32,
) -> PixelImage {
  if style.stretch != StretchPolicy::PadStart || style.align_children != dir.start() {
    return simple;
  }
  let size = DeviceSize::new(width.unwrap_or(simple.width() as i32), height);
  let content: i32 = children
    .iter()
    .map(|c| dir.main(c.minimum_size().size()))
    .sum();
  if content < dir.main(size) {
    log::debug!("padding {dir:?} container to {size:?}");
    pad_image(&simple, size, style.background)
  } else {
    simple
  }
}
