use std::ops::{Deref, DerefMut};

use wargui_core::prelude::*;

/// How a [`GuiLabel`] is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
  pub color: Color,
  pub background: Color,
  /// Background padding on every side of the text.
  pub border: i32,
  pub align: Align,
  pub fill: bool,
}

impl Default for LabelStyle {
  fn default() -> Self {
    Self {
      color: Color::WHITE,
      background: Color::BLACK,
      border: DEFAULT_BORDER,
      align: Align::None,
      fill: false,
    }
  }
}

/// A single line of text on a plain background. The text is rendered once,
/// when the label is created.
pub struct GuiLabel {
  text: String,
  node: GuiNode,
}

impl GuiLabel {
  pub fn new(text: impl Into<String>, style: &LabelStyle, res: &impl Resources) -> Self {
    let text = text.into();
    let mut image = res.render_text(&text, style.color, style.background);
    if style.border > 0 {
      let inset = DevicePoint::new(style.border, style.border);
      let size = image.size() + DeviceSize::new(style.border * 2, style.border * 2);
      let mut padded = PixelImage::from_color(size, style.background);
      padded.blit(&image, inset);
      image = padded;
    }
    let node = GuiNode::from_image(image)
      .with_align(style.align)
      .with_fill(style.fill);
    Self { text, node }
  }

  #[inline]
  pub fn text(&self) -> &str { &self.text }
}

impl Deref for GuiLabel {
  type Target = GuiNode;
  fn deref(&self) -> &Self::Target { &self.node }
}

impl DerefMut for GuiLabel {
  fn deref_mut(&mut self) -> &mut Self::Target { &mut self.node }
}

impl Sizable for GuiLabel {
  fn minimum_size(&self) -> MinSize { self.node.minimum_size() }
}

impl Renderable for GuiLabel {
  #[inline]
  fn state(&self) -> &NodeState { self.node.state() }

  #[inline]
  fn state_mut(&mut self) -> &mut NodeState { self.node.state_mut() }

  fn update(&mut self, time_delta: std::time::Duration) -> Vec<DeviceRect> { self.node.update(time_delta) }
}

impl MessageHandler for GuiLabel {
  fn handle(&mut self, message: &Message) -> bool { self.node.handle(message) }
}

impl From<GuiLabel> for Node {
  #[inline]
  fn from(label: GuiLabel) -> Self { Node::leaf(label) }
}

#[cfg(test)]
mod tests {
  use wargui_core::test_helper::*;
  use wargui_dev_helper::{assert_region_color, count_color};

  use super::*;

  fn res() -> AssetStore { mock_store(ScreenSize::new(800, 600)) }

  #[test]
  fn padded_by_border() {
    let label = GuiLabel::new("Hi", &LabelStyle::default(), &res());
    let size = DeviceSize::new(2 * CELL_WIDTH + 8, CELL_HEIGHT + 8);
    assert_eq!(label.minimum_size(), MinSize::new(size.width, size.height, false));
    assert_eq!(label.state().rect.size, size);
    assert_eq!(label.text(), "Hi");

    let image = label.image().unwrap();
    assert_region_color(image, DeviceRect::new(DevicePoint::zero(), DeviceSize::new(size.width, 4)), Color::BLACK);
    assert_eq!(image.pixel(4 + 1, 4 + 2), Some(Color::WHITE));
  }

  #[test]
  fn zero_border_is_bare_text() {
    let style = LabelStyle { border: 0, color: Color::RED, background: Color::BLUE, ..<_>::default() };
    let label = GuiLabel::new("a b", &style, &res());
    let image = label.image().unwrap();
    assert_eq!(image.size(), DeviceSize::new(3 * CELL_WIDTH, CELL_HEIGHT));
    // two visible glyph blocks, the space is background
    assert_eq!(count_color(image, Color::RED) as i32, 2 * (CELL_WIDTH - 2) * (CELL_HEIGHT - 4));
  }

  #[test]
  fn alignment_and_fill_are_kept() {
    let style = LabelStyle { align: Align::Right, fill: true, ..<_>::default() };
    let label = GuiLabel::new("x", &style, &res());
    assert_eq!(label.state().align, Align::Right);
    assert!(label.minimum_size().fill);
  }

  #[test]
  fn build_is_a_no_op() {
    let mut label = GuiLabel::new("x", &LabelStyle::default(), &res());
    let before = label.image().cloned();
    label.build_image(SizeRequest::Minimum);
    assert_eq!(label.image().cloned(), before);
  }
}
