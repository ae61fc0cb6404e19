use std::ops::{Deref, DerefMut};

use wargui_core::prelude::*;

/// A leaf showing a picture. It never stretches.
pub struct GuiImage {
  node: GuiNode,
}

impl GuiImage {
  pub fn new(image: PixelImage) -> Self { Self { node: GuiNode::from_image(image) } }

  pub fn with_align(self, align: Align) -> Self { Self { node: self.node.with_align(align) } }

  /// A copy of what `node` currently shows, `None` if it was never built.
  pub fn from_image_node(node: &Node) -> Option<Self> { node.image().cloned().map(Self::new) }

  /// The named image of `res`.
  pub fn from_asset(name: &str, res: &impl Resources) -> Result<Self, AssetError> {
    res.image(name).cloned().map(Self::new)
  }
}

impl Deref for GuiImage {
  type Target = GuiNode;
  fn deref(&self) -> &Self::Target { &self.node }
}

impl DerefMut for GuiImage {
  fn deref_mut(&mut self) -> &mut Self::Target { &mut self.node }
}

impl Sizable for GuiImage {
  fn minimum_size(&self) -> MinSize { self.node.minimum_size() }
}

impl Renderable for GuiImage {
  #[inline]
  fn state(&self) -> &NodeState { self.node.state() }

  #[inline]
  fn state_mut(&mut self) -> &mut NodeState { self.node.state_mut() }

  fn update(&mut self, time_delta: std::time::Duration) -> Vec<DeviceRect> { self.node.update(time_delta) }
}

impl MessageHandler for GuiImage {
  fn handle(&mut self, message: &Message) -> bool { self.node.handle(message) }
}

impl From<GuiImage> for Node {
  #[inline]
  fn from(image: GuiImage) -> Self { Node::leaf(image) }
}

#[cfg(test)]
mod tests {
  use wargui_core::test_helper::*;

  use super::*;

  #[test]
  fn from_named_asset() {
    let res = mock_store(ScreenSize::new(800, 600));
    let image = GuiImage::from_asset("border", &res).unwrap();
    assert_eq!(image.minimum_size(), MinSize::new(12, 12, false));
    assert!(matches!(GuiImage::from_asset("nope", &res), Err(AssetError::MissingImage(_))));
  }

  #[test]
  fn from_built_node() {
    let mut node: Node = solid(7, 3, Color::GREEN).into();
    let image = GuiImage::from_image_node(&node).unwrap();
    assert_eq!(image.image().unwrap().pixel(6, 2), Some(Color::GREEN));

    node.state_mut().clear_image();
    assert!(GuiImage::from_image_node(&node).is_none());
  }

  #[test]
  fn never_resizes() {
    let mut image = GuiImage::new(PixelImage::from_color(DeviceSize::new(20, 10), Color::WHITE));
    image.build_image(SizeRequest::Fill { width: Some(200), height: 100 });
    assert_eq!(image.state().rect.size, DeviceSize::new(20, 10));
    assert_eq!(image.image().unwrap().size(), DeviceSize::new(20, 10));
  }

  #[test]
  fn changes_reach_the_parent() {
    let mut image = GuiImage::new(PixelImage::from_color(DeviceSize::new(4, 4), Color::WHITE));
    image.invalidate(DeviceRect::from_size(DeviceSize::new(2, 2)));
    assert_eq!(image.update(std::time::Duration::ZERO).len(), 1);
  }
}
