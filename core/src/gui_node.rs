use std::time::Duration;

use smallvec::SmallVec;
use wargui_geom::{DeviceRect, DeviceSize};
use wargui_painter::PixelImage;

use crate::{
  align::Align,
  events::Message,
  node::{MessageHandler, MinSize, Node, NodeState, Renderable, Sizable},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NodeError {
  #[error("a {found:?} image cannot replace the {expected:?} image of a fixed size node")]
  SizeMismatch { expected: DeviceSize, found: DeviceSize },
}

type MessageFn = Box<dyn FnMut(&Message) -> bool>;

/// The simplest leaf: a fixed image, built once at construction.
///
/// Its minimum size is the image size. The image can be replaced later by
/// one of the same size, which marks the whole node dirty for the next
/// frame.
pub struct GuiNode {
  state: NodeState,
  fill: bool,
  dirty: SmallVec<[DeviceRect; 2]>,
  on_message: Option<MessageFn>,
}

impl GuiNode {
  pub fn from_image(image: PixelImage) -> Self {
    Self {
      state: NodeState::with_image(image),
      fill: false,
      dirty: SmallVec::new(),
      on_message: None,
    }
  }

  pub fn with_align(mut self, align: Align) -> Self {
    self.state.align = align;
    self
  }

  /// Ask the parent for all the space it can offer.
  pub fn with_fill(mut self, fill: bool) -> Self {
    self.fill = fill;
    self
  }

  /// Decide with `f` whether a message reaching this node is consumed.
  /// Pointer positions arrive in the node's local space.
  pub fn on_message(mut self, f: impl FnMut(&Message) -> bool + 'static) -> Self {
    self.on_message = Some(Box::new(f));
    self
  }

  #[inline]
  pub fn image(&self) -> Option<&PixelImage> { self.state.image.as_ref() }

  /// Swap the pixels for `image`, which must be as large as the current
  /// one. The whole node is reported dirty on the next update.
  pub fn replace_image(&mut self, image: PixelImage) -> Result<(), NodeError> {
    let expected = self.state.rect.size;
    if image.size() != expected {
      return Err(NodeError::SizeMismatch { expected, found: image.size() });
    }
    self.state.image = Some(image);
    self.invalidate(DeviceRect::from_size(expected));
    Ok(())
  }

  /// Report `rect`, in local space, as changed on the next update.
  pub fn invalidate(&mut self, rect: DeviceRect) {
    if !rect.is_empty() {
      self.dirty.push(rect);
    }
  }
}

impl Sizable for GuiNode {
  fn minimum_size(&self) -> MinSize {
    let size = self.state.rect.size;
    MinSize::new(size.width, size.height, self.fill)
  }
}

impl Renderable for GuiNode {
  #[inline]
  fn state(&self) -> &NodeState { &self.state }

  #[inline]
  fn state_mut(&mut self) -> &mut NodeState { &mut self.state }

  fn update(&mut self, _: Duration) -> Vec<DeviceRect> { self.dirty.drain(..).collect() }
}

impl MessageHandler for GuiNode {
  fn handle(&mut self, message: &Message) -> bool {
    self.on_message.as_mut().is_some_and(|f| f(message))
  }
}

impl From<GuiNode> for Node {
  #[inline]
  fn from(node: GuiNode) -> Self { Node::leaf(node) }
}
