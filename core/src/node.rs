use std::{any::Any, time::Duration};

use wargui_geom::{DevicePoint, DeviceRect, DeviceSize};
use wargui_painter::{Color, PixelImage};

use crate::{align::Align, container::Container, events::Message};

/// Edge of the square a leaf shows when it never built an image.
pub const FALLBACK_IMAGE_SIZE: i32 = 128;
pub const FALLBACK_IMAGE_COLOR: Color = Color::RED;

/// The smallest footprint a node accepts, and whether it wants to consume all
/// the space its parent can offer instead of just that footprint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MinSize {
  pub width: i32,
  pub height: i32,
  pub fill: bool,
}

impl MinSize {
  #[inline]
  pub const fn new(width: i32, height: i32, fill: bool) -> Self { Self { width, height, fill } }

  #[inline]
  pub fn size(&self) -> DeviceSize { DeviceSize::new(self.width, self.height) }
}

/// The size a parent asks a node to build its image at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SizeRequest {
  /// Build at the node's own minimum size.
  #[default]
  Minimum,
  /// Fill the given extent. A `None` width means the node's own minimum
  /// width. The parent guarantees the extent is large enough for the node's
  /// content; this is not checked.
  Fill { width: Option<i32>, height: i32 },
}

/// The scene state every node carries.
#[derive(Debug, Clone, Default)]
pub struct NodeState {
  /// Placement and extent. After a build the size equals the image size.
  pub rect: DeviceRect,
  /// The node's rendered pixels, `None` until the first build.
  pub image: Option<PixelImage>,
  pub visible: bool,
  /// Where the node's image sits inside its parent's image.
  pub offset: DevicePoint,
  /// Overrides the parent's child alignment unless [`Align::None`].
  pub align: Align,
}

impl NodeState {
  /// A visible node showing `image`.
  pub fn with_image(image: PixelImage) -> Self {
    let mut state = NodeState::default();
    state.set_image(image);
    state
  }

  /// Install a freshly built image: the rect takes its size and the node
  /// becomes visible.
  pub fn set_image(&mut self, image: PixelImage) -> &mut PixelImage {
    self.rect.size = image.size();
    self.visible = true;
    self.image.insert(image)
  }

  /// Drop the built image so the next layout pass builds a new one.
  pub fn clear_image(&mut self) {
    self.image = None;
    self.visible = false;
  }
}

/// Size negotiation.
pub trait Sizable {
  fn minimum_size(&self) -> MinSize;
}

/// Image construction and per-frame change reporting.
pub trait Renderable {
  fn state(&self) -> &NodeState;

  fn state_mut(&mut self) -> &mut NodeState;

  /// Build the node's image for `request`.
  ///
  /// The provided implementation is for nodes that never learned to draw
  /// themselves: they get a flat red square so they stay visible on screen.
  fn build_image(&mut self, _request: SizeRequest) {
    let state = self.state_mut();
    if state.image.is_none() {
      log::warn!("node has no image and no `build_image`, showing the fallback square.");
      let size = DeviceSize::new(FALLBACK_IMAGE_SIZE, FALLBACK_IMAGE_SIZE);
      state.set_image(PixelImage::from_color(size, FALLBACK_IMAGE_COLOR));
    }
  }

  /// Advance by `time_delta` and return the rects, in the node's local
  /// space, whose pixels changed since the last call.
  fn update(&mut self, _time_delta: Duration) -> Vec<DeviceRect> { Vec::new() }
}

/// Input routing.
pub trait MessageHandler {
  /// Return `true` if the message was consumed and must not reach anyone
  /// else.
  fn handle(&mut self, _message: &Message) -> bool { false }
}

/// A leaf participant of the tree.
///
/// [`Container`] handles messages itself rather than through
/// [`MessageHandler`], so it is never a `Widget` and only enters a tree
/// through `Node::from`:
///
/// ```compile_fail
/// use wargui_core::prelude::*;
///
/// struct Stack;
/// impl Layout for Stack {
///   fn build_simple_image(&self, style: &ContainerStyle, _: &mut [Node]) -> PixelImage {
///     style.surface(DeviceSize::new(1, 1))
///   }
/// }
///
/// let _ = Node::leaf(Container::new(Stack, vec![]));
/// ```
pub trait Widget: Sizable + Renderable + MessageHandler + Any {
  fn as_any(&self) -> &dyn Any;

  fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Sizable + Renderable + MessageHandler + Any> Widget for T {
  #[inline]
  fn as_any(&self) -> &dyn Any { self }

  #[inline]
  fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// A node of the tree. Containers own their children, so the tree owns all
/// of its nodes and can never share or cycle.
pub enum Node {
  Leaf(Box<dyn Widget>),
  Container(Box<Container>),
}

impl Node {
  #[inline]
  pub fn leaf(widget: impl Widget + 'static) -> Self { Node::Leaf(Box::new(widget)) }

  pub fn state(&self) -> &NodeState {
    match self {
      Node::Leaf(w) => w.state(),
      Node::Container(c) => c.state(),
    }
  }

  pub fn state_mut(&mut self) -> &mut NodeState {
    match self {
      Node::Leaf(w) => w.state_mut(),
      Node::Container(c) => c.state_mut(),
    }
  }

  pub fn minimum_size(&self) -> MinSize {
    match self {
      Node::Leaf(w) => w.minimum_size(),
      Node::Container(c) => c.minimum_size(),
    }
  }

  pub fn build_image(&mut self, request: SizeRequest) {
    match self {
      Node::Leaf(w) => w.build_image(request),
      Node::Container(c) => c.build_image(request),
    }
  }

  pub fn update(&mut self, time_delta: Duration) -> Vec<DeviceRect> {
    match self {
      Node::Leaf(w) => w.update(time_delta),
      Node::Container(c) => c.update(time_delta),
    }
  }

  pub fn handle(&mut self, message: &Message) -> bool {
    match self {
      Node::Leaf(w) => w.handle(message),
      Node::Container(c) => c.handle(message),
    }
  }

  #[inline]
  pub fn image(&self) -> Option<&PixelImage> { self.state().image.as_ref() }

  #[inline]
  pub fn offset(&self) -> DevicePoint { self.state().offset }

  #[inline]
  pub fn align(&self) -> Align { self.state().align }

  #[inline]
  pub fn is_container(&self) -> bool { matches!(self, Node::Container(_)) }

  pub fn as_container(&self) -> Option<&Container> {
    match self {
      Node::Container(c) => Some(c),
      Node::Leaf(_) => None,
    }
  }

  pub fn as_container_mut(&mut self) -> Option<&mut Container> {
    match self {
      Node::Container(c) => Some(c),
      Node::Leaf(_) => None,
    }
  }

  /// The leaf as its concrete type.
  pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
    match self {
      Node::Leaf(w) => w.as_any().downcast_ref(),
      Node::Container(_) => None,
    }
  }

  pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
    match self {
      Node::Leaf(w) => w.as_any_mut().downcast_mut(),
      Node::Container(_) => None,
    }
  }

  /// Build the image with `request` unless one exists already.
  pub fn ensure_image(&mut self, request: SizeRequest) {
    if self.image().is_none() {
      self.build_image(request);
    }
  }
}

impl From<Container> for Node {
  #[inline]
  fn from(c: Container) -> Self { Node::Container(Box::new(c)) }
}

impl std::fmt::Debug for Node {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let kind = if self.is_container() { "Container" } else { "Leaf" };
    f.debug_struct(kind)
      .field("rect", &self.state().rect)
      .field("offset", &self.offset())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use wargui_dev_helper::capture_logs;

  use super::*;
  use crate::test_helper::{Overlap, Unpainted};

  #[test]
  fn missing_build_image_shows_fallback() {
    let mut node = Node::leaf(Unpainted::default());
    assert!(!node.state().visible);

    let (_, logs) = capture_logs(|| node.build_image(SizeRequest::Minimum));
    let image = node.image().unwrap();
    assert_eq!(image.size(), DeviceSize::new(FALLBACK_IMAGE_SIZE, FALLBACK_IMAGE_SIZE));
    assert_eq!(image.pixel(0, 0), Some(FALLBACK_IMAGE_COLOR));
    assert_eq!(node.state().rect.size, image.size());
    assert!(node.state().visible);
    assert_eq!(logs.warnings(), 1);
    assert_eq!(logs.errors(), 0);
  }

  #[test]
  fn fallback_is_built_once() {
    let mut node = Unpainted::default();
    node.build_image(SizeRequest::Minimum);
    node.state_mut().image.as_mut().unwrap().put_pixel(0, 0, Color::BLUE);
    node.build_image(SizeRequest::Fill { width: Some(10), height: 10 });
    assert_eq!(node.state().image.as_ref().unwrap().pixel(0, 0), Some(Color::BLUE));
  }

  #[test]
  fn leaves_ignore_messages_by_default() {
    let mut node = Node::leaf(Unpainted::default());
    assert!(!node.handle(&Message::KeyDown(1)));
    assert!(node.update(Duration::from_millis(16)).is_empty());
  }

  #[test]
  fn containers_enter_the_tree_as_containers() {
    let node = Node::from(Container::new(Overlap, vec![]));
    assert!(node.is_container());
    assert!(node.downcast_ref::<Unpainted>().is_none());
  }
}
