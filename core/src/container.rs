use std::time::Duration;

use wargui_geom::{
  DevicePoint, DeviceRect, DeviceSize, ScreenRect, ScreenUnit, ScreenVector, clip_to,
};
use wargui_painter::{Color, PixelImage};

use crate::{
  align::Align,
  events::Message,
  node::{MinSize, Node, NodeState, Renderable, SizeRequest, Sizable},
};

pub const DEFAULT_BORDER: i32 = 4;

/// What a container does with space offered beyond its minimum size on the
/// axis it stacks along.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StretchPolicy {
  /// Keep the image at its natural size and ignore the extra space.
  #[default]
  Natural,
  /// When the children are aligned to the start edge (TOP for a column,
  /// LEFT for a row), lay them out at their natural size and pad the rest of
  /// the offered extent with the background. Any other alignment keeps the
  /// natural size.
  PadStart,
}

/// The declarations a layout strategy reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStyle {
  /// Inset around the content, in pixels. Siblings are `2 * border` apart.
  pub border: i32,
  pub background: Color,
  /// Alignment of children that state no preference of their own.
  pub align_children: Align,
  /// Whether the container wants all the space it is offered.
  pub fill: bool,
  pub stretch: StretchPolicy,
}

impl Default for ContainerStyle {
  fn default() -> Self {
    Self {
      border: DEFAULT_BORDER,
      background: Color::BLACK,
      align_children: Align::Centre,
      fill: true,
      stretch: StretchPolicy::Natural,
    }
  }
}

impl ContainerStyle {
  /// The space between two neighbouring children.
  #[inline]
  pub fn gap(&self) -> i32 { self.border * 2 }

  /// Sum of `count` gaps between `count + 1` children, never negative.
  #[inline]
  pub fn gaps(&self, children: usize) -> i32 { children.saturating_sub(1) as i32 * self.gap() }

  /// A background filled surface of `size`.
  #[inline]
  pub fn surface(&self, size: DeviceSize) -> PixelImage { PixelImage::from_color(size, self.background) }
}

/// A strategy arranging the children of a [`Container`].
pub trait Layout {
  /// The style a container using this strategy starts with.
  fn default_style(&self) -> ContainerStyle { ContainerStyle::default() }

  /// The aggregate minimum size of `children`.
  ///
  /// Every strategy should provide this. The default only exists so a
  /// forgotten implementation shows up in the log instead of breaking the
  /// frame: it reports an empty size.
  fn minimum_size(&self, _style: &ContainerStyle, _children: &[Node]) -> MinSize {
    log::error!("layout `{}` does not override `minimum_size`", std::any::type_name::<Self>());
    MinSize::default()
  }

  /// Lay the children out at exactly the minimum size.
  fn build_simple_image(&self, style: &ContainerStyle, children: &mut [Node]) -> PixelImage;

  /// Lay the children out in an externally imposed extent. A `None` width
  /// is the container's own minimum width.
  ///
  /// Strategies without a stretching algorithm build the simple image.
  fn build_full_image(
    &self, style: &ContainerStyle, children: &mut [Node], _width: Option<i32>, _height: i32,
  ) -> PixelImage {
    self.build_simple_image(style, children)
  }
}

/// Place `image` at the top-left of a background filled surface of `size`.
pub fn pad_image(image: &PixelImage, size: DeviceSize, background: Color) -> PixelImage {
  let mut surface = PixelImage::from_color(size, background);
  surface.blit(image, DevicePoint::zero());
  surface
}

/// A node owning an ordered list of children, arranged by a [`Layout`].
///
/// The order of the children is both the stacking order and the paint
/// order. The container is invisible until its image is built.
pub struct Container {
  state: NodeState,
  style: ContainerStyle,
  layout: Box<dyn Layout>,
  children: Vec<Node>,
}

impl Container {
  pub fn new(layout: impl Layout + 'static, children: Vec<Node>) -> Self {
    Self {
      state: NodeState::default(),
      style: layout.default_style(),
      layout: Box::new(layout),
      children,
    }
  }

  pub fn with_border(mut self, border: i32) -> Self {
    self.style.border = border;
    self
  }

  pub fn with_background(mut self, background: Color) -> Self {
    self.style.background = background;
    self
  }

  pub fn with_align_children(mut self, align: Align) -> Self {
    self.style.align_children = align;
    self
  }

  pub fn with_fill(mut self, fill: bool) -> Self {
    self.style.fill = fill;
    self
  }

  pub fn with_stretch(mut self, stretch: StretchPolicy) -> Self {
    self.style.stretch = stretch;
    self
  }

  /// The container's own alignment inside its parent.
  pub fn with_align(mut self, align: Align) -> Self {
    self.state.align = align;
    self
  }

  #[inline]
  pub fn style(&self) -> &ContainerStyle { &self.style }

  #[inline]
  pub fn children(&self) -> &[Node] { &self.children }

  /// Children can be changed in place; pixels they report dirty are picked
  /// up by the next [`Renderable::update`]. Call
  /// [`Container::invalidate_layout`] after changing a size.
  #[inline]
  pub fn children_mut(&mut self) -> &mut [Node] { &mut self.children }

  #[inline]
  pub fn image(&self) -> Option<&PixelImage> { self.state.image.as_ref() }

  /// Append a child. The cached image is dropped, the next layout pass
  /// rebuilds it.
  pub fn push(&mut self, child: impl Into<Node>) {
    self.children.push(child.into());
    self.state.clear_image();
  }

  /// Drop the images of this container and all nested containers so the
  /// next layout pass lays the whole subtree out again. Leaf images are
  /// kept.
  pub fn invalidate_layout(&mut self) {
    self.state.clear_image();
    self
      .children
      .iter_mut()
      .filter_map(Node::as_container_mut)
      .for_each(Container::invalidate_layout);
  }

  /// Lay the children out at the minimum size and return the new image.
  pub fn rebuild(&mut self) -> &PixelImage {
    self.build_leaves();
    let Self { state, style, layout, children } = self;
    let image = layout.build_simple_image(style, children);
    log::debug!("container rebuilt at {}x{}", image.width(), image.height());
    state.set_image(image)
  }

  /// Tell the container where its image sits inside its parent's image.
  #[inline]
  pub fn update_position(&mut self, offset: DevicePoint) { self.state.offset = offset; }

  /// Children are asked in order; the first one consuming the message stops
  /// the walk.
  pub fn handle(&mut self, message: &Message) -> bool {
    self
      .children
      .iter_mut()
      .any(|child| child.handle(&message.into_child(child.offset())))
  }

  /// Route a screen space message. `frame` is the screen rect of the image
  /// this container is composited into.
  pub fn handle_screen(&mut self, message: &Message<ScreenUnit>, frame: &ScreenRect) -> bool {
    let offset: ScreenVector = self.state.offset.to_vector().cast_unit();
    let origin = frame.origin + offset;
    self.handle(&message.to_local(origin))
  }

  /// Leaves without an image get one before the layout measures them, so a
  /// leaf falling back to the default square is sized by that square.
  /// Nested containers are left to the layout.
  fn build_leaves(&mut self) {
    self
      .children
      .iter_mut()
      .filter(|child| !child.is_container())
      .for_each(|child| child.ensure_image(SizeRequest::Minimum));
  }
}

impl Sizable for Container {
  fn minimum_size(&self) -> MinSize { self.layout.minimum_size(&self.style, &self.children) }
}

impl Renderable for Container {
  #[inline]
  fn state(&self) -> &NodeState { &self.state }

  #[inline]
  fn state_mut(&mut self) -> &mut NodeState { &mut self.state }

  fn build_image(&mut self, request: SizeRequest) {
    self.build_leaves();
    let Self { state, style, layout, children } = self;
    let image = match request {
      SizeRequest::Minimum => layout.build_simple_image(style, children),
      SizeRequest::Fill { width, height } => layout.build_full_image(style, children, width, height),
    };
    log::debug!("container built {}x{} for {request:?}", image.width(), image.height());
    state.set_image(image);
  }

  /// Collect the dirty rects of the subtree. Each child's rects are moved by
  /// the child's offset into this container's space, and the changed child
  /// pixels are copied into this container's image, so the image is current
  /// when the rects reach the parent.
  fn update(&mut self, time_delta: Duration) -> Vec<DeviceRect> {
    let Self { state, children, .. } = self;
    let mut dirty = vec![];
    for child in children.iter_mut() {
      let rects = child.update(time_delta);
      if rects.is_empty() {
        continue;
      }
      let child_size = child.state().rect.size;
      let offset = child.offset();
      for rect in rects {
        let Some(rect) = clip_to(&rect, child_size) else {
          continue;
        };
        let moved = rect.translate(offset.to_vector());
        if let (Some(dst), Some(src)) = (state.image.as_mut(), child.image()) {
          dst.blit_area(src, &rect, moved.origin);
        }
        log::trace!("dirty {rect:?} -> {moved:?}");
        dirty.push(moved);
      }
    }
    dirty
  }
}

impl std::fmt::Debug for Container {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Container")
      .field("rect", &self.state.rect)
      .field("style", &self.style)
      .field("children", &self.children)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use wargui_dev_helper::capture_logs;
  use wargui_geom::{ScreenPoint, ScreenSize};

  use super::*;
  use crate::{gui_node::GuiNode, test_helper::*};

  struct Unfinished;

  impl Layout for Unfinished {
    fn build_simple_image(&self, style: &ContainerStyle, _: &mut [Node]) -> PixelImage {
      style.surface(DeviceSize::new(1, 1))
    }
  }

  #[test]
  fn missing_minimum_size_is_logged() {
    let container = Container::new(Unfinished, vec![solid(10, 10, Color::WHITE).into()]);
    let (size, logs) = capture_logs(|| container.minimum_size());
    assert_eq!(size, MinSize::new(0, 0, false));
    assert_eq!(logs.errors(), 1);
    assert!(logs.contains("minimum_size"));
  }

  #[test]
  fn build_resets_rect_and_visibility() {
    let mut container = Container::new(Overlap, vec![solid(10, 20, Color::WHITE).into()]);
    assert!(!container.state().visible);
    assert!(container.image().is_none());

    container.build_image(SizeRequest::Minimum);
    let image = container.image().unwrap();
    assert_eq!(container.state().rect.size, image.size());
    assert_eq!(image.size(), DeviceSize::new(18, 28));
    assert!(container.state().visible);
  }

  #[test]
  fn rebuild_returns_the_installed_image() {
    let mut container = Container::new(Overlap, vec![solid(2, 2, Color::WHITE).into()]);
    let size = container.rebuild().size();
    assert_eq!(size, DeviceSize::new(10, 10));
    assert_eq!(container.state().rect.size, size);
    assert!(container.state().visible);
  }

  #[test]
  fn gaps_never_negative() {
    let style = ContainerStyle::default();
    assert_eq!(style.gaps(0), 0);
    assert_eq!(style.gaps(1), 0);
    assert_eq!(style.gaps(3), 16);
  }

  #[test]
  fn first_consumer_stops_the_walk() {
    let calls = Rc::new(RefCell::new(vec![]));
    let child = |id: usize, consume: bool| {
      let calls = calls.clone();
      GuiNode::from_image(PixelImage::from_color(DeviceSize::new(4, 4), Color::WHITE)).on_message(
        move |_| {
          calls.borrow_mut().push(id);
          consume
        },
      )
    };
    let mut container = Container::new(
      Overlap,
      vec![child(0, false).into(), child(1, true).into(), child(2, true).into()],
    );

    assert!(container.handle(&Message::KeyDown(32)));
    assert_eq!(*calls.borrow(), vec![0, 1]);
  }

  #[test]
  fn nobody_consumes() {
    let mut container = Container::new(Overlap, vec![solid(4, 4, Color::WHITE).into()]);
    assert!(!container.handle(&Message::KeyDown(32)));
  }

  #[test]
  fn pointer_reaches_child_in_its_own_space() {
    let seen = Rc::new(RefCell::new(None));
    let seen2 = seen.clone();
    let leaf = solid(10, 10, Color::WHITE).on_message(move |m| {
      *seen2.borrow_mut() = m.position();
      true
    });
    let mut container = Container::new(Overlap, vec![leaf.into()]);
    container.build_image(SizeRequest::Minimum);
    container.update_position(DevicePoint::new(7, 9));

    let frame = ScreenRect::new(ScreenPoint::new(100, 200), ScreenSize::new(50, 50));
    let msg = Message::<ScreenUnit>::PointerDown(ScreenPoint::new(120, 220));
    assert!(container.handle_screen(&msg, &frame));
    // screen - frame origin - container offset - child offset (border 4)
    assert_eq!(*seen.borrow(), Some(DevicePoint::new(9, 7)));
  }

  #[test]
  fn dirty_rect_moves_by_child_offset() {
    let mut container = Container::new(Overlap, vec![solid(10, 10, Color::WHITE).into()]);
    container.build_image(SizeRequest::Minimum);
    assert_eq!(container.children()[0].offset(), DevicePoint::new(4, 4));

    let leaf = leaf_mut::<GuiNode>(&mut container, 0);
    leaf.invalidate(DeviceRect::new(DevicePoint::new(2, 3), DeviceSize::new(5, 6)));
    let dirty = container.update(Duration::from_millis(16));
    assert_eq!(dirty, vec![DeviceRect::new(DevicePoint::new(6, 7), DeviceSize::new(5, 6))]);
  }

  #[test]
  fn dirty_pixels_are_copied_into_the_container() {
    let mut container = Container::new(Overlap, vec![solid(10, 10, Color::WHITE).into()]);
    container.build_image(SizeRequest::Minimum);

    let leaf = leaf_mut::<GuiNode>(&mut container, 0);
    leaf
      .replace_image(PixelImage::from_color(DeviceSize::new(10, 10), Color::RED))
      .unwrap();
    let dirty = container.update(Duration::ZERO);

    assert_eq!(dirty, vec![DeviceRect::new(DevicePoint::new(4, 4), DeviceSize::new(10, 10))]);
    let image = container.image().unwrap();
    assert_eq!(image.pixel(4, 4), Some(Color::RED));
    assert_eq!(image.pixel(13, 13), Some(Color::RED));
    assert_eq!(image.pixel(3, 3), Some(Color::BLACK));
    // reported once only
    assert!(container.update(Duration::ZERO).is_empty());
  }

  #[test]
  fn dirty_rect_clipped_to_child() {
    let mut container = Container::new(Overlap, vec![solid(10, 10, Color::WHITE).into()]);
    container.build_image(SizeRequest::Minimum);
    let leaf = leaf_mut::<GuiNode>(&mut container, 0);
    leaf.invalidate(DeviceRect::new(DevicePoint::new(8, 8), DeviceSize::new(5, 5)));
    leaf.invalidate(DeviceRect::new(DevicePoint::new(20, 20), DeviceSize::new(5, 5)));

    let dirty = container.update(Duration::ZERO);
    assert_eq!(dirty, vec![DeviceRect::new(DevicePoint::new(12, 12), DeviceSize::new(2, 2))]);
  }

  #[test]
  fn push_drops_cached_image() {
    let mut container = Container::new(Overlap, vec![]);
    container.build_image(SizeRequest::Minimum);
    assert!(container.state().visible);

    container.push(solid(3, 3, Color::WHITE));
    assert!(container.image().is_none());
    assert!(!container.state().visible);
    container.build_image(SizeRequest::Minimum);
    assert_eq!(container.image().unwrap().size(), DeviceSize::new(11, 11));
  }

  #[test]
  fn invalidate_layout_reaches_nested_containers() {
    let inner = Container::new(Overlap, vec![solid(3, 3, Color::WHITE).into()]);
    let mut outer = Container::new(Overlap, vec![inner.into()]);
    outer.build_image(SizeRequest::Minimum);
    assert!(outer.children()[0].image().is_some());

    outer.invalidate_layout();
    assert!(outer.image().is_none());
    let inner = outer.children()[0].as_container().unwrap();
    assert!(inner.image().is_none());
    assert!(inner.children()[0].image().is_some());
  }
}
