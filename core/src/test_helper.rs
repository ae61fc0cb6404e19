//! Fixtures shared by the unit tests of this crate and of the widget crates.

use wargui_geom::{DevicePoint, DeviceSize, ScreenSize};
use wargui_painter::{Color, PixelImage, TextRasterizer};

use crate::{
  container::{Container, ContainerStyle, Layout},
  gui_node::GuiNode,
  node::{MessageHandler, MinSize, Node, NodeState, Renderable, SizeRequest, Sizable, Widget},
  resources::AssetStore,
};

/// Width and height of one character cell drawn by [`BlockText`].
pub const CELL_WIDTH: i32 = 8;
pub const CELL_HEIGHT: i32 = 16;

/// A border configuration named `WindowBorder` over the 12x12 `border`
/// image installed by [`mock_store`]: 4 pixel pieces and a 2 pixel band.
pub const WINDOW_BORDER_JSON: &str = r#"{
  "WindowBorder": {
    "image": "border",
    "border_size": 2,
    "background": { "red": 40, "green": 40, "blue": 40 },
    "rects": {
      "top_left": [0, 0, 4, 4],
      "top": [4, 0, 4, 4],
      "top_right": [8, 0, 4, 4],
      "middle_left": [0, 4, 4, 4],
      "middle_right": [8, 4, 4, 4],
      "bottom_left": [0, 8, 4, 4],
      "bottom": [4, 8, 4, 4],
      "bottom_right": [8, 8, 4, 4]
    }
  }
}"#;

/// Colours of the `border` image: corners, horizontal edges, vertical edges.
pub const BORDER_CORNER: Color = Color::YELLOW;
pub const BORDER_EDGE_H: Color = Color::GREEN;
pub const BORDER_EDGE_V: Color = Color::BLUE;

/// Draws every character as a fixed size cell: a solid block for visible
/// characters, background for whitespace.
pub struct BlockText;

impl TextRasterizer for BlockText {
  fn rasterize(&self, text: &str, color: Color, background: Color) -> PixelImage {
    let cells = text.chars().count() as i32;
    let mut image = PixelImage::from_color(DeviceSize::new(cells * CELL_WIDTH, CELL_HEIGHT), background);
    let glyph = PixelImage::from_color(DeviceSize::new(CELL_WIDTH - 2, CELL_HEIGHT - 4), color);
    for (i, _) in text.chars().enumerate().filter(|(_, c)| !c.is_whitespace()) {
      image.blit(&glyph, DevicePoint::new(i as i32 * CELL_WIDTH + 1, 2));
    }
    image
  }
}

/// A solid colour leaf.
pub fn solid(width: i32, height: i32, color: Color) -> GuiNode {
  GuiNode::from_image(PixelImage::from_color(DeviceSize::new(width, height), color))
}

/// A leaf that never paints, so it shows the fallback square once built.
/// Its minimum size is whatever it was last built at.
#[derive(Default)]
pub struct Unpainted {
  state: NodeState,
}

impl Sizable for Unpainted {
  fn minimum_size(&self) -> MinSize { MinSize::new(self.state.rect.width(), self.state.rect.height(), false) }
}

impl Renderable for Unpainted {
  fn state(&self) -> &NodeState { &self.state }
  fn state_mut(&mut self) -> &mut NodeState { &mut self.state }
}

impl MessageHandler for Unpainted {}

/// The `border` image: each 4x4 piece filled with the colour of its role.
pub fn border_image() -> PixelImage {
  let mut image = PixelImage::from_color(DeviceSize::new(12, 12), BORDER_CORNER);
  let h_edge = PixelImage::from_color(DeviceSize::new(4, 4), BORDER_EDGE_H);
  let v_edge = PixelImage::from_color(DeviceSize::new(4, 4), BORDER_EDGE_V);
  image.blit(&h_edge, DevicePoint::new(4, 0));
  image.blit(&h_edge, DevicePoint::new(4, 8));
  image.blit(&v_edge, DevicePoint::new(0, 4));
  image.blit(&v_edge, DevicePoint::new(8, 4));
  image
}

/// An asset store with the `border` image, the `WindowBorder` configuration
/// and [`BlockText`] for text.
pub fn mock_store(screen: ScreenSize) -> AssetStore {
  let mut store = AssetStore::new(screen, BlockText);
  store.insert_image("border", border_image());
  if let Err(err) = store.load_borders(WINDOW_BORDER_JSON) {
    panic!("fixture border configuration is invalid: {err}");
  }
  store
}

/// The leaf at `idx` of `container` as its concrete type.
#[track_caller]
pub fn leaf_mut<T: Widget>(container: &mut Container, idx: usize) -> &mut T {
  match container.children_mut()[idx].downcast_mut::<T>() {
    Some(leaf) => leaf,
    None => panic!("child {idx} is not a `{}`", std::any::type_name::<T>()),
  }
}

/// Stacks all children on top of each other at the border inset.
pub struct Overlap;

impl Layout for Overlap {
  fn minimum_size(&self, style: &ContainerStyle, children: &[Node]) -> MinSize {
    let (w, h) = children
      .iter()
      .map(Node::minimum_size)
      .fold((0, 0), |(w, h), m| (w.max(m.width), h.max(m.height)));
    MinSize::new(w + 2 * style.border, h + 2 * style.border, false)
  }

  fn build_simple_image(&self, style: &ContainerStyle, children: &mut [Node]) -> PixelImage {
    let size = self.minimum_size(style, children).size();
    let mut image = style.surface(size);
    let at = DevicePoint::new(style.border, style.border);
    for child in children.iter_mut() {
      child.ensure_image(SizeRequest::Minimum);
      child.state_mut().offset = at;
      if let Some(pixels) = child.image() {
        image.blit(pixels, at);
      }
    }
    image
  }
}
