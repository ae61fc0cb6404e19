use wargui_core::prelude::*;

use super::{Direction, stretch_along};

/// Places children left to right, `2 * border` apart, inside a `border`
/// inset. Children shorter than the tallest one are placed by their vertical
/// alignment.
///
/// Nested containers are built at their natural width and the full content
/// height, so a column inside a row can stretch to the row's height.
#[derive(Debug, Default, Clone, Copy)]
pub struct HorizontalLayout;

/// A row of `children` on `background`, with the default border.
pub fn horizontal_container(children: Vec<Node>, background: Color) -> Container {
  Container::new(HorizontalLayout, children).with_background(background)
}

impl Layout for HorizontalLayout {
  fn minimum_size(&self, style: &ContainerStyle, children: &[Node]) -> MinSize {
    let (width, height) = children
      .iter()
      .map(Node::minimum_size)
      .fold((0, 0), |(w, h), m| (w + m.width, h.max(m.height)));
    let inset = 2 * style.border;
    MinSize::new(width + style.gaps(children.len()) + inset, height + inset, style.fill)
  }

  fn build_simple_image(&self, style: &ContainerStyle, children: &mut [Node]) -> PixelImage {
    let size = self.minimum_size(style, children).size();
    let mut image = style.surface(size);
    let content_height = size.height - 2 * style.border;

    let mut x = style.border;
    for child in children.iter_mut() {
      child.ensure_image(SizeRequest::Fill { width: None, height: content_height });
      // A nested container may have grown to the content height, so place
      // by what was built rather than by the minimum size.
      let child_height = child.state().rect.height();
      let mut y = style.border;
      if child_height < content_height {
        let align = child.align().or(style.align_children);
        y += align.v_align().align_value(child_height, content_height);
      }

      let at = DevicePoint::new(x, y);
      child.state_mut().offset = at;
      let Some(pixels) = child.image() else { continue };
      image.blit(pixels, at);
      x += pixels.width() as i32 + style.gap();
    }
    image
  }

  fn build_full_image(
    &self, style: &ContainerStyle, children: &mut [Node], width: Option<i32>, height: i32,
  ) -> PixelImage {
    let simple = self.build_simple_image(style, children);
    stretch_along(Direction::Horizontal, style, children, simple, width, height)
  }
}
