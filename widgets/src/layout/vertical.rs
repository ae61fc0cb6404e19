use wargui_core::prelude::*;

use super::{Direction, stretch_along};

/// Stacks children top to bottom, `2 * border` apart, inside a `border`
/// inset. Children narrower than the widest one are placed by their
/// horizontal alignment.
///
/// Offered more height than it needs, a column aligned to the top pads the
/// rest with its background; other alignments keep their natural size.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerticalLayout;

/// A column of `children` on `background`, with the default border.
pub fn vertical_container(children: Vec<Node>, background: Color) -> Container {
  Container::new(VerticalLayout, children).with_background(background)
}

impl Layout for VerticalLayout {
  fn default_style(&self) -> ContainerStyle {
    ContainerStyle { stretch: StretchPolicy::PadStart, ..<_>::default() }
  }

  fn minimum_size(&self, style: &ContainerStyle, children: &[Node]) -> MinSize {
    let (width, height) = children
      .iter()
      .map(Node::minimum_size)
      .fold((0, 0), |(w, h), m| (w.max(m.width), h + m.height));
    let inset = 2 * style.border;
    MinSize::new(width + inset, height + style.gaps(children.len()) + inset, style.fill)
  }

  fn build_simple_image(&self, style: &ContainerStyle, children: &mut [Node]) -> PixelImage {
    let size = self.minimum_size(style, children).size();
    let mut image = style.surface(size);
    let content_width = size.width - 2 * style.border;

    let mut y = style.border;
    for child in children.iter_mut() {
      let child_width = child.minimum_size().width;
      let mut x = style.border;
      if child_width < content_width {
        let align = child.align().or(style.align_children);
        x += align.h_align().align_value(child_width, content_width);
      }

      child.ensure_image(SizeRequest::Minimum);
      let at = DevicePoint::new(x, y);
      child.state_mut().offset = at;
      let Some(pixels) = child.image() else { continue };
      image.blit(pixels, at);
      y += pixels.height() as i32 + style.gap();
    }
    image
  }

  fn build_full_image(
    &self, style: &ContainerStyle, children: &mut [Node], width: Option<i32>, height: i32,
  ) -> PixelImage {
    let simple = self.build_simple_image(style, children);
    stretch_along(Direction::Vertical, style, children, simple, width, height)
  }
}
