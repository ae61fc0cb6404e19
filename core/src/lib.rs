//! The node tree of the layout engine: leaves, containers, the layout
//! strategy seam, dirty rect propagation and message routing.
pub mod align;
pub mod container;
pub mod events;
pub mod gui_node;
pub mod node;
pub mod resources;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helper;

pub mod prelude {
  #[doc(no_inline)]
  pub use wargui_geom::*;
  #[doc(no_inline)]
  pub use wargui_painter::{Color, FontError, FontRasterizer, PixelImage, TextRasterizer};

  pub use crate::{align::*, container::*, events::*, gui_node::*, node::*, resources::*};
}
