//! Pixel surfaces and the colour model the layout engine composites with.
pub mod color;
pub mod image;
pub mod text;

pub use crate::{
  color::Color,
  image::PixelImage,
  text::{FontError, FontRasterizer, TextRasterizer},
};
