pub mod border;
pub mod image;
pub mod label;
pub mod layout;
pub mod prelude {
  pub use super::border::*;
  pub use super::image::*;
  pub use super::label::*;
  pub use super::layout::*;
}
