pub use wargui_core as core;
#[cfg(feature = "widgets")]
pub use wargui_widgets as widgets;

pub mod prelude {
  pub use log;
  pub use wargui_core::prelude::*;

  #[cfg(feature = "widgets")]
  pub use super::widgets::prelude::*;
}
