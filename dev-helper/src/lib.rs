//! Test support: log capture and pixel assertions.
mod log_capture;

pub use image_test::*;
pub use log_capture::*;
