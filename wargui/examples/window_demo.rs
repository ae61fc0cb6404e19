//! Builds a framed window, changes one leaf per frame and prints the screen
//! rects a host would have to redraw.
//!
//! `cargo run --example window_demo -- path/to/font.ttf` renders the labels
//! with that font; without one, text is drawn as blocks.
use std::time::Duration;

use wargui::prelude::*;

const BORDERS: &str = r#"{
  "WindowBorder": {
    "image": "frame",
    "border_size": 3,
    "background": { "red": 20, "green": 20, "blue": 30 },
    "rects": {
      "top_left": [0, 0, 6, 6],
      "top": [6, 0, 6, 6],
      "top_right": [12, 0, 6, 6],
      "middle_left": [0, 6, 6, 6],
      "middle_right": [12, 6, 6, 6],
      "bottom_left": [0, 12, 6, 6],
      "bottom": [6, 12, 6, 6],
      "bottom_right": [12, 12, 6, 6]
    }
  }
}"#;

struct Blocks;

impl TextRasterizer for Blocks {
  fn rasterize(&self, text: &str, color: Color, background: Color) -> PixelImage {
    let mut image = PixelImage::from_color(DeviceSize::new(text.chars().count() as i32 * 8, 14), background);
    let glyph = PixelImage::from_color(DeviceSize::new(6, 10), color);
    for (i, c) in text.chars().enumerate() {
      if !c.is_whitespace() {
        image.blit(&glyph, DevicePoint::new(i as i32 * 8 + 1, 2));
      }
    }
    image
  }
}

fn frame_image() -> PixelImage {
  let mut image = PixelImage::from_color(DeviceSize::new(18, 18), Color::GRAY);
  image.blit(&PixelImage::from_color(DeviceSize::new(6, 6), Color::LIGHTGRAY), DevicePoint::new(6, 6));
  image
}

fn load_assets(font: Option<String>) -> Result<AssetStore, Box<dyn std::error::Error>> {
  let screen = ScreenSize::new(800, 600);
  let mut store = match font {
    Some(path) => AssetStore::new(screen, FontRasterizer::from_bytes(&std::fs::read(path)?, 16.)?),
    None => AssetStore::new(screen, Blocks),
  };
  store.insert_image("frame", frame_image());
  store.insert_image("unit", PixelImage::from_color(DeviceSize::new(32, 32), Color::DARKGRAY));
  let loaded = store.load_borders(BORDERS)?;
  log::info!("loaded {loaded} border configuration(s)");
  Ok(store)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();
  let res = load_assets(std::env::args().nth(1))?;

  let title = LabelStyle { color: Color::YELLOW, background: Color::BLACK, ..<_>::default() };
  let units = horizontal_container(
    vec![
      GuiImage::from_asset("unit", &res)?.into(),
      GuiImage::from_asset("unit", &res)?.with_align(Align::Bottom).into(),
      GuiNode::from_image(PixelImage::from_color(DeviceSize::new(32, 48), Color::GREEN))
        .on_message(|m| m.hits(DeviceSize::new(32, 48)))
        .into(),
    ],
    Color::BLACK,
  );
  let contents = vertical_container(
    vec![
      GuiLabel::new("Turn 1", &title, &res).into(),
      units.into(),
      GuiLabel::new("End turn", &LabelStyle::default(), &res).into(),
    ],
    Color::BLACK,
  );
  let mut window = Window::new(contents, None, &res)?;
  log::info!("window at {:?}", window.rect());

  let colors = [Color::RED, Color::BLUE, Color::GREEN];
  for (frame, color) in colors.into_iter().enumerate() {
    let Some(row) = window.contents_mut().children_mut()[1].as_container_mut() else {
      break;
    };
    if let Some(leaf) = row.children_mut()[2].downcast_mut::<GuiNode>() {
      leaf.replace_image(PixelImage::from_color(DeviceSize::new(32, 48), color))?;
    }
    let dirty = window.update(Duration::from_millis(16));
    log::info!("frame {frame}: redraw {dirty:?}");
  }

  let click = window.rect().center();
  let consumed = window.handle(&Message::PointerDown(click));
  log::info!("click at {click:?} consumed: {consumed}");

  #[cfg(feature = "png")]
  window
    .image()
    .write_as_png(&mut std::fs::File::create("window_demo.png")?)?;
  Ok(())
}
