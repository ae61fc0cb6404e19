use wargui_geom::{
  DevicePoint, DeviceSize, LocalUnit, PixelPoint, ScreenPoint, ScreenUnit, to_local,
};

pub type KeyCode = u32;

/// An input message routed through the node tree.
///
/// The unit parameter tells which frame the pointer positions are expressed
/// in: hosts produce `Message<ScreenUnit>`, nodes receive `Message` in their
/// own local space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<U = LocalUnit> {
  PointerMove(PixelPoint<U>),
  PointerDown(PixelPoint<U>),
  PointerUp(PixelPoint<U>),
  KeyDown(KeyCode),
  KeyUp(KeyCode),
  /// Host defined message, passed through untouched.
  Custom(u32),
}

impl<U> Message<U> {
  /// The pointer position carried by the message, if any.
  pub fn position(&self) -> Option<PixelPoint<U>> {
    match *self {
      Message::PointerMove(p) | Message::PointerDown(p) | Message::PointerUp(p) => Some(p),
      _ => None,
    }
  }

  /// Re-express the pointer position with `f`, other messages pass through.
  pub fn map_position<V>(self, f: impl FnOnce(PixelPoint<U>) -> PixelPoint<V>) -> Message<V> {
    match self {
      Message::PointerMove(p) => Message::PointerMove(f(p)),
      Message::PointerDown(p) => Message::PointerDown(f(p)),
      Message::PointerUp(p) => Message::PointerUp(f(p)),
      Message::KeyDown(k) => Message::KeyDown(k),
      Message::KeyUp(k) => Message::KeyUp(k),
      Message::Custom(c) => Message::Custom(c),
    }
  }
}

impl Message {
  /// The message as seen by a child placed at `offset` in the receiver.
  #[inline]
  pub fn into_child(self, offset: DevicePoint) -> Message { self.map_position(|p| p - offset.to_vector()) }

  /// Whether the pointer position falls inside a box of `size` at the local
  /// origin. Messages without a position never hit.
  pub fn hits(&self, size: DeviceSize) -> bool {
    self
      .position()
      .is_some_and(|p| p.x >= 0 && p.y >= 0 && p.x < size.width && p.y < size.height)
  }
}

impl Message<ScreenUnit> {
  /// Localise a screen message for an image whose top-left corner sits at
  /// `origin` on the screen.
  #[inline]
  pub fn to_local(self, origin: ScreenPoint) -> Message { self.map_position(|p| to_local(p, origin)) }
}
