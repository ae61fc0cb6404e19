use serde::{Deserialize, Serialize};

/// How a node wants to sit inside space larger than it needs.
///
/// A node's own alignment overrides the child alignment its container
/// declares, unless it is [`Align::None`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
  /// No preference, the container decides.
  #[default]
  None,
  Left,
  Right,
  Top,
  Bottom,
  /// Centred on both axes.
  Centre,
  TopLeft,
  TopRight,
  BottomLeft,
  BottomRight,
}

/// The horizontal projection of an [`Align`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HAlign {
  Left,
  #[default]
  Centre,
  Right,
}

/// The vertical projection of an [`Align`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VAlign {
  Top,
  #[default]
  Centre,
  Bottom,
}

impl Align {
  /// `self`, or `fallback` when `self` states no preference.
  #[inline]
  pub fn or(self, fallback: Align) -> Align { if self == Align::None { fallback } else { self } }

  /// Values without a horizontal component project to the centre.
  pub fn h_align(self) -> HAlign {
    match self {
      Align::Left | Align::TopLeft | Align::BottomLeft => HAlign::Left,
      Align::Right | Align::TopRight | Align::BottomRight => HAlign::Right,
      Align::None | Align::Top | Align::Bottom | Align::Centre => HAlign::Centre,
    }
  }

  /// Values without a vertical component project to the centre.
  pub fn v_align(self) -> VAlign {
    match self {
      Align::Top | Align::TopLeft | Align::TopRight => VAlign::Top,
      Align::Bottom | Align::BottomLeft | Align::BottomRight => VAlign::Bottom,
      Align::None | Align::Left | Align::Right | Align::Centre => VAlign::Centre,
    }
  }
}

impl HAlign {
  /// The x offset of a child `child_size` wide in a box `box_size` wide.
  pub fn align_value(self, child_size: i32, box_size: i32) -> i32 {
    match self {
      HAlign::Left => 0,
      HAlign::Centre => (box_size - child_size).div_euclid(2),
      HAlign::Right => box_size - child_size,
    }
  }
}

impl VAlign {
  /// The y offset of a child `child_size` high in a box `box_size` high.
  pub fn align_value(self, child_size: i32, box_size: i32) -> i32 {
    match self {
      VAlign::Top => 0,
      VAlign::Centre => (box_size - child_size).div_euclid(2),
      VAlign::Bottom => box_size - child_size,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn none_falls_back() {
    assert_eq!(Align::None.or(Align::Right), Align::Right);
    assert_eq!(Align::Left.or(Align::Right), Align::Left);
  }

  #[test]
  fn projections() {
    assert_eq!(Align::TopRight.h_align(), HAlign::Right);
    assert_eq!(Align::TopRight.v_align(), VAlign::Top);
    assert_eq!(Align::Top.h_align(), HAlign::Centre);
    assert_eq!(Align::Left.v_align(), VAlign::Centre);
    assert_eq!(Align::None.h_align(), HAlign::Centre);
  }

  #[test]
  fn centre_floors_the_slack() {
    assert_eq!(HAlign::Centre.align_value(60, 100), 20);
    assert_eq!(HAlign::Centre.align_value(61, 100), 19);
    assert_eq!(VAlign::Bottom.align_value(10, 30), 20);
    assert_eq!(VAlign::Top.align_value(10, 30), 0);
  }
}
