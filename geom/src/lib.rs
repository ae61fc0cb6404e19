/// The tag for pixels measured from the origin of a node's own image, or of
/// the image it is composited into. Prevents mixing local values with screen
/// values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalUnit;

/// The tag for absolute display pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenUnit;

pub type DeviceRect<T = i32> = euclid::Rect<T, LocalUnit>;
pub type DevicePoint<T = i32> = euclid::Point2D<T, LocalUnit>;
pub type DeviceSize<T = i32> = euclid::Size2D<T, LocalUnit>;
pub type DeviceVector<T = i32> = euclid::Vector2D<T, LocalUnit>;

pub type ScreenRect<T = i32> = euclid::Rect<T, ScreenUnit>;
pub type ScreenPoint<T = i32> = euclid::Point2D<T, ScreenUnit>;
pub type ScreenSize<T = i32> = euclid::Size2D<T, ScreenUnit>;
pub type ScreenVector<T = i32> = euclid::Vector2D<T, ScreenUnit>;

/// An integer point in any of the unit systems above.
pub type PixelPoint<U> = euclid::Point2D<i32, U>;

pub const ZERO_SIZE: DeviceSize = DeviceSize::new(0, 0);

/// Express a rect relative to an image whose top-left corner sits at `origin`
/// on the screen as an absolute screen rect.
#[inline]
pub fn to_screen(rect: &DeviceRect, origin: ScreenPoint) -> ScreenRect {
  rect.cast_unit().translate(origin.to_vector())
}

/// The inverse of [`to_screen`] for a single point.
#[inline]
pub fn to_local(point: ScreenPoint, origin: ScreenPoint) -> DevicePoint {
  (point - origin.to_vector()).cast_unit()
}

/// Top-left position that centres a box of `size` on a display of `screen`.
/// Odd remainders are floored, a box larger than the display gets a negative
/// position.
pub fn centre_in(size: DeviceSize, screen: ScreenSize) -> ScreenPoint {
  ScreenPoint::new((screen.width - size.width).div_euclid(2), (screen.height - size.height).div_euclid(2))
}

/// Clip `rect` to the bounds of an image of `size` placed at the origin.
#[inline]
pub fn clip_to(rect: &DeviceRect, size: DeviceSize) -> Option<DeviceRect> {
  rect.intersection(&DeviceRect::from_size(size))
}
