// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;


/// A two dimensional vector, used for points and offsets alike.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
  /// The horizontal component.
  pub x: f64,
  /// The vertical component. Positive values point upwards.
  pub y: f64,
}

impl Vector {
  /// Create a new `Vector`.
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// The null vector.
  pub const fn zero() -> Self {
    Self::new(0.0, 0.0)
  }
}

impl Add for Vector {
  type Output = Self;

  fn add(self, other: Self) -> Self {
    Self::new(self.x + other.x, self.y + other.y)
  }
}

impl AddAssign for Vector {
  fn add_assign(&mut self, other: Self) {
    *self = *self + other
  }
}

impl Sub for Vector {
  type Output = Self;

  fn sub(self, other: Self) -> Self {
    Self::new(self.x - other.x, self.y - other.y)
  }
}

impl SubAssign for Vector {
  fn sub_assign(&mut self, other: Self) {
    *self = *self - other
  }
}

impl Neg for Vector {
  type Output = Self;

  fn neg(self) -> Self {
    Self::new(-self.x, -self.y)
  }
}

impl Mul<f64> for Vector {
  type Output = Self;

  fn mul(self, factor: f64) -> Self {
    Self::new(self.x * factor, self.y * factor)
  }
}

impl Display for Vector {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "({}, {})", self.x, self.y)
  }
}


/// The extent of something, without a position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
  /// The horizontal extent.
  pub width: f64,
  /// The vertical extent.
  pub height: f64,
}

impl Size {
  /// Create a new `Size`.
  pub const fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }

  /// A size of zero along both axes.
  pub const fn zero() -> Self {
    Self::new(0.0, 0.0)
  }

  /// Calculate the component-wise maximum of two sizes.
  pub fn max(self, other: Self) -> Self {
    Self::new(self.width.max(other.width), self.height.max(other.height))
  }

  /// Check whether `self` can accommodate `other` along both axes.
  ///
  /// A tiny tolerance absorbs rounding errors accumulated while summing
  /// up sizes.
  pub fn fits(self, other: Self) -> bool {
    const EPSILON: f64 = 1e-9;
    other.width <= self.width + EPSILON && other.height <= self.height + EPSILON
  }
}

impl Display for Size {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{}x{}", self.width, self.height)
  }
}


/// An axis aligned rectangle.
///
/// The origin is the bottom left corner and y grows upwards. Widths and
/// heights are allowed to be negative and no operation assumes
/// otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
  /// The x-coordinate of the left edge.
  pub left: f64,
  /// The y-coordinate of the bottom edge.
  pub bottom: f64,
  /// The horizontal extent.
  pub width: f64,
  /// The vertical extent.
  pub height: f64,
}

impl Rect {
  /// Create a new `Rect` from its bottom left corner and its size.
  pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
    Self {
      left,
      bottom,
      width,
      height,
    }
  }

  /// Create a `Rect` of the given size located at the origin.
  pub const fn from_size(size: Size) -> Self {
    Self::new(0.0, 0.0, size.width, size.height)
  }

  /// Create a `Rect` spanning the two given corners.
  pub fn from_corners(bottom_left: Vector, top_right: Vector) -> Self {
    Self::new(
      bottom_left.x,
      bottom_left.y,
      top_right.x - bottom_left.x,
      top_right.y - bottom_left.y,
    )
  }

  /// Retrieve the size of the rectangle.
  pub fn size(&self) -> Size {
    Size::new(self.width, self.height)
  }

  /// Change the size of the rectangle, keeping the bottom left corner.
  pub fn set_size(&mut self, size: Size) {
    self.width = size.width;
    self.height = size.height;
  }

  /// The x-coordinate of the right edge.
  pub fn right(&self) -> f64 {
    self.left + self.width
  }

  /// Move the rectangle such that its right edge is at `x`.
  pub fn set_right(&mut self, x: f64) {
    self.left = x - self.width
  }

  /// The y-coordinate of the top edge.
  pub fn top(&self) -> f64 {
    self.bottom + self.height
  }

  /// Move the rectangle such that its top edge is at `y`.
  pub fn set_top(&mut self, y: f64) {
    self.bottom = y - self.height
  }

  /// The x-coordinate of the horizontal center.
  pub fn center_x(&self) -> f64 {
    self.left + self.width / 2.0
  }

  /// Move the rectangle such that its horizontal center is at `x`.
  pub fn set_center_x(&mut self, x: f64) {
    self.left = x - self.width / 2.0
  }

  /// The y-coordinate of the vertical center.
  pub fn center_y(&self) -> f64 {
    self.bottom + self.height / 2.0
  }

  /// Move the rectangle such that its vertical center is at `y`.
  pub fn set_center_y(&mut self, y: f64) {
    self.bottom = y - self.height / 2.0
  }

  /// The area covered by the rectangle.
  pub fn area(&self) -> f64 {
    self.width * self.height
  }

  /// Check whether the given point lies within the rectangle, edges
  /// included.
  pub fn contains(&self, x: f64, y: f64) -> bool {
    let (x1, x2) = ordered(self.left, self.right());
    let (y1, y2) = ordered(self.bottom, self.top());
    x1 <= x && x <= x2 && y1 <= y && y <= y2
  }

  /// Check whether the given vector lies within the rectangle.
  pub fn contains_vector(&self, point: Vector) -> bool {
    self.contains(point.x, point.y)
  }

  /// Calculate the intersection of two rectangles, if any.
  pub fn intersect(&self, other: &Rect) -> Option<Rect> {
    let (l1, r1) = ordered(self.left, self.right());
    let (b1, t1) = ordered(self.bottom, self.top());
    let (l2, r2) = ordered(other.left, other.right());
    let (b2, t2) = ordered(other.bottom, other.top());

    let left = l1.max(l2);
    let right = r1.min(r2);
    let bottom = b1.max(b2);
    let top = t1.min(t2);

    if left <= right && bottom <= top {
      Some(Rect::new(left, bottom, right - left, top - bottom))
    } else {
      None
    }
  }

  /// Shrink the rectangle by `padding` on every side.
  pub fn shrink(&self, padding: f64) -> Rect {
    Rect::new(
      self.left + padding,
      self.bottom + padding,
      self.width - 2.0 * padding,
      self.height - 2.0 * padding,
    )
  }

  /// Grow the rectangle by `padding` on every side.
  pub fn grow(&self, padding: f64) -> Rect {
    self.shrink(-padding)
  }

  /// Move the rectangle by the given offset.
  pub fn displace(&self, offset: Vector) -> Rect {
    Rect::new(self.left + offset.x, self.bottom + offset.y, self.width, self.height)
  }
}

/// Generate a getter/setter pair for a named anchor of a `Rect`.
macro_rules! anchor {
  ($get:ident, $set:ident, $x:ident, $set_x:ident, $y:ident, $set_y:ident) => {
    impl Rect {
      #[doc = concat!("The `", stringify!($get), "` anchor point.")]
      pub fn $get(&self) -> Vector {
        Vector::new(self.$x(), self.$y())
      }

      #[doc = concat!("Move the rectangle such that its `", stringify!($get), "` anchor is at `point`.")]
      pub fn $set(&mut self, point: Vector) {
        self.$set_x(point.x);
        self.$set_y(point.y);
      }
    }
  };
}

impl Rect {
  fn left_(&self) -> f64 {
    self.left
  }

  fn set_left_(&mut self, x: f64) {
    self.left = x
  }

  fn bottom_(&self) -> f64 {
    self.bottom
  }

  fn set_bottom_(&mut self, y: f64) {
    self.bottom = y
  }
}

anchor!(top_left, set_top_left, left_, set_left_, top, set_top);
anchor!(top_center, set_top_center, center_x, set_center_x, top, set_top);
anchor!(top_right, set_top_right, right, set_right, top, set_top);
anchor!(center_left, set_center_left, left_, set_left_, center_y, set_center_y);
anchor!(center, set_center, center_x, set_center_x, center_y, set_center_y);
anchor!(center_right, set_center_right, right, set_right, center_y, set_center_y);
anchor!(bottom_left, set_bottom_left, left_, set_left_, bottom_, set_bottom_);
anchor!(bottom_center, set_bottom_center, center_x, set_center_x, bottom_, set_bottom_);
anchor!(bottom_right, set_bottom_right, right, set_right, bottom_, set_bottom_);

impl Display for Rect {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(
      f,
      "Rect({}, {}, {}, {})",
      self.left, self.bottom, self.width, self.height
    )
  }
}


fn ordered(a: f64, b: f64) -> (f64, f64) {
  if a <= b {
    (a, b)
  } else {
    (b, a)
  }
}
