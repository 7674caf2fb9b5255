// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::derive::Handleable;
use crate::derive::Widget;
use crate::Cap;
use crate::Error;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Size;
use crate::Update;


/// A coordinate along one axis of a [`Board`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coord {
  /// An absolute distance in pixels.
  Px(f64),
  /// A fraction of the board's extent, e.g., `0.5` for half of it.
  Percent(f64),
}

impl Coord {
  fn linear(self) -> Linear {
    match self {
      Self::Px(px) => Linear::new(px, 0.0),
      Self::Percent(fraction) => Linear::new(0.0, fraction),
    }
  }
}


/// The placement of a child on a [`Board`].
///
/// All positions are measured from the board's bottom left corner. Per
/// axis a placement needs either one position (the child then gets its
/// minimum extent), a position and an extent, or two positions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
  /// The position of the child's left edge.
  pub left: Option<Coord>,
  /// The position of the child's right edge.
  pub right: Option<Coord>,
  /// The position of the child's bottom edge.
  pub bottom: Option<Coord>,
  /// The position of the child's top edge.
  pub top: Option<Coord>,
  /// The position of the child's horizontal center.
  pub center_x: Option<Coord>,
  /// The position of the child's vertical center.
  pub center_y: Option<Coord>,
  /// The child's width.
  pub width: Option<Coord>,
  /// The child's height.
  pub height: Option<Coord>,
}


/// A value depending linearly on the board extent `e`: `a + b * e`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Linear {
  a: f64,
  b: f64,
}

impl Linear {
  const fn new(a: f64, b: f64) -> Self {
    Self { a, b }
  }

  fn at(self, extent: f64) -> f64 {
    self.a + self.b * extent
  }

  fn plus(self, other: Self) -> Self {
    Self::new(self.a + other.a, self.b + other.b)
  }

  fn minus(self, other: Self) -> Self {
    Self::new(self.a - other.a, self.b - other.b)
  }

  fn scaled(self, factor: f64) -> Self {
    Self::new(self.a * factor, self.b * factor)
  }

  /// Determine the minimum extent satisfying `self >= bound`.
  fn min_extent(self, bound: f64, what: &str) -> Result<f64> {
    if self.b > 0.0 {
      Ok((bound - self.a) / self.b)
    } else if self.b == 0.0 {
      if self.a < bound {
        Err(Error::InvalidPlacement(format!(
          "{what} cannot be satisfied by any board size"
        )))
      } else {
        Ok(0.0)
      }
    } else {
      // The constraint only relaxes as the board grows.
      Ok(0.0)
    }
  }
}


/// The span of a child along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
  lo: Linear,
  hi: Linear,
}

impl Span {
  /// Determine the span of a child given its placement along one axis.
  fn resolve(
    axis: &str,
    lo: Option<Coord>,
    hi: Option<Coord>,
    center: Option<Coord>,
    extent: Option<Coord>,
    min: f64,
  ) -> Result<Self> {
    let min = Linear::new(min, 0.0);
    let lo = lo.map(Coord::linear);
    let hi = hi.map(Coord::linear);
    let center = center.map(Coord::linear);
    let extent = extent.map(Coord::linear);

    let span = match (lo, hi, center, extent) {
      (Some(lo), None, None, None) => Self { lo, hi: lo.plus(min) },
      (None, Some(hi), None, None) => Self { lo: hi.minus(min), hi },
      (None, None, Some(c), None) => Self {
        lo: c.minus(min.scaled(0.5)),
        hi: c.plus(min.scaled(0.5)),
      },
      (Some(lo), None, None, Some(e)) => Self { lo, hi: lo.plus(e) },
      (None, Some(hi), None, Some(e)) => Self { lo: hi.minus(e), hi },
      (None, None, Some(c), Some(e)) => Self {
        lo: c.minus(e.scaled(0.5)),
        hi: c.plus(e.scaled(0.5)),
      },
      (Some(lo), Some(hi), None, None) => Self { lo, hi },
      (Some(lo), None, Some(c), None) => Self {
        lo,
        hi: c.scaled(2.0).minus(lo),
      },
      (None, Some(hi), Some(c), None) => Self {
        lo: c.scaled(2.0).minus(hi),
        hi,
      },
      (None, None, None, _) => {
        return Err(Error::InvalidPlacement(format!(
          "no {axis} position given; provide one of the edges or the center"
        )))
      },
      _ => {
        return Err(Error::InvalidPlacement(format!(
          "too many {axis} constraints; provide one position plus an optional extent, or two positions"
        )))
      },
    };
    Ok(span)
  }

  /// Determine the minimum board extent accommodating the span.
  fn min_extent(&self, min: f64, axis: &str) -> Result<f64> {
    let extent = Linear::new(0.0, 1.0);
    let starts = self.lo.min_extent(0.0, &format!("{axis} start >= 0"))?;
    let ends = extent
      .minus(self.hi)
      .min_extent(0.0, &format!("{axis} end <= board extent"))?;
    let fits = self
      .hi
      .minus(self.lo)
      .min_extent(min, &format!("{axis} extent >= {min}"))?;

    Ok(starts.max(ends).max(fits).max(0.0))
  }

  fn at(&self, extent: f64) -> (f64, f64) {
    (self.lo.at(extent), self.hi.at(extent))
  }
}


fn spans(placement: &Placement, min: Size) -> Result<(Span, Span)> {
  let x = Span::resolve(
    "horizontal",
    placement.left,
    placement.right,
    placement.center_x,
    placement.width,
    min.width,
  )?;
  let y = Span::resolve(
    "vertical",
    placement.bottom,
    placement.top,
    placement.center_y,
    placement.height,
    min.height,
  )?;
  Ok((x, y))
}


/// The data associated with a [`Board`].
#[derive(Debug, Default)]
pub struct BoardData {
  placements: Vec<(Id, Placement)>,
}

impl BoardData {
  fn placement(&self, child: Id) -> Option<&Placement> {
    self
      .placements
      .iter()
      .find_map(|(id, placement)| (*id == child).then_some(placement))
  }
}


/// A container placing children freely, in absolute or relative
/// coordinates.
///
/// The board claims the minimum size required to honor the placements
/// of all of its children.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Board {
  id: Id,
}

impl Board {
  /// Create a new, empty board.
  pub fn create(cap: &mut dyn MutCap) -> Id {
    cap.add_widget(Box::new(BoardData::default()), &mut |id, _cap| {
      Box::new(Board::new(id))
    })
  }

  /// Add a child with the given placement.
  pub fn add(cap: &mut dyn MutCap, board: Id, child: Id, placement: Placement) -> Result<()> {
    let _spans = spans(&placement, Size::zero())?;
    let () = cap.attach_child(board, child)?;
    let () = cap
      .typed_data_mut::<BoardData>(board)?
      .placements
      .push((child, placement));
    cap.update(board, Update::Repack)
  }

  /// Change the placement of a child.
  pub fn set_placement(cap: &mut dyn MutCap, board: Id, child: Id, placement: Placement) -> Result<()> {
    let _spans = spans(&placement, Size::zero())?;
    let data = cap.typed_data_mut::<BoardData>(board)?;
    let entry = data
      .placements
      .iter_mut()
      .find(|(id, _)| *id == child)
      .ok_or(Error::NotAChild {
        child,
        parent: board,
      })?;
    entry.1 = placement;
    cap.update(board, Update::Repack)
  }

  /// Remove a child, detaching it.
  pub fn remove(cap: &mut dyn MutCap, board: Id, child: Id) -> Result<()> {
    let () = cap.detach_child(board, child)?;
    let () = cap
      .typed_data_mut::<BoardData>(board)?
      .placements
      .retain(|(id, _)| *id != child);
    cap.update(board, Update::Repack)
  }

  /// Retrieve the placement of a child.
  pub fn placement(cap: &dyn Cap, board: Id, child: Id) -> Result<Option<Placement>> {
    Ok(cap.typed_data::<BoardData>(board)?.placement(child).copied())
  }
}

impl Layout for Board {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let data = cap.typed_data::<BoardData>(self.id)?;
    let mut size = Size::zero();

    for (child, placement) in &data.placements {
      let min = cap.min_size(*child);
      let (x, y) = spans(placement, min)?;
      size = size.max(Size::new(
        x.min_extent(min.width, "horizontal")?,
        y.min_extent(min.height, "vertical")?,
      ));
    }
    Ok(size)
  }

  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let placements = cap.typed_data::<BoardData>(self.id)?.placements.clone();

    for (child, placement) in placements {
      let (x, y) = spans(&placement, cap.min_size(child))?;
      let (left, right) = x.at(rect.width);
      let (bottom, top) = y.at(rect.height);
      let child_rect = Rect::new(rect.left + left, rect.bottom + bottom, right - left, top - bottom);
      let () = cap.resize(child, child_rect)?;
    }
    Ok(())
  }
}
