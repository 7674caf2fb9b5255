// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use crate::derive::Handleable;
use crate::derive::Widget;
use crate::widgets::ImageRef;
use crate::Cap;
use crate::Cell;
use crate::Color;
use crate::Error;
use crate::GridSolver;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Size;
use crate::SizePolicy;
use crate::Update;


/// One of the nine slots of a [`Background`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Slot {
  /// The top left corner.
  TopLeft,
  /// The top edge.
  Top,
  /// The top right corner.
  TopRight,
  /// The left edge.
  Left,
  /// The area enclosed by the edges.
  Center,
  /// The right edge.
  Right,
  /// The bottom left corner.
  BottomLeft,
  /// The bottom edge.
  Bottom,
  /// The bottom right corner.
  BottomRight,
}

impl Slot {
  /// All slots, row by row, top to bottom.
  pub const ALL: [Slot; 9] = [
    Slot::TopLeft,
    Slot::Top,
    Slot::TopRight,
    Slot::Left,
    Slot::Center,
    Slot::Right,
    Slot::BottomLeft,
    Slot::Bottom,
    Slot::BottomRight,
  ];

  /// Retrieve the grid cell the slot occupies.
  pub fn cell(self) -> Cell {
    match self {
      Self::TopLeft => (0, 0),
      Self::Top => (0, 1),
      Self::TopRight => (0, 2),
      Self::Left => (1, 0),
      Self::Center => (1, 1),
      Self::Right => (1, 2),
      Self::BottomLeft => (2, 0),
      Self::Bottom => (2, 1),
      Self::BottomRight => (2, 2),
    }
  }

  /// Determine the minimum cell size an image in this slot imposes.
  ///
  /// Edges stretch along their length and corners along neither axis.
  fn min_size(self, image: Size) -> Size {
    let (row, col) = self.cell();
    Size::new(
      if col == 1 { 0.0 } else { image.width },
      if row == 1 { 0.0 } else { image.height },
    )
  }
}


/// The appearance of a [`Background`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
  /// The images of the slots; absent slots stay empty.
  pub slots: BTreeMap<Slot, ImageRef>,
  /// The color filling the background's rectangle below all images.
  pub color: Option<Color>,
  /// Whether images of the middle column repeat instead of stretching
  /// horizontally.
  pub htile: bool,
  /// Whether images of the middle row repeat instead of stretching
  /// vertically.
  pub vtile: bool,
}


/// The data associated with a [`Background`].
#[derive(Debug)]
pub struct BackgroundData {
  appearance: Appearance,
  solver: GridSolver,
  tiles: Vec<(Slot, Rect)>,
}

impl BackgroundData {
  fn min_cells(&self) -> BTreeMap<Cell, Rect> {
    self
      .appearance
      .slots
      .iter()
      .map(|(slot, image)| (slot.cell(), Rect::from_size(slot.min_size(image.size()))))
      .collect()
  }
}


/// Cut `extent` into pieces of length `step`, the last one possibly
/// shorter, reported as `(offset, length)` pairs.
fn split(extent: f64, step: f64) -> Vec<(f64, f64)> {
  let mut pieces = Vec::new();
  let mut offset = 0.0;
  while offset < extent {
    pieces.push((offset, step.min(extent - offset)));
    offset += step;
  }
  pieces
}

/// Determine the tiles covering a cell with the given image.
fn tiles(slot: Slot, cell: Rect, image: &ImageRef, htile: bool, vtile: bool) -> Vec<Rect> {
  let (row, col) = slot.cell();
  let xs = if htile && col == 1 && image.width > 0.0 {
    split(cell.width, image.width)
  } else {
    vec![(0.0, cell.width)]
  };
  let ys = if vtile && row == 1 && image.height > 0.0 {
    split(cell.height, image.height)
  } else {
    vec![(0.0, cell.height)]
  };

  // Tiles start in the cell's top left corner.
  ys.iter()
    .flat_map(|(y, height)| {
      xs.iter().map(move |(x, width)| {
        Rect::new(cell.left + x, cell.top() - y - height, *width, *height)
      })
    })
    .collect()
}


/// A nine-slice background.
///
/// Corner images are drawn at their natural size; edge images stretch,
/// or repeat, along the edge; the center image fills the remainder.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Background {
  id: Id,
}

impl Background {
  /// Create a new background.
  pub fn create(cap: &mut dyn MutCap, appearance: Appearance) -> Id {
    let mut solver = GridSolver::new();
    let () = solver.set_num_rows(Some(3));
    let () = solver.set_num_cols(Some(3));
    for i in [0, 2] {
      let () = solver.set_row_height(i, SizePolicy::Fixed(0.0));
      let () = solver.set_col_width(i, SizePolicy::Fixed(0.0));
    }

    let data = BackgroundData {
      appearance,
      solver,
      tiles: Vec::new(),
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Background::new(id)))
  }

  /// Retrieve the appearance of a background.
  pub fn appearance(cap: &dyn Cap, background: Id) -> Result<Appearance> {
    Ok(cap.typed_data::<BackgroundData>(background)?.appearance.clone())
  }

  /// Change the appearance of a background.
  pub fn set_appearance(cap: &mut dyn MutCap, background: Id, appearance: Appearance) -> Result<()> {
    let data = cap.typed_data_mut::<BackgroundData>(background)?;
    if data.appearance == appearance {
      return Ok(())
    }
    data.appearance = appearance;

    cap.hold_updates(background, &mut |cap| {
      let () = cap.update(background, Update::Reshape)?;
      cap.update(background, Update::Repack)
    })
  }

  /// Retrieve the rectangles of all images to draw, slot by slot.
  ///
  /// The list is empty until the background got laid out.
  pub fn tiles(cap: &dyn Cap, background: Id) -> Result<Vec<(Slot, Rect)>> {
    Ok(cap.typed_data::<BackgroundData>(background)?.tiles.clone())
  }
}

impl Layout for Background {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let data = cap.typed_data_mut::<BackgroundData>(self.id)?;
    let cells = data.min_cells();
    data.solver.make_claim(cells)
  }

  fn resize(&self, cap: &mut dyn MutCap, _rect: Rect) -> Result<()> {
    cap.update(self.id, Update::Reshape)
  }

  fn reshape(&self, cap: &mut dyn MutCap) -> Result<()> {
    let rect = cap.rect(self.id);
    let data = cap.typed_data_mut::<BackgroundData>(self.id)?;
    let Some(rect) = rect else {
      let () = data.tiles.clear();
      return Ok(())
    };

    let min_cells = data.min_cells();
    let () = data.solver.set_min_cell_rects(min_cells);
    let cells = match data.solver.make_cells(rect) {
      Ok(cells) => cells.clone(),
      // The appearance grew beyond our rectangle; the repack that
      // follows resizes us and reshapes again.
      Err(Error::BoundsTooSmall { .. }) => return Ok(()),
      Err(err) => return Err(err),
    };

    let appearance = &data.appearance;
    data.tiles = Slot::ALL
      .iter()
      .filter_map(|slot| appearance.slots.get(slot).map(|image| (*slot, image)))
      .flat_map(|(slot, image)| {
        let cell = cells.get(&slot.cell()).copied().unwrap_or_default();
        tiles(slot, cell, image, appearance.htile, appearance.vtile)
          .into_iter()
          .map(move |tile| (slot, tile))
      })
      .collect();
    Ok(())
  }
}
