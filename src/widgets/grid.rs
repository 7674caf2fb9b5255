// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use crate::align;
use crate::derive::Widget;
use crate::Alignment;
use crate::Cap;
use crate::Cell;
use crate::Error;
use crate::GridSolver;
use crate::Handleable;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Size;
use crate::SizePolicy;
use crate::Update;
use crate::Vector;


/// The configuration of a [`Grid`].
#[derive(Clone, Debug)]
pub struct GridConfig {
  /// The number of rows; inferred from the occupied cells if `None`.
  pub num_rows: Option<usize>,
  /// The number of columns; inferred from the occupied cells if
  /// `None`.
  pub num_cols: Option<usize>,
  /// The padding between cells.
  pub inner_padding: f64,
  /// The padding around all cells.
  pub outer_padding: f64,
  /// The size policy of rows without an explicit one.
  pub default_row_height: SizePolicy,
  /// The size policy of columns without an explicit one.
  pub default_col_width: SizePolicy,
  /// The alignment of every child within its cell.
  pub alignment: Alignment,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      num_rows: None,
      num_cols: None,
      inner_padding: 0.0,
      outer_padding: 0.0,
      default_row_height: SizePolicy::Expand,
      default_col_width: SizePolicy::Expand,
      alignment: Alignment::Fill,
    }
  }
}


/// The data associated with a [`Grid`].
#[derive(Debug)]
pub struct GridData {
  cells: BTreeMap<Cell, Id>,
  alignment: Alignment,
  solver: GridSolver,
}

impl GridData {
  fn cell_of(&self, child: Id) -> Option<Cell> {
    self
      .cells
      .iter()
      .find_map(|(cell, id)| (*id == child).then_some(*cell))
  }
}


/// A container placing children in the cells of a grid.
///
/// Children have to be placed with [`Grid::add`]. A widget attached
/// through [`MutCap::attach_child`] directly occupies no cell and is
/// never laid out.
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct Grid {
  id: Id,
}

impl Grid {
  /// Create a new, empty grid.
  pub fn create(cap: &mut dyn MutCap, config: GridConfig) -> Id {
    let mut solver = GridSolver::new();
    let () = solver.set_num_rows(config.num_rows);
    let () = solver.set_num_cols(config.num_cols);
    let () = solver.set_inner_padding(config.inner_padding);
    let () = solver.set_outer_padding(config.outer_padding);
    let () = solver.set_default_row_height(config.default_row_height);
    let () = solver.set_default_col_width(config.default_col_width);

    let data = GridData {
      cells: BTreeMap::new(),
      alignment: config.alignment,
      solver,
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Grid::new(id)))
  }

  /// Place a child in the given cell.
  ///
  /// A widget previously occupying the cell is detached.
  pub fn add(cap: &mut dyn MutCap, grid: Id, row: usize, col: usize, child: Id) -> Result<()> {
    let previous = cap.typed_data::<GridData>(grid)?.cells.get(&(row, col)).copied();
    if previous == Some(child) {
      return Ok(())
    }

    let () = cap.attach_child(grid, child)?;
    if let Some(previous) = previous {
      let () = cap.detach_child(grid, previous)?;
    }

    let _prev = cap.typed_data_mut::<GridData>(grid)?.cells.insert((row, col), child);
    cap.update(grid, Update::Repack)
  }

  /// Remove a child from the grid, detaching it.
  pub fn remove(cap: &mut dyn MutCap, grid: Id, child: Id) -> Result<()> {
    let data = cap.typed_data_mut::<GridData>(grid)?;
    let cell = data.cell_of(child).ok_or(Error::NotAChild {
      child,
      parent: grid,
    })?;
    let _id = data.cells.remove(&cell);

    let () = cap.detach_child(grid, child)?;
    cap.update(grid, Update::Repack)
  }

  /// Retrieve the widget occupying a cell.
  pub fn child_at(cap: &dyn Cap, grid: Id, row: usize, col: usize) -> Result<Option<Id>> {
    Ok(cap.typed_data::<GridData>(grid)?.cells.get(&(row, col)).copied())
  }

  /// Retrieve the cell occupied by a child.
  pub fn cell_of(cap: &dyn Cap, grid: Id, child: Id) -> Result<Option<Cell>> {
    Ok(cap.typed_data::<GridData>(grid)?.cell_of(child))
  }

  /// Set the size policy of a row.
  pub fn set_row_height(cap: &mut dyn MutCap, grid: Id, row: usize, policy: SizePolicy) -> Result<()> {
    let () = cap
      .typed_data_mut::<GridData>(grid)?
      .solver
      .set_row_height(row, policy);
    cap.update(grid, Update::Repack)
  }

  /// Set the size policy of a column.
  pub fn set_col_width(cap: &mut dyn MutCap, grid: Id, col: usize, policy: SizePolicy) -> Result<()> {
    let () = cap
      .typed_data_mut::<GridData>(grid)?
      .solver
      .set_col_width(col, policy);
    cap.update(grid, Update::Repack)
  }

  /// Set both the inner and the outer padding.
  pub fn set_padding(cap: &mut dyn MutCap, grid: Id, padding: f64) -> Result<()> {
    let () = cap.typed_data_mut::<GridData>(grid)?.solver.set_padding(padding);
    cap.update(grid, Update::Repack)
  }
}

impl Layout for Grid {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let data = cap.typed_data::<GridData>(self.id)?;
    let cells = data
      .cells
      .iter()
      .map(|(cell, child)| (*cell, Rect::from_size(cap.min_size(*child))))
      .collect();

    cap.typed_data_mut::<GridData>(self.id)?.solver.make_claim(cells)
  }

  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let data = cap.typed_data_mut::<GridData>(self.id)?;
    let children = data.cells.clone();
    let alignment = data.alignment.clone();
    let cells = data.solver.make_cells(rect)?.clone();

    for (cell, child) in children {
      if let Some(cell_rect) = cells.get(&cell) {
        let mut child_rect = Rect::from_size(cap.min_size(child));
        let () = align(&alignment, &mut child_rect, cell_rect);
        let () = cap.resize(child, child_rect)?;
      }
    }
    Ok(())
  }
}

impl Handleable for Grid {
  /// Look up the child under the pointer through the cell it occupies
  /// instead of testing every child.
  fn children_under_mouse(&self, cap: &dyn Cap, widget: Id, point: Vector, _previous: &[Id]) -> Vec<Id> {
    let Ok(data) = cap.typed_data::<GridData>(widget) else {
      return Vec::new()
    };

    data
      .solver
      .cell_under(point.x, point.y)
      .and_then(|cell| data.cells.get(&cell).copied())
      .filter(|child| {
        !cap.is_hidden(*child)
          && cap
            .rect(*child)
            .is_some_and(|rect| rect.contains_vector(point))
      })
      .into_iter()
      .collect()
  }

  fn children_can_overlap(&self) -> bool {
    false
  }
}
