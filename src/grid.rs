// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! A solver turning minimum cell sizes and row/column size policies
//! into concrete cell rectangles.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::Error;
use crate::Rect;
use crate::Result;
use crate::Size;


/// A `(row, column)` pair addressing a grid cell.
pub type Cell = (usize, usize);


/// The size policy of a single row or column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizePolicy {
  /// A fixed size in pixels. The row or column still grows to fit its
  /// largest cell.
  Fixed(f64),
  /// Share the space left over by fixed rows or columns.
  Expand,
}

impl FromStr for SizePolicy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();
    if s == "expand" {
      Ok(Self::Expand)
    } else {
      s.parse::<f64>()
        .map(Self::Fixed)
        .map_err(|_| Error::UnknownSizePolicy(s.to_string()))
    }
  }
}


/// The cache tiers of a `GridSolver`, in order of dependency.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum Tier {
  Shape,
  Claim,
  Cells,
}


/// Per-axis data derived while claiming.
#[derive(Clone, Debug, Default)]
struct AxisClaim {
  /// The largest cell extent in every row/column; `-inf` if empty.
  max_cells: Vec<f64>,
  /// Fixed rows/columns and their effective size.
  fixed: BTreeMap<usize, f64>,
  /// Rows/columns sharing left over space.
  expandable: Vec<usize>,
  /// The minimum size applied to each expandable row/column.
  min_expandable: f64,
  /// Total padding along the axis.
  padding: f64,
  /// The minimum extent along the axis.
  min: f64,
}

/// Per-axis data derived while materializing cells.
#[derive(Clone, Debug, Default)]
struct AxisCells {
  /// The extent of every row/column.
  sizes: Vec<f64>,
  /// The top coordinate of every row respectively the left coordinate
  /// of every column.
  starts: Vec<f64>,
}


/// A grid layout solver.
///
/// The solver caches its results in three tiers: the grid's shape
/// (number of rows and columns), its claim (minimum size), and the
/// final cell rectangles. Setters invalidate the lowest affected tier
/// and all tiers depending on it; getters recompute exactly the stale
/// tiers.
#[derive(Clone, Debug)]
pub struct GridSolver {
  min_cell_rects: BTreeMap<Cell, Rect>,
  requested_num_rows: Option<usize>,
  requested_num_cols: Option<usize>,
  row_heights: BTreeMap<usize, SizePolicy>,
  col_widths: BTreeMap<usize, SizePolicy>,
  default_row_height: SizePolicy,
  default_col_width: SizePolicy,
  inner_padding: f64,
  outer_padding: f64,
  bounding_rect: Option<Rect>,

  stale: Option<Tier>,
  num_rows: usize,
  num_cols: usize,
  row_claim: AxisClaim,
  col_claim: AxisClaim,
  row_cells: AxisCells,
  col_cells: AxisCells,
  cell_rects: BTreeMap<Cell, Rect>,
}

impl GridSolver {
  /// Create a new solver with expanding rows and columns and no
  /// padding.
  pub fn new() -> Self {
    Self {
      min_cell_rects: BTreeMap::new(),
      requested_num_rows: None,
      requested_num_cols: None,
      row_heights: BTreeMap::new(),
      col_widths: BTreeMap::new(),
      default_row_height: SizePolicy::Expand,
      default_col_width: SizePolicy::Expand,
      inner_padding: 0.0,
      outer_padding: 0.0,
      bounding_rect: None,
      stale: Some(Tier::Shape),
      num_rows: 0,
      num_cols: 0,
      row_claim: AxisClaim::default(),
      col_claim: AxisClaim::default(),
      row_cells: AxisCells::default(),
      col_cells: AxisCells::default(),
      cell_rects: BTreeMap::new(),
    }
  }

  /// Mark `tier` and every tier depending on it as stale.
  fn invalidate(&mut self, tier: Tier) {
    self.stale = Some(self.stale.map_or(tier, |stale| stale.min(tier)));
  }

  fn is_stale(&self, tier: Tier) -> bool {
    self.stale.is_some_and(|stale| stale <= tier)
  }

  /// Calculate the minimum size of the grid for the given cells.
  pub fn make_claim(&mut self, min_cell_rects: BTreeMap<Cell, Rect>) -> Result<Size> {
    let () = self.set_min_cell_rects(min_cell_rects);
    Ok(Size::new(self.min_width()?, self.min_height()?))
  }

  /// Calculate the rectangles of all cells when the grid occupies
  /// `bounding_rect`.
  pub fn make_cells(&mut self, bounding_rect: Rect) -> Result<&BTreeMap<Cell, Rect>> {
    let () = self.set_bounding_rect(bounding_rect);
    self.cell_rects()
  }

  /// Replace the minimum rectangles of all cells.
  pub fn set_min_cell_rects(&mut self, min_cell_rects: BTreeMap<Cell, Rect>) {
    if min_cell_rects != self.min_cell_rects {
      self.min_cell_rects = min_cell_rects;
      self.invalidate(Tier::Shape);
    }
  }

  /// Set the minimum rectangle of a single cell.
  pub fn set_min_cell_rect(&mut self, row: usize, col: usize, rect: Rect) {
    if self.min_cell_rects.insert((row, col), rect) != Some(rect) {
      self.invalidate(Tier::Shape);
    }
  }

  /// Remove the minimum rectangle of a single cell.
  pub fn unset_min_cell_rect(&mut self, row: usize, col: usize) {
    if self.min_cell_rects.remove(&(row, col)).is_some() {
      self.invalidate(Tier::Shape);
    }
  }

  /// Request a number of rows. `None` infers the count from the cells.
  pub fn set_num_rows(&mut self, num_rows: Option<usize>) {
    self.requested_num_rows = num_rows;
    self.invalidate(Tier::Shape);
  }

  /// Request a number of columns. `None` infers the count from the
  /// cells.
  pub fn set_num_cols(&mut self, num_cols: Option<usize>) {
    self.requested_num_cols = num_cols;
    self.invalidate(Tier::Shape);
  }

  /// Set the size policy of a row.
  pub fn set_row_height(&mut self, row: usize, policy: SizePolicy) {
    let _prev = self.row_heights.insert(row, policy);
    self.invalidate(Tier::Claim);
  }

  /// Revert a row to the default size policy.
  pub fn unset_row_height(&mut self, row: usize) {
    if self.row_heights.remove(&row).is_some() {
      self.invalidate(Tier::Claim);
    }
  }

  /// Set the size policy of a column.
  pub fn set_col_width(&mut self, col: usize, policy: SizePolicy) {
    let _prev = self.col_widths.insert(col, policy);
    self.invalidate(Tier::Claim);
  }

  /// Revert a column to the default size policy.
  pub fn unset_col_width(&mut self, col: usize) {
    if self.col_widths.remove(&col).is_some() {
      self.invalidate(Tier::Claim);
    }
  }

  /// Remove all explicit row and column size policies.
  pub fn clear_sizes(&mut self) {
    self.row_heights.clear();
    self.col_widths.clear();
    self.invalidate(Tier::Claim);
  }

  /// Set the policy of rows without an explicit one.
  pub fn set_default_row_height(&mut self, policy: SizePolicy) {
    self.default_row_height = policy;
    self.invalidate(Tier::Claim);
  }

  /// Set the policy of columns without an explicit one.
  pub fn set_default_col_width(&mut self, policy: SizePolicy) {
    self.default_col_width = policy;
    self.invalidate(Tier::Claim);
  }

  /// Set both the inner and the outer padding.
  pub fn set_padding(&mut self, padding: f64) {
    self.inner_padding = padding;
    self.outer_padding = padding;
    self.invalidate(Tier::Claim);
  }

  /// Set the padding between adjacent cells.
  pub fn set_inner_padding(&mut self, padding: f64) {
    self.inner_padding = padding;
    self.invalidate(Tier::Claim);
  }

  /// Set the padding between the outermost cells and the grid's edge.
  pub fn set_outer_padding(&mut self, padding: f64) {
    self.outer_padding = padding;
    self.invalidate(Tier::Claim);
  }

  /// Set the rectangle the grid occupies.
  pub fn set_bounding_rect(&mut self, rect: Rect) {
    if self.bounding_rect != Some(rect) {
      self.bounding_rect = Some(rect);
      self.invalidate(Tier::Cells);
    }
  }

  /// The padding between adjacent cells.
  pub fn inner_padding(&self) -> f64 {
    self.inner_padding
  }

  /// The padding between the outermost cells and the grid's edge.
  pub fn outer_padding(&self) -> f64 {
    self.outer_padding
  }

  /// The number of rows.
  pub fn num_rows(&mut self) -> Result<usize> {
    let () = self.update(Tier::Shape)?;
    Ok(self.num_rows)
  }

  /// The number of columns.
  pub fn num_cols(&mut self) -> Result<usize> {
    let () = self.update(Tier::Shape)?;
    Ok(self.num_cols)
  }

  /// The minimum width of the grid.
  pub fn min_width(&mut self) -> Result<f64> {
    let () = self.update(Tier::Claim)?;
    Ok(self.col_claim.min)
  }

  /// The minimum height of the grid.
  pub fn min_height(&mut self) -> Result<f64> {
    let () = self.update(Tier::Claim)?;
    Ok(self.row_claim.min)
  }

  /// The effective height of a fixed row, if the row is fixed.
  pub fn fixed_row_height(&mut self, row: usize) -> Result<Option<f64>> {
    let () = self.update(Tier::Claim)?;
    Ok(self.row_claim.fixed.get(&row).copied())
  }

  /// The effective width of a fixed column, if the column is fixed.
  pub fn fixed_col_width(&mut self, col: usize) -> Result<Option<f64>> {
    let () = self.update(Tier::Claim)?;
    Ok(self.col_claim.fixed.get(&col).copied())
  }

  /// The final height of every row.
  pub fn row_heights(&mut self) -> Result<&[f64]> {
    let () = self.update(Tier::Cells)?;
    Ok(&self.row_cells.sizes)
  }

  /// The final width of every column.
  pub fn col_widths(&mut self) -> Result<&[f64]> {
    let () = self.update(Tier::Cells)?;
    Ok(&self.col_cells.sizes)
  }

  /// The rectangles of all cells.
  pub fn cell_rects(&mut self) -> Result<&BTreeMap<Cell, Rect>> {
    let () = self.update(Tier::Cells)?;
    Ok(&self.cell_rects)
  }

  /// The rectangle of a single cell.
  pub fn cell_rect(&mut self, row: usize, col: usize) -> Result<Option<Rect>> {
    Ok(self.cell_rects()?.get(&(row, col)).copied())
  }

  /// Find the cell containing the given point.
  ///
  /// Rows are scanned top to bottom, then columns left to right. Both
  /// bounds are inclusive, so a point on an edge shared by two cells
  /// resolves to the first one scanned.
  pub fn find_cell_under(&mut self, x: f64, y: f64) -> Result<Option<Cell>> {
    let () = self.update(Tier::Cells)?;
    Ok(self.cell_under(x, y))
  }

  /// Find the cell containing the given point, using the most recently
  /// materialized cells.
  ///
  /// Unlike [`GridSolver::find_cell_under`] this method never
  /// recomputes anything and reports nothing while cells are stale.
  pub fn cell_under(&self, x: f64, y: f64) -> Option<Cell> {
    if self.is_stale(Tier::Cells) {
      return None
    }

    let row = self
      .row_cells
      .starts
      .iter()
      .zip(&self.row_cells.sizes)
      .position(|(top, height)| top - height <= y && y <= *top);
    let col = self
      .col_cells
      .starts
      .iter()
      .zip(&self.col_cells.sizes)
      .position(|(left, width)| *left <= x && x <= left + width);

    row.zip(col)
  }

  /// Recompute all stale tiers up to and including `tier`.
  fn update(&mut self, tier: Tier) -> Result<()> {
    if self.is_stale(Tier::Shape) && tier >= Tier::Shape {
      let () = self.update_shape()?;
      self.stale = Some(Tier::Claim);
    }
    if self.is_stale(Tier::Claim) && tier >= Tier::Claim {
      let () = self.update_claim();
      self.stale = Some(Tier::Cells);
    }
    if self.is_stale(Tier::Cells) && tier >= Tier::Cells {
      let () = self.update_cells()?;
      self.stale = None;
    }
    Ok(())
  }

  fn update_shape(&mut self) -> Result<()> {
    let min_rows = self.min_cell_rects.keys().map(|(row, _)| row + 1).max().unwrap_or(0);
    let min_cols = self.min_cell_rects.keys().map(|(_, col)| col + 1).max().unwrap_or(0);

    self.num_rows = infer_count("rows", self.requested_num_rows, min_rows)?;
    self.num_cols = infer_count("columns", self.requested_num_cols, min_cols)?;
    Ok(())
  }

  fn update_claim(&mut self) {
    let mut max_heights = vec![f64::NEG_INFINITY; self.num_rows];
    let mut max_widths = vec![f64::NEG_INFINITY; self.num_cols];

    for ((row, col), rect) in &self.min_cell_rects {
      max_heights[*row] = max_heights[*row].max(rect.height);
      max_widths[*col] = max_widths[*col].max(rect.width);
    }

    self.row_claim = claim_axis(
      max_heights,
      &self.row_heights,
      self.default_row_height,
      self.inner_padding,
      self.outer_padding,
    );
    self.col_claim = claim_axis(
      max_widths,
      &self.col_widths,
      self.default_col_width,
      self.inner_padding,
      self.outer_padding,
    );
  }

  fn update_cells(&mut self) -> Result<()> {
    let rect = self
      .bounding_rect
      .ok_or(Error::Unsized("materializing grid cells"))?;
    let min = Size::new(self.col_claim.min, self.row_claim.min);

    if !rect.size().fits(min) {
      return Err(Error::BoundsTooSmall {
        min,
        available: rect.size(),
      })
    }

    let heights = axis_sizes(&self.row_claim, rect.height);
    let widths = axis_sizes(&self.col_claim, rect.width);

    let mut tops = Vec::with_capacity(heights.len());
    let mut top = rect.top() - self.outer_padding;
    for height in &heights {
      tops.push(top);
      top -= height + self.inner_padding;
    }

    let mut lefts = Vec::with_capacity(widths.len());
    let mut left = rect.left + self.outer_padding;
    for width in &widths {
      lefts.push(left);
      left += width + self.inner_padding;
    }

    self.cell_rects = tops
      .iter()
      .zip(&heights)
      .enumerate()
      .flat_map(|(row, (top, height))| {
        lefts
          .iter()
          .zip(&widths)
          .enumerate()
          .map(move |(col, (left, width))| {
            ((row, col), Rect::new(*left, top - height, *width, *height))
          })
      })
      .collect();

    self.row_cells = AxisCells {
      sizes: heights,
      starts: tops,
    };
    self.col_cells = AxisCells {
      sizes: widths,
      starts: lefts,
    };
    Ok(())
  }
}

impl Default for GridSolver {
  fn default() -> Self {
    Self::new()
  }
}


fn infer_count(axis: &'static str, requested: Option<usize>, required: usize) -> Result<usize> {
  match requested {
    Some(requested) if requested < required => Err(Error::TooFewCells {
      axis,
      requested,
      required,
    }),
    Some(requested) => Ok(requested),
    None => Ok(required),
  }
}

fn claim_axis(
  max_cells: Vec<f64>,
  policies: &BTreeMap<usize, SizePolicy>,
  default: SizePolicy,
  inner_padding: f64,
  outer_padding: f64,
) -> AxisClaim {
  let count = max_cells.len();
  let mut fixed = BTreeMap::new();
  let mut expandable = Vec::new();

  for (i, max_cell) in max_cells.iter().enumerate() {
    match policies.get(&i).copied().unwrap_or(default) {
      SizePolicy::Fixed(size) => {
        let _prev = fixed.insert(i, size.max(*max_cell));
      },
      SizePolicy::Expand => expandable.push(i),
    }
  }

  // The largest expandable minimum is applied to every expandable
  // row/column alike.
  let min_expandable = expandable
    .iter()
    .map(|i| {
      let max_cell = max_cells[*i];
      if max_cell == f64::NEG_INFINITY {
        0.0
      } else {
        max_cell
      }
    })
    .reduce(f64::max)
    .unwrap_or(0.0);

  let padding = inner_padding * count.saturating_sub(1) as f64 + outer_padding * 2.0;
  let min = fixed.values().sum::<f64>() + min_expandable * expandable.len() as f64 + padding;

  AxisClaim {
    max_cells,
    fixed,
    expandable,
    min_expandable,
    padding,
    min,
  }
}

fn axis_sizes(claim: &AxisClaim, available: f64) -> Vec<f64> {
  let fixed_total = claim.fixed.values().sum::<f64>();
  let expandable = if claim.expandable.is_empty() {
    0.0
  } else {
    (available - fixed_total - claim.padding) / claim.expandable.len() as f64
  };

  (0..claim.max_cells.len())
    .map(|i| claim.fixed.get(&i).copied().unwrap_or(expandable))
    .collect()
}


#[cfg(test)]
mod tests {
  use super::*;

  use proptest::prelude::*;


  fn cells<I>(iter: I) -> BTreeMap<Cell, Rect>
  where
    I: IntoIterator<Item = (Cell, (f64, f64))>,
  {
    iter
      .into_iter()
      .map(|(cell, (w, h))| (cell, Rect::new(0.0, 0.0, w, h)))
      .collect()
  }

  #[test]
  fn size_policy_parsing() {
    assert_eq!("expand".parse::<SizePolicy>().unwrap(), SizePolicy::Expand);
    assert_eq!("42".parse::<SizePolicy>().unwrap(), SizePolicy::Fixed(42.0));
    assert_eq!(
      "stretch".parse::<SizePolicy>().unwrap_err(),
      Error::UnknownSizePolicy("stretch".to_string())
    );
  }

  /// Check that the shape is inferred from the cells.
  #[test]
  fn inferred_shape() {
    let mut grid = GridSolver::new();
    let _size = grid
      .make_claim(cells([((0, 0), (1.0, 1.0)), ((2, 1), (1.0, 1.0))]))
      .unwrap();
    assert_eq!(grid.num_rows().unwrap(), 3);
    assert_eq!(grid.num_cols().unwrap(), 2);
  }

  /// Check that requesting fewer rows than the cells need fails.
  #[test]
  fn too_few_rows_requested() {
    let mut grid = GridSolver::new();
    grid.set_num_rows(Some(1));
    let err = grid
      .make_claim(cells([((2, 0), (1.0, 1.0))]))
      .unwrap_err();
    assert_eq!(
      err,
      Error::TooFewCells {
        axis: "rows",
        requested: 1,
        required: 3,
      }
    );
  }

  /// A fixed row is never smaller than its content.
  #[test]
  fn fixed_row_covers_content() {
    let mut grid = GridSolver::new();
    grid.set_row_height(0, SizePolicy::Fixed(0.0));
    let size = grid.make_claim(cells([((0, 0), (1.0, 2.0))])).unwrap();
    assert_eq!(grid.fixed_row_height(0).unwrap(), Some(2.0));
    assert_eq!(size, Size::new(1.0, 2.0));

    grid.set_row_height(0, SizePolicy::Fixed(5.0));
    assert_eq!(grid.fixed_row_height(0).unwrap(), Some(5.0));
    assert_eq!(grid.min_height().unwrap(), 5.0);
  }

  /// The largest expandable minimum applies to all expandable rows.
  #[test]
  fn uniform_expandable_minimum() {
    let mut grid = GridSolver::new();
    let size = grid
      .make_claim(cells([((0, 0), (1.0, 1.0)), ((1, 0), (1.0, 4.0))]))
      .unwrap();
    assert_eq!(size, Size::new(1.0, 8.0));
  }

  #[test]
  fn padding_contributes_to_claim() {
    let mut grid = GridSolver::new();
    grid.set_inner_padding(1.0);
    grid.set_outer_padding(2.0);
    let size = grid
      .make_claim(cells([((0, 0), (1.0, 1.0)), ((0, 1), (1.0, 1.0))]))
      .unwrap();
    assert_eq!(size, Size::new(1.0 + 1.0 + 1.0 + 4.0, 1.0 + 4.0));
  }

  #[test]
  fn two_rows_split_evenly() {
    let mut grid = GridSolver::new();
    grid.set_num_rows(Some(2));
    grid.set_num_cols(Some(1));
    let cells = grid.make_cells(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();

    let expected = BTreeMap::from([
      ((0, 0), Rect::new(0.0, 5.0, 10.0, 5.0)),
      ((1, 0), Rect::new(0.0, 0.0, 10.0, 5.0)),
    ]);
    assert_eq!(cells, &expected);
  }

  #[test]
  fn padded_single_cell() {
    let mut grid = GridSolver::new();
    grid.set_num_rows(Some(1));
    grid.set_num_cols(Some(1));
    grid.set_padding(1.0);
    let cells = grid.make_cells(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(cells[&(0, 0)], Rect::new(1.0, 1.0, 8.0, 8.0));
  }

  /// Negative fixed heights are honored and not clamped to zero.
  #[test]
  fn negative_row_height() {
    let mut grid = GridSolver::new();
    grid.set_num_rows(Some(2));
    grid.set_num_cols(Some(1));
    grid.set_row_height(0, SizePolicy::Fixed(-2.0));
    let _cells = grid.make_cells(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(grid.row_heights().unwrap(), &[-2.0, 12.0]);
  }

  #[test]
  fn bounding_rect_too_small() {
    let mut grid = GridSolver::new();
    let _size = grid.make_claim(cells([((0, 0), (5.0, 5.0))])).unwrap();
    let err = grid.make_cells(Rect::new(0.0, 0.0, 4.0, 5.0)).unwrap_err();
    assert_eq!(
      err,
      Error::BoundsTooSmall {
        min: Size::new(5.0, 5.0),
        available: Size::new(4.0, 5.0),
      }
    );
  }

  #[test]
  fn cells_require_bounding_rect() {
    let mut grid = GridSolver::new();
    assert!(matches!(grid.cell_rects(), Err(Error::Unsized(..))));
  }

  /// Check that a point on a shared edge resolves to the first cell.
  #[test]
  fn cell_lookup_tie_break() {
    let mut grid = GridSolver::new();
    grid.set_num_rows(Some(2));
    grid.set_num_cols(Some(2));
    let _cells = grid.make_cells(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert_eq!(grid.find_cell_under(5.0, 5.0).unwrap(), Some((0, 0)));
    assert_eq!(grid.find_cell_under(7.0, 2.0).unwrap(), Some((1, 1)));
    assert_eq!(grid.find_cell_under(11.0, 2.0).unwrap(), None);
  }

  /// Check that results are memoized and only recomputed when stale.
  #[test]
  fn cache_tiers() {
    let mut grid = GridSolver::new();
    let _size = grid.make_claim(cells([((0, 0), (2.0, 2.0))])).unwrap();
    assert!(!grid.is_stale(Tier::Claim));

    grid.set_bounding_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    assert!(!grid.is_stale(Tier::Claim));
    assert!(grid.is_stale(Tier::Cells));

    grid.set_row_height(0, SizePolicy::Fixed(1.0));
    assert!(!grid.is_stale(Tier::Shape));
    assert!(grid.is_stale(Tier::Claim));
    assert!(grid.is_stale(Tier::Cells));

    let _rects = grid.cell_rects().unwrap();
    assert_eq!(grid.stale, None);

    // Supplying identical cells does not invalidate anything.
    let _size = grid.make_claim(cells([((0, 0), (2.0, 2.0))])).unwrap();
    assert_eq!(grid.stale, None);
  }

  proptest! {
    /// Without padding the cells tile the bounding rect exactly, as long
    /// as one row and one column can absorb the slack.
    #[test]
    fn cells_partition_bounding_rect(
      rows in prop::collection::vec(prop::option::of(0.0..20.0f64), 1..5),
      cols in prop::collection::vec(prop::option::of(0.0..20.0f64), 1..5),
      slack in 0.0..50.0f64,
    ) {
      let mut grid = GridSolver::new();
      grid.set_num_rows(Some(rows.len()));
      grid.set_num_cols(Some(cols.len()));
      for (i, row) in rows.iter().enumerate().skip(1) {
        if let Some(height) = row {
          grid.set_row_height(i, SizePolicy::Fixed(*height));
        }
      }
      for (i, col) in cols.iter().enumerate().skip(1) {
        if let Some(width) = col {
          grid.set_col_width(i, SizePolicy::Fixed(*width));
        }
      }

      let width = grid.min_width().unwrap() + slack;
      let height = grid.min_height().unwrap() + slack;
      let rect = Rect::new(3.0, -7.0, width, height);
      let cells = grid.make_cells(rect).unwrap().clone();

      let area = cells.values().map(Rect::area).sum::<f64>();
      prop_assert!((area - rect.area()).abs() < 1e-6);

      for ((row, col), cell) in &cells {
        if let Some(right) = cells.get(&(*row, col + 1)) {
          prop_assert!((cell.right() - right.left).abs() < 1e-9);
        }
        if let Some(below) = cells.get(&(row + 1, *col)) {
          prop_assert!((cell.bottom - below.top()).abs() < 1e-9);
        }
      }

      let first = cells[&(0, 0)];
      let last = cells[&(rows.len() - 1, cols.len() - 1)];
      prop_assert!((first.top() - rect.top()).abs() < 1e-9);
      prop_assert!((first.left - rect.left).abs() < 1e-9);
      prop_assert!((last.right() - rect.right()).abs() < 1e-6);
      prop_assert!((last.bottom - rect.bottom).abs() < 1e-6);
    }

    /// Growing the content of any cell never shrinks the claim.
    #[test]
    fn claim_grows_with_content(
      sizes in prop::collection::vec((0.0..20.0f64, 0.0..20.0f64), 1..9),
      index in 0usize..9,
      growth in (0.0..10.0f64, 0.0..10.0f64),
      padding in 0.0..5.0f64,
    ) {
      let content = sizes
        .iter()
        .enumerate()
        .map(|(i, size)| ((i / 3, i % 3), *size))
        .collect::<Vec<_>>();
      let mut grid = GridSolver::new();
      grid.set_padding(padding);
      let before = grid.make_claim(cells(content.clone())).unwrap();

      let index = index % content.len();
      let mut grown = content;
      grown[index].1 .0 += growth.0;
      grown[index].1 .1 += growth.1;
      let after = grid.make_claim(cells(grown)).unwrap();

      prop_assert!(after.width >= before.width);
      prop_assert!(after.height >= before.height);
    }
  }
}
