// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::Id;
use crate::Size;


/// The result type used throughout the crate.
pub type Result<T, E = Error> = StdResult<T, E>;


/// The error type used by the crate.
///
/// With the exception of [`Error::TerritoryTooSmall`] all variants
/// describe usage errors, i.e., mistakes in the way a widget tree is
/// being composed. They are reported to the caller and never retried.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum Error {
  /// A widget that already has a parent was attached somewhere.
  #[error("widget {child} is already attached to widget {parent}; detach it first")]
  AlreadyAttached {
    /// The widget that was to be attached.
    child: Id,
    /// The widget's current parent.
    parent: Id,
  },
  /// Attaching a widget would make it its own ancestor.
  #[error("widget {child} cannot be attached to {parent}, which is itself part of {child}'s subtree")]
  Cycle {
    /// The widget that was to be attached.
    child: Id,
    /// The designated parent.
    parent: Id,
  },
  /// A widget was detached from something that is not its parent.
  #[error("widget {child} is not a child of widget {parent}")]
  NotAChild {
    /// The widget that was to be detached.
    child: Id,
    /// The supposed parent.
    parent: Id,
  },
  /// Fewer grid rows or columns were requested than the supplied cells
  /// require.
  #[error("{requested} {axis} were requested, but the supplied cells require at least {required}")]
  TooFewCells {
    /// Either "rows" or "columns".
    axis: &'static str,
    /// The explicitly requested count.
    requested: usize,
    /// The count implied by the supplied cells.
    required: usize,
  },
  /// An alignment name is not registered.
  #[error("unknown alignment '{name}'; valid alignments are: {valid}")]
  UnknownAlignment {
    /// The offending name.
    name: String,
    /// A comma separated list of all registered names.
    valid: String,
  },
  /// A row or column size policy could not be parsed.
  #[error("unknown size policy '{0}'; expected 'expand' or a number of pixels")]
  UnknownSizePolicy(String),
  /// A color name is not part of the palette.
  #[error("unknown color '{name}'; valid colors are: {valid}")]
  UnknownColor {
    /// The offending name.
    name: String,
    /// A comma separated list of all color names in the palette.
    valid: String,
  },
  /// A color specification could not be parsed.
  #[error("invalid color '{0}'; expected a '#rrggbb' or '#rrggbbaa' hex string")]
  InvalidColor(String),
  /// A deck was asked to show a state it does not have.
  #[error("unknown state '{name}'; valid states are: {valid}")]
  UnknownState {
    /// The offending state name.
    name: String,
    /// A comma separated list of all known states.
    valid: String,
  },
  /// An alignment that must preserve the size of a widget changed it.
  #[error("alignment resized the widget from {before} to {after}; only position may change")]
  AlignmentResized {
    /// The size before alignment.
    before: Size,
    /// The size after alignment.
    after: Size,
  },
  /// The space handed to a grid is smaller than its minimum size.
  #[error("cannot fit cells with a minimum size of {min} into {available}")]
  BoundsTooSmall {
    /// The minimum size claimed by the grid.
    min: Size,
    /// The size that was made available.
    available: Size,
  },
  /// A size-dependent operation was invoked on a widget that has not
  /// been laid out yet.
  #[error("widget {id} has not been laid out yet and cannot {operation}")]
  NotLaidOut {
    /// The widget in question.
    id: Id,
    /// A description of the attempted operation.
    operation: &'static str,
  },
  /// A cell geometry query was made before any bounding rect was
  /// provided to a grid.
  #[error("{0} requires a bounding rect; call make_cells first")]
  Unsized(&'static str),
  /// A board placement is over- or under-determined.
  #[error("invalid placement: {0}")]
  InvalidPlacement(String),
  /// A widget-specific operation was invoked on a widget of a
  /// different type.
  #[error("widget {id} is not a {expected}")]
  WrongWidgetType {
    /// The widget in question.
    id: Id,
    /// The name of the expected widget type.
    expected: &'static str,
  },
  /// The root territory cannot accommodate the minimum size of the
  /// widget tree.
  #[error(
    "root territory {territory} is smaller than the minimum size {min} claimed by the widget \
     tree; wrap oversized content in a scroll pane, which has no minimum size"
  )]
  TerritoryTooSmall {
    /// The territory provided by the host.
    territory: Size,
    /// The minimum size claimed by the root widget.
    min: Size,
  },
}

impl Error {
  /// Check whether the error is a fatal layout error as opposed to a
  /// usage error.
  pub fn is_fatal(&self) -> bool {
    matches!(self, Self::TerritoryTooSmall { .. })
  }
}
