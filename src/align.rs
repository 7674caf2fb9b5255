// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placement policies mapping a child rectangle into a parent
//! rectangle.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::rc::Rc;

use crate::Error;
use crate::Rect;
use crate::Result;


/// The signature of a custom alignment function.
pub type AlignFn = dyn Fn(&mut Rect, &Rect);


/// A policy for placing a child rectangle inside a parent rectangle.
#[derive(Clone, Default)]
pub enum Alignment {
  /// Make the child cover the parent entirely.
  #[default]
  Fill,
  /// Use the parent's width and center the child.
  FillHorz,
  /// Use the parent's height and center the child.
  FillVert,
  /// Use the parent's width and attach the child to the top edge.
  FillTop,
  /// Use the parent's width and attach the child to the bottom edge.
  FillBottom,
  /// Use the parent's height and attach the child to the left edge.
  FillLeft,
  /// Use the parent's height and attach the child to the right edge.
  FillRight,
  /// Anchor the child in the top left corner.
  TopLeft,
  /// Anchor the child at the center of the top edge.
  Top,
  /// Anchor the child in the top right corner.
  TopRight,
  /// Anchor the child at the center of the left edge.
  Left,
  /// Center the child.
  Center,
  /// Anchor the child at the center of the right edge.
  Right,
  /// Anchor the child in the bottom left corner.
  BottomLeft,
  /// Anchor the child at the center of the bottom edge.
  Bottom,
  /// Anchor the child in the bottom right corner.
  BottomRight,
  /// A user provided placement function.
  Custom(Rc<AlignFn>),
}

impl Alignment {
  /// Create a custom alignment from a function.
  pub fn custom<F>(f: F) -> Self
  where
    F: Fn(&mut Rect, &Rect) + 'static,
  {
    Self::Custom(Rc::new(f))
  }

  /// Retrieve the canonical name of a built-in alignment.
  pub fn name(&self) -> Option<&'static str> {
    let name = match self {
      Self::Fill => "fill",
      Self::FillHorz => "fill horz",
      Self::FillVert => "fill vert",
      Self::FillTop => "fill top",
      Self::FillBottom => "fill bottom",
      Self::FillLeft => "fill left",
      Self::FillRight => "fill right",
      Self::TopLeft => "top left",
      Self::Top => "top",
      Self::TopRight => "top right",
      Self::Left => "left",
      Self::Center => "center",
      Self::Right => "right",
      Self::BottomLeft => "bottom left",
      Self::Bottom => "bottom",
      Self::BottomRight => "bottom right",
      Self::Custom(..) => return None,
    };
    Some(name)
  }

  fn builtins() -> [Self; 16] {
    [
      Self::Fill,
      Self::FillHorz,
      Self::FillVert,
      Self::FillTop,
      Self::FillBottom,
      Self::FillLeft,
      Self::FillRight,
      Self::TopLeft,
      Self::Top,
      Self::TopRight,
      Self::Left,
      Self::Center,
      Self::Right,
      Self::BottomLeft,
      Self::Bottom,
      Self::BottomRight,
    ]
  }
}

impl Debug for Alignment {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    match self.name() {
      Some(name) => write!(f, "Alignment({name})"),
      None => write!(f, "Alignment(custom)"),
    }
  }
}


/// Place `child` inside of `parent` according to `alignment`.
pub fn align(alignment: &Alignment, child: &mut Rect, parent: &Rect) {
  match alignment {
    Alignment::Fill => *child = *parent,
    Alignment::FillHorz => {
      child.width = parent.width;
      child.set_center(parent.center());
    },
    Alignment::FillVert => {
      child.height = parent.height;
      child.set_center(parent.center());
    },
    Alignment::FillTop => {
      child.width = parent.width;
      child.set_top_center(parent.top_center());
    },
    Alignment::FillBottom => {
      child.width = parent.width;
      child.set_bottom_center(parent.bottom_center());
    },
    Alignment::FillLeft => {
      child.height = parent.height;
      child.set_center_left(parent.center_left());
    },
    Alignment::FillRight => {
      child.height = parent.height;
      child.set_center_right(parent.center_right());
    },
    Alignment::TopLeft => child.set_top_left(parent.top_left()),
    Alignment::Top => child.set_top_center(parent.top_center()),
    Alignment::TopRight => child.set_top_right(parent.top_right()),
    Alignment::Left => child.set_center_left(parent.center_left()),
    Alignment::Center => child.set_center(parent.center()),
    Alignment::Right => child.set_center_right(parent.center_right()),
    Alignment::BottomLeft => child.set_bottom_left(parent.bottom_left()),
    Alignment::Bottom => child.set_bottom_center(parent.bottom_center()),
    Alignment::BottomRight => child.set_bottom_right(parent.bottom_right()),
    Alignment::Custom(f) => f(child, parent),
  }
}

/// Place `child` inside of `parent`, insisting that the alignment only
/// moves the child.
///
/// On failure `child` is left in the state the alignment function put
/// it in.
pub fn fixed_size_align(alignment: &Alignment, child: &mut Rect, parent: &Rect) -> Result<()> {
  let before = child.size();
  let () = align(alignment, child, parent);
  let after = child.size();

  if before != after {
    return Err(Error::AlignmentResized { before, after })
  }
  Ok(())
}


/// An explicit table of named alignments.
///
/// The table starts out with all built-in policies under their
/// canonical names and can be extended with additional, possibly
/// custom, entries.
#[derive(Clone, Debug)]
pub struct AlignmentRegistry {
  table: BTreeMap<String, Alignment>,
}

impl AlignmentRegistry {
  /// Create a registry containing the built-in alignments.
  pub fn new() -> Self {
    let table = Alignment::builtins()
      .into_iter()
      .filter_map(|alignment| Some((alignment.name()?.to_string(), alignment)))
      .collect();

    Self { table }
  }

  /// Register an alignment under the given name, replacing any
  /// previous entry.
  pub fn register<S>(&mut self, name: S, alignment: Alignment) -> Option<Alignment>
  where
    S: Into<String>,
  {
    self.table.insert(name.into(), alignment)
  }

  /// Look up an alignment by name.
  pub fn lookup(&self, name: &str) -> Result<Alignment> {
    self
      .table
      .get(name)
      .cloned()
      .ok_or_else(|| Error::UnknownAlignment {
        name: name.to_string(),
        valid: self.names().collect::<Vec<_>>().join(", "),
      })
  }

  /// Retrieve an iterator over all registered names, in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.table.keys().map(String::as_str)
  }
}

impl Default for AlignmentRegistry {
  fn default() -> Self {
    Self::new()
  }
}
