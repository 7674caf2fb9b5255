// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use crate::align;
use crate::Alignment;
use crate::Cap;
use crate::Cell;
use crate::Error;
use crate::GridSolver;
use crate::Id;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Size;
use crate::SizePolicy;
use crate::Update;


/// The configuration of an [`HBox`] or [`VBox`].
#[derive(Clone, Debug, Default)]
pub struct BoxConfig {
  /// The padding between children as well as around them.
  pub padding: f64,
  /// The alignment of every child within the space allotted to it.
  pub alignment: Alignment,
}


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Axis {
  Horizontal,
  Vertical,
}

impl Axis {
  fn cell(self, index: usize) -> Cell {
    match self {
      Self::Horizontal => (0, index),
      Self::Vertical => (index, 0),
    }
  }
}


#[derive(Clone, Copy, Debug)]
struct Item {
  id: Id,
  policy: SizePolicy,
}


/// The data associated with an [`HBox`] or [`VBox`].
#[derive(Debug)]
pub struct BoxData {
  axis: Axis,
  items: Vec<Item>,
  alignment: Alignment,
  solver: GridSolver,
}

impl BoxData {
  fn new(axis: Axis, config: BoxConfig) -> Self {
    let mut solver = GridSolver::new();
    let () = solver.set_padding(config.padding);

    Self {
      axis,
      items: Vec::new(),
      alignment: config.alignment,
      solver,
    }
  }

  /// Configure the solver for the current set of children.
  fn sync_policies(&mut self) {
    let () = self.solver.clear_sizes();
    for (i, item) in self.items.iter().enumerate() {
      match self.axis {
        Axis::Horizontal => self.solver.set_col_width(i, item.policy),
        Axis::Vertical => self.solver.set_row_height(i, item.policy),
      }
    }
  }

  fn position(&self, container: Id, child: Id) -> Result<usize> {
    self
      .items
      .iter()
      .position(|item| item.id == child)
      .ok_or(Error::NotAChild {
        child,
        parent: container,
      })
  }
}


/// The policy children of a box receive unless told otherwise: they
/// get exactly their minimum size along the box's axis.
const DEFAULT_POLICY: SizePolicy = SizePolicy::Fixed(0.0);


fn insert(
  cap: &mut dyn MutCap,
  container: Id,
  index: Option<usize>,
  child: Id,
  policy: SizePolicy,
) -> Result<()> {
  let () = cap.attach_child(container, child)?;

  let data = cap.typed_data_mut::<BoxData>(container)?;
  let index = index.unwrap_or(data.items.len()).min(data.items.len());
  let () = data.items.insert(index, Item { id: child, policy });
  let () = data.sync_policies();
  cap.update(container, Update::Repack)
}

fn remove(cap: &mut dyn MutCap, container: Id, child: Id) -> Result<()> {
  let data = cap.typed_data_mut::<BoxData>(container)?;
  let index = data.position(container, child)?;
  let _item = data.items.remove(index);
  let () = data.sync_policies();

  let () = cap.detach_child(container, child)?;
  cap.update(container, Update::Repack)
}

fn clear(cap: &mut dyn MutCap, container: Id) -> Result<()> {
  let data = cap.typed_data_mut::<BoxData>(container)?;
  let items = data.items.drain(..).collect::<Vec<_>>();
  let () = data.sync_policies();

  for item in items {
    let () = cap.detach_child(container, item.id)?;
  }
  cap.update(container, Update::Repack)
}

fn set_policy(cap: &mut dyn MutCap, container: Id, child: Id, policy: SizePolicy) -> Result<()> {
  let data = cap.typed_data_mut::<BoxData>(container)?;
  let index = data.position(container, child)?;
  data.items[index].policy = policy;
  let () = data.sync_policies();
  cap.update(container, Update::Repack)
}

fn items(cap: &dyn Cap, container: Id) -> Result<Vec<Id>> {
  let data = cap.typed_data::<BoxData>(container)?;
  Ok(data.items.iter().map(|item| item.id).collect())
}

fn claim(cap: &mut dyn MutCap, container: Id) -> Result<Size> {
  let data = cap.typed_data::<BoxData>(container)?;
  let axis = data.axis;
  let cells = data
    .items
    .iter()
    .enumerate()
    .map(|(i, item)| (axis.cell(i), Rect::from_size(cap.min_size(item.id))))
    .collect::<BTreeMap<_, _>>();

  cap.typed_data_mut::<BoxData>(container)?.solver.make_claim(cells)
}

fn resize_children(cap: &mut dyn MutCap, container: Id, rect: Rect) -> Result<()> {
  let data = cap.typed_data_mut::<BoxData>(container)?;
  let axis = data.axis;
  let items = data.items.clone();
  let alignment = data.alignment.clone();
  let cells = data.solver.make_cells(rect)?.clone();

  for (i, item) in items.iter().enumerate() {
    if let Some(cell) = cells.get(&axis.cell(i)) {
      let mut child_rect = Rect::from_size(cap.min_size(item.id));
      let () = align(&alignment, &mut child_rect, cell);
      let () = cap.resize(item.id, child_rect)?;
    }
  }
  Ok(())
}


/// Define a box widget type laying out its children along `$axis`.
macro_rules! box_widget {
  ($name:ident, $axis:expr, $doc:literal) => {
    #[doc = $doc]
    ///
    /// Every child is assigned a [`SizePolicy`] along the box's axis.
    /// By default children get exactly their minimum size; children
    /// with an `Expand` policy share the remaining space equally. Along
    /// the other axis all children get the box's full extent, minus
    /// padding, and are positioned with the box's alignment.
    ///
    /// Children have to be added with `add`, `add_with_policy`, or
    /// `insert`. A widget attached through [`MutCap::attach_child`]
    /// directly has no position in the box and is never laid out.
    #[derive(Debug, crate::derive::Widget)]
    #[tessel(default_new)]
    pub struct $name {
      id: Id,
    }

    impl $name {
      /// Create a new, empty box.
      pub fn create(cap: &mut dyn MutCap, config: BoxConfig) -> Id {
        let data = BoxData::new($axis, config);
        cap.add_widget(Box::new(data), &mut |id, _cap| Box::new($name::new(id)))
      }

      /// Add a child at the end, using the default size policy.
      pub fn add(cap: &mut dyn MutCap, container: Id, child: Id) -> Result<()> {
        insert(cap, container, None, child, DEFAULT_POLICY)
      }

      /// Add a child at the end, using the given size policy.
      pub fn add_with_policy(
        cap: &mut dyn MutCap,
        container: Id,
        child: Id,
        policy: SizePolicy,
      ) -> Result<()> {
        insert(cap, container, None, child, policy)
      }

      /// Insert a child at the given position.
      ///
      /// Positions past the end append the child.
      pub fn insert(
        cap: &mut dyn MutCap,
        container: Id,
        index: usize,
        child: Id,
        policy: SizePolicy,
      ) -> Result<()> {
        insert(cap, container, Some(index), child, policy)
      }

      /// Remove a child, detaching it.
      pub fn remove(cap: &mut dyn MutCap, container: Id, child: Id) -> Result<()> {
        remove(cap, container, child)
      }

      /// Remove all children.
      pub fn clear(cap: &mut dyn MutCap, container: Id) -> Result<()> {
        clear(cap, container)
      }

      /// Change the size policy of a child.
      pub fn set_policy(
        cap: &mut dyn MutCap,
        container: Id,
        child: Id,
        policy: SizePolicy,
      ) -> Result<()> {
        set_policy(cap, container, child, policy)
      }

      /// Retrieve the children of the box, in layout order.
      pub fn items(cap: &dyn Cap, container: Id) -> Result<Vec<Id>> {
        items(cap, container)
      }
    }

    impl crate::Layout for $name {
      fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
        claim(cap, self.id)
      }

      fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
        resize_children(cap, self.id, rect)
      }
    }

    impl crate::Handleable for $name {
      fn children_can_overlap(&self) -> bool {
        false
      }
    }
  };
}

box_widget!(
  HBox,
  Axis::Horizontal,
  "A container arranging its children from left to right."
);
box_widget!(
  VBox,
  Axis::Vertical,
  "A container arranging its children from top to bottom."
);


#[cfg(test)]
mod tests {
  use super::*;


  #[test]
  fn cell_addressing() {
    assert_eq!(Axis::Horizontal.cell(2), (0, 2));
    assert_eq!(Axis::Vertical.cell(2), (2, 0));
  }
}
