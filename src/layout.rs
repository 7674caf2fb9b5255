// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Group;
use crate::MutCap;
use crate::Object;
use crate::Rect;
use crate::Result;
use crate::Size;


/// A trait representing the layout behavior of a widget.
///
/// The hooks of this trait are invoked by the `Ui` as part of the
/// claim, resize, and regroup passes. They should never be called
/// directly; use the corresponding [`MutCap`] methods instead, which
/// take care of caching and of propagating the passes through the
/// widget tree.
pub trait Layout: Object {
  /// Calculate the minimum size of the widget.
  ///
  /// When this method is invoked all children have been claimed
  /// already and their minimum sizes are available through
  /// [`Cap::min_size`][crate::Cap::min_size]. By default a widget
  /// claims the component-wise maximum of its children's sizes.
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let mut size = Size::zero();
    for child in cap.children(self.id()) {
      size = size.max(cap.min_size(*child));
    }
    Ok(size)
  }

  /// React to the widget's rectangle having changed.
  fn resize(&self, _cap: &mut dyn MutCap, _rect: Rect) -> Result<()> {
    Ok(())
  }

  /// Assign rectangles to all children.
  ///
  /// This method is invoked whenever the widget is resized, even if its
  /// rectangle did not change. By default every child is given the
  /// widget's own rectangle.
  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let children = cap.children(self.id()).copied().collect::<Vec<_>>();
    for child in children {
      let () = cap.resize(child, rect)?;
    }
    Ok(())
  }

  /// React to the widget's draw order token having changed.
  fn regroup(&self, _cap: &mut dyn MutCap, _group: &Group) -> Result<()> {
    Ok(())
  }

  /// Assign draw order tokens to all children.
  ///
  /// By default every child shares the widget's own token.
  fn regroup_children(&self, cap: &mut dyn MutCap, group: &Group) -> Result<()> {
    let children = cap.children(self.id()).copied().collect::<Vec<_>>();
    for child in children {
      let () = cap.regroup(child, group.clone())?;
    }
    Ok(())
  }

  /// Recompute internal geometry that depends on the widget's
  /// configuration but not on its children.
  fn reshape(&self, _cap: &mut dyn MutCap) -> Result<()> {
    Ok(())
  }

  /// React to the widget having become connected to the root.
  fn on_attach(&self, _cap: &mut dyn MutCap) -> Result<()> {
    Ok(())
  }

  /// React to the widget being about to be disconnected from the root.
  fn on_detach(&self, _cap: &mut dyn MutCap) -> Result<()> {
    Ok(())
  }
}
