// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::align;
use crate::derive::Handleable;
use crate::derive::Widget;
use crate::Alignment;
use crate::Cap;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Size;
use crate::Update;


/// The configuration of a [`Bin`].
#[derive(Clone, Debug, Default)]
pub struct BinConfig {
  /// The space kept free on every side of the child.
  pub padding: f64,
  /// The alignment of the child within the padded rectangle.
  pub alignment: Alignment,
}


/// The data associated with a [`Bin`].
#[derive(Debug)]
pub struct BinData {
  child: Option<Id>,
  padding: f64,
  alignment: Alignment,
}


/// A container with at most one child, surrounded by padding.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Bin {
  id: Id,
}

impl Bin {
  /// Create a new, empty bin.
  pub fn create(cap: &mut dyn MutCap, config: BinConfig) -> Id {
    let data = BinData {
      child: None,
      padding: config.padding,
      alignment: config.alignment,
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Bin::new(id)))
  }

  /// Retrieve the child of a bin.
  pub fn child(cap: &dyn Cap, bin: Id) -> Result<Option<Id>> {
    Ok(cap.typed_data::<BinData>(bin)?.child)
  }

  /// Set or clear the child of a bin.
  ///
  /// A previous child is detached. If the new child cannot be attached
  /// the bin is left unchanged.
  pub fn set_child(cap: &mut dyn MutCap, bin: Id, child: Option<Id>) -> Result<()> {
    let old = cap.typed_data::<BinData>(bin)?.child;
    if old == child {
      return Ok(())
    }

    if let Some(child) = child {
      let () = cap.attach_child(bin, child)?;
    }
    if let Some(old) = old {
      let () = cap.detach_child(bin, old)?;
    }
    cap.typed_data_mut::<BinData>(bin)?.child = child;
    cap.update(bin, Update::Repack)
  }

  /// Change the padding around the child.
  pub fn set_padding(cap: &mut dyn MutCap, bin: Id, padding: f64) -> Result<()> {
    cap.typed_data_mut::<BinData>(bin)?.padding = padding;
    cap.update(bin, Update::Repack)
  }

  /// Change the alignment of the child.
  pub fn set_alignment(cap: &mut dyn MutCap, bin: Id, alignment: Alignment) -> Result<()> {
    cap.typed_data_mut::<BinData>(bin)?.alignment = alignment;
    cap.update(bin, Update::Repack)
  }
}

impl Layout for Bin {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let data = cap.typed_data::<BinData>(self.id)?;
    let padding = data.padding * 2.0;
    let child = data.child.map(|child| cap.min_size(child)).unwrap_or_default();

    Ok(Size::new(child.width + padding, child.height + padding))
  }

  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let data = cap.typed_data::<BinData>(self.id)?;
    let Some(child) = data.child else {
      return Ok(())
    };

    let inner = rect.shrink(data.padding);
    let mut child_rect = Rect::from_size(cap.min_size(child));
    let () = align(&data.alignment, &mut child_rect, &inner);
    cap.resize(child, child_rect)
  }
}
