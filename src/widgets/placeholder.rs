// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::derive::Handleable;
use crate::derive::Widget;
use crate::Cap;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Result;
use crate::Size;
use crate::Update;


/// The data associated with a [`Placeholder`].
#[derive(Debug)]
pub struct PlaceholderData {
  size: Size,
}


/// A widget that draws nothing and merely claims a fixed minimum size.
///
/// Placeholders are useful for reserving space and in tests.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Placeholder {
  id: Id,
}

impl Placeholder {
  /// Create a placeholder claiming `size`.
  pub fn create(cap: &mut dyn MutCap, size: Size) -> Id {
    cap.add_widget(Box::new(PlaceholderData { size }), &mut |id, _cap| {
      Box::new(Placeholder::new(id))
    })
  }

  /// Retrieve the size claimed by a placeholder.
  pub fn size(cap: &dyn Cap, placeholder: Id) -> Result<Size> {
    Ok(cap.typed_data::<PlaceholderData>(placeholder)?.size)
  }

  /// Change the size claimed by a placeholder.
  pub fn set_size(cap: &mut dyn MutCap, placeholder: Id, size: Size) -> Result<()> {
    cap.typed_data_mut::<PlaceholderData>(placeholder)?.size = size;
    cap.update(placeholder, Update::Repack)
  }
}

impl Layout for Placeholder {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    Ok(cap.typed_data::<PlaceholderData>(self.id)?.size)
  }
}
