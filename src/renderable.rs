// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::TypeId;

use crate::Cap;
use crate::Group;
use crate::Rect;
use crate::Renderer;


/// A trait representing a renderable object.
pub trait Renderable {
  /// Get the [`TypeId`] of `self`.
  fn type_id(&self) -> TypeId;

  /// Draw the renderable object.
  ///
  /// This method just forwards the call to the given [`Renderer`],
  /// supplying a trait object of the actual widget. The renderer is
  /// expected to place its primitives in `rect`, to order them by
  /// `group`, and is free to inquire additional state using the
  /// supplied [`Cap`].
  fn draw(&self, renderer: &mut dyn Renderer, cap: &dyn Cap, rect: Rect, group: &Group);
}

impl<'r> dyn Renderable + 'r {
  /// Check if the renderable is of type `T`.
  pub fn is<T: Renderable + 'static>(&self) -> bool {
    let t = TypeId::of::<T>();
    let own_t = Renderable::type_id(self);

    t == own_t
  }

  /// Downcast the renderable reference to type `T`.
  pub fn downcast_ref<T: Renderable + 'static>(&self) -> Option<&T> {
    if self.is::<T>() {
      unsafe { Some(&*(self as *const dyn Renderable as *const T)) }
    } else {
      None
    }
  }
}
