// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::TypeId;
use std::fmt::Debug;

use crate::Handleable;
use crate::Layout;
use crate::Object;
use crate::Renderable;


/// A widget as used by a [`Ui`][crate::Ui].
///
/// In addition to implementing the [`Handleable`] and [`Layout`]
/// traits, a widget must be renderable and identifiable. Widgets are
/// stateless in the sense that all mutable state lives in the data
/// associated with them and is reachable through
/// [`Cap::data`][crate::Cap::data].
pub trait Widget: Handleable + Layout + Renderable + Object + Debug {
  /// Get the [`TypeId`] of `self`.
  fn type_id(&self) -> TypeId;
}

impl dyn Widget {
  /// Check if the widget is of type `T`.
  pub fn is<T: Widget + 'static>(&self) -> bool {
    let t = TypeId::of::<T>();
    let own_t = Widget::type_id(self);

    t == own_t
  }

  /// Downcast the widget reference to type `T`.
  pub fn downcast_ref<T: Widget + 'static>(&self) -> Option<&T> {
    if self.is::<T>() {
      unsafe { Some(&*(self as *const dyn Widget as *const T)) }
    } else {
      None
    }
  }
}
