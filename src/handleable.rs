// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;

use async_trait::async_trait;

use crate::mouse::hit_test;
use crate::Cap;
use crate::Event;
use crate::Id;
use crate::MouseEvent;
use crate::MutCap;
use crate::Result;
use crate::Vector;


/// A trait representing an object capable of handling events.
#[async_trait(?Send)]
pub trait Handleable: Debug {
  /// Handle a keyboard [`Event`].
  ///
  /// The widget has the option to either consume the event and return
  /// nothing, in which case no one else will get informed about it,
  /// forward it directly (the default behavior), in which case its
  /// parent widget will receive it, or return a completely different
  /// event.
  async fn handle(&self, _cap: &mut dyn MutCap, event: Event) -> Result<Option<Event>> {
    Ok(Some(event))
  }

  /// Handle a [`MouseEvent`] routed to the widget.
  ///
  /// Mouse events are delivered to the widget before they are passed on
  /// to the children under the pointer.
  async fn handle_mouse(&self, _cap: &mut dyn MutCap, _event: MouseEvent) -> Result<()> {
    Ok(())
  }

  /// Determine the children located under the given point.
  ///
  /// `point` is expressed in the children's coordinate space and
  /// `previous` lists the children that were under the pointer
  /// previously. By default previously hit children are tested first
  /// and hidden children are never hit.
  fn children_under_mouse(&self, cap: &dyn Cap, widget: Id, point: Vector, previous: &[Id]) -> Vec<Id> {
    let children = cap.children(widget).copied();
    hit_test(cap, children, point, previous, !self.children_can_overlap())
  }

  /// Check whether children of the widget can overlap.
  ///
  /// If they cannot, hit testing stops at the first child found under
  /// the pointer.
  fn children_can_overlap(&self) -> bool {
    true
  }

  /// Translate a point from the widget's coordinate space into the
  /// coordinate space of its children.
  fn child_coordinates(&self, _cap: &dyn Cap, point: Vector) -> Vector {
    point
  }
}
