// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use crate::Rect;
use crate::Vector;


/// The kind of a single level in a draw order token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroupKind {
  /// The top level token handed out by the `Ui`.
  Root,
  /// A sub-order relative to the parent token. Higher orders are drawn
  /// on top of lower ones.
  Order(i32),
  /// A translation applied to everything drawn with this token.
  Translate(Vector),
  /// A scissor rectangle, expressed in the parent token's coordinate
  /// space, clipping everything drawn with this token.
  Scissor(Rect),
}


#[derive(Debug, PartialEq)]
struct GroupNode {
  parent: Option<Group>,
  kind: GroupKind,
}


/// A hierarchical draw order token.
///
/// Widgets pass their token to the [`Renderer`][crate::Renderer] when
/// drawing. Tokens compare equal when their entire ancestry is equal,
/// which allows regrouping to be skipped when nothing changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Group(Rc<GroupNode>);

impl Group {
  /// Create a new root token.
  pub fn root() -> Self {
    Self(Rc::new(GroupNode {
      parent: None,
      kind: GroupKind::Root,
    }))
  }

  fn child(&self, kind: GroupKind) -> Self {
    Self(Rc::new(GroupNode {
      parent: Some(self.clone()),
      kind,
    }))
  }

  /// Derive a token ordered relative to its siblings.
  pub fn ordered(&self, order: i32) -> Self {
    self.child(GroupKind::Order(order))
  }

  /// Derive a token translating everything drawn with it.
  pub fn translated(&self, offset: Vector) -> Self {
    self.child(GroupKind::Translate(offset))
  }

  /// Derive a token clipping everything drawn with it to `rect`.
  pub fn clipped(&self, rect: Rect) -> Self {
    self.child(GroupKind::Scissor(rect))
  }

  /// Retrieve the parent token, if any.
  pub fn parent(&self) -> Option<&Group> {
    self.0.parent.as_ref()
  }

  /// Retrieve the kind of this very level.
  pub fn kind(&self) -> GroupKind {
    self.0.kind
  }

  /// Retrieve the kinds of all levels, starting at the root.
  pub fn path(&self) -> Vec<GroupKind> {
    let mut path = Vec::new();
    let mut group = Some(self);
    while let Some(g) = group {
      path.push(g.kind());
      group = g.parent();
    }
    path.reverse();
    path
  }

  /// Retrieve the sort key of the token: the orders of all levels,
  /// starting at the root.
  pub fn order(&self) -> Vec<i32> {
    self
      .path()
      .into_iter()
      .filter_map(|kind| match kind {
        GroupKind::Order(order) => Some(order),
        _ => None,
      })
      .collect()
  }

  /// Calculate the accumulated translation.
  pub fn offset(&self) -> Vector {
    self
      .path()
      .into_iter()
      .fold(Vector::zero(), |offset, kind| match kind {
        GroupKind::Translate(delta) => offset + delta,
        _ => offset,
      })
  }

  /// Calculate the effective clip rectangle in root coordinates.
  ///
  /// Returns `None` if nothing is clipped. Disjoint scissor rectangles
  /// result in an empty rectangle.
  pub fn clip(&self) -> Option<Rect> {
    let mut offset = Vector::zero();
    let mut clip = None::<Rect>;

    for kind in self.path() {
      match kind {
        GroupKind::Root | GroupKind::Order(..) => (),
        GroupKind::Translate(delta) => offset += delta,
        GroupKind::Scissor(rect) => {
          let rect = rect.displace(offset);
          clip = Some(match clip {
            None => rect,
            Some(clip) => clip.intersect(&rect).unwrap_or_default(),
          });
        },
      }
    }
    clip
  }
}
