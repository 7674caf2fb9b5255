// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeSet;
use std::mem::take;


/// An idempotent update that can be applied to a widget.
///
/// The variant order is the order in which deferred updates are
/// replayed: shape computations happen before repacking, which happens
/// before regrouping and eventually redrawing.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Update {
  /// Recompute widget internal geometry, e.g., the tiles of a
  /// background.
  Reshape,
  /// Renegotiate the widget's size with its ancestors.
  Repack,
  /// Reapply the widget's current draw order token.
  Regroup,
  /// Draw the widget again.
  Redraw,
}


/// A record of updates deferred while a widget holds its updates.
#[derive(Clone, Debug)]
pub struct UpdateBatch<U> {
  /// The number of currently active hold scopes.
  depth: usize,
  /// The deduplicated set of deferred updates.
  pending: BTreeSet<U>,
}

impl<U> UpdateBatch<U>
where
  U: Copy + Ord,
{
  /// Create a new, inactive batch.
  pub fn new() -> Self {
    Self {
      depth: 0,
      pending: BTreeSet::new(),
    }
  }

  /// Check whether updates are currently being held.
  #[inline]
  pub fn is_held(&self) -> bool {
    self.depth > 0
  }

  /// Enter a hold scope.
  pub fn hold(&mut self) {
    self.depth += 1;
  }

  /// Record an update for later, if updates are being held.
  ///
  /// Returns `false` if the update should be applied immediately
  /// instead.
  pub fn defer(&mut self, update: U) -> bool {
    if self.is_held() {
      let _inserted = self.pending.insert(update);
      true
    } else {
      false
    }
  }

  /// Leave a hold scope.
  ///
  /// When the outermost scope is left all deferred updates are
  /// returned, each exactly once and in their declared order.
  pub fn release(&mut self) -> Option<Vec<U>> {
    debug_assert!(self.depth > 0, "released an update batch that is not held");
    self.depth = self.depth.saturating_sub(1);

    if self.depth == 0 {
      let pending = take(&mut self.pending);
      Some(pending.into_iter().collect())
    } else {
      None
    }
  }
}

impl<U> Default for UpdateBatch<U>
where
  U: Copy + Ord,
{
  fn default() -> Self {
    Self::new()
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  /// Check that deferred updates are deduplicated and replayed in their
  /// declared order.
  #[test]
  fn replay_order() {
    let mut batch = UpdateBatch::new();
    assert!(!batch.defer(Update::Redraw));

    batch.hold();
    assert!(batch.defer(Update::Redraw));
    assert!(batch.defer(Update::Repack));
    assert!(batch.defer(Update::Reshape));
    assert!(batch.defer(Update::Redraw));

    let replay = batch.release().unwrap();
    assert_eq!(replay, vec![Update::Reshape, Update::Repack, Update::Redraw]);
    assert!(!batch.is_held());
  }

  /// Only leaving the outermost scope triggers a replay.
  #[test]
  fn nested_scopes() {
    let mut batch = UpdateBatch::new();
    batch.hold();
    batch.hold();
    assert!(batch.defer(Update::Regroup));
    assert_eq!(batch.release(), None);
    assert!(batch.defer(Update::Reshape));
    assert_eq!(batch.release(), Some(vec![Update::Reshape, Update::Regroup]));
  }
}
