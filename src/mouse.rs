// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hit testing and normalization of raw mouse input.

use std::fmt::Debug;

use tracing::debug;

use crate::Cap;
use crate::Id;
use crate::MouseEvent;
use crate::Rect;
use crate::Vector;


/// Find the candidates located under `point`.
///
/// Candidates contained in `previous` are tested first, followed by the
/// remaining ones in the order provided. Hidden and not yet laid out
/// widgets are never hit. Containment is inclusive of the edges. If
/// `stop_at_first` is set, at most one widget is reported.
pub fn hit_test<I>(
  cap: &dyn Cap,
  candidates: I,
  point: Vector,
  previous: &[Id],
  stop_at_first: bool,
) -> Vec<Id>
where
  I: IntoIterator<Item = Id>,
{
  let candidates = candidates.into_iter().collect::<Vec<_>>();
  let ordered = previous
    .iter()
    .filter(|id| candidates.contains(id))
    .chain(candidates.iter().filter(|id| !previous.contains(id)));

  let mut hits = Vec::new();
  for id in ordered {
    let hit = !cap.is_hidden(*id)
      && cap
        .rect(*id)
        .is_some_and(|rect| rect.contains_vector(point));

    if hit {
      hits.push(*id);
      if stop_at_first {
        break
      }
    }
  }
  hits
}


/// A filter applied to raw mouse events before they are routed.
///
/// Windowing layers differ in the quirks of the events they report.
/// Implementations of this trait turn one raw event into zero or more
/// events to be routed through the widget tree.
pub trait MouseNormalizer: Debug {
  /// Normalize a single raw event.
  ///
  /// `root` is the rectangle occupied by the root widget.
  fn normalize(&mut self, event: MouseEvent, root: Rect) -> Vec<MouseEvent>;
}


/// A [`MouseNormalizer`] passing all events through unaltered.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl MouseNormalizer for PassThrough {
  fn normalize(&mut self, event: MouseEvent, _root: Rect) -> Vec<MouseEvent> {
    vec![event]
  }
}


/// A [`MouseNormalizer`] suppressing spurious leave/enter pairs.
///
/// Some windowing layers report the pointer leaving and immediately
/// re-entering the window, e.g., when a click changes the keyboard
/// focus. A `Leave` is held back until the next event arrives: if that
/// is an `Enter` inside the root rectangle both are dropped, otherwise
/// the `Leave` is replayed first.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpuriousLeaveFilter {
  held: Option<MouseEvent>,
}

impl SpuriousLeaveFilter {
  /// Create a new filter with no event held back.
  pub fn new() -> Self {
    Self::default()
  }
}

impl MouseNormalizer for SpuriousLeaveFilter {
  fn normalize(&mut self, event: MouseEvent, root: Rect) -> Vec<MouseEvent> {
    let held = self.held.take();

    match event {
      MouseEvent::Leave { .. } => {
        self.held = Some(event);
        held.into_iter().collect()
      },
      MouseEvent::Enter { pos } if held.is_some() && root.contains_vector(pos) => {
        debug!(?pos, "suppressing spurious mouse leave/enter pair");
        Vec::new()
      },
      _ => held.into_iter().chain([event]).collect(),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  fn root() -> Rect {
    Rect::new(0.0, 0.0, 100.0, 100.0)
  }

  fn leave() -> MouseEvent {
    MouseEvent::Leave {
      pos: Vector::new(50.0, 50.0),
    }
  }

  /// A leave immediately followed by an enter inside the root is
  /// dropped entirely.
  #[test]
  fn suppress_spurious_pair() {
    let mut filter = SpuriousLeaveFilter::new();
    assert!(filter.normalize(leave(), root()).is_empty());

    let enter = MouseEvent::Enter {
      pos: Vector::new(50.0, 50.0),
    };
    assert!(filter.normalize(enter, root()).is_empty());

    let motion = MouseEvent::Motion {
      pos: Vector::new(51.0, 50.0),
      delta: Vector::new(1.0, 0.0),
    };
    assert_eq!(filter.normalize(motion, root()), vec![motion]);
  }

  /// A leave followed by anything else is replayed.
  #[test]
  fn replay_genuine_leave() {
    let mut filter = SpuriousLeaveFilter::new();
    assert!(filter.normalize(leave(), root()).is_empty());

    let enter = MouseEvent::Enter {
      pos: Vector::new(150.0, 50.0),
    };
    assert_eq!(filter.normalize(enter, root()), vec![leave(), enter]);

    let mut pass = PassThrough;
    assert_eq!(pass.normalize(leave(), root()), vec![leave()]);
  }
}
