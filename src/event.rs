// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use bitflags::bitflags;

use crate::Id;
use crate::Vector;


bitflags! {
  /// A set of mouse buttons.
  #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
  pub struct MouseButtons: u8 {
    /// The left mouse button.
    const LEFT = 1 << 0;
    /// The middle mouse button.
    const MIDDLE = 1 << 1;
    /// The right mouse button.
    const RIGHT = 1 << 2;
  }
}

bitflags! {
  /// A set of keyboard modifiers active during an event.
  #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
  pub struct Modifiers: u8 {
    /// A shift key.
    const SHIFT = 1 << 0;
    /// A control key.
    const CTRL = 1 << 1;
    /// An alt key.
    const ALT = 1 << 2;
    /// A "command" or "super" key.
    const SUPER = 1 << 3;
  }
}


/// A key as used by the UI.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Key {
  /// The backspace key.
  Backspace,
  /// The delete key.
  Delete,
  /// The down arrow key.
  Down,
  /// The end key.
  End,
  /// The escape key.
  Esc,
  /// The home key.
  Home,
  /// The insert key.
  Insert,
  /// The left arrow key.
  Left,
  /// The page down key.
  PageDown,
  /// The page up key.
  PageUp,
  /// The return key.
  Return,
  /// The right arrow key.
  Right,
  /// The tab key.
  Tab,
  /// The up arrow key.
  Up,
  /// A key representing a character.
  Char(char),
}


/// A mouse event.
///
/// Positions are in the coordinate space of the widget receiving the
/// event, i.e., after all translations applied by its ancestors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouseEvent {
  /// The mouse moved without any button pressed.
  Motion {
    /// The position of the pointer.
    pos: Vector,
    /// The distance moved since the last event.
    delta: Vector,
  },
  /// A button was pressed.
  Press {
    /// The position of the pointer.
    pos: Vector,
    /// The button that was pressed.
    button: MouseButtons,
    /// The active keyboard modifiers.
    modifiers: Modifiers,
  },
  /// A button was released.
  Release {
    /// The position of the pointer.
    pos: Vector,
    /// The button that was released.
    button: MouseButtons,
    /// The active keyboard modifiers.
    modifiers: Modifiers,
  },
  /// The mouse moved while buttons were held down.
  Drag {
    /// The position of the pointer.
    pos: Vector,
    /// The distance moved since the last event.
    delta: Vector,
    /// The buttons being held.
    buttons: MouseButtons,
    /// The active keyboard modifiers.
    modifiers: Modifiers,
  },
  /// The scroll wheel was used.
  Scroll {
    /// The position of the pointer.
    pos: Vector,
    /// The scroll amount along both axes.
    scroll: Vector,
  },
  /// The pointer entered a widget.
  Enter {
    /// The position of the pointer.
    pos: Vector,
  },
  /// The pointer left a widget.
  Leave {
    /// The position of the pointer.
    pos: Vector,
  },
  /// The pointer entered a widget while dragging.
  DragEnter {
    /// The position of the pointer.
    pos: Vector,
  },
  /// The pointer left a widget while dragging.
  DragLeave {
    /// The position of the pointer.
    pos: Vector,
  },
}

impl MouseEvent {
  /// Retrieve the position of the pointer.
  pub fn pos(&self) -> Vector {
    match self {
      Self::Motion { pos, .. }
      | Self::Press { pos, .. }
      | Self::Release { pos, .. }
      | Self::Drag { pos, .. }
      | Self::Scroll { pos, .. }
      | Self::Enter { pos }
      | Self::Leave { pos }
      | Self::DragEnter { pos }
      | Self::DragLeave { pos } => *pos,
    }
  }

  /// Create a copy of the event with the position replaced.
  pub fn with_pos(mut self, new_pos: Vector) -> Self {
    match &mut self {
      Self::Motion { pos, .. }
      | Self::Press { pos, .. }
      | Self::Release { pos, .. }
      | Self::Drag { pos, .. }
      | Self::Scroll { pos, .. }
      | Self::Enter { pos }
      | Self::Leave { pos }
      | Self::DragEnter { pos }
      | Self::DragLeave { pos } => *pos = new_pos,
    }
    self
  }

  /// Check whether the event is a drag.
  #[inline]
  pub fn is_drag(&self) -> bool {
    matches!(self, Self::Drag { .. })
  }

  /// Check whether the event is one that gets routed to the children
  /// under the pointer, as opposed to a crossing event.
  #[inline]
  pub fn is_positional(&self) -> bool {
    matches!(
      self,
      Self::Motion { .. }
        | Self::Press { .. }
        | Self::Release { .. }
        | Self::Drag { .. }
        | Self::Scroll { .. }
    )
  }
}


/// An event as supplied to [`Ui::handle`][crate::Ui::handle].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
  /// A key was pressed.
  KeyDown(Key),
  /// A key was released.
  KeyUp(Key),
  /// A mouse event. Mouse events are routed spatially and never
  /// returned unhandled.
  Mouse(MouseEvent),
}

impl From<MouseEvent> for Event {
  fn from(event: MouseEvent) -> Self {
    Self::Mouse(event)
  }
}


/// The visual state of a widget reacting to the mouse.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rollover {
  /// The default state.
  Base,
  /// The pointer hovers over the widget.
  Over,
  /// A button is pressed over the widget.
  Down,
  /// The widget is disabled.
  Off,
}

impl Rollover {
  /// Retrieve the name of the state.
  pub fn name(&self) -> &'static str {
    match self {
      Self::Base => "base",
      Self::Over => "over",
      Self::Down => "down",
      Self::Off => "off",
    }
  }
}


/// A notification emitted by a widget to connected handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
  /// The widget was clicked.
  Click,
  /// The widget was clicked twice in short succession.
  DoubleClick,
  /// The widget's rollover state changed.
  Rollover {
    /// The new state.
    new: Rollover,
    /// The previous state.
    old: Rollover,
  },
  /// The widget was toggled into the given state.
  Toggle(bool),
  /// The widget received the input focus.
  Focus,
  /// The widget lost the input focus.
  Unfocus,
  /// A child was attached to the widget.
  AddChild(Id),
  /// A child was detached from the widget.
  RemoveChild(Id),
  /// The scroll position of the widget changed.
  Scroll(Vector),
  /// The size of the widget's view or of the content shown through it
  /// changed.
  ViewChange,
  /// A raw mouse event was delivered to the widget.
  Mouse(MouseEvent),
}


#[cfg(test)]
mod tests {
  use super::*;


  #[test]
  fn event_position() {
    let event = MouseEvent::Press {
      pos: Vector::new(1.0, 2.0),
      button: MouseButtons::LEFT,
      modifiers: Modifiers::SHIFT | Modifiers::CTRL,
    };
    assert_eq!(event.pos(), Vector::new(1.0, 2.0));

    let event = event.with_pos(Vector::new(5.0, 5.0));
    assert_eq!(event.pos(), Vector::new(5.0, 5.0));
    assert!(event.is_positional());
    assert!(!MouseEvent::Leave { pos: Vector::zero() }.is_positional());
  }
}
