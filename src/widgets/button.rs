// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Instant;

use async_trait::async_trait;

use crate::align;
use crate::derive::Widget;
use crate::widgets::Deck;
use crate::Alignment;
use crate::Cap;
use crate::Group;
use crate::Handleable;
use crate::Id;
use crate::Layout;
use crate::MouseButtons;
use crate::MouseEvent;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Rollover;
use crate::Signal;
use crate::Update;
use crate::Vector;


/// The configuration of a [`Button`].
#[derive(Clone, Debug)]
pub struct ButtonConfig {
  /// Whether the button flips between toggled and untoggled on every
  /// click.
  pub toggle: bool,
  /// The alignment of the foreground within the button.
  pub alignment: Alignment,
}

impl Default for ButtonConfig {
  fn default() -> Self {
    Self {
      toggle: false,
      alignment: Alignment::Center,
    }
  }
}


/// The data associated with a [`Button`].
#[derive(Debug)]
pub struct ButtonData {
  deck: Id,
  foreground: Option<Id>,
  rollover: Rollover,
  /// Whether the left button was pressed over the button and not yet
  /// released.
  pressed: bool,
  toggle: bool,
  toggled: bool,
  last_click: Option<Instant>,
  alignment: Alignment,
}


/// A clickable widget.
///
/// A button displays one widget per [`Rollover`] state, managed by a
/// [`Deck`], plus an optional foreground on top of it. States without a
/// widget fall back to the widget of [`Rollover::Base`].
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct Button {
  id: Id,
}

impl Button {
  /// Create a new button without any state widgets.
  pub fn create(cap: &mut dyn MutCap, config: ButtonConfig) -> Result<Id> {
    let deck = Deck::create(cap);
    let data = ButtonData {
      deck,
      foreground: None,
      rollover: Rollover::Base,
      pressed: false,
      toggle: config.toggle,
      toggled: false,
      last_click: None,
      alignment: config.alignment,
    };
    let button = cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Button::new(id)));
    let () = cap.attach_child(button, deck)?;
    Ok(button)
  }

  /// Set the widget displayed in the given rollover state.
  pub fn set_state_widget(cap: &mut dyn MutCap, button: Id, state: Rollover, widget: Id) -> Result<()> {
    let deck = cap.typed_data::<ButtonData>(button)?.deck;
    let () = Deck::add_state(cap, deck, state.name(), widget)?;
    Button::show(cap, button)
  }

  /// Set or clear the foreground, e.g., a label.
  ///
  /// If the new foreground cannot be attached the button is left
  /// unchanged.
  pub fn set_foreground(cap: &mut dyn MutCap, button: Id, widget: Option<Id>) -> Result<()> {
    let old = cap.typed_data::<ButtonData>(button)?.foreground;
    if old == widget {
      return Ok(())
    }

    if let Some(widget) = widget {
      let () = cap.attach_child(button, widget)?;
    }
    if let Some(old) = old {
      let () = cap.detach_child(button, old)?;
    }
    cap.typed_data_mut::<ButtonData>(button)?.foreground = widget;

    // The foreground was not known yet when it got attached.
    if let (Some(widget), Some(group)) = (widget, cap.group(button)) {
      let () = cap.regroup(widget, group.ordered(1))?;
    }
    cap.update(button, Update::Repack)
  }

  /// Retrieve the foreground.
  pub fn foreground(cap: &dyn Cap, button: Id) -> Result<Option<Id>> {
    Ok(cap.typed_data::<ButtonData>(button)?.foreground)
  }

  /// Enable a disabled button.
  pub fn enable(cap: &mut dyn MutCap, button: Id) -> Result<()> {
    if cap.typed_data::<ButtonData>(button)?.rollover != Rollover::Off {
      return Ok(())
    }
    let rollover = if cap.is_under_mouse(button) {
      Rollover::Over
    } else {
      Rollover::Base
    };
    Button::set_rollover(cap, button, rollover)
  }

  /// Disable a button, making it ignore the mouse.
  pub fn disable(cap: &mut dyn MutCap, button: Id) -> Result<()> {
    cap.typed_data_mut::<ButtonData>(button)?.pressed = false;
    Button::set_rollover(cap, button, Rollover::Off)
  }

  /// Check whether a button is enabled.
  pub fn is_enabled(cap: &dyn Cap, button: Id) -> Result<bool> {
    Ok(cap.typed_data::<ButtonData>(button)?.rollover != Rollover::Off)
  }

  /// Retrieve the current rollover state.
  pub fn rollover(cap: &dyn Cap, button: Id) -> Result<Rollover> {
    Ok(cap.typed_data::<ButtonData>(button)?.rollover)
  }

  /// Check whether a toggle button is toggled.
  pub fn is_toggled(cap: &dyn Cap, button: Id) -> Result<bool> {
    Ok(cap.typed_data::<ButtonData>(button)?.toggled)
  }

  /// Make the deck display the current rollover state.
  fn show(cap: &mut dyn MutCap, button: Id) -> Result<()> {
    let data = cap.typed_data::<ButtonData>(button)?;
    let (deck, rollover) = (data.deck, data.rollover);

    let state = if Deck::has_state(&*cap, deck, rollover.name())? {
      rollover.name()
    } else {
      Rollover::Base.name()
    };

    if Deck::has_state(&*cap, deck, state)? {
      Deck::set_state(cap, deck, state)
    } else {
      Ok(())
    }
  }

  fn set_rollover(cap: &mut dyn MutCap, button: Id, new: Rollover) -> Result<()> {
    let data = cap.typed_data_mut::<ButtonData>(button)?;
    let old = data.rollover;
    if old == new {
      return Ok(())
    }
    data.rollover = new;

    let () = Button::show(cap, button)?;
    cap.emit(button, Signal::Rollover { new, old })
  }

  fn click(cap: &mut dyn MutCap, button: Id) -> Result<()> {
    let interval = cap.theme().double_click_interval;
    let now = Instant::now();

    let data = cap.typed_data_mut::<ButtonData>(button)?;
    let double = data
      .last_click
      .is_some_and(|last| now.saturating_duration_since(last) <= interval);
    // A third click starts a new double click instead of completing
    // another one.
    data.last_click = if double { None } else { Some(now) };

    let toggled = if data.toggle {
      data.toggled = !data.toggled;
      Some(data.toggled)
    } else {
      None
    };

    if let Some(toggled) = toggled {
      let () = cap.emit(button, Signal::Toggle(toggled))?;
    }
    let () = cap.emit(button, Signal::Click)?;
    if double {
      let () = cap.emit(button, Signal::DoubleClick)?;
    }
    Ok(())
  }
}

impl Layout for Button {
  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let data = cap.typed_data::<ButtonData>(self.id)?;
    let (deck, foreground) = (data.deck, data.foreground);
    let alignment = data.alignment.clone();

    let () = cap.resize(deck, rect)?;
    if let Some(foreground) = foreground {
      let mut child_rect = Rect::from_size(cap.min_size(foreground));
      let () = align(&alignment, &mut child_rect, &rect);
      let () = cap.resize(foreground, child_rect)?;
    }
    Ok(())
  }

  fn regroup_children(&self, cap: &mut dyn MutCap, group: &Group) -> Result<()> {
    let data = cap.typed_data::<ButtonData>(self.id)?;
    let (deck, foreground) = (data.deck, data.foreground);

    let () = cap.regroup(deck, group.ordered(0))?;
    if let Some(foreground) = foreground {
      let () = cap.regroup(foreground, group.ordered(1))?;
    }
    Ok(())
  }
}

#[async_trait(?Send)]
impl Handleable for Button {
  async fn handle_mouse(&self, cap: &mut dyn MutCap, event: MouseEvent) -> Result<()> {
    let data = cap.typed_data::<ButtonData>(self.id)?;
    if data.rollover == Rollover::Off {
      return Ok(())
    }
    let pressed = data.pressed;

    match event {
      MouseEvent::Enter { .. } => {
        let rollover = if pressed {
          Rollover::Down
        } else {
          Rollover::Over
        };
        Button::set_rollover(cap, self.id, rollover)
      },
      MouseEvent::Leave { .. } => {
        cap.typed_data_mut::<ButtonData>(self.id)?.pressed = false;
        Button::set_rollover(cap, self.id, Rollover::Base)
      },
      MouseEvent::Press { button, .. } if button.contains(MouseButtons::LEFT) => {
        cap.typed_data_mut::<ButtonData>(self.id)?.pressed = true;
        Button::set_rollover(cap, self.id, Rollover::Down)
      },
      MouseEvent::Release { button, .. } if button.contains(MouseButtons::LEFT) && pressed => {
        cap.typed_data_mut::<ButtonData>(self.id)?.pressed = false;
        let () = Button::set_rollover(cap, self.id, Rollover::Over)?;
        Button::click(cap, self.id)
      },
      _ => Ok(()),
    }
  }

  /// The button reacts to the mouse as a whole; none of its parts
  /// receives mouse events.
  fn children_under_mouse(&self, _cap: &dyn Cap, _widget: Id, _point: Vector, _previous: &[Id]) -> Vec<Id> {
    Vec::new()
  }
}
