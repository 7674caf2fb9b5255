// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for events.

#![deny(warnings)]

mod common;

use std::time::Duration;

use tessel::widgets::BoxConfig;
use tessel::widgets::Button;
use tessel::widgets::ButtonConfig;
use tessel::widgets::HBox;
use tessel::widgets::Placeholder;
use tessel::widgets::Stack;
use tessel::Cap;
use tessel::Event;
use tessel::Id;
use tessel::Key;
use tessel::Modifiers;
use tessel::MouseButtons;
use tessel::MouseEvent;
use tessel::MutCap;
use tessel::PassThrough;
use tessel::Rect;
use tessel::Rollover;
use tessel::Signal;
use tessel::Size;
use tessel::SizePolicy;
use tessel::Ui;
use tessel::Vector;

use common::new_ui;
use common::record_signals;
use common::TestWidget;


fn motion(x: f64, y: f64) -> MouseEvent {
  MouseEvent::Motion {
    pos: Vector::new(x, y),
    delta: Vector::zero(),
  }
}

fn press(x: f64, y: f64) -> MouseEvent {
  MouseEvent::Press {
    pos: Vector::new(x, y),
    button: MouseButtons::LEFT,
    modifiers: Modifiers::empty(),
  }
}

fn release(x: f64, y: f64) -> MouseEvent {
  MouseEvent::Release {
    pos: Vector::new(x, y),
    button: MouseButtons::LEFT,
    modifiers: Modifiers::empty(),
  }
}


/// Create a `Ui` with two test widgets side by side, each occupying
/// one half of the 100x100 territory.
fn side_by_side() -> (Ui, Id, Id) {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let hbox = HBox::create(&mut ui, BoxConfig::default());
  let w1 = TestWidget::create(&mut ui, Size::new(10.0, 10.0));
  let w2 = TestWidget::create(&mut ui, Size::new(10.0, 10.0));
  let () = HBox::add_with_policy(&mut ui, hbox, w1, SizePolicy::Expand).unwrap();
  let () = HBox::add_with_policy(&mut ui, hbox, w2, SizePolicy::Expand).unwrap();
  let () = Stack::add(&mut ui, root, hbox, 0).unwrap();

  assert_eq!(ui.rect(w1), Some(Rect::new(0.0, 0.0, 50.0, 100.0)));
  assert_eq!(ui.rect(w2), Some(Rect::new(50.0, 0.0, 50.0, 100.0)));
  (ui, w1, w2)
}


/// Check that key events bubble up from the focused widget until one
/// consumes them.
#[tokio::test]
async fn key_bubbling() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let parent = TestWidget::create(&mut ui, Size::zero());
  let child = TestWidget::create(&mut ui, Size::zero());
  let () = ui.attach_child(parent, child).unwrap();
  let () = ui.attach_child(root, parent).unwrap();

  let event = Event::KeyDown(Key::Char('a'));
  // Without focus nobody gets to see the event.
  assert_eq!(ui.handle(event).await.unwrap(), Some(event));
  assert!(TestWidget::data(&ui, child).keys.is_empty());

  let () = ui.focus(child).unwrap();
  assert_eq!(ui.handle(event).await.unwrap(), Some(event));
  assert_eq!(TestWidget::data(&ui, child).keys, vec![event]);
  assert_eq!(TestWidget::data(&ui, parent).keys, vec![event]);

  TestWidget::data_mut(&mut ui, parent).consume_keys = true;
  let event = Event::KeyUp(Key::Return);
  assert_eq!(ui.handle(event).await.unwrap(), None);
  assert_eq!(TestWidget::data(&ui, parent).keys.last(), Some(&event));
}

#[test]
fn focus_signals() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let w1 = TestWidget::create(&mut ui, Size::zero());
  let w2 = TestWidget::create(&mut ui, Size::zero());
  let () = ui.attach_child(root, w1).unwrap();
  let () = ui.attach_child(root, w2).unwrap();
  let s1 = record_signals(&mut ui, w1);
  let s2 = record_signals(&mut ui, w2);

  let () = ui.focus(w1).unwrap();
  // Focusing the focused widget again is a no-op.
  let () = ui.focus(w1).unwrap();
  let () = ui.focus(w2).unwrap();
  assert!(ui.is_focused(w2));
  let () = ui.unfocus().unwrap();
  assert_eq!(ui.focused(), None);

  assert_eq!(*s1.borrow(), vec![Signal::Focus, Signal::Unfocus]);
  assert_eq!(*s2.borrow(), vec![Signal::Focus, Signal::Unfocus]);
}

/// Check that widgets are notified when the pointer enters and leaves
/// them.
#[tokio::test]
async fn enter_and_leave() {
  let (mut ui, w1, w2) = side_by_side();

  let _result = ui.handle(motion(25.0, 50.0)).await.unwrap();
  assert_eq!(
    TestWidget::data(&ui, w1).mouse,
    vec![
      MouseEvent::Enter {
        pos: Vector::new(25.0, 50.0),
      },
      motion(25.0, 50.0),
    ]
  );
  assert!(ui.is_under_mouse(w1));
  assert!(TestWidget::data(&ui, w2).mouse.is_empty());

  let _result = ui.handle(motion(75.0, 50.0)).await.unwrap();
  assert_eq!(
    TestWidget::data(&ui, w1).mouse.last(),
    Some(&MouseEvent::Leave {
      pos: Vector::new(75.0, 50.0),
    })
  );
  assert_eq!(
    TestWidget::data(&ui, w2).mouse,
    vec![
      MouseEvent::Enter {
        pos: Vector::new(75.0, 50.0),
      },
      motion(75.0, 50.0),
    ]
  );
  assert!(!ui.is_under_mouse(w1));
  assert!(ui.is_under_mouse(w2));

  // The pointer leaving the window is propagated to everything under
  // it.
  let () = ui.set_mouse_normalizer(Box::new(PassThrough));
  let leave = MouseEvent::Leave {
    pos: Vector::new(150.0, 50.0),
  };
  let _result = ui.handle(leave).await.unwrap();
  assert_eq!(TestWidget::data(&ui, w2).mouse.last(), Some(&leave));
  assert!(!ui.is_under_mouse(w2));
  assert!(!ui.is_under_mouse(ui.root_id()));
}

/// Check that a leave immediately followed by an enter is dropped by
/// the default normalizer.
#[tokio::test]
async fn spurious_leave() {
  let (mut ui, w1, _w2) = side_by_side();
  let _result = ui.handle(motion(25.0, 50.0)).await.unwrap();
  let count = TestWidget::data(&ui, w1).mouse.len();

  let leave = MouseEvent::Leave {
    pos: Vector::new(25.0, 50.0),
  };
  let enter = MouseEvent::Enter {
    pos: Vector::new(25.0, 50.0),
  };
  let _result = ui.handle(leave).await.unwrap();
  let _result = ui.handle(enter).await.unwrap();

  assert_eq!(TestWidget::data(&ui, w1).mouse.len(), count);
  assert!(ui.is_under_mouse(w1));
}

/// Check that a widget grabbing the mouse receives drags and the
/// release, wherever they happen.
#[tokio::test]
async fn mouse_grab() {
  let (mut ui, w1, w2) = side_by_side();
  let signals = record_signals(&mut ui, w1);
  let _result = ui.handle(press(25.0, 50.0)).await.unwrap();
  let () = ui.grab_mouse(w1);
  let count = TestWidget::data(&ui, w2).mouse.len();

  let drag = MouseEvent::Drag {
    pos: Vector::new(75.0, 50.0),
    delta: Vector::new(50.0, 0.0),
    buttons: MouseButtons::LEFT,
    modifiers: Modifiers::empty(),
  };
  let _result = ui.handle(drag).await.unwrap();
  let _result = ui.handle(release(75.0, 50.0)).await.unwrap();

  let mouse = &TestWidget::data(&ui, w1).mouse;
  assert_eq!(mouse[mouse.len() - 2..], [drag, release(75.0, 50.0)]);
  assert_eq!(TestWidget::data(&ui, w2).mouse.len(), count);
  assert_eq!(ui.grabbed(), None);
  assert_eq!(signals.borrow().last(), Some(&Signal::Mouse(release(75.0, 50.0))));
}


/// Create a button covering the entire territory, with a widget for
/// each enabled rollover state.
fn button(config: ButtonConfig) -> (Ui, Id, [Id; 3]) {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let button = Button::create(&mut ui, config).unwrap();
  let states = [Rollover::Base, Rollover::Over, Rollover::Down].map(|state| {
    let widget = Placeholder::create(&mut ui, Size::new(20.0, 20.0));
    let () = Button::set_state_widget(&mut ui, button, state, widget).unwrap();
    widget
  });
  let foreground = Placeholder::create(&mut ui, Size::new(10.0, 10.0));
  let () = Button::set_foreground(&mut ui, button, Some(foreground)).unwrap();
  let () = Stack::add(&mut ui, root, button, 0).unwrap();

  assert_eq!(ui.rect(foreground), Some(Rect::new(45.0, 45.0, 10.0, 10.0)));
  assert_eq!(Button::foreground(&ui, button).unwrap(), Some(foreground));
  (ui, button, states)
}

async fn click(ui: &mut Ui) {
  let _result = ui.handle(press(50.0, 50.0)).await.unwrap();
  let _result = ui.handle(release(50.0, 50.0)).await.unwrap();
}

fn clicks(signals: &[Signal]) -> Vec<Signal> {
  signals
    .iter()
    .filter(|signal| {
      matches!(
        signal,
        Signal::Click | Signal::DoubleClick | Signal::Toggle(..)
      )
    })
    .copied()
    .collect()
}


/// Check the rollover states a button goes through when clicked.
#[tokio::test]
async fn button_click() {
  let (mut ui, button, [base, over, down]) = button(ButtonConfig::default());
  let signals = record_signals(&mut ui, button);
  assert!(ui.is_displayed(base));
  assert!(ui.is_hidden(over));

  let _result = ui.handle(motion(50.0, 50.0)).await.unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Over);
  assert!(ui.is_displayed(over));
  assert!(ui.is_hidden(base));

  let _result = ui.handle(press(50.0, 50.0)).await.unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Down);
  assert!(ui.is_displayed(down));

  let _result = ui.handle(release(50.0, 50.0)).await.unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Over);

  let rollovers = signals
    .borrow()
    .iter()
    .filter_map(|signal| match signal {
      Signal::Rollover { new, old } => Some((*new, *old)),
      _ => None,
    })
    .collect::<Vec<_>>();
  assert_eq!(
    rollovers,
    vec![
      (Rollover::Over, Rollover::Base),
      (Rollover::Down, Rollover::Over),
      (Rollover::Over, Rollover::Down),
    ]
  );
  assert_eq!(clicks(&signals.borrow()), vec![Signal::Click]);
}

#[tokio::test]
async fn button_double_click() {
  let (mut ui, button, _states) = button(ButtonConfig::default());
  ui.theme_mut().double_click_interval = Duration::from_secs(3600);
  let signals = record_signals(&mut ui, button);

  click(&mut ui).await;
  click(&mut ui).await;
  click(&mut ui).await;

  assert_eq!(
    clicks(&signals.borrow()),
    vec![
      Signal::Click,
      Signal::Click,
      Signal::DoubleClick,
      Signal::Click,
    ]
  );
}

#[tokio::test]
async fn button_toggle() {
  let config = ButtonConfig {
    toggle: true,
    ..Default::default()
  };
  let (mut ui, button, _states) = button(config);
  let signals = record_signals(&mut ui, button);

  click(&mut ui).await;
  assert!(Button::is_toggled(&ui, button).unwrap());
  click(&mut ui).await;
  assert!(!Button::is_toggled(&ui, button).unwrap());

  let toggles = clicks(&signals.borrow())
    .into_iter()
    .filter(|signal| matches!(signal, Signal::Toggle(..)))
    .collect::<Vec<_>>();
  assert_eq!(toggles, vec![Signal::Toggle(true), Signal::Toggle(false)]);
}

/// Check that a disabled button ignores the mouse.
#[tokio::test]
async fn button_disabled() {
  let (mut ui, button, [base, _over, _down]) = button(ButtonConfig::default());
  let signals = record_signals(&mut ui, button);

  let () = Button::disable(&mut ui, button).unwrap();
  assert!(!Button::is_enabled(&ui, button).unwrap());
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Off);
  // Without a dedicated widget the base state is shown.
  assert!(ui.is_displayed(base));

  click(&mut ui).await;
  assert!(clicks(&signals.borrow()).is_empty());
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Off);

  let () = Button::enable(&mut ui, button).unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Over);
  click(&mut ui).await;
  assert_eq!(clicks(&signals.borrow()), vec![Signal::Click]);
}

/// Check that leaving a pressed button cancels the click.
#[tokio::test]
async fn button_press_cancelled() {
  let (mut ui, button, _states) = button(ButtonConfig::default());
  let () = ui.set_mouse_normalizer(Box::new(PassThrough));
  let signals = record_signals(&mut ui, button);

  let _result = ui.handle(press(50.0, 50.0)).await.unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Down);

  let leave = MouseEvent::Leave {
    pos: Vector::new(150.0, 50.0),
  };
  let _result = ui.handle(leave).await.unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Base);

  let _result = ui.handle(release(50.0, 50.0)).await.unwrap();
  assert_eq!(Button::rollover(&ui, button).unwrap(), Rollover::Over);
  assert!(clicks(&signals.borrow()).is_empty());
}
