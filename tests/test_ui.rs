// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for ui.

#![deny(warnings)]

mod common;

use tessel::widgets::BoxConfig;
use tessel::widgets::HBox;
use tessel::widgets::Stack;
use tessel::Cap;
use tessel::Error;
use tessel::MutCap;
use tessel::Rect;
use tessel::Signal;
use tessel::Size;
use tessel::Update;

use common::draw_count;
use common::new_ui;
use common::record_signals;
use common::Op;
use common::TestWidget;


#[test]
fn correct_ids() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let w1 = TestWidget::create(&mut ui, Size::zero());
  let w2 = TestWidget::create(&mut ui, Size::zero());
  let () = ui.attach_child(root, w1).unwrap();
  let () = ui.attach_child(w1, w2).unwrap();

  assert_eq!(ui.root_id(), root);
  assert_eq!(ui.parent_id(root), None);
  assert_eq!(ui.parent_id(w1), Some(root));
  assert_eq!(ui.parent_id(w2), Some(w1));
  assert_eq!(ui.children(root).copied().collect::<Vec<_>>(), vec![w1]);
  assert!(ui.is_attached_to_root(w2));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "The given Id belongs to a different Ui")]
fn ids_are_bound_to_their_ui() {
  let (ui1, _root1, _ops1) = new_ui(100.0, 100.0);
  let (mut ui2, _root2, _ops2) = new_ui(100.0, 100.0);
  let widget = TestWidget::create(&mut ui2, Size::zero());

  let _rect = ui1.rect(widget);
}

#[test]
fn attach_errors() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let parent = TestWidget::create(&mut ui, Size::zero());
  let child = TestWidget::create(&mut ui, Size::zero());
  let () = ui.attach_child(parent, child).unwrap();

  let err = ui.attach_child(root, child).unwrap_err();
  assert_eq!(err, Error::AlreadyAttached { child, parent });

  let err = ui.attach_child(child, parent).unwrap_err();
  assert_eq!(
    err,
    Error::Cycle {
      child: parent,
      parent: child,
    }
  );

  let err = ui.attach_child(parent, parent).unwrap_err();
  assert_eq!(
    err,
    Error::Cycle {
      child: parent,
      parent,
    }
  );

  let err = ui.attach_child(child, root).unwrap_err();
  assert_eq!(
    err,
    Error::Cycle {
      child: root,
      parent: child,
    }
  );

  let err = ui.detach_child(root, child).unwrap_err();
  assert_eq!(err, Error::NotAChild { child, parent: root });
  assert!(!err.is_fatal());
}

/// Check that detaching a subtree clears all its geometry and that
/// reattaching it lays it out exactly as before.
#[test]
fn attach_detach_round_trip() {
  let (mut ui, root, ops) = new_ui(100.0, 100.0);
  let config = BoxConfig {
    padding: 10.0,
    ..Default::default()
  };
  let hbox = HBox::create(&mut ui, config);
  let w1 = TestWidget::create(&mut ui, Size::new(10.0, 10.0));
  let w2 = TestWidget::create(&mut ui, Size::new(10.0, 10.0));
  let () = HBox::add(&mut ui, hbox, w1).unwrap();
  let () = HBox::add(&mut ui, hbox, w2).unwrap();
  let () = Stack::add(&mut ui, root, hbox, 0).unwrap();

  let rects = [ui.rect(hbox), ui.rect(w1), ui.rect(w2)];
  assert!(rects.iter().all(Option::is_some));
  assert!(ui.is_drawn(w1));
  assert_eq!(TestWidget::count(&ui, w1, "attach"), 1);

  let signals = record_signals(&mut ui, root);
  let () = Stack::remove(&mut ui, root, hbox).unwrap();

  for widget in [hbox, w1, w2] {
    assert_eq!(ui.rect(widget), None);
    assert_eq!(ui.group(widget), None);
    assert!(!ui.is_drawn(widget));
    assert!(!ui.is_attached_to_root(widget));
    assert!(ops.borrow().contains(&Op::Undraw(widget)));
  }
  assert_eq!(TestWidget::count(&ui, w1, "detach"), 1);
  assert_eq!(*signals.borrow(), vec![Signal::RemoveChild(hbox)]);

  let () = Stack::add(&mut ui, root, hbox, 0).unwrap();
  assert_eq!([ui.rect(hbox), ui.rect(w1), ui.rect(w2)], rects);
  assert!(ui.group(w2).is_some());
  assert!(ui.is_drawn(w2));
  assert_eq!(TestWidget::count(&ui, w1, "attach"), 2);
  assert_eq!(
    *signals.borrow(),
    vec![Signal::RemoveChild(hbox), Signal::AddChild(hbox)]
  );
}

/// Check that claims are cached until a repack marks them stale.
#[test]
fn claim_caching() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let widget = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let () = Stack::add(&mut ui, root, widget, 0).unwrap();
  assert_eq!(TestWidget::count(&ui, widget, "claim"), 1);
  assert!(!ui.is_claim_stale(widget));

  let size = ui.claim(widget).unwrap();
  assert_eq!(size, Size::new(5.0, 5.0));
  assert_eq!(TestWidget::count(&ui, widget, "claim"), 1);

  let () = ui.update(widget, Update::Repack).unwrap();
  assert_eq!(TestWidget::count(&ui, widget, "claim"), 2);
  // The rectangle did not change, so the resize hook stays silent.
  assert_eq!(TestWidget::count(&ui, widget, "resize"), 1);
}

/// Check that repacking a container whose claim does not change
/// neither claims its children anew nor renegotiates with its parent.
#[test]
fn nested_claim_caching() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let parent = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let hbox = HBox::create(&mut ui, BoxConfig::default());
  let child = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let () = HBox::add(&mut ui, hbox, child).unwrap();
  let () = ui.attach_child(parent, hbox).unwrap();
  let () = Stack::add(&mut ui, root, parent, 0).unwrap();
  assert_eq!(TestWidget::count(&ui, child, "claim"), 1);

  let parent_claims = TestWidget::count(&ui, parent, "claim");
  let parent_resizes = TestWidget::count(&ui, parent, "resize");
  let child_resizes = TestWidget::count(&ui, child, "resize");

  let () = ui.update(hbox, Update::Repack).unwrap();
  let () = ui.update(hbox, Update::Repack).unwrap();
  assert!(!ui.is_claim_stale(hbox));
  assert_eq!(ui.min_size(hbox), Size::new(5.0, 5.0));
  assert_eq!(TestWidget::count(&ui, child, "claim"), 1);
  assert_eq!(TestWidget::count(&ui, child, "resize"), child_resizes);
  assert_eq!(TestWidget::count(&ui, parent, "claim"), parent_claims);
  assert_eq!(TestWidget::count(&ui, parent, "resize"), parent_resizes);
}

/// Check that held updates are deduplicated and replayed in order once
/// the outermost hold ends.
#[test]
fn update_batching() {
  let (mut ui, root, ops) = new_ui(100.0, 100.0);
  let widget = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let () = Stack::add(&mut ui, root, widget, 0).unwrap();

  let logged = TestWidget::data(&ui, widget).log.len();
  let drawn = draw_count(&ops, widget);

  let () = ui
    .hold_updates(widget, &mut |cap: &mut dyn MutCap| {
      let () = cap.update(widget, Update::Redraw)?;
      let () = cap.update(widget, Update::Repack)?;
      let () = cap.hold_updates(widget, &mut |cap: &mut dyn MutCap| {
        let () = cap.update(widget, Update::Reshape)?;
        cap.update(widget, Update::Repack)
      })?;

      assert_eq!(TestWidget::data(&*cap, widget).log.len(), logged);
      Ok(())
    })
    .unwrap();

  assert_eq!(draw_count(&ops, widget), drawn + 2);
  assert_eq!(
    TestWidget::data(&ui, widget).log[logged..],
    ["reshape", "claim"]
  );
}

/// Check that updates held by a failing closure are discarded.
#[test]
fn update_batching_error() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let widget = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let () = Stack::add(&mut ui, root, widget, 0).unwrap();
  let logged = TestWidget::data(&ui, widget).log.len();

  let err = ui
    .hold_updates(widget, &mut |cap: &mut dyn MutCap| {
      let () = cap.update(widget, Update::Reshape)?;
      cap.detach_child(widget, root)
    })
    .unwrap_err();
  assert_eq!(
    err,
    Error::NotAChild {
      child: root,
      parent: widget,
    }
  );
  assert_eq!(TestWidget::data(&ui, widget).log.len(), logged);

  // Updates are applied immediately again.
  let () = ui.update(widget, Update::Reshape).unwrap();
  assert_eq!(TestWidget::count(&ui, widget, "reshape"), 1);
}

#[test]
fn hide_and_unhide() {
  let (mut ui, root, ops) = new_ui(100.0, 100.0);
  let parent = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let child = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let () = ui.attach_child(parent, child).unwrap();
  let () = Stack::add(&mut ui, root, parent, 0).unwrap();
  let () = ui.focus(child).unwrap();
  assert!(ui.is_drawn(child));

  let () = ui.hide(parent).unwrap();
  assert!(ui.is_hidden(parent));
  assert!(!ui.is_hidden(child));
  assert!(!ui.is_displayed(child));
  assert!(!ui.is_drawn(child));
  assert!(ops.borrow().contains(&Op::Undraw(parent)));
  assert!(ops.borrow().contains(&Op::Undraw(child)));
  assert_eq!(ui.focused(), None);

  // Hidden widgets are not drawn.
  let drawn = draw_count(&ops, child);
  let () = ui.redraw(child);
  assert_eq!(draw_count(&ops, child), drawn);

  let () = ui.unhide(parent);
  assert!(ui.is_displayed(child));
  assert!(ui.is_drawn(child));
  assert_eq!(draw_count(&ops, child), drawn + 1);
}

#[test]
fn remove_widget() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let parent = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let child = TestWidget::create(&mut ui, Size::new(5.0, 5.0));
  let () = ui.attach_child(parent, child).unwrap();
  let () = ui.attach_child(root, parent).unwrap();
  let () = ui.focus(child).unwrap();

  let () = ui.remove_widget(parent).unwrap();
  assert_eq!(ui.children(root).count(), 0);
  assert_eq!(ui.focused(), None);
}

/// Check that the slot of a removed widget is reused without making
/// the removed widget's `Id` refer to its successor.
#[test]
fn removed_slots_are_reused() {
  let (mut ui, root, _ops) = new_ui(100.0, 100.0);
  let removed = TestWidget::create(&mut ui, Size::zero());
  let () = ui.attach_child(root, removed).unwrap();
  let () = ui.remove_widget(removed).unwrap();

  let widget = TestWidget::create(&mut ui, Size::zero());
  assert_eq!(widget.to_string(), removed.to_string());
  assert_ne!(widget, removed);

  let () = ui.attach_child(root, widget).unwrap();
  assert_eq!(ui.children(root).copied().collect::<Vec<_>>(), vec![widget]);
  assert!(TestWidget::data(&ui, widget).log.contains(&"attach"));
}

#[test]
#[should_panic(expected = "does not exist")]
fn removed_id_stays_invalid() {
  let (mut ui, _root, _ops) = new_ui(100.0, 100.0);
  let removed = TestWidget::create(&mut ui, Size::zero());
  let () = ui.remove_widget(removed).unwrap();
  let _widget = TestWidget::create(&mut ui, Size::zero());

  let _size = ui.min_size(removed);
}

/// Check that a territory too small for the widget tree is reported
/// and that enlarging it recovers.
#[test]
fn territory_too_small() {
  let (mut ui, root, _ops) = new_ui(20.0, 20.0);
  let widget = TestWidget::create(&mut ui, Size::new(30.0, 10.0));

  let err = Stack::add(&mut ui, root, widget, 0).unwrap_err();
  assert_eq!(
    err,
    Error::TerritoryTooSmall {
      territory: Size::new(20.0, 20.0),
      min: Size::new(30.0, 10.0),
    }
  );
  assert!(err.is_fatal());

  let territory = Rect::new(0.0, 0.0, 40.0, 40.0);
  let () = ui.set_territory(territory).unwrap();
  assert_eq!(ui.rect(root), Some(territory));
  assert_eq!(ui.rect(widget), Some(territory));
}

#[test]
fn wrong_widget_type() {
  let (mut ui, _root, _ops) = new_ui(100.0, 100.0);
  let widget = TestWidget::create(&mut ui, Size::zero());

  let err = HBox::items(&ui, widget).unwrap_err();
  assert!(
    matches!(err, Error::WrongWidgetType { id, .. } if id == widget),
    "{err:?}"
  );
}
