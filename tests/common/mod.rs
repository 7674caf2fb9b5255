// Copyright (C) 2018-2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use tessel::derive::Widget;
use tessel::Cap;
use tessel::Event;
use tessel::Group;
use tessel::Handleable;
use tessel::Id;
use tessel::Layout;
use tessel::MouseEvent;
use tessel::MutCap;
use tessel::Rect;
use tessel::Renderable;
use tessel::Renderer;
use tessel::Result;
use tessel::Signal;
use tessel::Size;
use tessel::Ui;


/// An operation a `TestRenderer` was asked to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
  Draw { id: Id, rect: Rect, group: Group },
  Undraw(Id),
  Migrate { id: Id, to: Group },
}

pub type Ops = Rc<RefCell<Vec<Op>>>;


/// A renderer recording every operation it performs.
#[derive(Debug, Default)]
pub struct TestRenderer {
  ops: Ops,
}

impl TestRenderer {
  pub fn new() -> (Self, Ops) {
    let renderer = Self::default();
    let ops = Rc::clone(&renderer.ops);
    (renderer, ops)
  }
}

impl Renderer for TestRenderer {
  fn draw(&mut self, id: Id, _widget: &dyn Renderable, _cap: &dyn Cap, rect: Rect, group: &Group) {
    self.ops.borrow_mut().push(Op::Draw {
      id,
      rect,
      group: group.clone(),
    })
  }

  fn undraw(&mut self, id: Id) {
    self.ops.borrow_mut().push(Op::Undraw(id))
  }

  fn migrate(&mut self, id: Id, _from: &Group, to: &Group) {
    self.ops.borrow_mut().push(Op::Migrate { id, to: to.clone() })
  }
}


/// Count the number of times a widget got drawn.
pub fn draw_count(ops: &Ops, widget: Id) -> usize {
  ops
    .borrow()
    .iter()
    .filter(|op| matches!(op, Op::Draw { id, .. } if *id == widget))
    .count()
}

/// Retrieve the group a widget got drawn with most recently.
pub fn last_drawn_group(ops: &Ops, widget: Id) -> Option<Group> {
  ops.borrow().iter().rev().find_map(|op| match op {
    Op::Draw { id, group, .. } if *id == widget => Some(group.clone()),
    _ => None,
  })
}


/// Create a `Ui` with a recording renderer and the given territory.
pub fn new_ui(width: f64, height: f64) -> (Ui, Id, Ops) {
  let (renderer, ops) = TestRenderer::new();
  let (ui, root) = Ui::new(Box::new(renderer), Rect::new(0.0, 0.0, width, height));
  (ui, root, ops)
}

/// Connect a handler recording all signals emitted by a widget.
pub fn record_signals(cap: &mut dyn MutCap, widget: Id) -> Rc<RefCell<Vec<Signal>>> {
  let signals = Rc::new(RefCell::new(Vec::new()));
  let recorded = Rc::clone(&signals);
  let () = cap.connect(
    widget,
    Rc::new(move |_cap: &mut dyn MutCap, _id: Id, signal: &Signal| {
      recorded.borrow_mut().push(*signal);
      Ok(())
    }),
  );
  signals
}


/// The data associated with a `TestWidget`.
#[derive(Debug, Default)]
pub struct TestWidgetData {
  /// The size the widget claims.
  pub size: Size,
  /// Whether keyboard events are consumed.
  pub consume_keys: bool,
  /// The layout hooks invoked, in order.
  pub log: Vec<&'static str>,
  /// The keyboard events received.
  pub keys: Vec<Event>,
  /// The mouse events received.
  pub mouse: Vec<MouseEvent>,
}


/// A leaf widget recording how it is being interacted with.
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct TestWidget {
  id: Id,
}

impl TestWidget {
  pub fn create(cap: &mut dyn MutCap, size: Size) -> Id {
    let data = TestWidgetData {
      size,
      ..Default::default()
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(TestWidget::new(id)))
  }

  pub fn data(cap: &dyn Cap, widget: Id) -> &TestWidgetData {
    cap.typed_data::<TestWidgetData>(widget).unwrap()
  }

  pub fn data_mut(cap: &mut dyn MutCap, widget: Id) -> &mut TestWidgetData {
    cap.typed_data_mut::<TestWidgetData>(widget).unwrap()
  }

  /// Count how often a layout hook got invoked.
  pub fn count(cap: &dyn Cap, widget: Id, hook: &str) -> usize {
    Self::data(cap, widget)
      .log
      .iter()
      .filter(|entry| **entry == hook)
      .count()
  }

  fn log(&self, cap: &mut dyn MutCap, entry: &'static str) {
    Self::data_mut(cap, self.id).log.push(entry)
  }
}

impl Layout for TestWidget {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let () = self.log(cap, "claim");
    Ok(Self::data(&*cap, self.id).size)
  }

  fn resize(&self, cap: &mut dyn MutCap, _rect: Rect) -> Result<()> {
    let () = self.log(cap, "resize");
    Ok(())
  }

  fn reshape(&self, cap: &mut dyn MutCap) -> Result<()> {
    let () = self.log(cap, "reshape");
    Ok(())
  }

  fn on_attach(&self, cap: &mut dyn MutCap) -> Result<()> {
    let () = self.log(cap, "attach");
    Ok(())
  }

  fn on_detach(&self, cap: &mut dyn MutCap) -> Result<()> {
    let () = self.log(cap, "detach");
    Ok(())
  }
}

#[async_trait(?Send)]
impl Handleable for TestWidget {
  async fn handle(&self, cap: &mut dyn MutCap, event: Event) -> Result<Option<Event>> {
    let data = Self::data_mut(cap, self.id);
    data.keys.push(event);

    if data.consume_keys {
      Ok(None)
    } else {
      Ok(Some(event))
    }
  }

  async fn handle_mouse(&self, cap: &mut dyn MutCap, event: MouseEvent) -> Result<()> {
    Self::data_mut(cap, self.id).mouse.push(event);
    Ok(())
  }
}
