// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::TypeId;
use std::cell::RefCell;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::rc::Rc;

use async_trait::async_trait;

use tessel::derive::Handleable;
use tessel::derive::Widget;
use tessel::Cap;
use tessel::Event;
use tessel::Group;
use tessel::Handleable;
use tessel::Id;
use tessel::Key;
use tessel::Layout;
use tessel::MutCap;
use tessel::Object;
use tessel::Rect;
use tessel::Renderable;
use tessel::Renderer;
use tessel::Result;
use tessel::Ui;
use tessel::Update;
use tessel::Widget;


#[derive(Debug, Widget, Handleable)]
#[tessel(default_new)]
struct TestWidget {
  id: Id,
}

impl Layout for TestWidget {}


// Note that the deny(unused_imports) attribute exists for testing
// purposes.
#[deny(unused_imports)]
#[derive(Debug, Widget)]
#[tessel(default_new)]
struct TestWidgetCustom {
  id: Id,
}

impl Handleable for TestWidgetCustom {}
impl Layout for TestWidgetCustom {}


#[derive(Debug, Widget, Handleable)]
struct TestWidgetT<T>
where
  T: 'static + Debug,
{
  id: Id,
  _data: PhantomData<T>,
}

impl<T> TestWidgetT<T>
where
  T: 'static + Debug,
{
  pub fn new(id: Id) -> Self {
    Self {
      id,
      _data: PhantomData,
    }
  }
}

impl<T> Layout for TestWidgetT<T> where T: 'static + Debug {}


#[derive(Debug, Handleable)]
struct TestHandleable {
  id: Id,
}

impl Renderable for TestHandleable {
  fn type_id(&self) -> TypeId {
    TypeId::of::<TestHandleable>()
  }

  fn draw(&self, renderer: &mut dyn Renderer, cap: &dyn Cap, rect: Rect, group: &Group) {
    renderer.draw(self.id, self, cap, rect, group)
  }
}

impl Object for TestHandleable {
  fn id(&self) -> Id {
    self.id
  }
}

impl Layout for TestHandleable {}

impl Widget for TestHandleable {
  fn type_id(&self) -> TypeId {
    TypeId::of::<TestHandleable>()
  }
}


/// A widget turning every key press into the release of the same key.
#[derive(Debug, Widget)]
#[tessel(default_new)]
struct TestKeyFlipper {
  id: Id,
}

impl Layout for TestKeyFlipper {}

#[async_trait(?Send)]
impl Handleable for TestKeyFlipper {
  async fn handle(&self, _cap: &mut dyn MutCap, event: Event) -> Result<Option<Event>> {
    match event {
      Event::KeyDown(key) => Ok(Some(Event::KeyUp(key))),
      event => Ok(Some(event)),
    }
  }
}


/// A renderer recording the type of every widget drawn.
#[derive(Debug, Default)]
struct TypeRecorder {
  drawn: Rc<RefCell<Vec<(Id, &'static str)>>>,
}

impl Renderer for TypeRecorder {
  fn draw(&mut self, id: Id, widget: &dyn Renderable, _cap: &dyn Cap, _rect: Rect, _group: &Group) {
    let name = if widget.is::<TestWidget>() {
      "TestWidget"
    } else if widget.is::<TestWidgetCustom>() {
      "TestWidgetCustom"
    } else if widget.is::<TestWidgetT<u32>>() {
      "TestWidgetT"
    } else if widget.is::<TestHandleable>() {
      "TestHandleable"
    } else {
      "other"
    };
    self.drawn.borrow_mut().push((id, name))
  }

  fn undraw(&mut self, _id: Id) {}
}


fn new_ui() -> (Ui, Id, Rc<RefCell<Vec<(Id, &'static str)>>>) {
  let recorder = TypeRecorder::default();
  let drawn = Rc::clone(&recorder.drawn);
  let (ui, root) = Ui::new(Box::new(recorder), Rect::new(0.0, 0.0, 100.0, 100.0));
  (ui, root, drawn)
}


/// Check that all derive combinations produce working widgets that
/// reach the renderer as their actual type.
#[test]
fn various_derive_combinations() {
  let (mut ui, root, drawn) = new_ui();

  let w1 = ui.add_widget(Box::new(()), &mut |id, _cap| Box::new(TestWidget::new(id)));
  let w2 = ui.add_widget(Box::new(()), &mut |id, _cap| Box::new(TestWidgetCustom::new(id)));
  let w3 = ui.add_widget(Box::new(()), &mut |id, _cap| {
    Box::new(TestWidgetT::<u32>::new(id))
  });
  let w4 = ui.add_widget(Box::new(()), &mut |id, _cap| Box::new(TestHandleable { id }));

  for widget in [w1, w2, w3, w4] {
    let () = ui.attach_child(root, widget).unwrap();
  }
  let () = ui.update(root, Update::Repack).unwrap();

  let drawn = drawn.borrow();
  for (widget, name) in [
    (w1, "TestWidget"),
    (w2, "TestWidgetCustom"),
    (w3, "TestWidgetT"),
    (w4, "TestHandleable"),
  ] {
    assert!(drawn.contains(&(widget, name)), "{name} not drawn");
  }
}

#[tokio::test]
async fn custom_event_handler() {
  let (mut ui, root, _drawn) = new_ui();
  let widget = ui.add_widget(Box::new(()), &mut |id, _cap| Box::new(TestKeyFlipper::new(id)));
  let () = ui.attach_child(root, widget).unwrap();
  let () = ui.focus(widget).unwrap();

  let result = ui.handle(Event::KeyDown(Key::Char('a'))).await.unwrap();
  assert_eq!(result, Some(Event::KeyUp(Key::Char('a'))));
}
