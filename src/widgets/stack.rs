// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use crate::derive::Handleable;
use crate::derive::Widget;
use crate::hit_test;
use crate::Cap;
use crate::Error;
use crate::Group;
use crate::Handleable;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Result;
use crate::Update;
use crate::Vector;


/// The configuration of a [`Stack`].
#[derive(Clone, Debug, Default)]
pub struct StackConfig {
  /// Whether at most one child, the top most one under the pointer,
  /// receives mouse events.
  pub one_child_gets_mouse: bool,
}


/// The data associated with a [`Stack`].
#[derive(Debug)]
pub struct StackData {
  layers: Vec<(i32, Id)>,
  one_child_gets_mouse: bool,
}

impl StackData {
  fn layer(&self, child: Id) -> Option<i32> {
    self
      .layers
      .iter()
      .find_map(|(layer, id)| (*id == child).then_some(*layer))
  }

  /// Insert a child, keeping layers sorted and placing it on top of
  /// other children of the same layer.
  fn insert(&mut self, layer: i32, child: Id) {
    let index = self
      .layers
      .iter()
      .position(|(other, _)| *other > layer)
      .unwrap_or(self.layers.len());
    let () = self.layers.insert(index, (layer, child));
  }

  fn remove(&mut self, child: Id) {
    let () = self.layers.retain(|(_, id)| *id != child);
  }
}


/// A container stacking its children on top of each other.
///
/// All children share the stack's rectangle. Every child lives on an
/// integer layer and gets a draw order token of its own, ordered by
/// layer. Children attached to a stack directly, i.e., without
/// [`Stack::add`], live on layer zero.
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct Stack {
  id: Id,
}

impl Stack {
  /// Create a new, empty stack.
  pub fn create(cap: &mut dyn MutCap, config: StackConfig) -> Id {
    let data = StackData {
      layers: Vec::new(),
      one_child_gets_mouse: config.one_child_gets_mouse,
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Stack::new(id)))
  }

  /// Add a child on the given layer.
  pub fn add(cap: &mut dyn MutCap, stack: Id, child: Id, layer: i32) -> Result<()> {
    let () = cap.attach_child(stack, child)?;
    let () = cap.typed_data_mut::<StackData>(stack)?.insert(layer, child);
    let () = cap.update(stack, Update::Regroup)?;
    cap.update(child, Update::Repack)
  }

  /// Remove a child, detaching it.
  pub fn remove(cap: &mut dyn MutCap, stack: Id, child: Id) -> Result<()> {
    let () = cap.detach_child(stack, child)?;
    let () = cap.typed_data_mut::<StackData>(stack)?.remove(child);
    cap.update(stack, Update::Repack)
  }

  /// Move a child to a different layer.
  pub fn set_layer(cap: &mut dyn MutCap, stack: Id, child: Id, layer: i32) -> Result<()> {
    if cap.parent_id(child) != Some(stack) {
      return Err(Error::NotAChild {
        child,
        parent: stack,
      })
    }

    let data = cap.typed_data_mut::<StackData>(stack)?;
    let () = data.remove(child);
    let () = data.insert(layer, child);
    cap.update(stack, Update::Regroup)
  }

  /// Retrieve the layer of a child.
  pub fn layer(cap: &dyn Cap, stack: Id, child: Id) -> Result<Option<i32>> {
    let layer = cap.typed_data::<StackData>(stack)?.layer(child);
    let attached = cap.parent_id(child) == Some(stack);
    Ok(layer.or(attached.then_some(0)))
  }

  /// Retrieve the children of a stack, top most first.
  fn top_down(cap: &dyn Cap, stack: Id) -> Result<Vec<(i32, Id)>> {
    let data = cap.typed_data::<StackData>(stack)?;
    let mut children = cap
      .children(stack)
      .enumerate()
      .map(|(i, child)| (data.layer(*child).unwrap_or(0), i, *child))
      .collect::<Vec<_>>();
    // Later children of the same layer are on top.
    let () = children.sort_by(|(l1, i1, _), (l2, i2, _)| (l2, i2).cmp(&(l1, i1)));

    Ok(children.into_iter().map(|(layer, _, child)| (layer, child)).collect())
  }
}

impl Layout for Stack {
  fn regroup_children(&self, cap: &mut dyn MutCap, group: &Group) -> Result<()> {
    for (layer, child) in Stack::top_down(&*cap, self.id)? {
      let () = cap.regroup(child, group.ordered(layer))?;
    }
    Ok(())
  }
}

impl Handleable for Stack {
  fn children_under_mouse(&self, cap: &dyn Cap, widget: Id, point: Vector, previous: &[Id]) -> Vec<Id> {
    let Ok(data) = cap.typed_data::<StackData>(widget) else {
      return Vec::new()
    };
    let stop_at_first = data.one_child_gets_mouse;
    let candidates = Stack::top_down(cap, widget)
      .unwrap_or_default()
      .into_iter()
      .map(|(_, child)| child);

    hit_test(cap, candidates, point, previous, stop_at_first)
  }
}


/// The data associated with a [`Deck`].
#[derive(Debug, Default)]
pub struct DeckData {
  states: BTreeMap<String, Id>,
  current: Option<String>,
}


/// A container showing exactly one of several named states.
///
/// All states stay attached, inactive ones are hidden. The deck claims
/// the maximum over all states, so switching between them never
/// changes its size.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Deck {
  id: Id,
}

impl Deck {
  /// Create a new deck without any states.
  pub fn create(cap: &mut dyn MutCap) -> Id {
    cap.add_widget(Box::new(DeckData::default()), &mut |id, _cap| {
      Box::new(Deck::new(id))
    })
  }

  /// Add a state.
  ///
  /// A widget previously registered under the same name is detached.
  /// The first state added becomes the current one.
  pub fn add_state<S>(cap: &mut dyn MutCap, deck: Id, name: S, child: Id) -> Result<()>
  where
    S: Into<String>,
  {
    let name = name.into();
    let data = cap.typed_data::<DeckData>(deck)?;
    let previous = data.states.get(&name).copied();
    let is_current = data.current.is_none() || data.current.as_ref() == Some(&name);

    if previous == Some(child) {
      return Ok(())
    }

    let () = cap.attach_child(deck, child)?;
    if let Some(previous) = previous {
      let () = cap.detach_child(deck, previous)?;
    }

    let data = cap.typed_data_mut::<DeckData>(deck)?;
    let _prev = data.states.insert(name.clone(), child);
    if is_current {
      data.current = Some(name);
      let () = cap.unhide(child);
    } else {
      let () = cap.hide(child)?;
    }
    cap.update(deck, Update::Repack)
  }

  /// Switch to the given state.
  pub fn set_state(cap: &mut dyn MutCap, deck: Id, name: &str) -> Result<()> {
    let data = cap.typed_data::<DeckData>(deck)?;
    let new = data.states.get(name).copied().ok_or_else(|| Error::UnknownState {
      name: name.to_string(),
      valid: data.states.keys().map(String::as_str).collect::<Vec<_>>().join(", "),
    })?;
    if data.current.as_deref() == Some(name) {
      return Ok(())
    }
    let old = data.current.as_ref().and_then(|current| data.states.get(current)).copied();

    cap.typed_data_mut::<DeckData>(deck)?.current = Some(name.to_string());
    if let Some(old) = old {
      let () = cap.hide(old)?;
    }
    let () = cap.unhide(new);
    Ok(())
  }

  /// Retrieve the name of the current state.
  pub fn state(cap: &dyn Cap, deck: Id) -> Result<Option<String>> {
    Ok(cap.typed_data::<DeckData>(deck)?.current.clone())
  }

  /// Check whether a deck has a state of the given name.
  pub fn has_state(cap: &dyn Cap, deck: Id, name: &str) -> Result<bool> {
    Ok(cap.typed_data::<DeckData>(deck)?.states.contains_key(name))
  }

  /// Retrieve the widget registered for a state.
  pub fn state_widget(cap: &dyn Cap, deck: Id, name: &str) -> Result<Option<Id>> {
    Ok(cap.typed_data::<DeckData>(deck)?.states.get(name).copied())
  }
}

impl Layout for Deck {}
