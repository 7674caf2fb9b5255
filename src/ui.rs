// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::type_name;
use std::any::Any;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::future::Future;
use std::mem::replace;
use std::mem::take;
use std::pin::Pin;
use std::rc::Rc;
use std::slice::Iter;
#[cfg(debug_assertions)]
use std::sync::atomic::AtomicUsize;
#[cfg(debug_assertions)]
use std::sync::atomic::Ordering;

use tracing::debug;
use tracing::trace;

use crate::mouse::MouseNormalizer;
use crate::mouse::SpuriousLeaveFilter;
use crate::renderer::estimate_text_size;
use crate::widgets::Stack;
use crate::widgets::StackConfig;
use crate::Error;
use crate::Event;
use crate::Group;
use crate::MouseEvent;
use crate::Rect;
use crate::Renderer;
use crate::Result;
use crate::Signal;
use crate::Size;
use crate::TextStyle;
use crate::Theme;
use crate::Update;
use crate::UpdateBatch;
use crate::Vector;
use crate::Widget;


/// An `Index` is our internal representation of an `Id`. `Id`s can
/// belong to different `Ui` objects and a validation step converts them
/// into an `Index`.
///
/// Slots of removed widgets get reused, and the generation tells apart
/// the widgets that occupied the same slot over time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Index {
  idx: usize,
  generation: u32,
}

impl Index {
  const fn new(idx: usize, generation: u32) -> Self {
    Self { idx, generation }
  }
}

impl Display for Index {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{}", self.idx)
  }
}

/// The index of the root widget.
const ROOT: Index = Index::new(0, 0);


/// An `Id` uniquely representing a widget.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Id {
  #[cfg(debug_assertions)]
  ui_id: usize,
  idx: Index,
}

impl Id {
  #[allow(unused_variables)]
  fn new(idx: Index, ui: &Ui) -> Id {
    Id {
      #[cfg(debug_assertions)]
      ui_id: ui.id,
      idx,
    }
  }
}

impl Display for Id {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{}", self.idx)
  }
}


/// An iterator over the children of a widget.
pub type ChildIter<'widget> = Iter<'widget, Id>;

/// A function creating a widget from its `Id`.
///
/// The capability passed in can be used to create and attach child
/// widgets, but the widget being created cannot be accessed yet.
pub type NewWidgetFn<'f> = &'f mut dyn FnMut(Id, &mut dyn MutCap) -> Box<dyn Widget>;

/// A function receiving the signals emitted by a widget.
pub type SignalFn = dyn Fn(&mut dyn MutCap, Id, &Signal) -> Result<()>;

/// A function performing mutations while updates are being held.
pub type HoldFn<'f> = &'f mut dyn FnMut(&mut dyn MutCap) -> Result<()>;


/// A capability allowing for various read-only widget related
/// operations.
pub trait Cap {
  /// Retrieve the `Id` of the root widget.
  fn root_id(&self) -> Id;

  /// Retrieve the parent of the given widget, if it is attached.
  fn parent_id(&self, widget: Id) -> Option<Id>;

  /// Retrieve an iterator over the children, in the order they were
  /// attached.
  fn children(&self, widget: Id) -> ChildIter<'_>;

  /// Retrieve the rectangle of a widget, if it has been laid out.
  fn rect(&self, widget: Id) -> Option<Rect>;

  /// Retrieve the draw order token of a widget, if it has one.
  fn group(&self, widget: Id) -> Option<Group>;

  /// Retrieve the most recently claimed minimum size of a widget.
  fn min_size(&self, widget: Id) -> Size;

  /// Check whether the claim of a widget needs to be recomputed.
  fn is_claim_stale(&self, widget: Id) -> bool;

  /// Check whether a widget has its hidden flag set.
  ///
  /// Note that a return value of `false` does not mean the widget is
  /// displayed. A widget is only displayed if none of its ancestors
  /// are hidden either, which can be checked with `is_displayed`.
  fn is_hidden(&self, widget: Id) -> bool;

  /// Check whether neither a widget nor any of its ancestors are
  /// hidden.
  fn is_displayed(&self, widget: Id) -> bool;

  /// Check whether a widget is transitively attached to the root.
  fn is_attached_to_root(&self, widget: Id) -> bool;

  /// Check whether the renderer currently holds primitives for a
  /// widget.
  fn is_drawn(&self, widget: Id) -> bool;

  /// Check whether the mouse pointer is currently over a widget.
  fn is_under_mouse(&self, widget: Id) -> bool;

  /// Retrieve the children of a widget that were found under the mouse
  /// pointer most recently.
  fn mouse_hits(&self, widget: Id) -> &[Id];

  /// Retrieve a reference to a widget's data.
  fn data(&self, widget: Id) -> &dyn Any;

  /// Retrieve the currently focused widget.
  fn focused(&self) -> Option<Id>;

  /// Check whether the widget with the given `Id` is focused.
  fn is_focused(&self, widget: Id) -> bool;

  /// Retrieve the widget currently grabbing the mouse, if any.
  fn grabbed(&self) -> Option<Id>;

  /// Retrieve the territory available to the root widget.
  fn territory(&self) -> Rect;

  /// Retrieve the theme shared by all widgets.
  fn theme(&self) -> &Theme;

  /// Measure the extent of a line of text.
  fn measure_text(&self, text: &str, style: &TextStyle) -> Size;
}

impl dyn Cap + '_ {
  /// Retrieve a reference to a widget's data of a given type.
  pub fn typed_data<D: 'static>(&self, widget: Id) -> Result<&D> {
    self
      .data(widget)
      .downcast_ref::<D>()
      .ok_or(Error::WrongWidgetType {
        id: widget,
        expected: type_name::<D>(),
      })
  }
}


/// A mutable capability allowing for various widget related operations.
pub trait MutCap: Cap {
  /// Retrieve a mutable reference to a widget's data.
  fn data_mut(&mut self, widget: Id) -> &mut dyn Any;

  /// Add a widget to the `Ui` represented by the capability.
  ///
  /// The widget starts out detached.
  fn add_widget(&mut self, data: Box<dyn Any>, new_widget: NewWidgetFn<'_>) -> Id;

  /// Remove a widget and its entire subtree from the `Ui`.
  ///
  /// The widget is detached from its parent first. All `Id`s of the
  /// subtree become invalid.
  fn remove_widget(&mut self, widget: Id) -> Result<()>;

  /// Attach `child` as the last child of `parent`.
  fn attach_child(&mut self, parent: Id, child: Id) -> Result<()>;

  /// Detach `child` from `parent`.
  fn detach_child(&mut self, parent: Id, child: Id) -> Result<()>;

  /// Calculate the minimum size of a widget, reusing the cached claim
  /// if it is not stale.
  fn claim(&mut self, widget: Id) -> Result<Size>;

  /// Renegotiate the size of a widget after a mutation.
  fn repack(&mut self, widget: Id) -> Result<()>;

  /// Assign a rectangle to a widget and lay out its children.
  fn resize(&mut self, widget: Id, rect: Rect) -> Result<()>;

  /// Assign a draw order token to a widget and its children.
  fn regroup(&mut self, widget: Id, group: Group) -> Result<()>;

  /// Draw a widget, if it is ready to be drawn.
  fn redraw(&mut self, widget: Id);

  /// Remove a widget's primitives from the renderer.
  fn undraw(&mut self, widget: Id);

  /// Hide a widget and its subtree.
  fn hide(&mut self, widget: Id) -> Result<()>;

  /// Show a previously hidden widget again.
  fn unhide(&mut self, widget: Id);

  /// Apply an update to a widget, or defer it if the widget currently
  /// holds its updates.
  fn update(&mut self, widget: Id, update: Update) -> Result<()>;

  /// Invoke `f` with all updates to `widget` being held.
  ///
  /// Held updates are replayed once the outermost hold on the widget
  /// ends, each exactly once and in the order declared by [`Update`].
  fn hold_updates(&mut self, widget: Id, f: HoldFn<'_>) -> Result<()>;

  /// Focus a widget.
  ///
  /// The focused widget is the one receiving keyboard events first.
  fn focus(&mut self, widget: Id) -> Result<()>;

  /// Remove the input focus from whatever widget has it.
  fn unfocus(&mut self) -> Result<()>;

  /// Register a handler for the signals emitted by a widget.
  fn connect(&mut self, widget: Id, handler: Rc<SignalFn>);

  /// Emit a signal on behalf of a widget.
  fn emit(&mut self, widget: Id, signal: Signal) -> Result<()>;

  /// Route all drag and release events directly to a widget until the
  /// next release.
  fn grab_mouse(&mut self, widget: Id);

  /// End a mouse grab.
  fn release_mouse(&mut self);
}

impl dyn MutCap + '_ {
  /// Retrieve a reference to a widget's data of a given type.
  pub fn typed_data<D: 'static>(&self, widget: Id) -> Result<&D> {
    self
      .data(widget)
      .downcast_ref::<D>()
      .ok_or(Error::WrongWidgetType {
        id: widget,
        expected: type_name::<D>(),
      })
  }

  /// Retrieve a mutable reference to a widget's data of a given type.
  pub fn typed_data_mut<D: 'static>(&mut self, widget: Id) -> Result<&mut D> {
    self
      .data_mut(widget)
      .downcast_mut::<D>()
      .ok_or(Error::WrongWidgetType {
        id: widget,
        expected: type_name::<D>(),
      })
  }
}


#[cfg(debug_assertions)]
fn get_next_ui_id() -> usize {
  static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

  NEXT_ID.fetch_add(1, Ordering::Relaxed)
}


/// A struct wrapping a `SignalFn` while implementing `Debug`.
#[derive(Clone)]
struct Handler(Rc<SignalFn>);

impl Debug for Handler {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{:p}", self.0)
  }
}


/// This type contains data that is common to all widgets.
#[derive(Debug)]
struct WidgetData {
  /// The `Index` of the parent widget, if any.
  parent_idx: Option<Index>,
  /// Vector of all the children that have this widget as a parent.
  children: Vec<Id>,
  /// The widget's rectangle; `None` until laid out while attached.
  rect: Option<Rect>,
  /// The widget's draw order token; `None` until attached.
  group: Option<Group>,
  /// Flag indicating whether the widget is hidden.
  hidden: bool,
  /// The most recently claimed minimum size.
  min_size: Size,
  claim_stale: bool,
  /// Whether the renderer holds primitives for the widget.
  is_drawn: bool,
  under_mouse: bool,
  mouse_hits: Vec<Id>,
  batch: UpdateBatch<Update>,
  handlers: Vec<Handler>,
  /// The widget specific data.
  data: Box<dyn Any>,
}

impl WidgetData {
  fn new(data: Box<dyn Any>) -> Self {
    Self {
      parent_idx: None,
      children: Vec::new(),
      rect: None,
      group: None,
      hidden: false,
      min_size: Size::zero(),
      claim_stale: true,
      is_drawn: false,
      under_mouse: false,
      mouse_hits: Vec::new(),
      batch: UpdateBatch::new(),
      handlers: Vec::new(),
      data,
    }
  }
}


#[derive(Debug)]
struct Node {
  data: WidgetData,
  /// The widget proper; `None` while it is being constructed.
  widget: Option<Rc<dyn Widget>>,
}


/// An entry of the widget arena.
#[derive(Debug, Default)]
struct Slot {
  /// Bumped every time the widget occupying the slot is removed.
  generation: u32,
  node: Option<Node>,
}


/// A `Ui` is a container for related widgets.
///
/// The `Ui` owns all widgets, the renderer they are drawn with, and the
/// theme they are configured by. It drives the layout pipeline and
/// routes events to widgets.
#[derive(Debug)]
pub struct Ui {
  #[cfg(debug_assertions)]
  id: usize,
  nodes: Vec<Slot>,
  /// The indices of vacant slots.
  free: Vec<usize>,
  territory: Rect,
  /// The renderer; only `None` while a widget is being drawn.
  renderer: Option<Box<dyn Renderer>>,
  theme: Theme,
  focused: Option<Index>,
  grabbed: Option<Index>,
  normalizer: Box<dyn MouseNormalizer>,
}

impl Ui {
  /// Create a new `Ui` drawing with `renderer` into `territory`.
  ///
  /// The `Ui` contains a single [`Stack`] acting as the root widget,
  /// the `Id` of which is returned as well.
  pub fn new(renderer: Box<dyn Renderer>, territory: Rect) -> (Self, Id) {
    Self::with_theme(renderer, territory, Theme::default())
  }

  /// Create a new `Ui` with the given theme.
  pub fn with_theme(renderer: Box<dyn Renderer>, territory: Rect, theme: Theme) -> (Self, Id) {
    let mut ui = Self {
      #[cfg(debug_assertions)]
      id: get_next_ui_id(),
      nodes: Vec::new(),
      free: Vec::new(),
      territory,
      renderer: Some(renderer),
      theme,
      focused: None,
      grabbed: None,
      normalizer: Box::new(SpuriousLeaveFilter::new()),
    };

    let root = Stack::create(&mut ui, StackConfig::default());
    debug_assert_eq!(root.idx, ROOT);

    let data = ui.node_data_mut(ROOT);
    data.rect = Some(territory);
    data.group = Some(Group::root());
    (ui, root)
  }

  /// Change the territory available to the root widget and lay out the
  /// widget tree accordingly.
  ///
  /// This fails with [`Error::TerritoryTooSmall`] if the territory
  /// cannot accommodate the tree's minimum size.
  pub fn set_territory(&mut self, territory: Rect) -> Result<()> {
    self.territory = territory;
    self.repack(ROOT)
  }

  /// Retrieve a mutable reference to the theme.
  ///
  /// Changes only affect widgets as they are laid out or drawn next.
  pub fn theme_mut(&mut self) -> &mut Theme {
    &mut self.theme
  }

  /// Replace the filter applied to raw mouse events.
  pub fn set_mouse_normalizer(&mut self, normalizer: Box<dyn MouseNormalizer>) {
    self.normalizer = normalizer;
  }

  /// Validate an `Id`, converting it into the internally used `Index`.
  #[inline]
  fn validate(&self, id: Id) -> Index {
    #[cfg(debug_assertions)]
    debug_assert_eq!(id.ui_id, self.id, "The given Id belongs to a different Ui");
    id.idx
  }

  #[inline]
  fn id(&self, idx: Index) -> Id {
    Id::new(idx, self)
  }

  fn exists(&self, idx: Index) -> bool {
    self
      .nodes
      .get(idx.idx)
      .is_some_and(|slot| slot.generation == idx.generation && slot.node.is_some())
  }

  fn node(&self, idx: Index) -> &Node {
    match self.nodes.get(idx.idx) {
      Some(Slot {
        generation,
        node: Some(node),
      }) if *generation == idx.generation => node,
      _ => panic!("Widget {idx} does not exist"),
    }
  }

  fn node_mut(&mut self, idx: Index) -> &mut Node {
    match self.nodes.get_mut(idx.idx) {
      Some(Slot {
        generation,
        node: Some(node),
      }) if *generation == idx.generation => node,
      _ => panic!("Widget {idx} does not exist"),
    }
  }

  fn node_data(&self, idx: Index) -> &WidgetData {
    &self.node(idx).data
  }

  fn node_data_mut(&mut self, idx: Index) -> &mut WidgetData {
    &mut self.node_mut(idx).data
  }

  /// Lookup a widget from an `Index`.
  fn lookup(&self, idx: Index) -> Rc<dyn Widget> {
    match &self.node(idx).widget {
      Some(widget) => Rc::clone(widget),
      None => panic!("Widget {idx} is currently being constructed"),
    }
  }

  fn child_indices(&self, idx: Index) -> Vec<Index> {
    self
      .node_data(idx)
      .children
      .iter()
      .map(|child| self.validate(*child))
      .collect()
  }

  /// Collect the given widget and all its descendants, parents before
  /// children.
  fn subtree(&self, idx: Index) -> Vec<Index> {
    let mut subtree = vec![idx];
    let mut i = 0;
    while let Some(idx) = subtree.get(i).copied() {
      subtree.extend(self.child_indices(idx));
      i += 1;
    }
    subtree
  }

  fn is_attached_to_root(&self, idx: Index) -> bool {
    let mut idx = idx;
    loop {
      if idx == ROOT {
        break true
      }
      match self.node_data(idx).parent_idx {
        Some(parent_idx) => idx = parent_idx,
        None => break false,
      }
    }
  }

  /// Check whether `ancestor` is `idx` itself or one of its ancestors.
  fn is_ancestor(&self, ancestor: Index, idx: Index) -> bool {
    let mut idx = Some(idx);
    while let Some(i) = idx {
      if i == ancestor {
        return true
      }
      idx = self.node_data(i).parent_idx;
    }
    false
  }

  fn is_displayed(&self, idx: Index) -> bool {
    let data = self.node_data(idx);
    !data.hidden && data.parent_idx.map_or(true, |x| self.is_displayed(x))
  }

  fn add_widget(&mut self, data: Box<dyn Any>, new_widget: NewWidgetFn<'_>) -> Id {
    let idx = match self.free.pop() {
      Some(idx) => Index::new(idx, self.nodes[idx].generation),
      None => {
        self.nodes.push(Slot::default());
        Index::new(self.nodes.len() - 1, 0)
      },
    };
    let id = self.id(idx);

    // The widget proper is only registered once it is fully
    // constructed. Until then the slot is reserved, which allows the
    // constructor to create and attach children of its own.
    self.nodes[idx.idx].node = Some(Node {
      data: WidgetData::new(data),
      widget: None,
    });

    let widget = new_widget(id, self as &mut dyn MutCap);
    debug_assert_eq!(widget.id(), id);
    self.node_mut(idx).widget = Some(Rc::from(widget));
    trace!(widget = %id, "created widget");
    id
  }

  fn remove_widget(&mut self, idx: Index) -> Result<()> {
    assert_ne!(idx, ROOT, "the root widget cannot be removed");

    if let Some(parent_idx) = self.node_data(idx).parent_idx {
      let () = self.detach_child(parent_idx, idx)?;
    }

    let subtree = self.subtree(idx);
    if self.focused.is_some_and(|focused| subtree.contains(&focused)) {
      let () = self.set_focus(None)?;
    }
    if self.grabbed.is_some_and(|grabbed| subtree.contains(&grabbed)) {
      self.grabbed = None;
    }

    for idx in subtree {
      let slot = &mut self.nodes[idx.idx];
      slot.node = None;
      slot.generation = slot.generation.wrapping_add(1);
      self.free.push(idx.idx);
    }
    debug!(widget = %idx, "removed widget");
    Ok(())
  }

  fn attach_child(&mut self, parent_idx: Index, child_idx: Index) -> Result<()> {
    let parent = self.id(parent_idx);
    let child = self.id(child_idx);

    if let Some(existing) = self.node_data(child_idx).parent_idx {
      return Err(Error::AlreadyAttached {
        child,
        parent: self.id(existing),
      })
    }
    if child_idx == ROOT || self.is_ancestor(child_idx, parent_idx) {
      return Err(Error::Cycle { child, parent })
    }

    self.node_data_mut(child_idx).parent_idx = Some(parent_idx);
    let data = self.node_data_mut(parent_idx);
    data.children.push(child);
    data.claim_stale = true;
    debug!(%child, %parent, "attached widget");

    if self.is_attached_to_root(parent_idx) {
      for idx in self.subtree(child_idx) {
        let widget = self.lookup(idx);
        let () = widget.on_attach(self)?;
      }

      if let Some(group) = self.node_data(parent_idx).group.clone() {
        let widget = self.lookup(parent_idx);
        let () = widget.regroup_children(self, &group)?;
      }
    }

    self.emit(parent_idx, Signal::AddChild(child))
  }

  fn detach_child(&mut self, parent_idx: Index, child_idx: Index) -> Result<()> {
    let parent = self.id(parent_idx);
    let child = self.id(child_idx);

    if self.node_data(child_idx).parent_idx != Some(parent_idx) {
      return Err(Error::NotAChild { child, parent })
    }

    let subtree = self.subtree(child_idx);
    for idx in &subtree {
      let () = self.undraw(*idx);
    }

    if self.is_attached_to_root(parent_idx) {
      for idx in &subtree {
        let widget = self.lookup(*idx);
        let () = widget.on_detach(self)?;
      }
    }

    let data = self.node_data_mut(parent_idx);
    data.children.retain(|id| *id != child);
    data.mouse_hits.retain(|id| *id != child);
    data.claim_stale = true;
    self.node_data_mut(child_idx).parent_idx = None;

    // A detached widget must never be drawn with stale geometry.
    for idx in &subtree {
      let data = self.node_data_mut(*idx);
      data.rect = None;
      data.group = None;
      data.is_drawn = false;
      data.under_mouse = false;
      data.mouse_hits.clear();
    }

    if self.focused.is_some_and(|focused| subtree.contains(&focused)) {
      let () = self.set_focus(None)?;
    }
    if self.grabbed.is_some_and(|grabbed| subtree.contains(&grabbed)) {
      self.grabbed = None;
    }
    debug!(%child, %parent, "detached widget");

    self.emit(parent_idx, Signal::RemoveChild(child))
  }

  fn claim(&mut self, idx: Index) -> Result<Size> {
    let data = self.node_data(idx);
    if !data.claim_stale {
      return Ok(data.min_size)
    }

    for child_idx in self.child_indices(idx) {
      let _size = self.claim(child_idx)?;
    }

    let widget = self.lookup(idx);
    let size = widget.claim(self)?;
    trace!(widget = %self.id(idx), %size, "claimed");

    let data = self.node_data_mut(idx);
    data.min_size = size;
    data.claim_stale = false;
    Ok(size)
  }

  fn repack(&mut self, idx: Index) -> Result<()> {
    if !self.is_attached_to_root(idx) {
      return Ok(())
    }

    let old_size = self.node_data(idx).min_size;
    self.node_data_mut(idx).claim_stale = true;
    let size = self.claim(idx)?;

    if idx == ROOT {
      let territory = self.territory;
      if !territory.size().fits(size) {
        return Err(Error::TerritoryTooSmall {
          territory: territory.size(),
          min: size,
        })
      }
      return self.resize(idx, territory)
    }

    let data = self.node_data(idx);
    match (data.rect, data.parent_idx) {
      (Some(rect), _) if size == old_size => {
        let widget = self.lookup(idx);
        let () = widget.resize_children(self, rect)?;
        let () = self.draw(idx);
        Ok(())
      },
      (_, Some(parent_idx)) => {
        // The fresh claim stays cached, so the parent reuses it.
        debug!(widget = %self.id(idx), %old_size, %size, "claim changed; repacking parent");
        self.repack(parent_idx)
      },
      (_, None) => Ok(()),
    }
  }

  fn resize(&mut self, idx: Index, rect: Rect) -> Result<()> {
    if !self.is_attached_to_root(idx) {
      return Ok(())
    }

    let data = self.node_data_mut(idx);
    let changed = data.rect != Some(rect);
    data.rect = Some(rect);

    let widget = self.lookup(idx);
    if changed {
      trace!(widget = %self.id(idx), %rect, "resized");
      let () = widget.resize(self, rect)?;
    }
    // Even a widget with an unchanged rectangle may have to reposition
    // its children.
    let () = widget.resize_children(self, rect)?;
    let () = self.draw(idx);
    Ok(())
  }

  fn regroup(&mut self, idx: Index, group: Group) -> Result<()> {
    if !self.is_attached_to_root(idx) {
      return Ok(())
    }
    if self.node_data(idx).group.as_ref() == Some(&group) {
      return Ok(())
    }
    self.apply_group(idx, group)
  }

  fn apply_group(&mut self, idx: Index, group: Group) -> Result<()> {
    let id = self.id(idx);
    let data = self.node_data_mut(idx);
    let old = data.group.replace(group.clone());
    let is_drawn = data.is_drawn;

    if let Some(old) = old {
      if is_drawn && old != group {
        if let Some(renderer) = self.renderer.as_mut() {
          let () = renderer.migrate(id, &old, &group);
        }
      }
    }
    trace!(widget = %id, "regrouped");

    let widget = self.lookup(idx);
    let () = widget.regroup(self, &group)?;
    let () = widget.regroup_children(self, &group)?;
    let () = self.draw(idx);
    Ok(())
  }

  fn draw(&mut self, idx: Index) {
    if !self.is_attached_to_root(idx) || !self.is_displayed(idx) {
      return
    }

    let data = self.node_data(idx);
    let (rect, group) = match (data.rect, data.group.clone()) {
      (Some(rect), Some(group)) => (rect, group),
      _ => return,
    };

    // The renderer is lent to the widget for the duration of the draw.
    let Some(mut renderer) = self.renderer.take() else {
      return
    };
    let widget = self.lookup(idx);
    trace!(widget = %self.id(idx), %rect, "drawing");
    let () = widget.draw(renderer.as_mut(), &*self, rect, &group);
    self.renderer = Some(renderer);
    self.node_data_mut(idx).is_drawn = true;
  }

  fn undraw(&mut self, idx: Index) {
    if !self.node_data(idx).is_drawn {
      return
    }

    let id = self.id(idx);
    if let Some(renderer) = self.renderer.as_mut() {
      let () = renderer.undraw(id);
    }
    self.node_data_mut(idx).is_drawn = false;
  }

  fn hide(&mut self, idx: Index) -> Result<()> {
    if replace(&mut self.node_data_mut(idx).hidden, true) {
      return Ok(())
    }

    let subtree = self.subtree(idx);
    for idx in &subtree {
      let () = self.undraw(*idx);
    }

    if self.focused.is_some_and(|focused| subtree.contains(&focused)) {
      let () = self.set_focus(None)?;
    }
    trace!(widget = %self.id(idx), "hidden");
    Ok(())
  }

  fn unhide(&mut self, idx: Index) {
    if !replace(&mut self.node_data_mut(idx).hidden, false) {
      return
    }

    for idx in self.subtree(idx) {
      let () = self.draw(idx);
    }
    trace!(widget = %self.id(idx), "unhidden");
  }

  fn update(&mut self, idx: Index, update: Update) -> Result<()> {
    if self.node_data_mut(idx).batch.defer(update) {
      trace!(widget = %self.id(idx), ?update, "deferred update");
      return Ok(())
    }
    self.run_update(idx, update)
  }

  fn run_update(&mut self, idx: Index, update: Update) -> Result<()> {
    match update {
      Update::Reshape => {
        let widget = self.lookup(idx);
        widget.reshape(self)
      },
      Update::Repack => self.repack(idx),
      Update::Regroup => match self.node_data(idx).group.clone() {
        Some(group) if self.is_attached_to_root(idx) => self.apply_group(idx, group),
        _ => Ok(()),
      },
      Update::Redraw => {
        let () = self.draw(idx);
        Ok(())
      },
    }
  }

  fn hold_updates(&mut self, idx: Index, f: HoldFn<'_>) -> Result<()> {
    let () = self.node_data_mut(idx).batch.hold();
    let result = f(self as &mut dyn MutCap);
    let replay = self.node_data_mut(idx).batch.release();
    let () = result?;

    if let Some(updates) = replay {
      if !updates.is_empty() {
        debug!(widget = %self.id(idx), ?updates, "replaying held updates");
      }
      for update in updates {
        let () = self.run_update(idx, update)?;
      }
    }
    Ok(())
  }

  fn set_focus(&mut self, idx: Option<Index>) -> Result<()> {
    if self.focused == idx {
      return Ok(())
    }

    let old = replace(&mut self.focused, idx);
    debug!(
      old = ?old.map(|idx| self.id(idx)),
      new = ?idx.map(|idx| self.id(idx)),
      "focus changed"
    );

    if let Some(old) = old {
      if self.exists(old) {
        let () = self.emit(old, Signal::Unfocus)?;
      }
    }
    if let Some(idx) = idx {
      let () = self.emit(idx, Signal::Focus)?;
    }
    Ok(())
  }

  fn emit(&mut self, idx: Index, signal: Signal) -> Result<()> {
    let id = self.id(idx);
    let handlers = self.node_data(idx).handlers.clone();
    for handler in handlers {
      let () = (handler.0)(self as &mut dyn MutCap, id, &signal)?;
    }
    Ok(())
  }

  /// Translate a point in root coordinates into the coordinate space of
  /// the given widget.
  fn local_point(&self, idx: Index, point: Vector) -> Vector {
    let mut ancestors = Vec::new();
    let mut parent_idx = self.node_data(idx).parent_idx;
    while let Some(idx) = parent_idx {
      ancestors.push(idx);
      parent_idx = self.node_data(idx).parent_idx;
    }

    ancestors.iter().rev().fold(point, |point, idx| {
      self.lookup(*idx).child_coordinates(self, point)
    })
  }

  /// Handle an event.
  ///
  /// Keyboard events are passed to the focused widget and bubble up
  /// towards the root until a widget handles them. Events nobody
  /// handled are returned. Mouse events are routed through the tree
  /// based on the pointer position and are never returned.
  pub async fn handle<E>(&mut self, event: E) -> Result<Option<Event>>
  where
    E: Into<Event>,
  {
    match event.into() {
      Event::Mouse(event) => {
        let events = self.normalizer.normalize(event, self.territory);
        for event in events {
          let () = self.dispatch_mouse(event).await?;
        }
        Ok(None)
      },
      event @ (Event::KeyDown(..) | Event::KeyUp(..)) => self.handle_key(event).await,
    }
  }

  /// Bubble up a keyboard event until it is handled by some `Widget`.
  async fn handle_key(&mut self, event: Event) -> Result<Option<Event>> {
    let mut event = event;
    let mut idx = self.focused;

    while let Some(i) = idx {
      let widget = self.lookup(i);
      match widget.handle(self, event).await? {
        Some(unhandled) => {
          event = unhandled;
          idx = self.exists(i).then(|| self.node_data(i).parent_idx).flatten();
        },
        None => return Ok(None),
      }
    }
    Ok(Some(event))
  }

  async fn dispatch_mouse(&mut self, event: MouseEvent) -> Result<()> {
    if let Some(grabbed) = self.grabbed {
      match event {
        MouseEvent::Drag { .. } | MouseEvent::Release { .. } => {
          let pos = self.local_point(grabbed, event.pos());
          let result = self.deliver_mouse(grabbed, event.with_pos(pos)).await;
          if matches!(event, MouseEvent::Release { .. }) {
            self.grabbed = None;
          }
          return result
        },
        _ => (),
      }
    }

    match event {
      MouseEvent::Enter { .. } | MouseEvent::DragEnter { .. } => self.route_enter(ROOT, event).await,
      MouseEvent::Leave { .. } | MouseEvent::DragLeave { .. } => self.route_leave(ROOT, event).await,
      _ => self.route_mouse(ROOT, event).await,
    }
  }

  /// Deliver a mouse event to a single widget.
  async fn deliver_mouse(&mut self, idx: Index, event: MouseEvent) -> Result<()> {
    let widget = self.lookup(idx);
    let () = widget.handle_mouse(self, event).await?;

    if self.exists(idx) {
      self.emit(idx, Signal::Mouse(event))
    } else {
      Ok(())
    }
  }

  async fn route_enter(&mut self, idx: Index, event: MouseEvent) -> Result<()> {
    self.node_data_mut(idx).under_mouse = true;
    self.deliver_mouse(idx, event).await
  }

  /// Deliver a leave event to a widget and all its descendants that
  /// are currently under the mouse, innermost first.
  fn route_leave(
    &mut self,
    idx: Index,
    event: MouseEvent,
  ) -> Pin<Box<dyn Future<Output = Result<()>> + '_>> {
    Box::pin(async move {
      let widget = self.lookup(idx);
      let hits = take(&mut self.node_data_mut(idx).mouse_hits);
      let child_event = event.with_pos(widget.child_coordinates(&*self, event.pos()));

      for child in hits {
        let child_idx = self.validate(child);
        if self.exists(child_idx) {
          let () = self.route_leave(child_idx, child_event).await?;
        }
      }

      self.node_data_mut(idx).under_mouse = false;
      self.deliver_mouse(idx, event).await
    })
  }

  /// Deliver a positional mouse event to a widget and, recursively, to
  /// the children under the pointer, synthesizing crossing events for
  /// children the pointer entered or left.
  fn route_mouse(
    &mut self,
    idx: Index,
    event: MouseEvent,
  ) -> Pin<Box<dyn Future<Output = Result<()>> + '_>> {
    Box::pin(async move {
      let widget = self.lookup(idx);
      let () = self.deliver_mouse(idx, event).await?;
      if !self.exists(idx) {
        return Ok(())
      }

      let id = self.id(idx);
      let point = widget.child_coordinates(&*self, event.pos());
      let child_event = event.with_pos(point);
      let previous = self.node_data(idx).mouse_hits.clone();
      let hits = widget.children_under_mouse(&*self, id, point, &previous);

      let (leave, enter) = if event.is_drag() {
        (MouseEvent::DragLeave { pos: point }, MouseEvent::DragEnter { pos: point })
      } else {
        (MouseEvent::Leave { pos: point }, MouseEvent::Enter { pos: point })
      };

      for child in previous.iter().filter(|child| !hits.contains(child)) {
        let child_idx = self.validate(*child);
        if self.exists(child_idx) {
          let () = self.route_leave(child_idx, leave).await?;
        }
      }

      self.node_data_mut(idx).mouse_hits = hits.clone();

      for child in hits {
        let child_idx = self.validate(child);
        if !self.exists(child_idx) {
          continue
        }
        if !previous.contains(&child) {
          let () = self.route_enter(child_idx, enter).await?;
        }
        let () = self.route_mouse(child_idx, child_event).await?;
      }
      Ok(())
    })
  }
}

impl Cap for Ui {
  fn root_id(&self) -> Id {
    self.id(ROOT)
  }

  fn parent_id(&self, widget: Id) -> Option<Id> {
    let idx = self.validate(widget);
    let parent_idx = self.node_data(idx).parent_idx;
    let parent_id = parent_idx.map(|x| self.id(x));
    debug_assert!(parent_id.map_or(true, |x| Cap::children(self, x).any(|x| *x == widget)));
    parent_id
  }

  fn children(&self, widget: Id) -> ChildIter<'_> {
    self.node_data(self.validate(widget)).children.iter()
  }

  fn rect(&self, widget: Id) -> Option<Rect> {
    self.node_data(self.validate(widget)).rect
  }

  fn group(&self, widget: Id) -> Option<Group> {
    self.node_data(self.validate(widget)).group.clone()
  }

  fn min_size(&self, widget: Id) -> Size {
    self.node_data(self.validate(widget)).min_size
  }

  fn is_claim_stale(&self, widget: Id) -> bool {
    self.node_data(self.validate(widget)).claim_stale
  }

  fn is_hidden(&self, widget: Id) -> bool {
    self.node_data(self.validate(widget)).hidden
  }

  fn is_displayed(&self, widget: Id) -> bool {
    self.is_displayed(self.validate(widget))
  }

  fn is_attached_to_root(&self, widget: Id) -> bool {
    self.is_attached_to_root(self.validate(widget))
  }

  fn is_drawn(&self, widget: Id) -> bool {
    self.node_data(self.validate(widget)).is_drawn
  }

  fn is_under_mouse(&self, widget: Id) -> bool {
    self.node_data(self.validate(widget)).under_mouse
  }

  fn mouse_hits(&self, widget: Id) -> &[Id] {
    &self.node_data(self.validate(widget)).mouse_hits
  }

  fn data(&self, widget: Id) -> &dyn Any {
    self.node_data(self.validate(widget)).data.as_ref()
  }

  fn focused(&self) -> Option<Id> {
    self.focused.map(|x| self.id(x))
  }

  fn is_focused(&self, widget: Id) -> bool {
    let idx = self.validate(widget);
    self.focused == Some(idx)
  }

  fn grabbed(&self) -> Option<Id> {
    self.grabbed.map(|x| self.id(x))
  }

  fn territory(&self) -> Rect {
    self.territory
  }

  fn theme(&self) -> &Theme {
    &self.theme
  }

  fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
    match &self.renderer {
      Some(renderer) => renderer.measure_text(text, style),
      None => estimate_text_size(text, style),
    }
  }
}

impl MutCap for Ui {
  fn data_mut(&mut self, widget: Id) -> &mut dyn Any {
    let idx = self.validate(widget);
    self.node_data_mut(idx).data.as_mut()
  }

  fn add_widget(&mut self, data: Box<dyn Any>, new_widget: NewWidgetFn<'_>) -> Id {
    self.add_widget(data, new_widget)
  }

  fn remove_widget(&mut self, widget: Id) -> Result<()> {
    let idx = self.validate(widget);
    self.remove_widget(idx)
  }

  fn attach_child(&mut self, parent: Id, child: Id) -> Result<()> {
    let parent_idx = self.validate(parent);
    let child_idx = self.validate(child);
    self.attach_child(parent_idx, child_idx)
  }

  fn detach_child(&mut self, parent: Id, child: Id) -> Result<()> {
    let parent_idx = self.validate(parent);
    let child_idx = self.validate(child);
    self.detach_child(parent_idx, child_idx)
  }

  fn claim(&mut self, widget: Id) -> Result<Size> {
    let idx = self.validate(widget);
    self.claim(idx)
  }

  fn repack(&mut self, widget: Id) -> Result<()> {
    let idx = self.validate(widget);
    self.repack(idx)
  }

  fn resize(&mut self, widget: Id, rect: Rect) -> Result<()> {
    let idx = self.validate(widget);
    self.resize(idx, rect)
  }

  fn regroup(&mut self, widget: Id, group: Group) -> Result<()> {
    let idx = self.validate(widget);
    self.regroup(idx, group)
  }

  fn redraw(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.draw(idx)
  }

  fn undraw(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.undraw(idx)
  }

  fn hide(&mut self, widget: Id) -> Result<()> {
    let idx = self.validate(widget);
    self.hide(idx)
  }

  fn unhide(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.unhide(idx)
  }

  fn update(&mut self, widget: Id, update: Update) -> Result<()> {
    let idx = self.validate(widget);
    self.update(idx, update)
  }

  fn hold_updates(&mut self, widget: Id, f: HoldFn<'_>) -> Result<()> {
    let idx = self.validate(widget);
    self.hold_updates(idx, f)
  }

  fn focus(&mut self, widget: Id) -> Result<()> {
    let idx = self.validate(widget);
    self.set_focus(Some(idx))
  }

  fn unfocus(&mut self) -> Result<()> {
    self.set_focus(None)
  }

  fn connect(&mut self, widget: Id, handler: Rc<SignalFn>) {
    let idx = self.validate(widget);
    self.node_data_mut(idx).handlers.push(Handler(handler))
  }

  fn emit(&mut self, widget: Id, signal: Signal) -> Result<()> {
    let idx = self.validate(widget);
    self.emit(idx, signal)
  }

  fn grab_mouse(&mut self, widget: Id) {
    let idx = self.validate(widget);
    debug!(%widget, "mouse grabbed");
    self.grabbed = Some(idx);
  }

  fn release_mouse(&mut self) {
    if self.grabbed.take().is_some() {
      debug!("mouse released");
    }
  }
}
