// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Widgets showing a movable part of content larger than themselves.

use std::rc::Rc;

use async_trait::async_trait;

use crate::derive::Widget;
use crate::fixed_size_align;
use crate::Alignment;
use crate::Cap;
use crate::Error;
use crate::Group;
use crate::Handleable;
use crate::Id;
use crate::Layout;
use crate::MouseEvent;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Signal;
use crate::Size;
use crate::Update;
use crate::Vector;


/// The extent by which content exceeds the view, per axis.
fn unoccupied(view: Size, content: Size) -> Size {
  Size::new(
    (content.width - view.width).max(0.0),
    (content.height - view.height).max(0.0),
  )
}

/// Determine the position at which the view shows the part of the
/// content selected by `alignment`.
fn view_position(alignment: &Alignment, view: Size, content: Size) -> Result<Vector> {
  let mut rect = Rect::from_size(view);
  let () = fixed_size_align(alignment, &mut rect, &Rect::from_size(content))?;
  Ok(Vector::new(rect.left, rect.bottom))
}

fn clamp(position: Vector, unoccupied: Size) -> Vector {
  Vector::new(
    position.x.clamp(0.0, unoccupied.width),
    position.y.clamp(0.0, unoccupied.height),
  )
}


/// The data associated with a [`Mover`].
#[derive(Debug)]
pub struct MoverData {
  child: Option<Id>,
  horizontal: bool,
  vertical: bool,
  /// The position of the view within the content, measured from the
  /// content's bottom left corner.
  position: Vector,
  initial_view: Alignment,
  /// A view to apply once the content is laid out.
  pending_view: Option<Alignment>,
  /// The sizes of view and content as of the last layout.
  extent: Option<(Size, Size)>,
}


/// A widget translating its single child.
///
/// The child is laid out in content coordinates: its top left corner
/// coincides with the mover's and it is at least as large as the mover.
/// A clamped position selects the part of the child that lines up with
/// the mover. Moving never lays out the child again; the child merely
/// receives a translated draw order token.
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct Mover {
  id: Id,
}

impl Mover {
  /// Create a mover, scrolling along the given axes and showing the
  /// part of the child selected by `view` initially.
  pub fn create(cap: &mut dyn MutCap, horizontal: bool, vertical: bool, view: Alignment) -> Id {
    let data = MoverData {
      child: None,
      horizontal,
      vertical,
      position: Vector::zero(),
      initial_view: view.clone(),
      pending_view: Some(view),
      extent: None,
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Mover::new(id)))
  }

  /// Set or clear the child of a mover.
  ///
  /// If the new child cannot be attached the mover is left unchanged.
  pub fn set_child(cap: &mut dyn MutCap, mover: Id, child: Option<Id>) -> Result<()> {
    let old = cap.typed_data::<MoverData>(mover)?.child;
    if old == child {
      return Ok(())
    }

    if let Some(child) = child {
      let () = cap.attach_child(mover, child)?;
    }
    if let Some(old) = old {
      let () = cap.detach_child(mover, old)?;
    }

    let data = cap.typed_data_mut::<MoverData>(mover)?;
    data.child = child;
    data.position = Vector::zero();
    data.pending_view = Some(data.initial_view.clone());
    data.extent = None;

    // The child was not known yet when it got attached.
    if let (Some(child), Some(group)) = (child, cap.group(mover)) {
      let offset = Mover::translation(&*cap, mover)?;
      let () = cap.regroup(child, group.translated(offset))?;
    }
    cap.update(mover, Update::Repack)
  }

  /// Retrieve the child of a mover.
  pub fn child(cap: &dyn Cap, mover: Id) -> Result<Option<Id>> {
    Ok(cap.typed_data::<MoverData>(mover)?.child)
  }

  fn laid_out(cap: &dyn Cap, mover: Id, operation: &'static str) -> Result<Rect> {
    cap
      .rect(mover)
      .ok_or(Error::NotLaidOut { id: mover, operation })
  }

  /// Retrieve the size of the content, if any.
  fn content(cap: &dyn Cap, mover: Id) -> Result<Option<Size>> {
    let child = cap.typed_data::<MoverData>(mover)?.child;
    Ok(child.and_then(|child| cap.rect(child)).map(|rect| rect.size()))
  }

  /// Retrieve the current position.
  pub fn position(cap: &dyn Cap, mover: Id) -> Result<Vector> {
    let _rect = Mover::laid_out(cap, mover, "report its position")?;
    Ok(cap.typed_data::<MoverData>(mover)?.position)
  }

  /// Retrieve the extent by which the child exceeds the mover.
  pub fn unoccupied(cap: &dyn Cap, mover: Id) -> Result<Size> {
    let rect = Mover::laid_out(cap, mover, "report its unoccupied size")?;
    let content = Mover::content(cap, mover)?.unwrap_or(rect.size());
    Ok(unoccupied(rect.size(), content))
  }

  /// Determine the position showing the part of the child selected by
  /// the given alignment.
  pub fn view_position(cap: &dyn Cap, mover: Id, alignment: &Alignment) -> Result<Vector> {
    let rect = Mover::laid_out(cap, mover, "align its view")?;
    let content = Mover::content(cap, mover)?.unwrap_or(rect.size());
    view_position(alignment, rect.size(), content)
  }

  /// The offset by which the child is displaced.
  fn translation(cap: &dyn Cap, mover: Id) -> Result<Vector> {
    let position = cap.typed_data::<MoverData>(mover)?.position;
    match (cap.rect(mover), Mover::content(cap, mover)?) {
      (Some(rect), Some(content)) => {
        let unoccupied = unoccupied(rect.size(), content);
        Ok(Vector::new(-position.x, unoccupied.height - position.y))
      },
      _ => Ok(Vector::zero()),
    }
  }

  /// Move to the given position, clamped to the valid range.
  ///
  /// A [`Signal::Scroll`] is emitted if the position changed.
  pub fn move_to(cap: &mut dyn MutCap, mover: Id, position: Vector) -> Result<()> {
    let unoccupied = Mover::unoccupied(&*cap, mover)?;
    let position = clamp(position, unoccupied);

    let data = cap.typed_data_mut::<MoverData>(mover)?;
    if data.position == position {
      return Ok(())
    }
    data.position = position;
    let child = data.child;

    if let (Some(child), Some(group)) = (child, cap.group(mover)) {
      let offset = Mover::translation(&*cap, mover)?;
      let () = cap.regroup(child, group.translated(offset))?;
    }
    cap.emit(mover, Signal::Scroll(position))
  }
}

impl Layout for Mover {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let data = cap.typed_data::<MoverData>(self.id)?;
    let min = data.child.map(|child| cap.min_size(child)).unwrap_or_default();

    Ok(Size::new(
      if data.horizontal { 0.0 } else { min.width },
      if data.vertical { 0.0 } else { min.height },
    ))
  }

  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let data = cap.typed_data::<MoverData>(self.id)?;
    let Some(child) = data.child else {
      return Ok(())
    };

    let min = cap.min_size(child);
    let size = Size::new(
      if data.horizontal { rect.width.max(min.width) } else { rect.width },
      if data.vertical { rect.height.max(min.height) } else { rect.height },
    );
    let content = Rect::new(rect.left, rect.top() - size.height, size.width, size.height);
    let unoccupied = unoccupied(rect.size(), size);

    let extent = (rect.size(), size);
    let data = cap.typed_data_mut::<MoverData>(self.id)?;
    let resized = data.extent.replace(extent) != Some(extent);
    let old = data.position;
    let target = match data.pending_view.take() {
      Some(view) => view_position(&view, rect.size(), size)?,
      None => old,
    };
    let position = clamp(target, unoccupied);
    data.position = position;

    // Regroup first, so that the child gets drawn at its final offset
    // right away.
    if let Some(group) = cap.group(self.id) {
      let offset = Vector::new(-position.x, unoccupied.height - position.y);
      let () = cap.regroup(child, group.translated(offset))?;
    }
    let () = cap.resize(child, content)?;

    if position != old {
      let () = cap.emit(self.id, Signal::Scroll(position))?;
    }
    if resized {
      let () = cap.emit(self.id, Signal::ViewChange)?;
    }
    Ok(())
  }

  fn regroup_children(&self, cap: &mut dyn MutCap, group: &Group) -> Result<()> {
    let offset = Mover::translation(&*cap, self.id)?;
    if let Some(child) = cap.typed_data::<MoverData>(self.id)?.child {
      let () = cap.regroup(child, group.translated(offset))?;
    }
    Ok(())
  }
}

impl Handleable for Mover {
  fn children_can_overlap(&self) -> bool {
    false
  }

  fn child_coordinates(&self, cap: &dyn Cap, point: Vector) -> Vector {
    point - Mover::translation(cap, self.id).unwrap_or_default()
  }
}


/// The configuration of a [`ScrollPane`].
#[derive(Clone, Debug)]
pub struct ScrollPaneConfig {
  /// Whether the pane scrolls horizontally.
  pub horizontal: bool,
  /// Whether the pane scrolls vertically.
  pub vertical: bool,
  /// The part of the content shown initially.
  pub view: Alignment,
}

impl Default for ScrollPaneConfig {
  fn default() -> Self {
    Self {
      horizontal: true,
      vertical: true,
      view: Alignment::TopLeft,
    }
  }
}


/// The data associated with a [`ScrollPane`].
#[derive(Debug)]
pub struct ScrollPaneData {
  mover: Id,
}


/// A widget showing a clipped, scrollable view of its content.
///
/// The pane claims no space along the axes it scrolls, which makes it
/// the means of choice for embedding content larger than the space
/// available. Positions are measured from the bottom left corner of the
/// content; percentages are fractions of the extent by which the
/// content exceeds the pane and are zero where it does not.
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct ScrollPane {
  id: Id,
}

impl ScrollPane {
  /// Create a new, empty scroll pane.
  pub fn create(cap: &mut dyn MutCap, config: ScrollPaneConfig) -> Result<Id> {
    let mover = Mover::create(cap, config.horizontal, config.vertical, config.view);
    let data = ScrollPaneData { mover };
    let pane = cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(ScrollPane::new(id)));
    let () = cap.attach_child(pane, mover)?;

    let forward = move |cap: &mut dyn MutCap, _mover: Id, signal: &Signal| match signal {
      Signal::Scroll(position) => cap.emit(pane, Signal::Scroll(*position)),
      Signal::ViewChange => cap.emit(pane, Signal::ViewChange),
      _ => Ok(()),
    };
    let () = cap.connect(mover, Rc::new(forward));
    Ok(pane)
  }

  /// Retrieve the mover used by a pane.
  pub fn mover(cap: &dyn Cap, pane: Id) -> Result<Id> {
    Ok(cap.typed_data::<ScrollPaneData>(pane)?.mover)
  }

  fn laid_out(cap: &dyn Cap, pane: Id, operation: &'static str) -> Result<Id> {
    let mover = ScrollPane::mover(cap, pane)?;
    match (cap.rect(pane), cap.rect(mover)) {
      (Some(_), Some(_)) => Ok(mover),
      _ => Err(Error::NotLaidOut { id: pane, operation }),
    }
  }

  /// Set or clear the content of a pane.
  pub fn set_child(cap: &mut dyn MutCap, pane: Id, child: Option<Id>) -> Result<()> {
    let mover = ScrollPane::mover(&*cap, pane)?;
    Mover::set_child(cap, mover, child)
  }

  /// Retrieve the content of a pane.
  pub fn child(cap: &dyn Cap, pane: Id) -> Result<Option<Id>> {
    Mover::child(cap, ScrollPane::mover(cap, pane)?)
  }

  /// Scroll by the given distance.
  pub fn scroll(cap: &mut dyn MutCap, pane: Id, delta: Vector) -> Result<()> {
    let mover = ScrollPane::laid_out(&*cap, pane, "scroll")?;
    let position = Mover::position(&*cap, mover)?;
    Mover::move_to(cap, mover, position + delta)
  }

  /// Scroll by the given fraction of the unoccupied size.
  pub fn scroll_percent(cap: &mut dyn MutCap, pane: Id, delta: Vector) -> Result<()> {
    let mover = ScrollPane::laid_out(&*cap, pane, "scroll")?;
    let unoccupied = Mover::unoccupied(&*cap, mover)?;
    let delta = Vector::new(delta.x * unoccupied.width, delta.y * unoccupied.height);
    ScrollPane::scroll(cap, pane, delta)
  }

  /// Jump to the given position.
  pub fn jump(cap: &mut dyn MutCap, pane: Id, position: Vector) -> Result<()> {
    let mover = ScrollPane::laid_out(&*cap, pane, "jump")?;
    Mover::move_to(cap, mover, position)
  }

  /// Jump to the given fraction of the unoccupied size.
  pub fn jump_percent(cap: &mut dyn MutCap, pane: Id, fraction: Vector) -> Result<()> {
    let mover = ScrollPane::laid_out(&*cap, pane, "jump")?;
    let unoccupied = Mover::unoccupied(&*cap, mover)?;
    let position = Vector::new(fraction.x * unoccupied.width, fraction.y * unoccupied.height);
    Mover::move_to(cap, mover, position)
  }

  /// Show the part of the content selected by the given alignment.
  pub fn set_view(cap: &mut dyn MutCap, pane: Id, alignment: &Alignment) -> Result<()> {
    let mover = ScrollPane::laid_out(&*cap, pane, "change its view")?;
    let position = Mover::view_position(&*cap, mover, alignment)?;
    Mover::move_to(cap, mover, position)
  }

  /// Retrieve the current position.
  pub fn position(cap: &dyn Cap, pane: Id) -> Result<Vector> {
    let mover = ScrollPane::laid_out(cap, pane, "report its position")?;
    Mover::position(cap, mover)
  }

  /// Retrieve the current position as a fraction of the unoccupied
  /// size.
  pub fn position_percent(cap: &dyn Cap, pane: Id) -> Result<Vector> {
    let mover = ScrollPane::laid_out(cap, pane, "report its position")?;
    let position = Mover::position(cap, mover)?;
    let unoccupied = Mover::unoccupied(cap, mover)?;
    let fraction = |position: f64, unoccupied: f64| {
      if unoccupied > 0.0 {
        position / unoccupied
      } else {
        0.0
      }
    };

    Ok(Vector::new(
      fraction(position.x, unoccupied.width),
      fraction(position.y, unoccupied.height),
    ))
  }

  /// Retrieve the fraction of the content visible, per axis.
  pub fn visible_fraction(cap: &dyn Cap, pane: Id) -> Result<Vector> {
    let mover = ScrollPane::laid_out(cap, pane, "report its visible fraction")?;
    let view = Mover::laid_out(cap, mover, "report its visible fraction")?.size();
    let content = Mover::content(cap, mover)?.unwrap_or(view);
    let fraction = |view: f64, content: f64| {
      if content > view {
        view / content
      } else {
        1.0
      }
    };

    Ok(Vector::new(
      fraction(view.width, content.width),
      fraction(view.height, content.height),
    ))
  }
}

impl Layout for ScrollPane {
  fn resize(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let mover = ScrollPane::mover(&*cap, self.id)?;
    match cap.group(self.id) {
      Some(group) => cap.regroup(mover, group.clipped(rect)),
      None => Ok(()),
    }
  }

  fn regroup_children(&self, cap: &mut dyn MutCap, group: &Group) -> Result<()> {
    let mover = ScrollPane::mover(&*cap, self.id)?;
    let group = match cap.rect(self.id) {
      Some(rect) => group.clipped(rect),
      None => group.clone(),
    };
    cap.regroup(mover, group)
  }
}

#[async_trait(?Send)]
impl Handleable for ScrollPane {
  async fn handle_mouse(&self, cap: &mut dyn MutCap, event: MouseEvent) -> Result<()> {
    match event {
      MouseEvent::Scroll { scroll, .. } => {
        let step = cap.theme().scroll_step;
        ScrollPane::scroll(cap, self.id, scroll * step)
      },
      _ => Ok(()),
    }
  }

  fn children_can_overlap(&self) -> bool {
    false
  }
}
