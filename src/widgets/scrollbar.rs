// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use async_trait::async_trait;

use crate::derive::Widget;
use crate::widgets::ScrollPane;
use crate::Cap;
use crate::Error;
use crate::Handleable;
use crate::Id;
use crate::Layout;
use crate::MouseButtons;
use crate::MouseEvent;
use crate::MutCap;
use crate::Rect;
use crate::Result;
use crate::Signal;
use crate::Size;
use crate::Vector;


/// The configuration of a [`ScrollBar`].
#[derive(Clone, Debug)]
pub struct ScrollBarConfig {
  /// Whether the bar is vertical or horizontal.
  pub vertical: bool,
  /// The extent of the bar across its axis.
  pub thickness: f64,
  /// The minimum length of the grip.
  pub grip_length: f64,
}

impl Default for ScrollBarConfig {
  fn default() -> Self {
    Self {
      vertical: true,
      thickness: 12.0,
      grip_length: 20.0,
    }
  }
}


/// The data associated with a [`ScrollBar`].
#[derive(Debug)]
pub struct ScrollBarData {
  pane: Id,
  grip: Id,
  vertical: bool,
  thickness: f64,
  grip_length: f64,
}


/// The data associated with a [`ScrollGrip`].
#[derive(Debug, Default)]
pub struct ScrollGripData {
  dragging: bool,
}


/// The draggable part of a [`ScrollBar`].
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct ScrollGrip {
  id: Id,
}

impl ScrollGrip {
  /// Check whether the grip is currently being dragged.
  pub fn is_dragging(cap: &dyn Cap, grip: Id) -> Result<bool> {
    Ok(cap.typed_data::<ScrollGripData>(grip)?.dragging)
  }
}

impl Layout for ScrollGrip {}

#[async_trait(?Send)]
impl Handleable for ScrollGrip {
  async fn handle_mouse(&self, cap: &mut dyn MutCap, event: MouseEvent) -> Result<()> {
    match event {
      MouseEvent::Press { button, .. } if button.contains(MouseButtons::LEFT) => {
        cap.typed_data_mut::<ScrollGripData>(self.id)?.dragging = true;
        let () = cap.grab_mouse(self.id);
        Ok(())
      },
      MouseEvent::Drag { delta, .. } => {
        if !cap.typed_data::<ScrollGripData>(self.id)?.dragging {
          return Ok(())
        }
        match cap.parent_id(self.id) {
          Some(bar) => ScrollBar::drag(cap, bar, delta),
          None => Ok(()),
        }
      },
      MouseEvent::Release { button, .. } if button.contains(MouseButtons::LEFT) => {
        cap.typed_data_mut::<ScrollGripData>(self.id)?.dragging = false;
        let () = cap.release_mouse();
        Ok(())
      },
      _ => Ok(()),
    }
  }
}


/// A bar visualizing and controlling the position of a [`ScrollPane`].
///
/// The bar is not a child of the pane it controls; it is typically
/// placed next to it in a box or grid.
#[derive(Debug, Widget)]
#[tessel(default_new)]
pub struct ScrollBar {
  id: Id,
}

impl ScrollBar {
  /// Create a scroll bar controlling the given pane.
  pub fn create(cap: &mut dyn MutCap, pane: Id, config: ScrollBarConfig) -> Result<Id> {
    // Make sure we fail early if `pane` is not a scroll pane.
    let _mover = ScrollPane::mover(&*cap, pane)?;

    let grip = cap.add_widget(Box::new(ScrollGripData::default()), &mut |id, _cap| {
      Box::new(ScrollGrip::new(id))
    });
    let data = ScrollBarData {
      pane,
      grip,
      vertical: config.vertical,
      thickness: config.thickness,
      grip_length: config.grip_length,
    };
    let bar = cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(ScrollBar::new(id)));
    let () = cap.attach_child(bar, grip)?;

    let sync = move |cap: &mut dyn MutCap, _pane: Id, signal: &Signal| match signal {
      Signal::Scroll(..) | Signal::ViewChange => ScrollBar::sync(cap, bar),
      _ => Ok(()),
    };
    let () = cap.connect(pane, Rc::new(sync));
    Ok(bar)
  }

  /// Retrieve the pane controlled by a bar.
  pub fn pane(cap: &dyn Cap, bar: Id) -> Result<Id> {
    Ok(cap.typed_data::<ScrollBarData>(bar)?.pane)
  }

  /// Retrieve the grip of a bar.
  pub fn grip(cap: &dyn Cap, bar: Id) -> Result<Id> {
    Ok(cap.typed_data::<ScrollBarData>(bar)?.grip)
  }

  /// Determine the rectangle of the grip within the bar's rectangle.
  fn grip_rect(cap: &dyn Cap, bar: Id, rect: Rect) -> Result<Rect> {
    let data = cap.typed_data::<ScrollBarData>(bar)?;
    let position = ScrollPane::position_percent(cap, data.pane);
    let visible = ScrollPane::visible_fraction(cap, data.pane);
    let (position, visible) = match (position, visible) {
      (Ok(position), Ok(visible)) => (position, visible),
      // Until the pane is laid out the grip covers the whole bar.
      (Err(Error::NotLaidOut { .. }), _) | (_, Err(Error::NotLaidOut { .. })) => {
        (Vector::zero(), Vector::new(1.0, 1.0))
      },
      (Err(err), _) | (_, Err(err)) => return Err(err),
    };

    let (length, position, visible) = if data.vertical {
      (rect.height, position.y, visible.y)
    } else {
      (rect.width, position.x, visible.x)
    };
    let grip = (visible * length).max(data.grip_length).min(length);
    let offset = position * (length - grip);

    let grip_rect = if data.vertical {
      Rect::new(rect.left, rect.bottom + offset, rect.width, grip)
    } else {
      Rect::new(rect.left + offset, rect.bottom, grip, rect.height)
    };
    Ok(grip_rect)
  }

  /// Reposition the grip after the pane scrolled or its view or content
  /// changed in size.
  fn sync(cap: &mut dyn MutCap, bar: Id) -> Result<()> {
    let grip = ScrollBar::grip(&*cap, bar)?;
    match cap.rect(bar) {
      Some(rect) => {
        let grip_rect = ScrollBar::grip_rect(&*cap, bar, rect)?;
        cap.resize(grip, grip_rect)
      },
      None => Ok(()),
    }
  }

  /// Scroll the pane in response to the grip being dragged by `delta`.
  fn drag(cap: &mut dyn MutCap, bar: Id, delta: Vector) -> Result<()> {
    let data = cap.typed_data::<ScrollBarData>(bar)?;
    let (pane, grip, vertical) = (data.pane, data.grip, data.vertical);
    let (Some(rect), Some(grip_rect)) = (cap.rect(bar), cap.rect(grip)) else {
      return Ok(())
    };

    let delta = if vertical {
      let travel = rect.height - grip_rect.height;
      Vector::new(0.0, if travel > 0.0 { delta.y / travel } else { 0.0 })
    } else {
      let travel = rect.width - grip_rect.width;
      Vector::new(if travel > 0.0 { delta.x / travel } else { 0.0 }, 0.0)
    };
    ScrollPane::scroll_percent(cap, pane, delta)
  }
}

impl Layout for ScrollBar {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let data = cap.typed_data::<ScrollBarData>(self.id)?;
    if data.vertical {
      Ok(Size::new(data.thickness, data.grip_length))
    } else {
      Ok(Size::new(data.grip_length, data.thickness))
    }
  }

  fn resize_children(&self, cap: &mut dyn MutCap, rect: Rect) -> Result<()> {
    let grip = ScrollBar::grip(&*cap, self.id)?;
    let grip_rect = ScrollBar::grip_rect(&*cap, self.id, rect)?;
    cap.resize(grip, grip_rect)
  }
}

#[async_trait(?Send)]
impl Handleable for ScrollBar {
  async fn handle_mouse(&self, cap: &mut dyn MutCap, event: MouseEvent) -> Result<()> {
    match event {
      MouseEvent::Scroll { scroll, .. } => {
        let pane = ScrollBar::pane(&*cap, self.id)?;
        let step = cap.theme().scroll_step;
        ScrollPane::scroll(cap, pane, scroll * step)
      },
      _ => Ok(()),
    }
  }

  fn children_can_overlap(&self) -> bool {
    false
  }
}
