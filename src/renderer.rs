// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;

use crate::Cap;
use crate::Group;
use crate::Id;
use crate::Rect;
use crate::Renderable;
use crate::Size;
use crate::TextStyle;


/// Estimate the extent of a line of text without any font metrics.
///
/// Every character is assumed to be 0.6 em wide and a line to be
/// 1.2 em high.
pub fn estimate_text_size(text: &str, style: &TextStyle) -> Size {
  let chars = text.chars().count() as f64;
  Size::new(chars * style.font_size * 0.6, style.font_size * 1.2)
}


/// An abstraction for objects used for drawing widgets.
///
/// A renderer owns whatever primitives it creates on behalf of a widget
/// and identifies them by the widget's [`Id`]. The `Ui` tells it when
/// primitives are to be (re)created, when they are no longer needed,
/// and when they need to move to a different draw order token.
pub trait Renderer: Debug {
  /// Draw an object, replacing any primitives previously drawn for it.
  ///
  /// Objects are represented as [`Renderable`] and need to be cast into
  /// the actual widget type by the `Renderer` itself, should that be
  /// necessary. A simplified implementation could look as follows:
  /// ```rust
  /// # use tessel::{Cap, Group, Id, Rect, Renderable, Renderer};
  /// # use tessel::widgets::{Background, Label};
  /// # #[derive(Debug)]
  /// # struct TestRenderer {}
  /// # impl TestRenderer {
  /// #   fn draw_label(&mut self, text: &str, rect: Rect, group: &Group) {}
  /// #   fn draw_tile(&mut self, rect: Rect, group: &Group) {}
  /// # }
  /// # impl Renderer for TestRenderer {
  /// #   fn undraw(&mut self, id: Id) {}
  /// fn draw(&mut self, id: Id, widget: &dyn Renderable, cap: &dyn Cap, rect: Rect, group: &Group) {
  ///   if widget.is::<Label>() {
  ///     let text = Label::text(cap, id).unwrap_or_default();
  ///     self.draw_label(&text, rect, group)
  ///   } else if widget.is::<Background>() {
  ///     for (_slot, tile) in Background::tiles(cap, id).unwrap_or_default() {
  ///       self.draw_tile(tile, group)
  ///     }
  ///   } else {
  ///     // Containers typically have no visual representation.
  ///   }
  /// }
  /// # }
  /// # fn main() {}
  /// ```
  fn draw(&mut self, id: Id, widget: &dyn Renderable, cap: &dyn Cap, rect: Rect, group: &Group);

  /// Remove all primitives drawn for the widget with the given `Id`.
  fn undraw(&mut self, id: Id);

  /// Move all primitives drawn for the widget with the given `Id` from
  /// one draw order token to another.
  fn migrate(&mut self, _id: Id, _from: &Group, _to: &Group) {}

  /// Measure the extent of a line of text.
  ///
  /// The default implementation provides a rough estimate only.
  fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
    estimate_text_size(text, style)
  }
}
