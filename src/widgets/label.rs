// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::derive::Handleable;
use crate::derive::Widget;
use crate::Cap;
use crate::Id;
use crate::Layout;
use crate::MutCap;
use crate::Result;
use crate::Size;
use crate::TextStyle;
use crate::Update;


/// The configuration of a [`Label`].
#[derive(Clone, Debug, Default)]
pub struct LabelConfig {
  /// The text to display.
  pub text: String,
  /// The style of the text; the theme's text style if `None`.
  pub style: Option<TextStyle>,
}


/// The data associated with a [`Label`].
#[derive(Debug)]
pub struct LabelData {
  text: String,
  style: Option<TextStyle>,
}


/// A widget displaying a single line of text.
///
/// A label claims the extent of its text as measured by the renderer.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Label {
  id: Id,
}

impl Label {
  /// Create a new label.
  pub fn create(cap: &mut dyn MutCap, config: LabelConfig) -> Id {
    let data = LabelData {
      text: config.text,
      style: config.style,
    };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Label::new(id)))
  }

  /// Retrieve the text of a label.
  pub fn text(cap: &dyn Cap, label: Id) -> Result<String> {
    Ok(cap.typed_data::<LabelData>(label)?.text.clone())
  }

  /// Change the text of a label.
  pub fn set_text<S>(cap: &mut dyn MutCap, label: Id, text: S) -> Result<()>
  where
    S: Into<String>,
  {
    let text = text.into();
    let data = cap.typed_data_mut::<LabelData>(label)?;
    if data.text == text {
      return Ok(())
    }
    data.text = text;
    cap.update(label, Update::Repack)
  }

  /// Retrieve the effective style of a label.
  pub fn style(cap: &dyn Cap, label: Id) -> Result<TextStyle> {
    let style = cap
      .typed_data::<LabelData>(label)?
      .style
      .clone()
      .unwrap_or_else(|| cap.theme().text.clone());
    Ok(style)
  }

  /// Change the style of a label; `None` reverts to the theme's style.
  pub fn set_style(cap: &mut dyn MutCap, label: Id, style: Option<TextStyle>) -> Result<()> {
    cap.typed_data_mut::<LabelData>(label)?.style = style;
    cap.update(label, Update::Repack)
  }

  /// Change the color of a label's text.
  ///
  /// `color` is either the name of a color in the theme's palette or a
  /// hex specification such as `#ff8000`.
  pub fn set_color(cap: &mut dyn MutCap, label: Id, color: &str) -> Result<()> {
    let color = cap.theme().palette.resolve(color)?;
    let mut style = Label::style(&*cap, label)?;
    if style.color == color {
      return Ok(())
    }
    style.color = color;

    cap.typed_data_mut::<LabelData>(label)?.style = Some(style);
    // The color has no bearing on the text's extent.
    cap.update(label, Update::Redraw)
  }
}

impl Layout for Label {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let style = Label::style(&*cap, self.id)?;
    let text = &cap.typed_data::<LabelData>(self.id)?.text;
    Ok(cap.measure_text(text, &style))
  }
}
