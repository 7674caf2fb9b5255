// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Explicit configuration shared by all widgets of a `Ui`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;
use std::time::Duration;

use crate::AlignmentRegistry;
use crate::Error;
use crate::Result;


/// An RGBA color.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Color {
  /// The red component.
  pub r: u8,
  /// The green component.
  pub g: u8,
  /// The blue component.
  pub b: u8,
  /// The alpha component.
  pub a: u8,
}

impl Color {
  /// Create an opaque color.
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Create a color with the given alpha value.
  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }
}

impl FromStr for Color {
  type Err = Error;

  /// Parse a color from a `#rrggbb` or `#rrggbbaa` hex string.
  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
      return Err(invalid())
    }

    let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let r = component(0)?;
    let g = component(2)?;
    let b = component(4)?;
    let a = if hex.len() == 8 { component(6)? } else { 255 };
    Ok(Self { r, g, b, a })
  }
}

impl Display for Color {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
  }
}


/// A table of named colors.
#[derive(Clone, Debug)]
pub struct Palette {
  colors: BTreeMap<String, Color>,
}

impl Palette {
  /// Create a palette containing a basic set of colors.
  pub fn new() -> Self {
    let colors = [
      ("black", Color::rgb(0, 0, 0)),
      ("white", Color::rgb(255, 255, 255)),
      ("grey", Color::rgb(128, 128, 128)),
      ("red", Color::rgb(255, 0, 0)),
      ("green", Color::rgb(0, 255, 0)),
      ("blue", Color::rgb(0, 0, 255)),
      ("yellow", Color::rgb(255, 255, 0)),
      ("transparent", Color::rgba(0, 0, 0, 0)),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color))
    .collect();

    Self { colors }
  }

  /// Look up a color by name.
  pub fn get(&self, name: &str) -> Result<Color> {
    self
      .colors
      .get(name)
      .copied()
      .ok_or_else(|| Error::UnknownColor {
        name: name.to_string(),
        valid: self.colors.keys().map(String::as_str).collect::<Vec<_>>().join(", "),
      })
  }

  /// Define a color, replacing a previous definition of the same name.
  pub fn define<S>(&mut self, name: S, color: Color) -> Option<Color>
  where
    S: Into<String>,
  {
    self.colors.insert(name.into(), color)
  }

  /// Resolve a color given either by name or as a hex string.
  pub fn resolve(&self, spec: &str) -> Result<Color> {
    if spec.starts_with('#') {
      spec.parse()
    } else {
      self.get(spec)
    }
  }
}

impl Default for Palette {
  fn default() -> Self {
    Self::new()
  }
}


/// The style used for rendering text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
  /// The name of the font.
  pub font_name: String,
  /// The font size in points.
  pub font_size: f64,
  /// The color of the text.
  pub color: Color,
}

impl Default for TextStyle {
  fn default() -> Self {
    Self {
      font_name: "sans".to_string(),
      font_size: 12.0,
      color: Color::rgb(0, 0, 0),
    }
  }
}


/// Settings shared by all widgets of a `Ui`.
#[derive(Clone, Debug)]
pub struct Theme {
  /// The named colors available to widgets.
  pub palette: Palette,
  /// The named alignments available to widgets.
  pub alignments: AlignmentRegistry,
  /// The default style of text.
  pub text: TextStyle,
  /// The maximum time between two clicks forming a double click.
  pub double_click_interval: Duration,
  /// The distance scrolled per unit of scroll wheel movement.
  pub scroll_step: f64,
}

impl Default for Theme {
  fn default() -> Self {
    Self {
      palette: Palette::default(),
      alignments: AlignmentRegistry::default(),
      text: TextStyle::default(),
      double_click_interval: Duration::from_millis(500),
      scroll_step: 20.0,
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  #[test]
  fn color_parsing() {
    assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
    assert_eq!("#ff800080".parse::<Color>().unwrap(), Color::rgba(255, 128, 0, 128));
    assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");

    for invalid in ["ff8000", "#ff80", "#gg8000", "#ff800"] {
      assert_eq!(
        invalid.parse::<Color>().unwrap_err(),
        Error::InvalidColor(invalid.to_string())
      );
    }
  }

  /// Check that unknown names produce an error listing valid ones.
  #[test]
  fn palette_lookup() {
    let mut palette = Palette::new();
    assert_eq!(palette.get("red").unwrap(), Color::rgb(255, 0, 0));

    match palette.get("crimson").unwrap_err() {
      Error::UnknownColor { name, valid } => {
        assert_eq!(name, "crimson");
        assert!(valid.contains("red"));
      },
      err => panic!("unexpected error: {err}"),
    }

    let _prev = palette.define("crimson", Color::rgb(220, 20, 60));
    assert_eq!(palette.resolve("crimson").unwrap(), Color::rgb(220, 20, 60));
    assert_eq!(palette.resolve("#000000").unwrap(), Color::rgb(0, 0, 0));
  }
}
