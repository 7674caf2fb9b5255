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
use crate::Update;


/// A reference to an image owned by the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageRef {
  /// The name under which the renderer knows the image.
  pub name: String,
  /// The natural width of the image.
  pub width: f64,
  /// The natural height of the image.
  pub height: f64,
}

impl ImageRef {
  /// Create a new image reference.
  pub fn new<S>(name: S, width: f64, height: f64) -> Self
  where
    S: Into<String>,
  {
    Self {
      name: name.into(),
      width,
      height,
    }
  }

  /// Retrieve the natural size of the image.
  #[inline]
  pub fn size(&self) -> Size {
    Size::new(self.width, self.height)
  }
}


/// The data associated with an [`Image`].
#[derive(Debug, Default)]
pub struct ImageData {
  image: Option<ImageRef>,
}


/// A widget displaying an image at its natural size.
#[derive(Debug, Handleable, Widget)]
#[tessel(default_new)]
pub struct Image {
  id: Id,
}

impl Image {
  /// Create a new image widget.
  pub fn create(cap: &mut dyn MutCap, image: Option<ImageRef>) -> Id {
    let data = ImageData { image };
    cap.add_widget(Box::new(data), &mut |id, _cap| Box::new(Image::new(id)))
  }

  /// Retrieve the displayed image.
  pub fn image(cap: &dyn Cap, widget: Id) -> Result<Option<ImageRef>> {
    Ok(cap.typed_data::<ImageData>(widget)?.image.clone())
  }

  /// Change or clear the displayed image.
  pub fn set_image(cap: &mut dyn MutCap, widget: Id, image: Option<ImageRef>) -> Result<()> {
    let data = cap.typed_data_mut::<ImageData>(widget)?;
    if data.image == image {
      return Ok(())
    }
    data.image = image;
    cap.update(widget, Update::Repack)
  }
}

impl Layout for Image {
  fn claim(&self, cap: &mut dyn MutCap) -> Result<Size> {
    let image = &cap.typed_data::<ImageData>(self.id)?.image;
    Ok(image.as_ref().map(ImageRef::size).unwrap_or_default())
  }
}
