// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Id;


/// A trait representing an object that is identified by an [`Id`].
pub trait Object {
  /// Retrieve the `Id` of the object.
  fn id(&self) -> Id;
}
