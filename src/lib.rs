// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(
  clippy::assertions_on_constants,
  clippy::let_unit_value,
  clippy::redundant_field_names,
)]
#![warn(
  future_incompatible,
  missing_debug_implementations,
  missing_docs,
  rust_2018_compatibility,
  rust_2018_idioms,
  trivial_numeric_casts,
  unstable_features,
  unused_import_braces,
  unused_qualifications,
  unused_results,
)]

//! A retained-mode widget toolkit built around a constraint-based
//! layout engine.
//!
//! Widgets live in the arena of a [`Ui`] and form a tree. Every widget
//! claims a minimum size bottom-up, gets resized top-down, and receives
//! a [`Group`] token describing its draw order. Drawing itself is left
//! to a [`Renderer`] supplied by the user, keeping the crate agnostic
//! of the underlying system, its rendering machinery, and its event
//! dispatching.

extern crate self as tessel;

mod align;
mod batch;
mod error;
mod event;
mod geom;
mod grid;
mod group;
mod handleable;
mod layout;
mod mouse;
mod object;
mod renderable;
mod renderer;
mod theme;
mod ui;
mod widget;
pub mod widgets;

pub use self::align::align;
pub use self::align::fixed_size_align;
pub use self::align::AlignFn;
pub use self::align::Alignment;
pub use self::align::AlignmentRegistry;
pub use self::batch::Update;
pub use self::batch::UpdateBatch;
pub use self::error::Error;
pub use self::error::Result;
pub use self::event::Event;
pub use self::event::Key;
pub use self::event::Modifiers;
pub use self::event::MouseButtons;
pub use self::event::MouseEvent;
pub use self::event::Rollover;
pub use self::event::Signal;
pub use self::geom::Rect;
pub use self::geom::Size;
pub use self::geom::Vector;
pub use self::grid::Cell;
pub use self::grid::GridSolver;
pub use self::grid::SizePolicy;
pub use self::group::Group;
pub use self::group::GroupKind;
pub use self::handleable::Handleable;
pub use self::layout::Layout;
pub use self::mouse::hit_test;
pub use self::mouse::MouseNormalizer;
pub use self::mouse::PassThrough;
pub use self::mouse::SpuriousLeaveFilter;
pub use self::object::Object;
pub use self::renderable::Renderable;
pub use self::renderer::estimate_text_size;
pub use self::renderer::Renderer;
pub use self::theme::Color;
pub use self::theme::Palette;
pub use self::theme::TextStyle;
pub use self::theme::Theme;
pub use self::ui::Cap;
pub use self::ui::ChildIter;
pub use self::ui::HoldFn;
pub use self::ui::Id;
pub use self::ui::MutCap;
pub use self::ui::NewWidgetFn;
pub use self::ui::SignalFn;
pub use self::ui::Ui;
pub use self::widget::Widget;

/// A module providing custom derive functionality for `tessel` related
/// traits.
///
/// The module merely re-exports the procedural macros provided by the
/// `tessel-derive` crate.
pub mod derive {
  pub use tessel_derive::*;
}
