// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! The built-in widgets.
//!
//! Widgets are stateless objects; their state lives in the data they
//! are created with and is manipulated through associated functions
//! that take the capability to operate on as their first argument,
//! e.g.,
//! ```rust
//! # use tessel::{Cap, Error, MutCap, Rect, Renderable, Renderer, Size, Ui};
//! # use tessel::widgets::{BoxConfig, HBox, Placeholder};
//! # #[derive(Debug)]
//! # struct NullRenderer;
//! # impl Renderer for NullRenderer {
//! #   fn draw(&mut self, _: tessel::Id, _: &dyn Renderable, _: &dyn Cap, _: Rect, _: &tessel::Group) {}
//! #   fn undraw(&mut self, _: tessel::Id) {}
//! # }
//! # fn main() -> Result<(), Error> {
//! let (mut ui, root) = Ui::new(Box::new(NullRenderer), Rect::new(0.0, 0.0, 100.0, 100.0));
//! let hbox = HBox::create(&mut ui, BoxConfig::default());
//! let () = ui.attach_child(root, hbox)?;
//! let child = Placeholder::create(&mut ui, Size::new(10.0, 10.0));
//! let () = HBox::add(&mut ui, hbox, child)?;
//! assert_eq!(ui.min_size(hbox), Size::new(10.0, 10.0));
//! # Ok(())
//! # }
//! ```

mod background;
mod bin;
mod board;
mod boxes;
mod button;
mod grid;
mod image;
mod label;
mod placeholder;
mod scroll;
mod scrollbar;
mod stack;

pub use self::background::Appearance;
pub use self::background::Background;
pub use self::background::BackgroundData;
pub use self::background::Slot;
pub use self::bin::Bin;
pub use self::bin::BinConfig;
pub use self::bin::BinData;
pub use self::board::Board;
pub use self::board::BoardData;
pub use self::board::Coord;
pub use self::board::Placement;
pub use self::boxes::BoxConfig;
pub use self::boxes::BoxData;
pub use self::boxes::HBox;
pub use self::boxes::VBox;
pub use self::button::Button;
pub use self::button::ButtonConfig;
pub use self::button::ButtonData;
pub use self::grid::Grid;
pub use self::grid::GridConfig;
pub use self::grid::GridData;
pub use self::image::Image;
pub use self::image::ImageData;
pub use self::image::ImageRef;
pub use self::label::Label;
pub use self::label::LabelConfig;
pub use self::label::LabelData;
pub use self::placeholder::Placeholder;
pub use self::placeholder::PlaceholderData;
pub use self::scroll::Mover;
pub use self::scroll::MoverData;
pub use self::scroll::ScrollPane;
pub use self::scroll::ScrollPaneConfig;
pub use self::scroll::ScrollPaneData;
pub use self::scrollbar::ScrollBar;
pub use self::scrollbar::ScrollBarConfig;
pub use self::scrollbar::ScrollBarData;
pub use self::scrollbar::ScrollGrip;
pub use self::scrollbar::ScrollGripData;
pub use self::stack::Deck;
pub use self::stack::DeckData;
pub use self::stack::Stack;
pub use self::stack::StackConfig;
pub use self::stack::StackData;
