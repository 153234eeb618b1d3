#![forbid(unsafe_code)]

//! A context-menu widget: a popup panel anchored to a right-click.
//!
//! # Role in popmenu
//! This crate is the widget library. A [`Menu`] owns an ordered collection
//! of [`MenuItem`]s (buttons, checkboxes, labels, rules, text inputs),
//! watches a host region for the secondary-button release gesture, and
//! shows a popup clamped to the viewport at the pointer position.
//!
//! # Primary responsibilities
//! - **Item model**: variant items with typed accessors and activation paths.
//! - **Menu lifecycle**: open on right-release, light dismiss, close-then-callback.
//! - **Placement**: measurement and viewport clamping of the popup.
//! - **Surface**: the cell grid the popup renders into.
//!
//! # Example
//!
//! ```
//! use popmenu::{Menu, MenuItem, MenuOptions};
//! use popmenu_core::geometry::Rect;
//! use popmenu_core::{Event, MouseButton, MouseEvent, MouseEventKind};
//!
//! let host = Rect::new(0, 0, 80, 24);
//! let mut menu = Menu::new(
//!     host,
//!     MenuOptions::new()
//!         .item(MenuItem::button("Copy").with_id("copy").on_click(|_, item| {
//!             println!("{} clicked", item.content());
//!         }))
//!         .item(MenuItem::rule())
//!         .item(MenuItem::checkbox("Word wrap").with_id("wrap").with_checked(true)),
//! )
//! .unwrap();
//!
//! let click = Event::Mouse(MouseEvent::new(
//!     MouseEventKind::Up(MouseButton::Right),
//!     10,
//!     5,
//! ));
//! menu.handle_event(&click, host);
//! assert!(menu.is_open());
//! ```

pub mod error;
pub mod item;
pub mod menu;
pub mod placement;
pub mod surface;

pub use error::MenuError;
pub use item::{ItemVariant, MenuItem};
pub use menu::{Menu, MenuOptions};
pub use surface::{Cell, CellAttrs, Surface};
