#![forbid(unsafe_code)]

//! Core: input events and geometry for the popmenu widget.
//!
//! # Role in popmenu
//! `popmenu-core` is the input layer. It defines the normalized event types
//! the menu consumes and the cell-coordinate geometry it is laid out in.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, mouse, IME composition).
//! - **Geometry**: `Point`/`Size`/`Rect` in 0-indexed cell coordinates.
//!
//! # How it fits in the system
//! The widget crate (`popmenu`) consumes `popmenu-core::Event` values and
//! renders into a cell surface. Backends that translate raw terminal input
//! into these events stay outside this workspace.

pub mod event;
pub mod geometry;

pub use event::{
    Event, ImeEvent, ImePhase, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
pub use geometry::{Point, Rect, Size};
