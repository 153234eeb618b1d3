#![forbid(unsafe_code)]

//! Menu construction errors.

use thiserror::Error;

/// Errors surfaced synchronously from [`Menu::new`](crate::Menu::new).
///
/// Duplicate identifiers are a configuration error and fail fast; all other
/// malformed input (missing handlers, inapplicable builder options) degrades
/// silently to a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Two items were registered under the same identifier.
    #[error("duplicate menu item id: {id:?}")]
    DuplicateId {
        /// The offending identifier.
        id: String,
    },
}
