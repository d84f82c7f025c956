//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// AFK commands for users
pub mod afk;

/// General utility commands
pub mod general;

/// Panel administration and stats commands
pub mod panel;

// Export commands
pub use afk::*;
pub use general::*;
pub use panel::*;
