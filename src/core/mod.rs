//! Core business logic - framework-agnostic AFK tracking and panel publishing.
//!
//! Nothing in here depends on Discord types; the bot layer adapts serenity to
//! [`surface::DisplaySurface`] and normalizes interactions to [`command::Command`].

/// Command enum and dispatch
pub mod command;
/// Duration input parsing
pub mod duration;
/// Panel and stats rendering
pub mod panel;
/// Evict/render/publish cycle and refresh loop
pub mod refresh;
/// In-memory AFK registry
pub mod registry;
/// JSON state files
pub mod store;
/// Display surface abstraction
pub mod surface;
/// Remaining-time formatting
pub mod time_format;
/// Shared, persisted registry
pub mod tracker;
