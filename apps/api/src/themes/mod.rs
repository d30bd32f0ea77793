//! Theming: the static asset registry and its read-only HTTP surface.

pub mod assets;
pub mod handlers;
