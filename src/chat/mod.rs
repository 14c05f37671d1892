//! # Chat Seam
//!
//! Transport-facing line model, handler trait, and dispatch registry.
//! The IRC connection framework is an external collaborator: it feeds
//! inbound lines into [`HandlerRegistry::dispatch`] and renders the
//! returned [`Reply`] values back onto the wire.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod context;
pub mod handler;
pub mod line;
pub mod registry;

pub use context::HandlerContext;
pub use handler::LineHandler;
pub use line::{ChatLine, Reply};
pub use registry::HandlerRegistry;
