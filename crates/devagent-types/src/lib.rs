//! Shared types for the DevAgent console.

mod chat;
mod interaction;
mod stats;
mod tree;

pub use chat::*;
pub use interaction::*;
pub use stats::*;
pub use tree::*;
