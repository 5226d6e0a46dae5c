//! Core types for tillbot.

mod knowledge;
mod message;

pub use knowledge::*;
pub use message::*;
