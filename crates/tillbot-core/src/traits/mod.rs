//! Core traits for tillbot.

mod llm;

pub use llm::*;
