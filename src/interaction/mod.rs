//! Pointer-driven micro-interactions.

pub mod hover;
