//! In-memory document model: elements, selectors, animatable style properties and page
//! definitions.

pub mod document;
pub mod page;
pub mod selector;
pub mod style;
