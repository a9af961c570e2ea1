//! Scroll-triggered animations: a serde table of descriptors compiled against the live
//! document into visibility-observer bindings, or into terminal states under reduced motion.

pub mod descriptor;
pub mod registry;
pub mod table;
