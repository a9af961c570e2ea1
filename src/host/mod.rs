//! The host page environment the orchestration layer runs against.
//!
//! One cooperative thread: every callback is dispatched from a driver call on [`Host`], so
//! shared state between callbacks needs `Rc<RefCell<_>>` and nothing stronger.

pub mod environment;
pub mod frame;
pub mod listeners;
pub mod observer;
