//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component
//! logic to improve reuse and testability.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod storage;
