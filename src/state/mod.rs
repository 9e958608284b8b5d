//! Client-side state.
//!
//! DESIGN
//! ======
//! State types own persistence and change notification; components only
//! render what they are handed.

pub mod favorites;
