//! Page components: the favorites layer plus the dish management glue.
//!
//! Each module keeps its decisions in plain functions and types that test
//! natively, with a `hydrate`-only submodule that applies them to the DOM.

pub mod dish_filter;
pub mod dish_form;
pub mod favorite_controls;
pub mod favorites_badge;
pub mod image_choice;
pub mod modal;
