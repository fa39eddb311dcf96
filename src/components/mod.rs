//! UI Components
//!
//! Leptos views for cart contents fetched by a loader.

mod cart_lines;

pub use cart_lines::{format_price, CartLineList, CartLineRow};
