//! Storefront Cart UI
//!
//! Client-side behaviour for the storefront's cart widget, compiled to
//! WebAssembly:
//! - cart modal open/close and backdrop dismissal
//! - quantity steppers with a floor of 1
//! - cart loading through an injected `CartLoader`
//! - the cart-count badge updater

pub mod badge;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod exports;
pub mod loader;
pub mod logging;
pub mod modal;
pub mod models;
pub mod quantity;
pub mod widget;

pub use badge::{update_cart_count, update_cart_count_in};
pub use config::CartConfig;
pub use error::{CartError, CartResult};
pub use loader::{CartLoader, JsCartLoader, LineSource, PageCartLoader, StaticCartLoader};
pub use modal::{ModalController, ModalEvent, ModalState};
pub use models::CartLine;
pub use quantity::{Quantity, StepIntent};
pub use widget::{CartHandles, CartWidget};
