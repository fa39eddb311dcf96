//! Host Page Bindings
//!
//! What the page's JavaScript sees: the auto-start hook, `initCart`,
//! `updateCartCount` and the `CartHandle` returned by `initCart`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use any_spawner::Executor;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::badge::{count_from_js, update_cart_count_in};
use crate::config::{CartConfig, BODY_CONFIG_ATTR, WINDOW_CONFIG_KEY};
use crate::dom::document;
use crate::error::{CartError, CartResult};
use crate::loader::{CartLoader, JsCartLoader};
use crate::logging;
use crate::widget::{page_loader, CartWidget};

thread_local! {
    /// Widget bound at page load, kept for the page lifetime
    static PAGE_WIDGET: RefCell<Option<CartWidget>> = RefCell::new(None);
    /// Config of the most recently bound widget
    static ACTIVE_CONFIG: RefCell<Option<CartConfig>> = RefCell::new(None);
    /// Set once `initCart` owns the page; a pending page-load bind stands down
    static MANUAL_INIT: Cell<bool> = Cell::new(false);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = Executor::init_wasm_bindgen();

    let doc = document()?;
    let config = match page_config(&doc, JsValue::UNDEFINED) {
        Ok(config) => config,
        Err(e) => {
            logging::init(log::LevelFilter::Info);
            log::error!("{}; falling back to defaults", e);
            CartConfig::default()
        }
    };
    logging::init(config.log_level());

    if !config.auto_start {
        log::info!("auto start disabled; waiting for initCart");
        return Ok(());
    }

    let ready_doc = doc.clone();
    dom_listeners::on_dom_ready(&doc, move || {
        if !auto_bind_allowed() {
            log::info!("initCart already bound the cart; skipping page-load binding");
            return;
        }
        match CartWidget::attach_with_page_loader(&ready_doc, config.clone()) {
            Ok(widget) => {
                remember_config(config);
                PAGE_WIDGET.with(|slot| *slot.borrow_mut() = Some(widget));
            }
            Err(e) => log::error!("cart widget not bound: {}", e),
        }
    })?;
    Ok(())
}

/// Handle to a widget bound through `initCart`
#[wasm_bindgen]
pub struct CartHandle {
    widget: Option<CartWidget>,
}

#[wasm_bindgen]
impl CartHandle {
    /// Unbind every listener; later calls are no-ops
    pub fn dispose(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            widget.dispose();
            log::info!("cart widget disposed");
        }
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.widget.as_ref().map(CartWidget::is_open).unwrap_or(false)
    }

    pub fn open(&self) {
        if let Some(widget) = &self.widget {
            widget.open();
        }
    }

    pub fn close(&self) {
        if let Some(widget) = &self.widget {
            widget.close();
        }
    }
}

/// Bind the widget by hand.
///
/// `config` overrides the page config; `loader`, when given, is called on
/// every open and must return (a Promise of) an array of cart lines.
/// Replaces the widget bound at page load, if any.
#[wasm_bindgen(js_name = initCart)]
pub fn init_cart(config: JsValue, loader: Option<js_sys::Function>) -> Result<CartHandle, JsValue> {
    let doc = document()?;
    let config = page_config(&doc, config)?;
    logging::init(config.log_level());

    if let Some(mut previous) = take_over_page() {
        previous.dispose();
        log::info!("replacing auto-started cart widget");
    }

    let loader: Rc<dyn CartLoader> = match loader {
        Some(fetch) => Rc::new(JsCartLoader::new(fetch)),
        None => page_loader(&doc, &config),
    };
    let widget = CartWidget::attach(&doc, config.clone(), loader)?;
    remember_config(config);
    Ok(CartHandle {
        widget: Some(widget),
    })
}

/// Write `count` into the cart badge, if the page has one
#[wasm_bindgen(js_name = updateCartCount)]
pub fn update_cart_count(count: f64) -> Result<(), JsValue> {
    let Some(count) = count_from_js(count) else {
        log::warn!("updateCartCount ignored invalid count {}", count);
        return Ok(());
    };
    let doc = document()?;
    let config = ACTIVE_CONFIG
        .with(|slot| slot.borrow().clone())
        .unwrap_or_default();
    update_cart_count_in(&doc, &config, count);
    Ok(())
}

/// `initCart` takes the page: stop any pending page-load bind and hand
/// back the auto-started widget, if one is already bound
fn take_over_page() -> Option<CartWidget> {
    MANUAL_INIT.with(|taken| taken.set(true));
    PAGE_WIDGET.with(|slot| slot.borrow_mut().take())
}

fn auto_bind_allowed() -> bool {
    !MANUAL_INIT.with(Cell::get)
}

fn remember_config(config: CartConfig) {
    ACTIVE_CONFIG.with(|slot| *slot.borrow_mut() = Some(config));
}

/// Defaults, then `<body data-cart-config>`, then `window.cartConfig`, then `extra`
fn page_config(doc: &Document, extra: JsValue) -> CartResult<CartConfig> {
    let mut layers = Vec::new();

    if let Some(json) = doc.body().and_then(|b| b.get_attribute(BODY_CONFIG_ATTR)) {
        layers.push(CartConfig::parse_layer(&json)?);
    }

    if let Some(win) = web_sys::window() {
        let global = js_sys::Reflect::get(&win, &JsValue::from_str(WINDOW_CONFIG_KEY))?;
        layers.push(js_layer(global)?);
    }

    layers.push(js_layer(extra)?);
    CartConfig::from_layers(&layers)
}

fn js_layer(value: JsValue) -> CartResult<Value> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| CartError::InvalidConfig(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_init_stops_pending_page_bind() {
        assert!(auto_bind_allowed());
        assert!(take_over_page().is_none());
        assert!(!auto_bind_allowed());
        assert!(take_over_page().is_none());
        assert!(!auto_bind_allowed());
    }
}
