//! Cart Loaders
//!
//! Opening the cart asks a `CartLoader` for the current lines. The widget
//! only knows the trait; the page (or embedder) decides where lines come
//! from.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

use crate::config::CartConfig;
use crate::dom::{query_all_in, query_in, TextSlot};
use crate::error::{js_error_message, CartError, CartResult};
use crate::models::CartLine;
use crate::quantity::Quantity;

/// Where loaded lines live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSource {
    /// Already rendered in the page; nothing to draw
    Page,
    /// Fetched elsewhere; the widget renders them
    Remote,
}

/// Async capability returning the cart's current lines
#[async_trait(?Send)]
pub trait CartLoader {
    async fn load(&self) -> CartResult<Vec<CartLine>>;

    fn source(&self) -> LineSource {
        LineSource::Remote
    }
}

/// Reads the rows the server already rendered
pub struct PageCartLoader {
    scope: Element,
    config: CartConfig,
}

impl PageCartLoader {
    pub fn new(scope: Element, config: CartConfig) -> Self {
        Self { scope, config }
    }

    fn read_row(&self, row: &Element) -> CartLine {
        let name = query_in(row, &self.config.row_name_selector)
            .map(|el| el.text())
            .or_else(|| row.get_attribute("data-name"));
        let quantity = query_in(row, &self.config.quantity_selector).map(|el| el.text());
        line_from_row(
            row.get_attribute("data-product-id").as_deref(),
            row.get_attribute("data-unit-price").as_deref(),
            name.as_deref(),
            quantity.as_deref(),
        )
    }
}

#[async_trait(?Send)]
impl CartLoader for PageCartLoader {
    async fn load(&self) -> CartResult<Vec<CartLine>> {
        let rows = query_all_in(&self.scope, &self.config.row_selector);
        Ok(rows.iter().map(|row| self.read_row(row)).collect())
    }

    fn source(&self) -> LineSource {
        LineSource::Page
    }
}

/// Build a line from a row's raw attribute and text values
pub fn line_from_row(
    product_id: Option<&str>,
    unit_price: Option<&str>,
    name: Option<&str>,
    quantity: Option<&str>,
) -> CartLine {
    CartLine {
        product_id: product_id.and_then(|v| v.trim().parse().ok()),
        name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
        quantity: quantity.map(Quantity::parse_display).unwrap_or_default().get(),
        unit_price: unit_price
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p >= 0.0),
    }
}

/// Fixed lines, for embedders that already hold the cart
#[derive(Debug, Clone, Default)]
pub struct StaticCartLoader {
    lines: Vec<CartLine>,
}

impl StaticCartLoader {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}

#[async_trait(?Send)]
impl CartLoader for StaticCartLoader {
    async fn load(&self) -> CartResult<Vec<CartLine>> {
        Ok(self.lines.clone())
    }
}

/// A host-page function returning (a Promise of) an array of lines
pub struct JsCartLoader {
    fetch: js_sys::Function,
}

impl JsCartLoader {
    pub fn new(fetch: js_sys::Function) -> Self {
        Self { fetch }
    }
}

#[async_trait(?Send)]
impl CartLoader for JsCartLoader {
    async fn load(&self) -> CartResult<Vec<CartLine>> {
        let returned = self
            .fetch
            .call0(&JsValue::NULL)
            .map_err(|e| CartError::Load(js_error_message(&e)))?;
        let resolved = JsFuture::from(js_sys::Promise::resolve(&returned))
            .await
            .map_err(|e| CartError::Load(js_error_message(&e)))?;
        serde_wasm_bindgen::from_value(resolved)
            .map_err(|e| CartError::Load(format!("Failed to parse cart lines: {}", e)))
    }
}
