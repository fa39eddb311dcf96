//! Cart Configuration
//!
//! The markup contract between the page and the widget: element ids,
//! selectors and the state marker. Every field has a default matching the
//! storefront templates, and any subset can be overridden from the page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CartError, CartResult};

/// Attribute on `<body>` holding a JSON config override
pub const BODY_CONFIG_ATTR: &str = "data-cart-config";

/// Global (`window.cartConfig`) holding a JS object config override
pub const WINDOW_CONFIG_KEY: &str = "cartConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartConfig {
    /// Id of the control that opens the cart
    pub trigger_id: String,
    /// Id of the modal container (also the backdrop)
    pub modal_id: String,
    /// Id of the modal's close control
    pub close_id: String,
    /// Id of the cart-count badge
    pub count_id: String,
    /// Id of the element loaded lines are rendered into (None = never render)
    pub items_container_id: Option<String>,
    /// Id of the element stepper clicks are delegated from (None = body)
    pub rows_root_id: Option<String>,
    /// Class marking the modal as open
    pub active_class: String,
    pub stepper_selector: String,
    pub quantity_selector: String,
    pub row_selector: String,
    pub row_name_selector: String,
    /// One of error, warn, info, debug, trace
    pub log_level: String,
    /// Bind on page load; pages calling `initCart` themselves turn this off
    pub auto_start: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            trigger_id: "cartBtn".to_string(),
            modal_id: "cartModal".to_string(),
            close_id: "closeCart".to_string(),
            count_id: "cartCount".to_string(),
            items_container_id: Some("cartItems".to_string()),
            rows_root_id: None,
            active_class: "active".to_string(),
            stepper_selector: ".quantity-btn".to_string(),
            quantity_selector: ".quantity".to_string(),
            row_selector: ".cart-item".to_string(),
            row_name_selector: ".cart-item-name".to_string(),
            log_level: "info".to_string(),
            auto_start: true,
        }
    }
}

impl CartConfig {
    /// Build a config from defaults plus override layers, later layers winning.
    ///
    /// Each layer must be a JSON object; `null` layers are skipped.
    pub fn from_layers(layers: &[Value]) -> CartResult<Self> {
        let mut merged = serde_json::to_value(Self::default())
            .map_err(|e| CartError::InvalidConfig(e.to_string()))?;

        for layer in layers {
            match layer {
                Value::Null => {}
                Value::Object(fields) => {
                    if let Value::Object(base) = &mut merged {
                        for (key, value) in fields {
                            base.insert(key.clone(), value.clone());
                        }
                    }
                }
                other => {
                    return Err(CartError::InvalidConfig(format!(
                        "expected an object, got {}",
                        other
                    )))
                }
            }
        }

        let config: CartConfig =
            serde_json::from_value(merged).map_err(|e| CartError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON override string (the `data-cart-config` attribute)
    pub fn parse_layer(json: &str) -> CartResult<Value> {
        serde_json::from_str(json).map_err(|e| CartError::InvalidConfig(e.to_string()))
    }

    /// Reject empty ids, selectors and marker
    pub fn validate(&self) -> CartResult<()> {
        let required = [
            ("triggerId", &self.trigger_id),
            ("modalId", &self.modal_id),
            ("closeId", &self.close_id),
            ("countId", &self.count_id),
            ("activeClass", &self.active_class),
            ("stepperSelector", &self.stepper_selector),
            ("quantitySelector", &self.quantity_selector),
            ("rowSelector", &self.row_selector),
            ("rowNameSelector", &self.row_name_selector),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CartError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        if self.active_class.contains(char::is_whitespace) {
            return Err(CartError::InvalidConfig(
                "activeClass must be a single class name".to_string(),
            ));
        }
        for (name, value) in [
            ("itemsContainerId", &self.items_container_id),
            ("rowsRootId", &self.rows_root_id),
        ] {
            if matches!(value, Some(id) if id.trim().is_empty()) {
                return Err(CartError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Class names for rendered rows, taken from the selectors when they are
    /// plain `.class` selectors and from the defaults otherwise
    pub fn row_classes(&self) -> RowClasses {
        let defaults = RowClasses::default();
        let pick = |selector: &str, fallback: String| {
            simple_class(selector).map(str::to_string).unwrap_or(fallback)
        };
        RowClasses {
            row: pick(&self.row_selector, defaults.row),
            name: pick(&self.row_name_selector, defaults.name),
            stepper: pick(&self.stepper_selector, defaults.stepper),
            quantity: pick(&self.quantity_selector, defaults.quantity),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Class names used when the widget renders rows itself
#[derive(Debug, Clone, PartialEq)]
pub struct RowClasses {
    pub row: String,
    pub name: String,
    pub stepper: String,
    pub quantity: String,
}

impl Default for RowClasses {
    fn default() -> Self {
        Self {
            row: "cart-item".to_string(),
            name: "cart-item-name".to_string(),
            stepper: "quantity-btn".to_string(),
            quantity: "quantity".to_string(),
        }
    }
}

/// `.name` -> `name`; anything more complex -> None
fn simple_class(selector: &str) -> Option<&str> {
    let class = selector.trim().strip_prefix('.')?;
    let valid = !class.is_empty()
        && class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(class)
}
