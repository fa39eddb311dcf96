//! Cart Models
//!
//! Line items as returned by cart loaders.

use serde::{Deserialize, Deserializer, Serialize};

use crate::quantity::Quantity;

/// One row of the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(default)]
    pub product_id: Option<u32>,
    pub name: String,
    /// Always at least 1; smaller values are raised on the way in
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

fn default_quantity() -> u32 {
    Quantity::MIN.get()
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(Quantity::new(raw.clamp(0, u32::MAX as i64) as u32).get())
}

impl CartLine {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: None,
            name: name.into(),
            quantity: Quantity::new(quantity).get(),
            unit_price: None,
        }
    }

    /// Quantity as displayed, never below 1 even if the field was set directly
    pub fn display_quantity(&self) -> Quantity {
        Quantity::new(self.quantity)
    }

    /// Price times quantity, when the line is priced
    pub fn subtotal(&self) -> Option<f64> {
        self.unit_price
            .map(|price| price * self.display_quantity().get() as f64)
    }
}

/// Sum of priced subtotals; None when no line carries a price
pub fn cart_total(lines: &[CartLine]) -> Option<f64> {
    lines
        .iter()
        .filter_map(CartLine::subtotal)
        .fold(None, |acc, sub| Some(acc.unwrap_or(0.0) + sub))
}
