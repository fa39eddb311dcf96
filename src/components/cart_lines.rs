//! Cart Lines Component
//!
//! Renders loaded lines with the same markup the server templates use,
//! so the delegated stepper handles rendered rows like server rows.

use leptos::prelude::*;

use crate::config::RowClasses;
use crate::models::{cart_total, CartLine};
use crate::quantity::StepIntent;

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// All lines plus a total footer when any line is priced
#[component]
pub fn CartLineList(lines: Vec<CartLine>, classes: RowClasses) -> impl IntoView {
    if lines.is_empty() {
        return view! { <p class="cart-empty">"Your cart is empty"</p> }.into_any();
    }

    let total = cart_total(&lines);
    let rows = lines
        .into_iter()
        .map(|line| view! { <CartLineRow line=line classes=classes.clone() /> })
        .collect_view();

    view! {
        <div class="cart-lines">
            {rows}
            {total.map(|t| view! {
                <div class="cart-total">
                    <span>"Total"</span>
                    <span class="cart-total-amount">{format_price(t)}</span>
                </div>
            })}
        </div>
    }
    .into_any()
}

/// One row: name, stepper, subtotal
#[component]
pub fn CartLineRow(line: CartLine, classes: RowClasses) -> impl IntoView {
    let subtotal = line.subtotal();
    let stepper = |intent: StepIntent, class: String| {
        view! {
            <button class=class type="button" data-step=intent.as_str()>
                {intent.label()}
            </button>
        }
    };

    view! {
        <div
            class=classes.row.clone()
            data-product-id=line.product_id.map(|id| id.to_string())
            data-unit-price=line.unit_price.map(|p| p.to_string())
        >
            <span class=classes.name.clone()>{line.name.clone()}</span>
            <div class="quantity-controls">
                {stepper(StepIntent::Decrease, classes.stepper.clone())}
                <span class=classes.quantity.clone()>{line.display_quantity().to_string()}</span>
                {stepper(StepIntent::Increase, classes.stepper.clone())}
            </div>
            {subtotal.map(|s| view! { <span class="cart-item-subtotal">{format_price(s)}</span> })}
        </div>
    }
}
