//! Quantity Stepper
//!
//! Per-row quantities and the +/- buttons that change them.

use crate::dom::{StepperControl, TextSlot};

/// Attribute carrying a stepper's intent (`increase` / `decrease`)
pub const STEP_ATTR: &str = "data-step";

/// A row quantity, never below 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: Quantity = Quantity(1);

    pub fn new(value: u32) -> Self {
        Quantity(value.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Read a quantity display's text.
    ///
    /// Leading whitespace is skipped and the leading digits are used
    /// ("3 pcs" reads as 3). Text without digits, zero and negative
    /// values read as 1.
    pub fn parse_display(text: &str) -> Self {
        let trimmed = text.trim_start();
        if trimmed.starts_with('-') {
            return Quantity::MIN;
        }
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = unsigned
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return Quantity::MIN;
        }
        match digits.parse::<u32>() {
            Ok(value) => Quantity::new(value),
            Err(_) => Quantity(u32::MAX),
        }
    }

    pub fn step(self, intent: StepIntent) -> Self {
        match intent {
            StepIntent::Increase => Quantity(self.0.saturating_add(1)),
            StepIntent::Decrease if self.0 > 1 => Quantity(self.0 - 1),
            StepIntent::Decrease => self,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::MIN
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a stepper button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIntent {
    Increase,
    Decrease,
}

impl StepIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepIntent::Increase => "increase",
            StepIntent::Decrease => "decrease",
        }
    }

    /// Label shown on a rendered stepper
    pub fn label(&self) -> &'static str {
        match self {
            StepIntent::Increase => "+",
            StepIntent::Decrease => "-",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "increase" => Some(StepIntent::Increase),
            "decrease" => Some(StepIntent::Decrease),
            _ => None,
        }
    }

    /// Legacy markup: the label text itself, matched exactly
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "+" => Some(StepIntent::Increase),
            "-" => Some(StepIntent::Decrease),
            _ => None,
        }
    }

    /// The `data-step` attribute wins when present; otherwise the label
    pub fn decode(attr: Option<&str>, label: &str) -> Option<Self> {
        match attr {
            Some(value) => Self::from_attr(value),
            None => Self::from_label(label),
        }
    }
}

/// Apply `intent` to the quantity shown in `display` and write it back
pub fn step_display<T: TextSlot + ?Sized>(display: &T, intent: StepIntent) -> Quantity {
    let next = Quantity::parse_display(&display.text()).step(intent);
    display.set_text(&next.to_string());
    next
}

/// What a stepper click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Stepped(Quantity),
    /// Neither `data-step` nor the label names an intent
    NoIntent,
    /// No display in the button's row
    NoDisplay,
}

/// Handle one click on a stepper button
pub fn click_stepper<B: StepperControl + ?Sized>(button: &B, quantity_selector: &str) -> StepOutcome {
    let attr = button.step_attr();
    let Some(intent) = StepIntent::decode(attr.as_deref(), &button.label()) else {
        return StepOutcome::NoIntent;
    };
    match button.row_display(quantity_selector) {
        Some(display) => StepOutcome::Stepped(step_display(&display, intent)),
        None => StepOutcome::NoDisplay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fakes::{FakeButton, FakeElement};
    use std::rc::Rc;

    fn click(display: &FakeElement, label: &str) {
        if let Some(intent) = StepIntent::decode(None, label) {
            step_display(display, intent);
        }
    }

    #[test]
    fn test_stepper_scenario() {
        let display = FakeElement::with_text("1");
        click(&display, "-");
        assert_eq!(display.text(), "1");
        for _ in 0..3 {
            click(&display, "+");
        }
        assert_eq!(display.text(), "4");
        click(&display, "-");
        click(&display, "-");
        assert_eq!(display.text(), "2");
    }

    #[test]
    fn test_plus_n_and_minus_n() {
        for q in [1u32, 2, 5, 40] {
            for n in 0..8u32 {
                let up = FakeElement::with_text(&q.to_string());
                let down = FakeElement::with_text(&q.to_string());
                for _ in 0..n {
                    click(&up, "+");
                    click(&down, "-");
                }
                assert_eq!(up.text(), (q + n).to_string());
                assert_eq!(down.text(), q.saturating_sub(n).max(1).to_string());
            }
        }
    }

    #[test]
    fn test_unknown_labels_do_nothing() {
        for label in ["", "+ ", "plus", "−", "x"] {
            assert_eq!(StepIntent::decode(None, label), None, "label {:?}", label);
        }
    }

    #[test]
    fn test_attribute_beats_label() {
        assert_eq!(StepIntent::decode(Some("decrease"), "+"), Some(StepIntent::Decrease));
        assert_eq!(StepIntent::decode(Some("Increase"), "Add"), Some(StepIntent::Increase));
        assert_eq!(StepIntent::decode(Some("remove"), "+"), None);
    }

    #[test]
    fn test_parse_display_hardening() {
        assert_eq!(Quantity::parse_display("3").get(), 3);
        assert_eq!(Quantity::parse_display("  12 pcs").get(), 12);
        assert_eq!(Quantity::parse_display("abc").get(), 1);
        assert_eq!(Quantity::parse_display("").get(), 1);
        assert_eq!(Quantity::parse_display("0").get(), 1);
        assert_eq!(Quantity::parse_display("-4").get(), 1);
        assert_eq!(Quantity::parse_display("99999999999").get(), u32::MAX);
        assert_eq!(Quantity::parse_display("+5").get(), 5);
        assert_eq!(Quantity::parse_display("++5").get(), 1);
    }

    #[test]
    fn test_unparsable_display_steps_from_one() {
        let display = FakeElement::with_text("NaN");
        step_display(&display, StepIntent::Increase);
        assert_eq!(display.text(), "2");

        let display = FakeElement::with_text("NaN");
        step_display(&display, StepIntent::Decrease);
        assert_eq!(display.text(), "1");
    }

    #[test]
    fn test_increase_saturates() {
        assert_eq!(Quantity::new(u32::MAX).step(StepIntent::Increase).get(), u32::MAX);
    }

    #[test]
    fn test_click_stepper_scenario() {
        let display = Rc::new(FakeElement::with_text("1"));
        let minus = FakeButton::labelled("-", &display);
        let plus = FakeButton::labelled("+", &display);

        assert_eq!(click_stepper(&minus, ".quantity"), StepOutcome::Stepped(Quantity::MIN));
        for _ in 0..3 {
            click_stepper(&plus, ".quantity");
        }
        assert_eq!(display.text(), "4");
        click_stepper(&minus, ".quantity");
        click_stepper(&minus, ".quantity");
        assert_eq!(display.text(), "2");
    }

    #[test]
    fn test_click_stepper_prefers_step_attribute() {
        let display = Rc::new(FakeElement::with_text("3"));
        let button = FakeButton {
            step: Some("decrease".to_string()),
            ..FakeButton::labelled("Add one", &display)
        };
        assert_eq!(click_stepper(&button, ".quantity"), StepOutcome::Stepped(Quantity::new(2)));
        assert_eq!(display.text(), "2");
    }

    #[test]
    fn test_click_stepper_leaves_display_alone_without_intent() {
        let display = Rc::new(FakeElement::with_text("3"));
        let button = FakeButton::labelled("x", &display);
        assert_eq!(click_stepper(&button, ".quantity"), StepOutcome::NoIntent);
        assert_eq!(*display.writes.borrow(), 0);
    }

    #[test]
    fn test_click_stepper_uses_configured_selector() {
        let display = Rc::new(FakeElement::with_text("3"));
        let button = FakeButton::labelled("+", &display);
        assert_eq!(click_stepper(&button, ".qty"), StepOutcome::NoDisplay);
        assert_eq!(display.text(), "3");
    }
}
