//! Cart Count Badge

use web_sys::Document;

use crate::config::CartConfig;
use crate::dom::{element_by_id, TextSlot};

/// Set the badge text to `count`; no-op without a badge
pub fn update_cart_count<T: TextSlot + ?Sized>(badge: Option<&T>, count: u32) {
    if let Some(badge) = badge {
        badge.set_text(&count.to_string());
    }
}

/// A count passed in from JavaScript; None unless it is a whole number
/// that fits in `u32`
pub fn count_from_js(value: f64) -> Option<u32> {
    let valid = value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64;
    valid.then_some(value as u32)
}

/// Look the badge up by id and update it
pub fn update_cart_count_in(doc: &Document, config: &CartConfig, count: u32) {
    let badge = element_by_id(doc, &config.count_id);
    if badge.is_none() {
        log::debug!("no #{} badge on this page", config.count_id);
    }
    update_cart_count(badge.as_ref(), count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fakes::FakeElement;

    #[test]
    fn test_updates_present_badge() {
        let badge = FakeElement::with_text("0");
        update_cart_count(Some(&badge), 5);
        assert_eq!(badge.text(), "5");
    }

    #[test]
    fn test_missing_badge_is_noop() {
        update_cart_count::<FakeElement>(None, 5);
    }

    #[test]
    fn test_zero_is_written() {
        let badge = FakeElement::with_text("3");
        update_cart_count(Some(&badge), 0);
        assert_eq!(badge.text(), "0");
        assert_eq!(*badge.writes.borrow(), 1);
    }

    #[test]
    fn test_count_from_js_rejects_negative_and_fractional() {
        assert_eq!(count_from_js(5.0), Some(5));
        assert_eq!(count_from_js(0.0), Some(0));
        assert_eq!(count_from_js(-1.0), None);
        assert_eq!(count_from_js(2.5), None);
        assert_eq!(count_from_js(f64::NAN), None);
        assert_eq!(count_from_js(f64::INFINITY), None);
        assert_eq!(count_from_js(5_000_000_000.0), None);
    }
}
