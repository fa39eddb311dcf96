//! DOM Seams
//!
//! The two things the cart logic does to elements, as traits, so the
//! modal and stepper rules run against `web_sys::Element` in the page and
//! against plain fakes in tests.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget};

use crate::error::{CartError, CartResult};
use crate::quantity::STEP_ATTR;

/// An element carrying a CSS state marker
pub trait MarkerTarget {
    fn add_marker(&self, marker: &str);
    fn remove_marker(&self, marker: &str);
    fn has_marker(&self, marker: &str) -> bool;
}

/// An element whose text content holds a value
pub trait TextSlot {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

/// A quantity button: what it asks for and the display it drives
pub trait StepperControl {
    type Display: TextSlot;

    /// Value of the `data-step` attribute, if any
    fn step_attr(&self) -> Option<String>;
    fn label(&self) -> String;
    /// The display matching `selector` in the button's row
    fn row_display(&self, selector: &str) -> Option<Self::Display>;
}

impl<T: TextSlot + ?Sized> TextSlot for Rc<T> {
    fn text(&self) -> String {
        (**self).text()
    }

    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

impl MarkerTarget for Element {
    fn add_marker(&self, marker: &str) {
        if let Err(e) = self.class_list().add_1(marker) {
            log::warn!("failed to add class {}: {:?}", marker, e);
        }
    }

    fn remove_marker(&self, marker: &str) {
        if let Err(e) = self.class_list().remove_1(marker) {
            log::warn!("failed to remove class {}: {:?}", marker, e);
        }
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.class_list().contains(marker)
    }
}

impl TextSlot for Element {
    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

impl StepperControl for Element {
    type Display = Element;

    fn step_attr(&self) -> Option<String> {
        self.get_attribute(STEP_ATTR)
    }

    fn label(&self) -> String {
        self.text()
    }

    fn row_display(&self, selector: &str) -> Option<Element> {
        self.parent_element().and_then(|row| query_in(&row, selector))
    }
}

/// The page's document
pub fn document() -> CartResult<Document> {
    web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| CartError::MissingElement("document".to_string()))
}

pub fn element_by_id(doc: &Document, id: &str) -> Option<Element> {
    doc.get_element_by_id(id)
}

/// The element matching `selector` at or above the event target
pub fn closest_from_target(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    let element = target?.dyn_into::<Element>().ok()?;
    element.closest(selector).ok().flatten()
}

/// First match of `selector` inside `scope`
pub fn query_in(scope: &Element, selector: &str) -> Option<Element> {
    scope.query_selector(selector).ok().flatten()
}

/// All matches of `selector` inside `scope`, in document order
pub fn query_all_in(scope: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = scope.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::{MarkerTarget, StepperControl, TextSlot};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory element for exercising the cart rules without a browser
    #[derive(Debug, Default)]
    pub struct FakeElement {
        pub classes: RefCell<Vec<String>>,
        pub content: RefCell<String>,
        pub writes: RefCell<usize>,
    }

    impl FakeElement {
        pub fn with_text(text: &str) -> Self {
            let el = Self::default();
            *el.content.borrow_mut() = text.to_string();
            el
        }
    }

    impl MarkerTarget for FakeElement {
        fn add_marker(&self, marker: &str) {
            let mut classes = self.classes.borrow_mut();
            if !classes.iter().any(|c| c == marker) {
                classes.push(marker.to_string());
            }
        }

        fn remove_marker(&self, marker: &str) {
            self.classes.borrow_mut().retain(|c| c != marker);
        }

        fn has_marker(&self, marker: &str) -> bool {
            self.classes.borrow().iter().any(|c| c == marker)
        }
    }

    impl TextSlot for FakeElement {
        fn text(&self) -> String {
            self.content.borrow().clone()
        }

        fn set_text(&self, text: &str) {
            *self.content.borrow_mut() = text.to_string();
            *self.writes.borrow_mut() += 1;
        }
    }

    /// Stepper button sharing its row's displays by selector
    #[derive(Debug, Default)]
    pub struct FakeButton {
        pub step: Option<String>,
        pub label: String,
        pub row: Vec<(String, Rc<FakeElement>)>,
    }

    impl FakeButton {
        pub fn labelled(label: &str, display: &Rc<FakeElement>) -> Self {
            Self {
                step: None,
                label: label.to_string(),
                row: vec![(".quantity".to_string(), display.clone())],
            }
        }
    }

    impl StepperControl for FakeButton {
        type Display = Rc<FakeElement>;

        fn step_attr(&self) -> Option<String> {
            self.step.clone()
        }

        fn label(&self) -> String {
            self.label.clone()
        }

        fn row_display(&self, selector: &str) -> Option<Rc<FakeElement>> {
            self.row
                .iter()
                .find(|(sel, _)| sel == selector)
                .map(|(_, el)| el.clone())
        }
    }
}
