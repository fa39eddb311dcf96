//! Browser tests: run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dom_listeners::{is_event_origin, listen, on_dom_ready, ListenerGroup};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn attached_div() -> Element {
    let doc = document();
    let div = doc.create_element("div").unwrap();
    doc.body().unwrap().append_child(&div).unwrap();
    div
}

fn click(el: &Element) {
    el.unchecked_ref::<HtmlElement>().click();
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut(Event) + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    (count, move |_ev: Event| inner.set(inner.get() + 1))
}

#[wasm_bindgen_test]
fn test_removed_handle_stops_listening() {
    let div = attached_div();
    let (count, handler) = counter();
    let handle = listen(&div, "click", handler).unwrap();
    assert!(handle.is_bound());

    click(&div);
    handle.remove();
    click(&div);
    assert_eq!(count.get(), 1);
}

#[wasm_bindgen_test]
fn test_dropped_handle_stops_listening() {
    let div = attached_div();
    let (count, handler) = counter();
    {
        let _handle = listen(&div, "click", handler).unwrap();
        click(&div);
    }
    click(&div);
    assert_eq!(count.get(), 1);
}

#[wasm_bindgen_test]
fn test_group_dispose_unbinds_all() {
    let div = attached_div();
    let (count, first) = counter();
    let second = {
        let count = count.clone();
        move |_ev: Event| count.set(count.get() + 10)
    };

    let mut group = ListenerGroup::new();
    group.listen(&div, "click", first).unwrap();
    group.listen(&div, "click", second).unwrap();
    assert_eq!(group.len(), 2);

    click(&div);
    assert_eq!(count.get(), 11);

    group.dispose();
    group.dispose();
    assert!(group.is_empty());
    click(&div);
    assert_eq!(count.get(), 11);
}

#[wasm_bindgen_test]
fn test_event_origin_is_false_for_descendants() {
    let parent = attached_div();
    let child = document().create_element("span").unwrap();
    parent.append_child(&child).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = seen.clone();
    let target = parent.clone();
    let _handle = listen(&parent, "click", move |ev: Event| {
        record.borrow_mut().push(is_event_origin(&ev, &target));
    })
    .unwrap();

    click(&child);
    click(&parent);
    assert_eq!(*seen.borrow(), vec![false, true]);
}

#[wasm_bindgen_test]
fn test_dom_ready_runs_immediately_after_load() {
    let ran = Rc::new(Cell::new(false));
    let flag = ran.clone();
    on_dom_ready(&document(), move || flag.set(true)).unwrap();
    assert!(ran.get());
}
