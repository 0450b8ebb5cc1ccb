//! Browser tests. Run with `wasm-pack test --headless --firefox viewer-client`.

use std::cell::RefCell;
use std::rc::Rc;

use viewer_client::dom::{ElementSink, document};
use viewer_client::{FrameViewer, MenuNavigator};
use viewer_common::connection::FrameSink;
use viewer_common::nav::Navigate;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlElement, MessageEvent, MessageEventInit, WebSocket};

wasm_bindgen_test_configure!(run_in_browser);

fn add_element(tag: &str, id: &str) -> Element {
    let document = document().unwrap();
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn clear_body() {
    document().unwrap().body().unwrap().set_inner_html("");
}

fn click(element: &Element) {
    element.dyn_ref::<HtmlElement>().unwrap().click();
}

fn deliver(socket: &WebSocket, data: &JsValue) {
    let init = MessageEventInit::new();
    init.set_data(data);
    let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
    socket.dispatch_event(&event).unwrap();
}

#[derive(Default)]
struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl Navigate for RecordingNavigator {
    fn navigate(&self, href: &str) -> viewer_common::Result<()> {
        self.visited.borrow_mut().push(href.to_string());
        Ok(())
    }
}

#[wasm_bindgen_test]
fn element_sink_replaces_text() {
    clear_body();
    let board = add_element("div", "game-board");
    board.set_text_content(Some("old"));

    let mut sink = ElementSink::new(document().unwrap(), "game-board");
    assert!(sink.show("frame:42"));
    assert_eq!(board.text_content().as_deref(), Some("frame:42"));

    assert!(sink.show("<b>not markup</b>"));
    assert_eq!(board.text_content().as_deref(), Some("<b>not markup</b>"));
    assert_eq!(board.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn element_sink_without_element() {
    clear_body();
    let mut sink = ElementSink::new(document().unwrap(), "game-board");
    assert!(!sink.show("frame:1"));
}

#[wasm_bindgen_test]
fn navigator_skips_absent_buttons() {
    clear_body();
    for id in ["buttonBACK", "button1", "button2", "button4", "button5"] {
        add_element("button", id);
    }

    let navigator = MenuNavigator::new().unwrap();
    assert_eq!(navigator.bound_count(), 5);
    assert!(
        navigator
            .bound_routes()
            .iter()
            .all(|route| route.id != "button3")
    );
}

#[wasm_bindgen_test]
fn navigator_with_no_buttons() {
    clear_body();
    let navigator = MenuNavigator::new().unwrap();
    assert_eq!(navigator.bound_count(), 0);
}

#[wasm_bindgen_test]
fn viewer_starts_in_connecting_state() {
    clear_body();
    add_element("div", "game-board");
    add_element("button", "start-button");

    let viewer = FrameViewer::new(JsValue::UNDEFINED).unwrap();
    assert_eq!(viewer.state(), "connecting");
    assert!(viewer.start().is_err());
    viewer.close().unwrap();
}

#[wasm_bindgen_test]
fn viewer_rejects_http_endpoint() {
    let config = js_sys::Object::new();
    js_sys::Reflect::set(
        &config,
        &JsValue::from_str("endpoint"),
        &JsValue::from_str("http://localhost:8765"),
    )
    .unwrap();

    assert!(FrameViewer::new(config.into()).is_err());
}

#[wasm_bindgen_test]
fn viewer_shows_text_frames_and_ignores_binary() {
    clear_body();
    let board = add_element("div", "game-board");
    let viewer = FrameViewer::new(JsValue::UNDEFINED).unwrap();

    deliver(viewer.socket(), &JsValue::from_str("frame:42"));
    assert_eq!(board.text_content().as_deref(), Some("frame:42"));

    deliver(viewer.socket(), &js_sys::ArrayBuffer::new(4).into());
    assert_eq!(board.text_content().as_deref(), Some("frame:42"));
    assert_eq!(viewer.state(), "connecting");
}

#[wasm_bindgen_test]
fn start_click_before_open_is_ignored() {
    clear_body();
    add_element("div", "game-board");
    let button = add_element("button", "start-button");
    let viewer = FrameViewer::new(JsValue::UNDEFINED).unwrap();

    click(&button);
    assert_eq!(viewer.state(), "connecting");
}

#[wasm_bindgen_test]
fn dropping_viewer_closes_socket_and_detaches() {
    clear_body();
    let board = add_element("div", "game-board");
    let viewer = FrameViewer::new(JsValue::UNDEFINED).unwrap();
    let socket = viewer.socket().clone();
    drop(viewer);

    assert!(socket.ready_state() >= WebSocket::CLOSING);
    deliver(&socket, &JsValue::from_str("late frame"));
    assert_eq!(board.text_content().as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn navigator_click_follows_route() {
    clear_body();
    let back = add_element("button", "buttonBACK");
    let recorder = Rc::new(RecordingNavigator::default());
    let _navigator = MenuNavigator::attach(document().unwrap(), recorder.clone(), false).unwrap();

    click(&back);
    assert_eq!(*recorder.visited.borrow(), vec!["../index.html".to_string()]);
}

#[wasm_bindgen_test]
fn dropped_navigator_stops_navigating() {
    clear_body();
    let button = add_element("button", "button1");
    let recorder = Rc::new(RecordingNavigator::default());
    let navigator = MenuNavigator::attach(document().unwrap(), recorder.clone(), false).unwrap();

    click(&button);
    assert_eq!(recorder.visited.borrow().len(), 1);

    drop(navigator);
    click(&button);
    assert_eq!(*recorder.visited.borrow(), vec!["podsite/puzzles.html".to_string()]);
}

#[wasm_bindgen_test]
fn navigator_waits_for_dom_content_loaded() {
    clear_body();
    let button = add_element("button", "button2");
    let recorder = Rc::new(RecordingNavigator::default());
    let navigator = MenuNavigator::attach(document().unwrap(), recorder.clone(), true).unwrap();

    assert_eq!(navigator.bound_count(), 0);
    click(&button);
    assert!(recorder.visited.borrow().is_empty());

    let ready = Event::new("DOMContentLoaded").unwrap();
    document().unwrap().dispatch_event(&ready).unwrap();
    assert_eq!(navigator.bound_count(), 1);

    click(&button);
    assert_eq!(*recorder.visited.borrow(), vec!["podsite/play.html".to_string()]);
}
