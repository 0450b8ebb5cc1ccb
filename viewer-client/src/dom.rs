//! Browser implementations of the common traits.

use anyhow::anyhow;
use viewer_common::Result;
use viewer_common::connection::{FrameSink, Transport};
use viewer_common::nav::Navigate;
use wasm_bindgen::JsValue;
use web_sys::{Document, WebSocket, Window};

pub fn window() -> std::result::Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> std::result::Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Writes frames into the text content of the element with the given id.
/// The element is looked up on every write so it may be added or replaced
/// after the viewer was created.
pub struct ElementSink {
    document: Document,
    id: String,
}

impl ElementSink {
    pub fn new(document: Document, id: &str) -> Self {
        Self {
            document,
            id: id.to_string(),
        }
    }
}

impl FrameSink for ElementSink {
    fn show(&mut self, text: &str) -> bool {
        match self.document.get_element_by_id(&self.id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }
}

pub struct SocketTransport<'a>(pub &'a WebSocket);

impl Transport for SocketTransport<'_> {
    fn send_text(&self, text: &str) -> Result<()> {
        self.0
            .send_with_str(text)
            .map_err(|e| anyhow!("websocket send failed: {:?}", e))
    }
}

/// Redirects the current tab through `window.location`.
pub struct LocationNavigator;

impl Navigate for LocationNavigator {
    fn navigate(&self, href: &str) -> Result<()> {
        let window = window().map_err(|e| anyhow!("{:?}", e))?;
        window
            .location()
            .set_href(href)
            .map_err(|e| anyhow!("failed to navigate to {}: {:?}", href, e))
    }
}
