//! Frame viewer: WebSocket connection and board display.

use std::cell::RefCell;
use std::rc::Rc;

use viewer_common::config::ViewerConfig;
use viewer_common::connection::{ConnectionObserver, FrameViewerCore};
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Element, Event, MessageEvent, MouseEvent, WebSocket};

use crate::dom::{ElementSink, SocketTransport};

/// Owns one WebSocket connection and every handler registered for it.
/// Dropping the viewer detaches the handlers and closes the socket.
#[wasm_bindgen]
pub struct FrameViewer {
    ws: WebSocket,
    core: Rc<RefCell<FrameViewerCore<ElementSink>>>,
    start_button: Option<Element>,

    // prevent GC of closures
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onerror: Closure<dyn FnMut(Event)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
    _onstart: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl FrameViewer {
    /// Connect to the frame endpoint.
    ///
    /// `config` is an optional object, e.g. `{ endpoint: "ws://localhost:8765" }`;
    /// omitted keys use the defaults.
    ///
    /// The page must keep the returned object alive. Once it is freed, or
    /// collected by the JS garbage collector, the connection is closed and
    /// the start button stops working.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FrameViewer, JsValue> {
        crate::init_runtime();

        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid viewer config: {}", e)))?
        };
        config.validate().map_err(crate::to_js_error)?;

        let document = crate::dom::document()?;
        let ws = WebSocket::new(&config.endpoint)?;
        let sink = ElementSink::new(document.clone(), &config.output_element_id);
        let core = Rc::new(RefCell::new(FrameViewerCore::new(&config, sink)));

        let onopen = {
            let core = Rc::clone(&core);
            Closure::wrap(Box::new(move |_e: Event| {
                core.borrow_mut().on_open();
            }) as Box<dyn FnMut(Event)>)
        };
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        // text frames go straight to the output element
        let onmessage = {
            let core = Rc::clone(&core);
            Closure::wrap(Box::new(move |e: MessageEvent| match e.data().as_string() {
                Some(text) => {
                    core.borrow_mut().on_message(&text);
                }
                None => log::debug!("ignoring non-text frame"),
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let onerror = {
            let core = Rc::clone(&core);
            let ws = ws.clone();
            Closure::wrap(Box::new(move |e: Event| {
                let detail = format!("{} event, readyState={}", e.type_(), ws.ready_state());
                core.borrow_mut().on_error(&detail);
            }) as Box<dyn FnMut(Event)>)
        };
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let onclose = {
            let core = Rc::clone(&core);
            Closure::wrap(Box::new(move |e: CloseEvent| {
                core.borrow_mut().on_close(e.code(), &e.reason());
            }) as Box<dyn FnMut(CloseEvent)>)
        };
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        let onstart = {
            let core = Rc::clone(&core);
            let ws = ws.clone();
            Closure::wrap(Box::new(move |_e: MouseEvent| {
                if let Err(err) = core.borrow().start(&SocketTransport(&ws)) {
                    log::warn!("{:#}", err);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let start_button = document.get_element_by_id(&config.start_element_id);
        match &start_button {
            Some(button) => {
                button.add_event_listener_with_callback("click", onstart.as_ref().unchecked_ref())?
            }
            None => log::debug!(
                "no #{} element, start must be triggered from script",
                config.start_element_id
            ),
        }

        log::info!("connecting to {}", config.endpoint);

        Ok(FrameViewer {
            ws,
            core,
            start_button,
            _onopen: onopen,
            _onmessage: onmessage,
            _onerror: onerror,
            _onclose: onclose,
            _onstart: onstart,
        })
    }

    /// Send the start token. Fails if the connection is not open.
    pub fn start(&self) -> Result<(), JsValue> {
        self.core
            .borrow()
            .start(&SocketTransport(&self.ws))
            .map_err(crate::to_js_error)
    }

    /// Close the WebSocket connection.
    pub fn close(&self) -> Result<(), JsValue> {
        self.ws.close()
    }

    /// `"connecting"`, `"open"` or `"closed"`.
    pub fn state(&self) -> String {
        self.core.borrow().state().as_str().to_string()
    }
}

impl FrameViewer {
    #[doc(hidden)]
    pub fn socket(&self) -> &WebSocket {
        &self.ws
    }
}

impl Drop for FrameViewer {
    fn drop(&mut self) {
        let _ = self.ws.close();
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        if let Some(button) = &self.start_button {
            let _ = button
                .remove_event_listener_with_callback("click", self._onstart.as_ref().unchecked_ref());
        }
    }
}
